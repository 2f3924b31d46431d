use std::fmt::Display;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy)]
pub enum ErrorType {
    InvalidColorFormat,
    ParseError,
    SerializationError,
    KeyWriteError,
    General,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    pub error_type: ErrorType,
    pub message: String,
    pub key: Option<String>,
}

impl Error {
    pub fn new(error_type: ErrorType, message: String) -> Self {
        Error {
            error_type,
            message,
            key: None,
        }
    }

    pub fn from_error<E: Display>(error_type: ErrorType, error: E) -> Self {
        Error {
            error_type,
            message: error.to_string(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_owned());
        self
    }

    /// Raised when a string matches none of the accepted color shapes.
    /// The message spells the accepted shapes out, so it can be shown to a user as is.
    pub fn invalid_color_format(value: &str) -> Self {
        Error {
            error_type: ErrorType::InvalidColorFormat,
            message: format!(
                "Invalid color value '{}'. Value can be: a hex string of format '#ccc' or '#cccccc'; \
                 an rgb/rgba string of format 'r,g,b' or 'r,g,b,a'; \
                 an rgb/rgba string formatted for CSS (e.g. 'rgb(20,40,60)'); \
                 a basic html color name (e.g. 'blue')",
                value
            ),
            key: None,
        }
    }

    pub fn parse_error(what: &str, message: &(impl Display + ?Sized)) -> Self {
        Error {
            error_type: ErrorType::ParseError,
            message: format!("Can't parse {}: {}", what, message),
            key: None,
        }
    }

    pub fn serialization_error(key: &str, message: &(impl Display + ?Sized)) -> Self {
        Error {
            error_type: ErrorType::SerializationError,
            message: format!("Can't serialize value for key '{}': {}", key, message),
            key: Some(key.to_owned()),
        }
    }

    pub fn key_write_error(key: &str, store_name: &str, message: &(impl Display + ?Sized)) -> Self {
        Error {
            error_type: ErrorType::KeyWriteError,
            message: format!("Key '{}' write error by store {}: {}", key, store_name, message),
            key: Some(key.to_owned()),
        }
    }

    pub fn general_error(message: String) -> Self {
        Error {
            error_type: ErrorType::General,
            message,
            key: None,
        }
    }

    /// Returns true if the error was caused by an unrecognized color string.
    pub fn is_invalid_color_format(&self) -> bool {
        self.error_type == ErrorType::InvalidColorFormat
    }
}
