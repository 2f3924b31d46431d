//! The storage facade.
//!
//! [Storage] saves, reads and destroys JSON serializable records. Records go to the
//! persistent or the session store when the platform supports key-value storage,
//! and to cookies otherwise. Support is checked once, when the facade is built.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tinct_core::error::Error;

use crate::clock::{Clock, SystemClock};
use crate::config::StorageConfig;
use crate::cookie::{CookieJar, CookieSource, Cookies};
use crate::store::{KeyValueStore, MemoryStore};

/// How long a saved record should live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Session store, or a session cookie.
    Session,
    /// Persistent store, or a cookie living one day.
    Persistent,
    /// Persistent store, or a cookie living the given number of days.
    /// Zero days behaves like [Retention::Session].
    Days(i64),
}

impl Retention {
    /// True when the record belongs to the persistent store.
    pub fn is_persistent(&self) -> bool {
        match self {
            Retention::Session => false,
            Retention::Persistent => true,
            Retention::Days(days) => *days != 0,
        }
    }

    /// Cookie lifetime in days, `None` for a session cookie.
    pub fn cookie_days(&self) -> Option<i64> {
        match self {
            Retention::Session | Retention::Days(0) => None,
            Retention::Persistent => Some(1),
            Retention::Days(days) => Some(*days),
        }
    }
}

impl From<bool> for Retention {
    fn from(persistent: bool) -> Self {
        if persistent {
            Retention::Persistent
        } else {
            Retention::Session
        }
    }
}

impl From<i64> for Retention {
    fn from(days: i64) -> Self {
        Retention::Days(days)
    }
}

/// Where a record currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Persistent,
    Session,
    Cookie,
}

pub struct Storage {
    persistent: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
    cookies: Cookies,
    supported: bool,
}

impl Storage {
    pub fn new(
        persistent: Box<dyn KeyValueStore>,
        session: Box<dyn KeyValueStore>,
        cookie_source: Box<dyn CookieSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self::with_config(&StorageConfig::default(), persistent, session, cookie_source, clock)
    }

    /// Build the facade and check the persistent store.
    /// The same configuration drives the support check and the cookie fallback.
    pub fn with_config(
        config: &StorageConfig,
        mut persistent: Box<dyn KeyValueStore>,
        session: Box<dyn KeyValueStore>,
        cookie_source: Box<dyn CookieSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let supported = match check_store(persistent.as_mut(), config) {
            Ok(supported) => supported,
            Err(e) => {
                tracing::debug!("{} support check failed: {}", persistent.store_name(), e);
                false
            }
        };
        tracing::info!(
            "key-value storage {}",
            if supported { "supported" } else { "not supported, falling back to cookies" }
        );
        Storage {
            persistent,
            session,
            cookies: Cookies::with_config(config, cookie_source, clock),
            supported,
        }
    }

    /// Facade over fresh in-memory stores and cookie jar.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryStore::new("persistent")),
            Box::new(MemoryStore::new("session")),
            Box::new(CookieJar::new(Box::new(SystemClock))),
            Box::new(SystemClock),
        )
    }

    /// Cached verdict of the support check.
    pub fn check_support(&self) -> bool {
        self.supported
    }

    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    pub fn persistent_store(&self) -> &dyn KeyValueStore {
        self.persistent.as_ref()
    }

    /// Save a record. A value serializing to a JSON string is stored as the bare string,
    /// anything else as JSON text.
    pub fn save<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
        retention: impl Into<Retention>,
    ) -> Result<(), Error> {
        let retention = retention.into();
        let text = match serde_json::to_value(value).map_err(|e| Error::serialization_error(key, &e))? {
            Value::String(s) => s,
            other => other.to_string(),
        };

        if self.supported {
            let store = if retention.is_persistent() {
                &mut self.persistent
            } else {
                &mut self.session
            };
            tracing::debug!("save '{}' to {}", key, store.store_name());
            store.set_item(key, &text)
        } else {
            tracing::debug!("save '{}' to cookie", key);
            self.cookies.create(key, &text, retention.cookie_days())
        }
    }

    /// Read a record as JSON, `None` when no store holds the key.
    /// Text that is not valid JSON is returned as a JSON string.
    pub fn read(&self, key: &str) -> Result<Option<Value>, Error> {
        let text = if self.supported {
            match self.persistent.get_item(key)? {
                Some(text) => Some(text),
                None => self.session.get_item(key)?,
            }
        } else {
            self.cookies.read(key)
        };
        Ok(text.map(|text| match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("record '{}' is not JSON ({}), read as a string", key, e);
                Value::String(text)
            }
        }))
    }

    /// Read a record and deserialize it into `T`.
    pub fn read_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.read(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| Error::parse_error(&format!("record '{}'", key), &e).with_key(key)),
            None => Ok(None),
        }
    }

    /// Remove a record from the store holding it.
    pub fn destroy(&mut self, key: &str) -> Result<(), Error> {
        if self.supported {
            if self.persistent.contains(key)? {
                tracing::debug!("destroy '{}' in {}", key, self.persistent.store_name());
                self.persistent.remove_item(key)
            } else if self.session.contains(key)? {
                tracing::debug!("destroy '{}' in {}", key, self.session.store_name());
                self.session.remove_item(key)
            } else {
                Ok(())
            }
        } else {
            tracing::debug!("destroy cookie '{}'", key);
            self.cookies.destroy(key)
        }
    }

    /// Which backend currently holds a key, in read order.
    pub fn backend_for(&self, key: &str) -> Result<Option<Backend>, Error> {
        if self.supported {
            if self.persistent.contains(key)? {
                Ok(Some(Backend::Persistent))
            } else if self.session.contains(key)? {
                Ok(Some(Backend::Session))
            } else {
                Ok(None)
            }
        } else {
            Ok(self.cookies.read(key).map(|_| Backend::Cookie))
        }
    }
}

/// Write, read back and remove a test entry.
fn check_store(store: &mut dyn KeyValueStore, config: &StorageConfig) -> Result<bool, Error> {
    store.set_item(&config.check_key, &config.check_value)?;
    let found = store.get_item(&config.check_key)?;
    store.remove_item(&config.check_key)?;
    Ok(found.as_deref() == Some(config.check_value.as_str()))
}
