//! Cookie storage: the document cookie capability, an in-memory cookie jar
//! and the [Cookies] sub-facade used when no key-value storage is available.

use chrono::{DateTime, TimeDelta, Utc};
use itertools::Itertools;
use tinct_core::error::Error;

use crate::clock::Clock;
use crate::config::StorageConfig;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// Fri, 31 Dec 9999 23:59:59 GMT
const LATEST_EXPIRY_SECS: i64 = 253_402_300_799;

/// Escape the characters the cookie grammar cannot carry in a value.
fn encode_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            ';' => encoded.push_str("%3B"),
            _ => encoded.push(c),
        }
    }
    encoded
}

/// Reverse of [encode_value]. Other `%` sequences are kept as they are.
fn decode_value(value: &str) -> String {
    let mut decoded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(i) = rest.find('%') {
        decoded.push_str(&rest[..i]);
        let tail = &rest[i..];
        if let Some(after) = tail.strip_prefix("%25") {
            decoded.push('%');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("%3B").or_else(|| tail.strip_prefix("%3b")) {
            decoded.push(';');
            rest = after;
        } else {
            decoded.push('%');
            rest = &tail[1..];
        }
    }
    decoded.push_str(rest);
    decoded
}

/// Document level cookie access.
///
/// Reading gives all visible cookies as one `a=1; b=2` string; writing takes a single
/// assignment such as `a=1; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/`.
pub trait CookieSource {
    fn cookie_string(&self) -> String;

    fn set_cookie(&mut self, assignment: &str) -> Result<(), Error>;
}

#[derive(Debug, Clone, PartialEq)]
struct StoredCookie {
    name: String,
    value: String,
    path: String,
    expires: Option<DateTime<Utc>>,
}

/// In-memory cookie jar honouring `expires`, `max-age` and `path` attributes.
pub struct CookieJar {
    cookies: Vec<StoredCookie>,
    clock: Box<dyn Clock>,
}

impl CookieJar {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        CookieJar {
            cookies: Vec::new(),
            clock,
        }
    }

    fn is_live(&self, cookie: &StoredCookie, now: DateTime<Utc>) -> bool {
        cookie.expires.map_or(true, |expires| expires > now)
    }
}

impl CookieSource for CookieJar {
    fn cookie_string(&self) -> String {
        let now = self.clock.now();
        self.cookies
            .iter()
            .filter(|c| self.is_live(c, now))
            .map(|c| format!("{}={}", c.name, c.value))
            .join("; ")
    }

    fn set_cookie(&mut self, assignment: &str) -> Result<(), Error> {
        let now = self.clock.now();
        let mut parts = assignment.split(';');
        let pair = parts.next().unwrap_or_default();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::parse_error("cookie", &format!("missing '=' in '{}'", pair)))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::parse_error("cookie", &format!("empty name in '{}'", pair)));
        }

        let mut cookie = StoredCookie {
            name: name.to_owned(),
            value: value.to_owned(),
            path: "/".to_owned(),
            expires: None,
        };
        let mut max_age = None;
        for attribute in parts {
            let (key, val) = attribute.split_once('=').unwrap_or((attribute, ""));
            match key.trim().to_ascii_lowercase().as_str() {
                "expires" => {
                    // unparsable dates are ignored, as browsers do
                    if let Ok(date) = DateTime::parse_from_rfc2822(val.trim()) {
                        cookie.expires = Some(date.with_timezone(&Utc));
                    }
                }
                "max-age" => {
                    if let Ok(seconds) = val.trim().parse::<i64>() {
                        max_age = Some(seconds);
                    }
                }
                "path" => cookie.path = val.trim().to_owned(),
                _ => {}
            }
        }
        if let Some(seconds) = max_age {
            cookie.expires = Some(
                TimeDelta::try_seconds(seconds)
                    .and_then(|d| now.checked_add_signed(d))
                    .unwrap_or(if seconds > 0 {
                        DateTime::<Utc>::MAX_UTC
                    } else {
                        DateTime::<Utc>::MIN_UTC
                    }),
            );
        }

        self.cookies
            .retain(|c| !(c.name == cookie.name && c.path == cookie.path));
        if self.is_live(&cookie, now) {
            self.cookies.push(cookie);
        }
        Ok(())
    }
}

/// Cookie sub-facade: create, read and destroy named cookies.
pub struct Cookies {
    source: Box<dyn CookieSource>,
    clock: Box<dyn Clock>,
    path: String,
    check_name: String,
    check_days: i64,
}

impl Cookies {
    pub fn new(source: Box<dyn CookieSource>, clock: Box<dyn Clock>) -> Self {
        Self::with_config(&StorageConfig::default(), source, clock)
    }

    pub fn with_config(
        config: &StorageConfig,
        source: Box<dyn CookieSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Cookies {
            source,
            clock,
            path: config.cookie_path.clone(),
            check_name: config.cookie_check_name.clone(),
            check_days: config.cookie_check_days,
        }
    }

    /// Set a cookie. With `days` the cookie expires `days` days from now
    /// (a negative count expires it immediately); without, or with zero days,
    /// it is a session cookie.
    pub fn create(&mut self, name: &str, value: &str, days: Option<i64>) -> Result<(), Error> {
        let expires = match days.filter(|d| *d != 0) {
            Some(days) => format!("; expires={}", self.expiry(name, days)?.format(COOKIE_DATE_FORMAT)),
            None => String::new(),
        };
        let assignment = format!("{}={}{}; path={}", name, encode_value(value), expires, self.path);
        tracing::debug!("set cookie '{}'", assignment);
        self.source.set_cookie(&assignment)
    }

    /// Expiry date `days` days from now. Negative counts give the epoch;
    /// dates beyond year 9999 are capped so they stay readable in the GMT form.
    fn expiry(&self, name: &str, days: i64) -> Result<DateTime<Utc>, Error> {
        if days < 0 {
            return Ok(DateTime::<Utc>::UNIX_EPOCH);
        }
        let latest = DateTime::from_timestamp(LATEST_EXPIRY_SECS, 0).ok_or_else(|| {
            Error::key_write_error(name, "cookie jar", "latest expiry date out of range")
        })?;
        Ok(TimeDelta::try_milliseconds(days.saturating_mul(MILLIS_PER_DAY))
            .and_then(|d| self.clock.now().checked_add_signed(d))
            .map_or(latest, |expiry| expiry.min(latest)))
    }

    /// Value of the first cookie called `name`, if any.
    pub fn read(&self, name: &str) -> Option<String> {
        let prefix = format!("{}=", name);
        self.source
            .cookie_string()
            .split(';')
            .map(|entry| entry.trim_start_matches(' '))
            .find_map(|entry| entry.strip_prefix(&prefix).map(decode_value))
    }

    /// Expire a cookie immediately.
    pub fn destroy(&mut self, name: &str) -> Result<(), Error> {
        self.create(name, "", Some(-1))
    }

    /// Check that cookies can be set and read back.
    pub fn check_support(&mut self) -> Result<bool, Error> {
        let name = self.check_name.clone();
        self.create(&name, "test", Some(self.check_days))?;
        if self.read(&name).is_some() {
            self.destroy(&name)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
