use std::collections::HashMap;

use tinct_core::error::Error;

/// Platform key-value storage (persistent or session scoped).
///
/// Keys and values are plain strings; serialization is the business of the caller.
pub trait KeyValueStore {
    /// Get store name
    fn store_name(&self) -> String {
        "Store".to_owned()
    }

    /// Get the value stored under a key, `None` when the key is not present.
    fn get_item(&self, _key: &str) -> Result<Option<String>, Error> {
        Ok(None)
    }

    /// Store a value under a key, replacing any previous value.
    fn set_item(&mut self, key: &str, _value: &str) -> Result<(), Error> {
        Err(Error::key_write_error(key, &self.store_name(), "storage not available"))
    }

    /// Remove a key. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), Error> {
        Err(Error::key_write_error(key, &self.store_name(), "storage not available"))
    }

    /// Returns true if store contains the key.
    fn contains(&self, key: &str) -> Result<bool, Error> {
        Ok(self.get_item(key)?.is_some())
    }
}

/// Trivial store unable to store anything.
/// Stands for a platform without storage, or with storage disabled by the user.
pub struct NoStore;

impl KeyValueStore for NoStore {
    fn store_name(&self) -> String {
        "No store".to_owned()
    }
}

pub struct MemoryStore {
    data: HashMap<String, String>,
    name: String,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new(name: &str) -> MemoryStore {
        MemoryStore {
            data: HashMap::new(),
            name: name.to_owned(),
            quota: None,
        }
    }

    /// Limit the total size (keys and values, in bytes) the store accepts.
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    fn used_bytes(&self) -> usize {
        self.data.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn store_name(&self) -> String {
        format!("{} memory store", self.name)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.data.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if let Some(quota) = self.quota {
            let replaced = self.data.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            if self.used_bytes() - replaced + key.len() + value.len() > quota {
                return Err(Error::key_write_error(
                    key,
                    &self.store_name(),
                    &format!("quota of {} bytes exceeded", quota),
                ));
            }
        }
        self.data.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Error> {
        self.data.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, Error> {
        Ok(self.data.contains_key(key))
    }
}

// Unittests
#[cfg(test)]
mod tests {
    use super::*;
    use tinct_core::error::ErrorType;

    #[test]
    fn test_simple_store() -> Result<(), Error> {
        let mut store = MemoryStore::new("local");
        assert!(!store.contains("a")?);

        store.set_item("a", "1")?;
        store.set_item("b", "2")?;
        assert!(store.contains("a")?);
        assert_eq!(store.get_item("a")?.as_deref(), Some("1"));
        assert_eq!(store.get_item("b")?.as_deref(), Some("2"));

        store.set_item("a", "3")?;
        assert_eq!(store.get_item("a")?.as_deref(), Some("3"));

        store.remove_item("a")?;
        store.remove_item("a")?;
        assert!(!store.contains("a")?);
        assert_eq!(store.get_item("a")?, None);
        Ok(())
    }

    #[test]
    fn test_quota() -> Result<(), Error> {
        let mut store = MemoryStore::new("local").with_quota(8);
        store.set_item("k", "1234567")?;
        let e = store.set_item("x", "y").unwrap_err();
        assert_eq!(e.error_type, ErrorType::KeyWriteError);
        // replacing a value only counts the new size
        store.set_item("k", "abcdefg")?;
        assert_eq!(store.get_item("k")?.as_deref(), Some("abcdefg"));
        Ok(())
    }

    #[test]
    fn test_no_store() -> Result<(), Error> {
        let mut store = NoStore;
        assert!(store.set_item("a", "1").is_err());
        assert!(store.remove_item("a").is_err());
        assert_eq!(store.get_item("a")?, None);
        assert!(!store.contains("a")?);
        Ok(())
    }
}
