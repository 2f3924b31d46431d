//!
//! # Tinct Store
//!
//! Key-value persistence that picks its backend by what the platform offers:
//! a persistent store, a session store, or cookies as a fallback.
//! Platform capabilities are injected as [KeyValueStore](crate::store::KeyValueStore),
//! [CookieSource](crate::cookie::CookieSource) and [Clock](crate::clock::Clock) implementations,
//! so the facade runs the same against a browser binding or the in-memory implementations here.
//!
//! ```
//! use tinct_store::{Retention, Storage};
//!
//! let mut storage = Storage::in_memory();
//! storage.save("record", &serde_json::json!({"name": "First Last", "id": 22}), Retention::Days(10)).unwrap();
//! assert_eq!(storage.read("record").unwrap().unwrap()["id"], 22);
//! storage.destroy("record").unwrap();
//! assert!(storage.read("record").unwrap().is_none());
//! ```
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod clock;
pub mod config;
pub mod cookie;
pub mod facade;
pub mod store;

// Re-export commonly used items
pub use config::StorageConfig;
pub use cookie::{CookieJar, CookieSource, Cookies};
pub use facade::{Backend, Retention, Storage};
pub use store::{KeyValueStore, MemoryStore, NoStore};
