use chrono::{TimeZone, Utc};
use serde_json::json;

use tinct_core::color::Color;
use tinct_core::error::Error;
use tinct_store::clock::FixedClock;
use tinct_store::{Backend, CookieJar, Cookies, MemoryStore, NoStore, Retention, Storage, StorageConfig};

// ============================================================================
// Helpers
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 6, 15, 8, 30, 0).unwrap())
}

fn cookies(config: &StorageConfig) -> Cookies {
    Cookies::with_config(config, Box::new(CookieJar::new(Box::new(clock()))), Box::new(clock()))
}

fn with_storage() -> Storage {
    Storage::with_config(
        &StorageConfig::default(),
        Box::new(MemoryStore::new("local")),
        Box::new(MemoryStore::new("session")),
        Box::new(CookieJar::new(Box::new(clock()))),
        Box::new(clock()),
    )
}

fn with_cookies_only() -> Storage {
    Storage::with_config(
        &StorageConfig::default(),
        Box::new(NoStore),
        Box::new(NoStore),
        Box::new(CookieJar::new(Box::new(clock()))),
        Box::new(clock()),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn save_then_read_on_every_backend() -> Result<(), Error> {
    init_tracing();

    for mut storage in [with_storage(), with_cookies_only()] {
        for retention in [Retention::Persistent, Retention::Session, Retention::Days(7)] {
            storage.save("k", &json!({"a": 1}), retention)?;
            assert_eq!(storage.read("k")?, Some(json!({"a": 1})));

            storage.destroy("k")?;
            assert_eq!(storage.read("k")?, None);
        }
    }
    Ok(())
}

#[test]
fn records_land_where_retention_says() -> Result<(), Error> {
    let mut storage = with_storage();
    storage.save("remember", &true, Retention::Days(30))?;
    storage.save("tab", &false, Retention::Session)?;
    assert_eq!(storage.backend_for("remember")?, Some(Backend::Persistent));
    assert_eq!(storage.backend_for("tab")?, Some(Backend::Session));

    let mut storage = with_cookies_only();
    storage.save("remember", &true, Retention::Days(30))?;
    assert_eq!(storage.backend_for("remember")?, Some(Backend::Cookie));
    Ok(())
}

#[test]
fn destroy_of_missing_key_is_quiet() -> Result<(), Error> {
    let mut storage = with_storage();
    storage.destroy("nothing")?;
    let mut storage = with_cookies_only();
    storage.destroy("nothing")?;
    assert_eq!(storage.read("nothing")?, None);
    Ok(())
}

#[test]
fn cookie_records_survive_awkward_values() -> Result<(), Error> {
    let mut storage = with_cookies_only();
    let record = json!({"note": "a; b", "path": "x=1;y=%3B", "list": [1, 2]});
    storage.save("k", &record, Retention::Days(2))?;
    assert_eq!(storage.read("k")?, Some(record));

    storage.save("k", &1, Retention::Days(-1_000_000))?;
    assert_eq!(storage.read("k")?, None);
    Ok(())
}

#[test]
fn cookie_destroy_invalidates_reads() -> Result<(), Error> {
    let mut cookies = cookies(&StorageConfig::default());
    cookies.create("n", "v", None)?;
    assert_eq!(cookies.read("n").as_deref(), Some("v"));
    cookies.create("n", "v", Some(-1))?;
    assert_eq!(cookies.read("n"), None);
    Ok(())
}

#[test]
fn configured_cookie_path_is_used() -> Result<(), Error> {
    let config = StorageConfig::from_yaml("cookie_path: /app\n")?;
    let mut cookies = cookies(&config);
    cookies.create("n", "v", Some(1))?;
    assert_eq!(cookies.read("n").as_deref(), Some("v"));
    cookies.destroy("n")?;
    assert_eq!(cookies.read("n"), None);
    assert!(cookies.check_support()?);
    Ok(())
}

#[test]
fn parsed_colors_can_be_stored() -> Result<(), Error> {
    let color = Color::parse("rgba(18,52,86,0.5)")?;
    let mut storage = with_storage();
    storage.save("brand", &color, true)?;

    let record = storage.read("brand")?.expect("record saved");
    assert_eq!(record["hex"], json!("#123456"));
    assert_eq!(record["alpha"], json!(0.5));

    let hex = record["hex"].as_str().unwrap_or_default();
    assert_eq!(Color::parse(hex)?.rgb(), color.rgb());
    Ok(())
}
