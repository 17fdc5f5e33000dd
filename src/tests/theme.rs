use super::{Theme, ThemeSwitcher, THEME_KEY};
use crate::error::{Error, Result};
use crate::prefs::{JsonFileStore, MemoryStore, PreferenceStore};
use tempfile::TempDir;

struct ReadOnlyStore;

impl PreferenceStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Option<String> {
        Some("dark".to_string())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Io(std::io::Error::other("read-only")))
    }
}

fn stored(value: &str) -> Box<MemoryStore> {
    let mut store = MemoryStore::default();
    store.set(THEME_KEY, value).unwrap();
    Box::new(store)
}

#[test]
fn test_defaults_to_light() {
    let switcher = ThemeSwitcher::load(Box::new(MemoryStore::default()));
    assert_eq!(switcher.current(), Theme::Light);
}

#[test]
fn test_unrecognised_value_means_light() {
    let switcher = ThemeSwitcher::load(stored("solarized"));
    assert_eq!(switcher.current(), Theme::Light);
}

#[test]
fn test_stored_dark_is_applied() {
    let switcher = ThemeSwitcher::load(stored("dark"));
    assert_eq!(switcher.current(), Theme::Dark);
}

#[test]
fn test_toggle_persists() {
    let mut switcher = ThemeSwitcher::load(Box::new(MemoryStore::default()));
    assert_eq!(switcher.toggle(), Theme::Dark);

    let store = switcher.into_store();
    assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

    let mut switcher = ThemeSwitcher::load(store);
    assert_eq!(switcher.current(), Theme::Dark);
    assert_eq!(switcher.toggle(), Theme::Light);
    assert_eq!(switcher.into_store().get(THEME_KEY).as_deref(), Some("light"));
}

#[test]
fn test_toggle_survives_failed_write() {
    let mut switcher = ThemeSwitcher::load(Box::new(ReadOnlyStore));
    assert_eq!(switcher.current(), Theme::Dark);
    assert_eq!(switcher.toggle(), Theme::Light);
    assert_eq!(switcher.current(), Theme::Light);
}

#[test]
fn test_persists_across_file_store_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");

    let mut first = ThemeSwitcher::load(Box::new(JsonFileStore::open(&path).unwrap()));
    first.toggle();
    drop(first);

    let second = ThemeSwitcher::load(Box::new(JsonFileStore::open(&path).unwrap()));
    assert_eq!(second.current(), Theme::Dark);
}

#[test]
fn test_icon_shows_the_other_mode() {
    assert_eq!(Theme::Light.icon(), "☾");
    assert_eq!(Theme::Dark.icon(), "☀");
    assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
    assert_eq!(Theme::Dark.to_string(), "dark");
    assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
}
