use super::Config;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_missing_file_gives_defaults() {
    let cfg = Config::load_from(Path::new("/nonexistent/docview.toml"));
    assert_eq!(cfg.wrap_width, 100);
    assert_eq!(cfg.debounce(), Duration::from_millis(300));
    assert_eq!(cfg.copy_feedback(), Duration::from_secs(2));
    assert_eq!(cfg.nav_offset, 5);
    assert_eq!(cfg.scroll_top_after, 10);
    assert_eq!(cfg.narrow_width, 80);
    assert!(cfg.smooth_scroll);
    assert_eq!(cfg.state_file, ".docview-state.json");
    assert_eq!(cfg.print_dir, ".");
}

#[test]
fn test_partial_file_overrides_only_given_keys() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "wrap_width = 72\nsmooth_scroll = false").unwrap();

    let cfg = Config::load_from(file.path());
    assert_eq!(cfg.wrap_width, 72);
    assert!(!cfg.smooth_scroll);
    assert_eq!(cfg.debounce_ms, 300);
}

#[test]
fn test_unparseable_file_falls_back() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "wrap_width = \"wide\"").unwrap();

    let cfg = Config::load_from(file.path());
    assert_eq!(cfg.wrap_width, 100);
}
