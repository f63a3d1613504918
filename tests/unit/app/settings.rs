use super::*;

fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn missing_file_yields_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_settings(&dir.path().join("absent.json")).is_none());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, r#"{ "target_fps": 30, "quit_keys": ["x"] }"#);

    let config = load_settings(&path).unwrap();
    assert_eq!(config.target_fps, 30);
    assert_eq!(config.quit_keys, vec!['x']);
    assert_eq!(config.input_poll_ms, DashboardConfig::default().input_poll_ms);
    assert!(config.alternate_screen);
}

#[test]
fn invalid_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "{ not json");
    assert!(load_settings(&path).is_none());
}

#[test]
fn explicit_path_wins_over_default_and_disable() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = write(&dir, r#"{ "target_fps": 15 }"#);
    let other = dir.path().join("other.json");
    std::fs::write(&other, r#"{ "target_fps": 60 }"#).unwrap();

    let config = resolve_config_with(Some(&explicit), true, Some(&other));
    assert_eq!(config.target_fps, 15);
}

#[test]
fn disabled_settings_skip_the_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, r#"{ "target_fps": 60 }"#);

    assert_eq!(resolve_config_with(None, true, Some(&path)).target_fps, 120);
    assert_eq!(resolve_config_with(None, false, Some(&path)).target_fps, 60);
}

#[test]
fn no_default_path_means_defaults() {
    let config = resolve_config_with(None, false, None);
    assert_eq!(config.farewell, "Done!");
}
