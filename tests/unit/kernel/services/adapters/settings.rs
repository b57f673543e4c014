use super::*;
use crate::kernel::preview::DeviceFrame;
use tempfile::tempdir;

#[test]
fn settings_path_ends_with_app_file() {
    if let Some(path) = get_settings_path() {
        assert!(path.ends_with(".nexus/settings.json"));
    }
}

#[test]
fn default_settings_are_written_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join(SETTINGS_FILE);

    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path).unwrap(), Settings::default());

    std::fs::write(&path, r#"{"default_device_frame":"tablet"}"#).unwrap();
    write_default_settings(&path).unwrap();
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.default_device_frame, DeviceFrame::Tablet);
}

#[test]
fn malformed_settings_report_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, "{ not json").unwrap();

    match load_settings_from(&path) {
        Err(SettingsError::Parse { path: p, .. }) => assert_eq!(p, path),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_settings_report_io_error() {
    let dir = tempdir().unwrap();
    let err = load_settings_from(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}
