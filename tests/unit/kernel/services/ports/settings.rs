use super::*;

#[test]
fn missing_fields_fall_back_to_defaults() {
    let settings: Settings = serde_json::from_str("{}").expect("deserialize empty settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    assert!(settings.data_dir.is_none());
}

#[test]
fn partial_settings_keep_given_fields() {
    let settings: Settings = serde_json::from_str(
        r#"{"data_dir":"/tmp/nexus-projects","default_device_frame":"mobile"}"#,
    )
    .expect("deserialize settings");
    assert_eq!(
        settings.data_dir.as_deref(),
        Some(std::path::Path::new("/tmp/nexus-projects"))
    );
    assert_eq!(settings.default_device_frame, DeviceFrame::Mobile);
    assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
}
