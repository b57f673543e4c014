use super::*;

#[test]
fn test_get_projects_dir() {
    let dir = get_projects_dir();
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.ends_with(PROJECTS_DIR));
}

#[test]
fn test_get_log_dir() {
    let dir = get_log_dir();
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.ends_with(LOG_DIR));
}

#[test]
fn test_projects_and_logs_share_a_parent() {
    let projects = get_projects_dir().unwrap();
    let logs = get_log_dir().unwrap();
    assert_eq!(projects.parent(), logs.parent());
}
