use super::*;
use crate::kernel::projects::{ProjectStatus, TechStack};
use crate::models::FileMap;
use chrono::{TimeZone, Utc};
use tempfile::tempdir;

fn mk_project(id: &str, user_id: &str, minute: u32) -> Project {
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap();
    let mut files = FileMap::default();
    files.insert("src/App.tsx".to_string(), "export default App;".to_string());
    Project {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: format!("Project {id}"),
        description: String::new(),
        tech_stack: TechStack::default(),
        files,
        deployment_url: None,
        github_url: None,
        status: ProjectStatus::Draft,
        created_at: at,
        updated_at: at,
    }
}

#[test]
fn list_on_missing_dir_is_empty() {
    let dir = tempdir().unwrap();
    let repo = JsonProjectRepository::new(dir.path().join("does-not-exist"));
    assert!(repo.list("user-1").unwrap().is_empty());
}

#[test]
fn save_then_list_filters_by_user_newest_first() {
    let dir = tempdir().unwrap();
    let repo = JsonProjectRepository::new(dir.path());

    repo.save(&mk_project("a", "user-1", 1)).unwrap();
    repo.save(&mk_project("b", "user-1", 5)).unwrap();
    repo.save(&mk_project("c", "user-2", 9)).unwrap();

    let ids: Vec<_> = repo
        .list("user-1")
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn save_replaces_existing_project_without_leaving_tmp_files() {
    let dir = tempdir().unwrap();
    let repo = JsonProjectRepository::new(dir.path());

    let mut project = mk_project("a", "user-1", 1);
    repo.save(&project).unwrap();
    project.status = ProjectStatus::Deployed;
    repo.save(&project).unwrap();

    let listed = repo.list("user-1").unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, ProjectStatus::Deployed);
    assert_eq!(listed[0].files.get("src/App.tsx"), Some("export default App;"));

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .flatten()
        .filter(|e| e.path().extension() == Some(OsStr::new("tmp")))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn corrupt_files_are_skipped() {
    let dir = tempdir().unwrap();
    let repo = JsonProjectRepository::new(dir.path());
    repo.save(&mk_project("a", "user-1", 1)).unwrap();
    std::fs::write(dir.path().join("broken.json"), "{").unwrap();

    assert_eq!(repo.list("user-1").unwrap().len(), 1);
}

#[test]
fn remove_is_idempotent() {
    let dir = tempdir().unwrap();
    let repo = JsonProjectRepository::new(dir.path());
    repo.save(&mk_project("a", "user-1", 1)).unwrap();

    repo.remove("a").unwrap();
    repo.remove("a").unwrap();
    assert!(repo.list("user-1").unwrap().is_empty());
}

#[test]
fn path_like_ids_are_rejected() {
    let dir = tempdir().unwrap();
    let repo = JsonProjectRepository::new(dir.path());
    for id in ["", "../escape", "a/b", ".hidden"] {
        assert!(matches!(
            repo.remove(id),
            Err(RepositoryError::InvalidId(_))
        ));
    }
    let mut project = mk_project("x", "user-1", 1);
    project.id = "../x".to_string();
    assert!(matches!(repo.save(&project), Err(RepositoryError::InvalidId(_))));
}
