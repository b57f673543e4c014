use super::*;
use crate::kernel::action::{
    ConversationAction, PreviewAction, ProjectAction, UserAction, WorkspaceAction,
};
use crate::kernel::conversation::{AgentPhase, MessageDraft, Role, StreamOutcome};
use crate::kernel::preview::DeviceFrame;
use crate::kernel::problems::{BuildErrorDraft, BuildSeverity};
use crate::kernel::projects::{NewProject, ProjectPatch, ProjectStatus};
use crate::kernel::services::adapters::{ManualClock, SequentialIdGenerator};
use crate::kernel::terminal::TerminalStream;
use crate::kernel::user::{Preferences, SubscriptionTier, User};
use crate::models::{FileMap, FileRecord, Language, NodeKind, MAX_PATH_DEPTH};
use chrono::{Duration, TimeZone};
use std::cell::Cell;
use std::rc::Rc;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap()
}

fn mk_store() -> (Store, ManualClock) {
    let clock = ManualClock::new(start());
    let store = Store::with_services(
        AppState::new(),
        Box::new(clock.clone()),
        Box::new(SequentialIdGenerator::new("id")),
    );
    (store, clock)
}

fn add_file(store: &mut Store, path: &str, content: &str) -> DispatchResult {
    store.dispatch(WorkspaceAction::AddFile(FileRecord::detect(path, content)).into())
}

fn create_project(store: &mut Store, name: &str) -> String {
    let result = store.dispatch(
        ProjectAction::Create(NewProject {
            user_id: "user-1".to_string(),
            name: name.to_string(),
            ..NewProject::default()
        })
        .into(),
    );
    match result.effects.as_slice() {
        [Effect::PersistProject(project)] => project.id.clone(),
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn sibling_files_share_one_directory_in_insertion_order() {
    let (mut store, _) = mk_store();
    add_file(&mut store, "src/App.tsx", "app");
    add_file(&mut store, "src/index.css", "body {}");

    let tree = store.state().workspace.tree_nodes();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].name, "src");
    assert_eq!(tree[0].kind, NodeKind::Directory);
    let names: Vec<_> = tree[0].children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["App.tsx", "index.css"]);
}

#[test]
fn add_file_twice_is_idempotent() {
    let (mut store, _) = mk_store();
    assert!(add_file(&mut store, "src/main.ts", "x").state_changed);
    let before = store.state().workspace.tree_nodes();

    assert!(!add_file(&mut store, "src/main.ts", "x").state_changed);
    assert_eq!(store.state().workspace.files().len(), 1);
    assert_eq!(store.state().workspace.tree_nodes(), before);
}

#[test]
fn add_file_replaces_in_place() {
    let (mut store, _) = mk_store();
    add_file(&mut store, "a.ts", "1");
    add_file(&mut store, "b.ts", "2");
    add_file(&mut store, "a.ts", "3");

    let files: Vec<_> = store
        .state()
        .workspace
        .files()
        .iter()
        .map(|r| (r.path.as_str(), r.content.as_str()))
        .collect();
    assert_eq!(files, vec![("a.ts", "3"), ("b.ts", "2")]);
    assert_eq!(
        store.state().workspace.file("a.ts").map(|r| &r.language),
        Some(&Language::TypeScript)
    );
}

#[test]
fn empty_path_is_rejected() {
    let (mut store, _) = mk_store();
    assert!(!add_file(&mut store, "", "x").state_changed);
    assert!(store.state().workspace.files().is_empty());
}

#[test]
fn over_deep_path_is_rejected() {
    let (mut store, _) = mk_store();
    let deep = format!("{}f.ts", "d/".repeat(3000));
    assert!(!add_file(&mut store, &deep, "x").state_changed);
    assert!(store.state().workspace.files().is_empty());

    let deepest = format!("{}f.ts", "d/".repeat(MAX_PATH_DEPTH - 1));
    assert!(add_file(&mut store, &deepest, "x").state_changed);
    let nodes = store.state().workspace.tree_nodes();
    assert_eq!(nodes[0].walk().len(), MAX_PATH_DEPTH);
}

#[test]
fn update_file_on_missing_path_is_noop() {
    let (mut store, _) = mk_store();
    let result = store.dispatch(
        WorkspaceAction::UpdateFile {
            path: "nope.ts".to_string(),
            content: "x".to_string(),
        }
        .into(),
    );
    assert!(!result.state_changed);
    assert!(store.state().workspace.files().is_empty());
}

#[test]
fn deleting_active_file_clears_selection() {
    let (mut store, _) = mk_store();
    add_file(&mut store, "a.ts", "x");
    store.dispatch(WorkspaceAction::SetActiveFile(Some("a.ts".to_string())).into());
    assert_eq!(store.state().workspace.active_file(), Some("a.ts"));

    store.dispatch(WorkspaceAction::DeleteFile("a.ts".to_string()).into());
    assert_eq!(store.state().workspace.active_file(), None);
    assert!(store.state().workspace.tree_nodes().is_empty());
}

#[test]
fn terminal_and_build_entries_get_ids_and_timestamps() {
    let (mut store, clock) = mk_store();
    store.dispatch(
        WorkspaceAction::AddTerminalOutput {
            kind: TerminalStream::Command,
            text: "npm install".to_string(),
        }
        .into(),
    );
    clock.advance(Duration::seconds(1));
    store.dispatch(
        WorkspaceAction::AddTerminalOutput {
            kind: TerminalStream::Stdout,
            text: "added 1 package".to_string(),
        }
        .into(),
    );
    let draft = BuildErrorDraft {
        file: "src/App.tsx".to_string(),
        line: 1,
        column: 2,
        message: "boom".to_string(),
        severity: BuildSeverity::Error,
    };
    store.dispatch(WorkspaceAction::AddBuildError(draft.clone()).into());
    store.dispatch(WorkspaceAction::AddBuildError(draft).into());

    let entries = store.state().workspace.terminal().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "id-1");
    assert_eq!(entries[0].display_line(), "$ npm install");
    assert_eq!(entries[1].created_at, start() + Duration::seconds(1));

    let errors = store.state().workspace.build().errors();
    assert_eq!(errors.len(), 2);
    assert_ne!(errors[0].id, errors[1].id);
}

#[test]
fn build_progress_is_stored_unclamped() {
    let (mut store, _) = mk_store();
    store.dispatch(WorkspaceAction::SetBuildProgress(150.0).into());
    assert_eq!(store.state().workspace.build().progress(), 150.0);
}

#[test]
fn reset_restores_every_workspace_slice() {
    let (mut store, _) = mk_store();
    add_file(&mut store, "a.ts", "x");
    store.dispatch(WorkspaceAction::SetActiveFile(Some("a.ts".to_string())).into());
    store.dispatch(WorkspaceAction::SetIsBuilding(true).into());
    store.dispatch(PreviewAction::SetUrl(Some("http://localhost:3000".to_string())).into());
    store.dispatch(PreviewAction::SetDeviceFrame(DeviceFrame::Mobile).into());

    assert!(store.dispatch(WorkspaceAction::Reset.into()).state_changed);
    let workspace = &store.state().workspace;
    assert!(workspace.files().is_empty());
    assert!(workspace.active_file().is_none());
    assert!(!workspace.build().is_building());
    assert_eq!(workspace.preview(), &Default::default());
}

#[test]
fn preview_fields_are_independent() {
    let (mut store, _) = mk_store();
    store.dispatch(PreviewAction::SetDeviceFrame(DeviceFrame::Tablet).into());
    store.dispatch(PreviewAction::ToggleFullscreen.into());
    store.dispatch(PreviewAction::SetUrl(Some("http://localhost:5173".to_string())).into());

    let preview = store.state().workspace.preview();
    assert_eq!(preview.device_frame, DeviceFrame::Tablet);
    assert!(preview.is_fullscreen);
    assert_eq!(preview.url.as_deref(), Some("http://localhost:5173"));
}

#[test]
fn streaming_updates_replace_tail_without_appending() {
    let (mut store, _) = mk_store();
    store.dispatch(ConversationAction::AddMessage(MessageDraft::user("make a blog")).into());
    store.dispatch(ConversationAction::AddMessage(MessageDraft::streaming_assistant()).into());
    for chunk in ["Sure", "Sure, here", "Sure, here is your blog."] {
        store.dispatch(ConversationAction::UpdateLastMessage(chunk.to_string()).into());
    }

    let messages = store.state().conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].content, "Sure, here is your blog.");
}

#[test]
fn update_last_message_after_clear_is_noop() {
    let (mut store, _) = mk_store();
    store.dispatch(ConversationAction::AddMessage(MessageDraft::user("hi")).into());
    store.dispatch(ConversationAction::AddTokensUsed(40).into());
    assert!(store.dispatch(ConversationAction::Clear.into()).state_changed);

    let result = store.dispatch(ConversationAction::UpdateLastMessage("late".to_string()).into());
    assert!(!result.state_changed);
    assert!(store.state().conversation.messages().is_empty());
    assert_eq!(store.state().conversation.tokens_used(), 0);
}

#[test]
fn finish_streaming_leaves_a_terminal_agent() {
    let (mut store, _) = mk_store();
    store.dispatch(ConversationAction::AddMessage(MessageDraft::streaming_assistant()).into());
    store.dispatch(ConversationAction::SetStreaming(true).into());
    store.dispatch(
        ConversationAction::FinishStreaming(StreamOutcome::Failed("rate limited".to_string()))
            .into(),
    );

    let conversation = &store.state().conversation;
    assert!(!conversation.is_streaming());
    assert!(!conversation.messages()[0].is_streaming);
    let agent = conversation.current_agent().unwrap();
    assert_eq!(agent.status, AgentPhase::Error);
    assert!(agent.status.is_terminal());
    assert_eq!(conversation.error(), Some("rate limited"));
}

#[test]
fn update_project_syncs_active_copy_with_later_timestamp() {
    let (mut store, clock) = mk_store();
    let id = create_project(&mut store, "Shop");
    let project = store.state().projects.get(&id).cloned().unwrap();
    store.dispatch(ProjectAction::SetActive(Some(project.clone())).into());

    let result = store.dispatch(
        ProjectAction::Update {
            id: id.clone(),
            patch: ProjectPatch::status(ProjectStatus::Deployed),
        }
        .into(),
    );
    assert!(result.state_changed);
    assert!(matches!(result.effects.as_slice(), [Effect::PersistProject(p)] if p.status == ProjectStatus::Deployed));

    let listed = store.state().projects.get(&id).unwrap();
    let active = store.state().projects.active_project().unwrap();
    assert_eq!(listed.status, ProjectStatus::Deployed);
    assert_eq!(active.status, ProjectStatus::Deployed);
    assert!(listed.updated_at > project.updated_at);
    assert!(active.updated_at > project.updated_at);

    // A clock that moved forward is used as-is.
    clock.advance(Duration::minutes(5));
    store.dispatch(
        ProjectAction::Update {
            id: id.clone(),
            patch: ProjectPatch::default().with_name("Shop v2"),
        }
        .into(),
    );
    assert_eq!(
        store.state().projects.active_project().unwrap().updated_at,
        start() + Duration::minutes(5)
    );
}

#[test]
fn created_projects_are_prepended() {
    let (mut store, _) = mk_store();
    let first = create_project(&mut store, "First");
    let second = create_project(&mut store, "Second");

    let ids: Vec<_> = store
        .state()
        .projects
        .projects()
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[test]
fn delete_project_clears_active_and_requests_removal() {
    let (mut store, _) = mk_store();
    let id = create_project(&mut store, "Shop");
    store.dispatch(ProjectAction::Open(id.clone()).into());
    assert!(store.state().projects.active_project().is_some());

    let result = store.dispatch(ProjectAction::Delete(id.clone()).into());
    assert!(result.state_changed);
    assert_eq!(result.effects, vec![Effect::RemoveProject { id }]);
    assert!(store.state().projects.active_project().is_none());
}

#[test]
fn request_projects_sets_loading_and_emits_load() {
    let (mut store, _) = mk_store();
    let result = store.dispatch(
        ProjectAction::Request {
            user_id: "user-1".to_string(),
        }
        .into(),
    );
    assert!(store.state().projects.is_loading());
    assert_eq!(
        result.effects,
        vec![Effect::LoadProjects {
            user_id: "user-1".to_string()
        }]
    );
}

#[test]
fn open_and_snapshot_round_trip_files_through_the_workspace() {
    let (mut store, _) = mk_store();
    let mut files = FileMap::default();
    files.insert("index.html".to_string(), "<html></html>".to_string());
    files.insert("src/main.js".to_string(), "main()".to_string());
    let result = store.dispatch(
        ProjectAction::Create(NewProject {
            user_id: "user-1".to_string(),
            name: "Site".to_string(),
            files,
            ..NewProject::default()
        })
        .into(),
    );
    let id = match result.effects.as_slice() {
        [Effect::PersistProject(project)] => project.id.clone(),
        other => panic!("unexpected effects: {other:?}"),
    };

    store.dispatch(WorkspaceAction::SetActiveFile(Some("stale.ts".to_string())).into());
    store.dispatch(ProjectAction::Open(id.clone()).into());
    let workspace = &store.state().workspace;
    assert_eq!(workspace.files().len(), 2);
    assert!(workspace.active_file().is_none());
    assert_eq!(
        workspace.file("src/main.js").map(|r| &r.language),
        Some(&Language::JavaScript)
    );

    add_file(&mut store, "src/util.js", "util()");
    let result = store.dispatch(ProjectAction::SnapshotWorkspace.into());
    match result.effects.as_slice() {
        [Effect::PersistProject(project)] => {
            assert_eq!(project.id, id);
            assert_eq!(project.files.len(), 3);
            assert_eq!(project.files.get("src/util.js"), Some("util()"));
        }
        other => panic!("unexpected effects: {other:?}"),
    }
    let active = store.state().projects.active_project().unwrap();
    assert_eq!(active.files.len(), 3);
}

#[test]
fn open_unknown_project_and_snapshot_without_active_are_noops() {
    let (mut store, _) = mk_store();
    let result = store.dispatch(ProjectAction::Open("missing".to_string()).into());
    assert!(!result.state_changed);
    let result = store.dispatch(ProjectAction::SnapshotWorkspace.into());
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn deduct_credits_through_the_store() {
    let (mut store, _) = mk_store();
    store.dispatch(
        UserAction::SetUser(User {
            id: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            credits: 10,
            subscription_tier: SubscriptionTier::Pro,
            avatar: None,
            created_at: start(),
            preferences: Preferences::default(),
        })
        .into(),
    );
    store.dispatch(UserAction::DeductCredits(25).into());
    assert_eq!(store.state().user.credits(), 0);
    assert!(!store.dispatch(UserAction::DeductCredits(1).into()).state_changed);
}

#[test]
fn subscribers_run_only_on_state_change() {
    let (mut store, _) = mk_store();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let id = store.subscribe(move |_| seen.set(seen.get() + 1));

    add_file(&mut store, "a.ts", "x");
    add_file(&mut store, "a.ts", "x");
    assert_eq!(calls.get(), 1);

    assert!(store.unsubscribe(id));
    add_file(&mut store, "b.ts", "y");
    assert_eq!(calls.get(), 1);
    assert!(!store.unsubscribe(id));
}

#[test]
fn dispatch_all_merges_results() {
    let (mut store, _) = mk_store();
    let result = store.dispatch_all([
        WorkspaceAction::SetIsBuilding(true).into(),
        ProjectAction::Request {
            user_id: "user-1".to_string(),
        }
        .into(),
    ]);
    assert!(result.state_changed);
    assert_eq!(result.effects.len(), 1);
}

#[test]
fn create_with_given_id_does_not_draw_from_generator() {
    let (mut store, _) = mk_store();
    store.dispatch(
        ProjectAction::Create(NewProject {
            id: Some("imported".to_string()),
            user_id: "user-1".to_string(),
            name: "Imported".to_string(),
            ..NewProject::default()
        })
        .into(),
    );
    let generated = create_project(&mut store, "Fresh");

    assert_eq!(generated, "id-1");
    let ids: Vec<&str> = store
        .state()
        .projects
        .projects()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["id-1", "imported"]);
}
