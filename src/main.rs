use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use nexus::app::{render_summary, replay_lines, Session};
use nexus::kernel::services::adapters::{
    ensure_projects_dir, ensure_settings_file, load_settings, JsonProjectRepository,
};
use nexus::kernel::services::ports::Settings;
use nexus::kernel::{AppState, PreviewAction, Store};

mod logging;

fn usage() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        "usage: nexus [--data-dir=<dir>] [--quiet] <script.jsonl | ->",
    )
}

fn main() -> io::Result<()> {
    let mut data_dir: Option<PathBuf> = None;
    let mut script: Option<String> = None;
    let mut quiet = false;

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--data-dir=") {
            data_dir = Some(PathBuf::from(value));
        } else if arg == "--quiet" {
            quiet = true;
        } else if script.is_none() {
            script = Some(arg);
        } else {
            return Err(usage());
        }
    }
    let script = script.ok_or_else(usage)?;

    if let Err(e) = ensure_settings_file() {
        eprintln!("warning: cannot create settings file: {e}");
    }
    let settings = load_settings().unwrap_or_else(Settings::default);
    let _logging = logging::init(&settings.log_filter);

    let data_dir = match data_dir.or(settings.data_dir) {
        Some(dir) => dir,
        None => ensure_projects_dir()?,
    };
    tracing::info!(data_dir = %data_dir.display(), script = %script, "replay starting");

    let repository = Arc::new(JsonProjectRepository::new(data_dir));
    let mut session = Session::new(Store::new(AppState::new()), repository)?;
    session.dispatch(PreviewAction::SetDeviceFrame(settings.default_device_frame));

    let report = if script == "-" {
        replay_lines(&mut session, io::stdin().lock())
    } else {
        replay_lines(&mut session, BufReader::new(File::open(&script)?))
    }
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    session.wait_idle(std::time::Duration::from_secs(5));

    tracing::info!(
        applied = report.applied,
        skipped = report.skipped.len(),
        "replay finished"
    );
    if !report.skipped.is_empty() {
        eprintln!("skipped malformed lines: {:?}", report.skipped);
    }
    if !quiet {
        print!("{}", render_summary(session.state()));
    }
    Ok(())
}
