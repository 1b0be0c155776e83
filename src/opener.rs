use log::{debug, warn};
use std::path::Path;
use std::process::{Command, Stdio};

#[derive(Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    ExitedWithFailure(Option<i32>),
    LaunchFailed(String),
}

/// Opens `path` with the configured command, or with the platform's default
/// application when none is configured.
///
/// Failures are reported as warnings only; the note is already on disk.
pub fn open_path(path: &Path, opener: Option<&str>) -> OpenOutcome {
    let Some(mut cmd) = build_command(path, opener) else {
        warn!("Opener command is empty; not opening {}", path.display());
        return OpenOutcome::LaunchFailed("empty opener command".to_string());
    };
    debug!("Running {:?}", cmd);

    let outcome = match cmd.stdin(Stdio::null()).status() {
        Ok(status) if status.success() => OpenOutcome::Opened,
        Ok(status) => OpenOutcome::ExitedWithFailure(status.code()),
        Err(e) => OpenOutcome::LaunchFailed(e.to_string()),
    };

    match &outcome {
        OpenOutcome::Opened => {}
        OpenOutcome::ExitedWithFailure(Some(code)) => {
            warn!("Opener exited with status {} for {}", code, path.display())
        }
        OpenOutcome::ExitedWithFailure(None) => {
            warn!("Opener was terminated by a signal for {}", path.display())
        }
        OpenOutcome::LaunchFailed(e) => warn!("Failed to launch opener: {}", e),
    }
    outcome
}

fn build_command(path: &Path, opener: Option<&str>) -> Option<Command> {
    match opener {
        Some(line) => {
            let mut parts = line.split_whitespace();
            let mut cmd = Command::new(parts.next()?);
            cmd.args(parts).arg(path);
            Some(cmd)
        }
        None => Some(platform_command(path)),
    }
}

#[cfg(target_os = "macos")]
fn platform_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(windows)]
fn platform_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
