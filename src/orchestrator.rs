use crate::carry_over::{count_items, extract_unfinished};
use crate::codec::DatedFilename;
use crate::config::NotesConfig;
use crate::scanner::latest_two;
use crate::writer::create_note;
use chrono::NaiveDate;
use eyre::{Context, Result, eyre};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Which note to open today and which one to carry items over from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub current: DatedFilename,
    pub previous: Option<DatedFilename>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoteStatus {
    /// Today's note was already there and was left untouched.
    Existing(PathBuf),
    Created { path: PathBuf, carried_items: usize },
}

impl NoteStatus {
    pub fn path(&self) -> &Path {
        match self {
            NoteStatus::Existing(path) => path,
            NoteStatus::Created { path, .. } => path,
        }
    }
}

pub fn determine_target(dir: &Path, today: NaiveDate) -> Result<Target> {
    let latest = latest_two(dir)?;
    let todays = DatedFilename::from_date(today)
        .ok_or_else(|| eyre!("{} does not fit a YYYY-MM-DD note name", today))?;

    let target = match latest.most_recent {
        Some(most_recent) if most_recent == todays => Target {
            current: most_recent,
            previous: latest.second_most_recent,
        },
        most_recent => Target {
            current: todays,
            previous: most_recent,
        },
    };

    debug!(
        "Current note {}, previous {}",
        target.current,
        target
            .previous
            .as_ref()
            .map_or("none".to_string(), ToString::to_string)
    );
    Ok(target)
}

/// Creates the current note unless it already exists, seeding it with the
/// previous note's unfinished items.
pub fn ensure_exists(dir: &Path, target: &Target) -> Result<NoteStatus> {
    let path = dir.join(&target.current);
    if path.is_file() {
        debug!("{} already exists", path.display());
        return Ok(NoteStatus::Existing(path));
    }

    let carried = match &target.previous {
        Some(previous) => {
            let previous_path = dir.join(previous);
            if previous_path.is_file() {
                let text = fs::read_to_string(&previous_path).wrap_err_with(|| {
                    format!("Failed to read previous note: {}", previous_path.display())
                })?;
                extract_unfinished(&text)
            } else {
                String::new()
            }
        }
        None => String::new(),
    };
    let carried_items = count_items(&carried);

    let path = create_note(dir, &target.current, &carried)?;
    info!(
        "Carried {} unfinished item(s) into {}",
        carried_items, target.current
    );
    Ok(NoteStatus::Created {
        path,
        carried_items,
    })
}

/// Finds or creates the note for `today` in the configured directory.
pub fn prepare_today(config: &NotesConfig, today: NaiveDate) -> Result<NoteStatus> {
    let target = determine_target(&config.notes_dir, today)?;
    ensure_exists(&config.notes_dir, &target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config(dir: &Path) -> NotesConfig {
        NotesConfig {
            notes_dir: dir.to_path_buf(),
            opener: None,
        }
    }

    #[test]
    fn new_day_targets_today_and_previous_latest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-05-01.md"), "").unwrap();
        fs::write(dir.path().join("2024-05-03.md"), "").unwrap();

        let target = determine_target(dir.path(), ymd(2024, 5, 4)).unwrap();
        assert_eq!(target.current.as_str(), "2024-05-04.md");
        assert_eq!(target.previous.unwrap().as_str(), "2024-05-03.md");
    }

    #[test]
    fn same_day_targets_existing_note() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-05-03.md"), "").unwrap();
        fs::write(dir.path().join("2024-05-04.md"), "").unwrap();

        let target = determine_target(dir.path(), ymd(2024, 5, 4)).unwrap();
        assert_eq!(target.current.as_str(), "2024-05-04.md");
        assert_eq!(target.previous.unwrap().as_str(), "2024-05-03.md");
    }

    #[test]
    fn empty_directory_has_no_previous() {
        let dir = tempdir().unwrap();
        let target = determine_target(dir.path(), ymd(2024, 5, 4)).unwrap();
        assert_eq!(target.previous, None);

        let status = ensure_exists(dir.path(), &target).unwrap();
        assert_eq!(
            status,
            NoteStatus::Created {
                path: dir.path().join("2024-05-04.md"),
                carried_items: 0
            }
        );
        assert_eq!(fs::read_to_string(status.path()).unwrap(), "# 2024-05-04\n");
    }

    #[test]
    fn carries_unfinished_items_forward() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("2024-05-03.md"),
            "# 2024-05-03\n\n[ ] buy milk\ndetails here\n\n[x] done task\nignored body\n\n[ ] call dentist\n",
        )
        .unwrap();

        let status = prepare_today(&config(dir.path()), ymd(2024, 5, 6)).unwrap();
        assert!(matches!(status, NoteStatus::Created { carried_items: 2, .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("2024-05-06.md")).unwrap(),
            "# 2024-05-06\n\n[ ] buy milk\ndetails here\n[ ] call dentist\n"
        );
    }

    #[test]
    fn second_run_same_day_leaves_note_alone() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-05-03.md"), "[ ] carry me\n").unwrap();
        let cfg = config(dir.path());

        let first = prepare_today(&cfg, ymd(2024, 5, 4)).unwrap();
        let content = fs::read_to_string(first.path()).unwrap();
        fs::write(first.path(), format!("{content}edited during the day\n")).unwrap();

        let second = prepare_today(&cfg, ymd(2024, 5, 4)).unwrap();
        assert_eq!(second, NoteStatus::Existing(first.path().to_path_buf()));
        assert_eq!(
            fs::read_to_string(second.path()).unwrap(),
            "# 2024-05-04\n\n[ ] carry me\nedited during the day\n"
        );
    }

    #[test]
    fn directory_named_like_today_is_not_a_note() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("2024-05-04.md")).unwrap();

        let err = prepare_today(&config(dir.path()), ymd(2024, 5, 4)).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to save note"));
        assert!(dir.path().join("2024-05-04.md").is_dir());
    }

    #[test]
    fn dates_past_year_9999_are_rejected() {
        let dir = tempdir().unwrap();
        let err = determine_target(dir.path(), ymd(10000, 1, 1)).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }

    #[test]
    fn unreadable_previous_note_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-05-03.md"), [0xff, 0xfe, 0x00]).unwrap();

        let err = prepare_today(&config(dir.path()), ymd(2024, 5, 4)).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read previous note"));
        assert!(!dir.path().join("2024-05-04.md").exists());
    }
}
