use crate::codec::DatedFilename;
use eyre::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// The two most recent dated notes in a directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LatestTwo {
    pub most_recent: Option<DatedFilename>,
    pub second_most_recent: Option<DatedFilename>,
}

/// Lists the dated notes directly inside `dir`, oldest first.
/// Subdirectories and files with any other name are skipped.
pub fn list_dated_files(dir: &Path) -> Result<Vec<DatedFilename>> {
    let entries = fs::read_dir(dir)
        .wrap_err_with(|| format!("Failed to read notes directory: {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.wrap_err_with(|| format!("Failed to list notes directory: {}", dir.display()))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(dated) = DatedFilename::parse(name) {
            names.push(dated);
        }
    }
    names.sort();

    debug!("Found {} dated notes in {}", names.len(), dir.display());
    Ok(names)
}

pub fn latest_two(dir: &Path) -> Result<LatestTwo> {
    let mut names = list_dated_files(dir)?;
    let most_recent = names.pop();
    let second_most_recent = names.pop();
    Ok(LatestTwo {
        most_recent,
        second_most_recent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    fn names(latest: &LatestTwo) -> (Option<&str>, Option<&str>) {
        (
            latest.most_recent.as_ref().map(DatedFilename::as_str),
            latest.second_most_recent.as_ref().map(DatedFilename::as_str),
        )
    }

    #[test]
    fn picks_two_newest_regardless_of_creation_order() {
        let dir = tempdir().unwrap();
        for name in ["2024-02-10.md", "2023-12-31.md", "2024-01-15.md"] {
            touch(dir.path(), name);
        }
        for name in ["README.md", "2099-01-01.txt", "todo.md", "2024-13-01.md", ".hidden"] {
            touch(dir.path(), name);
        }

        let latest = latest_two(dir.path()).unwrap();
        assert_eq!(names(&latest), (Some("2024-02-10.md"), Some("2024-01-15.md")));
    }

    #[test]
    fn partial_results_for_sparse_directories() {
        let dir = tempdir().unwrap();
        assert_eq!(latest_two(dir.path()).unwrap(), LatestTwo::default());

        touch(dir.path(), "notes.txt");
        assert_eq!(latest_two(dir.path()).unwrap(), LatestTwo::default());

        touch(dir.path(), "2024-06-01.md");
        let latest = latest_two(dir.path()).unwrap();
        assert_eq!(names(&latest), (Some("2024-06-01.md"), None));
    }

    #[test]
    fn subdirectories_are_ignored() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("2030-01-01.md")).unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        touch(&dir.path().join("archive"), "2029-01-01.md");
        touch(dir.path(), "2024-06-01.md");

        let listed = list_dated_files(dir.path()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].as_str(), "2024-06-01.md");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = latest_two(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read notes directory"));
    }
}
