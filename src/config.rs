use eyre::{Context, Result, eyre};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_FOLDER_KEY: &str = "default_folder";
const OPENER_KEY: &str = "opener";

/// Runtime configuration, resolved once at startup and handed to the
/// orchestrator.
#[derive(Clone, Debug)]
pub struct NotesConfig {
    pub notes_dir: PathBuf,
    /// Command used to open a note; the platform default when `None`.
    pub opener: Option<String>,
}

/// Contents of the settings file.
///
/// ```text
/// default_folder=/home/me/notes
/// opener=code --wait
/// ```
///
/// The first line must name the default folder. Later lines are optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub default_folder: PathBuf,
    pub opener: Option<String>,
}

impl Settings {
    pub fn with_default_folder(default_folder: PathBuf) -> Self {
        Self {
            default_folder,
            opener: None,
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines();
        let first = lines.next().unwrap_or_default();
        let default_folder = match split_pair(first) {
            Some((DEFAULT_FOLDER_KEY, value)) if !value.is_empty() => PathBuf::from(value),
            _ => {
                return Err(eyre!(
                    "Expected `{}=<path>` on the first line, found {:?}",
                    DEFAULT_FOLDER_KEY,
                    first
                ));
            }
        };

        let mut opener = None;
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match split_pair(line) {
                Some((OPENER_KEY, value)) if !value.is_empty() => {
                    opener = Some(value.to_string());
                }
                Some((OPENER_KEY, _)) => opener = None,
                Some((key, _)) => warn!("Ignoring unknown setting `{}`", key),
                None => warn!("Ignoring malformed settings line {:?}", line),
            }
        }

        Ok(Self {
            default_folder,
            opener,
        })
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}={}\n", DEFAULT_FOLDER_KEY, self.default_folder.display());
        if let Some(opener) = &self.opener {
            out.push_str(&format!("{}={}\n", OPENER_KEY, opener));
        }
        out
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read settings: {}", path.display()))?;
        Self::parse(&content)
            .wrap_err_with(|| format!("Failed to parse settings: {}", path.display()))
    }

    pub fn store(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.render())
            .wrap_err_with(|| format!("Failed to write settings: {}", path.display()))
    }

    /// Reads the settings file, creating it with the computed default folder
    /// when it does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading settings from {}", path.display());
            return Self::load(path);
        }
        let settings = Self::with_default_folder(default_notes_dir());
        settings.store(path)?;
        info!("Created settings file {}", path.display());
        Ok(settings)
    }

    pub fn into_config(self) -> NotesConfig {
        NotesConfig {
            notes_dir: self.default_folder,
            opener: self.opener,
        }
    }
}

/// `<config dir>/daily-notes/settings`, or `./.daily-notes` on systems
/// without a config directory.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("daily-notes/settings"))
        .unwrap_or_else(|| PathBuf::from(".daily-notes"))
}

/// `notes` inside the invoking user's home directory.
pub fn default_notes_dir() -> PathBuf {
    dirs::home_dir()
        .map(|d| d.join("notes"))
        .unwrap_or_else(|| PathBuf::from("notes"))
}

/// Creates the notes directory if it is missing.
pub fn ensure_notes_dir(config: &NotesConfig) -> Result<()> {
    if !config.notes_dir.is_dir() {
        fs::create_dir_all(&config.notes_dir).wrap_err_with(|| {
            format!("Failed to create notes directory: {}", config.notes_dir.display())
        })?;
        info!("Created notes directory {}", config.notes_dir.display());
    }
    Ok(())
}

fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}
