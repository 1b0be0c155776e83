use clap::Parser;
use daily_notes::codec;
use daily_notes::config::{self, NotesConfig, Settings};
use daily_notes::opener;
use daily_notes::orchestrator::{self, NoteStatus};
use eyre::Result;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status for bad arguments and settings that could not be saved.
const USAGE_ERROR: u8 = 3;

const LICENSE_NOTICE: &str = "\
daily-notes  Copyright (C) 2022  the daily-notes authors

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.";

/// Open today's note, carrying over unfinished checklist items
/// from the most recent one.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print the license notice and exit.
    #[arg(short, long)]
    license: bool,

    /// Set the notes folder used from now on and exit.
    #[arg(short, long, value_name = "PATH")]
    default: Option<PathBuf>,

    /// Print the active notes folder and exit.
    #[arg(short, long)]
    current: bool,

    /// Path to a specific settings file.
    /// Defaults to $XDG_CONFIG_HOME/daily-notes/settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Create or locate today's note and print its path instead of opening it.
    #[arg(short, long)]
    no_open: bool,

    /// Log what is being done.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Exit status still reports the failure if stderr is gone.
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::from(USAGE_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.license {
        println!("{}", LICENSE_NOTICE);
        return Ok(ExitCode::SUCCESS);
    }

    // 1. Settings file (CLI path > platform config dir)
    let settings_path = cli.config.unwrap_or_else(config::default_settings_path);

    // 2. Rewrite the default folder and stop
    if let Some(folder) = cli.default {
        return Ok(set_default_folder(&settings_path, folder));
    }

    // 3. Load settings, creating them on first use
    let settings = Settings::load_or_init(&settings_path)?;
    let config = settings.into_config();

    if cli.current {
        println!("{}", config.notes_dir.display());
        return Ok(ExitCode::SUCCESS);
    }

    // 4. Find or create today's note, then open it
    config::ensure_notes_dir(&config)?;
    let status = orchestrator::prepare_today(&config, codec::today())?;
    open_note(&config, &status, cli.no_open);

    Ok(ExitCode::SUCCESS)
}

fn set_default_folder(settings_path: &std::path::Path, folder: PathBuf) -> ExitCode {
    // Keep the other settings when the current file is readable.
    let settings = match Settings::load(settings_path) {
        Ok(settings) => Settings {
            default_folder: folder,
            ..settings
        },
        Err(_) => Settings::with_default_folder(folder),
    };

    match settings.store(settings_path).map(|_| settings) {
        Ok(settings) => {
            println!("{}", settings.default_folder.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let e = e.wrap_err(format!(
                "Could not save the default folder to {}",
                settings_path.display()
            ));
            eprintln!("Error: {:?}", e);
            ExitCode::from(USAGE_ERROR)
        }
    }
}

fn open_note(config: &NotesConfig, status: &NoteStatus, no_open: bool) {
    if no_open {
        println!("{}", status.path().display());
        return;
    }
    opener::open_path(status.path(), config.opener.as_deref());
}
