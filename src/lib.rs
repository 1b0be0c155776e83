//! # daily-notes
//!
//! A small CLI that opens today's Markdown note and carries over the checklist
//! items you did not finish yesterday.
//!
//! ## What it does
//!
//! Notes live in one folder, one file per day, named `YYYY-MM-DD.md`. On each
//! run the tool looks for today's note. If it is missing, the most recent
//! earlier note is scanned for unfinished checklist items:
//!
//! ```text
//! [ ] buy milk
//! from the corner shop
//!
//! [x] call the bank
//! ```
//!
//! Every item whose marker is not `[x]`/`[X]` is copied, together with the
//! lines directly under it, into a fresh note that starts with a `# <date>`
//! header. Completed items and their bodies are left behind. The note is then
//! opened with the system's default application (or the configured opener).
//!
//! An existing note for today is never rewritten, so running the tool again
//! just reopens it.
//!
//! ## Usage
//!
//! ```sh
//! # Open (and if needed create) today's note
//! daily-notes
//!
//! # Change the notes folder
//! daily-notes --default ~/journal
//! ```
//!
//! The folder is kept in `$XDG_CONFIG_HOME/daily-notes/settings` as a
//! `default_folder=<path>` line.
pub mod carry_over;
pub mod codec;
pub mod config;
pub mod opener;
pub mod orchestrator;
pub mod scanner;
pub mod writer;
