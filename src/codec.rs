use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

/// chrono format of the date part of a note filename.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const EXTENSION: &str = ".md";

const DATE_LEN: usize = 10;
const FILENAME_LEN: usize = DATE_LEN + EXTENSION.len();

/// A note filename of the form `YYYY-MM-DD.md`.
///
/// The date part is zero padded and fixed width, so ordering the names as
/// strings orders them by date.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatedFilename {
    name: String,
    date: NaiveDate,
}

impl DatedFilename {
    /// `None` for years outside `0..=9999`, which do not fit the fixed width.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        if !(0..=9999).contains(&date.year()) {
            return None;
        }
        Some(Self {
            name: format!("{}{}", date.format(DATE_FORMAT), EXTENSION),
            date,
        })
    }

    /// Accepts `name` only if it is exactly a dated note filename.
    pub fn parse(name: &str) -> Option<Self> {
        parse_prefix(name).map(|date| Self {
            name: name.to_string(),
            date,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The name without its `.md` extension, i.e. the date text.
    pub fn stem(&self) -> &str {
        &self.name[..DATE_LEN]
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for DatedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<std::path::Path> for DatedFilename {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.name)
    }
}

pub fn date_to_filename(date: NaiveDate) -> Option<DatedFilename> {
    DatedFilename::from_date(date)
}

pub fn is_valid_dated_filename(name: &str) -> bool {
    parse_prefix(name).is_some()
}

/// Today's calendar date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_prefix(name: &str) -> Option<NaiveDate> {
    if name.len() != FILENAME_LEN || !name.ends_with(EXTENSION) {
        return None;
    }
    let prefix = name.get(..DATE_LEN)?;
    let date = NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()?;
    // chrono accepts unpadded fields and signed years; only the canonical
    // spelling sorts correctly.
    if date.format(DATE_FORMAT).to_string() != prefix {
        return None;
    }
    Some(date)
}
