//! Carries unfinished checklist items from one note into the next.
//!
//! A checklist item starts at a marker line, the first line containing a `[`
//! with a later `]`. The character right after `[` is the status: `x` or `X`
//! means done, anything else means unfinished. The lines after the marker
//! belong to the item until a blank line or the next marker line.

/// Position of the first bracket pair on a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker {
    open: usize,
    completed: bool,
}

impl Marker {
    /// Byte offset of the `[`.
    pub fn open(&self) -> usize {
        self.open
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Finds the first `[`...`]` pair on `line`.
///
/// The pair is closed by the first `]` that follows any `[`; when several `[`
/// precede it, the nearest one opens the pair.
pub fn find_marker(line: &str) -> Option<Marker> {
    let bytes = line.as_bytes();
    let first_open = bytes.iter().position(|&b| b == b'[')?;
    let close = first_open + bytes[first_open..].iter().position(|&b| b == b']')?;
    let open = first_open + bytes[first_open..close].iter().rposition(|&b| b == b'[')?;

    let completed = matches!(bytes.get(open + 1), Some(b'x' | b'X'))
        && bytes.get(open + 2) == Some(&b']');

    Some(Marker { open, completed })
}

#[derive(Clone, Copy, Debug)]
enum State {
    Looking,
    Begin(Marker),
    Body,
    SkipBody,
}

/// Returns the unfinished items of `note_text`, each with its continuation
/// lines.
///
/// Lines of one item are joined with `\n`, and consecutive items are
/// separated by a single `\n`. The result has no trailing line break and is
/// empty when nothing is left to do.
pub fn extract_unfinished(note_text: &str) -> String {
    let lines: Vec<&str> = note_text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();

    let mut out = String::new();
    let mut state = State::Looking;
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = lines[cursor];
        match state {
            State::Looking => {
                if let Some(marker) = find_marker(line) {
                    // Evaluate this same line as the start of an item.
                    state = State::Begin(marker);
                    continue;
                }
            }
            State::Begin(marker) => {
                if marker.is_completed() {
                    state = State::SkipBody;
                } else {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(line);
                    state = State::Body;
                }
            }
            State::Body | State::SkipBody => {
                if is_blank(line) {
                    state = State::Looking;
                } else if let Some(marker) = find_marker(line) {
                    state = State::Begin(marker);
                    continue;
                } else if matches!(state, State::Body) {
                    out.push('\n');
                    out.push_str(line);
                }
            }
        }
        cursor += 1;
    }

    out
}

/// Number of unfinished items in a buffer produced by [`extract_unfinished`].
pub fn count_items(carried: &str) -> usize {
    carried
        .lines()
        .filter(|line| find_marker(line).is_some())
        .count()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
