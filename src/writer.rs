use crate::codec::DatedFilename;
use eyre::{Context, Result};
use log::info;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Renders a new note: the `# <date>` header, then the carried items (if any)
/// after one blank line. Every line ends with a line break.
pub fn write_note<W: Write>(
    writer: &mut W,
    filename: &DatedFilename,
    carried: &str,
) -> std::io::Result<()> {
    writeln!(writer, "# {}", filename.stem())?;

    if !carried.is_empty() {
        writeln!(writer)?;
        for line in carried.split('\n') {
            writeln!(writer, "{}", line)?;
        }
    }

    Ok(())
}

/// Creates `dir/filename`, replacing any existing file.
///
/// The note is rendered into a temporary file in `dir` and renamed into place,
/// so a failed run never leaves a half-written note behind.
pub fn create_note(dir: &Path, filename: &DatedFilename, carried: &str) -> Result<PathBuf> {
    let path = dir.join(filename);

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    // Same mode as a plain `File::create`, still subject to the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let tmp = builder
        .tempfile_in(dir)
        .wrap_err_with(|| format!("Failed to create temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        write_note(&mut writer, filename, carried)
            .and_then(|_| writer.flush())
            .wrap_err_with(|| format!("Failed to write note: {}", path.display()))?;
    }
    tmp.persist(&path)
        .wrap_err_with(|| format!("Failed to save note: {}", path.display()))?;

    info!("Created {}", path.display());
    Ok(path)
}
