use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::DiagramError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
    Dot,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }

    pub fn needs_engine(self) -> bool {
        self != OutputFormat::Dot
    }
}

/// `<base>.<ext>`. The extension is appended, never substituted, so a base
/// like `out/v1.2` keeps its dot.
pub fn output_path(base: &str, format: OutputFormat) -> Result<PathBuf, DiagramError> {
    if base.trim().is_empty() {
        return Err(DiagramError::filesystem(
            base,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty output path"),
        ));
    }
    Ok(PathBuf::from(format!("{base}.{}", format.extension())))
}

/// Create the parent directory, then write through a temp file in that
/// directory and rename it into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DiagramError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| DiagramError::filesystem(dir, e))?;

    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| DiagramError::filesystem(dir, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.flush())
        .map_err(|e| DiagramError::filesystem(path, e))?;
    tmp.persist(path)
        .map_err(|e| DiagramError::filesystem(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}
