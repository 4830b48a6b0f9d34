use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use winnow::ascii::{dec_uint, space1};
use winnow::combinator::{opt, preceded};
use winnow::prelude::*;
use winnow::token::take_until;

use crate::error::DiagramError;
use crate::output::OutputFormat;

pub const DEFAULT_PROGRAM: &str = "dot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GraphvizVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for GraphvizVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// `dot - graphviz version 2.43.0 (0)`
pub fn parse_version(banner: &str) -> Option<GraphvizVersion> {
    banner.lines().find_map(|line| {
        let mut input = line;
        version_banner(&mut input).ok()
    })
}

fn version_banner(input: &mut &str) -> winnow::Result<GraphvizVersion> {
    take_until(0.., "version").parse_next(input)?;
    "version".parse_next(input)?;
    space1.parse_next(input)?;
    let major: u32 = dec_uint.parse_next(input)?;
    '.'.parse_next(input)?;
    let minor: u32 = dec_uint.parse_next(input)?;
    let patch: Option<u32> = opt(preceded('.', dec_uint)).parse_next(input)?;
    Ok(GraphvizVersion {
        major,
        minor,
        patch: patch.unwrap_or(0),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graphviz {
    program: PathBuf,
}

impl Default for Graphviz {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Graphviz {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn unavailable(&self, reason: impl Into<String>) -> DiagramError {
        DiagramError::rendering_unavailable(self.program.display().to_string(), reason)
    }

    /// An unrecognized banner is not an error.
    pub fn probe(&self) -> Result<Option<GraphvizVersion>, DiagramError> {
        let output = Command::new(&self.program)
            .arg("-V")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.unavailable(spawn_reason(&e)))?;

        if !output.status.success() {
            return Err(self.unavailable(format!("`-V` exited with {}", output.status)));
        }

        // Graphviz prints the banner on stderr.
        let mut banner = String::from_utf8_lossy(&output.stderr).into_owned();
        banner.push_str(&String::from_utf8_lossy(&output.stdout));

        let version = parse_version(&banner);
        match version {
            Some(v) => tracing::info!(program = %self.program.display(), version = %v, "graphviz found"),
            None => tracing::warn!(
                program = %self.program.display(),
                banner = banner.trim(),
                "unrecognized graphviz version banner"
            ),
        }
        Ok(version)
    }

    pub fn render(&self, dot_source: &str, format: OutputFormat) -> Result<Vec<u8>, DiagramError> {
        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", format.extension()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.unavailable(spawn_reason(&e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(dot_source.as_bytes()) {
                drop(stdin);
                // Reap the child before bailing out.
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.unavailable(format!("failed to send graph: {e}")));
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| self.unavailable(format!("failed to read output: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.lines().next().unwrap_or("").trim();
            let reason = if detail.is_empty() {
                format!("exited with {}", output.status)
            } else {
                format!("exited with {}: {detail}", output.status)
            };
            return Err(self.unavailable(reason));
        }
        if output.stdout.is_empty() {
            return Err(self.unavailable("produced no output"));
        }

        tracing::debug!(
            format = format.extension(),
            bytes = output.stdout.len(),
            "graphviz rendered"
        );
        Ok(output.stdout)
    }
}

fn spawn_reason(e: &std::io::Error) -> String {
    match e.kind() {
        std::io::ErrorKind::NotFound => "not installed or not on PATH".to_string(),
        std::io::ErrorKind::PermissionDenied => "not executable".to_string(),
        _ => e.to_string(),
    }
}
