//! Graphviz CLI wrapper for Rust
//!
//! A type-safe interface to the `dot` binary for turning graph descriptions
//! into images.
//!
//! # Example
//!
//! ```no_run
//! use graphviz::{Graphviz, Layout, OutputFormat};
//!
//! let gv = Graphviz::new()?.with_layout(Layout::Neato);
//!
//! // Render graph.dot into graph.png and graph.svg
//! for format in [OutputFormat::Png, OutputFormat::Svg] {
//!     let output = gv.render_beside("graph.dot", format)?;
//!     println!("wrote {}", output.display());
//! }
//! # Ok::<(), graphviz::Error>(())
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when invoking Graphviz
#[derive(Error, Debug)]
pub enum Error {
    #[error("Graphviz (dot) is not installed or not in PATH")]
    NotInstalled,

    #[error("Graphviz command failed: {0}")]
    CommandFailed(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Unknown layout engine: {0}")]
    UnknownLayout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Graphviz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Layout engine passed to `dot -K`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    Dot,
    #[default]
    Neato,
    Fdp,
    Sfdp,
    Circo,
    Twopi,
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Dot => write!(f, "dot"),
            Layout::Neato => write!(f, "neato"),
            Layout::Fdp => write!(f, "fdp"),
            Layout::Sfdp => write!(f, "sfdp"),
            Layout::Circo => write!(f, "circo"),
            Layout::Twopi => write!(f, "twopi"),
        }
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dot" => Ok(Layout::Dot),
            "neato" => Ok(Layout::Neato),
            "fdp" => Ok(Layout::Fdp),
            "sfdp" => Ok(Layout::Sfdp),
            "circo" => Ok(Layout::Circo),
            "twopi" => Ok(Layout::Twopi),
            other => Err(Error::UnknownLayout(other.to_string())),
        }
    }
}

/// Output format passed to `dot -T`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
    Pdf,
    Jpg,
}

impl OutputFormat {
    /// File extension used for rendered artifacts
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Jpg => "jpg",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Output from a Graphviz command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Get combined stdout and stderr
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Graphviz CLI wrapper
#[derive(Debug, Clone, Default)]
pub struct Graphviz {
    /// Layout engine
    layout: Layout,
    /// Pass `-v` to the binary
    verbose: bool,
}

impl Graphviz {
    /// Create a new Graphviz instance, checking that `dot` is installed
    pub fn new() -> Result<Self> {
        let gv = Self::default();
        if !gv.is_available() {
            return Err(Error::NotInstalled);
        }
        Ok(gv)
    }

    /// Set the layout engine
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Enable verbose Graphviz output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Current layout engine
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Check if dot is available
    pub fn is_available(&self) -> bool {
        self.run_command(&["-V".to_string()]).is_ok()
    }

    /// Render `input` into `output` using `format`
    pub fn render(
        &self,
        input: impl AsRef<Path>,
        format: OutputFormat,
        output: impl AsRef<Path>,
    ) -> Result<CommandOutput> {
        let args = self.render_args(input.as_ref(), format, output.as_ref());
        self.run_command(&args)
    }

    /// Render `input` next to itself, swapping the extension for the format's
    ///
    /// Returns the path of the written artifact.
    pub fn render_beside(&self, input: impl AsRef<Path>, format: OutputFormat) -> Result<PathBuf> {
        let input = input.as_ref();
        let output = input.with_extension(format.extension());
        self.render(input, format, &output)?;
        Ok(output)
    }

    /// Raw version string reported by `dot -V`
    pub fn version(&self) -> Result<String> {
        // dot prints its version on stderr
        let output = self.run_command(&["-V".to_string()])?;
        Ok(output.combined().trim().to_string())
    }

    // --- Private helpers ---

    fn render_args(&self, input: &Path, format: OutputFormat, output: &Path) -> Vec<String> {
        let mut args = vec!["-K".to_string(), self.layout.to_string()];
        if self.verbose {
            args.push("-v".to_string());
        }
        args.push(format!("-T{}", format));
        args.push(input.to_string_lossy().into_owned());
        args.push("-o".to_string());
        args.push(output.to_string_lossy().into_owned());
        args
    }

    fn run_command(&self, args: &[String]) -> Result<CommandOutput> {
        let mut cmd = Command::new("dot");
        cmd.args(args);

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotInstalled
            } else {
                Error::Io(e)
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(Error::CommandFailed(if stderr.is_empty() {
                format!("dot exited with {}", output.status)
            } else {
                stderr
            }));
        }

        Ok(CommandOutput {
            stdout,
            stderr,
        })
    }
}
