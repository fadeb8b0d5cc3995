//! Renderer invocation.
//!
//! The renderer (pandoc) is driven twice per document:
//!
//! ```text
//! decode:  renderer -t json <source>           stdout ──► Node
//! encode:  renderer -f json -t html5 -o <dst>  stdin  ◄── Node
//! ```
//!
//! Encoding is strict: a zero exit status with diagnostics on stderr still
//! counts as a failure.

use crate::data::Node;
use crate::log;
use crate::utils::exec::Subprocess;
use anyhow::{Context, Result, bail};
use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
    process::ExitStatus,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer failed to read `{path}` ({status}){stderr}")]
    Decode {
        path: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("invalid document tree for `{path}`")]
    Tree {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to write file `{path}` ({status}){stderr}")]
    Encode {
        path: PathBuf,
        status: String,
        stderr: String,
    },
}

/// The external document converter.
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Program followed by leading arguments
    command: Vec<String>,
}

impl Renderer {
    pub fn new(command: Vec<String>) -> Result<Self> {
        if command.is_empty() {
            bail!("Empty renderer command");
        }
        Ok(Self { command })
    }

    pub fn program(&self) -> &str {
        self.command.first().map_or("", String::as_str)
    }

    fn process<I, S>(&self, args: I) -> Subprocess
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let argv: Vec<OsString> = self.command[1..]
            .iter()
            .map(OsString::from)
            .chain(args.into_iter().map(Into::into))
            .collect();
        Subprocess::new(self.program(), argv)
    }

    /// Convert `source` to the generic document tree.
    pub fn decode(&self, source: &Path) -> Result<Node> {
        let mut process = self.process([
            OsString::from("-t"),
            OsString::from("json"),
            source.as_os_str().to_owned(),
        ]);
        process.execute()?;

        let stdout = process.read_stdout()?;
        let stderr = process.read_stderr()?;
        let status = process.wait()?;

        if !status.is_some_and(|s| s.success()) {
            return Err(RenderError::Decode {
                path: source.to_path_buf(),
                status: describe(status),
                stderr: format_stderr(&stderr),
            }
            .into());
        }
        if !stderr.is_empty() {
            log!("warn"; "{}:{}", source.display(), format_stderr(&stderr));
        }

        Node::from_json(&stdout).map_err(|source_err| {
            RenderError::Tree {
                path: source.to_path_buf(),
                source: source_err,
            }
            .into()
        })
    }

    /// Render `tree` with the full argument list `params` into `destination`.
    pub fn encode(&self, tree: &Node, destination: &Path, params: &[String]) -> Result<()> {
        let content = tree
            .to_json()
            .with_context(|| format!("Failed to serialize tree for `{}`", destination.display()))?;

        let mut process = self.process(params);
        process.execute()?;

        // A renderer that exits early closes its stdin; the exit status and
        // stderr below describe that failure better than the broken pipe.
        let written = match process.stdin() {
            Some(stdin) => stdin.write_all(&content),
            None => Ok(()),
        };
        process.close_stdin();

        let stderr = process.read_stderr()?;
        let status = process.wait()?;

        if !status.is_some_and(|s| s.success()) || !stderr.is_empty() {
            return Err(RenderError::Encode {
                path: destination.to_path_buf(),
                status: describe(status),
                stderr: format_stderr(&stderr),
            }
            .into());
        }
        written.with_context(|| format!("Failed to send tree for `{}`", destination.display()))?;

        Ok(())
    }
}

fn describe(status: Option<ExitStatus>) -> String {
    status.map_or_else(|| "not started".into(), |s| s.to_string())
}

/// Stderr as an indented block, empty when nothing was printed.
fn format_stderr(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim_end();
    if text.is_empty() {
        return String::new();
    }
    text.lines().map(|line| format!("\n  {line}")).collect()
}

// ============================================================================
// Tests
// ============================================================================
