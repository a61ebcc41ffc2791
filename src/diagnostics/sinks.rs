//! Sink implementations

use super::DiagnosticsSink;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;
use std::sync::Mutex;
use tracing::{debug, warn};

const INDENT: &str = "    ";

/// Re-indent a JSON document with four spaces
///
/// Works on the token stream, so numbers, escapes and key order come out
/// exactly as received. Empty objects and arrays stay on one line.
pub fn pretty_json(body: &str) -> Result<String> {
    serde_json::from_str::<IgnoredAny>(body)
        .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

    let mut out = String::with_capacity(body.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            ' ' | '\t' | '\n' | '\r' => {}
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' | '[' => {
                out.push(c);
                skip_whitespace(&mut chars);
                match chars.next_if(|next| matches!(*next, '}' | ']')) {
                    Some(close) => out.push(close),
                    None => {
                        depth += 1;
                        newline(&mut out, depth);
                    }
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                newline(&mut out, depth);
                out.push(c);
            }
            ',' => {
                out.push(c);
                newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(char::is_ascii_whitespace).is_some() {}
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

// ============================================================================
// File Sink
// ============================================================================

/// Writes each page body, pretty-printed, to a single file
///
/// The file is reset to `{}` when a fetch begins and overwritten on every
/// page, so after a run it holds the last page received.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Target file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, contents: &str) -> Result<()> {
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

#[async_trait]
impl DiagnosticsSink for FileSink {
    async fn begin(&self) {
        match self.write("{}").await {
            Ok(()) => debug!(path = %self.path.display(), "Cleared diagnostics file"),
            Err(e) => warn!(path = %self.path.display(), "Failed to clear diagnostics file: {e}"),
        }
    }

    async fn record_page(&self, page: u32, body: &str) {
        let formatted = match pretty_json(body) {
            Ok(formatted) => formatted,
            Err(e) => {
                warn!(page, "Failed to format response body: {e}");
                return;
            }
        };

        match self.write(&formatted).await {
            Ok(()) => debug!(page, path = %self.path.display(), "Saved response body"),
            Err(e) => warn!(page, path = %self.path.display(), "Failed to save response body: {e}"),
        }
    }
}

// ============================================================================
// Memory Sink
// ============================================================================

/// Keeps every page body in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    pages: Mutex<Vec<String>>,
    begun: Mutex<u32>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Bodies received so far
    pub fn pages(&self) -> Vec<String> {
        self.pages.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Number of fetches started against this sink
    pub fn begin_count(&self) -> u32 {
        self.begun.lock().map(|b| *b).unwrap_or_default()
    }
}

#[async_trait]
impl DiagnosticsSink for MemorySink {
    async fn begin(&self) {
        if let Ok(mut pages) = self.pages.lock() {
            pages.clear();
        }
        if let Ok(mut begun) = self.begun.lock() {
            *begun += 1;
        }
    }

    async fn record_page(&self, _page: u32, body: &str) {
        if let Ok(mut pages) = self.pages.lock() {
            pages.push(body.to_string());
        }
    }
}

// ============================================================================
// Null Sink
// ============================================================================

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl DiagnosticsSink for NullSink {
    async fn record_page(&self, _page: u32, _body: &str) {}
}
