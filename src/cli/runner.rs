//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::NotionConfig;
use crate::diagnostics::{DiagnosticsSink, FileSink, NullSink};
use crate::error::{Error, Result};
use crate::extract::flatten_record;
use crate::query::DatabaseQuery;
use crate::types::{JsonValue, Record};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        match &self.cli.command {
            Commands::Check => self.check(&config).await,
            Commands::Fetch {
                flatten,
                output,
                no_debug_file,
            } => {
                self.fetch(&config, *flatten, output.as_deref(), *no_debug_file)
                    .await
            }
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<NotionConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return NotionConfig::from_json(json_str);
        }
        NotionConfig::from_file(&self.cli.config)
    }

    /// Check connection
    async fn check(&self, config: &NotionConfig) -> Result<()> {
        let query = DatabaseQuery::new(config)?;
        let summary = query.probe().await?;

        let report = json!({
            "status": "SUCCEEDED",
            "endpoint": query.endpoint().as_str(),
            "first_page_records": summary.records,
            "has_more": summary.has_more,
        });
        self.emit(&render(std::slice::from_ref(&report), self.cli.format)?, None)
    }

    /// Fetch all records
    async fn fetch(
        &self,
        config: &NotionConfig,
        flatten: bool,
        output: Option<&Path>,
        no_debug_file: bool,
    ) -> Result<()> {
        if flatten && config.columns.is_empty() {
            return Err(Error::config(
                "--flatten requires a non-empty \"columns\" list in the config",
            ));
        }

        let sink: Arc<dyn DiagnosticsSink> = if no_debug_file {
            Arc::new(NullSink)
        } else {
            Arc::new(FileSink::new(&config.debug_output))
        };
        let query = DatabaseQuery::new(config)?.with_sink(sink);

        let (records, failure) = match query.fetch_all().await {
            Ok(records) => (records, None),
            Err(partial) => (partial.records, Some(partial.source)),
        };

        let rows = to_rows(&records, flatten.then_some(config));
        self.emit(&render(&rows, self.cli.format)?, output)?;
        info!(records = rows.len(), "Wrote output");

        match failure {
            Some(err) => {
                warn!(
                    records = rows.len(),
                    "Output holds only the records fetched before the failure"
                );
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Write rendered output to a file or stdout
    fn emit(&self, rendered: &str, output: Option<&Path>) -> Result<()> {
        match output {
            Some(path) => {
                std::fs::write(path, rendered)?;
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// Raw records, or flattened rows when a config with columns is given
fn to_rows(records: &[Record], flatten: Option<&NotionConfig>) -> Vec<JsonValue> {
    match flatten {
        Some(config) => records
            .iter()
            .map(|r| JsonValue::Object(flatten_record(r, &config.columns)))
            .collect(),
        None => records.iter().cloned().map(JsonValue::Object).collect(),
    }
}

/// Render rows in the requested format
fn render(rows: &[JsonValue], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = String::new();
            for row in rows {
                out.push_str(&serde_json::to_string(row)?);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Pretty => {
            let mut out = serde_json::to_string_pretty(rows)?;
            out.push('\n');
            Ok(out)
        }
    }
}
