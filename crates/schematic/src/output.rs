use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Outcome of checking one payload source.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub source: String,
    pub valid: bool,
    pub reason: Option<String>,
}

impl CheckReport {
    pub fn accepted(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            valid: true,
            reason: None,
        }
    }

    pub fn rejected(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            valid: false,
            reason: Some(reason.into()),
        }
    }

    fn verdict(&self) -> &'static str {
        if self.valid {
            "ok"
        } else {
            "rejected"
        }
    }
}

pub fn print_reports(reports: &[CheckReport], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for report in reports {
                println!(
                    "{}",
                    serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SOURCE", "RESULT", "REASON"]);
            for report in reports {
                table.add_row(vec![
                    report.source.clone(),
                    report.verdict().to_string(),
                    report.reason.clone().unwrap_or_default(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for report in reports {
                match &report.reason {
                    Some(reason) => println!("{}: {} ({reason})", report.source, report.verdict()),
                    None => println!("{}: {}", report.source, report.verdict()),
                }
            }
        }
    }
}

/// Print a JSON document. Table output has no tabular form for a document
/// and falls back to pretty JSON.
pub fn print_document(document: &serde_json::Value, format: OutputFormat) {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(document),
        OutputFormat::Table | OutputFormat::Pretty => serde_json::to_string_pretty(document),
    };
    println!("{}", rendered.unwrap_or_else(|_| "{}".to_string()));
}
