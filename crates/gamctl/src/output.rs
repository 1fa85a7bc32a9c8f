//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Tables are built
//! dynamically from the list controller's visible column set, so
//! `--columns` reshapes them without touching the fetched data.
//! Structured formats serialize the full objects via serde.

use std::io::{self, IsTerminal, Write};

use tabled::builder::Builder;
use tabled::settings::Style;

use gam_core::{ListController, PageSummary};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render one page of a listing in the chosen format.
///
/// - `table`: dynamic columns from the controller's visible set, with a
///   page summary footer showing the server-reported total
/// - `json` / `json-compact` / `yaml`: serializes the full objects
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_page<T>(
    format: &OutputFormat,
    list: &ListController,
    rows: &[T],
    total: u64,
    cell_fn: impl Fn(&T, &str) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => {
            let columns = list.visible_columns();
            let mut builder = Builder::default();
            builder.push_record(columns.iter().map(|c| c.label.to_owned()));
            for row in rows {
                builder.push_record(columns.iter().map(|c| cell_fn(row, c.id)));
            }
            let table = builder.build().with(Style::rounded()).to_string();
            let summary = list.summary(rows.len(), total);
            format!("{table}\n{}", summary_line(&summary))
        }
        OutputFormat::Json => render_json(rows, false),
        OutputFormat::JsonCompact => render_json(rows, true),
        OutputFormat::Yaml => render_yaml(rows),
        OutputFormat::Plain => rows.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a list without pagination (device sub-collections).
pub fn render_rows<T>(
    format: &OutputFormat,
    headers: &[&str],
    rows: &[T],
    cells_fn: impl Fn(&T) -> Vec<String>,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(headers.iter().map(|h| (*h).to_owned()));
            for row in rows {
                builder.push_record(cells_fn(row));
            }
            builder.build().with(Style::rounded()).to_string()
        }
        OutputFormat::Json => render_json(rows, false),
        OutputFormat::JsonCompact => render_json(rows, true),
        OutputFormat::Yaml => render_yaml(rows),
        OutputFormat::Plain => rows.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a
/// pre-formatted key/value block.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// The `"21-40 of 123"` footer under a table page.
fn summary_line(summary: &PageSummary) -> String {
    format!("showing {summary}")
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("<serialization error: {e}>"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("<serialization error: {e}>"))
}
