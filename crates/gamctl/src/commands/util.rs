//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use gam_core::{ColumnSpec, ListController, Resource};

use crate::cli::ListOpts;
use crate::error::CliError;

/// Build a list controller from shared CLI list options.
///
/// The CLI page is 1-based; the controller is 0-based. `--columns`
/// replaces the default visible set and rejects unknown ids.
pub fn build_list(
    resource: Resource,
    columns: Vec<ColumnSpec>,
    opts: &ListOpts,
) -> Result<ListController, CliError> {
    let mut list = ListController::new(resource, columns);
    list.set_page_size(opts.page_size);
    list.set_search(opts.search.clone());
    if !opts.columns.is_empty() {
        let ids: Vec<&str> = opts.columns.iter().map(String::as_str).collect();
        let unknown = list.select_columns(&ids);
        if !unknown.is_empty() {
            return Err(CliError::UnknownColumns {
                columns: unknown.join(", "),
                available: list
                    .columns()
                    .map(|(c, _)| c.id)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    }
    // Page last: filters and page size reset it to 0.
    list.set_page(opts.page.saturating_sub(1));
    Ok(list)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal on stdin there is nobody to ask, so a destructive
/// `action` fails instead of hanging a script on a hidden prompt.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Prompt for a password without echo.
pub fn prompt_password(prompt: &str) -> Result<String, CliError> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Date-stamped filename for CSV downloads, e.g. `devices-2026-08-30.csv`.
pub fn export_filename(prefix: &str) -> PathBuf {
    PathBuf::from(format!(
        "{prefix}-{}.csv",
        chrono::Local::now().format("%Y-%m-%d")
    ))
}

/// Write downloaded bytes to disk and report the path.
pub fn write_download(path: &Path, bytes: &[u8], quiet: bool) -> Result<(), CliError> {
    std::fs::write(path, bytes)?;
    if !quiet {
        eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
    }
    Ok(())
}

/// Read an optional file into the `(name, bytes)` shape multipart
/// uploads expect.
pub fn read_upload_file(path: Option<&Path>) -> Result<Option<(String, Vec<u8>)>, CliError> {
    match path {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_owned());
            Ok(Some((name, bytes)))
        }
        None => Ok(None),
    }
}

/// Format an optional timestamp for table cells.
pub fn fmt_time(t: Option<&chrono::DateTime<chrono::Utc>>) -> String {
    t.map_or_else(|| "-".to_owned(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// "yes"/"no" for boolean table cells.
pub fn yes_no(v: bool) -> String {
    if v { "yes" } else { "no" }.to_owned()
}
