//! Configuration backup command handlers.

use std::path::PathBuf;

use crate::cli::{BackupsArgs, BackupsCommand, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    session: &Session,
    args: BackupsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &session.console;
    match args.command {
        BackupsCommand::List { device } => {
            let backups = console.device_backups(device).await?;
            let out = output::render_rows(
                &global.output,
                &["ID", "Version", "Type", "Size", "Created"],
                &backups,
                |b| {
                    vec![
                        b.id.to_string(),
                        format!("v{}", b.version),
                        b.backup_type.clone(),
                        format!("{} B", b.size_bytes),
                        util::fmt_time(Some(&b.created_at)),
                    ]
                },
                |b| b.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BackupsCommand::Download { id, output } => {
            let backup = console.backup(id).await?;
            let bytes = console.backup_content(id).await?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(format!("backup-{}-v{}.cfg", backup.device_id, backup.version))
            });
            util::write_download(&path, &bytes, global.quiet)
        }

        BackupsCommand::Restore { id } => {
            let backup = console.backup(id).await?;
            let prompt = format!(
                "Restore v{} onto device {}? The running configuration is replaced.",
                backup.version, backup.device_id
            );
            if !util::confirm("backups restore", &prompt, global.yes)? {
                return Ok(());
            }
            console.restore_backup(id, backup.device_id).await?;
            if !global.quiet {
                eprintln!("Restore requested");
            }
            Ok(())
        }

        BackupsCommand::Remove { id } => {
            let backup = console.backup(id).await?;
            let prompt = format!(
                "Remove backup v{} of device {}?",
                backup.version, backup.device_id
            );
            if !util::confirm("backups remove", &prompt, global.yes)? {
                return Ok(());
            }
            console.delete_backup(id, backup.device_id).await?;
            if !global.quiet {
                eprintln!("Backup removed");
            }
            Ok(())
        }
    }
}
