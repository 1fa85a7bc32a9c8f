//! Firmware image command handlers.

use gam_api::types::FirmwareUpload;
use gam_core::model::FirmwareImage;
use gam_core::{ColumnSpec, Resource};

use crate::cli::{FirmwareArgs, FirmwareCommand, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "ID"),
        ColumnSpec::new("version", "Version"),
        ColumnSpec::new("technology", "Technology"),
        ColumnSpec::new("baseline", "Baseline"),
        ColumnSpec::hidden("size", "Size"),
        ColumnSpec::hidden("uploaded", "Uploaded"),
    ]
}

fn cell(image: &FirmwareImage, column: &str) -> String {
    match column {
        "id" => image.id.to_string(),
        "version" => image.version_label(),
        "technology" => image.technology.to_string(),
        "baseline" => util::yes_no(image.baseline),
        "size" => image
            .size_bytes
            .map_or_else(|| "-".into(), |s| format!("{s} B")),
        "uploaded" => util::fmt_time(image.uploaded_at.as_ref()),
        _ => String::new(),
    }
}

pub async fn handle(
    session: &Session,
    args: FirmwareArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &session.console;
    match args.command {
        FirmwareCommand::List { list, technology } => {
            let mut controller = util::build_list(Resource::Firmware, columns(), &list)?;
            if let Some(technology) = technology {
                controller.set_filter("technology", Some(technology));
                controller.set_page(list.page.saturating_sub(1));
            }

            let page = console.list_firmware(&controller).await?;
            let out = output::render_page(
                &global.output,
                &controller,
                &page.rows,
                page.total,
                cell,
                |f| f.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FirmwareCommand::Upload {
            image,
            manifest,
            checksum,
            signature,
        } => {
            let upload = FirmwareUpload {
                image: util::read_upload_file(image.as_deref())?,
                manifest: util::read_upload_file(manifest.as_deref())?,
                checksum: util::read_upload_file(checksum.as_deref())?,
                signature: util::read_upload_file(signature.as_deref())?,
            };
            if upload.image.is_none()
                && upload.manifest.is_none()
                && upload.checksum.is_none()
                && upload.signature.is_none()
            {
                return Err(CliError::Validation {
                    field: "upload".into(),
                    reason: "at least one file is required".into(),
                });
            }

            let result = console.upload_firmware(upload).await?;
            if !global.quiet {
                let version = result.version.as_deref().unwrap_or("unknown");
                let technology = result.technology.as_deref().unwrap_or("unknown");
                eprintln!(
                    "Uploaded image {} (version {version}, technology {technology})",
                    result.id
                );
            }
            Ok(())
        }

        FirmwareCommand::Baseline { id } => {
            let image = console.firmware(id).await?;
            let prompt = format!(
                "Make {} the baseline for {}? New devices will be flashed to it.",
                image.version_label(),
                image.technology
            );
            if !util::confirm("firmware baseline", &prompt, global.yes)? {
                return Ok(());
            }
            console.set_firmware_baseline(id).await?;
            if !global.quiet {
                eprintln!("Baseline set");
            }
            Ok(())
        }

        FirmwareCommand::Remove { id } => {
            let image = console.firmware(id).await?;
            if image.baseline {
                return Err(CliError::Rejected {
                    message: format!(
                        "{} is the current {} baseline; designate another image first",
                        image.version_label(),
                        image.technology
                    ),
                });
            }
            let prompt = format!("Remove firmware image {}?", image.version_label());
            if !util::confirm("firmware remove", &prompt, global.yes)? {
                return Ok(());
            }
            console.delete_firmware(id).await?;
            if !global.quiet {
                eprintln!("Image removed");
            }
            Ok(())
        }
    }
}
