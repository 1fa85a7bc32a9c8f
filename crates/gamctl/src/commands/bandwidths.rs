//! Bandwidth profile command handlers.

use gam_api::types::{BandwidthCreate, BandwidthUpdate};
use gam_core::model::BandwidthProfile;
use gam_core::{ColumnSpec, Resource};

use crate::cli::{BandwidthsArgs, BandwidthsCommand, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

pub(crate) fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "ID"),
        ColumnSpec::new("name", "Name"),
        ColumnSpec::new("rates", "Down/Up (Mbit/s)"),
        ColumnSpec::new("device", "Device"),
        ColumnSpec::new("synced", "Synced"),
    ]
}

pub(crate) fn cell(profile: &BandwidthProfile, column: &str) -> String {
    match column {
        "id" => profile.id.to_string(),
        "name" => profile.name.clone(),
        "rates" => profile.rate_summary(),
        "device" => profile
            .device_id
            .map_or_else(|| "-".into(), |d| d.to_string()),
        "synced" => util::yes_no(profile.synced),
        _ => String::new(),
    }
}

pub async fn handle(
    session: &Session,
    args: BandwidthsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &session.console;
    match args.command {
        BandwidthsCommand::List { list, device } => {
            let mut controller = util::build_list(Resource::Bandwidths, columns(), &list)?;
            if let Some(device) = device {
                controller.set_filter("device_id", Some(device.to_string()));
                controller.set_page(list.page.saturating_sub(1));
            }

            let page = console.list_bandwidths(&controller).await?;
            let out = output::render_page(
                &global.output,
                &controller,
                &page.rows,
                page.total,
                cell,
                |b| b.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BandwidthsCommand::Show { id } => {
            let profile = console.bandwidth(id).await?;
            let out = output::render_single(
                &global.output,
                profile.as_ref(),
                profile_detail,
                |b| b.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BandwidthsCommand::Add { name, down, up, device } => {
            let create = BandwidthCreate {
                name,
                ds_bw: down,
                us_bw: up,
                device_id: device,
            };
            let profile = console.create_bandwidth(create).await?;
            if !global.quiet {
                eprintln!(
                    "Created profile {} ({}, device {})",
                    profile.id,
                    profile.rate_summary(),
                    profile
                        .device_id
                        .map_or_else(|| "-".into(), |d| d.to_string())
                );
            }
            Ok(())
        }

        BandwidthsCommand::Set { id, name, down, up } => {
            let current = console.bandwidth(id).await?;
            let update = BandwidthUpdate {
                name,
                ds_bw: down,
                us_bw: up,
            };
            let device_id = current.device_id.unwrap_or_default();
            let profile = console.update_bandwidth(id, device_id, &update).await?;
            if !global.quiet {
                eprintln!("Updated profile {} ({})", profile.name, profile.rate_summary());
            }
            Ok(())
        }

        BandwidthsCommand::Remove { id } => {
            let profile = console.bandwidth(id).await?;
            let prompt = format!(
                "Remove profile {}? Subscribers using it fall back to unlimited.",
                profile.name
            );
            if !util::confirm("bandwidths remove", &prompt, global.yes)? {
                return Ok(());
            }
            console
                .delete_bandwidth(id, profile.device_id.unwrap_or_default())
                .await?;
            if !global.quiet {
                eprintln!("Profile removed");
            }
            Ok(())
        }

        BandwidthsCommand::Push { id } => {
            let profile = console.bandwidth(id).await?;
            console
                .push_bandwidth(id, profile.device_id.unwrap_or_default())
                .await?;
            if !global.quiet {
                eprintln!("Pushed {} to device", profile.rate_summary());
            }
            Ok(())
        }
    }
}

fn profile_detail(profile: &BandwidthProfile) -> String {
    [
        format!("Profile:    {}", profile.name),
        format!("ID:         {}", profile.id),
        format!("Downstream: {} Mbit/s", profile.downstream_mbps),
        format!("Upstream:   {} Mbit/s", profile.upstream_mbps),
        format!(
            "Device:     {}",
            profile
                .device_id
                .map_or_else(|| "-".into(), |d| d.to_string())
        ),
        format!("Synced:     {}", util::yes_no(profile.synced)),
    ]
    .join("\n")
}
