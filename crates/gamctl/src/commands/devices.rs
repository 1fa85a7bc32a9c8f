//! Device command handlers, including the lazily fetched detail tabs.

use gam_api::types::{DeviceCreate, DeviceUpdate};
use gam_api::ExportResource;
use gam_core::model::{Device, ProvisioningStatus};
use gam_core::{ColumnSpec, ListController, Resource};

use crate::cli::{DeviceTab, DevicesArgs, DevicesCommand, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Columns ─────────────────────────────────────────────────────────

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "ID"),
        ColumnSpec::new("serial", "Serial"),
        ColumnSpec::new("name", "Name"),
        ColumnSpec::new("ip", "IP"),
        ColumnSpec::new("status", "Status"),
        ColumnSpec::new("sw", "Software"),
        ColumnSpec::hidden("mac", "MAC"),
        ColumnSpec::hidden("vendor", "Vendor"),
        ColumnSpec::hidden("product", "Product"),
        ColumnSpec::hidden("hw", "Hardware"),
        ColumnSpec::hidden("read_only", "Read-only"),
        ColumnSpec::hidden("last_seen", "Last seen"),
    ]
}

fn cell(device: &Device, column: &str) -> String {
    match column {
        "id" => device.id.to_string(),
        "serial" => device.serial.clone(),
        "name" => device.display_name().to_string(),
        "ip" => device.ip.map_or_else(|| "-".into(), |ip| ip.to_string()),
        "status" => if device.online { "online" } else { "offline" }.into(),
        "sw" => device.software_version.clone().unwrap_or_else(|| "-".into()),
        "mac" => device.mac.clone(),
        "vendor" => device.vendor.clone().unwrap_or_else(|| "-".into()),
        "product" => device.product_class.clone().unwrap_or_else(|| "-".into()),
        "hw" => device.hardware_version.clone().unwrap_or_else(|| "-".into()),
        "read_only" => util::yes_no(device.read_only),
        "last_seen" => util::fmt_time(device.last_seen.as_ref()),
        _ => String::new(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &session.console;
    match args.command {
        DevicesCommand::List { list, online, export } => {
            let mut controller = util::build_list(Resource::Devices, columns(), &list)?;
            if let Some(online) = online {
                controller.set_filter("online", Some(online.to_string()));
                controller.set_page(list.page.saturating_sub(1));
            }

            if export {
                let bytes = console.export_csv(ExportResource::Devices, &controller).await?;
                let path = util::export_filename("devices");
                return util::write_download(&path, &bytes, global.quiet);
            }

            let page = console.list_devices(&controller).await?;
            let out = output::render_page(
                &global.output,
                &controller,
                &page.rows,
                page.total,
                cell,
                |d| d.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Show { id, tab } => show(session, id, tab, global).await,

        DevicesCommand::Add { ip, name } => {
            let device = console.create_device(&DeviceCreate { ip, name }).await?;
            if !global.quiet {
                eprintln!("Registered device {} ({})", device.id, device.serial);
            }
            Ok(())
        }

        DevicesCommand::Set { id, name, ip, read_only } => {
            let update = DeviceUpdate { name, ip, read_only };
            let device = console.update_device(id, &update).await?;
            if !global.quiet {
                eprintln!("Updated device {}", device.display_name());
            }
            Ok(())
        }

        DevicesCommand::Remove { id } => {
            let device = console.device(id).await?;
            let prompt = format!(
                "Remove device {}? Its subscribers and endpoints go with it.",
                device.display_name()
            );
            if !util::confirm("devices remove", &prompt, global.yes)? {
                return Ok(());
            }
            console.delete_device(id).await?;
            if !global.quiet {
                eprintln!("Device removed");
            }
            Ok(())
        }

        DevicesCommand::Sync { id } => {
            console.sync_device(id).await?;
            if !global.quiet {
                eprintln!("Sync requested");
            }
            Ok(())
        }

        DevicesCommand::Reboot { id } => {
            let prompt = "Reboot the device? Service drops until it returns.";
            if !util::confirm("devices reboot", prompt, global.yes)? {
                return Ok(());
            }
            console.reboot_device(id).await?;
            if !global.quiet {
                eprintln!("Reboot requested");
            }
            Ok(())
        }

        DevicesCommand::Provision { id } => {
            console.provision_endpoints(id).await?;
            if !global.quiet {
                eprintln!("Provisioning requested");
            }
            Ok(())
        }

        DevicesCommand::Backup { id } => {
            console.backup_device(id).await?;
            if !global.quiet {
                eprintln!("Backup requested");
            }
            Ok(())
        }
    }
}

// ── Detail tabs ─────────────────────────────────────────────────────

/// Each tab is a separate query, fetched only when selected.
async fn show(
    session: &Session,
    id: i64,
    tab: DeviceTab,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &session.console;
    match tab {
        DeviceTab::Summary => {
            let device = console.device(id).await?;
            let out = output::render_single(
                &global.output,
                device.as_ref(),
                device_detail,
                |d| d.id.to_string(),
            );
            output::print_output(&out, global.quiet);
        }

        DeviceTab::Ports => {
            let ports = console.device_ports(id).await?;
            let out = output::render_rows(
                &global.output,
                &["Port", "Link", "Speed", "Media", "SFP vendor", "SFP serial"],
                &ports,
                |p| {
                    vec![
                        p.index.to_string(),
                        if p.link_up { "up" } else { "down" }.into(),
                        p.speed_mbps
                            .map_or_else(|| "-".into(), |s| format!("{s} Mbit/s")),
                        p.media().as_str().to_owned(),
                        p.sfp_vendor.clone().unwrap_or_else(|| "-".into()),
                        p.sfp_serial.clone().unwrap_or_else(|| "-".into()),
                    ]
                },
                |p| p.index.to_string(),
            );
            output::print_output(&out, global.quiet);
        }

        DeviceTab::Endpoints => {
            let endpoints = console.device_endpoints(id).await?;
            let out = output::render_rows(
                &global.output,
                &["ID", "MAC", "Status", "Port", "Profile", "Registered"],
                &endpoints,
                |e| {
                    vec![
                        e.id.to_string(),
                        e.mac.clone(),
                        ProvisioningStatus::classify(e).as_str().to_owned(),
                        e.configured_port
                            .or(e.detected_port)
                            .map_or_else(|| "-".into(), |p| p.to_string()),
                        e.bandwidth_profile_id
                            .map_or_else(|| "-".into(), |p| p.to_string()),
                        util::fmt_time(e.registered_at.as_ref()),
                    ]
                },
                |e| e.mac.clone(),
            );
            output::print_output(&out, global.quiet);
        }

        DeviceTab::Subscribers => {
            let mut controller =
                ListController::new(Resource::Subscribers, super::subscribers::columns());
            controller.set_filter("device_id", Some(id.to_string()));
            let page = console.list_subscribers(&controller).await?;
            let out = output::render_page(
                &global.output,
                &controller,
                &page.rows,
                page.total,
                super::subscribers::cell,
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
        }

        DeviceTab::Bandwidths => {
            let mut controller =
                ListController::new(Resource::Bandwidths, super::bandwidths::columns());
            controller.set_filter("device_id", Some(id.to_string()));
            let page = console.list_bandwidths(&controller).await?;
            let out = output::render_page(
                &global.output,
                &controller,
                &page.rows,
                page.total,
                super::bandwidths::cell,
                |b| b.id.to_string(),
            );
            output::print_output(&out, global.quiet);
        }

        DeviceTab::Backups => {
            let backups = console.device_backups(id).await?;
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
        }
    }
    Ok(())
}

fn device_detail(device: &Device) -> String {
    let mut lines = vec![
        format!("Device:    {}", device.display_name()),
        format!("Serial:    {}", device.serial),
        format!("MAC:       {}", device.mac),
        format!(
            "IP:        {}",
            device.ip.map_or_else(|| "-".into(), |ip| ip.to_string())
        ),
        format!(
            "Status:    {}",
            if device.online { "online" } else { "offline" }
        ),
        format!("Read-only: {}", util::yes_no(device.read_only)),
    ];
    if let Some(ref vendor) = device.vendor {
        lines.push(format!("Vendor:    {vendor}"));
    }
    if let Some(ref product) = device.product_class {
        lines.push(format!("Product:   {product}"));
    }
    if let Some(ref hw) = device.hardware_version {
        lines.push(format!("Hardware:  {hw}"));
    }
    if let Some(ref sw) = device.software_version {
        lines.push(format!("Software:  {sw}"));
    }
    lines.push(format!(
        "Last seen: {}",
        util::fmt_time(device.last_seen.as_ref())
    ));
    lines.join("\n")
}
