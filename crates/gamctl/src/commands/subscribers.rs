//! Subscriber command handlers.

use gam_api::types::{SubscriberCreate, SubscriberUpdate};
use gam_api::ExportResource;
use gam_core::model::Subscriber;
use gam_core::{ColumnSpec, Resource};

use crate::cli::{GlobalOpts, SubscribersArgs, SubscribersCommand};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

pub(crate) fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "ID"),
        ColumnSpec::new("name", "Name"),
        ColumnSpec::new("device", "Device"),
        ColumnSpec::new("vlans", "VLANs"),
        ColumnSpec::new("profile", "Profile"),
        ColumnSpec::hidden("trunk", "Trunk"),
    ]
}

pub(crate) fn cell(subscriber: &Subscriber, column: &str) -> String {
    match column {
        "id" => subscriber.id.to_string(),
        "name" => subscriber.name.clone(),
        "device" => subscriber.device_id.to_string(),
        "vlans" => subscriber.vlan_summary(),
        "profile" => subscriber
            .bandwidth_profile_id
            .map_or_else(|| "-".into(), |p| p.to_string()),
        "trunk" => util::yes_no(subscriber.trunk_mode),
        _ => String::new(),
    }
}

pub async fn handle(
    session: &Session,
    args: SubscribersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &session.console;
    match args.command {
        SubscribersCommand::List { list, device, export } => {
            let mut controller = util::build_list(Resource::Subscribers, columns(), &list)?;
            if let Some(device) = device {
                controller.set_filter("device_id", Some(device.to_string()));
                controller.set_page(list.page.saturating_sub(1));
            }

            if export {
                let bytes = console
                    .export_csv(ExportResource::Subscribers, &controller)
                    .await?;
                let path = util::export_filename("subscribers");
                return util::write_download(&path, &bytes, global.quiet);
            }

            let page = console.list_subscribers(&controller).await?;
            let out = output::render_page(
                &global.output,
                &controller,
                &page.rows,
                page.total,
                cell,
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubscribersCommand::Show { id } => {
            let subscriber = console.subscriber(id).await?;
            let out = output::render_single(
                &global.output,
                subscriber.as_ref(),
                subscriber_detail,
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SubscribersCommand::Add {
            device,
            name,
            port1_vlan,
            port1_tagged,
            port2_vlan,
            port2_tagged,
            trunk,
            bandwidth,
        } => {
            let create = SubscriberCreate {
                device_id: device,
                name,
                port1_vlan,
                port1_tagged,
                port2_vlan,
                port2_tagged,
                trunk_mode: trunk,
                bandwidth_profile_id: bandwidth,
            };
            let subscriber = console.create_subscriber(&create).await?;
            if !global.quiet {
                eprintln!("Created subscriber {} ({})", subscriber.id, subscriber.name);
            }
            Ok(())
        }

        SubscribersCommand::Set {
            id,
            name,
            port1_vlan,
            port1_tagged,
            port2_vlan,
            port2_tagged,
            trunk,
            bandwidth,
        } => {
            // The owning device scopes the invalidation, so look it up
            // before writing.
            let current = console.subscriber(id).await?;
            let update = SubscriberUpdate {
                name,
                port1_vlan,
                port1_tagged,
                port2_vlan,
                port2_tagged,
                trunk_mode: trunk,
                bandwidth_profile_id: bandwidth,
            };
            let subscriber = console
                .update_subscriber(id, current.device_id, &update)
                .await?;
            if !global.quiet {
                eprintln!("Updated subscriber {}", subscriber.name);
            }
            Ok(())
        }

        SubscribersCommand::Remove { id } => {
            let subscriber = console.subscriber(id).await?;
            let prompt = format!("Remove subscriber {}?", subscriber.name);
            if !util::confirm("subscribers remove", &prompt, global.yes)? {
                return Ok(());
            }
            console.delete_subscriber(id, subscriber.device_id).await?;
            if !global.quiet {
                eprintln!("Subscriber removed");
            }
            Ok(())
        }
    }
}

fn subscriber_detail(subscriber: &Subscriber) -> String {
    let vlan = |a: &gam_core::model::VlanAssignment| match a.vlan {
        Some(v) if a.tagged => format!("{v} (tagged)"),
        Some(v) => v.to_string(),
        None => "-".to_owned(),
    };
    [
        format!("Subscriber: {}", subscriber.name),
        format!("ID:         {}", subscriber.id),
        format!("Device:     {}", subscriber.device_id),
        format!("Port 1:     {}", vlan(&subscriber.port1)),
        format!("Port 2:     {}", vlan(&subscriber.port2)),
        format!("Trunk:      {}", util::yes_no(subscriber.trunk_mode)),
        format!(
            "Profile:    {}",
            subscriber
                .bandwidth_profile_id
                .map_or_else(|| "-".into(), |p| p.to_string())
        ),
    ]
    .join("\n")
}
