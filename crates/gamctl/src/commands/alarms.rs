//! Alarm command handlers, including the polling counts watcher.

use std::sync::Arc;
use std::time::Duration;

use gam_api::types::AlarmCounts;
use gam_api::ExportResource;
use gam_core::model::{Alarm, AlarmState};
use gam_core::{AlarmPoller, ColumnSpec, Resource};

use crate::cli::{AlarmsArgs, AlarmsCommand, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "ID"),
        ColumnSpec::new("severity", "Severity"),
        ColumnSpec::new("condition", "Condition"),
        ColumnSpec::new("device", "Device"),
        ColumnSpec::new("state", "State"),
        ColumnSpec::new("raised", "Raised"),
        ColumnSpec::hidden("ack_by", "Acked by"),
        ColumnSpec::hidden("closed", "Closed"),
    ]
}

fn cell(alarm: &Alarm, column: &str) -> String {
    match column {
        "id" => alarm.id.to_string(),
        "severity" => alarm.severity.to_string(),
        "condition" => alarm.condition_type.clone(),
        "device" => alarm.device_id.to_string(),
        "state" => state_str(alarm.state()).to_owned(),
        "raised" => util::fmt_time(Some(&alarm.raised_at)),
        "ack_by" => alarm.acknowledged_by.clone().unwrap_or_else(|| "-".into()),
        "closed" => util::fmt_time(alarm.closing_date.as_ref()),
        _ => String::new(),
    }
}

fn state_str(state: AlarmState) -> &'static str {
    match state {
        AlarmState::ActiveUnacknowledged => "active",
        AlarmState::ActiveAcknowledged => "acked",
        AlarmState::Closed => "closed",
    }
}

pub async fn handle(
    session: &Session,
    args: AlarmsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &session.console;
    match args.command {
        AlarmsCommand::List {
            list,
            active,
            severity,
            device,
            export,
        } => {
            let mut controller = util::build_list(Resource::Alarms, columns(), &list)?;
            if active {
                controller.set_filter("active", Some("true".into()));
            }
            if let Some(severity) = severity {
                controller.set_filter("severity", Some(severity));
            }
            if let Some(device) = device {
                controller.set_filter("device_id", Some(device.to_string()));
            }
            // Filters reset the page; restore the requested one.
            controller.set_page(list.page.saturating_sub(1));

            if export {
                let bytes = console.export_csv(ExportResource::Alarms, &controller).await?;
                let path = util::export_filename("alarms");
                return util::write_download(&path, &bytes, global.quiet);
            }

            let page = console.list_alarms(&controller).await?;
            let out = output::render_page(
                &global.output,
                &controller,
                &page.rows,
                page.total,
                cell,
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlarmsCommand::Counts { watch, interval } => {
            if watch {
                return watch_counts(session, Duration::from_secs(interval.max(1)), global).await;
            }
            let counts = console.alarm_counts().await?;
            let color = output::should_color(&global.color);
            output::print_output(&counts_line(&counts, color), global.quiet);
            Ok(())
        }

        AlarmsCommand::Ack { id } => {
            let alarm = console.acknowledge_alarm(id).await?;
            if !global.quiet {
                eprintln!(
                    "Acknowledged alarm {} ({} {})",
                    alarm.id, alarm.severity, alarm.condition_type
                );
            }
            Ok(())
        }

        AlarmsCommand::Close { id } => {
            let alarm = console.close_alarm(id).await?;
            if !global.quiet {
                eprintln!(
                    "Closed alarm {} ({} {})",
                    alarm.id, alarm.severity, alarm.condition_type
                );
            }
            Ok(())
        }
    }
}

fn counts_line(counts: &AlarmCounts, color: bool) -> String {
    use owo_colors::OwoColorize;

    let labels = if color {
        (
            "critical".red().to_string(),
            "major".yellow().to_string(),
            "minor".cyan().to_string(),
            "normal".to_string(),
        )
    } else {
        (
            "critical".to_owned(),
            "major".to_owned(),
            "minor".to_owned(),
            "normal".to_owned(),
        )
    };
    format!(
        "{} {}  {} {}  {} {}  {} {}  (total {})",
        labels.0,
        counts.critical,
        labels.1,
        counts.major,
        labels.2,
        counts.minor,
        labels.3,
        counts.normal,
        counts.total()
    )
}

/// Poll alarm counts and reprint whenever they change, until Ctrl-C.
async fn watch_counts(
    session: &Session,
    interval: Duration,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let poller = AlarmPoller::spawn(Arc::clone(&session.console), interval);
    let mut rx = poller.counts();
    let color = output::should_color(&global.color);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let counts = *rx.borrow_and_update();
                output::print_output(&counts_line(&counts, color), global.quiet);
            }
        }
    }

    poller.shutdown().await;
    Ok(())
}
