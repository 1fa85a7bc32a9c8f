//! Operator account command handlers.

use gam_api::types::{UserCreate, UserUpdate};
use gam_core::model::User;
use gam_core::{ColumnSpec, Resource};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "ID"),
        ColumnSpec::new("username", "Username"),
        ColumnSpec::new("privilege", "Privilege"),
        ColumnSpec::new("enabled", "Enabled"),
        ColumnSpec::hidden("timeout", "Session timeout"),
    ]
}

fn cell(user: &User, column: &str) -> String {
    match column {
        "id" => user.id.to_string(),
        "username" => user.username.clone(),
        "privilege" => user.privilege.to_string(),
        "enabled" => util::yes_no(user.enabled),
        "timeout" => user
            .session_timeout_secs
            .map_or_else(|| "-".into(), |t| format!("{t}s")),
        _ => String::new(),
    }
}

pub async fn handle(
    session: &Session,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let console = &session.console;
    match args.command {
        UsersCommand::List { list } => {
            let controller = util::build_list(Resource::Users, columns(), &list)?;
            let page = console.list_users(&controller).await?;
            let out = output::render_page(
                &global.output,
                &controller,
                &page.rows,
                page.total,
                cell,
                |u| u.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Show { id } => {
            let user = console.user(id).await?;
            let out = output::render_single(&global.output, user.as_ref(), user_detail, |u| {
                u.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Add {
            username,
            privilege,
            session_timeout,
            disabled,
        } => {
            if privilege > User::MAX_PRIVILEGE {
                return Err(CliError::Validation {
                    field: "privilege".into(),
                    reason: format!("must be 0-{}", User::MAX_PRIVILEGE),
                });
            }
            let password = util::prompt_password("Password for the new account")?;
            let create = UserCreate {
                username,
                password,
                privilege,
                enabled: !disabled,
                session_timeout_secs: session_timeout,
            };
            let user = console.create_user(&create).await?;
            if !global.quiet {
                eprintln!("Created account {} (privilege {})", user.username, user.privilege);
            }
            Ok(())
        }

        UsersCommand::Set {
            id,
            privilege,
            enabled,
            session_timeout,
            password,
        } => {
            if let Some(p) = privilege {
                if p > User::MAX_PRIVILEGE {
                    return Err(CliError::Validation {
                        field: "privilege".into(),
                        reason: format!("must be 0-{}", User::MAX_PRIVILEGE),
                    });
                }
            }
            let new_password = if password {
                Some(util::prompt_password("New password")?)
            } else {
                None
            };
            let update = UserUpdate {
                password: new_password,
                privilege,
                enabled,
                session_timeout_secs: session_timeout,
            };
            let user = console.update_user(id, &update).await?;
            if !global.quiet {
                eprintln!("Updated account {}", user.username);
            }
            Ok(())
        }

        UsersCommand::Remove { id } => {
            let user = console.user(id).await?;
            let prompt = format!("Remove account {}?", user.username);
            if !util::confirm("users remove", &prompt, global.yes)? {
                return Ok(());
            }
            console.delete_user(id).await?;
            if !global.quiet {
                eprintln!("Account removed");
            }
            Ok(())
        }
    }
}

fn user_detail(user: &User) -> String {
    [
        format!("Username:  {}", user.username),
        format!("ID:        {}", user.id),
        format!(
            "Privilege: {}{}",
            user.privilege,
            if user.is_admin() { " (admin)" } else { "" }
        ),
        format!("Enabled:   {}", util::yes_no(user.enabled)),
        format!(
            "Timeout:   {}",
            user.session_timeout_secs
                .map_or_else(|| "-".into(), |t| format!("{t}s"))
        ),
    ]
    .join("\n")
}
