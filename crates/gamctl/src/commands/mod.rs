//! Command dispatch: bridges CLI args -> console operations -> output.

pub mod alarms;
pub mod backups;
pub mod bandwidths;
pub mod config_cmd;
pub mod devices;
pub mod firmware;
pub mod session;
pub mod subscribers;
pub mod users;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => session::login(session, args, global).await,
        Command::Logout => session::logout(session, global).await,
        Command::Devices(args) => devices::handle(session, args, global).await,
        Command::Subscribers(args) => subscribers::handle(session, args, global).await,
        Command::Bandwidths(args) => bandwidths::handle(session, args, global).await,
        Command::Alarms(args) => alarms::handle(session, args, global).await,
        Command::Users(args) => users::handle(session, args, global).await,
        Command::Firmware(args) => firmware::handle(session, args, global).await,
        Command::Backups(args) => backups::handle(session, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
