//! Login and logout handlers.

use secrecy::SecretString;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{self, Session};
use crate::error::CliError;

use super::util;

/// Log in and persist the session id for later invocations.
pub async fn login(
    session: &Session,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile = cfg.profiles.get(&session.profile_name);

    // Username: flag > profile > GAM_USERNAME.
    let username = args
        .username
        .or_else(|| profile.and_then(|p| p.username.clone()))
        .or_else(|| std::env::var("GAM_USERNAME").ok())
        .ok_or_else(|| CliError::NoCredentials {
            profile: session.profile_name.clone(),
        })?;

    // Password: the configured chain, falling back to a prompt.
    let password = match profile {
        Some(profile) => match config::resolve_credentials(profile, &session.profile_name) {
            Ok((_, password)) => password,
            Err(gam_config::ConfigError::NoCredentials { .. }) => prompt_password()?,
            Err(e) => return Err(e.into()),
        },
        None => match std::env::var("GAM_PASSWORD") {
            Ok(pw) => SecretString::from(pw),
            Err(_) => prompt_password()?,
        },
    };

    let user = session.console.login(&username, &password).await?;
    config::persist_session(session, &user.username)?;

    if !global.quiet {
        eprintln!(
            "Logged in to {} as {} (privilege {})",
            session.server, user.username, user.privilege
        );
    }
    Ok(())
}

fn prompt_password() -> Result<SecretString, CliError> {
    Ok(SecretString::from(util::prompt_password("Password")?))
}

/// End the session server-side and drop the persisted session file.
pub async fn logout(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    // Clear the persisted file even if the server call fails; keeping a
    // dead session id around helps nobody.
    let result = if session.console.session().has_session() {
        session.console.logout().await.map_err(CliError::from)
    } else {
        Ok(())
    };
    config::clear_session(&session.profile_name)?;

    if result.is_ok() && !global.quiet {
        eprintln!("Logged out");
    }
    result
}
