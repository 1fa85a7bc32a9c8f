//! Local configuration commands. These never touch the server.

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;

use super::util;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(),
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
        ConfigCommand::SetPassword => set_password(global),
        ConfigCommand::Profiles => profiles(),
    }
}

/// Interactively create or update a profile.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();

    let name: String = Input::new()
        .with_prompt("Profile name")
        .default(
            global
                .profile
                .clone()
                .unwrap_or_else(|| "default".to_owned()),
        )
        .interact_text()
        .map_err(io_err)?;

    let existing = cfg.profiles.get(&name);
    let server: String = Input::new()
        .with_prompt("Management server URL")
        .with_initial_text(existing.map(|p| p.server.clone()).unwrap_or_default())
        .interact_text()
        .map_err(io_err)?;
    let username: String = Input::new()
        .with_prompt("Username (empty to skip)")
        .allow_empty(true)
        .with_initial_text(
            existing
                .and_then(|p| p.username.clone())
                .unwrap_or_default(),
        )
        .interact_text()
        .map_err(io_err)?;

    let store_keyring = Confirm::new()
        .with_prompt("Store the password in the system keyring?")
        .default(false)
        .interact()
        .map_err(io_err)?;
    if store_keyring {
        let password = util::prompt_password("Password")?;
        config::store_password(&name, &password)?;
    }

    cfg.profiles.insert(
        name.clone(),
        Profile {
            server,
            username: (!username.is_empty()).then_some(username),
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        },
    );
    if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
        cfg.default_profile = Some(name.clone());
    }
    config::save_config(&cfg)?;

    eprintln!(
        "Profile '{name}' saved to {}",
        config::config_path().display()
    );
    Ok(())
}

/// Print the effective configuration, with secrets redacted.
fn show() -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("<redacted>".to_owned());
        }
    }
    let rendered = toml::to_string_pretty(&cfg)
        .map_err(|e| CliError::from(gam_config::ConfigError::Serialization(e)))?;
    print!("{rendered}");
    Ok(())
}

fn set_password(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let name = config::active_profile_name(global, &cfg);
    let password = util::prompt_password(&format!("Password for profile '{name}'"))?;
    config::store_password(&name, &password)?;
    eprintln!("Password stored in the system keyring for '{name}'");
    Ok(())
}

fn profiles() -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    if cfg.profiles.is_empty() {
        eprintln!("No profiles configured. Create one with: gamctl config init");
        return Ok(());
    }
    let default = cfg.default_profile.as_deref();
    let mut names: Vec<_> = cfg.profiles.iter().collect();
    names.sort_by_key(|(name, _)| name.as_str());
    for (name, profile) in names {
        let marker = if Some(name.as_str()) == default {
            " (default)"
        } else {
            ""
        };
        println!("{name}{marker}\t{}", profile.server);
    }
    Ok(())
}

fn io_err(e: dialoguer::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}
