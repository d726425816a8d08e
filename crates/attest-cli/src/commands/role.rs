//! `attest role` — Show or set the current identity's role mapping.

use clap::Args;

use attest_core::{Role, RoleRecord};
use attest_store::RoleDirectory;

use crate::config::AttestConfig;

#[derive(Args, Debug)]
pub struct RoleArgs {
    /// Set the role: subject or verifier.
    #[arg(long, value_parser = parse_role)]
    pub set: Option<Role>,

    /// Display name to record with the role.
    #[arg(long)]
    pub name: Option<String>,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    match raw.to_ascii_lowercase().as_str() {
        "subject" => Ok(Role::Subject),
        "verifier" => Ok(Role::Verifier),
        other => Err(format!("unknown role '{}' (subject or verifier)", other)),
    }
}

pub fn run(args: &RoleArgs, config: &AttestConfig) -> anyhow::Result<()> {
    let repo = super::open_repository(config)?;
    let roles = RoleDirectory::new(repo);
    let identity = &config.identity.name;

    if let Some(role) = args.set {
        let record = RoleRecord {
            role,
            display_name: args.name.clone().unwrap_or_else(|| identity.clone()),
        };
        roles.set(identity, &record)?;
        println!("{} is now a {} ({})", identity, record.role, record.display_name);
        return Ok(());
    }

    match roles.get(identity)? {
        Some(record) => {
            println!("{}: {} ({})", identity, record.role, record.display_name)
        }
        None => println!("{}: no role recorded", identity),
    }
    Ok(())
}
