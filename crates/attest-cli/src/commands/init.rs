//! `attest init` — Write a default configuration file.

use clap::Args;
use std::path::Path;

use crate::config::AttestConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, path: &Path) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!(
            "config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = AttestConfig::default();
    config.save(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
