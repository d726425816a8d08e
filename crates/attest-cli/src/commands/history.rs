//! `attest history` — List the current identity's issued proofs.

use clap::Args;

use attest_store::ProofStore;

use crate::config::AttestConfig;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Print full records as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &HistoryArgs, config: &AttestConfig) -> anyhow::Result<()> {
    let repo = super::open_repository(config)?;
    let store = ProofStore::new(repo, &config.identity.name);
    let history = store.history()?;

    if history.is_empty() {
        println!("No proofs issued yet.");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    for proof in &history {
        println!(
            "{}  {}  issued {}  age={} address={} identity={}",
            proof.id,
            proof.kind.type_tag(),
            proof.created_at.format("%Y-%m-%d %H:%M:%S"),
            proof.selection.age,
            proof.selection.address,
            proof.selection.identity_valid,
        );
    }
    Ok(())
}
