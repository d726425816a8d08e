//! `attest log` — Show the verification audit trail.

use clap::Args;

use attest_store::VerificationLog;

use crate::config::AttestConfig;

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Show at most this many entries.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

pub fn run(args: &LogArgs, config: &AttestConfig) -> anyhow::Result<()> {
    let repo = super::open_repository(config)?;
    let log = VerificationLog::new(repo);
    let entries = log.entries()?;

    if entries.is_empty() {
        println!("No verifications logged yet.");
        return Ok(());
    }

    for entry in entries.iter().take(args.limit) {
        println!(
            "{}  {}  {}  {}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.proof_id,
            if entry.verified { "VERIFIED" } else { "FAILED" },
            entry.trust_tier,
            entry.latency_label,
        );
    }
    Ok(())
}
