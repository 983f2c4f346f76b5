//! `roster` administration binary.
//!
//! Identities come from the `[[identity]]` tables of the configuration file;
//! member records live in a postcard snapshot on disk.

mod cli;
mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use roster_config::RosterConfig;
use roster_memberdata::MemberDataTool;
use roster_store::FileRecordStore;
use tracing::{debug, info};

use crate::cli::Cli;

fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let config = RosterConfig::load_or_default(cli.config.as_deref()).context("failed to load configuration")?;
	let store_path = resolve_store_path(cli.store, &config)?;

	if let Some(parent) = store_path.parent()
		&& !parent.as_os_str().is_empty()
		&& !parent.exists()
	{
		std::fs::create_dir_all(parent).with_context(|| format!("cannot create {}", parent.display()))?;
	}

	info!(store = %store_path.display(), "opening record store");
	let store = FileRecordStore::open(&store_path).with_context(|| format!("cannot open {}", store_path.display()))?;
	let provider = config.provider().context("invalid identity configuration")?;
	let schema = config.schema().context("invalid property configuration")?;
	debug!(identities = provider.len(), properties = schema.len(), "configuration applied");

	let tool = MemberDataTool::new(Arc::new(provider), Arc::new(store)).with_schema(schema);

	let stdout = std::io::stdout();
	commands::run(&tool, cli.command, &mut stdout.lock())
}

fn resolve_store_path(flag: Option<PathBuf>, config: &RosterConfig) -> Result<PathBuf> {
	flag.or_else(|| config.store_path())
		.or_else(roster_config::default_store_path)
		.context("no record store path configured and no data directory available")
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("ROSTER_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("roster=debug,roster_memberdata=debug,info")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
