use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Inspect and maintain member data")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to the platform config directory)
	#[arg(short, long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Record store snapshot, overriding the configured path
	#[arg(short, long, value_name = "PATH", global = true)]
	pub store: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Count stored records and those without an identity
	Stats,
	/// Find stored records whose field contains a term
	Search {
		/// Property name, or `id`/`username` for the key
		field: String,
		/// Case-sensitive substring
		term: String,
	},
	/// Delete stored records whose identity no longer exists
	Prune,
	/// Print a member's identity and resolved properties
	Show {
		/// Identity key
		key: String,
	},
	/// Write member properties
	Set {
		/// Identity key
		key: String,
		/// Assignments of the form `name=value`
		#[arg(required = true, value_parser = parse_assignment)]
		assignments: Vec<(String, String)>,
	},
	/// Update a member's password, roles or domains
	Security {
		/// Identity key
		key: String,
		/// Declarations such as `roles=Member,Reviewer` or `password=...`
		#[arg(required = true)]
		declarations: Vec<String>,
	},
	/// List the property schema
	Properties,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
	let (name, value) = raw
		.split_once('=')
		.ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
	let name = name.trim();
	if name.is_empty() {
		return Err(format!("missing property name in '{raw}'"));
	}
	Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
	use clap::Parser;

	use super::*;

	#[test]
	fn parses_assignments() {
		let cli = Cli::try_parse_from(["roster", "set", "jdoe", "email=j@x.com", "note=a=b"]).unwrap();
		assert_eq!(
			cli.command,
			Command::Set {
				key: "jdoe".into(),
				assignments: vec![
					("email".into(), "j@x.com".into()),
					("note".into(), "a=b".into()),
				],
			}
		);
	}

	#[test]
	fn rejects_assignment_without_name() {
		assert!(Cli::try_parse_from(["roster", "set", "jdoe", "=x"]).is_err());
		assert!(Cli::try_parse_from(["roster", "set", "jdoe", "email"]).is_err());
	}

	#[test]
	fn global_flags_follow_subcommand() {
		let cli = Cli::try_parse_from(["roster", "stats", "-v", "--config", "/tmp/r.toml"]).unwrap();
		assert!(cli.verbose);
		assert_eq!(cli.config, Some(PathBuf::from("/tmp/r.toml")));
		assert_eq!(cli.command, Command::Stats);
	}
}
