//! Subcommand handlers. Output goes to the given writer.

use std::io::Write;

use anyhow::{Context, Result, bail};
use roster_memberdata::{IdentityKey, IdentityProvider, MemberDataTool, PropertyValue, SecurityProfile};

use crate::cli::Command;

pub fn run(tool: &MemberDataTool, command: Command, out: &mut impl Write) -> Result<()> {
	match command {
		Command::Stats => stats(tool, out),
		Command::Search { field, term } => search(tool, &field, &term, out),
		Command::Prune => prune(tool, out),
		Command::Show { key } => show(tool, &IdentityKey::new(key), out),
		Command::Set { key, assignments } => set(tool, &IdentityKey::new(key), assignments, out),
		Command::Security { key, declarations } => security(tool, &IdentityKey::new(key), declarations, out),
		Command::Properties => properties(tool, out),
	}
}

fn stats(tool: &MemberDataTool, out: &mut impl Write) -> Result<()> {
	let stats = tool.stats().context("failed to count records")?;
	writeln!(out, "total: {}", stats.total)?;
	writeln!(out, "orphaned: {}", stats.orphaned)?;
	Ok(())
}

fn search(tool: &MemberDataTool, field: &str, term: &str, out: &mut impl Write) -> Result<()> {
	let hits = tool.search(field, term).with_context(|| format!("search on '{field}' failed"))?;
	for hit in hits {
		writeln!(out, "{}\t{}\t{}", hit.key, inline(&hit.value), hit.email)?;
	}
	Ok(())
}

fn prune(tool: &MemberDataTool, out: &mut impl Write) -> Result<()> {
	let removed = tool.prune().context("prune failed")?;
	writeln!(out, "removed {removed} record(s)")?;
	Ok(())
}

fn show(tool: &MemberDataTool, key: &IdentityKey, out: &mut impl Write) -> Result<()> {
	let view = tool.view(key).with_context(|| format!("cannot show '{key}'"))?;
	writeln!(out, "key: {}", view.key())?;
	writeln!(out, "state: {:?}", view.record().lifecycle())?;
	writeln!(out, "roles: {}", view.roles().join(", "))?;
	writeln!(out, "domains: {}", view.domains().join(", "))?;
	for (name, value) in view.properties()? {
		writeln!(out, "{name} = {}", inline(&value))?;
	}
	Ok(())
}

fn set(tool: &MemberDataTool, key: &IdentityKey, assignments: Vec<(String, String)>, out: &mut impl Write) -> Result<()> {
	if tool.provider().lookup(key).is_none() {
		bail!("no identity '{key}'");
	}
	let record = tool.get_or_create(key)?;
	let report = tool
		.set_properties(&record, assignments)
		.with_context(|| format!("cannot write properties of '{key}'"))?;

	for name in &report.applied {
		writeln!(out, "set {name}")?;
	}
	for name in &report.ignored {
		writeln!(out, "ignored {name}")?;
	}
	if !report.is_complete() {
		let rejected: Vec<String> = report.rejected.iter().map(ToString::to_string).collect();
		bail!("rejected: {}", rejected.join("; "));
	}
	Ok(())
}

fn security(tool: &MemberDataTool, key: &IdentityKey, declarations: Vec<String>, out: &mut impl Write) -> Result<()> {
	let profile = SecurityProfile::from_declarations(declarations)?;
	let record = tool.get_or_create(key)?;
	tool.set_security_profile(&record, profile)
		.with_context(|| format!("cannot update security profile of '{key}'"))?;

	let view = tool.view(key)?;
	writeln!(out, "roles: {}", view.roles().join(", "))?;
	writeln!(out, "domains: {}", view.domains().join(", "))?;
	writeln!(out, "password: {}", if view.credential_hash().is_some() { "set" } else { "unset" })?;
	Ok(())
}

fn properties(tool: &MemberDataTool, out: &mut impl Write) -> Result<()> {
	let schema = tool.schema();
	for def in schema.iter() {
		writeln!(out, "{}\t{}\t{}", def.name, def.value_type, inline(&def.default))?;
	}
	Ok(())
}

/// Single-line form of a value; line lists are comma-joined.
fn inline(value: &PropertyValue) -> String {
	match value {
		PropertyValue::Lines(lines) => lines.join(", "),
		other => other.to_string(),
	}
}
