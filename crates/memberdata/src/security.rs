use crate::{MemberDataError, Result};


/// Partial update of an identity's security profile.
///
/// Every field is optional; `None` leaves that part of the identity untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityProfile {
	pub password: Option<String>,
	pub roles: Option<Vec<String>>,
	pub domains: Option<Vec<String>>,
}

impl SecurityProfile {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn password(mut self, password: impl Into<String>) -> Self {
		self.password = Some(password.into());
		self
	}

	pub fn roles<I, S>(mut self, roles: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.roles = Some(roles.into_iter().map(Into::into).collect());
		self
	}

	pub fn domains<I, S>(mut self, domains: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.domains = Some(domains.into_iter().map(Into::into).collect());
		self
	}

	/// Returns true if no field would change.
	pub fn is_empty(&self) -> bool {
		self.password.is_none() && self.roles.is_none() && self.domains.is_none()
	}

	/// Parses `field=value` declarations.
	///
	/// Fields are `password`, `roles`, and `domains`; list values are comma
	/// separated and an empty value clears the list. A declaration without `=`,
	/// with an unknown field, or repeating a field is rejected.
	pub fn from_declarations<I, S>(declarations: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut profile = Self::default();
		for declaration in declarations {
			let declaration = declaration.as_ref();
			let (field, value) = declaration
				.split_once('=')
				.ok_or_else(|| invalid(declaration, "missing '=' separator"))?;

			let slot_taken = match field.trim() {
				"password" => profile.password.replace(value.to_string()).is_some(),
				"roles" => profile.roles.replace(split_list(value)).is_some(),
				"domains" => profile.domains.replace(split_list(value)).is_some(),
				_ => return Err(invalid(declaration, "unknown field")),
			};
			if slot_taken {
				return Err(invalid(declaration, "field declared twice"));
			}
		}
		Ok(profile)
	}
}

fn split_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(str::to_string)
		.collect()
}

fn invalid(declaration: &str, reason: &str) -> MemberDataError {
	MemberDataError::InvalidSecurityDeclaration(format!("{declaration:?}: {reason}"))
}
