use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};


/// The value of a member property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
	/// String value, also used for `text` properties.
	String(String),
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// Calendar date.
	Date(NaiveDate),
	/// Sequence of strings, used for `lines` and `tokens` properties.
	Lines(Vec<String>),
}

impl PropertyValue {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			PropertyValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			PropertyValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			PropertyValue::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			PropertyValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the date if this is a `Date` variant.
	pub fn as_date(&self) -> Option<NaiveDate> {
		match self {
			PropertyValue::Date(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the lines if this is a `Lines` variant.
	pub fn as_lines(&self) -> Option<&[String]> {
		match self {
			PropertyValue::Lines(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the provider-style truthiness of the value.
	///
	/// Empty strings, empty line lists, zero, and `false` are falsy. Dates are
	/// always truthy.
	pub fn is_truthy(&self) -> bool {
		match self {
			PropertyValue::String(v) => !v.is_empty(),
			PropertyValue::Bool(v) => *v,
			PropertyValue::Int(v) => *v != 0,
			PropertyValue::Float(v) => *v != 0.0,
			PropertyValue::Date(_) => true,
			PropertyValue::Lines(v) => !v.is_empty(),
		}
	}

	/// Returns true if this value can be stored under the given type.
	pub fn matches_type(&self, ty: PropertyType) -> bool {
		matches!(
			(self, ty),
			(PropertyValue::String(_), PropertyType::String | PropertyType::Text)
				| (PropertyValue::Bool(_), PropertyType::Boolean)
				| (PropertyValue::Int(_), PropertyType::Int)
				| (PropertyValue::Float(_), PropertyType::Float)
				| (PropertyValue::Date(_), PropertyType::Date)
				| (PropertyValue::Lines(_), PropertyType::Lines | PropertyType::Tokens)
		)
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			PropertyValue::String(_) => "string",
			PropertyValue::Bool(_) => "boolean",
			PropertyValue::Int(_) => "int",
			PropertyValue::Float(_) => "float",
			PropertyValue::Date(_) => "date",
			PropertyValue::Lines(_) => "lines",
		}
	}
}

/// Textual form used for substring search and display.
///
/// Lines are joined with `\n`; dates use `YYYY-MM-DD`.
impl fmt::Display for PropertyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PropertyValue::String(v) => f.write_str(v),
			PropertyValue::Bool(v) => write!(f, "{v}"),
			PropertyValue::Int(v) => write!(f, "{v}"),
			PropertyValue::Float(v) => write!(f, "{v}"),
			PropertyValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
			PropertyValue::Lines(v) => f.write_str(&v.join("\n")),
		}
	}
}

impl From<bool> for PropertyValue {
	fn from(v: bool) -> Self {
		PropertyValue::Bool(v)
	}
}

impl From<i64> for PropertyValue {
	fn from(v: i64) -> Self {
		PropertyValue::Int(v)
	}
}

impl From<f64> for PropertyValue {
	fn from(v: f64) -> Self {
		PropertyValue::Float(v)
	}
}

impl From<String> for PropertyValue {
	fn from(v: String) -> Self {
		PropertyValue::String(v)
	}
}

impl From<&str> for PropertyValue {
	fn from(v: &str) -> Self {
		PropertyValue::String(v.to_string())
	}
}

impl From<NaiveDate> for PropertyValue {
	fn from(v: NaiveDate) -> Self {
		PropertyValue::Date(v)
	}
}

impl From<Vec<String>> for PropertyValue {
	fn from(v: Vec<String>) -> Self {
		PropertyValue::Lines(v)
	}
}

/// The declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
	/// Single-line string.
	String,
	/// Multi-line string with normalised line endings.
	Text,
	/// Boolean flag.
	Boolean,
	/// Signed integer.
	Int,
	/// Floating point number.
	Float,
	/// Calendar date.
	Date,
	/// One entry per line.
	Lines,
	/// One entry per whitespace-separated token.
	Tokens,
}

impl PropertyType {
	/// All declared types, in table order.
	pub const ALL: [PropertyType; 8] = [
		PropertyType::String,
		PropertyType::Text,
		PropertyType::Boolean,
		PropertyType::Int,
		PropertyType::Float,
		PropertyType::Date,
		PropertyType::Lines,
		PropertyType::Tokens,
	];

	/// Returns the lowercase name of the type.
	pub fn name(self) -> &'static str {
		match self {
			PropertyType::String => "string",
			PropertyType::Text => "text",
			PropertyType::Boolean => "boolean",
			PropertyType::Int => "int",
			PropertyType::Float => "float",
			PropertyType::Date => "date",
			PropertyType::Lines => "lines",
			PropertyType::Tokens => "tokens",
		}
	}

	/// Looks a type up by its lowercase name.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|ty| ty.name() == name)
	}
}

impl fmt::Display for PropertyType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
