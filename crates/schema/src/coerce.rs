//! Type coercion table for property writes.
//!
//! String input is converted according to the property's declared type, the
//! same table serving config defaults, CLI assignments, and programmatic
//! writes. Typed input is accepted as-is when it already matches.

use chrono::{DateTime, NaiveDate};
use roster_primitives::{PropertyType, PropertyValue};

use crate::CoercionError;


/// Coerce a written value to the declared type of `property`.
pub fn coerce_value(
	property: &str,
	ty: PropertyType,
	value: PropertyValue,
) -> Result<PropertyValue, CoercionError> {
	match value {
		PropertyValue::String(raw) => coerce_str(property, ty, &raw),
		other if other.matches_type(ty) => Ok(other),
		other => Err(CoercionError::TypeMismatch {
			property: property.to_string(),
			expected: ty,
			got: other.type_name(),
		}),
	}
}

/// Parse a string into a [`PropertyValue`] of the given type.
pub fn coerce_str(property: &str, ty: PropertyType, raw: &str) -> Result<PropertyValue, CoercionError> {
	parse_for_type(raw, ty).map_err(|reason| CoercionError::InvalidValue {
		property: property.to_string(),
		reason,
	})
}

fn parse_for_type(raw: &str, ty: PropertyType) -> Result<PropertyValue, String> {
	match ty {
		PropertyType::String => Ok(PropertyValue::String(raw.to_string())),
		PropertyType::Text => Ok(PropertyValue::String(normalize_text(raw))),
		PropertyType::Boolean => parse_bool(raw).map(PropertyValue::Bool),
		PropertyType::Int => parse_int(raw).map(PropertyValue::Int),
		PropertyType::Float => parse_float(raw).map(PropertyValue::Float),
		PropertyType::Date => parse_date(raw).map(PropertyValue::Date),
		PropertyType::Lines => Ok(PropertyValue::Lines(split_lines(raw))),
		PropertyType::Tokens => Ok(PropertyValue::Lines(
			raw.split_whitespace().map(str::to_string).collect(),
		)),
	}
}

/// Parse a boolean from common string representations.
///
/// An empty string is `false`, matching an unchecked form field.
pub fn parse_bool(raw: &str) -> Result<bool, String> {
	match raw.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"" | "false" | "0" | "no" | "off" => Ok(false),
		_ => Err(format!(
			"invalid boolean: '{raw}' (expected true/false, yes/no, on/off, 1/0)"
		)),
	}
}

/// Parse an integer.
pub fn parse_int(raw: &str) -> Result<i64, String> {
	raw.trim()
		.parse::<i64>()
		.map_err(|_| format!("invalid integer: '{raw}'"))
}

/// Parse a floating point number.
pub fn parse_float(raw: &str) -> Result<f64, String> {
	raw.trim()
		.parse::<f64>()
		.map_err(|_| format!("invalid float: '{raw}'"))
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, and RFC 3339 timestamps (the date part
/// in the timestamp's own offset is kept).
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
	let trimmed = raw.trim();
	for format in ["%Y-%m-%d", "%Y/%m/%d"] {
		if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
			return Ok(date);
		}
	}
	DateTime::parse_from_rfc3339(trimmed)
		.map(|ts| ts.date_naive())
		.map_err(|_| format!("invalid date: '{raw}' (expected YYYY-MM-DD, YYYY/MM/DD, or RFC 3339)"))
}

fn normalize_text(raw: &str) -> String {
	raw.replace("\r\n", "\n").replace('\r', "\n")
}

fn split_lines(raw: &str) -> Vec<String> {
	normalize_text(raw)
		.lines()
		.map(str::trim_end)
		.filter(|line| !line.is_empty())
		.map(str::to_string)
		.collect()
}
