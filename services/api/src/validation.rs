//! Input validation utilities
//!
//! Each rule returns `Err(message)` on failure. Entity validators run the
//! rules field by field and gather the failures into [`FieldErrors`], which is
//! rendered as `{"field": ["message", ...]}`.
//!
//! Request types hold raw JSON values so that a wrongly typed field is
//! reported against that field instead of failing the whole body. Fields are
//! deserialized with [`present`], which keeps an explicit `null` apart from
//! an absent key.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const NULL: &str = "This field may not be null.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";

/// Use as `#[serde(default, deserialize_with = "present")]`
///
/// An absent key stays `None` through `default`; any present value, `null`
/// included, becomes `Some`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Field name to error messages, sorted by field name
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record the outcome of a rule, keeping the value on success
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Value must be present
pub fn required<T>(value: Option<T>) -> Result<T, String> {
    value.ok_or_else(|| REQUIRED.to_string())
}

/// Present values must not be `null`
pub fn non_null(value: Value) -> Result<Value, String> {
    if value.is_null() {
        return Err(NULL.to_string());
    }
    Ok(value)
}

/// Strings are trimmed; numbers are taken as their decimal text
pub fn text(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(INVALID_STRING.to_string()),
    }
}

/// Required, non-null text that is not empty after trimming
pub fn required_text(value: Option<Value>) -> Result<String, String> {
    let value = text(non_null(required(value)?)?)?;
    if value.is_empty() {
        return Err(BLANK.to_string());
    }
    Ok(value)
}

/// Optional text column that may be blank but not null; absent is empty
pub fn optional_text(value: Option<Value>) -> Result<String, String> {
    match value {
        None => Ok(String::new()),
        Some(value) => text(non_null(value)?),
    }
}

/// Nullable text column; absent and `null` are both `None`
pub fn nullable_text(value: Option<Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => text(value).map(Some),
    }
}

/// At least `min` characters
pub fn min_chars(value: &str, min: usize) -> Result<(), String> {
    if value.chars().count() < min {
        return Err(format!(
            "Ensure this field has at least {} characters.",
            min
        ));
    }
    Ok(())
}

/// At most `max` characters
pub fn max_chars(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            max
        ));
    }
    Ok(())
}

/// Value must fit a 32-bit integer column
pub fn int32(value: i64) -> Result<i32, String> {
    if value > i64::from(i32::MAX) {
        return Err(format!(
            "Ensure this value is less than or equal to {}.",
            i32::MAX
        ));
    }
    if value < i64::from(i32::MIN) {
        return Err(format!(
            "Ensure this value is greater than or equal to {}.",
            i32::MIN
        ));
    }
    Ok(value as i32)
}

/// Integral JSON number or numeric string
pub fn integer(value: &Value) -> Result<i64, String> {
    let invalid = || INVALID_INTEGER.to_string();
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.as_u64().is_some() {
                Ok(i64::MAX)
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
                    .ok_or_else(invalid)
            }
        }
        Value::String(s) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Required, non-null integer that fits a 32-bit column
pub fn required_int32(value: Option<Value>) -> Result<i32, String> {
    let value = non_null(required(value)?)?;
    int32(integer(&value)?)
}

/// Nullable integer that fits a 32-bit column; absent and `null` are `None`
pub fn nullable_int32(value: Option<Value>) -> Result<Option<i32>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => int32(integer(&value)?).map(Some),
    }
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    max_chars(username, 150)?;

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[\w.@+-]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.".to_string());
    }

    Ok(())
}

/// Validate email; an empty address is allowed
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Ok(());
    }

    max_chars(email, 254)?;

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Enter a valid email address.".to_string());
    }

    Ok(())
}
