//! Validation rules for alert input.
//!
//! The request handler and [`NewAlert::new`] both go through the field
//! rules below, so "what is a valid alert" lives in one place.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Condition, NewAlert};

pub const COMMODITY_ID: &str = "commodityId";
pub const MANDI_ID: &str = "mandiId";
pub const TARGET_PRICE: &str = "targetPrice";
pub const CONDITION: &str = "condition";

/// Body of a 400 response: `{ "message": ..., "field": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, field: Option<&str>) -> Self {
        ValidationError {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }

    fn at(field: &str, message: impl Into<String>) -> Self {
        ValidationError::new(message, Some(field))
    }
}

/// Validates a decoded JSON body and builds the alert input from it.
///
/// Fields are checked in declaration order and the first failure wins.
/// Unknown keys (`id`, `createdAt`, anything else) are ignored.
pub fn parse_new_alert(body: &Value) -> Result<NewAlert, ValidationError> {
    let Some(obj) = body.as_object() else {
        return Err(ValidationError::new(
            format!("Expected object, received {}", type_name(body)),
            None,
        ));
    };

    let commodity_id = required_string(obj, COMMODITY_ID)?;
    let mandi_id = required_string(obj, MANDI_ID)?;
    let target_price = required_integer(obj, TARGET_PRICE)?;
    let condition = match required(obj, CONDITION)? {
        Value::String(s) => parse_condition(s)?,
        other => return Err(type_mismatch(CONDITION, "string", other)),
    };

    NewAlert::new(commodity_id, mandi_id, target_price, condition)
}

/// Rules that apply to an already-typed alert input.
pub(crate) fn check(alert: &NewAlert) -> Result<(), ValidationError> {
    non_empty(COMMODITY_ID, alert.commodity_id())?;
    non_empty(MANDI_ID, alert.mandi_id())?;
    Ok(())
}

pub fn parse_condition(raw: &str) -> Result<Condition, ValidationError> {
    Condition::ALL
        .into_iter()
        .find(|c| c.as_str() == raw)
        .ok_or_else(|| {
            ValidationError::at(
                CONDITION,
                format!("Invalid enum value. Expected 'Above' | 'Below', received '{raw}'"),
            )
        })
}

fn non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::at(
            field,
            "String must contain at least 1 character(s)",
        ));
    }
    Ok(())
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::at(field, "Required")),
        Some(v) => Ok(v),
    }
}

fn required_string(obj: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    match required(obj, field)? {
        Value::String(s) => {
            non_empty(field, s)?;
            Ok(s.clone())
        }
        other => Err(type_mismatch(field, "string", other)),
    }
}

fn required_integer(obj: &Map<String, Value>, field: &str) -> Result<i64, ValidationError> {
    let n = match required(obj, field)? {
        Value::Number(n) => n,
        other => return Err(type_mismatch(field, "number", other)),
    };

    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if n.is_u64() {
        return Err(ValidationError::at(
            field,
            format!("Number must be less than or equal to {}", i64::MAX),
        ));
    }

    // 2300.0 is still an integer
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(ValidationError::at(field, "Expected integer, received float")),
    }
}

fn type_mismatch(field: &str, expected: &str, got: &Value) -> ValidationError {
    ValidationError::at(
        field,
        format!("Expected {expected}, received {}", type_name(got)),
    )
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
