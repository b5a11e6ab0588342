//! Request validation and response envelopes
//!
//! Pure functions that sit between the raw JSON payload and the classifier:
//! they check the payload shape, turn every element into its canonical string
//! form and wrap the classification with the service identity. The shell only
//! has to move bytes and pick status codes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::{classify, ClassificationResult};

/// Field of the request payload that holds the tokens
pub const DATA_FIELD: &str = "data";

/// Message returned when the payload has no `data` array
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. 'data' should be an array.";

/// Message returned for any unexpected fault
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Value reported by the `GET /bfhl` probe
pub const OPERATION_CODE: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("{}", INVALID_INPUT_MESSAGE)]
    InvalidInputShape,
}

/// Static identity attached to every successful response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub roll_number: String,
}

/// Successful `POST /bfhl` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    pub is_success: bool,
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

/// Failed `POST /bfhl` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEnvelope {
    pub is_success: bool,
    pub message: String,
}

impl FailureEnvelope {
    pub fn invalid_input() -> Self {
        Self {
            is_success: false,
            message: INVALID_INPUT_MESSAGE.to_string(),
        }
    }

    pub fn internal() -> Self {
        Self {
            is_success: false,
            message: INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

/// `GET /bfhl` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCode {
    pub operation_code: u32,
}

impl Default for OperationCode {
    fn default() -> Self {
        Self {
            operation_code: OPERATION_CODE,
        }
    }
}

/// `GET /` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}

pub fn service_info() -> ServiceInfo {
    let endpoints = [
        ("POST /bfhl", "Main processing endpoint"),
        ("GET /bfhl", "Test endpoint"),
    ]
    .into_iter()
    .map(|(route, description)| (route.to_string(), description.to_string()))
    .collect();

    ServiceInfo {
        message: "BFHL API is running!".to_string(),
        endpoints,
    }
}

/// Canonical string form of a single payload element
///
/// Strings pass through untouched. Numbers with an integral value print
/// without a fractional part, so `4.0` becomes "4". Magnitudes of 1e21 and
/// above or below 1e-6 switch to exponent notation ("1e+21"). Arrays join their
/// elements with commas and objects collapse to "[object Object]".
pub fn canonical_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f == 0.0 {
                    "0".to_string()
                } else if !(1e-6..1e21).contains(&f.abs()) {
                    exponent_form(f)
                } else {
                    f.to_string()
                }
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => canonical_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Exponent notation with an explicit sign on positive exponents ("1e+21", "1.5e-7")
fn exponent_form(f: f64) -> String {
    let rendered = format!("{f:e}");

    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => rendered,
    }
}

/// Pull the token sequence out of a request payload
///
/// The payload must be an object whose `data` field is an array. Anything
/// else is rejected before the classifier ever runs.
pub fn extract_tokens(payload: &Value) -> Result<Vec<String>, EnvelopeError> {
    payload
        .get(DATA_FIELD)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(canonical_string).collect())
        .ok_or(EnvelopeError::InvalidInputShape)
}

/// Validate, classify and wrap a request payload
pub fn respond(payload: &Value, identity: &Identity) -> Result<SuccessEnvelope, EnvelopeError> {
    let tokens = extract_tokens(payload)?;

    Ok(success(identity, classify(&tokens)))
}

pub fn success(identity: &Identity, result: ClassificationResult) -> SuccessEnvelope {
    SuccessEnvelope {
        is_success: true,
        identity: identity.clone(),
        result,
    }
}
