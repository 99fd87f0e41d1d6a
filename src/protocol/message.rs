//! # Logical Messages
//!
//! The pre-encryption request object and the tagged response union.
//!
//! Requests serialize to `{"id": <int>, "method": <string>, "params": [...]}`
//! with any extra top-level fields flattened in. Responses carry either a
//! `result` value or an `error` object; a payload with neither is passed
//! through verbatim rather than rejected, since some firmware replies with
//! bare objects.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};

/// Sequence ids live in `[0, MAX_SEQUENCE_ID)` and wrap back to zero.
pub const MAX_SEQUENCE_ID: u16 = 9999;

/// Advance a sequence id by one, wrapping at [`MAX_SEQUENCE_ID`].
pub fn next_sequence(id: u16) -> u16 {
    if id >= MAX_SEQUENCE_ID {
        0
    } else {
        id + 1
    }
}

/// A logical command request, prior to encryption.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Request {
    /// Request sequence id, echoed back by the device.
    pub id: u16,
    /// Device method name, e.g. `get_status`.
    pub method: String,
    /// Positional parameters; empty for parameterless commands.
    pub params: Vec<Value>,
    /// Extra top-level fields merged into the request object.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Request {
    pub fn new(id: u16, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            id,
            method: method.into(),
            params,
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }
}

/// The meaningful part of a device response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Successful reply: the `result` value.
    Result(Value),
    /// Device-reported failure: the `error` object's fields.
    Error {
        code: Option<Value>,
        message: Option<String>,
    },
    /// Neither `result` nor `error` present; the payload as received.
    Bare(Value),
}

/// A decoded device response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Echoed sequence id, when the payload carries one.
    pub id: Option<u64>,
    pub body: ResponseBody,
}

impl Response {
    /// Classify a decrypted payload into the response union.
    pub fn from_value(payload: Value) -> Self {
        let id = payload.get("id").and_then(Value::as_u64);

        if let Some(error) = payload.get("error") {
            let (code, message) = match error {
                Value::Object(fields) => (
                    fields.get("code").cloned(),
                    fields
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                ),
                // Some firmware reports a bare string instead of an object.
                other => (None, Some(other.to_string())),
            };
            return Self {
                id,
                body: ResponseBody::Error { code, message },
            };
        }

        if let Some(result) = payload.get("result") {
            return Self {
                id,
                body: ResponseBody::Result(result.clone()),
            };
        }

        Self {
            id,
            body: ResponseBody::Bare(payload),
        }
    }

    /// Resolve the response into the command outcome.
    ///
    /// Errors become [`ProtocolError::Device`]; bare payloads are returned
    /// whole, matching the appliance's loosely-typed replies.
    pub fn into_result(self) -> Result<Value> {
        match self.body {
            ResponseBody::Result(value) => Ok(value),
            ResponseBody::Bare(value) => Ok(value),
            ResponseBody::Error { code, message } => Err(ProtocolError::device(code, message)),
        }
    }
}
