//! Core lookup types for attendscan.
//!
//! This module defines the values that flow between the scanner, the lookup
//! client and the display: the scanned code, the attendee record returned by
//! the endpoint, and the exhaustive outcome of a lookup.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Decoded text payload from a barcode or QR scan.
///
/// The only constraint is that the code is non-empty; its format is passed
/// through to the endpoint untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanCode(String);

impl ScanCode {
    /// Create a scan code from decoded scanner output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyScanCode`] if `code` is empty.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if code.is_empty() {
            return Err(Error::EmptyScanCode);
        }
        Ok(Self(code))
    }

    /// The code as submitted to the endpoint.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScanCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ScanCode {
    type Error = Error;

    fn try_from(code: &str) -> Result<Self> {
        Self::new(code)
    }
}

/// What the scanner handed back for one scan attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A code was decoded.
    Scanned(ScanCode),
    /// The user backed out of the scanner; no lookup is issued.
    Cancelled,
}

/// One person's registration and the events they signed up for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    /// Attendee name.
    pub name: String,

    /// Registration number (`regdno` on the wire).
    pub registration_id: String,

    /// Contact email.
    pub email: String,

    /// Academic branch or department.
    pub branch: String,

    /// Registered events, in the order the endpoint listed them.
    pub events: Vec<String>,
}

/// The exhaustive outcome of a lookup attempt.
///
/// Exactly one variant is produced per lookup; there are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupResult {
    /// The endpoint returned at least one record; the first is kept.
    Found(AttendeeRecord),

    /// The query succeeded but matched nothing.
    NotFound,

    /// No response was received (connect failure, timeout, read failure).
    TransportError {
        /// Diagnostic detail for logs.
        message: String,
    },

    /// A response was received but could not be mapped to a record.
    ParseError {
        /// Diagnostic detail for logs.
        message: String,
    },
}

impl LookupResult {
    /// Create a transport failure.
    #[must_use]
    pub fn transport_error(message: impl Into<String>) -> Self {
        Self::TransportError {
            message: message.into(),
        }
    }

    /// Create a parse failure.
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Diagnostic detail of a failed lookup.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::TransportError { message } | Self::ParseError { message } => Some(message),
            Self::Found(_) | Self::NotFound => None,
        }
    }

    /// The record, if one was found.
    #[must_use]
    pub fn record(&self) -> Option<&AttendeeRecord> {
        match self {
            Self::Found(record) => Some(record),
            _ => None,
        }
    }
}
