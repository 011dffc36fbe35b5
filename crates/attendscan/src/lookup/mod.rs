//! Record lookup against the registration endpoint.
//!
//! A lookup takes a [`ScanCode`], sends one GET request, and always resolves
//! to exactly one [`LookupResult`] variant. Failures are values, not `Err`s,
//! so callers handle found, not-found and both failure kinds in one match.

mod client;
mod dto;

use async_trait::async_trait;

use crate::record::{LookupResult, ScanCode};

pub use client::{parse_response, LookupClient};

/// Anything that can resolve a scanned code to an attendee record.
///
/// [`LookupClient`] is the production implementation; the session only sees
/// this trait, so it can be driven by an in-memory source.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Resolve `code` to a lookup outcome.
    ///
    /// Completes exactly once with one of the [`LookupResult`] variants.
    async fn lookup(&self, code: &ScanCode) -> LookupResult;
}
