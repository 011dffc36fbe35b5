//! The scan session: sole owner of the display state.
//!
//! Each scan spawns one lookup task. Completed lookups come back over an mpsc
//! channel tagged with the sequence number they were issued under, and only
//! the latest issued sequence may change the display. Starting a new scan or
//! clearing aborts the lookup in flight, so overlapping scans resolve to the
//! most recent one instead of whichever response lands last.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::lookup::RecordSource;
use crate::record::{LookupResult, ScanCode, ScanOutcome};
use crate::render::{present, DisplayState, NotificationKind, Presentation};

/// Completions buffered between lookup tasks and the session.
const COMPLETION_BUFFER: usize = 8;

/// A finished lookup, tagged with the scan that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Sequence number assigned when the scan started.
    pub sequence: u64,
    /// The code that was looked up.
    pub code: ScanCode,
    /// What the lookup produced.
    pub result: LookupResult,
}

/// What applying a completion did to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Details and events were replaced.
    Shown,
    /// The display was left alone and a notification raised.
    Notified(NotificationKind),
    /// The completion belonged to a superseded or cleared scan.
    Stale,
}

/// Drives lookups from scans and owns what is shown.
pub struct Session {
    source: Arc<dyn RecordSource>,
    display: DisplayState,
    issued: u64,
    awaiting: Option<u64>,
    in_flight: Option<JoinHandle<()>>,
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("display", &self.display)
            .field("issued", &self.issued)
            .field("awaiting", &self.awaiting)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with a cleared display.
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel(COMPLETION_BUFFER);
        Self {
            source,
            display: DisplayState::default(),
            issued: 0,
            awaiting: None,
            in_flight: None,
            completion_tx,
            completion_rx,
        }
    }

    /// The current display state.
    #[must_use]
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Check if a lookup result is still expected.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Handle one scan attempt.
    ///
    /// A cancelled scan issues nothing. A decoded code replaces the shown
    /// code, aborts any lookup still running, and starts a new one. Returns
    /// the sequence number of the started lookup.
    ///
    /// Must be called from within a tokio runtime.
    pub fn scan(&mut self, outcome: ScanOutcome) -> Option<u64> {
        let code = match outcome {
            ScanOutcome::Scanned(code) => code,
            ScanOutcome::Cancelled => {
                debug!("scan cancelled, no lookup issued");
                return None;
            }
        };

        self.abort_in_flight();
        self.issued += 1;
        let sequence = self.issued;
        self.awaiting = Some(sequence);
        self.display.code = code.to_string();
        self.display.notification = None;

        info!(sequence, code = %code, "lookup started");

        let source = Arc::clone(&self.source);
        let completion_tx = self.completion_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = source.lookup(&code).await;
            // The receiver lives in the session; a closed channel means it is gone.
            let _ = completion_tx
                .send(Completion {
                    sequence,
                    code,
                    result,
                })
                .await;
        }));

        Some(sequence)
    }

    /// Wait for the next completed lookup and apply it.
    ///
    /// Stays pending while nothing is in flight, which makes it suitable as a
    /// `tokio::select!` branch next to an input source.
    pub async fn next_update(&mut self) -> Update {
        match self.completion_rx.recv().await {
            Some(completion) => self.apply(completion),
            None => Update::Stale,
        }
    }

    /// Apply a completed lookup to the display.
    ///
    /// Completions for anything other than the latest issued scan are
    /// discarded.
    pub fn apply(&mut self, completion: Completion) -> Update {
        let Completion {
            sequence,
            code,
            result,
        } = completion;

        if self.awaiting != Some(sequence) {
            debug!(sequence, latest = self.issued, code = %code, "discarding stale lookup result");
            return Update::Stale;
        }
        self.awaiting = None;
        self.in_flight = None;

        match present(&result) {
            Presentation::Show { details, events } => {
                match &result {
                    LookupResult::Found(record) => {
                        info!(sequence, code = %code, events = record.events.len(), "record found");
                    }
                    _ => info!(sequence, code = %code, "no records found"),
                }
                self.display.details = details;
                self.display.events = events;
                Update::Shown
            }
            Presentation::Notify(kind) => {
                if let Some(diagnostic) = result.failure_message() {
                    warn!(sequence, code = %code, error = %diagnostic, "{kind}");
                }
                self.display.notification = Some(kind);
                Update::Notified(kind)
            }
        }
    }

    /// Reset code, details, events and notification without a network call.
    ///
    /// A lookup still in flight is aborted and its result will not be shown.
    pub fn clear(&mut self) {
        self.abort_in_flight();
        self.awaiting = None;
        self.display = DisplayState::default();
        info!("display cleared");
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}
