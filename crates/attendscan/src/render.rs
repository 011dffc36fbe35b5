//! Pure mapping from lookup outcomes to display text.
//!
//! Nothing here performs I/O. The session applies a [`Presentation`] to its
//! [`DisplayState`], and the CLI prints [`render_display`] output.

use crate::record::{AttendeeRecord, LookupResult};

/// Details text shown when the endpoint matched nothing.
pub const NO_RECORDS_FOUND: &str = "No records found";

/// What a transient notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// The request never produced a response.
    FetchFailed,
    /// A response arrived but could not be used.
    ProcessingFailed,
}

impl NotificationKind {
    /// The user-facing text. Diagnostic detail is never included.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::FetchFailed => "Failed to fetch data",
            Self::ProcessingFailed => "Error processing data",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// How a lookup outcome changes the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Replace the details block and the event list.
    Show {
        /// Label block or placeholder text.
        details: String,
        /// Event names, one paragraph each.
        events: Vec<String>,
    },
    /// Leave the display as it is and raise a notification.
    Notify(NotificationKind),
}

/// Everything currently on screen. `Default` is the cleared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    /// The last scanned code.
    pub code: String,
    /// Details block for the current record, or a placeholder.
    pub details: String,
    /// Event names for the current record.
    pub events: Vec<String>,
    /// The most recent notification, until the next scan or clear.
    pub notification: Option<NotificationKind>,
}

/// Map a lookup outcome to its effect on the display.
#[must_use]
pub fn present(result: &LookupResult) -> Presentation {
    match result {
        LookupResult::Found(record) => Presentation::Show {
            details: details_block(record),
            events: record.events.clone(),
        },
        LookupResult::NotFound => Presentation::Show {
            details: NO_RECORDS_FOUND.to_string(),
            events: Vec::new(),
        },
        LookupResult::TransportError { .. } => Presentation::Notify(NotificationKind::FetchFailed),
        LookupResult::ParseError { .. } => Presentation::Notify(NotificationKind::ProcessingFailed),
    }
}

/// The four-line label block for a record, each line tab-indented.
#[must_use]
pub fn details_block(record: &AttendeeRecord) -> String {
    format!(
        "\tName: {}\n\tReg No: {}\n\tEmail: {}\n\tBranch: {}",
        record.name, record.registration_id, record.email, record.branch
    )
}

/// Event names as paragraphs separated by a blank line.
#[must_use]
pub fn events_text(events: &[String]) -> String {
    events.iter().map(|event| format!("{event}\n\n")).collect()
}

/// Render the whole display state for a terminal.
#[must_use]
pub fn render_display(state: &DisplayState) -> String {
    let mut out = String::new();
    if !state.code.is_empty() {
        out.push_str("Code: ");
        out.push_str(&state.code);
        out.push('\n');
    }
    if !state.details.is_empty() {
        out.push_str(&state.details);
        out.push('\n');
    }
    if !state.events.is_empty() {
        out.push('\n');
        out.push_str(&events_text(&state.events));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asha() -> AttendeeRecord {
        AttendeeRecord {
            name: "Asha".to_string(),
            registration_id: "R100".to_string(),
            email: "a@x.com".to_string(),
            branch: "CSE".to_string(),
            events: vec!["Hackathon".to_string(), "Quiz".to_string()],
        }
    }

    #[test]
    fn test_present_found() {
        let presentation = present(&LookupResult::Found(asha()));

        let Presentation::Show { details, events } = presentation else {
            panic!("found record must be shown");
        };
        assert_eq!(
            details,
            "\tName: Asha\n\tReg No: R100\n\tEmail: a@x.com\n\tBranch: CSE"
        );
        assert_eq!(details.lines().count(), 4);
        assert_eq!(events_text(&events), "Hackathon\n\nQuiz\n\n");
    }

    #[test]
    fn test_present_not_found() {
        assert_eq!(
            present(&LookupResult::NotFound),
            Presentation::Show {
                details: "No records found".to_string(),
                events: Vec::new(),
            }
        );
    }

    #[test]
    fn test_present_failures_notify() {
        assert_eq!(
            present(&LookupResult::transport_error("connection refused")),
            Presentation::Notify(NotificationKind::FetchFailed)
        );
        assert_eq!(
            present(&LookupResult::parse_error("missing `email`")),
            Presentation::Notify(NotificationKind::ProcessingFailed)
        );
    }

    #[test]
    fn test_notification_text_hides_diagnostics() {
        assert_eq!(NotificationKind::FetchFailed.to_string(), "Failed to fetch data");
        assert_eq!(
            NotificationKind::ProcessingFailed.to_string(),
            "Error processing data"
        );
    }

    #[test]
    fn test_events_text_empty() {
        assert_eq!(events_text(&[]), "");
    }

    #[test]
    fn test_render_display_cleared_is_empty() {
        assert_eq!(render_display(&DisplayState::default()), "");
    }

    #[test]
    fn test_render_display_with_record() {
        let state = DisplayState {
            code: "R100".to_string(),
            details: details_block(&asha()),
            events: asha().events,
            notification: None,
        };

        assert_eq!(
            render_display(&state),
            "Code: R100\n\tName: Asha\n\tReg No: R100\n\tEmail: a@x.com\n\tBranch: CSE\n\nHackathon\n\nQuiz\n\n"
        );
    }
}
