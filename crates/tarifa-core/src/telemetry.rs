//! Fire-and-forget submission notices.
//!
//! After a contract is assembled the caller may report who generated it for
//! whom. Delivery never blocks or fails contract generation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::SinkError;

/// Who generated a contract for whom, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionNotice {
    pub executive: String,
    pub client: String,
    pub timestamp: DateTime<Utc>,
}

impl SubmissionNotice {
    pub fn new(executive: impl Into<String>, client: impl Into<String>) -> Self {
        Self::at(executive, client, Utc::now())
    }

    pub fn at(executive: impl Into<String>, client: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            executive: executive.into().trim().to_string(),
            client: client.into().trim().to_string(),
            timestamp,
        }
    }
}

/// Destination for submission notices.
pub trait SubmissionSink {
    fn send(&self, notice: &SubmissionNotice) -> std::result::Result<(), SinkError>;
}

/// Sends `notice` and swallows any failure. Returns whether delivery
/// succeeded.
pub fn dispatch_notice(sink: &dyn SubmissionSink, notice: &SubmissionNotice) -> bool {
    match sink.send(notice) {
        Ok(()) => {
            debug!(timestamp = %notice.timestamp, "submission notice sent");
            true
        }
        Err(error) => {
            warn!(%error, "submission notice dropped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::TimeZone;

    use super::*;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<SubmissionNotice>>);

    impl SubmissionSink for Recorder {
        fn send(&self, notice: &SubmissionNotice) -> std::result::Result<(), SinkError> {
            self.0.borrow_mut().push(notice.clone());
            Ok(())
        }
    }

    struct Offline;

    impl SubmissionSink for Offline {
        fn send(&self, _notice: &SubmissionNotice) -> std::result::Result<(), SinkError> {
            Err(SinkError("network unreachable".into()))
        }
    }

    fn notice() -> SubmissionNotice {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 14, 30, 0).unwrap();
        SubmissionNotice::at(" Ana Rojas ", "Juan Pérez", at)
    }

    #[test]
    fn delivered_notice_is_recorded() {
        let sink = Recorder::default();
        assert!(dispatch_notice(&sink, &notice()));
        let sent = sink.0.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].executive, "Ana Rojas");
        assert_eq!(sent[0].client, "Juan Pérez");
    }

    #[test]
    fn failure_is_swallowed() {
        assert!(!dispatch_notice(&Offline, &notice()));
    }

    #[test]
    fn notice_serializes_with_rfc3339_timestamp() {
        let json = serde_json::to_value(notice()).unwrap();
        assert_eq!(json["timestamp"], "2026-03-02T14:30:00Z");
    }
}
