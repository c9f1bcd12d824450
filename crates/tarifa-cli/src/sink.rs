//! Submission sink that records notices in the log.

use tarifa_core::{SinkError, SubmissionNotice, SubmissionSink};
use tracing::info;

use crate::logging::redact_value;

/// Writes each notice as an `info` event. The client name is redacted unless
/// `--log-data` is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn send(&self, notice: &SubmissionNotice) -> Result<(), SinkError> {
        info!(
            executive = %notice.executive,
            client = redact_value(&notice.client),
            timestamp = %notice.timestamp.to_rfc3339(),
            "contract submitted"
        );
        Ok(())
    }
}
