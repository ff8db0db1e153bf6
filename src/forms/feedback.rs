use super::rules::FieldKind;
use super::validator::FormReport;
use crate::error::Result;

/// CSS class put on a field that failed validation.
pub const INVALID_CLASS: &str = "is-invalid";
/// Class of the message element kept next to a field.
pub const FEEDBACK_CLASS: &str = "invalid-feedback";

/// Where a [`FormReport`] ends up. The page implementation flips the
/// `is-invalid` class and writes the message element; tests record calls.
pub trait FeedbackSink {
    fn show_error(&self, kind: FieldKind, message: &str) -> Result<()>;
    fn clear_error(&self, kind: FieldKind) -> Result<()>;
}

pub fn apply<S: FeedbackSink + ?Sized>(report: &FormReport, sink: &S) -> Result<()> {
    for field in report.iter() {
        match field.message() {
            Some(message) => sink.show_error(field.kind, message)?,
            None => sink.clear_error(field.kind)?,
        }
    }
    Ok(())
}
