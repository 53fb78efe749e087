//! Status messages for operation feedback.

use std::fmt;

use crate::envelope::Envelope;

/// One-line success or error message.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl From<&Envelope> for OperationStatus {
    fn from(envelope: &Envelope) -> Self {
        match envelope.error() {
            Some(error) => Self::failure(format!("{} failed: {error}", envelope.operation)),
            None => Self::success(format!("{} succeeded", envelope.operation)),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}
