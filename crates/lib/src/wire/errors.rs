//! Error types for the wire codec.

use thiserror::Error;

/// Errors produced while reading or writing extended JSON.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WireError {
    /// Input bytes are not valid extended JSON
    #[error("extended JSON parse failed at byte {offset} (line {line}, column {column}): {reason}")]
    Parse {
        offset: usize,
        line: usize,
        column: usize,
        reason: String,
    },

    /// Writing a value tree failed
    #[error("extended JSON serialization failed: {reason}")]
    Serialize { reason: String },
}

impl WireError {
    /// Builds a parse error from a `serde_json` failure, resolving its
    /// line/column position into a byte offset of `input`.
    pub(crate) fn from_json(input: &[u8], err: &serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        WireError::Parse {
            offset: byte_offset(input, line, column),
            line,
            column,
            reason: reason_of(err),
        }
    }

    /// Byte offset of a parse failure
    pub fn offset(&self) -> Option<usize> {
        match self {
            WireError::Parse { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Check if this error is a parse failure
    pub fn is_parse_error(&self) -> bool {
        matches!(self, WireError::Parse { .. })
    }
}

/// Strips serde_json's trailing " at line X column Y", which the offset
/// fields already carry.
fn reason_of(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rfind(" at line ") {
        Some(idx) if err.line() > 0 => message[..idx].to_string(),
        _ => message,
    }
}

/// Converts a 1-based line and column into a 0-based byte offset.
fn byte_offset(input: &[u8], line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start = if line == 1 {
        0
    } else {
        input
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .nth(line - 2)
            .map_or(input.len(), |(idx, _)| idx + 1)
    };
    (line_start + column.saturating_sub(1)).min(input.len())
}

impl From<WireError> for crate::Error {
    fn from(err: WireError) -> Self {
        crate::Error::Wire(err)
    }
}
