//! Stream event classification.
//!
//! A stream delivers one envelope per message:
//!
//! ```json
//! {"type": "version", "txn": 1612345678000000, "event": {...}}
//! ```
//!
//! [`classify`] reads the envelope and returns the typed [`StreamEvent`].
//! Envelopes whose `type` is not recognized are skipped with `Ok(None)` so
//! that newer services can add event types without breaking older readers.

mod errors;

use std::fmt;

use tracing::debug;

pub use errors::{ServiceErrorKind, StreamError};

use crate::constants::{STREAM_EVENT, STREAM_TXN, STREAM_TYPE};
use crate::mapper::{Decode, DecodeError};
use crate::value::{Object, Value, fmt_object};

const ENVELOPE: &str = "stream event";

/// The kind of a stream event, as named in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamEventType {
    Start,
    Version,
    HistoryRewrite,
    Error,
}

impl StreamEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamEventType::Start => "start",
            StreamEventType::Version => "version",
            StreamEventType::HistoryRewrite => "history_rewrite",
            StreamEventType::Error => "error",
        }
    }

    /// Returns `None` for names this crate does not know.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "start" => Some(StreamEventType::Start),
            "version" => Some(StreamEventType::Version),
            "history_rewrite" => Some(StreamEventType::HistoryRewrite),
            "error" => Some(StreamEventType::Error),
            _ => None,
        }
    }
}

impl fmt::Display for StreamEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// The subscription is live; later events have `txn` at or after this one
    Start { txn: i64, event: i64 },
    /// The subscribed document changed
    Version { txn: i64, event: Object },
    /// The history of the subscribed document was rewritten
    HistoryRewrite { txn: i64, event: Object },
    /// The service reported an error on the stream
    Error { txn: i64, error: StreamError },
}

impl StreamEvent {
    pub fn event_type(&self) -> StreamEventType {
        match self {
            StreamEvent::Start { .. } => StreamEventType::Start,
            StreamEvent::Version { .. } => StreamEventType::Version,
            StreamEvent::HistoryRewrite { .. } => StreamEventType::HistoryRewrite,
            StreamEvent::Error { .. } => StreamEventType::Error,
        }
    }

    /// The transaction timestamp of the event
    pub fn txn(&self) -> i64 {
        match self {
            StreamEvent::Start { txn, .. }
            | StreamEvent::Version { txn, .. }
            | StreamEvent::HistoryRewrite { txn, .. }
            | StreamEvent::Error { txn, .. } => *txn,
        }
    }

    /// The document payload of version and history rewrite events
    pub fn document(&self) -> Option<&Object> {
        match self {
            StreamEvent::Version { event, .. } | StreamEvent::HistoryRewrite { event, .. } => {
                Some(event)
            }
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StreamEvent::Error { .. })
    }
}

impl fmt::Display for StreamEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamEvent::Start { txn, event } => write!(f, "StartEvent{{event={event}, txn={txn}}}"),
            StreamEvent::Version { txn, event } => {
                write!(f, "VersionEvent{{txn={txn}, event=")?;
                fmt_object(event, f)?;
                write!(f, "}}")
            }
            StreamEvent::HistoryRewrite { txn, event } => {
                write!(f, "HistoryRewriteEvent{{txn={txn}, event=")?;
                fmt_object(event, f)?;
                write!(f, "}}")
            }
            StreamEvent::Error { txn, error } => {
                write!(f, "ErrorEvent{{txn={txn}, error={error}}}")
            }
        }
    }
}

/// Classifies one stream envelope.
///
/// Fails when `type` or `txn` is absent or mistyped, or when the `event`
/// payload does not match what the type requires. Returns `Ok(None)` for an
/// unrecognized `type` without looking at the rest of the envelope.
pub fn classify(envelope: &Object) -> Result<Option<StreamEvent>, DecodeError> {
    let type_name: String = field(envelope, STREAM_TYPE)?;
    let Some(event_type) = StreamEventType::parse(&type_name) else {
        debug!(event_type = %type_name, "skipping unrecognized stream event");
        return Ok(None);
    };
    let txn: i64 = field(envelope, STREAM_TXN)?;

    let event = match event_type {
        StreamEventType::Start => StreamEvent::Start {
            txn,
            event: field(envelope, STREAM_EVENT)?,
        },
        StreamEventType::Version => StreamEvent::Version {
            txn,
            event: field(envelope, STREAM_EVENT)?,
        },
        StreamEventType::HistoryRewrite => StreamEvent::HistoryRewrite {
            txn,
            event: field(envelope, STREAM_EVENT)?,
        },
        StreamEventType::Error => {
            let payload = payload_object(envelope)?;
            StreamEvent::Error {
                txn,
                error: StreamError::from_event(payload).map_err(|err| err.within(STREAM_EVENT))?,
            }
        }
    };
    Ok(Some(event))
}

/// Classifies an envelope held in a [`Value`]; anything but an object fails.
pub fn classify_value(envelope: &Value) -> Result<Option<StreamEvent>, DecodeError> {
    match envelope {
        Value::Object(object) => classify(object),
        other => Err(DecodeError::TypeMismatch {
            expected: ENVELOPE,
            actual: other.type_name(),
            path: String::new(),
        }),
    }
}

/// Parses one envelope from wire bytes and classifies it.
pub fn parse_event(input: &[u8]) -> crate::Result<Option<StreamEvent>> {
    let value = crate::wire::parse(input)?;
    Ok(classify_value(&value)?)
}

fn field<T: Decode>(envelope: &Object, key: &'static str) -> Result<T, DecodeError> {
    match envelope.get(key) {
        None | Some(Value::Null) => Err(DecodeError::MissingField {
            record: ENVELOPE,
            field: key,
            path: String::new(),
        }),
        Some(value) => T::decode(value).map_err(|err| err.within(key)),
    }
}

fn payload_object(envelope: &Object) -> Result<&Object, DecodeError> {
    match envelope.get(STREAM_EVENT) {
        None | Some(Value::Null) => Err(DecodeError::MissingField {
            record: ENVELOPE,
            field: STREAM_EVENT,
            path: String::new(),
        }),
        Some(Value::Object(object)) => Ok(object),
        Some(other) => Err(DecodeError::mismatch::<Object>(other).within(STREAM_EVENT)),
    }
}
