//! Constants used throughout the fauna-wire library.
//!
//! This module provides central definitions for the reserved keys of the
//! extended-JSON dialect and the field names of the stream message envelope.

/// Tag key for a document or collection reference.
pub const REF_TAG: &str = "@ref";

/// Tag key for a calendar date (`YYYY-MM-DD`).
pub const DATE_TAG: &str = "@date";

/// Tag key for a UTC timestamp with nanosecond precision.
pub const TS_TAG: &str = "@ts";

/// Tag key escaping an object whose keys must be read as data.
pub const OBJ_TAG: &str = "@obj";

/// Tag key for a set reference.
pub const SET_TAG: &str = "@set";

/// Tag key for a base64url encoded byte string.
pub const BYTES_TAG: &str = "@bytes";

/// Every tag key with special meaning when it is the only key of an object.
pub const RESERVED_TAGS: [&str; 6] = [REF_TAG, DATE_TAG, TS_TAG, OBJ_TAG, SET_TAG, BYTES_TAG];

/// Keys of an object-form `@ref` payload that hold the parent reference.
pub const REF_PARENT_KEYS: [&str; 4] = ["collection", "class", "index", "database"];

/// Key of an object-form `@ref` payload that holds the reference id.
pub const REF_ID_KEY: &str = "id";

/// Format used for `@date` payloads.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stream envelope discriminator field.
pub const STREAM_TYPE: &str = "type";

/// Stream envelope transaction timestamp field.
pub const STREAM_TXN: &str = "txn";

/// Stream envelope payload field.
pub const STREAM_EVENT: &str = "event";
