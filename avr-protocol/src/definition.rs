//! Raw property definition types
//!
//! A [`PropertyDef`] declares, for one dotted property name, how to query
//! the device for it, how to encode a write, how to decode an inbound line
//! and which other properties to refresh afterwards. The declarative table
//! in [`crate::defs`] is a list of these; [`crate::table::PropertyTable`]
//! compiles them into the immutable runtime form.

use regex::Captures;
use serde::Serialize;

use crate::value::Value;

/// Result of a receive decode: either a single value, or a named record
/// that fans out into virtual sub-properties.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Value(Value),
    Record(Vec<(&'static str, Value)>),
}

/// Decoder from regex capture groups to a decoded value.
pub type DecodeFn = fn(&Captures) -> Option<Decoded>;

/// Encoder from a property value to a wire command (without terminator).
pub type EncodeFn = fn(&Value) -> Option<String>;

/// When the engine should (re)query a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryFlags {
    /// Query once per successful connection (bulk status refresh).
    pub on_connect: bool,
    /// Re-query right after a successful write.
    pub after_write: bool,
    /// Candidate for periodic polling.
    pub poll: bool,
}

impl QueryFlags {
    /// On-connect only.
    pub const C: QueryFlags = QueryFlags {
        on_connect: true,
        after_write: false,
        poll: false,
    };

    /// On-connect plus after-write.
    pub const CW: QueryFlags = QueryFlags {
        on_connect: true,
        after_write: true,
        poll: false,
    };

    /// After-write only.
    pub const W: QueryFlags = QueryFlags {
        on_connect: false,
        after_write: true,
        poll: false,
    };
}

/// Query rule: flags plus the command(s) to send.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub flags: QueryFlags,
    pub commands: Vec<String>,
}

impl QuerySpec {
    pub fn new(flags: QueryFlags, command: &str) -> Self {
        Self {
            flags,
            commands: vec![command.to_string()],
        }
    }

    pub fn many(flags: QueryFlags, commands: Vec<String>) -> Self {
        Self { flags, commands }
    }
}

/// Transmit rule: optional accept pattern (validated against the value's
/// string form) and the wire encoder.
#[derive(Clone)]
pub struct TxRule {
    pub accept: Option<&'static str>,
    pub encode: EncodeFn,
}

/// Receive rule: line pattern, decoder, and the names of properties to
/// re-query whenever this one updates.
#[derive(Clone)]
pub struct RxRule {
    pub pattern: &'static str,
    pub decode: DecodeFn,
    pub refresh: &'static [&'static str],
}

/// Host-facing value type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Number,
    String,
}

/// Enumerated state labels attached to a property's metadata.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum States {
    Numeric(&'static [(i64, &'static str)]),
    Coded(&'static [(&'static str, &'static str)]),
}

/// Display metadata consumed by the host, opaque to the engine.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Metadata {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<States>,
}

impl Metadata {
    pub const fn new(value_type: ValueType, role: &'static str) -> Self {
        Self {
            value_type,
            role,
            unit: None,
            states: None,
        }
    }

    pub const fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub const fn with_states(mut self, states: States) -> Self {
        self.states = Some(states);
        self
    }
}

/// One raw, declarative property definition.
///
/// Invariant (checked at table build): at least one of `query`, `transmit`
/// or `receive` must be present.
#[derive(Clone, Default)]
pub struct PropertyDef {
    pub feature: Option<&'static str>,
    pub query: Option<QuerySpec>,
    pub transmit: Option<TxRule>,
    pub receive: Option<RxRule>,
    pub metadata: Option<Metadata>,
}

impl std::fmt::Debug for PropertyDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDef")
            .field("feature", &self.feature)
            .field("query", &self.query)
            .field("transmit", &self.transmit.as_ref().map(|t| t.accept))
            .field("receive", &self.receive.as_ref().map(|r| r.pattern))
            .finish()
    }
}
