//! AVR Protocol Definitions
//!
//! The pure, connection-free half of the AVR SDK: value model, device
//! catalogs, the declarative property table and its compiled runtime form.
//!
//! # Features
//!
//! - **Declarative Properties**: Query, transmit and receive rules per
//!   dotted property name
//! - **Compiled Dispatch**: Receive patterns compiled once into an ordered
//!   rule list; inbound lines are matched against every rule
//! - **Virtual Expansion**: `base!(a|b|c)` templates expand into read-only
//!   sub-properties fed by a single device response
//! - **Feature Gating**: Optional property groups enabled per device model
//!
//! # Architecture
//!
//! ```text
//! defs::definitions() → PropertyTable::build() → MatchRules + Properties
//!                                                (dispatch)   (lookup)
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use avr_protocol::{PropertyTable, definitions};
//!
//! let table = PropertyTable::build(definitions())?;
//!
//! // Encode a write for the device.
//! let tx = table.get("audio.volume").unwrap().transmit.as_ref().unwrap();
//! assert_eq!((tx.encode)(&(-80.0).into()), Some("001VL".to_string()));
//!
//! // Match an inbound line against the compiled rules.
//! for rule in table.rules() {
//!     if let Some(caps) = rule.pattern.captures("VOL121") {
//!         let decoded = (rule.decode)(&caps);
//!         println!("{}: {:?}", rule.name, decoded);
//!     }
//! }
//! ```

// Core modules
pub mod catalog;
pub mod defs;
pub mod definition;
pub mod table;
pub mod value;

// Error types
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use defs::definitions;

pub use definition::{
    Decoded, DecodeFn, EncodeFn, Metadata, PropertyDef, QueryFlags, QuerySpec, RxRule, States,
    TxRule, ValueType,
};

pub use table::{
    MatchRule, Property, PropertyInfo, PropertyTable, Receive, Transmit, INTERNAL_PREFIX, WILDCARD,
};

pub use value::Value;

// ============================================================================
// Re-exports - Error types
// ============================================================================

pub use error::{ProtocolError, Result};
