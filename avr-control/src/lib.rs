//! AVR Connection and Control Engine
//!
//! Sync-first control of a network receiver over its line-oriented IP
//! control protocol. All async operations are hidden in a background
//! worker thread that owns the TCP connection, the inbound dispatcher,
//! the rate-limited query scheduler and the reconnection logic.
//!
//! # Features
//!
//! - **Sync API**: Construct, connect, read and write without async/await
//! - **Reactive Updates**: Property changes arrive as [`DeviceEvent`]s on
//!   a blocking iterator
//! - **Rate Limiting**: Status queries are spaced out so the device does
//!   not drop them
//! - **Reconnection**: Lost connections are retried up to a configurable
//!   ceiling
//!
//! # Architecture
//!
//! ```text
//! AvrController → Commands → Worker (tokio) → Engine → Store + Events
//!    (sync)                  (socket/timers)  (dispatch/hooks/queue)
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use avr_control::{AvrController, ConnectionConfig, DeviceEvent};
//!
//! let controller = AvrController::new(ConnectionConfig::new("192.168.1.30", 8102))?;
//! controller.set_features(["ToneControl", "AudioStatusInfo"])?;
//! controller.connect()?;
//!
//! for event in controller.events() {
//!     match event {
//!         DeviceEvent::Connected => println!("connected"),
//!         DeviceEvent::Changed { name, value } => println!("{name} = {value}"),
//!         DeviceEvent::Closed => break,
//!     }
//! }
//! ```

// Core modules
pub mod config;
pub mod controller;
pub mod engine;
pub mod event;
pub mod queue;

// Background worker (commands are public for advanced embedding)
pub mod worker;

// Error types
pub mod error;

// Logging infrastructure
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ConnectionConfig, Options};
pub use controller::AvrController;
pub use engine::{Engine, HookOutcome};
pub use event::{DeviceEvent, EventIterator};
pub use queue::{QueryQueue, QUERY_COMMAND_DELAY};

// Protocol types used throughout the API
pub use avr_protocol::{PropertyInfo, Value};

// ============================================================================
// Re-exports - Error types
// ============================================================================

pub use error::{ControlError, Result};

// ============================================================================
// Re-exports - Logging
// ============================================================================

pub use logging::{init_logging, init_logging_from_env, init_silent, LoggingError, LoggingMode};
