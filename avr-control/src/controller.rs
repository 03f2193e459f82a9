//! Sync-first receiver controller
//!
//! Provides a fully synchronous API for controlling a receiver over its
//! IP control port. All async operations are hidden in a background
//! worker thread.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex, RwLock};
use std::thread::JoinHandle;

use tokio::sync::{mpsc as tokio_mpsc, oneshot};

use avr_protocol::{definitions, PropertyInfo, PropertyTable, Value};

use crate::config::{ConnectionConfig, Options};
use crate::error::{ControlError, Result};
use crate::event::{DeviceEvent, EventIterator};
use crate::worker::{spawn_worker, Command, Shared};

/// Sync-first controller for one receiver
///
/// Provides a fully synchronous API while the connection, reconnection
/// and query scheduling run in a background thread. All methods are
/// non-blocking except [`set_value`](Self::set_value), which waits for
/// the write to be accepted or rejected.
///
/// # Example
///
/// ```rust,ignore
/// use avr_control::{AvrController, ConnectionConfig, DeviceEvent};
///
/// // Create controller (sync - no .await!)
/// let controller = AvrController::new(ConnectionConfig::new("192.168.1.30", 8102))?;
/// controller.set_features(["ToneControl", "AudioStatusInfo"]);
/// controller.connect()?;
///
/// // Write a property (blocks until accepted or rejected)
/// let accepted = controller.set_value("audio.volume", (-32.5).into())?;
///
/// // Iterate over events (blocking)
/// for event in controller.events() {
///     if let DeviceEvent::Changed { name, value } = event {
///         println!("{name} = {value}");
///     }
/// }
/// ```
pub struct AvrController {
    /// Send commands to background worker
    command_tx: tokio_mpsc::UnboundedSender<Command>,

    /// Receive events from background worker
    event_rx: Arc<Mutex<mpsc::Receiver<DeviceEvent>>>,

    /// Compiled property table (shared with the worker)
    table: Arc<PropertyTable>,

    /// Last known property values (sync access)
    store: Arc<RwLock<HashMap<String, Value>>>,

    /// Active feature tags (sync access)
    features: Arc<RwLock<HashSet<String>>>,

    /// Hook options (sync access)
    options: Arc<RwLock<Options>>,

    /// Connection state flag maintained by the worker
    connected: Arc<AtomicBool>,

    /// Background worker handle (kept alive)
    _worker: JoinHandle<()>,
}

impl AvrController {
    /// Create a new controller with the standard property table
    ///
    /// This is a synchronous operation - no `.await` required. The
    /// connection is not opened until [`connect`](Self::connect).
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        Self::with_table(config, definitions())
    }

    /// Create a new controller with a custom property definition set
    pub fn with_table(
        config: ConnectionConfig,
        raw: Vec<(&'static str, avr_protocol::PropertyDef)>,
    ) -> Result<Self> {
        let table = Arc::new(PropertyTable::build(raw)?);
        let store = Arc::new(RwLock::new(HashMap::new()));
        let features = Arc::new(RwLock::new(HashSet::new()));
        let options = Arc::new(RwLock::new(Options::default()));
        let connected = Arc::new(AtomicBool::new(false));

        let (command_tx, command_rx) = tokio_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        let shared = Shared {
            table: Arc::clone(&table),
            store: Arc::clone(&store),
            features: Arc::clone(&features),
            options: Arc::clone(&options),
            connected: Arc::clone(&connected),
        };
        let worker = spawn_worker(config, shared, command_rx, event_tx);

        Ok(Self {
            command_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            table,
            store,
            features,
            options,
            connected,
            _worker: worker,
        })
    }

    // ========================================================================
    // Connection
    // ========================================================================

    /// Replace the connection settings (sync)
    ///
    /// Applies from the next connection attempt; an open connection is
    /// not touched.
    pub fn set_config(&self, config: ConnectionConfig) -> Result<()> {
        self.send_command(Command::SetConfig(config))
    }

    /// Open the connection (sync)
    ///
    /// On success the worker emits [`DeviceEvent::Connected`] and queues a
    /// full status refresh. Lost connections are re-established
    /// automatically until the retry ceiling is hit or
    /// [`disconnect`](Self::disconnect) is called.
    pub fn connect(&self) -> Result<()> {
        self.send_command(Command::Connect)
    }

    /// Close the connection and stop reconnecting (sync)
    pub fn disconnect(&self) -> Result<()> {
        self.send_command(Command::Disconnect)
    }

    /// Whether the TCP connection is currently up
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    // ========================================================================
    // Features and options
    // ========================================================================

    /// Replace the set of active feature tags (sync)
    ///
    /// Feature-gated properties are invisible while their tag is inactive:
    /// they are not listed, not queried, not written and inbound updates
    /// for them are dropped.
    pub fn set_features<I, S>(&self, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut features = self.features.write().map_err(|_| ControlError::LockPoisoned)?;
        *features = tags.into_iter().map(Into::into).collect();
        Ok(())
    }

    /// Replace the hook options (sync)
    pub fn set_options(&self, options: Options) -> Result<()> {
        let mut current = self.options.write().map_err(|_| ControlError::LockPoisoned)?;
        *current = options;
        Ok(())
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Last known value of a property (sync)
    pub fn get_value(&self, name: &str) -> Option<Value> {
        self.store.read().ok()?.get(name).cloned()
    }

    /// Write a property value (blocking)
    ///
    /// Blocks until the worker has run the pre-send hook, validated and
    /// encoded the value and written it to the socket. Returns `false`
    /// when the write was rejected or the connection is down; the device's
    /// own confirmation arrives later as a
    /// [`DeviceEvent::Changed`](crate::DeviceEvent::Changed).
    pub fn set_value(&self, name: &str, value: Value) -> Result<bool> {
        let (reply, response) = oneshot::channel();
        self.send_command(Command::SetValue {
            name: name.to_string(),
            value,
            reply,
        })?;
        response
            .blocking_recv()
            .map_err(|_| ControlError::WorkerDisconnected)
    }

    /// Queue a full status refresh of every enabled property (sync)
    pub fn query_status(&self) -> Result<()> {
        self.send_command(Command::QueryStatus)
    }

    /// Queue the query for one property, or all properties under a
    /// `prefix.*` wildcard (sync)
    pub fn query(&self, name: &str) -> Result<()> {
        self.send_command(Command::Query(name.to_string()))
    }

    /// Send a raw wire command, bypassing the property table (sync)
    ///
    /// The protocol terminator is appended automatically.
    pub fn send_raw(&self, command: &str) -> Result<()> {
        self.send_command(Command::SendRaw(command.to_string()))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// All enabled property names in table order (sync)
    pub fn properties(&self) -> Vec<String> {
        self.table.properties(&self.features_snapshot())
    }

    /// Distinct channel names for the enabled properties (sync)
    pub fn channels(&self) -> Vec<String> {
        self.table.channels(&self.features_snapshot())
    }

    /// Capability summary and metadata for one property (sync)
    pub fn property_info(&self, name: &str) -> Result<PropertyInfo> {
        self.table
            .property_info(name)
            .ok_or_else(|| ControlError::UnknownProperty(name.to_string()))
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Get a blocking iterator over device events
    ///
    /// Returns an iterator that blocks on `next()` until an event is
    /// available. Use `try_recv()` for non-blocking access.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// // Blocking iteration
    /// for event in controller.events() {
    ///     println!("Event: {:?}", event);
    /// }
    ///
    /// // Non-blocking check
    /// let events = controller.events();
    /// if let Some(event) = events.try_recv() {
    ///     println!("Got event: {:?}", event);
    /// }
    /// ```
    pub fn events(&self) -> EventIterator {
        EventIterator::new(Arc::clone(&self.event_rx))
    }

    /// Shutdown the background worker
    ///
    /// Called automatically on drop, but can be called manually for
    /// graceful shutdown.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown);
    }

    fn send_command(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| ControlError::WorkerDisconnected)
    }

    fn features_snapshot(&self) -> HashSet<String> {
        self.features.read().map(|f| f.clone()).unwrap_or_default()
    }
}

impl Drop for AvrController {
    fn drop(&mut self) {
        tracing::debug!("AvrController dropping");
        let _ = self.command_tx.send(Command::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> AvrController {
        AvrController::new(ConnectionConfig::new("127.0.0.1", 1)).unwrap()
    }

    #[test]
    fn test_property_listing_follows_features() {
        let c = controller();

        let names = c.properties();
        assert!(names.contains(&"audio.volume".to_string()));
        assert!(!names.contains(&"audio.toneControl.bass".to_string()));

        c.set_features(["ToneControl"]).unwrap();
        let names = c.properties();
        assert!(names.contains(&"audio.toneControl.bass".to_string()));
    }

    #[test]
    fn test_channels() {
        let c = controller();
        let channels = c.channels();
        assert!(channels.contains(&"general".to_string()));
        assert!(channels.contains(&"audio".to_string()));
        assert!(!channels.contains(&"netradio".to_string()));
    }

    #[test]
    fn test_property_info() {
        let c = controller();

        let info = c.property_info("audio.volume").unwrap();
        assert!(info.can_query && info.can_read && info.can_write);

        let info = c.property_info("general.display").unwrap();
        assert!(!info.can_write);

        assert!(matches!(
            c.property_info("no.such.property"),
            Err(ControlError::UnknownProperty(_))
        ));
        assert!(matches!(
            c.property_info("#inputNames"),
            Err(ControlError::UnknownProperty(_))
        ));
    }

    #[test]
    fn test_initially_disconnected_and_empty() {
        let c = controller();
        assert!(!c.is_connected());
        assert!(c.get_value("audio.volume").is_none());
        assert!(c.events().try_recv().is_none());
    }
}
