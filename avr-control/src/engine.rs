//! Protocol engine: dispatch, value store, hooks and query scheduling
//!
//! The engine is single-threaded and lives inside the connection worker.
//! It owns the query queue and the retry bookkeeping; the shared value
//! store, feature set and options are visible to the sync facade through
//! `Arc`s. All socket I/O stays in the worker, the engine only produces
//! wire commands and consumes inbound lines.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, RwLock};

use avr_protocol::{Decoded, PropertyTable, Value, WILDCARD};

use crate::config::{ConnectionConfig, Options};
use crate::event::DeviceEvent;
use crate::queue::QueryQueue;

/// Result of running a value hook
///
/// Hooks return a possibly replaced value plus an explicit cancel flag.
/// A cancelled write is absorbed: it counts as accepted but nothing goes
/// on the wire. A cancelled update is dropped without touching the store.
#[derive(Debug, Clone, PartialEq)]
pub struct HookOutcome {
    pub value: Value,
    pub cancel: bool,
}

impl HookOutcome {
    fn pass(value: Value) -> Self {
        Self {
            value,
            cancel: false,
        }
    }
}

/// The connection-independent protocol state machine
pub struct Engine {
    table: Arc<PropertyTable>,
    config: ConnectionConfig,
    store: Arc<RwLock<HashMap<String, Value>>>,
    features: Arc<RwLock<HashSet<String>>>,
    options: Arc<RwLock<Options>>,
    connected: Arc<AtomicBool>,
    event_tx: mpsc::Sender<DeviceEvent>,
    queue: QueryQueue,
    /// Input names reported by the device via renamed-input responses
    device_input_names: HashMap<i64, String>,
    /// Consecutive failed connection attempts
    retries: u32,
    /// Last socket error text, surfaced by the next close log line
    last_error: Option<String>,
    /// Pending sleep-timer poll request: arm (`true`) or cancel (`false`)
    sleep_signal: Option<bool>,
}

impl Engine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        table: Arc<PropertyTable>,
        config: ConnectionConfig,
        store: Arc<RwLock<HashMap<String, Value>>>,
        features: Arc<RwLock<HashSet<String>>>,
        options: Arc<RwLock<Options>>,
        connected: Arc<AtomicBool>,
        event_tx: mpsc::Sender<DeviceEvent>,
    ) -> Self {
        Self {
            table,
            config,
            store,
            features,
            options,
            connected,
            event_tx,
            queue: QueryQueue::new(),
            device_input_names: HashMap::new(),
            retries: 0,
            last_error: None,
            sleep_signal: None,
        }
    }

    // ========================================================================
    // Inbound dispatch
    // ========================================================================

    /// Process one inbound line from the device
    ///
    /// Every compiled rule is tried; several rules may fire for the same
    /// line and each one is dispatched independently.
    pub fn on_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        tracing::trace!(line, "received");

        // Command error responses (bad command, parameter, busy).
        if line.len() == 3 && line.starts_with("E0") {
            tracing::warn!(code = line, "device rejected a command");
            return;
        }

        let table = Arc::clone(&self.table);
        let mut matched = false;

        for rule in table.rules() {
            let Some(caps) = rule.pattern.captures(line) else {
                continue;
            };
            matched = true;

            let Some(decoded) = (rule.decode)(&caps) else {
                tracing::debug!(property = %rule.name, line, "decode produced no value");
                continue;
            };

            if rule.internal {
                self.on_internal(&rule.name, decoded);
                continue;
            }

            match decoded {
                Decoded::Value(value) => {
                    let name = rule.name.clone();
                    self.apply_update(&name, value);
                }
                Decoded::Record(fields) => {
                    let Some(prefix) = rule.fanout_prefix.clone() else {
                        continue;
                    };
                    for (field, value) in fields {
                        let name = format!("{prefix}{field}");
                        self.apply_update(&name, value);
                    }
                }
            }
        }

        if !matched {
            tracing::debug!(line, "unhandled line");
        }
    }

    /// Store an update for one property, running its receive hook,
    /// emitting `Changed` and queueing dependent re-queries.
    ///
    /// Re-announced values go through the full path as well; hosts see
    /// every confirmation the device sends.
    fn apply_update(&mut self, name: &str, value: Value) {
        if !self.table.is_enabled(name, &self.features()) {
            return;
        }

        let outcome = self.on_receive(name, value);
        if outcome.cancel {
            return;
        }

        match self.store.write() {
            Ok(mut store) => {
                store.insert(name.to_string(), outcome.value.clone());
            }
            Err(_) => return,
        }

        tracing::debug!(property = name, value = %outcome.value, "updated");
        self.send_event(DeviceEvent::Changed {
            name: name.to_string(),
            value: outcome.value,
        });

        let table = Arc::clone(&self.table);
        if let Some(prop) = table.get(name) {
            if let Some(rx) = &prop.receive {
                for target in rx.refresh {
                    self.enqueue_queries_for(target);
                }
            }
        }
    }

    // ========================================================================
    // Outbound writes
    // ========================================================================

    /// Encode a write for one property
    ///
    /// Runs the pre-send hook, validates the value against the accept
    /// pattern and encodes the wire command. Returns whether the write
    /// was accepted plus the command to send. Queueing the after-write
    /// re-query is the caller's job, once the command actually went out.
    pub fn set_value(&mut self, name: &str, value: Value) -> (bool, Option<String>) {
        if !self.table.is_enabled(name, &self.features()) {
            tracing::debug!(property = name, "write to unknown or disabled property");
            return (false, None);
        }

        let table = Arc::clone(&self.table);
        let prop = match table.get(name) {
            Some(p) => p,
            None => return (false, None),
        };
        let Some(tx) = &prop.transmit else {
            tracing::debug!(property = name, "property is not writable");
            return (false, None);
        };

        // A cancelling hook absorbs the write: accepted, nothing sent.
        let outcome = self.pre_send(name, value);
        if outcome.cancel {
            tracing::debug!(property = name, "write absorbed by hook");
            return (true, None);
        }

        if let Some(accept) = &tx.accept {
            if !accept.is_match(&outcome.value.to_string()) {
                tracing::debug!(property = name, value = %outcome.value, "value rejected");
                return (false, None);
            }
        }

        let Some(command) = (tx.encode)(&outcome.value) else {
            tracing::debug!(property = name, value = %outcome.value, "value not encodable");
            return (false, None);
        };

        (true, Some(command))
    }

    /// Queue the re-query confirming a successful write, for properties
    /// whose query carries the after-write flag
    pub fn enqueue_after_write(&mut self, name: &str) {
        let table = Arc::clone(&self.table);
        if let Some(prop) = table.get(name) {
            if let Some(query) = &prop.query {
                if query.flags.after_write {
                    for cmd in &query.commands {
                        self.queue.push(cmd.clone());
                    }
                }
            }
        }
    }

    // ========================================================================
    // Value hooks
    // ========================================================================

    fn pre_send(&self, name: &str, value: Value) -> HookOutcome {
        match name {
            "audio.volume" => {
                // The limiter only runs with both bounds configured.
                let opts = self.options();
                if let (Some(requested), Some(min), Some(max)) =
                    (value.as_f64(), opts.volume_min, opts.volume_max)
                {
                    let db = requested.min(max).max(min);
                    if db != requested {
                        tracing::warn!(requested, clamped = db, "volume clamped to configured limits");
                    }
                    return HookOutcome::pass(Value::Float(db));
                }
                HookOutcome::pass(value)
            }
            "general.selectedInput" => {
                // Rewrite a known custom name to its input id; anything
                // unresolved passes through for the accept pattern to
                // judge.
                if self.options().custom_input_names {
                    if let Value::Str(s) = &value {
                        if let Some(id) = self.input_id_by_name(s) {
                            return HookOutcome::pass(Value::Int(id));
                        }
                    }
                }
                HookOutcome::pass(value)
            }
            _ => HookOutcome::pass(value),
        }
    }

    fn on_receive(&mut self, name: &str, value: Value) -> HookOutcome {
        match name {
            "general.selectedInput" => {
                if self.options().custom_input_names {
                    if let Some(id) = value.as_i64() {
                        if let Some(input) = self.input_name(id) {
                            return HookOutcome::pass(Value::Str(input));
                        }
                    }
                }
                HookOutcome::pass(value)
            }
            "amp.sleepTimer" => {
                self.sleep_signal = Some(value.as_i64().is_some_and(|v| v > 0));
                HookOutcome::pass(value)
            }
            _ => HookOutcome::pass(value),
        }
    }

    fn on_internal(&mut self, name: &str, decoded: Decoded) {
        if name != "#inputNames" {
            return;
        }
        let Decoded::Record(fields) = decoded else {
            return;
        };

        let mut id = None;
        let mut renamed = false;
        let mut input = None;
        for (field, value) in fields {
            match field {
                "id" => id = value.as_i64(),
                "isRenamed" => renamed = value.as_bool().unwrap_or(false),
                "name" => input = value.as_str().map(str::to_string),
                _ => {}
            }
        }

        if let (Some(id), Some(input)) = (id, input) {
            tracing::debug!(id, renamed, name = %input, "input name reported by device");
            self.device_input_names.insert(id, input);
        }
    }

    /// Display name for an input id: the user-assigned name, then the
    /// name reported by the device. Ids the device never announced stay
    /// numeric.
    fn input_name(&self, id: i64) -> Option<String> {
        if let Some(name) = self.options().input_names.get(&id) {
            return Some(name.clone());
        }
        self.device_input_names.get(&id).cloned()
    }

    fn input_id_by_name(&self, name: &str) -> Option<i64> {
        let opts = self.options();
        if let Some((&id, _)) = opts.input_names.iter().find(|(_, n)| n.as_str() == name) {
            return Some(id);
        }
        self.device_input_names
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(&id, _)| id)
    }

    // ========================================================================
    // Query scheduling
    // ========================================================================

    /// Queue the on-connect status queries for every enabled property
    pub fn enqueue_on_connect(&mut self) {
        let table = Arc::clone(&self.table);
        let features = self.features();
        for name in table.names() {
            if !table.is_enabled(name, &features) {
                continue;
            }
            if let Some(prop) = table.get(name) {
                if let Some(query) = &prop.query {
                    if query.flags.on_connect {
                        for cmd in &query.commands {
                            self.queue.push(cmd.clone());
                        }
                    }
                }
            }
        }
        tracing::debug!(pending = self.queue.len(), "queued status refresh");
    }

    /// Queue the queries for one property name or a `prefix.*` wildcard
    pub fn enqueue_queries_for(&mut self, target: &str) {
        match target.strip_suffix(WILDCARD) {
            Some(prefix) => {
                let table = Arc::clone(&self.table);
                let names: Vec<String> = table
                    .names()
                    .filter(|n| n.starts_with(prefix))
                    .map(str::to_string)
                    .collect();
                for name in names {
                    self.enqueue_exact(&name);
                }
            }
            None => self.enqueue_exact(target),
        }
    }

    fn enqueue_exact(&mut self, name: &str) {
        if !self.table.is_enabled(name, &self.features()) {
            return;
        }
        let table = Arc::clone(&self.table);
        if let Some(prop) = table.get(name) {
            if let Some(query) = &prop.query {
                for cmd in &query.commands {
                    self.queue.push(cmd.clone());
                }
            }
        }
    }

    /// Take the next query command due for sending
    pub fn pop_query(&mut self) -> Option<String> {
        self.queue.pop()
    }

    pub fn has_pending_queries(&self) -> bool {
        !self.queue.is_empty()
    }

    // ========================================================================
    // Connection bookkeeping
    // ========================================================================

    /// Record a successful connection: resets the retry counter, emits
    /// `Connected` and queues the full status refresh.
    pub fn mark_connected(&mut self) {
        self.retries = 0;
        self.connected.store(true, Ordering::SeqCst);
        self.send_event(DeviceEvent::Connected);
        self.enqueue_on_connect();
    }

    /// Record a closed connection; emits `Closed` if one was up. The
    /// last recorded socket error, if any, goes into the close log line.
    pub fn mark_disconnected(&mut self) {
        self.queue.clear();
        let error = self.last_error.take();
        if self.connected.swap(false, Ordering::SeqCst) {
            match error {
                Some(error) => tracing::warn!(error = %error, "connection closed"),
                None => tracing::info!("connection closed"),
            }
            self.send_event(DeviceEvent::Closed);
        }
    }

    /// Remember the socket error behind a connection loss for the close
    /// log line
    pub fn record_socket_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }

    /// The recorded socket error still waiting for its close log line
    pub fn last_socket_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Count a failed connection attempt; true while reconnecting is
    /// still allowed. A zero reconnect delay disables reconnection, a
    /// zero retry ceiling means unlimited attempts.
    pub fn retry_after_failure(&mut self) -> bool {
        if self.config.reconnect_delay.is_zero() {
            tracing::debug!("reconnection disabled");
            return false;
        }
        self.retries += 1;
        if self.config.max_retries == 0 {
            tracing::info!(attempt = self.retries, "will retry connection");
            return true;
        }
        let allowed = self.retries <= self.config.max_retries;
        if allowed {
            tracing::info!(
                attempt = self.retries,
                max = self.config.max_retries,
                "will retry connection"
            );
        } else {
            tracing::warn!(
                attempts = self.retries - 1,
                "giving up on reconnection"
            );
        }
        allowed
    }

    pub fn reset_retries(&mut self) {
        self.retries = 0;
    }

    /// Replace the connection settings; takes effect from the next
    /// connection attempt.
    pub fn set_config(&mut self, config: ConnectionConfig) {
        self.config = config;
    }

    /// Take the pending sleep-timer poll request, if any
    pub fn take_sleep_signal(&mut self) -> Option<bool> {
        self.sleep_signal.take()
    }

    // ========================================================================
    // Shared state access
    // ========================================================================

    fn features(&self) -> HashSet<String> {
        self.features.read().map(|f| f.clone()).unwrap_or_default()
    }

    fn options(&self) -> Options {
        self.options.read().map(|o| o.clone()).unwrap_or_default()
    }

    fn send_event(&self, event: DeviceEvent) {
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avr_protocol::definitions;

    struct Fixture {
        engine: Engine,
        events: mpsc::Receiver<DeviceEvent>,
        store: Arc<RwLock<HashMap<String, Value>>>,
    }

    fn fixture(feature_tags: &[&str], config: ConnectionConfig, options: Options) -> Fixture {
        let table = Arc::new(PropertyTable::build(definitions()).unwrap());
        let store = Arc::new(RwLock::new(HashMap::new()));
        let features = Arc::new(RwLock::new(
            feature_tags.iter().map(|t| t.to_string()).collect(),
        ));
        let (event_tx, events) = mpsc::channel();
        let engine = Engine::new(
            Arc::clone(&table),
            config,
            Arc::clone(&store),
            features,
            Arc::new(RwLock::new(options)),
            Arc::new(AtomicBool::new(false)),
            event_tx,
        );
        Fixture {
            engine,
            events,
            store,
        }
    }

    fn default_fixture() -> Fixture {
        fixture(&[], ConnectionConfig::default(), Options::default())
    }

    fn changed_events(rx: &mpsc::Receiver<DeviceEvent>) -> Vec<(String, Value)> {
        rx.try_iter()
            .filter_map(|e| match e {
                DeviceEvent::Changed { name, value } => Some((name, value)),
                _ => None,
            })
            .collect()
    }

    fn drain_queue(engine: &mut Engine) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(cmd) = engine.pop_query() {
            out.push(cmd);
        }
        out
    }

    #[test]
    fn test_line_updates_store_and_emits_event() {
        let mut f = default_fixture();
        f.engine.on_line("PWR0");

        assert_eq!(
            f.store.read().unwrap().get("general.power"),
            Some(&Value::Bool(true))
        );
        assert_eq!(
            changed_events(&f.events),
            vec![("general.power".to_string(), Value::Bool(true))]
        );
    }

    #[test]
    fn test_repeated_value_emits_every_time() {
        let mut f = default_fixture();
        f.engine.on_line("VOL121");
        f.engine.on_line("VOL121");

        let events = changed_events(&f.events);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|(_, v)| *v == Value::Float(-20.0)));
    }

    #[test]
    fn test_repeated_input_requeries_dependents_again() {
        let mut f = fixture(&["ToneControl"], ConnectionConfig::default(), Options::default());

        f.engine.on_line("FN04");
        assert!(drain_queue(&mut f.engine).contains(&"?BA".to_string()));

        // The same announcement dispatches in full a second time.
        f.engine.on_line("FN04");
        assert!(drain_queue(&mut f.engine).contains(&"?BA".to_string()));

        let events = changed_events(&f.events);
        let inputs = events
            .iter()
            .filter(|(name, _)| name == "general.selectedInput")
            .count();
        assert_eq!(inputs, 2);
    }

    #[test]
    fn test_unknown_line_is_ignored() {
        let mut f = default_fixture();
        f.engine.on_line("XYZ123");
        f.engine.on_line("");
        f.engine.on_line("E04");

        assert!(f.store.read().unwrap().is_empty());
        assert!(changed_events(&f.events).is_empty());
    }

    #[test]
    fn test_input_change_queues_dependent_queries() {
        let mut f = fixture(
            &["AudioStatusInfo", "ToneControl"],
            ConnectionConfig::default(),
            Options::default(),
        );
        f.engine.on_line("FN04");

        let queued = drain_queue(&mut f.engine);
        assert!(queued.contains(&"?AST".to_string()));
        assert!(queued.contains(&"?BA".to_string()));
        assert!(queued.contains(&"?TR".to_string()));
        assert!(queued.contains(&"?TO".to_string()));
    }

    #[test]
    fn test_wildcard_refresh_respects_features() {
        let mut f = fixture(&["ToneControl"], ConnectionConfig::default(), Options::default());
        f.engine.on_line("FN04");

        let queued = drain_queue(&mut f.engine);
        assert!(!queued.contains(&"?AST".to_string()));
        assert!(!queued.contains(&"?SDA".to_string()));
        assert!(queued.contains(&"?BA".to_string()));
    }

    #[test]
    fn test_gated_update_is_dropped() {
        let mut f = default_fixture();
        let line = format!("AST0502{}{}", "1".repeat(21), "1".repeat(18));
        f.engine.on_line(&line);

        assert!(f.store.read().unwrap().is_empty());
        assert!(changed_events(&f.events).is_empty());
    }

    #[test]
    fn test_audio_status_fans_out() {
        let mut f = fixture(&["AudioStatusInfo"], ConnectionConfig::default(), Options::default());
        let line = format!("AST0502{}{}", "111000000000000000000", "101000000000000000");
        f.engine.on_line(&line);

        let store = f.store.read().unwrap();
        assert_eq!(
            store.get("audio.status.signal"),
            Some(&Value::Str("DOLBY DIGITAL (48 kHz)".to_string()))
        );
        assert_eq!(
            store.get("audio.status.channelInFormat"),
            Some(&Value::Str("L,C,R".to_string()))
        );
        assert_eq!(
            store.get("audio.status.channelOutFormat"),
            Some(&Value::Str("L,R".to_string()))
        );
    }

    #[test]
    fn test_volume_write_is_clamped() {
        let options = Options {
            volume_min: Some(-20.0),
            volume_max: Some(5.0),
            ..Default::default()
        };
        let mut f = fixture(&[], ConnectionConfig::default(), options);

        let (ok, cmd) = f.engine.set_value("audio.volume", Value::Float(12.0));
        assert!(ok);
        assert_eq!(cmd.as_deref(), Some("171VL"));

        let (ok, cmd) = f.engine.set_value("audio.volume", Value::Float(-50.0));
        assert!(ok);
        assert_eq!(cmd.as_deref(), Some("121VL"));
    }

    #[test]
    fn test_single_volume_limit_does_not_clamp() {
        let options = Options {
            volume_max: Some(5.0),
            ..Default::default()
        };
        let mut f = fixture(&[], ConnectionConfig::default(), options);

        let (ok, cmd) = f.engine.set_value("audio.volume", Value::Float(12.0));
        assert!(ok);
        assert_eq!(cmd.as_deref(), Some("185VL"));
    }

    #[test]
    fn test_selected_input_by_custom_name() {
        let options = Options {
            custom_input_names: true,
            input_names: [(4, "DVD-Custom".to_string())].into_iter().collect(),
            ..Default::default()
        };
        let mut f = fixture(&[], ConnectionConfig::default(), options);

        let (ok, cmd) = f
            .engine
            .set_value("general.selectedInput", Value::Str("DVD-Custom".into()));
        assert!(ok);
        assert_eq!(cmd.as_deref(), Some("04FN"));

        // Inbound ids resolve back to the custom name.
        f.engine.on_line("FN04");
        assert_eq!(
            f.store.read().unwrap().get("general.selectedInput"),
            Some(&Value::Str("DVD-Custom".to_string()))
        );
    }

    #[test]
    fn test_input_id_stays_raw_without_custom_names() {
        let mut f = default_fixture();
        f.engine.on_line("RGB041Projector  ");
        f.engine.on_line("FN04");

        assert_eq!(
            f.store.read().unwrap().get("general.selectedInput"),
            Some(&Value::Int(4))
        );

        let (ok, cmd) = f
            .engine
            .set_value("general.selectedInput", Value::Str("Projector".into()));
        assert!(!ok);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_device_reported_input_names_feed_lookup() {
        let options = Options {
            custom_input_names: true,
            ..Default::default()
        };
        let mut f = fixture(&[], ConnectionConfig::default(), options);
        f.engine.on_line("RGB041Projector  ");
        // Names are kept for not-renamed inputs as well.
        f.engine.on_line("RGB060SAT/CBL  ");

        let (ok, cmd) = f
            .engine
            .set_value("general.selectedInput", Value::Str("Projector".into()));
        assert!(ok);
        assert_eq!(cmd.as_deref(), Some("04FN"));

        let (ok, cmd) = f
            .engine
            .set_value("general.selectedInput", Value::Str("SAT/CBL".into()));
        assert!(ok);
        assert_eq!(cmd.as_deref(), Some("06FN"));
    }

    #[test]
    fn test_unknown_input_name_fails_the_accept_pattern() {
        let options = Options {
            custom_input_names: true,
            ..Default::default()
        };
        let mut f = fixture(&[], ConnectionConfig::default(), options);
        let (ok, cmd) = f
            .engine
            .set_value("general.selectedInput", Value::Str("No Such Input".into()));
        assert!(!ok);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_button_write_requires_feature() {
        let mut f = default_fixture();
        let (ok, _) = f.engine.set_value("audio.buttonVolumeUp", Value::Bool(true));
        assert!(!ok);

        let mut f = fixture(&["BtnVolUpDown"], ConnectionConfig::default(), Options::default());
        let (ok, cmd) = f.engine.set_value("audio.buttonVolumeUp", Value::Bool(true));
        assert!(ok);
        assert_eq!(cmd.as_deref(), Some("VU"));
    }

    #[test]
    fn test_after_write_query_waits_for_the_send() {
        let mut f = fixture(&["DspSettings"], ConnectionConfig::default(), Options::default());
        let (ok, cmd) = f.engine.set_value("audio.dsp.EQ", Value::Bool(true));
        assert!(ok);
        assert_eq!(cmd.as_deref(), Some("1ATC"));
        // Encoding alone queues nothing; the confirmation query follows
        // the successful send.
        assert!(drain_queue(&mut f.engine).is_empty());

        f.engine.enqueue_after_write("audio.dsp.EQ");
        assert_eq!(drain_queue(&mut f.engine), vec!["?ATC".to_string()]);
    }

    #[test]
    fn test_read_only_property_rejects_write() {
        let mut f = default_fixture();
        let (ok, cmd) = f.engine.set_value("general.display", Value::Str("hi".into()));
        assert!(!ok);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_retry_ceiling() {
        let config = ConnectionConfig {
            max_retries: 2,
            ..Default::default()
        };
        let mut f = fixture(&[], config, Options::default());

        assert!(f.engine.retry_after_failure());
        assert!(f.engine.retry_after_failure());
        assert!(!f.engine.retry_after_failure());

        // A successful connection resets the counter.
        f.engine.mark_connected();
        assert!(f.engine.retry_after_failure());
    }

    #[test]
    fn test_zero_retry_ceiling_means_unlimited() {
        let config = ConnectionConfig {
            max_retries: 0,
            ..Default::default()
        };
        let mut f = fixture(&[], config, Options::default());

        for _ in 0..20 {
            assert!(f.engine.retry_after_failure());
        }
    }

    #[test]
    fn test_zero_reconnect_delay_disables_reconnection() {
        let config = ConnectionConfig {
            reconnect_delay: std::time::Duration::ZERO,
            ..Default::default()
        };
        let mut f = fixture(&[], config, Options::default());

        assert!(!f.engine.retry_after_failure());
    }

    #[test]
    fn test_socket_error_surfaces_on_close() {
        let mut f = default_fixture();
        f.engine.mark_connected();
        f.engine.record_socket_error("broken pipe");
        assert_eq!(f.engine.last_socket_error(), Some("broken pipe"));

        // The close consumes the recorded error.
        f.engine.mark_disconnected();
        assert_eq!(f.engine.last_socket_error(), None);
    }

    #[test]
    fn test_sleep_timer_signal() {
        let mut f = default_fixture();
        assert_eq!(f.engine.take_sleep_signal(), None);

        f.engine.on_line("SAB030");
        assert_eq!(f.engine.take_sleep_signal(), Some(true));
        assert_eq!(f.engine.take_sleep_signal(), None);

        f.engine.on_line("SAB000");
        assert_eq!(f.engine.take_sleep_signal(), Some(false));
    }

    #[test]
    fn test_connect_queues_status_refresh() {
        let mut f = default_fixture();
        f.engine.mark_connected();

        let queued = drain_queue(&mut f.engine);
        assert!(queued.contains(&"?P".to_string()));
        assert!(queued.contains(&"?V".to_string()));
        assert!(queued.contains(&"?RGB04".to_string()));
        // Gated properties stay out of the refresh.
        assert!(!queued.contains(&"?AST".to_string()));

        assert_eq!(f.events.try_recv(), Ok(DeviceEvent::Connected));
    }

    #[test]
    fn test_disconnect_clears_queue_and_emits_closed() {
        let mut f = default_fixture();
        f.engine.mark_connected();
        assert!(f.engine.has_pending_queries());

        f.engine.mark_disconnected();
        assert!(!f.engine.has_pending_queries());

        let events: Vec<_> = f.events.try_iter().collect();
        assert_eq!(events, vec![DeviceEvent::Connected, DeviceEvent::Closed]);
    }
}
