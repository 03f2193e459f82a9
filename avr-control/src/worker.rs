//! Background connection worker
//!
//! Spawns a thread with its own tokio runtime that owns the TCP connection
//! and the [`Engine`], while exposing a sync command API to the parent
//! [`AvrController`](crate::AvrController).
//!
//! All timing lives here: the query drain timer, the reconnect backoff and
//! the sleep-timer countdown poll. Each is a plain `Option<Instant>`
//! deadline handled by one `select!` branch.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc as tokio_mpsc, oneshot};
use tokio::time::Instant;

use avr_protocol::{PropertyTable, Value};

use crate::config::{ConnectionConfig, Options};
use crate::engine::Engine;
use crate::event::DeviceEvent;
use crate::queue::QUERY_COMMAND_DELAY;

/// Interval between sleep-timer countdown polls while the timer runs
const SLEEP_TIMER_POLL: Duration = Duration::from_secs(30);

/// Commands sent from the sync AvrController to the background worker
#[derive(Debug)]
pub enum Command {
    /// Replace the connection settings (applies from the next attempt)
    SetConfig(ConnectionConfig),
    /// Open the connection (enables reconnection until Disconnect)
    Connect,
    /// Close the connection and stop reconnecting
    Disconnect,
    /// Queue a full status refresh
    QueryStatus,
    /// Queue the query for one property or a `prefix.*` wildcard
    Query(String),
    /// Send a raw wire command, bypassing the property table
    SendRaw(String),
    /// Encode and send a property write
    SetValue {
        name: String,
        value: Value,
        reply: oneshot::Sender<bool>,
    },
    /// Shutdown the worker
    Shutdown,
}

/// Shared state handed to the worker at spawn time
pub struct Shared {
    pub table: Arc<PropertyTable>,
    pub store: Arc<RwLock<HashMap<String, Value>>>,
    pub features: Arc<RwLock<HashSet<String>>>,
    pub options: Arc<RwLock<Options>>,
    pub connected: Arc<AtomicBool>,
}

struct Connection {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

/// Spawns the background connection worker thread
///
/// The worker owns its own tokio runtime and manages:
/// - The TCP connection and line framing
/// - The protocol engine (dispatch, hooks, store)
/// - Query rate limiting and reconnection
pub fn spawn_worker(
    config: ConnectionConfig,
    shared: Shared,
    command_rx: tokio_mpsc::UnboundedReceiver<Command>,
    event_tx: mpsc::Sender<DeviceEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to create tokio runtime for connection worker: {}", e);
                return;
            }
        };

        rt.block_on(async {
            run_connection_loop(config, shared, command_rx, event_tx).await;
        });
    })
}

/// Main loop running inside the tokio runtime
async fn run_connection_loop(
    mut config: ConnectionConfig,
    shared: Shared,
    mut command_rx: tokio_mpsc::UnboundedReceiver<Command>,
    event_tx: mpsc::Sender<DeviceEvent>,
) {
    let mut engine = Engine::new(
        shared.table,
        config.clone(),
        shared.store,
        shared.features,
        shared.options,
        shared.connected,
        event_tx,
    );

    let mut conn: Option<Connection> = None;
    let mut want_connection = false;

    // Deadlines; `None` means the corresponding timer is not armed.
    let mut drain_deadline: Option<Instant> = None;
    let mut reconnect_deadline: Option<Instant> = None;
    let mut sleep_poll_deadline: Option<Instant> = None;

    tracing::info!("Connection worker started");

    loop {
        tokio::select! {
            cmd = command_rx.recv() => {
                match cmd {
                    None | Some(Command::Shutdown) => {
                        tracing::info!("Worker received shutdown command");
                        break;
                    }
                    Some(Command::SetConfig(new_config)) => {
                        engine.set_config(new_config.clone());
                        config = new_config;
                    }
                    Some(Command::Connect) => {
                        want_connection = true;
                        engine.reset_retries();
                        reconnect_deadline = None;
                        if conn.is_none() {
                            match open_connection(&config).await {
                                Ok(c) => {
                                    conn = Some(c);
                                    engine.mark_connected();
                                    arm_drain(&engine, &mut drain_deadline);
                                }
                                Err(e) => {
                                    tracing::warn!("Connection to {}:{} failed: {}", config.host, config.port, e);
                                    schedule_reconnect(
                                        &config,
                                        &mut engine,
                                        &mut want_connection,
                                        &mut reconnect_deadline,
                                    );
                                }
                            }
                        }
                    }
                    Some(Command::Disconnect) => {
                        want_connection = false;
                        reconnect_deadline = None;
                        drain_deadline = None;
                        sleep_poll_deadline = None;
                        conn = None;
                        engine.mark_disconnected();
                    }
                    Some(Command::QueryStatus) => {
                        engine.enqueue_on_connect();
                        arm_drain(&engine, &mut drain_deadline);
                    }
                    Some(Command::Query(name)) => {
                        engine.enqueue_queries_for(&name);
                        arm_drain(&engine, &mut drain_deadline);
                    }
                    Some(Command::SendRaw(raw)) => {
                        if conn.is_some() {
                            if let Err(e) = send(&mut conn, &raw).await {
                                engine.record_socket_error(e.to_string());
                                conn = None;
                                on_connection_lost(
                                    &config,
                                    &mut engine,
                                    &mut want_connection,
                                    &mut drain_deadline,
                                    &mut reconnect_deadline,
                                );
                            }
                        }
                    }
                    Some(Command::SetValue { name, value, reply }) => {
                        let (mut ok, command) = engine.set_value(&name, value);
                        if let Some(command) = command {
                            if conn.is_some() {
                                match send(&mut conn, &command).await {
                                    // The re-query goes out only once the
                                    // write actually did.
                                    Ok(()) => engine.enqueue_after_write(&name),
                                    Err(e) => {
                                        ok = false;
                                        engine.record_socket_error(e.to_string());
                                        conn = None;
                                        on_connection_lost(
                                            &config,
                                            &mut engine,
                                            &mut want_connection,
                                            &mut drain_deadline,
                                            &mut reconnect_deadline,
                                        );
                                    }
                                }
                            } else {
                                ok = false;
                            }
                        }
                        let _ = reply.send(ok);
                        arm_drain(&engine, &mut drain_deadline);
                    }
                }
            }

            line = async { conn.as_mut().unwrap().lines.next_line().await }, if conn.is_some() => {
                match line {
                    Ok(Some(line)) => {
                        engine.on_line(&line);
                        arm_drain(&engine, &mut drain_deadline);
                        if let Some(active) = engine.take_sleep_signal() {
                            sleep_poll_deadline = active.then(|| Instant::now() + SLEEP_TIMER_POLL);
                        }
                    }
                    Ok(None) => {
                        tracing::info!("Connection closed by device");
                        conn = None;
                        on_connection_lost(
                            &config,
                            &mut engine,
                            &mut want_connection,
                            &mut drain_deadline,
                            &mut reconnect_deadline,
                        );
                    }
                    Err(e) => {
                        tracing::warn!("Read error: {}", e);
                        engine.record_socket_error(e.to_string());
                        conn = None;
                        on_connection_lost(
                            &config,
                            &mut engine,
                            &mut want_connection,
                            &mut drain_deadline,
                            &mut reconnect_deadline,
                        );
                    }
                }
            }

            // Drain one queued query, then re-arm while more are waiting.
            _ = async { tokio::time::sleep_until(drain_deadline.unwrap()).await },
                if drain_deadline.is_some() =>
            {
                drain_deadline = None;
                if conn.is_some() {
                    if let Some(command) = engine.pop_query() {
                        if let Err(e) = send(&mut conn, &command).await {
                            engine.record_socket_error(e.to_string());
                            conn = None;
                            on_connection_lost(
                                &config,
                                &mut engine,
                                &mut want_connection,
                                &mut drain_deadline,
                                &mut reconnect_deadline,
                            );
                        }
                    }
                }
                if conn.is_some() && engine.has_pending_queries() {
                    drain_deadline = Some(Instant::now() + QUERY_COMMAND_DELAY);
                }
            }

            _ = async { tokio::time::sleep_until(reconnect_deadline.unwrap()).await },
                if reconnect_deadline.is_some() =>
            {
                reconnect_deadline = None;
                if want_connection && conn.is_none() {
                    match open_connection(&config).await {
                        Ok(c) => {
                            conn = Some(c);
                            engine.mark_connected();
                            arm_drain(&engine, &mut drain_deadline);
                        }
                        Err(e) => {
                            tracing::warn!("Reconnection to {}:{} failed: {}", config.host, config.port, e);
                            schedule_reconnect(
                                &config,
                                &mut engine,
                                &mut want_connection,
                                &mut reconnect_deadline,
                            );
                        }
                    }
                }
            }

            _ = async { tokio::time::sleep_until(sleep_poll_deadline.unwrap()).await },
                if sleep_poll_deadline.is_some() =>
            {
                sleep_poll_deadline = None;
                if conn.is_some() {
                    engine.enqueue_queries_for("amp.sleepTimer");
                    arm_drain(&engine, &mut drain_deadline);
                }
            }
        }
    }

    engine.mark_disconnected();
    tracing::info!("Connection worker shut down");
}

/// Arm the drain timer if queries are waiting and it is not already armed
fn arm_drain(engine: &Engine, drain_deadline: &mut Option<Instant>) {
    if drain_deadline.is_none() && engine.has_pending_queries() {
        *drain_deadline = Some(Instant::now() + QUERY_COMMAND_DELAY);
    }
}

/// Bookkeeping after an unexpected connection loss
fn on_connection_lost(
    config: &ConnectionConfig,
    engine: &mut Engine,
    want_connection: &mut bool,
    drain_deadline: &mut Option<Instant>,
    reconnect_deadline: &mut Option<Instant>,
) {
    *drain_deadline = None;
    engine.mark_disconnected();
    schedule_reconnect(config, engine, want_connection, reconnect_deadline);
}

fn schedule_reconnect(
    config: &ConnectionConfig,
    engine: &mut Engine,
    want_connection: &mut bool,
    reconnect_deadline: &mut Option<Instant>,
) {
    if *want_connection && engine.retry_after_failure() {
        *reconnect_deadline = Some(Instant::now() + config.reconnect_delay);
    } else {
        *want_connection = false;
        *reconnect_deadline = None;
    }
}

/// Open the TCP connection and apply the keepalive settings
async fn open_connection(config: &ConnectionConfig) -> io::Result<Connection> {
    let stream = TcpStream::connect((config.host.as_str(), config.port)).await?;

    if let Some(interval) = config.keep_alive {
        let std_stream = stream.into_std()?;
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(interval)
            .with_interval(interval);
        socket2::SockRef::from(&std_stream).set_tcp_keepalive(&keepalive)?;
        let stream = TcpStream::from_std(std_stream)?;
        return Ok(split(stream));
    }

    Ok(split(stream))
}

fn split(stream: TcpStream) -> Connection {
    let (read_half, writer) = stream.into_split();
    Connection {
        lines: BufReader::new(read_half).lines(),
        writer,
    }
}

/// Write one command with the protocol terminator
async fn send(conn: &mut Option<Connection>, command: &str) -> io::Result<()> {
    let Some(conn) = conn.as_mut() else {
        tracing::debug!(command, "dropping command, not connected");
        return Err(io::Error::new(io::ErrorKind::NotConnected, "not connected"));
    };
    tracing::trace!(command, "sending");
    let framed = format!("{command}\r");
    if let Err(e) = conn.writer.write_all(framed.as_bytes()).await {
        tracing::warn!("Write error: {}", e);
        return Err(e);
    }
    conn.writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_debug() {
        let cmd = Command::Query("audio.volume".to_string());
        assert!(format!("{:?}", cmd).contains("Query"));
    }
}
