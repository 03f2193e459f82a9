//! End-to-end tests against a loopback fake device
//!
//! The fake device speaks the line protocol over a real TCP socket:
//! commands arrive terminated with `\r`, responses go back as `\r\n`
//! lines. Only the handful of commands the tests exercise are answered;
//! everything else is silently ignored, like a real receiver ignoring
//! queries for features it does not have.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use avr_control::{AvrController, ConnectionConfig, DeviceEvent, EventIterator, Value};

fn spawn_fake_device() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            thread::spawn(move || serve(stream));
        }
    });

    port
}

fn serve(stream: TcpStream) {
    let mut writer = match stream.try_clone() {
        Ok(w) => w,
        Err(_) => return,
    };
    let reader = BufReader::new(stream);

    for command in reader.split(b'\r') {
        let Ok(command) = command else { break };
        let command = String::from_utf8_lossy(&command).trim().to_string();

        let response = match command.as_str() {
            "?P" => Some("PWR0".to_string()),
            "?V" => Some("VOL121".to_string()),
            "?M" => Some("MUT1".to_string()),
            "MO" => Some("MUT0".to_string()),
            "MF" => Some("MUT1".to_string()),
            // Volume writes are echoed back as the new level.
            cmd if cmd.len() == 5 && cmd.ends_with("VL") => {
                Some(format!("VOL{}", &cmd[..3]))
            }
            _ => None,
        };

        if let Some(response) = response {
            if writer
                .write_all(format!("{response}\r\n").as_bytes())
                .is_err()
            {
                break;
            }
        }
    }
}

fn test_config(port: u16) -> ConnectionConfig {
    ConnectionConfig {
        host: "127.0.0.1".to_string(),
        port,
        // A zero delay disables reconnection, keeping the tests
        // deterministic.
        reconnect_delay: Duration::ZERO,
        max_retries: 0,
        keep_alive: None,
    }
}

fn wait_for<F>(events: &EventIterator, pred: F) -> Option<DeviceEvent>
where
    F: Fn(&DeviceEvent) -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Some(event) = events.recv_timeout(Duration::from_millis(200)) {
            if pred(&event) {
                return Some(event);
            }
        }
    }
    None
}

fn wait_for_change(events: &EventIterator, property: &str) -> Option<Value> {
    wait_for(events, |e| {
        matches!(e, DeviceEvent::Changed { name, .. } if name == property)
    })
    .and_then(|e| match e {
        DeviceEvent::Changed { value, .. } => Some(value),
        _ => None,
    })
}

#[test]
fn connect_refreshes_status() {
    let port = spawn_fake_device();
    let controller = AvrController::new(test_config(port)).unwrap();
    let events = controller.events();

    controller.connect().unwrap();
    assert!(wait_for(&events, |e| *e == DeviceEvent::Connected).is_some());

    // The on-connect refresh queried power, volume and mute.
    assert_eq!(
        wait_for_change(&events, "general.power"),
        Some(Value::Bool(true))
    );
    assert_eq!(
        wait_for_change(&events, "audio.volume"),
        Some(Value::Float(-20.0))
    );
    assert_eq!(
        wait_for_change(&events, "audio.mute"),
        Some(Value::Bool(false))
    );
    assert!(controller.is_connected());
}

#[test]
fn set_value_round_trips_through_device() {
    let port = spawn_fake_device();
    let controller = AvrController::new(test_config(port)).unwrap();
    let events = controller.events();

    controller.connect().unwrap();
    assert!(wait_for(&events, |e| *e == DeviceEvent::Connected).is_some());

    // Let the on-connect refresh land its own volume update first.
    assert_eq!(
        wait_for_change(&events, "audio.volume"),
        Some(Value::Float(-20.0))
    );

    let accepted = controller.set_value("audio.volume", Value::Float(-80.0)).unwrap();
    assert!(accepted);

    // The device confirms the new level, which lands in the store.
    assert_eq!(
        wait_for_change(&events, "audio.volume"),
        Some(Value::Float(-80.0))
    );
    assert_eq!(
        controller.get_value("audio.volume"),
        Some(Value::Float(-80.0))
    );
}

#[test]
fn raw_command_feeds_dispatcher() {
    let port = spawn_fake_device();
    let controller = AvrController::new(test_config(port)).unwrap();
    let events = controller.events();

    controller.connect().unwrap();
    assert_eq!(
        wait_for_change(&events, "audio.mute"),
        Some(Value::Bool(false))
    );

    controller.send_raw("MO").unwrap();
    assert_eq!(
        wait_for_change(&events, "audio.mute"),
        Some(Value::Bool(true))
    );
}

#[test]
fn disconnect_emits_closed() {
    let port = spawn_fake_device();
    let controller = AvrController::new(test_config(port)).unwrap();
    let events = controller.events();

    controller.connect().unwrap();
    assert!(wait_for(&events, |e| *e == DeviceEvent::Connected).is_some());

    controller.disconnect().unwrap();
    assert!(wait_for(&events, |e| *e == DeviceEvent::Closed).is_some());
    assert!(!controller.is_connected());
}

#[test]
fn failed_connection_gives_up_after_retry_ceiling() {
    // Grab a port with nothing listening on it.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = ConnectionConfig {
        reconnect_delay: Duration::from_millis(50),
        max_retries: 1,
        ..test_config(port)
    };
    let controller = AvrController::new(config).unwrap();
    let events = controller.events();

    controller.connect().unwrap();

    // One retry is allowed, then the worker stops trying.
    assert!(events.recv_timeout(Duration::from_millis(500)).is_none());
    assert!(!controller.is_connected());
}

#[test]
fn reconnect_disabled_by_zero_delay() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let controller = AvrController::new(test_config(port)).unwrap();
    let events = controller.events();

    controller.connect().unwrap();

    assert!(events.recv_timeout(Duration::from_millis(300)).is_none());
    assert!(!controller.is_connected());
}

#[test]
fn rejected_write_does_not_touch_the_device() {
    let port = spawn_fake_device();
    let controller = AvrController::new(test_config(port)).unwrap();
    let events = controller.events();

    controller.connect().unwrap();
    assert!(wait_for(&events, |e| *e == DeviceEvent::Connected).is_some());

    // Read-only property: rejected before any socket write.
    let accepted = controller
        .set_value("general.display", Value::Str("nope".into()))
        .unwrap();
    assert!(!accepted);
}
