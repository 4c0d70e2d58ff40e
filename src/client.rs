// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

//! The resilient telnet stream client.
//!
//! A single worker thread owns the socket, the frame reassembly buffer and
//! the connection state. Everything else signals into it: `stop` drops the
//! stop channel and shuts the live socket down, which interrupts whichever
//! wait the worker is in. All sink callbacks are invoked from the worker
//! thread, so subscribers observe strictly ordered, never-interleaved
//! events.

use std::{
    io::{ErrorKind, Read},
    net::{Shutdown, TcpStream, ToSocketAddrs},
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::{debug, info, warn};

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    firmware::{self, FirmwareTemplate},
    frame_text::decode_frame_bytes,
    line_buffer::LineBuffer,
    message_decoder,
    reading::Reading,
};

/// Granularity of the worker's read wait. Bounds how long a stop request or
/// a watchdog check can go unnoticed while no bytes arrive.
const READ_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// The connection state of a [`TelnetClient`].
///
/// Owned exclusively by the client's worker thread. Consumers must treat the
/// last reading as stale in any state other than `Connected`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not started, or explicitly stopped. The only terminal state.
    Disconnected,

    /// A connection attempt is in progress.
    Connecting,

    /// The transport is up and frames are expected.
    Connected,

    /// A dead connection was torn down; waiting out the flat delay before
    /// the next attempt.
    Reconnecting,
}

/// Receives decoded readings and connection-state transitions.
///
/// Both callbacks are invoked from the client's worker thread, one at a
/// time, in order: a `Connected` transition always precedes the readings of
/// that connection, and once a non-`Connected` transition was delivered no
/// further readings from the superseded connection follow.
///
/// Implementations should return promptly and must not call
/// [`TelnetClient::stop`] from within a callback.
pub trait ClientSink: Send + Sync {
    /// Called with each successfully decoded frame.
    fn on_reading(&self, reading: Reading);

    /// Called on every connection-state transition.
    fn on_connection_state(&self, state: ConnectionState);
}

/// Counters describing the client's work since construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    /// Non-empty lines received.
    pub lines_received: u64,

    /// Telemetry frames decoded into readings.
    pub frames_decoded: u64,

    /// Non-empty lines that were not telemetry frames.
    pub skipped_lines: u64,

    /// Successful connection attempts, including the first.
    pub reconnects: u64,

    /// Human-readable description of the most recent link problem.
    pub last_error: Option<String>,
}

struct Shared {
    state: Mutex<ConnectionState>,
    stream: Mutex<Option<TcpStream>>,
    stats: Mutex<Statistics>,
}

struct Worker {
    handle: JoinHandle<()>,
    stop_tx: Sender<()>,
}

/// A client for the boiler's text-telemetry endpoint.
///
/// Maintains one logical connection, recovers autonomously from link
/// failures, and reports decoded frames and state transitions to its sink.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use hargassner_telnet::{ClientConfig, ReadingCache, TelnetClient};
///
/// let cache = Arc::new(ReadingCache::new());
///
/// let config = ClientConfig::new("192.168.1.30", "V14_1HAR_q1");
/// let client = TelnetClient::new(config, cache.clone()).unwrap();
///
/// client.start().unwrap();
///
/// // ... later, from any thread:
/// let snapshot = cache.snapshot();
/// if let Some(reading) = snapshot.reading {
///     println!("boiler temperature: {:?}", reading.get("TK"));
/// }
///
/// client.stop();
/// ```
pub struct TelnetClient {
    config: ClientConfig,
    template: &'static FirmwareTemplate,
    sink: Arc<dyn ClientSink>,
    shared: Arc<Shared>,
    worker: Mutex<Option<Worker>>,
}

impl std::fmt::Debug for TelnetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnetClient")
            .field("config", &self.config)
            .field("template", &self.template.id)
            .field("state", &self.state())
            .finish()
    }
}

impl TelnetClient {
    /// Constructs a new `TelnetClient`.
    ///
    /// Fails with [`Error::UnknownFirmware`] if the configured firmware
    /// identifier does not resolve in the template registry; the client
    /// refuses to run with an undefined layout.
    pub fn new(config: ClientConfig, sink: Arc<dyn ClientSink>) -> Result<TelnetClient> {
        let template = firmware::lookup(&config.firmware).ok_or_else(|| Error::UnknownFirmware {
            id: config.firmware.clone(),
        })?;

        Ok(TelnetClient {
            config,
            template,
            sink,
            shared: Arc::new(Shared {
                state: Mutex::new(ConnectionState::Disconnected),
                stream: Mutex::new(None),
                stats: Mutex::new(Statistics::default()),
            }),
            worker: Mutex::new(None),
        })
    }

    /// Starts the background worker. Idempotent; a second call while the
    /// worker is running does nothing.
    pub fn start(&self) -> Result<()> {
        let mut worker = self.worker.lock().unwrap();

        if worker.is_some() {
            debug!("client already running");
            return Ok(());
        }

        info!(
            "starting client for {}:{} (firmware {})",
            self.config.host, self.config.port, self.template.id
        );

        let (stop_tx, stop_rx) = bounded(1);
        let ctx = WorkerCtx {
            config: self.config.clone(),
            template: self.template,
            sink: Arc::clone(&self.sink),
            shared: Arc::clone(&self.shared),
            stop_rx,
        };

        let handle = thread::Builder::new()
            .name("hargassner-telnet".to_owned())
            .spawn(move || ctx.run())?;

        *worker = Some(Worker { handle, stop_tx });

        Ok(())
    }

    /// Stops the background worker, releasing the socket.
    ///
    /// Interrupts whichever wait the worker is in and joins it; when this
    /// returns, no background activity remains and the state is
    /// `Disconnected`. Idempotent and safe to call from any state.
    pub fn stop(&self) {
        let worker = self.worker.lock().unwrap().take();

        let Some(worker) = worker else {
            return;
        };

        debug!("stopping client");

        // Dropping the sender disconnects the stop channel, which wakes the
        // reconnect-delay wait; shutting the socket down wakes a blocked
        // read.
        drop(worker.stop_tx);
        if let Some(stream) = self.shared.stream.lock().unwrap().as_ref() {
            let _ = stream.shutdown(Shutdown::Both);
        }

        let _ = worker.handle.join();
    }

    /// Returns the current connection state as a non-blocking snapshot.
    pub fn state(&self) -> ConnectionState {
        *self.shared.state.lock().unwrap()
    }

    /// Returns a snapshot of the client's statistics counters.
    pub fn statistics(&self) -> Statistics {
        self.shared.stats.lock().unwrap().clone()
    }

    /// Returns the configuration this client was constructed with,
    /// including the pass-through energy coefficients.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the firmware template this client decodes frames with.
    pub fn template(&self) -> &'static FirmwareTemplate {
        self.template
    }
}

impl Drop for TelnetClient {
    fn drop(&mut self) {
        self.stop();
    }
}

enum LinkOutcome {
    /// An explicit stop request was observed.
    Stopped,

    /// The connection is dead and must be re-established.
    LinkDown(String),
}

struct WorkerCtx {
    config: ClientConfig,
    template: &'static FirmwareTemplate,
    sink: Arc<dyn ClientSink>,
    shared: Arc<Shared>,
    stop_rx: Receiver<()>,
}

impl WorkerCtx {
    fn run(&self) {
        loop {
            if self.stop_requested() {
                break;
            }

            self.set_state(ConnectionState::Connecting);

            match self.connect() {
                Ok(stream) => {
                    self.shared.stats.lock().unwrap().reconnects += 1;
                    self.set_state(ConnectionState::Connected);

                    let outcome = self.run_connected(stream);
                    *self.shared.stream.lock().unwrap() = None;

                    match outcome {
                        LinkOutcome::Stopped => break,
                        LinkOutcome::LinkDown(reason) => {
                            // A shut-down socket reads as closed-by-peer;
                            // don't record that as a link problem when it
                            // was an explicit stop.
                            if self.stop_requested() {
                                break;
                            }
                            warn!("connection lost: {}", reason);
                            self.shared.stats.lock().unwrap().last_error = Some(reason);
                        }
                    }
                }
                Err(err) => {
                    if self.stop_requested() {
                        break;
                    }
                    warn!(
                        "connecting to {}:{} failed: {}",
                        self.config.host, self.config.port, err
                    );
                    self.shared.stats.lock().unwrap().last_error = Some(err.to_string());
                }
            }

            if self.stop_requested() {
                break;
            }

            self.set_state(ConnectionState::Reconnecting);

            // Flat delay, interruptible by stop.
            match self.stop_rx.recv_timeout(self.config.reconnect_delay) {
                Err(RecvTimeoutError::Timeout) => {}
                _ => break,
            }
        }

        self.set_state(ConnectionState::Disconnected);
    }

    fn connect(&self) -> std::io::Result<TcpStream> {
        debug!("connecting to {}:{}", self.config.host, self.config.port);

        let addr = (self.config.host.as_str(), self.config.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(ErrorKind::NotFound, "host resolved to no address")
            })?;

        TcpStream::connect_timeout(&addr, self.config.connect_timeout)
    }

    fn run_connected(&self, mut stream: TcpStream) -> LinkOutcome {
        // Register a handle so `stop` can shut the socket down from outside
        // the worker.
        match stream.try_clone() {
            Ok(clone) => *self.shared.stream.lock().unwrap() = Some(clone),
            Err(err) => debug!("socket clone failed, stop cannot interrupt reads: {}", err),
        }

        if let Err(err) = stream.set_read_timeout(Some(READ_POLL_INTERVAL)) {
            return LinkOutcome::LinkDown(format!("set_read_timeout failed: {}", err));
        }

        let mut buffer = LineBuffer::new();
        let mut chunk = [0u8; 4096];
        let mut last_frame = Instant::now();

        loop {
            if self.stop_requested() {
                return LinkOutcome::Stopped;
            }

            // The watchdog resets on decoded frames, not on raw bytes. A
            // half-dead link that dribbles noise without complete frames is
            // still dead.
            let idle = last_frame.elapsed();
            if idle > self.config.liveness_timeout {
                return LinkOutcome::LinkDown(format!(
                    "no frame for {:.1}s (liveness window {:.1}s)",
                    idle.as_secs_f64(),
                    self.config.liveness_timeout.as_secs_f64()
                ));
            }

            match stream.read(&mut chunk) {
                Ok(0) => return LinkOutcome::LinkDown("connection closed by peer".to_owned()),
                Ok(len) => {
                    buffer.extend(&chunk[0..len]);

                    if buffer.len() > self.config.max_frame_length {
                        return LinkOutcome::LinkDown(format!(
                            "no frame terminator within {} bytes",
                            buffer.len()
                        ));
                    }

                    while let Some(line) = buffer.next_line() {
                        if self.process_line(&line) {
                            last_frame = Instant::now();
                        }
                    }
                }
                Err(err)
                    if matches!(
                        err.kind(),
                        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                    ) => {}
                Err(err) => return LinkOutcome::LinkDown(format!("read failed: {}", err)),
            }
        }
    }

    /// Decodes one line and delivers the reading. Returns `true` if the
    /// line was a telemetry frame.
    fn process_line(&self, line: &[u8]) -> bool {
        if line.is_empty() {
            return false;
        }

        let text = decode_frame_bytes(line);

        let Some(tokens) = message_decoder::tokenize_frame(&text) else {
            debug!("skipping non-telemetry line: {:?}", text);
            let mut stats = self.shared.stats.lock().unwrap();
            stats.lines_received += 1;
            stats.skipped_lines += 1;
            return false;
        };

        let reading = message_decoder::decode(self.template, &tokens);

        {
            let mut stats = self.shared.stats.lock().unwrap();
            stats.lines_received += 1;
            stats.frames_decoded += 1;
        }

        self.sink.on_reading(reading);

        true
    }

    fn stop_requested(&self) -> bool {
        matches!(
            self.stop_rx.try_recv(),
            Ok(()) | Err(TryRecvError::Disconnected)
        )
    }

    fn set_state(&self, new: ConnectionState) {
        {
            let mut state = self.shared.state.lock().unwrap();
            if *state == new {
                return;
            }
            debug!("connection state {:?} -> {:?}", *state, new);
            *state = new;
        }

        self.sink.on_connection_state(new);
    }
}
