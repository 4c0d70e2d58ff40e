// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

//! # hargassner-telnet.rs
//!
//! A Rust library for reading Hargassner pellet boiler telemetry over the
//! boiler's telnet text stream.
//!
//!
//! ## Features
//!
//! - Decodes the boiler's `pm` telemetry frames into named, typed channel
//!   values using per-firmware parameter templates
//! - Maintains a resilient connection: automatic reconnection with a flat
//!   retry delay and a liveness watchdog that detects half-dead links
//! - Delivers readings and connection-state transitions to a sink in strict
//!   wire order
//! - Keeps the most recent reading available to consumers through a
//!   staleness-aware cache
//!
//!
//! ## Non-features
//!
//! - No write/control access to the boiler; the telemetry stream is
//!   read-only
//! - No historical storage; each reading replaces the previous one
//! - No firmware auto-detection; the firmware version is part of the
//!   configuration
//!
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//!
//! use hargassner_telnet::{ClientConfig, ReadingCache, TelnetClient, Value};
//!
//! // The setup flow produced a host and a firmware selection.
//! let config = ClientConfig::new("192.168.1.30", "V14_1HAR_q1");
//!
//! let cache = Arc::new(ReadingCache::new());
//! let client = TelnetClient::new(config, cache.clone()).unwrap();
//!
//! client.start().unwrap();
//!
//! loop {
//!     thread::sleep(Duration::from_secs(10));
//!
//!     let snapshot = cache.snapshot();
//!     match snapshot.reading {
//!         Some(reading) => {
//!             if let Some(Value::Decimal(tk)) = reading.get("TK") {
//!                 println!("boiler temperature: {} °C", tk);
//!             }
//!             if let Some(fault) = reading.fault() {
//!                 println!("active fault: {}", fault);
//!             }
//!         }
//!         None => println!("no current data ({:?})", snapshot.state),
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![deny(missing_debug_implementations)]

mod error;
pub use error::{Error, Result};

mod value;
pub use value::Value;

mod channel;
pub use channel::{AnalogChannel, DigitalChannel};

pub mod firmware;
pub use firmware::FirmwareTemplate;

mod reading;
pub use reading::{Reading, FAULT_CHANNEL, STATE_CHANNEL};

pub mod frame_text;

mod line_buffer;
pub use line_buffer::LineBuffer;

pub mod message_decoder;

mod config;
pub use config::{ClientConfig, EnergyFactors, DEFAULT_PORT};

mod client;
pub use client::{ClientSink, ConnectionState, Statistics, TelnetClient};

mod cache;
pub use cache::{CacheSnapshot, ReadingCache};
