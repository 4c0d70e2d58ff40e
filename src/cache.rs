// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

use std::sync::Mutex;

use crate::{
    client::{ClientSink, ConnectionState},
    reading::Reading,
};

/// A mutually consistent pair of connection state and last reading.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheSnapshot {
    /// The connection state at the time of the snapshot.
    pub state: ConnectionState,

    /// The most recent reading, present only while connected.
    pub reading: Option<Reading>,
}

/// A [`ClientSink`] that keeps the most recent reading and connection state
/// for external consumers.
///
/// The state/reading pair lives under one lock, so a snapshot can never pair
/// a non-connected state with a reading that looks live. On any transition
/// away from `Connected` the stored reading is dropped: whether a displayed
/// number is current outranks continuity of display.
#[derive(Debug)]
pub struct ReadingCache {
    inner: Mutex<CacheSnapshot>,
}

impl ReadingCache {
    /// Constructs an empty `ReadingCache`.
    pub fn new() -> ReadingCache {
        ReadingCache {
            inner: Mutex::new(CacheSnapshot {
                state: ConnectionState::Disconnected,
                reading: None,
            }),
        }
    }

    /// Returns a consistent snapshot of the connection state and the most
    /// recent reading.
    pub fn snapshot(&self) -> CacheSnapshot {
        self.inner.lock().unwrap().clone()
    }

    /// Returns the most recent reading, or `None` while not connected.
    pub fn latest_reading(&self) -> Option<Reading> {
        self.inner.lock().unwrap().reading.clone()
    }

    /// Returns `true` while the client is connected.
    pub fn is_connected(&self) -> bool {
        self.inner.lock().unwrap().state == ConnectionState::Connected
    }
}

impl Default for ReadingCache {
    fn default() -> ReadingCache {
        ReadingCache::new()
    }
}

impl ClientSink for ReadingCache {
    fn on_reading(&self, reading: Reading) {
        let mut inner = self.inner.lock().unwrap();

        // Replaced wholesale, never merged.
        inner.reading = Some(reading);
    }

    fn on_connection_state(&self, state: ConnectionState) {
        let mut inner = self.inner.lock().unwrap();

        inner.state = state;
        if state != ConnectionState::Connected {
            inner.reading = None;
        }
    }
}
