// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

use std::time::Duration;

/// The well-known telnet port the boiler publishes its telemetry on.
pub const DEFAULT_PORT: u16 = 23;

/// Default liveness window. Frames normally arrive every few seconds, so a
/// minute without one means the link is dead even if the socket still looks
/// open.
pub const DEFAULT_LIVENESS_TIMEOUT: Duration = Duration::from_secs(60);

/// Default delay between reconnect attempts. Flat on purpose: exponential
/// backoff over-dampened recovery in the field, a short constant delay keeps
/// recovery prompt and the retry cadence predictable.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Default timeout for establishing the TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default ceiling for the frame reassembly buffer. A peer that never sends
/// a line terminator is violating the protocol; breaching this forces a
/// reconnect instead of unbounded growth.
pub const DEFAULT_MAX_FRAME_LENGTH: usize = 16 * 1024;

/// Coefficients for converting cumulative pellet consumption into energy
/// output. The client passes these through untouched; the consumer applies
/// them to its computed consumption deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyFactors {
    /// Energy content of the fuel in kWh per kg (typically around 4.8 for
    /// wood pellets).
    pub kwh_per_kg: f64,

    /// Boiler efficiency as a factor in (0, 1].
    pub efficiency: f64,
}

impl EnergyFactors {
    /// Converts a pellet mass in kg into the energy output in kWh.
    pub fn energy_kwh(&self, kg: f64) -> f64 {
        kg * self.kwh_per_kg * self.efficiency
    }
}

/// Connection parameters for a [`TelnetClient`](crate::TelnetClient).
///
/// Produced by an external setup flow; the client consumes it as-is. The
/// firmware identifier must resolve in the firmware template registry or
/// client construction fails.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// IP address or hostname of the boiler.
    pub host: String,

    /// Telnet port, normally [`DEFAULT_PORT`].
    pub port: u16,

    /// Firmware version identifier, e.g. `"V14_1HAR_q1"`.
    pub firmware: String,

    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,

    /// Maximum tolerated gap between decoded frames before the connection
    /// is presumed dead.
    pub liveness_timeout: Duration,

    /// Flat delay between reconnect attempts.
    pub reconnect_delay: Duration,

    /// Ceiling for the frame reassembly buffer.
    pub max_frame_length: usize,

    /// Optional energy-calculation coefficients, passed through for the
    /// consumer.
    pub energy: Option<EnergyFactors>,
}

impl ClientConfig {
    /// Constructs a config for the given host and firmware version with all
    /// other parameters at their defaults.
    pub fn new<H: Into<String>, F: Into<String>>(host: H, firmware: F) -> ClientConfig {
        ClientConfig {
            host: host.into(),
            port: DEFAULT_PORT,
            firmware: firmware.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            liveness_timeout: DEFAULT_LIVENESS_TIMEOUT,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            max_frame_length: DEFAULT_MAX_FRAME_LENGTH,
            energy: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = ClientConfig::new("192.168.1.30", "V14_1HAR_q1");

        assert_eq!("192.168.1.30", config.host);
        assert_eq!(23, config.port);
        assert_eq!("V14_1HAR_q1", config.firmware);
        assert_eq!(Duration::from_secs(60), config.liveness_timeout);
        assert_eq!(Duration::from_secs(5), config.reconnect_delay);
        assert_eq!(None, config.energy);
    }

    #[test]
    fn test_energy_kwh() {
        let factors = EnergyFactors {
            kwh_per_kg: 4.8,
            efficiency: 0.9,
        };

        assert!((factors.energy_kwh(100.0) - 432.0).abs() < 1e-9);
        assert_eq!(0.0, factors.energy_kwh(0.0));
    }
}
