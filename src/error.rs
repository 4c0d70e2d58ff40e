// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

use thiserror::Error;

/// A common error type.
///
/// Configuration problems (an unknown firmware identifier) are distinct from
/// transport problems so that a setup flow can tell "can't reach the boiler"
/// apart from "bad firmware selection". I/O errors only ever escape through
/// this type when starting the client; while the client is running,
/// transport faults feed the reconnect state machine instead of being
/// surfaced.
#[derive(Debug, Error)]
pub enum Error {
    /// The firmware identifier did not resolve to a known template.
    #[error("unknown firmware version {id:?}")]
    UnknownFirmware {
        /// The identifier that failed to resolve.
        id: String,
    },

    /// An I/O error on the underlying transport.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this is a configuration error rather than a
    /// transport fault.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::UnknownFirmware { .. })
    }
}

/// A common result type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fmt() {
        let error = Error::UnknownFirmware {
            id: "V99_UNKNOWN".to_owned(),
        };

        assert_eq!(
            "unknown firmware version \"V99_UNKNOWN\"",
            format!("{}", error)
        );
    }

    #[test]
    fn test_is_config_error() {
        let error = Error::UnknownFirmware {
            id: "V99_UNKNOWN".to_owned(),
        };
        assert!(error.is_config_error());

        let error = Error::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(!error.is_config_error());
    }
}
