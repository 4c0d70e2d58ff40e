// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

/// The runtime value of a single channel within a `Reading`.
///
/// A channel is either correctly typed or explicitly [`Value::Unavailable`].
/// A token that fails to parse never silently defaults to zero, since a
/// plausible-looking default would masquerade as real data.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// An analog channel value.
    Decimal(f64),

    /// A digital channel value (bit set/clear within its word).
    Flag(bool),

    /// A raw code from one of the fixed fields (boiler state, fault number).
    Code(u16),

    /// The channel was not reported or its token could not be parsed.
    Unavailable,
}

impl Value {
    /// Returns the analog value, if this is a `Decimal`.
    pub fn as_decimal(&self) -> Option<f64> {
        match *self {
            Value::Decimal(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the digital value, if this is a `Flag`.
    pub fn as_flag(&self) -> Option<bool> {
        match *self {
            Value::Flag(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the raw code, if this is a `Code`.
    pub fn as_code(&self) -> Option<u16> {
        match *self {
            Value::Code(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` unless this is the `Unavailable` sentinel.
    pub fn is_available(&self) -> bool {
        !matches!(*self, Value::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Some(62.5), Value::Decimal(62.5).as_decimal());
        assert_eq!(None, Value::Flag(true).as_decimal());

        assert_eq!(Some(true), Value::Flag(true).as_flag());
        assert_eq!(None, Value::Code(7).as_flag());

        assert_eq!(Some(7), Value::Code(7).as_code());
        assert_eq!(None, Value::Unavailable.as_code());
    }

    #[test]
    fn test_is_available() {
        assert!(Value::Decimal(0.0).is_available());
        assert!(Value::Flag(false).is_available());
        assert!(Value::Code(0).is_available());
        assert!(!Value::Unavailable.is_available());
    }
}
