use crate::expander::{pin::InvalidPin, register::Register, types::InvalidAddress};

/// Errors that can occur while driving the expander.
///
/// `E` is the error type of the underlying I2C transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpanderError<E> {
    /// The bus exchange failed (no acknowledge, arbitration loss, ...).
    Transport(E),
    /// Pin number outside `0..=15`.
    InvalidPin(u8),
    /// Write attempted to a register the chip only lets you read.
    InvalidRegister(Register),
    /// Hardware address selector outside `0..=7`.
    InvalidAddress(u8),
}

impl<E> From<InvalidPin> for ExpanderError<E> {
    fn from(err: InvalidPin) -> Self {
        ExpanderError::InvalidPin(err.0)
    }
}

impl<E> From<InvalidAddress> for ExpanderError<E> {
    fn from(err: InvalidAddress) -> Self {
        ExpanderError::InvalidAddress(err.0)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for ExpanderError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExpanderError::Transport(e) => write!(f, "bus transaction failed: {e:?}"),
            ExpanderError::InvalidPin(pin) => write!(f, "pin {pin} is outside 0..=15"),
            ExpanderError::InvalidRegister(reg) => write!(f, "register {reg:?} is read-only"),
            ExpanderError::InvalidAddress(sel) => {
                write!(f, "address selector {sel} is outside 0..=7")
            }
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for ExpanderError<E> {}
