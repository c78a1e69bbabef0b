//! Interrupt-on-change support.
//!
//! The chip raises INTA/INTB when an enabled pin changes (or differs from
//! DEFVAL in compare mode), records the offending pins in INTF and snapshots
//! the port in INTCAP. Reading INTCAP (or GPIO) clears the condition, so
//! [`Mcp23017::ack_interrupt`] must be called once per assertion to re-arm
//! the line.

use embedded_hal::i2c::I2c;

use crate::expander::{
    device::Mcp23017,
    error::ExpanderError,
    pin::{Pin, PinSet},
    register::Register,
    table::Shadowed,
    types::PinState,
};

/// Result of acknowledging an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptCapture {
    /// Every pin that had a pending interrupt flag.
    pub pins: PinSet,
    /// Port levels captured when the interrupt fired, or the live levels if
    /// nothing was pending.
    pub values: u16,
}

impl InterruptCapture {
    /// Returns true if no pin was flagged.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Captured level of `pin`.
    pub fn level(&self, pin: Pin) -> PinState {
        PinState::from(self.values & pin.mask() != 0)
    }
}

impl<I2C: I2c> Mcp23017<I2C> {
    /// Enables interrupt-on-change for the pins in `mask`. Other pins keep
    /// their cached setting.
    pub fn enable_interrupts(&mut self, mask: u16) -> Result<(), ExpanderError<I2C::Error>> {
        self.update(Shadowed::InterruptEnable, mask, mask)
            .map(|_| ())
    }

    /// Disables interrupt-on-change for the pins in `mask`. Other pins keep
    /// their cached setting.
    pub fn disable_interrupts(&mut self, mask: u16) -> Result<(), ExpanderError<I2C::Error>> {
        self.update(Shadowed::InterruptEnable, 0x0000, mask)
            .map(|_| ())
    }

    /// Reads the pending-interrupt flags without clearing them.
    pub fn pending_interrupts(&mut self) -> Result<PinSet, ExpanderError<I2C::Error>> {
        self.bus
            .read_word(Register::InterruptFlag)
            .map(PinSet::from_bits)
    }

    /// Acknowledges the current interrupt.
    ///
    /// Reads INTF to find every flagged pin, then INTCAP for the port levels
    /// at the moment the interrupt fired. Reading INTCAP clears the
    /// interrupt on the chip. All simultaneously flagged pins are reported
    /// together; the driver does not order them.
    ///
    /// If no flag is set the live port state is returned instead of the
    /// stale capture.
    pub fn ack_interrupt(&mut self) -> Result<InterruptCapture, ExpanderError<I2C::Error>> {
        let pins = self.pending_interrupts()?;
        let values = if pins.is_empty() {
            self.bus.read_word(Register::PortState)?
        } else {
            self.bus.read_word(Register::InterruptCapture)?
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("mcp23017 ack {} values {=u16:#06x}", pins, values);

        Ok(InterruptCapture { pins, values })
    }
}
