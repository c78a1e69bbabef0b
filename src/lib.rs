//! A `no_std`, no-alloc driver for the MCP23017 16-bit I/O expander.
//!
//! The chip sits on an I2C bus and exposes two 8-bit GPIO ports (A and B)
//! through a small register file. This crate drives it through any
//! [`embedded_hal::i2c::I2c`] implementation and keeps a local shadow copy
//! of the registers the application configures, so pin-level updates are a
//! single write instead of a read-modify-write over the bus.
//!
//! # Features
//!
//! - **Zero heap allocation** - the shadow cache is five `u16` words
//! - **Write-through shadow** - the cache only changes after the chip acknowledged the write
//! - **Masked updates** - `(old & !mask) | (data & mask)` on every cached register
//! - **Atomic interrupt acknowledgement** - all pending pins are reported as one [`PinSet`](expander::PinSet)
//! - **Optional `defmt` logging** of every register transaction
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │  Mcp23017 (facade)       │  pin_mode / digital_write / write_mask
//! │                          │  enable_interrupts / ack_interrupt
//! │  ┌────────────────────┐  │
//! │  │ ShadowTable        │  │  direction, pull-up, polarity,
//! │  │ (cached words)     │  │  interrupt-enable, output latch
//! │  └────────────────────┘  │
//! └────────────┬─────────────┘
//!              │ write_word / read_word
//! ┌────────────▼─────────────┐
//! │  RegisterBus (stateless) │  Register + Port -> byte address
//! └────────────┬─────────────┘
//!              │ embedded_hal::i2c::I2c
//!              ▼
//!          MCP23017 chip
//! ```
//!
//! Registers are addressed with `IOCON.BANK = 0`, so every 16-bit register is
//! two sequential bytes: port A at the base offset, port B one above it.
//!
//! # Example
//!
//! ```rust,no_run
//! use embedded_hal_mock::eh1::i2c::Mock;
//! use mcp23017_shadow::prelude::*;
//!
//! # fn main() -> Result<(), ExpanderError<embedded_hal::i2c::ErrorKind>> {
//! let i2c = Mock::new(&[]);
//!
//! let mut expander = Mcp23017Builder::new()
//!     .address(DeviceAddress::new(0b001)?)
//!     .default_speed()
//!     .bus(i2c)
//!     .init()?;
//!
//! // Low byte = port A, high byte = port B.
//! expander.configure_ports(0xFF00, 0xFF00, 0x0000)?;
//! expander.digital_write(Pin::GPA3, PinState::High)?;
//!
//! expander.enable_interrupts(0xFF00)?;
//! let capture = expander.ack_interrupt()?;
//! for pin in capture.pins.iter() {
//!     let _level = capture.level(pin);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod expander;

pub mod prelude {
    pub use crate::expander::prelude::*;
}
