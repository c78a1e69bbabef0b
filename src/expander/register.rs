//! Register map of the MCP23017 with `IOCON.BANK = 0`.
//!
//! In this addressing mode the port A and port B halves of every register are
//! adjacent, so a 16-bit value can be moved in one sequential transfer with
//! the low byte on port A and the high byte on port B.

use bitflags::bitflags;

/// One of the two 8-bit GPIO ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// Pins 0..=7, low byte of a word.
    A,
    /// Pins 8..=15, high byte of a word.
    B,
}

impl Port {
    /// Offset of this port's half from the register's base address.
    #[inline]
    pub const fn offset(self) -> u8 {
        match self {
            Port::A => 0,
            Port::B => 1,
        }
    }
}

/// Logical registers of the chip.
///
/// Each exists twice, once per port. The discriminant is the port A address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// IODIR: 1 = input, 0 = output.
    Direction = 0x00,
    /// IPOL: 1 = invert the value read from an input pin.
    Polarity = 0x02,
    /// GPINTEN: 1 = interrupt-on-change enabled for the pin.
    InterruptEnable = 0x04,
    /// DEFVAL: compare value for compare-mode interrupts.
    DefaultValue = 0x06,
    /// INTCON: 1 = compare against DEFVAL, 0 = compare against previous value.
    InterruptControl = 0x08,
    /// IOCON: global configuration, mirrored at both port addresses.
    Configuration = 0x0A,
    /// GPPU: 1 = 100k pull-up enabled.
    PullUp = 0x0C,
    /// INTF: pins with a pending interrupt. Read-only.
    InterruptFlag = 0x0E,
    /// INTCAP: port levels captured when the interrupt fired. Read-only;
    /// reading it clears the interrupt.
    InterruptCapture = 0x10,
    /// GPIO: live pin levels. Writing it writes the output latch.
    PortState = 0x12,
    /// OLAT: output latch.
    OutputLatch = 0x14,
}

impl Register {
    /// Every register, in address order.
    pub const ALL: [Register; 11] = [
        Register::Direction,
        Register::Polarity,
        Register::InterruptEnable,
        Register::DefaultValue,
        Register::InterruptControl,
        Register::Configuration,
        Register::PullUp,
        Register::InterruptFlag,
        Register::InterruptCapture,
        Register::PortState,
        Register::OutputLatch,
    ];

    /// Byte address of `port`'s half of this register.
    #[inline]
    pub const fn address(self, port: Port) -> u8 {
        self as u8 + port.offset()
    }

    /// Returns true if the chip ignores writes to this register.
    #[inline]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Register::InterruptFlag | Register::InterruptCapture)
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

bitflags! {
    /// IOCON configuration register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct IoCon: u8 {
        /// INT output polarity: 1 = active-high, 0 = active-low.
        const INTPOL = 1 << 1;
        /// INT pins are open-drain (overrides INTPOL).
        const ODR = 1 << 2;
        /// Hardware address enable (MCP23S17 only, no effect over I2C).
        const HAEN = 1 << 3;
        /// Disable slew rate control on SDA.
        const DISSLW = 1 << 4;
        /// Disable the auto-incrementing address pointer.
        const SEQOP = 1 << 5;
        /// INTA and INTB are internally connected.
        const MIRROR = 1 << 6;
        /// Split registers into per-port banks. Must stay clear for this driver.
        const BANK = 1 << 7;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IoCon {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "IoCon({=u8:#04x})", self.bits())
    }
}
