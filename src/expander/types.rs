pub use embedded_hal::digital::PinState;

/// Direction of a single pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// IODIR bit = 1. This is the power-on state of every pin.
    Input,
    /// IODIR bit = 0.
    Output,
}

impl PinMode {
    /// Value of this mode's bit in the direction register.
    #[inline]
    pub const fn direction_bit(self) -> bool {
        matches!(self, PinMode::Input)
    }
}

/// I2C clock rates the chip supports.
///
/// The bus clock is owned by whoever configured the I2C peripheral; the
/// driver only records which rate it was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSpeed {
    /// 100 kHz.
    Standard,
    /// 400 kHz.
    #[default]
    Fast,
    /// 1.7 MHz.
    HighSpeed,
}

impl BusSpeed {
    /// Clock rate in hertz.
    pub const fn hz(self) -> u32 {
        match self {
            BusSpeed::Standard => 100_000,
            BusSpeed::Fast => 400_000,
            BusSpeed::HighSpeed => 1_700_000,
        }
    }
}

/// Hardware address selector outside `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidAddress(pub u8);

/// 7-bit I2C address of the chip: `0x20` OR the A2..A0 strap pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// Address with all strap pins low.
    pub const BASE: u8 = 0x20;

    /// Builds the address from the 3-bit strap selector.
    pub const fn new(selector: u8) -> Result<Self, InvalidAddress> {
        if selector > 0b111 {
            return Err(InvalidAddress(selector));
        }
        Ok(Self(Self::BASE | selector))
    }

    /// Builds the address from the levels of the A0, A1 and A2 pins.
    pub const fn from_pins(a0: bool, a1: bool, a2: bool) -> Self {
        Self(Self::BASE | ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8))
    }

    /// The 7-bit bus address.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The strap selector the address was built from.
    #[inline]
    pub const fn selector(self) -> u8 {
        self.0 & 0b111
    }
}

impl Default for DeviceAddress {
    fn default() -> Self {
        Self(Self::BASE)
    }
}

impl From<DeviceAddress> for u8 {
    fn from(addr: DeviceAddress) -> u8 {
        addr.0
    }
}
