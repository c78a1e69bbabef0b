use core::marker::PhantomData;

use embedded_hal::i2c::I2c;

use crate::expander::{
    device::Mcp23017,
    error::ExpanderError,
    types::{BusSpeed, DeviceAddress},
};

// Builder states
pub struct NeedAddress;
pub struct NeedSpeed;
pub struct NeedBus;
pub struct Ready;

/// Step-by-step construction of an [`Mcp23017`].
///
/// ```rust,no_run
/// use embedded_hal_mock::eh1::i2c::Mock;
/// use mcp23017_shadow::prelude::*;
///
/// let expander = Mcp23017Builder::new()
///     .address(DeviceAddress::from_pins(true, false, false))
///     .speed(BusSpeed::Standard)
///     .bus(Mock::new(&[]))
///     .build();
/// assert_eq!(expander.address().value(), 0x21);
/// ```
pub struct Mcp23017Builder<I2C, State> {
    address: DeviceAddress,
    speed: BusSpeed,
    i2c: I2C,
    _phantom: PhantomData<State>,
}

// Start the builder
impl Mcp23017Builder<(), NeedAddress> {
    pub fn new() -> Self {
        Mcp23017Builder {
            address: DeviceAddress::default(),
            speed: BusSpeed::default(),
            i2c: (),
            _phantom: PhantomData,
        }
    }
}

impl Default for Mcp23017Builder<(), NeedAddress> {
    fn default() -> Self {
        Self::new()
    }
}

// Set address
impl Mcp23017Builder<(), NeedAddress> {
    pub fn address(self, address: DeviceAddress) -> Mcp23017Builder<(), NeedSpeed> {
        Mcp23017Builder {
            address,
            speed: self.speed,
            i2c: (),
            _phantom: PhantomData,
        }
    }

    /// Use address `0x20` (all strap pins low).
    pub fn default_address(self) -> Mcp23017Builder<(), NeedSpeed> {
        self.address(DeviceAddress::default())
    }
}

// Set speed
impl Mcp23017Builder<(), NeedSpeed> {
    pub fn speed(self, speed: BusSpeed) -> Mcp23017Builder<(), NeedBus> {
        Mcp23017Builder {
            address: self.address,
            speed,
            i2c: (),
            _phantom: PhantomData,
        }
    }

    /// Use 400 kHz.
    pub fn default_speed(self) -> Mcp23017Builder<(), NeedBus> {
        self.speed(BusSpeed::default())
    }
}

// Attach the bus
impl Mcp23017Builder<(), NeedBus> {
    pub fn bus<I2C: I2c>(self, i2c: I2C) -> Mcp23017Builder<I2C, Ready> {
        Mcp23017Builder {
            address: self.address,
            speed: self.speed,
            i2c,
            _phantom: PhantomData,
        }
    }
}

impl<I2C: I2c> Mcp23017Builder<I2C, Ready> {
    /// Builds a driver that assumes the chip is in its power-on state.
    pub fn build(self) -> Mcp23017<I2C> {
        Mcp23017::new(self.i2c, self.address, self.speed)
    }

    /// Builds the driver and resets the chip.
    pub fn init(self) -> Result<Mcp23017<I2C>, ExpanderError<I2C::Error>> {
        Mcp23017::init(self.i2c, self.address, self.speed)
    }
}
