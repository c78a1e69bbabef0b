pub mod builder;
pub mod bus;
pub mod device;
pub mod error;
pub mod helpers;
pub mod interrupt;
pub mod pin;
pub mod register;
pub mod shared;
pub(crate) mod table;
pub mod types;

#[cfg(test)]
mod test_support;

pub use builder::Mcp23017Builder;
pub use bus::RegisterBus;
pub use device::Mcp23017;
pub use error::ExpanderError;
pub use interrupt::InterruptCapture;
pub use pin::{InvalidPin, Pin, PinNumber, PinSet};
pub use register::{IoCon, Port, Register};
pub use shared::SharedMcp23017;
pub use table::Shadowed;
pub use types::{BusSpeed, DeviceAddress, InvalidAddress, PinMode, PinState};

pub mod prelude {
    pub use super::{
        BusSpeed, DeviceAddress, ExpanderError, InterruptCapture, InvalidAddress, InvalidPin,
        IoCon, Mcp23017, Mcp23017Builder, Pin, PinMode, PinNumber, PinSet, PinState, Port,
        Register, RegisterBus, Shadowed, SharedMcp23017,
    };
}
