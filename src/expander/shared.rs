use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::i2c::I2c;

use crate::expander::device::Mcp23017;

/// An [`Mcp23017`] that can be reached from both thread and interrupt
/// context.
///
/// The driver's shadow registers are read-modify-write state, so two
/// contexts interleaving `write_bit` calls would lose updates. Every access
/// goes through [`with_device`](Self::with_device), which holds a critical
/// section for the whole call.
///
/// ```rust,no_run
/// use embedded_hal_mock::eh1::i2c::Mock;
/// use mcp23017_shadow::prelude::*;
///
/// let expander = Mcp23017Builder::new()
///     .default_address()
///     .default_speed()
///     .bus(Mock::new(&[]))
///     .build();
/// let shared = SharedMcp23017::new(expander);
///
/// // From an interrupt handler
/// let capture = shared.with_device(|dev| dev.ack_interrupt());
/// ```
pub struct SharedMcp23017<I2C> {
    inner: Mutex<RefCell<Mcp23017<I2C>>>,
}

impl<I2C: I2c> SharedMcp23017<I2C> {
    pub const fn new(device: Mcp23017<I2C>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(device)),
        }
    }

    /// Runs `f` on the driver inside a critical section.
    ///
    /// # Panics
    /// If called again from inside `f`.
    pub fn with_device<R>(&self, f: impl FnOnce(&mut Mcp23017<I2C>) -> R) -> R {
        critical_section::with(|cs| {
            let mut device = self.inner.borrow_ref_mut(cs);
            f(&mut device)
        })
    }

    pub fn into_inner(self) -> Mcp23017<I2C> {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::{
        pin::Pin,
        register::Register,
        test_support::{fake_device, finish, mock_device, write_word},
    };

    #[test]
    fn accesses_share_one_shadow() {
        let expectations = [
            write_word(Register::OutputLatch, 0x0001),
            write_word(Register::OutputLatch, 0x8001),
        ];
        let shared = SharedMcp23017::new(mock_device(&expectations));

        shared.with_device(|dev| dev.write_bit(Pin::GPA0, true)).unwrap();
        shared.with_device(|dev| dev.write_bit(Pin::GPB7, true)).unwrap();

        assert_eq!(shared.with_device(|dev| dev.output_latch()), 0x8001);
        finish(shared.into_inner());
    }

    #[test]
    fn closure_result_is_returned() {
        let shared = SharedMcp23017::new(fake_device());

        shared
            .with_device(|dev| dev.configure_ports(0x00FF, 0x0000, 0x0000))
            .unwrap();
        let dir = shared.with_device(|dev| dev.direction());

        assert_eq!(dir, 0x00FF);
        assert_eq!(shared.into_inner().release().word(Register::Direction), 0x00FF);
    }
}
