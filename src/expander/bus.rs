use embedded_hal::i2c::I2c;

use crate::expander::{
    error::ExpanderError,
    helpers::{join_word, split_word},
    register::{Port, Register},
    types::DeviceAddress,
};

/// Stateless translator from registers to I2C transactions.
///
/// Every call is exactly one bus transaction. Word transfers start at the
/// port A address and rely on the chip's auto-incrementing address pointer
/// (`IOCON.SEQOP = 0`) to reach port B.
pub struct RegisterBus<I2C> {
    i2c: I2C,
    address: DeviceAddress,
}

impl<I2C> core::fmt::Debug for RegisterBus<I2C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterBus")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl<I2C: I2c> RegisterBus<I2C> {
    pub fn new(i2c: I2C, address: DeviceAddress) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Gives the I2C bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Writes one byte to `port`'s half of `reg`.
    pub fn write_byte(
        &mut self,
        reg: Register,
        port: Port,
        value: u8,
    ) -> Result<(), ExpanderError<I2C::Error>> {
        Self::check_writable(reg)?;
        let addr = reg.address(port);

        #[cfg(feature = "defmt")]
        defmt::trace!("mcp23017 write {=u8:#04x} <- {=u8:#04x}", addr, value);

        self.i2c
            .write(self.address.value(), &[addr, value])
            .map_err(ExpanderError::Transport)
    }

    /// Writes both halves of `reg`: low byte to port A, high byte to port B.
    pub fn write_word(&mut self, reg: Register, value: u16) -> Result<(), ExpanderError<I2C::Error>> {
        Self::check_writable(reg)?;
        let addr = reg.address(Port::A);
        let (a, b) = split_word(value);

        #[cfg(feature = "defmt")]
        defmt::trace!("mcp23017 write {=u8:#04x} <- {=u16:#06x}", addr, value);

        self.i2c
            .write(self.address.value(), &[addr, a, b])
            .map_err(ExpanderError::Transport)
    }

    /// Reads one byte from `port`'s half of `reg`.
    pub fn read_byte(&mut self, reg: Register, port: Port) -> Result<u8, ExpanderError<I2C::Error>> {
        let addr = reg.address(port);
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address.value(), &[addr], &mut buf)
            .map_err(ExpanderError::Transport)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("mcp23017 read {=u8:#04x} -> {=u8:#04x}", addr, buf[0]);

        Ok(buf[0])
    }

    /// Reads both halves of `reg` as a word.
    pub fn read_word(&mut self, reg: Register) -> Result<u16, ExpanderError<I2C::Error>> {
        let addr = reg.address(Port::A);
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address.value(), &[addr], &mut buf)
            .map_err(ExpanderError::Transport)?;
        let value = join_word(buf[0], buf[1]);

        #[cfg(feature = "defmt")]
        defmt::trace!("mcp23017 read {=u8:#04x} -> {=u16:#06x}", addr, value);

        Ok(value)
    }

    fn check_writable(reg: Register) -> Result<(), ExpanderError<I2C::Error>> {
        if reg.is_read_only() {
            return Err(ExpanderError::InvalidRegister(reg));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::test_support::{ADDR, read_byte, read_word, write_byte, write_word};
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    fn bus(expectations: &[I2cTransaction]) -> RegisterBus<I2cMock> {
        RegisterBus::new(I2cMock::new(expectations), DeviceAddress::default())
    }

    #[test]
    fn byte_access_selects_port_half() {
        let expectations = [
            write_byte(Register::PullUp, Port::A, 0x5A),
            write_byte(Register::PullUp, Port::B, 0xA5),
            read_byte(Register::PortState, Port::B, 0x81),
        ];
        let mut bus = bus(&expectations);

        bus.write_byte(Register::PullUp, Port::A, 0x5A).unwrap();
        bus.write_byte(Register::PullUp, Port::B, 0xA5).unwrap();
        assert_eq!(bus.read_byte(Register::PortState, Port::B).unwrap(), 0x81);

        bus.release().done();
    }

    #[test]
    fn word_access_is_one_sequential_transaction() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x00, 0x34, 0x12]),
            I2cTransaction::write_read(ADDR, vec![0x12], vec![0xCD, 0xAB]),
        ];
        let mut bus = bus(&expectations);

        bus.write_word(Register::Direction, 0x1234).unwrap();
        assert_eq!(bus.read_word(Register::PortState).unwrap(), 0xABCD);

        bus.release().done();
    }

    #[test]
    fn read_only_registers_reject_writes_without_traffic() {
        let expectations: [I2cTransaction; 0] = [];
        let mut bus = bus(&expectations);

        assert_eq!(
            bus.write_word(Register::InterruptFlag, 0xFFFF),
            Err(ExpanderError::InvalidRegister(Register::InterruptFlag))
        );
        assert_eq!(
            bus.write_byte(Register::InterruptCapture, Port::B, 0xFF),
            Err(ExpanderError::InvalidRegister(Register::InterruptCapture))
        );

        bus.release().done();
    }

    #[test]
    fn transport_errors_propagate() {
        let expectations = [
            write_word(Register::OutputLatch, 0x00FF).with_error(ErrorKind::Other),
            read_word(Register::InterruptFlag, 0x0000).with_error(ErrorKind::Other),
        ];
        let mut bus = bus(&expectations);

        assert_eq!(
            bus.write_word(Register::OutputLatch, 0x00FF),
            Err(ExpanderError::Transport(ErrorKind::Other))
        );
        assert_eq!(
            bus.read_word(Register::InterruptFlag),
            Err(ExpanderError::Transport(ErrorKind::Other))
        );

        bus.release().done();
    }

    #[test]
    fn uses_configured_address() {
        let addr = DeviceAddress::new(5).unwrap();
        let expectations = [I2cTransaction::write(0x25, vec![0x0C, 0x01])];
        let mut bus = RegisterBus::new(I2cMock::new(&expectations), addr);

        bus.write_byte(Register::PullUp, Port::A, 0x01).unwrap();
        assert_eq!(bus.address(), addr);

        bus.release().done();
    }
}
