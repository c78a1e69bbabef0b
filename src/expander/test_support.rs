//! Test support utilities - only compiled in test builds.

use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

use crate::expander::{
    device::Mcp23017,
    helpers::{join_word, split_word},
    register::{IoCon, Port, Register},
    types::{BusSpeed, DeviceAddress},
};

/// Bus address used by every test device (all strap pins low).
pub const ADDR: u8 = 0x20;

/// Number of byte registers in the bank 0 map.
const REG_COUNT: u8 = 0x16;

/// Expected sequential word write starting at `reg`'s port A address.
pub fn write_word(reg: Register, value: u16) -> I2cTransaction {
    let (a, b) = split_word(value);
    I2cTransaction::write(ADDR, vec![reg.address(Port::A), a, b])
}

/// Expected sequential word read starting at `reg`'s port A address.
pub fn read_word(reg: Register, value: u16) -> I2cTransaction {
    let (a, b) = split_word(value);
    I2cTransaction::write_read(ADDR, vec![reg.address(Port::A)], vec![a, b])
}

/// Expected single byte write.
pub fn write_byte(reg: Register, port: Port, value: u8) -> I2cTransaction {
    I2cTransaction::write(ADDR, vec![reg.address(port), value])
}

/// Expected single byte read.
pub fn read_byte(reg: Register, port: Port, value: u8) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![reg.address(port)], vec![value])
}

/// Transactions issued by `reset()`.
pub fn reset_sequence() -> Vec<I2cTransaction> {
    vec![
        write_word(Register::Configuration, 0x0000),
        write_word(Register::Direction, 0xFFFF),
        write_word(Register::Polarity, 0x0000),
        write_word(Register::InterruptEnable, 0x0000),
        write_word(Register::DefaultValue, 0x0000),
        write_word(Register::InterruptControl, 0x0000),
        write_word(Register::PullUp, 0x0000),
        write_word(Register::OutputLatch, 0x0000),
    ]
}

/// Driver over a mock bus expecting exactly `expectations`.
pub fn mock_device(expectations: &[I2cTransaction]) -> Mcp23017<I2cMock> {
    Mcp23017::new(I2cMock::new(expectations), test_address(), BusSpeed::Fast)
}

/// Releases the mock bus and asserts every expectation was consumed.
pub fn finish(dev: Mcp23017<I2cMock>) {
    let mut i2c = dev.release();
    i2c.done();
}

/// Driver over a [`FakeChip`] in its power-on state.
pub fn fake_device() -> Mcp23017<FakeChip> {
    Mcp23017::new(FakeChip::new(), test_address(), BusSpeed::Fast)
}

pub fn test_address() -> DeviceAddress {
    DeviceAddress::default()
}

/// Register-level model of an MCP23017 in bank 0, sequential mode.
///
/// Output pins read back their latch value, input pins read `inputs`
/// (inverted where IPOL is set). Reading INTCAP or GPIO clears the port's
/// interrupt flags. IOCON appears at both of its addresses, and with
/// `SEQOP` set the address pointer stays put.
pub struct FakeChip {
    pub address: u8,
    pub regs: [u8; REG_COUNT as usize],
    /// Levels driven onto the pins from outside.
    pub inputs: u16,
    /// When set, every write carrying data is rejected with a NACK.
    pub fail_writes: bool,
    /// Completed bus transactions.
    pub transactions: usize,
    pointer: u8,
}

impl FakeChip {
    pub fn new() -> Self {
        let mut regs = [0u8; REG_COUNT as usize];
        regs[0x00] = 0xFF;
        regs[0x01] = 0xFF;
        Self {
            address: ADDR,
            regs,
            inputs: 0x0000,
            fail_writes: false,
            transactions: 0,
            pointer: 0,
        }
    }

    pub fn word(&self, reg: Register) -> u16 {
        let a = reg.address(Port::A) as usize;
        join_word(self.regs[a], self.regs[a + 1])
    }

    pub fn set_word(&mut self, reg: Register, value: u16) {
        let a = reg.address(Port::A) as usize;
        let (lo, hi) = split_word(value);
        self.regs[a] = lo;
        self.regs[a + 1] = hi;
    }

    /// Flags `pins` as interrupting and captures the current port state.
    pub fn raise_interrupt(&mut self, pins: u16) {
        let flags = self.word(Register::InterruptFlag) | pins;
        let capture = self.port_state();
        self.set_word(Register::InterruptFlag, flags);
        self.set_word(Register::InterruptCapture, capture);
    }

    pub fn port_state(&self) -> u16 {
        let dir = self.word(Register::Direction);
        let ipol = self.word(Register::Polarity);
        let olat = self.word(Register::OutputLatch);
        (olat & !dir) | ((self.inputs ^ ipol) & dir)
    }

    fn clear_flags(&mut self, addr: u8) {
        let port = (addr & 1) as usize;
        self.regs[Register::InterruptFlag.address(Port::A) as usize + port] = 0;
    }

    fn read_byte(&mut self, addr: u8) -> u8 {
        let gpio = Register::PortState.address(Port::A);
        let intcap = Register::InterruptCapture.address(Port::A);
        if addr == gpio || addr == gpio + 1 {
            self.clear_flags(addr);
            let (a, b) = split_word(self.port_state());
            return if addr == gpio { a } else { b };
        }
        if addr == intcap || addr == intcap + 1 {
            self.clear_flags(addr);
        }
        self.regs[addr as usize]
    }

    fn write_byte(&mut self, addr: u8, value: u8) {
        let gpio = Register::PortState.address(Port::A);
        let intf = Register::InterruptFlag.address(Port::A);
        if (intf..gpio).contains(&addr) {
            return;
        }
        if addr == gpio || addr == gpio + 1 {
            // GPIO writes land in OLAT
            self.regs[addr as usize + 2] = value;
            return;
        }
        let iocon = Register::Configuration.address(Port::A);
        if addr == iocon || addr == iocon + 1 {
            self.regs[iocon as usize] = value;
            self.regs[iocon as usize + 1] = value;
            return;
        }
        self.regs[addr as usize] = value;
    }

    fn advance(&mut self) {
        let iocon = self.regs[Register::Configuration.address(Port::A) as usize];
        if IoCon::from_bits_retain(iocon).contains(IoCon::SEQOP) {
            return;
        }
        self.pointer = (self.pointer + 1) % REG_COUNT;
    }
}

impl Default for FakeChip {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for FakeChip {
    type Error = ErrorKind;
}

impl I2c for FakeChip {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    if self.fail_writes && !data.is_empty() {
                        return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
                    }
                    self.pointer = reg % REG_COUNT;
                    for &byte in data {
                        self.write_byte(self.pointer, byte);
                        self.advance();
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.read_byte(self.pointer);
                        self.advance();
                    }
                }
            }
        }

        self.transactions += 1;
        Ok(())
    }
}
