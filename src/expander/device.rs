use embedded_hal::i2c::I2c;

use crate::expander::{
    bus::RegisterBus,
    error::ExpanderError,
    helpers::extract_aligned,
    pin::PinNumber,
    register::{IoCon, Port, Register},
    table::{ShadowTable, Shadowed},
    types::{BusSpeed, DeviceAddress, PinMode, PinState},
};

/// Generates the cached getter, masked setter and full-word setter for a
/// shadowed register.
macro_rules! impl_shadowed_register {
    ($name:ident, $reg:ident, $what:literal) => {
        paste::paste! {
            #[doc = "Cached " $what " register. No bus traffic."]
            #[inline]
            pub fn $name(&self) -> u16 {
                self.shadow.word(Shadowed::$reg)
            }

            #[doc = "Updates the bits of the " $what " register selected by `mask` with the"]
            #[doc = "matching bits of `data`, leaving the other bits as cached."]
            #[doc = ""]
            #[doc = "The whole word is written in one transaction. The cache is only"]
            #[doc = "updated if the write succeeds."]
            pub fn [<set_ $name _mask>](
                &mut self,
                data: u16,
                mask: u16,
            ) -> Result<(), ExpanderError<I2C::Error>> {
                self.update(Shadowed::$reg, data, mask).map(|_| ())
            }

            #[doc = "Replaces all sixteen bits of the " $what " register."]
            pub fn [<set_ $name>](&mut self, word: u16) -> Result<(), ExpanderError<I2C::Error>> {
                self.update(Shadowed::$reg, word, 0xFFFF).map(|_| ())
            }
        }
    };
}

/// MCP23017 driver with a write-through register cache.
///
/// The driver assumes it is the only bus master touching the chip's
/// registers. If something else changes them, call
/// [`reload_shadow`](Self::reload_shadow) to resynchronise.
pub struct Mcp23017<I2C> {
    pub(crate) bus: RegisterBus<I2C>,
    pub(crate) shadow: ShadowTable,
    speed: BusSpeed,
}

impl<I2C> core::fmt::Debug for Mcp23017<I2C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mcp23017")
            .field("bus", &self.bus)
            .field("shadow", &self.shadow)
            .field("speed", &self.speed)
            .finish()
    }
}

impl<I2C: I2c> Mcp23017<I2C> {
    /// Creates a driver for a chip that is in its power-on state.
    ///
    /// No bus traffic. Use [`init`](Self::init) if the chip may have been
    /// configured before.
    pub fn new(i2c: I2C, address: DeviceAddress, speed: BusSpeed) -> Self {
        Self {
            bus: RegisterBus::new(i2c, address),
            shadow: ShadowTable::power_on(),
            speed,
        }
    }

    /// Creates a driver and runs [`reset`](Self::reset).
    pub fn init(
        i2c: I2C,
        address: DeviceAddress,
        speed: BusSpeed,
    ) -> Result<Self, ExpanderError<I2C::Error>> {
        let mut dev = Self::new(i2c, address, speed);
        dev.reset()?;
        Ok(dev)
    }

    /// Gives the I2C bus back.
    pub fn release(self) -> I2C {
        self.bus.release()
    }

    pub fn address(&self) -> DeviceAddress {
        self.bus.address()
    }

    pub fn speed(&self) -> BusSpeed {
        self.speed
    }

    /// Puts the chip's register file back into its power-on state.
    ///
    /// IOCON is cleared first (bank 0, sequential addressing) so the word
    /// writes that follow reach both ports whatever it held before. Then all
    /// pins become inputs, pull-ups, polarity inversion and interrupts are
    /// cleared and the output latch is zeroed. Each cached register follows
    /// its own write, so a failure part way through leaves the cache
    /// matching the chip.
    pub fn reset(&mut self) -> Result<(), ExpanderError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("mcp23017 {=u8:#04x} reset", self.address().value());

        // IOCON is mirrored, so both bytes land on it even with SEQOP set
        self.bus.write_word(Register::Configuration, 0x0000)?;
        self.update(Shadowed::Direction, 0xFFFF, 0xFFFF)?;
        for reg in Register::ALL {
            if matches!(
                reg,
                Register::Configuration | Register::Direction | Register::PortState
            ) || reg.is_read_only()
            {
                continue;
            }
            match Shadowed::try_from(reg) {
                Ok(cached) => {
                    self.update(cached, cached.power_on_value(), 0xFFFF)?;
                }
                Err(reg) => self.bus.write_word(reg, 0x0000)?,
            }
        }
        Ok(())
    }

    /// Writes direction, pull-up and polarity as whole words.
    ///
    /// For each mask bit 1 means input / pull-up enabled / inverted. The
    /// cached values are replaced, not merged.
    pub fn configure_ports(
        &mut self,
        direction: u16,
        pull_up: u16,
        polarity: u16,
    ) -> Result<(), ExpanderError<I2C::Error>> {
        self.set_direction(direction)?;
        self.set_pull_up(pull_up)?;
        self.set_polarity(polarity)
    }

    /// Writes the interrupt compare value (DEFVAL) and control mode (INTCON).
    ///
    /// A `control_mode` bit of 1 fires the pin's interrupt when it differs
    /// from `compare_value`; 0 fires on any change.
    pub fn configure_interrupts(
        &mut self,
        compare_value: u16,
        control_mode: u16,
    ) -> Result<(), ExpanderError<I2C::Error>> {
        self.bus.write_word(Register::DefaultValue, compare_value)?;
        self.bus.write_word(Register::InterruptControl, control_mode)
    }

    /// Writes IOCON verbatim.
    ///
    /// Word operations need `BANK` and `SEQOP` clear; keeping them clear is
    /// up to the caller.
    pub fn set_device_config(&mut self, config: IoCon) -> Result<(), ExpanderError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        if config.intersects(IoCon::BANK | IoCon::SEQOP) {
            defmt::warn!("mcp23017 IOCON {} breaks sequential word access", config);
        }

        self.bus
            .write_byte(Register::Configuration, Port::A, config.bits())
    }

    /// Reads IOCON from the chip.
    pub fn device_config(&mut self) -> Result<IoCon, ExpanderError<I2C::Error>> {
        let bits = self.bus.read_byte(Register::Configuration, Port::A)?;
        Ok(IoCon::from_bits_retain(bits))
    }

    impl_shadowed_register!(direction, Direction, "direction (1 = input)");
    impl_shadowed_register!(pull_up, PullUp, "pull-up (1 = enabled)");
    impl_shadowed_register!(polarity, Polarity, "input polarity (1 = inverted)");
    impl_shadowed_register!(interrupt_enable, InterruptEnable, "interrupt-enable");

    /// Cached output latch. No bus traffic.
    #[inline]
    pub fn output_latch(&self) -> u16 {
        self.shadow.word(Shadowed::OutputLatch)
    }

    /// Cached value of `reg`, if the driver caches it.
    pub fn shadow_of(&self, reg: Register) -> Option<u16> {
        Shadowed::try_from(reg).ok().map(|s| self.shadow.word(s))
    }

    /// Sets the outputs selected by `mask` to the matching bits of `data`.
    ///
    /// Pins configured as inputs still latch the value; it shows on the pin
    /// once its direction becomes output.
    pub fn write_mask(&mut self, data: u16, mask: u16) -> Result<(), ExpanderError<I2C::Error>> {
        self.update(Shadowed::OutputLatch, data, mask).map(|_| ())
    }

    /// Sets a single output.
    pub fn write_bit(
        &mut self,
        pin: impl PinNumber,
        value: bool,
    ) -> Result<(), ExpanderError<I2C::Error>> {
        let mask = pin.into_pin()?.mask();
        self.write_mask(if value { mask } else { 0 }, mask)
    }

    /// Writes all sixteen outputs.
    pub fn digital_word_write(&mut self, word: u16) -> Result<(), ExpanderError<I2C::Error>> {
        self.write_mask(word, 0xFFFF)
    }

    pub fn digital_write(
        &mut self,
        pin: impl PinNumber,
        state: PinState,
    ) -> Result<(), ExpanderError<I2C::Error>> {
        self.write_bit(pin, state == PinState::High)
    }

    pub fn pin_mode(
        &mut self,
        pin: impl PinNumber,
        mode: PinMode,
    ) -> Result<(), ExpanderError<I2C::Error>> {
        let mask = pin.into_pin()?.mask();
        let data = if mode.direction_bit() { mask } else { 0 };
        self.set_direction_mask(data, mask)
    }

    /// Enables or disables the 100k pull-up on one pin.
    pub fn set_pin_pull_up(
        &mut self,
        pin: impl PinNumber,
        enabled: bool,
    ) -> Result<(), ExpanderError<I2C::Error>> {
        let mask = pin.into_pin()?.mask();
        self.set_pull_up_mask(if enabled { mask } else { 0 }, mask)
    }

    /// Inverts (or stops inverting) the value read from one input pin.
    pub fn set_pin_polarity(
        &mut self,
        pin: impl PinNumber,
        inverted: bool,
    ) -> Result<(), ExpanderError<I2C::Error>> {
        let mask = pin.into_pin()?.mask();
        self.set_polarity_mask(if inverted { mask } else { 0 }, mask)
    }

    /// Reads the live level of all sixteen pins.
    pub fn digital_word_read(&mut self) -> Result<u16, ExpanderError<I2C::Error>> {
        self.bus.read_word(Register::PortState)
    }

    /// Reads the live levels and keeps only the bits in `mask`.
    ///
    /// Bits stay at their pin positions; use
    /// [`extract_aligned`](crate::expander::helpers::extract_aligned) to shift
    /// them down.
    pub fn read_mask(&mut self, mask: u16) -> Result<u16, ExpanderError<I2C::Error>> {
        Ok(self.digital_word_read()? & mask)
    }

    /// Reads the live level of one pin.
    pub fn read_bit(&mut self, pin: impl PinNumber) -> Result<bool, ExpanderError<I2C::Error>> {
        let mask = pin.into_pin()?.mask();
        let word = self.digital_word_read()?;
        Ok(extract_aligned(word, mask) != 0)
    }

    pub fn digital_read(&mut self, pin: impl PinNumber) -> Result<PinState, ExpanderError<I2C::Error>> {
        self.read_bit(pin).map(PinState::from)
    }

    /// Reads a whole register from the chip. The cache is not touched.
    pub fn read_register(&mut self, reg: Register) -> Result<u16, ExpanderError<I2C::Error>> {
        self.bus.read_word(reg)
    }

    /// Reads one port's half of a register from the chip. The cache is not touched.
    pub fn read_register_byte(
        &mut self,
        reg: Register,
        port: Port,
    ) -> Result<u8, ExpanderError<I2C::Error>> {
        self.bus.read_byte(reg, port)
    }

    /// Re-reads every cached register from the chip.
    ///
    /// The cache is replaced only if all reads succeed.
    pub fn reload_shadow(&mut self) -> Result<(), ExpanderError<I2C::Error>> {
        let mut words = [0u16; Shadowed::ALL.len()];
        for (word, reg) in words.iter_mut().zip(Shadowed::ALL) {
            *word = self.bus.read_word(reg.register())?;
        }
        for (word, reg) in words.into_iter().zip(Shadowed::ALL) {
            self.shadow.load(reg, word);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("mcp23017 shadow reloaded: {}", words);

        Ok(())
    }

    /// Merges `data` under `mask` into a cached register and writes the result.
    pub(crate) fn update(
        &mut self,
        reg: Shadowed,
        data: u16,
        mask: u16,
    ) -> Result<u16, ExpanderError<I2C::Error>> {
        let bus = &mut self.bus;
        self.shadow
            .write_through(reg, data, mask, |value| bus.write_word(reg.register(), value))
    }
}
