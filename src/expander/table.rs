use crate::expander::{helpers::merge_masked, register::Register};

/// Registers the driver keeps a shadow copy of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shadowed {
    OutputLatch,
    Direction,
    PullUp,
    Polarity,
    InterruptEnable,
}

impl Shadowed {
    pub const ALL: [Shadowed; 5] = [
        Shadowed::OutputLatch,
        Shadowed::Direction,
        Shadowed::PullUp,
        Shadowed::Polarity,
        Shadowed::InterruptEnable,
    ];

    /// Chip register backing this shadow slot.
    pub const fn register(self) -> Register {
        match self {
            Shadowed::OutputLatch => Register::OutputLatch,
            Shadowed::Direction => Register::Direction,
            Shadowed::PullUp => Register::PullUp,
            Shadowed::Polarity => Register::Polarity,
            Shadowed::InterruptEnable => Register::InterruptEnable,
        }
    }

    /// Chip value after power-on or `reset()`.
    pub const fn power_on_value(self) -> u16 {
        match self {
            Shadowed::Direction => 0xFFFF,
            _ => 0x0000,
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl TryFrom<Register> for Shadowed {
    type Error = Register;

    fn try_from(reg: Register) -> Result<Self, Self::Error> {
        Shadowed::ALL
            .into_iter()
            .find(|s| s.register() == reg)
            .ok_or(reg)
    }
}

/// Cached copies of the configurable registers.
///
/// A value only changes after the matching chip write succeeded, so the
/// cache never runs ahead of the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShadowTable {
    words: [u16; Shadowed::ALL.len()],
}

impl ShadowTable {
    pub(crate) const fn power_on() -> Self {
        let mut words = [0u16; Shadowed::ALL.len()];
        let mut i = 0;
        while i < Shadowed::ALL.len() {
            words[i] = Shadowed::ALL[i].power_on_value();
            i += 1;
        }
        Self { words }
    }

    pub(crate) fn word(&self, reg: Shadowed) -> u16 {
        self.words[reg.slot()]
    }

    /// Value `reg` would hold after merging `data` under `mask`.
    pub(crate) fn merged(&self, reg: Shadowed, data: u16, mask: u16) -> u16 {
        merge_masked(self.word(reg), data, mask)
    }

    /// Merges `data` under `mask`, hands the result to `write`, and stores it
    /// only if `write` succeeds.
    pub(crate) fn write_through<F, E>(
        &mut self,
        reg: Shadowed,
        data: u16,
        mask: u16,
        write: F,
    ) -> Result<u16, E>
    where
        F: FnOnce(u16) -> Result<(), E>,
    {
        let value = self.merged(reg, data, mask);
        write(value)?;
        self.words[reg.slot()] = value;
        Ok(value)
    }

    /// Replaces a cached value without going through the bus.
    pub(crate) fn load(&mut self, reg: Shadowed, value: u16) {
        self.words[reg.slot()] = value;
    }
}
