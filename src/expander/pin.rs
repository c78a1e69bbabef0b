use bitmaps::Bitmap;
use heapless::Vec;

use crate::expander::register::Port;

/// Pin number outside `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidPin(pub u8);

/// A validated pin number.
///
/// Pins 0..=7 are GPA0..GPA7 on port A, pins 8..=15 are GPB0..GPB7 on port B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(u8);

impl Pin {
    pub const GPA0: Pin = Pin(0);
    pub const GPA1: Pin = Pin(1);
    pub const GPA2: Pin = Pin(2);
    pub const GPA3: Pin = Pin(3);
    pub const GPA4: Pin = Pin(4);
    pub const GPA5: Pin = Pin(5);
    pub const GPA6: Pin = Pin(6);
    pub const GPA7: Pin = Pin(7);
    pub const GPB0: Pin = Pin(8);
    pub const GPB1: Pin = Pin(9);
    pub const GPB2: Pin = Pin(10);
    pub const GPB3: Pin = Pin(11);
    pub const GPB4: Pin = Pin(12);
    pub const GPB5: Pin = Pin(13);
    pub const GPB6: Pin = Pin(14);
    pub const GPB7: Pin = Pin(15);

    /// Number of pins on the chip.
    pub const COUNT: usize = 16;

    /// Validates a raw pin number.
    pub const fn new(number: u8) -> Result<Self, InvalidPin> {
        if (number as usize) < Self::COUNT {
            Ok(Pin(number))
        } else {
            Err(InvalidPin(number))
        }
    }

    /// Raw pin number, `0..=15`.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// One-hot word mask for this pin.
    #[inline]
    pub const fn mask(self) -> u16 {
        1 << self.0
    }

    /// Port the pin belongs to.
    #[inline]
    pub const fn port(self) -> Port {
        if self.0 < 8 { Port::A } else { Port::B }
    }

    /// Bit position of the pin within its port's byte.
    #[inline]
    pub const fn bit(self) -> u8 {
        self.0 % 8
    }
}

impl TryFrom<u8> for Pin {
    type Error = InvalidPin;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Pin::new(number)
    }
}

impl From<Pin> for u8 {
    fn from(pin: Pin) -> u8 {
        pin.0
    }
}

/// Anything that names a pin: a validated [`Pin`] or a raw `u8`.
///
/// Raw numbers are checked here, before the driver touches the bus.
pub trait PinNumber {
    fn into_pin(self) -> Result<Pin, InvalidPin>;
}

impl PinNumber for Pin {
    #[inline]
    fn into_pin(self) -> Result<Pin, InvalidPin> {
        Ok(self)
    }
}

impl PinNumber for u8 {
    #[inline]
    fn into_pin(self) -> Result<Pin, InvalidPin> {
        Pin::new(self)
    }
}

/// A set of pins, one bit per pin (bit 0 = GPA0, bit 15 = GPB7).
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct PinSet(Bitmap<16>);

impl PinSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(Bitmap::new())
    }

    /// Every pin on the chip.
    pub fn all() -> Self {
        Self::from_bits(0xFFFF)
    }

    /// Builds a set from a word mask.
    pub fn from_bits(bits: u16) -> Self {
        Self(Bitmap::from_value(bits))
    }

    /// Word mask of the set.
    pub fn bits(&self) -> u16 {
        self.0.into_value()
    }

    pub fn contains(&self, pin: Pin) -> bool {
        self.0.get(pin.number() as usize)
    }

    pub fn insert(&mut self, pin: Pin) {
        self.0.set(pin.number() as usize, true);
    }

    pub fn remove(&mut self, pin: Pin) {
        self.0.set(pin.number() as usize, false);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pins in the set, lowest number first.
    pub fn iter(&self) -> PinSetIter {
        PinSetIter {
            bits: self.0,
            next: self.0.first_index(),
        }
    }

    /// Collects the pins into a fixed-capacity vector, lowest number first.
    pub fn to_vec(&self) -> Vec<Pin, 16> {
        self.iter().collect()
    }
}

impl core::fmt::Debug for PinSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PinSet({:#06x})", self.bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinSet {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PinSet({=u16:#06x})", self.bits())
    }
}

impl From<Pin> for PinSet {
    fn from(pin: Pin) -> Self {
        Self::from_bits(pin.mask())
    }
}

impl From<u16> for PinSet {
    fn from(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

impl From<PinSet> for u16 {
    fn from(set: PinSet) -> u16 {
        set.bits()
    }
}

impl FromIterator<Pin> for PinSet {
    fn from_iter<T: IntoIterator<Item = Pin>>(iter: T) -> Self {
        let mut set = PinSet::empty();
        for pin in iter {
            set.insert(pin);
        }
        set
    }
}

impl core::ops::BitOr for PinSet {
    type Output = PinSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        PinSet(self.0 | rhs.0)
    }
}

impl core::ops::BitAnd for PinSet {
    type Output = PinSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        PinSet(self.0 & rhs.0)
    }
}

impl IntoIterator for PinSet {
    type Item = Pin;
    type IntoIter = PinSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the pins of a [`PinSet`].
pub struct PinSetIter {
    bits: Bitmap<16>,
    next: Option<usize>,
}

impl Iterator for PinSetIter {
    type Item = Pin;

    fn next(&mut self) -> Option<Pin> {
        let idx = self.next?;
        self.next = self.bits.next_index(idx);
        Some(Pin(idx as u8))
    }
}
