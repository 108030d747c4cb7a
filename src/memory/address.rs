//! Address decoding for a set-associative cache

pub fn get_mask(bits: usize) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Splits a 64-bit address into its cache coordinates.
/// The address looks like this:
/// | tag | set | offset |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    offset_bits: usize,
    set_bits: usize,
}

impl Geometry {
    pub fn make(offset_bits: usize, set_bits: usize) -> Self {
        // Keep every shift below the address width
        assert!(offset_bits + set_bits < 64);
        Self { offset_bits, set_bits }
    }

    pub fn offset_bits(&self) -> usize {
        self.offset_bits
    }

    pub fn set_bits(&self) -> usize {
        self.set_bits
    }

    pub fn num_sets(&self) -> usize {
        1 << self.set_bits
    }

    pub fn get_set(&self, address: u64) -> usize {
        ((address >> self.offset_bits) & get_mask(self.set_bits)) as usize
    }

    pub fn get_tag(&self, address: u64) -> u64 {
        address >> (self.offset_bits + self.set_bits)
    }

    /// Rebuild the block address from stored metadata,
    /// with a zero offset
    pub fn get_address(&self, tag: u64, set: usize) -> u64 {
        ((tag << self.set_bits) | set as u64) << self.offset_bits
    }

    #[cfg(test)]
    fn align(&self, address: u64) -> u64 {
        address & !get_mask(self.offset_bits)
    }
}
