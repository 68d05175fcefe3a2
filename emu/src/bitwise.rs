use std::ops::RangeInclusive;

/// Bit-field helpers shared by the decoders.
/// Indexes count from the least significant bit (right to left).
pub trait Bits: Copy + Into<u64> {
    /// Amount of bits of the implementing type.
    const WIDTH: u8;

    /// Narrows a value that is known to fit in `Self`.
    fn truncate(value: u64) -> Self;

    fn is_bit_on(self, bit_idx: u8) -> bool {
        debug_assert!(bit_idx < Self::WIDTH);
        (Into::<u64>::into(self) >> bit_idx) & 1 == 1
    }

    fn is_bit_off(self, bit_idx: u8) -> bool {
        !self.is_bit_on(bit_idx)
    }

    fn get_bit(self, bit_idx: u8) -> bool {
        self.is_bit_on(bit_idx)
    }

    fn set_bit(&mut self, bit_idx: u8, value: bool) {
        debug_assert!(bit_idx < Self::WIDTH);
        let mask = 1_u64 << bit_idx;
        let bits = if value {
            Into::<u64>::into(*self) | mask
        } else {
            Into::<u64>::into(*self) & !mask
        };
        *self = Self::truncate(bits);
    }

    /// Extracts `bits_range` and moves it down to bit 0.
    fn get_bits(self, bits_range: RangeInclusive<u8>) -> Self {
        let start = *bits_range.start();
        let end = *bits_range.end();
        debug_assert!(start <= end && end < Self::WIDTH);

        let length = u32::from(end - start) + 1;
        let mask = u64::MAX >> (64 - length);

        Self::truncate((Into::<u64>::into(self) >> start) & mask)
    }

    /// True only when every bit in `bits_range` is set.
    fn are_bits_on(self, bits_range: RangeInclusive<u8>) -> bool {
        bits_range.into_iter().all(|bit_idx| self.is_bit_on(bit_idx))
    }

    /// Treats the low `number_of_bits` bits as a two's complement number
    /// and extends its sign to the full width of `Self`.
    fn sign_extended(self, number_of_bits: u8) -> Self {
        debug_assert!(number_of_bits > 0 && number_of_bits <= Self::WIDTH);

        let unused = 64 - u32::from(number_of_bits);
        let value = ((Into::<u64>::into(self) << unused) as i64) >> unused;
        let width_mask = u64::MAX >> (64 - u32::from(Self::WIDTH));

        Self::truncate(value as u64 & width_mask)
    }
}

impl Bits for u32 {
    const WIDTH: u8 = 32;

    fn truncate(value: u64) -> Self {
        value as Self
    }
}

impl Bits for u16 {
    const WIDTH: u8 = 16;

    fn truncate(value: u64) -> Self {
        value as Self
    }
}

impl Bits for u8 {
    const WIDTH: u8 = 8;

    fn truncate(value: u64) -> Self {
        value as Self
    }
}
