use std::fmt::Debug;
use std::hash::Hash;

/*-------------------------------------------------------------------------------------------------
  Wide Integer
-------------------------------------------------------------------------------------------------*/

/// Exact unsigned integer arithmetic over a fixed-width address space.
///
/// The range algebra is written against this contract only. It is implemented for `u32` (IPv4)
/// and `u128` (IPv6); both are exact for every value up to `2^BITS - 1`.
///
/// `add` and `sub` panic on overflow and underflow respectively. Callers guarantee in-range
/// results, so a panic here is a bug in the caller and never a user-facing condition.
pub trait WideInt: Copy + Debug + Default + Eq + Ord + Hash + Send + Sync + 'static {
    /// Width of the integer in bits.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    /// `2^BITS - 1`
    const MAX: Self;

    fn add(self, other: Self) -> Self;

    fn checked_add(self, other: Self) -> Option<Self>;

    fn sub(self, other: Self) -> Self;

    /// `2^exponent`; the exponent must be less than `BITS`.
    fn pow2(exponent: u32) -> Self;

    /// Logical (zero-fill) right shift. Shifting by `BITS` or more yields zero.
    fn shr(self, bits: u32) -> Self;

    fn and(self, other: Self) -> Self;

    /// Lowercase hexadecimal, zero-padded to `BITS / 4` digits.
    fn to_hex(self) -> String;

    /// Binary, zero-padded to `BITS` digits.
    fn to_binary(self) -> String;

    /// Parse a base-16 string; `None` when it is empty, malformed, or too wide.
    fn from_hex(hex: &str) -> Option<Self>;

    /// Parse a base-2 string; `None` when it is empty, malformed, or too wide.
    fn from_binary(binary: &str) -> Option<Self>;

    /// Widen to `u128` for size accounting.
    fn to_u128(self) -> u128;

    /*-------------------------------------------------------------------------
      Provided Methods
    -------------------------------------------------------------------------*/

    /// `2^bits - 1`: a value with the low `bits` bits set. Saturates to [WideInt::MAX] when
    /// `bits >= BITS`, which is the host mask of a zero-length prefix.
    fn low_mask(bits: u32) -> Self {
        if bits >= Self::BITS {
            Self::MAX
        } else {
            Self::pow2(bits).sub(Self::ONE)
        }
    }

    /// Number of trailing zero bits, bounded by `BITS` (zero has `BITS` trailing zeros).
    fn trailing_zeros(self) -> u32 {
        let mut current = self;
        let mut zeros = 0;
        while zeros < Self::BITS && current.and(Self::ONE) == Self::ZERO {
            current = current.shr(1);
            zeros += 1;
        }
        zeros
    }
}

/*--------------------------------------------------------------------------------------
  Native Backend
--------------------------------------------------------------------------------------*/

macro_rules! impl_wide_int {
    ($int:ty) => {
        impl WideInt for $int {
            const BITS: u32 = <$int>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$int>::MAX;

            fn add(self, other: Self) -> Self {
                <$int>::checked_add(self, other).expect("wide integer addition overflowed")
            }

            fn checked_add(self, other: Self) -> Option<Self> {
                <$int>::checked_add(self, other)
            }

            fn sub(self, other: Self) -> Self {
                <$int>::checked_sub(self, other).expect("wide integer subtraction underflowed")
            }

            fn pow2(exponent: u32) -> Self {
                assert!(
                    exponent < Self::BITS,
                    "2^{exponent} exceeds a {}-bit integer",
                    Self::BITS
                );
                1 << exponent
            }

            fn shr(self, bits: u32) -> Self {
                <$int>::checked_shr(self, bits).unwrap_or(0)
            }

            fn and(self, other: Self) -> Self {
                self & other
            }

            fn to_hex(self) -> String {
                format!("{:0width$x}", self, width = (Self::BITS / 4) as usize)
            }

            fn to_binary(self) -> String {
                format!("{:0width$b}", self, width = Self::BITS as usize)
            }

            fn from_hex(hex: &str) -> Option<Self> {
                <$int>::from_str_radix(hex, 16).ok()
            }

            fn from_binary(binary: &str) -> Option<Self> {
                <$int>::from_str_radix(binary, 2).ok()
            }

            fn to_u128(self) -> u128 {
                self as u128
            }
        }
    };
}

impl_wide_int!(u32);
impl_wide_int!(u128);

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
