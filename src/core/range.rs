use crate::core::codec::int_to_address;
use crate::core::errors::Result;
use crate::core::family::{AddressFamily, Family, Ipv4, Ipv6};
use crate::core::prefix::Prefix;
use crate::core::wide_int::WideInt;
use std::fmt::{self, Display};
use std::marker::PhantomData;

/*-------------------------------------------------------------------------------------------------
  Range
-------------------------------------------------------------------------------------------------*/

/// Closed interval `[start, end]` of addresses in one family.
#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Range<F: AddressFamily> {
    start: F::Int,
    end: F::Int,
    family: PhantomData<F>,
}

/*--------------------------------------------------------------------------------------
  Range Implementation
--------------------------------------------------------------------------------------*/

impl<F: AddressFamily> Range<F> {
    /// Create the range `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics when `start > end`.
    pub fn new(start: F::Int, end: F::Int) -> Self {
        assert!(start <= end, "range start {start:?} is past its end {end:?}");
        Self {
            start,
            end,
            family: PhantomData,
        }
    }

    pub fn start(&self) -> F::Int {
        self.start
    }

    pub fn end(&self) -> F::Int {
        self.end
    }

    pub fn family(&self) -> Family {
        F::FAMILY
    }

    /// Number of addresses in the range, or `None` when it is the entire IPv6 space.
    pub fn size(&self) -> Option<u128> {
        self.end.sub(self.start).to_u128().checked_add(1)
    }

    pub fn contains(&self, value: F::Int) -> bool {
        self.start <= value && value <= self.end
    }

    pub fn intersects(&self, other: &Range<F>) -> bool {
        !(other.end < self.start || other.start > self.end)
    }

    /// Addresses common to both ranges.
    pub fn intersection(&self, other: &Range<F>) -> Option<Range<F>> {
        self.intersects(other)
            .then(|| Range::new(self.start.max(other.start), self.end.min(other.end)))
    }
}

impl<F: AddressFamily> Display for Range<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            int_to_address::<F>(self.start),
            int_to_address::<F>(self.end)
        )
    }
}

impl<F: AddressFamily> From<Prefix<F>> for Range<F> {
    fn from(prefix: Prefix<F>) -> Self {
        prefix.to_range()
    }
}

/*-------------------------------------------------------------------------------------------------
  CIDR to Range Conversion
-------------------------------------------------------------------------------------------------*/

/// Convert CIDR text of a known family to its closed address range. Host bits set in the
/// address are masked off.
///
/// ```
/// use cidrdiff::{cidr_to_range, Ipv4};
///
/// let range = cidr_to_range::<Ipv4>("8.8.8.0/24")?;
/// assert_eq!(range.to_string(), "8.8.8.0 - 8.8.8.255");
/// # Ok::<(), cidrdiff::Error>(())
/// ```
pub fn cidr_to_range<F: AddressFamily>(text: &str) -> Result<Range<F>> {
    Ok(text.parse::<Prefix<F>>()?.to_range())
}

/*--------------------------------------------------------------------------------------
  Any Range
--------------------------------------------------------------------------------------*/

/// A range whose family was inferred from its textual form.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum AnyRange {
    V4(Range<Ipv4>),
    V6(Range<Ipv6>),
}

impl AnyRange {
    pub fn family(&self) -> Family {
        match self {
            AnyRange::V4(_) => Family::IPv4,
            AnyRange::V6(_) => Family::IPv6,
        }
    }
}

impl Display for AnyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyRange::V4(range) => range.fmt(f),
            AnyRange::V6(range) => range.fmt(f),
        }
    }
}

/// Convert CIDR text of either family to its closed address range. The family is inferred from
/// the presence of `:` in the address portion.
pub fn cidr_to_any_range(text: &str) -> Result<AnyRange> {
    match Family::of_cidr(text) {
        Family::IPv4 => cidr_to_range::<Ipv4>(text).map(AnyRange::V4),
        Family::IPv6 => cidr_to_range::<Ipv6>(text).map(AnyRange::V6),
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
