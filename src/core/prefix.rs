use crate::core::codec::{address_to_int, int_to_address};
use crate::core::errors::{Error, Result};
use crate::core::family::{AddressFamily, Family};
use crate::core::range::Range;
use crate::core::wide_int::WideInt;
use ipnetwork::IpNetwork;
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Prefix
-------------------------------------------------------------------------------------------------*/

/// Canonical CIDR block: a network address with all host bits zero and a prefix length between
/// `0` and the family's address width.
///
/// Prefixes order by network address first and prefix length second, so sorting a list of
/// prefixes sorts it ascending by the numeric value of the block's starting address.
#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Prefix<F: AddressFamily> {
    network: F::Int,
    length: u8,
    family: PhantomData<F>,
}

/*--------------------------------------------------------------------------------------
  Prefix Implementation
--------------------------------------------------------------------------------------*/

impl<F: AddressFamily> Prefix<F> {
    /// Build a prefix from any address inside the block. Host bits are masked off, so a
    /// non-canonical address (e.g. `8.8.8.1/24`) is silently normalized to its network address.
    pub fn new(address: F::Int, length: u32) -> Result<Self> {
        if length > F::BITS {
            return Err(Error::InvalidPrefixLength {
                length: i128::from(length),
                max: F::BITS,
            });
        }

        let host_mask = F::Int::low_mask(F::BITS - length);
        let network_mask = F::Int::MAX.sub(host_mask);

        Ok(Self::aligned(address.and(network_mask), length as u8))
    }

    /// Build a prefix from a network address already aligned to the prefix length.
    pub(crate) fn aligned(network: F::Int, length: u8) -> Self {
        debug_assert!(u32::from(length) <= F::BITS);
        debug_assert_eq!(
            network.and(F::Int::low_mask(F::BITS - u32::from(length))),
            F::Int::ZERO
        );
        Self {
            network,
            length,
            family: PhantomData,
        }
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Network (first) address of the block.
    pub fn network(&self) -> F::Int {
        self.network
    }

    /// Number of leading bits fixed by the network portion.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Number of host bits: `W - length`.
    pub fn host_bits(&self) -> u32 {
        F::BITS - u32::from(self.length)
    }

    /// Broadcast (last) address of the block.
    pub fn broadcast(&self) -> F::Int {
        self.network.add(F::Int::low_mask(self.host_bits()))
    }

    pub fn family(&self) -> Family {
        F::FAMILY
    }

    /// Closed range `[network, broadcast]` covered by the block.
    pub fn to_range(&self) -> Range<F> {
        Range::new(self.network, self.broadcast())
    }

    /// Equivalent [IpNetwork], e.g. for network-mask formatting.
    pub fn to_ip_network(&self) -> Result<IpNetwork> {
        Ok(F::ip_network(F::Addr::from(self.network), self.length)?)
    }
}

/*--------------------------------------------------------------------------------------
  Parse and Display
--------------------------------------------------------------------------------------*/

impl<F: AddressFamily> FromStr for Prefix<F> {
    type Err = Error;

    /// Parse `address/prefix-length`. A bare address is read as a host prefix (`/32` or `/128`).
    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let (address, length) = match text.split_once('/') {
            Some((address, length)) => (address, parse_length::<F>(text, length)?),
            None => (text, F::BITS),
        };

        Prefix::new(address_to_int::<F>(address)?, length)
    }
}

/// Parse a decimal prefix length (an optional `-` followed by digits). Numeric values outside
/// `[0, W]` are [Error::InvalidPrefixLength]; anything else is [Error::MalformedCidr].
fn parse_length<F: AddressFamily>(text: &str, length: &str) -> Result<u32> {
    let digits = length.strip_prefix('-').unwrap_or(length);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(Error::MalformedCidr(text.to_string()));
    }

    // Lengths too large for an i128 saturate; they are out of range either way
    let saturated = if length.starts_with('-') {
        i128::MIN
    } else {
        i128::MAX
    };
    let value = length.parse::<i128>().unwrap_or(saturated);

    match u32::try_from(value) {
        Ok(value) if value <= F::BITS => Ok(value),
        _ => Err(Error::InvalidPrefixLength {
            length: value,
            max: F::BITS,
        }),
    }
}

impl<F: AddressFamily> Display for Prefix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", int_to_address::<F>(self.network), self.length)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
