use crate::core::wide_int::WideInt;
use ipnetwork::{IpNetwork, IpNetworkError, Ipv4Network, Ipv6Network};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Family
-------------------------------------------------------------------------------------------------*/

/// IP address family (IPv4 or IPv6) used to select and report prefixes.
#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Family {
    IPv4,
    IPv6,
}

impl Family {
    pub fn is_ipv4(&self) -> bool {
        match self {
            Family::IPv4 => true,
            Family::IPv6 => false,
        }
    }

    pub fn is_ipv6(&self) -> bool {
        match self {
            Family::IPv4 => false,
            Family::IPv6 => true,
        }
    }

    /// Address width in bits.
    pub fn bits(&self) -> u32 {
        match self {
            Family::IPv4 => Ipv4::BITS,
            Family::IPv6 => Ipv6::BITS,
        }
    }

    /// Infer the family of an address literal; IPv6 literals always contain a colon.
    pub fn of_literal(literal: &str) -> Family {
        if literal.contains(':') {
            Family::IPv6
        } else {
            Family::IPv4
        }
    }

    /// Infer the family of CIDR text from its address portion.
    pub fn of_cidr(text: &str) -> Family {
        Family::of_literal(text.split('/').next().unwrap_or_default())
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::IPv4 => write!(f, "IPv4"),
            Family::IPv6 => write!(f, "IPv6"),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Address Family (Type Level)
-------------------------------------------------------------------------------------------------*/

/// Type-level address family. Ranges, range sets, and prefixes are generic over a family marker
/// so that values from different families cannot be combined.
pub trait AddressFamily:
    Copy + Debug + Default + Eq + Ord + Hash + Send + Sync + 'static
{
    /// Integer type wide enough for every address in the family.
    type Int: WideInt;

    /// Address type; converts to and from [AddressFamily::Int] using big-endian octet order.
    type Addr: Copy + Display + FromStr + From<Self::Int> + Into<Self::Int>;

    const FAMILY: Family;
    const BITS: u32 = <Self::Int as WideInt>::BITS;

    /// Build the matching [IpNetwork] for a network address and prefix length.
    fn ip_network(address: Self::Addr, length: u8) -> Result<IpNetwork, IpNetworkError>;
}

/// IPv4 family marker (32-bit addresses).
#[derive(Debug, Default, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv4;

/// IPv6 family marker (128-bit addresses).
#[derive(Debug, Default, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv6;

impl AddressFamily for Ipv4 {
    type Int = u32;
    type Addr = Ipv4Addr;

    const FAMILY: Family = Family::IPv4;

    fn ip_network(address: Ipv4Addr, length: u8) -> Result<IpNetwork, IpNetworkError> {
        Ipv4Network::new(address, length).map(IpNetwork::V4)
    }
}

impl AddressFamily for Ipv6 {
    type Int = u128;
    type Addr = Ipv6Addr;

    const FAMILY: Family = Family::IPv6;

    fn ip_network(address: Ipv6Addr, length: u8) -> Result<IpNetwork, IpNetworkError> {
        Ipv6Network::new(address, length).map(IpNetwork::V6)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
