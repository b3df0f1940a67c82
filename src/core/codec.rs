use crate::core::errors::{Error, Result};
use crate::core::family::AddressFamily;

/*-------------------------------------------------------------------------------------------------
  Address Codec
-------------------------------------------------------------------------------------------------*/

/// Parse a textual IPv4 or IPv6 literal into its big-endian integer value.
///
/// ```
/// use cidrdiff::{address_to_int, Ipv4, Ipv6};
///
/// assert_eq!(address_to_int::<Ipv4>("8.8.8.128")?, 0x0808_0880);
/// assert_eq!(address_to_int::<Ipv6>("2001:db8::")?, 0x2001_0db8u128 << 96);
/// # Ok::<(), cidrdiff::Error>(())
/// ```
pub fn address_to_int<F: AddressFamily>(literal: &str) -> Result<F::Int> {
    literal
        .trim()
        .parse::<F::Addr>()
        .map(Into::into)
        .map_err(|_| Error::MalformedAddress {
            literal: literal.to_string(),
            family: F::FAMILY,
        })
}

/// Format an integer as the canonical textual literal of its family: dotted-decimal for IPv4,
/// RFC 5952 lowercase compressed hex for IPv6.
pub fn int_to_address<F: AddressFamily>(value: F::Int) -> String {
    F::Addr::from(value).to_string()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
