//! Compute the IP prefixes that belong to a provider's network but are not part of a named
//! subset of it, e.g. the Google-owned ranges (`goog.json`) that are not Google Cloud customer
//! ranges (`cloud.json`).
//!
//! Prefixes are converted to integer address ranges, the excluded ranges are subtracted, and the
//! surviving ranges are re-expressed as the minimal list of canonical CIDR blocks. IPv4 and IPv6
//! are processed independently and never interact.
//!
//! ```
//! let results = cidrdiff::difference_of_cidrs(["8.8.8.0/24"], ["8.8.8.0/25"])?;
//! assert_eq!(results.ipv4_cidrs(), ["8.8.8.128/25"]);
//! # Ok::<(), cidrdiff::Error>(())
//! ```
//!
//! Use [get_difference] (or a configured [Client]) to retrieve both IP ranges documents and
//! compute their difference in one call.

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::client::{get_difference, Client, ClientBuilder};
pub use crate::core::codec::{address_to_int, int_to_address};
pub use crate::core::decompose::{range_to_cidrs, CidrBlocks};
pub use crate::core::diff::{difference, difference_of_cidrs};
pub use crate::core::diff_results::DiffResults;
pub use crate::core::difference::{range_minus_range, range_minus_set, set_minus_set};
pub use crate::core::errors::{Error, Result};
pub use crate::core::family::{AddressFamily, Family, Ipv4, Ipv6};
pub use crate::core::ip_ranges::IpRanges;
pub use crate::core::prefix::Prefix;
pub use crate::core::range::{cidr_to_any_range, cidr_to_range, AnyRange, Range};
pub use crate::core::range_set::RangeSet;
pub use crate::core::wide_int::WideInt;

/*--------------------------------------------------------------------------------------
  Re-exports
--------------------------------------------------------------------------------------*/

pub use ipnetwork;
