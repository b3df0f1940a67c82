use crate::core::family::AddressFamily;
use crate::core::prefix::Prefix;
use crate::core::range::Range;
use crate::core::wide_int::WideInt;
use log::trace;
use std::iter::FusedIterator;

/*-------------------------------------------------------------------------------------------------
  Range to CIDR Decomposition
-------------------------------------------------------------------------------------------------*/

/// Decompose a range into the minimal, ascending list of aligned CIDR blocks that exactly
/// cover it.
///
/// ```
/// use cidrdiff::{range_to_cidrs, Ipv4, Range};
///
/// // 10.0.0.1 - 10.0.0.6
/// let blocks: Vec<String> = range_to_cidrs(&Range::<Ipv4>::new(0x0a00_0001, 0x0a00_0006))
///     .map(|prefix| prefix.to_string())
///     .collect();
/// assert_eq!(blocks, ["10.0.0.1/32", "10.0.0.2/31", "10.0.0.4/31", "10.0.0.6/32"]);
/// ```
pub fn range_to_cidrs<F: AddressFamily>(range: &Range<F>) -> CidrBlocks<F> {
    CidrBlocks {
        next: Some(range.start()),
        end: range.end(),
    }
}

/*--------------------------------------------------------------------------------------
  CIDR Blocks Iterator
--------------------------------------------------------------------------------------*/

/// Iterator over the CIDR blocks of a range, produced by [range_to_cidrs]. Clone it to restart
/// the decomposition from the current position.
#[derive(Debug, Clone)]
pub struct CidrBlocks<F: AddressFamily> {
    next: Option<F::Int>,
    end: F::Int,
}

impl<F: AddressFamily> Iterator for CidrBlocks<F> {
    type Item = Prefix<F>;

    fn next(&mut self) -> Option<Prefix<F>> {
        let start = self.next?;
        let remaining = self.end.sub(start);

        // Largest block aligned at `start`, shrunk until it fits the unconsumed span
        let mut exponent = start.trailing_zeros();
        while F::Int::low_mask(exponent) > remaining {
            exponent -= 1;
        }

        let last = start.add(F::Int::low_mask(exponent));
        self.next = (last < self.end).then(|| last.add(F::Int::ONE));

        let prefix = Prefix::aligned(start, (F::BITS - exponent) as u8);
        trace!("Block {prefix} (0x{} - 0x{})", start.to_hex(), last.to_hex());
        Some(prefix)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(_) => (1, Some(2 * F::BITS as usize)),
            None => (0, Some(0)),
        }
    }
}

impl<F: AddressFamily> FusedIterator for CidrBlocks<F> {}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::family::{Ipv4, Ipv6};
    use crate::core::range::cidr_to_range;
    use crate::core::range::tests::{ipv4_range, ipv6_range};

    fn decompose<F: AddressFamily>(range: &Range<F>) -> Vec<String> {
        range_to_cidrs(range).map(|prefix| prefix.to_string()).collect()
    }

    /// Blocks are ascending, aligned, non-overlapping, and tile the range exactly.
    fn assert_tiles<F: AddressFamily>(range: &Range<F>) {
        let blocks: Vec<Prefix<F>> = range_to_cidrs(range).collect();

        assert_eq!(blocks.first().unwrap().network(), range.start());
        assert_eq!(blocks.last().unwrap().broadcast(), range.end());

        for block in &blocks {
            let host_mask = F::Int::low_mask(block.host_bits());
            assert_eq!(block.network().and(host_mask), F::Int::ZERO);
        }

        for pair in blocks.windows(2) {
            assert_eq!(pair[0].broadcast().add(F::Int::ONE), pair[1].network());
        }

        assert!(blocks.len() <= 2 * F::BITS as usize);
    }

    #[test]
    fn test_round_trip() {
        let cidrs = [
            "8.8.8.0/24",
            "8.8.8.128/25",
            "8.8.8.8/32",
            "0.0.0.0/0",
            "128.0.0.0/1",
            "255.255.255.255/32",
        ];
        for cidr in cidrs {
            assert_eq!(decompose(&cidr_to_range::<Ipv4>(cidr).unwrap()), [cidr]);
        }

        let cidrs = [
            "2001:db8::/32",
            "2001:db8:8000::/33",
            "::/0",
            "::1/128",
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff/128",
        ];
        for cidr in cidrs {
            assert_eq!(decompose(&cidr_to_range::<Ipv6>(cidr).unwrap()), [cidr]);
        }
    }

    #[test]
    fn test_unaligned_range() {
        assert_eq!(
            decompose(&ipv4_range("10.0.0.1", "10.0.0.254")),
            [
                "10.0.0.1/32",
                "10.0.0.2/31",
                "10.0.0.4/30",
                "10.0.0.8/29",
                "10.0.0.16/28",
                "10.0.0.32/27",
                "10.0.0.64/26",
                "10.0.0.128/26",
                "10.0.0.192/27",
                "10.0.0.224/28",
                "10.0.0.240/29",
                "10.0.0.248/30",
                "10.0.0.252/31",
                "10.0.0.254/32",
            ]
        );
    }

    #[test]
    fn test_zero_start_shrinks_to_span() {
        assert_eq!(
            decompose(&ipv4_range("0.0.0.0", "0.0.0.5")),
            ["0.0.0.0/30", "0.0.0.4/31"]
        );
    }

    #[test]
    fn test_single_address() {
        assert_eq!(decompose(&ipv4_range("8.8.8.8", "8.8.8.8")), ["8.8.8.8/32"]);
        assert_eq!(decompose(&ipv6_range("::", "::")), ["::/128"]);
    }

    #[test]
    fn test_range_ending_at_top_of_address_space() {
        assert_eq!(
            decompose(&ipv4_range("255.255.255.253", "255.255.255.255")),
            ["255.255.255.253/32", "255.255.255.254/31"]
        );
        assert_tiles(&Range::<Ipv6>::new(1, u128::MAX));
    }

    #[test]
    fn test_tiling() {
        assert_tiles(&ipv4_range("0.0.0.1", "255.255.255.254"));
        assert_tiles(&ipv4_range("8.8.8.128", "8.8.8.255"));
        assert_tiles(&ipv4_range("192.0.2.7", "198.51.100.77"));
        assert_tiles(&ipv6_range("2001:db8::3", "2001:db8:ffff::1"));
        assert_tiles(&Range::<Ipv6>::new(0, u128::MAX));
    }

    #[test]
    fn test_worst_case_block_count() {
        let blocks = range_to_cidrs(&Range::<Ipv4>::new(1, u32::MAX - 1)).count();
        assert_eq!(blocks, 62);

        let blocks = range_to_cidrs(&Range::<Ipv6>::new(1, u128::MAX - 1)).count();
        assert_eq!(blocks, 254);
    }

    #[test]
    fn test_restartable() {
        let mut blocks = range_to_cidrs(&ipv4_range("10.0.0.1", "10.0.0.6"));
        blocks.next();
        let restarted = blocks.clone();

        assert_eq!(blocks.count(), 3);
        assert_eq!(restarted.count(), 3);
    }

    #[test]
    fn test_fused() {
        let mut blocks = range_to_cidrs(&ipv4_range("10.0.0.0", "10.0.0.255"));
        assert!(blocks.next().is_some());
        assert!(blocks.next().is_none());
        assert!(blocks.next().is_none());
    }
}
