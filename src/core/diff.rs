use crate::core::decompose::range_to_cidrs;
use crate::core::diff_results::DiffResults;
use crate::core::difference::set_minus_set;
use crate::core::errors::Result;
use crate::core::family::AddressFamily;
use crate::core::ip_ranges::IpRanges;
use crate::core::prefix::Prefix;
use crate::core::range::Range;
use crate::core::range_set::RangeSet;
use log::{debug, info};
use std::thread;

/*-------------------------------------------------------------------------------------------------
  Difference
-------------------------------------------------------------------------------------------------*/

/// Compute the canonical CIDR blocks covered by `source` but not by `excluded`.
///
/// Each family is processed independently; the IPv4 and IPv6 pipelines run concurrently.
///
/// Surviving ranges are merged before they are decomposed, so the result is the minimal CIDR
/// cover of the difference rather than a per-source-prefix split: adjacent source prefixes
/// `10.0.0.0/25` and `10.0.0.128/25` come out as the single block `10.0.0.0/24`.
///
/// ```
/// use cidrdiff::IpRanges;
///
/// let source = IpRanges::from_cidrs(["8.8.8.0/24", "2001:db8::/32"])?;
/// let excluded = IpRanges::from_cidrs(["8.8.8.0/25", "2001:db8::/33"])?;
///
/// let results = cidrdiff::difference(&source, &excluded);
/// assert_eq!(results.ipv4_cidrs(), ["8.8.8.128/25"]);
/// assert_eq!(results.ipv6_cidrs(), ["2001:db8:8000::/33"]);
/// # Ok::<(), cidrdiff::Error>(())
/// ```
pub fn difference(source: &IpRanges, excluded: &IpRanges) -> DiffResults {
    let (ipv4_prefixes, ipv6_prefixes) = thread::scope(|scope| {
        let ipv6 = scope.spawn(|| {
            family_difference(source.ipv6_prefixes(), excluded.ipv6_prefixes())
        });
        let ipv4 = family_difference(source.ipv4_prefixes(), excluded.ipv4_prefixes());
        let ipv6 = ipv6
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (ipv4, ipv6)
    });

    let results = DiffResults {
        ipv4_prefixes,
        ipv6_prefixes,
    };
    info!(
        "Difference contains {} IPv4 and {} IPv6 prefixes",
        results.ipv4_prefixes.len(),
        results.ipv6_prefixes.len()
    );
    results
}

/// Compute the difference between two lists of CIDR strings of either family.
pub fn difference_of_cidrs<S, E>(source: S, excluded: E) -> Result<DiffResults>
where
    S: IntoIterator,
    S::Item: AsRef<str>,
    E: IntoIterator,
    E::Item: AsRef<str>,
{
    let source = IpRanges::from_cidrs(source)?;
    let excluded = IpRanges::from_cidrs(excluded)?;
    Ok(difference(&source, &excluded))
}

/// Normalize the excluded set, subtract it from every source prefix, and decompose the
/// surviving ranges into sorted CIDR blocks.
pub(crate) fn family_difference<F: AddressFamily>(
    source: &[Prefix<F>],
    excluded: &[Prefix<F>],
) -> Vec<Prefix<F>> {
    let source: Vec<Range<F>> = source.iter().map(Prefix::to_range).collect();
    let excluded = RangeSet::normalize(excluded.iter().map(Prefix::to_range));
    debug!(
        "{}: {} source prefix(es), {} excluded range(s) after merge",
        F::FAMILY,
        source.len(),
        excluded.len()
    );

    let survivors = set_minus_set(&source, &excluded);

    let mut prefixes: Vec<Prefix<F>> = survivors.iter().flat_map(range_to_cidrs).collect();
    prefixes.sort();
    prefixes
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
