use crate::core::family::AddressFamily;
use crate::core::range::Range;
use crate::core::range_set::RangeSet;
use crate::core::wide_int::WideInt;
use log::trace;
use std::ops::ControlFlow;

/*-------------------------------------------------------------------------------------------------
  Range Difference
-------------------------------------------------------------------------------------------------*/

/// Subtract `subtrahend` from `range`, leaving zero, one, or two fragments in ascending order.
///
/// ```
/// use cidrdiff::{cidr_to_range, range_minus_range, Ipv4};
///
/// let fragments = range_minus_range(
///     &cidr_to_range::<Ipv4>("8.8.8.0/24")?,
///     &cidr_to_range::<Ipv4>("8.8.8.0/25")?,
/// );
/// assert_eq!(fragments, [cidr_to_range::<Ipv4>("8.8.8.128/25")?]);
/// # Ok::<(), cidrdiff::Error>(())
/// ```
pub fn range_minus_range<F: AddressFamily>(
    range: &Range<F>,
    subtrahend: &Range<F>,
) -> Vec<Range<F>> {
    if !range.intersects(subtrahend) {
        return vec![*range];
    }

    let left = (subtrahend.start() > range.start())
        .then(|| Range::new(range.start(), subtrahend.start().sub(F::Int::ONE)));
    let right = (subtrahend.end() < range.end())
        .then(|| Range::new(subtrahend.end().add(F::Int::ONE), range.end()));

    left.into_iter().chain(right).collect()
}

/// Subtract every range in `subtrahends` from `range`.
///
/// The subtrahends need not be sorted or merged; passing a normalized [RangeSet] keeps the
/// number of live fragments small.
pub fn range_minus_set<'s, F, I>(range: &Range<F>, subtrahends: I) -> RangeSet<F>
where
    F: AddressFamily,
    I: IntoIterator<Item = &'s Range<F>>,
{
    let fragments = subtrahends
        .into_iter()
        .try_fold(vec![*range], |fragments, subtrahend| {
            let fragments: Vec<Range<F>> = fragments
                .iter()
                .flat_map(|fragment| range_minus_range(fragment, subtrahend))
                .collect();

            if fragments.is_empty() {
                ControlFlow::Break(fragments)
            } else {
                ControlFlow::Continue(fragments)
            }
        });

    let fragments = match fragments {
        ControlFlow::Continue(fragments) | ControlFlow::Break(fragments) => fragments,
    };

    trace!("{range} leaves {} fragment(s)", fragments.len());
    RangeSet::normalize(fragments)
}

/// Subtract the `excluded` set from every range in `source`. Survivors from different source
/// ranges are merged when they overlap or touch.
pub fn set_minus_set<'s, F, I>(source: I, excluded: &RangeSet<F>) -> RangeSet<F>
where
    F: AddressFamily,
    I: IntoIterator<Item = &'s Range<F>>,
{
    source
        .into_iter()
        .flat_map(|range| range_minus_set(range, excluded).into_vec())
        .collect()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::family::{Ipv4, Ipv6};
    use crate::core::range::cidr_to_range;
    use crate::core::range::tests::ipv4_range;

    fn sizes<F: AddressFamily>(ranges: &[Range<F>]) -> u128 {
        ranges.iter().map(|range| range.size().unwrap()).sum()
    }

    /*----------------------------------------------------------------------------------
      Range Minus Range
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_disjoint_subtrahend_leaves_range_unchanged() {
        let range = ipv4_range("10.0.0.0", "10.0.0.255");
        let before = ipv4_range("9.0.0.0", "9.255.255.255");
        let after = ipv4_range("10.0.1.0", "10.0.1.0");

        assert_eq!(range_minus_range(&range, &before), [range]);
        assert_eq!(range_minus_range(&range, &after), [range]);
    }

    #[test]
    fn test_self_subtraction_is_empty() {
        let range = ipv4_range("10.0.0.0", "10.0.0.255");
        assert!(range_minus_range(&range, &range).is_empty());

        let range = Range::<Ipv6>::new(0, u128::MAX);
        assert!(range_minus_range(&range, &range).is_empty());
    }

    #[test]
    fn test_containing_subtrahend_is_empty() {
        let range = ipv4_range("10.0.0.16", "10.0.0.31");
        let subtrahend = ipv4_range("10.0.0.0", "10.0.0.255");
        assert!(range_minus_range(&range, &subtrahend).is_empty());
    }

    #[test]
    fn test_left_and_right_remainders() {
        let range = ipv4_range("10.0.0.0", "10.0.0.255");

        let middle = ipv4_range("10.0.0.100", "10.0.0.199");
        assert_eq!(
            range_minus_range(&range, &middle),
            [
                ipv4_range("10.0.0.0", "10.0.0.99"),
                ipv4_range("10.0.0.200", "10.0.0.255"),
            ]
        );

        let low = ipv4_range("9.0.0.0", "10.0.0.9");
        assert_eq!(
            range_minus_range(&range, &low),
            [ipv4_range("10.0.0.10", "10.0.0.255")]
        );

        let high = ipv4_range("10.0.0.250", "11.0.0.0");
        assert_eq!(
            range_minus_range(&range, &high),
            [ipv4_range("10.0.0.0", "10.0.0.249")]
        );
    }

    #[test]
    fn test_edges_of_address_space() {
        let everything = Range::<Ipv4>::new(0, u32::MAX);

        let bottom = Range::<Ipv4>::new(0, 0);
        assert_eq!(
            range_minus_range(&everything, &bottom),
            [Range::new(1, u32::MAX)]
        );

        let top = Range::<Ipv4>::new(u32::MAX, u32::MAX);
        assert_eq!(
            range_minus_range(&everything, &top),
            [Range::new(0, u32::MAX - 1)]
        );
    }

    #[test]
    fn test_area_conservation() {
        let a = ipv4_range("10.0.0.0", "10.0.3.255");
        let subtrahends = [
            ipv4_range("10.0.1.0", "10.0.1.255"),
            ipv4_range("9.0.0.0", "10.0.0.15"),
            ipv4_range("10.0.3.0", "10.1.0.0"),
            ipv4_range("11.0.0.0", "11.0.0.0"),
            a,
        ];

        for b in subtrahends {
            let fragments = range_minus_range(&a, &b);
            let overlap = a.intersection(&b).map_or(0, |range| range.size().unwrap());
            assert_eq!(a.size().unwrap(), sizes(&fragments) + overlap);
        }
    }

    /*----------------------------------------------------------------------------------
      Range Minus Set
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_subtract_nothing() {
        let range = ipv4_range("10.0.0.0", "10.0.0.255");
        let empty = RangeSet::<Ipv4>::default();
        assert_eq!(range_minus_set(&range, &empty).ranges(), [range]);
    }

    #[test]
    fn test_subtract_normalized_set() {
        let range = cidr_to_range::<Ipv4>("10.0.0.0/24").unwrap();
        let excluded: RangeSet<Ipv4> = ["10.0.0.0/28", "10.0.0.64/26", "10.0.0.240/28"]
            .iter()
            .map(|cidr| cidr_to_range(cidr).unwrap())
            .collect();

        assert_eq!(
            range_minus_set(&range, &excluded).ranges(),
            [
                ipv4_range("10.0.0.16", "10.0.0.63"),
                ipv4_range("10.0.0.128", "10.0.0.239"),
            ]
        );
    }

    #[test]
    fn test_subtract_unnormalized_subtrahends() {
        let range = ipv4_range("10.0.0.0", "10.0.0.99");
        let subtrahends = [
            ipv4_range("10.0.0.50", "10.0.0.59"),
            ipv4_range("10.0.0.10", "10.0.0.19"),
            ipv4_range("10.0.0.15", "10.0.0.55"),
            ipv4_range("10.0.0.90", "10.0.0.200"),
        ];

        assert_eq!(
            range_minus_set(&range, &subtrahends).ranges(),
            [
                ipv4_range("10.0.0.0", "10.0.0.9"),
                ipv4_range("10.0.0.60", "10.0.0.89"),
            ]
        );
    }

    #[test]
    fn test_subtract_until_nothing_survives() {
        let range = ipv4_range("10.0.0.0", "10.0.0.99");
        let subtrahends = [
            ipv4_range("10.0.0.0", "10.0.0.49"),
            ipv4_range("10.0.0.50", "10.0.0.99"),
            ipv4_range("10.0.0.0", "10.0.0.0"),
        ];
        assert!(range_minus_set(&range, &subtrahends).is_empty());
    }

    /*----------------------------------------------------------------------------------
      Set Minus Set
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_set_minus_set_merges_survivors() {
        let source = [
            ipv4_range("10.0.0.0", "10.0.0.127"),
            ipv4_range("10.0.0.64", "10.0.0.255"),
            ipv4_range("10.0.1.0", "10.0.1.255"),
        ];
        let excluded = RangeSet::normalize([ipv4_range("10.0.0.0", "10.0.0.31")]);

        assert_eq!(
            set_minus_set(&source, &excluded).ranges(),
            [ipv4_range("10.0.0.32", "10.0.1.255")]
        );
    }
}
