use crate::core::family::AddressFamily;
use crate::core::range::Range;
use crate::core::wide_int::WideInt;
use log::trace;

/*-------------------------------------------------------------------------------------------------
  Range Set
-------------------------------------------------------------------------------------------------*/

/// Normalized set of ranges in one family: sorted ascending by start, with no two members
/// overlapping or touching.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct RangeSet<F: AddressFamily> {
    ranges: Vec<Range<F>>,
}

impl<F: AddressFamily> Default for RangeSet<F> {
    fn default() -> Self {
        Self { ranges: Vec::new() }
    }
}

/*--------------------------------------------------------------------------------------
  Range Set Implementation
--------------------------------------------------------------------------------------*/

impl<F: AddressFamily> RangeSet<F> {
    /// Sort the ranges by start address and merge every overlapping or adjacent pair.
    ///
    /// Normalization is idempotent; normalizing an already-normalized set returns it unchanged.
    ///
    /// ```
    /// use cidrdiff::{cidr_to_range, Ipv4, RangeSet};
    ///
    /// let set = RangeSet::normalize([
    ///     cidr_to_range::<Ipv4>("10.0.1.0/24")?,
    ///     cidr_to_range::<Ipv4>("10.0.0.0/24")?,
    /// ]);
    /// assert_eq!(set.len(), 1);
    /// assert_eq!(set.ranges()[0].to_string(), "10.0.0.0 - 10.0.1.255");
    /// # Ok::<(), cidrdiff::Error>(())
    /// ```
    pub fn normalize<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = Range<F>>,
    {
        let mut sorted: Vec<Range<F>> = ranges.into_iter().collect();
        sorted.sort_by_key(|range| range.start());

        let mut sorted = sorted.into_iter();
        let Some(first) = sorted.next() else {
            return Self::default();
        };

        let (mut merged, last) = sorted.fold(
            (Vec::new(), first),
            |(mut merged, current), next| {
                if touches(&current, &next) {
                    (merged, Range::new(current.start(), current.end().max(next.end())))
                } else {
                    merged.push(current);
                    (merged, next)
                }
            },
        );
        merged.push(last);

        trace!("Normalized {} {} range(s)", merged.len(), F::FAMILY);
        Self { ranges: merged }
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn ranges(&self) -> &[Range<F>] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Range<F>> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn into_vec(self) -> Vec<Range<F>> {
        self.ranges
    }
}

impl<F: AddressFamily> FromIterator<Range<F>> for RangeSet<F> {
    fn from_iter<I: IntoIterator<Item = Range<F>>>(iter: I) -> Self {
        RangeSet::normalize(iter)
    }
}

impl<'s, F: AddressFamily> IntoIterator for &'s RangeSet<F> {
    type Item = &'s Range<F>;
    type IntoIter = std::slice::Iter<'s, Range<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// `next` starts inside `current` or immediately after its end. `current` must not start after
/// `next`.
fn touches<F: AddressFamily>(current: &Range<F>, next: &Range<F>) -> bool {
    match current.end().checked_add(F::Int::ONE) {
        Some(limit) => next.start() <= limit,
        // `current` runs to the top of the address space
        None => true,
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
