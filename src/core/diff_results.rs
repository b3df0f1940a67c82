use crate::core::family::{AddressFamily, Family, Ipv4, Ipv6};
use crate::core::prefix::Prefix;

/*-------------------------------------------------------------------------------------------------
  Diff Results
-------------------------------------------------------------------------------------------------*/

/// Canonical CIDR blocks present in the source ranges but not in the excluded ranges, sorted
/// ascending by network address within each family.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiffResults {
    /// IPv4 blocks in the difference.
    pub ipv4_prefixes: Vec<Prefix<Ipv4>>,

    /// IPv6 blocks in the difference.
    pub ipv6_prefixes: Vec<Prefix<Ipv6>>,
}

impl DiffResults {
    /// Number of blocks in the given family.
    pub fn count(&self, family: Family) -> usize {
        match family {
            Family::IPv4 => self.ipv4_prefixes.len(),
            Family::IPv6 => self.ipv6_prefixes.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.ipv4_prefixes.len() + self.ipv6_prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ipv4_prefixes.is_empty() && self.ipv6_prefixes.is_empty()
    }

    /// Total number of addresses covered in the given family, saturating at `u128::MAX`.
    pub fn address_count(&self, family: Family) -> u128 {
        match family {
            Family::IPv4 => address_count(&self.ipv4_prefixes),
            Family::IPv6 => address_count(&self.ipv6_prefixes),
        }
    }

    /// IPv4 blocks as CIDR strings.
    pub fn ipv4_cidrs(&self) -> Vec<String> {
        self.ipv4_prefixes.iter().map(ToString::to_string).collect()
    }

    /// IPv6 blocks as CIDR strings.
    pub fn ipv6_cidrs(&self) -> Vec<String> {
        self.ipv6_prefixes.iter().map(ToString::to_string).collect()
    }

    /// Keep only the given family; `None` keeps both.
    pub fn retain_family(mut self, family: Option<Family>) -> Self {
        match family {
            Some(Family::IPv4) => self.ipv6_prefixes.clear(),
            Some(Family::IPv6) => self.ipv4_prefixes.clear(),
            None => {}
        }
        self
    }
}

fn address_count<F: AddressFamily>(prefixes: &[Prefix<F>]) -> u128 {
    prefixes
        .iter()
        .map(|prefix| prefix.to_range().size().unwrap_or(u128::MAX))
        .fold(0, u128::saturating_add)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    fn test_diff_results() -> DiffResults {
        DiffResults {
            ipv4_prefixes: vec!["8.8.8.128/25".parse().unwrap(), "8.8.9.0/24".parse().unwrap()],
            ipv6_prefixes: vec!["2001:db8:8000::/33".parse().unwrap()],
        }
    }

    #[test]
    fn test_counts() {
        let results = test_diff_results();
        assert_eq!(results.count(Family::IPv4), 2);
        assert_eq!(results.count(Family::IPv6), 1);
        assert_eq!(results.len(), 3);
        assert!(!results.is_empty());
        assert!(DiffResults::default().is_empty());
    }

    #[test]
    fn test_address_count() {
        let results = test_diff_results();
        assert_eq!(results.address_count(Family::IPv4), 128 + 256);
        assert_eq!(results.address_count(Family::IPv6), 1u128 << 95);

        let everything = DiffResults {
            ipv6_prefixes: vec!["::/0".parse().unwrap(), "::/1".parse().unwrap()],
            ..Default::default()
        };
        assert_eq!(everything.address_count(Family::IPv6), u128::MAX);
    }

    #[test]
    fn test_cidrs() {
        let results = test_diff_results();
        assert_eq!(results.ipv4_cidrs(), ["8.8.8.128/25", "8.8.9.0/24"]);
        assert_eq!(results.ipv6_cidrs(), ["2001:db8:8000::/33"]);
    }

    #[test]
    fn test_retain_family() {
        let ipv4_only = test_diff_results().retain_family(Some(Family::IPv4));
        assert_eq!(ipv4_only.count(Family::IPv6), 0);
        assert_eq!(ipv4_only.count(Family::IPv4), 2);

        let ipv6_only = test_diff_results().retain_family(Some(Family::IPv6));
        assert_eq!(ipv6_only.count(Family::IPv4), 0);

        assert_eq!(test_diff_results().retain_family(None), test_diff_results());
    }
}
