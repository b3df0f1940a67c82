use crate::core::errors::Result;
use crate::core::family::{Family, Ipv4, Ipv6};
use crate::core::json;
use crate::core::prefix::Prefix;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::borrow::Cow;

/*-------------------------------------------------------------------------------------------------
  IP Ranges
-------------------------------------------------------------------------------------------------*/

/// Prefixes published in one IP ranges document, split by address family.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IpRanges {
    pub(crate) sync_token: Option<String>,
    pub(crate) creation_time: Option<DateTime<Utc>>,

    pub(crate) ipv4_prefixes: Vec<Prefix<Ipv4>>,
    pub(crate) ipv6_prefixes: Vec<Prefix<Ipv6>>,
}

/*--------------------------------------------------------------------------------------
  IP Ranges Implementation
--------------------------------------------------------------------------------------*/

impl IpRanges {
    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Publication token of the document, when present.
    pub fn sync_token(&self) -> Option<&str> {
        self.sync_token.as_deref()
    }

    /// Publication time of the document, when present.
    pub fn creation_time(&self) -> Option<&DateTime<Utc>> {
        self.creation_time.as_ref()
    }

    pub fn ipv4_prefixes(&self) -> &[Prefix<Ipv4>] {
        &self.ipv4_prefixes
    }

    pub fn ipv6_prefixes(&self) -> &[Prefix<Ipv6>] {
        &self.ipv6_prefixes
    }

    /// Number of prefixes in the given family.
    pub fn count(&self, family: Family) -> usize {
        match family {
            Family::IPv4 => self.ipv4_prefixes.len(),
            Family::IPv6 => self.ipv6_prefixes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ipv4_prefixes.is_empty() && self.ipv6_prefixes.is_empty()
    }

    /*-------------------------------------------------------------------------
      IP Ranges from CIDRs
    -------------------------------------------------------------------------*/

    /// Build an [IpRanges] from CIDR strings of either family; the family of each CIDR is
    /// inferred from its address.
    ///
    /// ```
    /// let ip_ranges = cidrdiff::IpRanges::from_cidrs(["8.8.8.0/24", "2001:db8::/32"])?;
    /// assert_eq!(ip_ranges.ipv4_prefixes().len(), 1);
    /// assert_eq!(ip_ranges.ipv6_prefixes().len(), 1);
    /// # Ok::<(), cidrdiff::Error>(())
    /// ```
    pub fn from_cidrs<I, S>(cidrs: I) -> Result<IpRanges>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ip_ranges = IpRanges::default();
        for cidr in cidrs {
            ip_ranges.push_cidr(cidr.as_ref())?;
        }
        Ok(ip_ranges)
    }

    /*-------------------------------------------------------------------------
      (Internal) IP Ranges from JSON
    -------------------------------------------------------------------------*/

    pub(crate) fn from_json(json: &str) -> Result<IpRanges> {
        let json_ip_ranges = json::parse(json)?;

        let mut ip_ranges = IpRanges {
            sync_token: json_ip_ranges.sync_token.map(Cow::into_owned),
            creation_time: json_ip_ranges.creation_time,
            ..Default::default()
        };

        for json_ip_prefix in &json_ip_ranges.prefixes {
            if json_ip_prefix.ipv4_prefix.is_none() && json_ip_prefix.ipv6_prefix.is_none() {
                warn!(
                    "Skipping prefix record without an IPv4 or IPv6 prefix: {:?}",
                    json_ip_prefix
                );
                continue;
            }

            // A record may carry both families; each field must hold its own family
            if let Some(cidr) = json_ip_prefix.ipv4_prefix.as_deref() {
                ip_ranges.ipv4_prefixes.push(cidr.parse()?);
            }
            if let Some(cidr) = json_ip_prefix.ipv6_prefix.as_deref() {
                ip_ranges.ipv6_prefixes.push(cidr.parse()?);
            }
        }

        debug!(
            "Parsed {} IPv4 and {} IPv6 prefixes",
            ip_ranges.ipv4_prefixes.len(),
            ip_ranges.ipv6_prefixes.len()
        );

        Ok(ip_ranges)
    }

    fn push_cidr(&mut self, cidr: &str) -> Result<()> {
        match Family::of_cidr(cidr) {
            Family::IPv4 => self.ipv4_prefixes.push(cidr.parse()?),
            Family::IPv6 => self.ipv6_prefixes.push(cidr.parse()?),
        }
        Ok(())
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::errors::Error;
    use chrono::TimeZone;
    use test_log::test;

    /*----------------------------------------------------------------------------------
      Test Helper Functions
    ----------------------------------------------------------------------------------*/

    pub(crate) fn test_ip_ranges<I, S>(cidrs: I) -> IpRanges
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        IpRanges::from_cidrs(cidrs).unwrap()
    }

    /*----------------------------------------------------------------------------------
      IP Ranges
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_from_json() {
        let json = r#"{
          "syncToken": "1704067200000",
          "creationTime": "2024-01-01T00:00:00",
          "prefixes": [
            { "ipv4Prefix": "8.8.8.0/24" },
            { "ipv4Prefix": "8.8.4.0/24", "service": "Google Cloud", "scope": "us-east1" },
            { "ipv6Prefix": "2001:db8::/32" },
            { "service": "Google Cloud" }
          ]
        }"#;

        let ip_ranges = IpRanges::from_json(json).unwrap();

        assert_eq!(ip_ranges.sync_token(), Some("1704067200000"));
        assert_eq!(
            ip_ranges.creation_time(),
            Some(&Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(ip_ranges.count(Family::IPv4), 2);
        assert_eq!(ip_ranges.count(Family::IPv6), 1);
        assert_eq!(ip_ranges.ipv4_prefixes()[1].to_string(), "8.8.4.0/24");
        assert_eq!(ip_ranges.ipv6_prefixes()[0].to_string(), "2001:db8::/32");
    }

    #[test]
    fn test_from_json_record_with_both_families() {
        let json = r#"{
          "prefixes": [ { "ipv4Prefix": "8.8.8.0/24", "ipv6Prefix": "2001:db8::/32" } ]
        }"#;

        let ip_ranges = IpRanges::from_json(json).unwrap();
        assert_eq!(ip_ranges.count(Family::IPv4), 1);
        assert_eq!(ip_ranges.count(Family::IPv6), 1);
        assert_eq!(ip_ranges.sync_token(), None);
    }

    #[test]
    fn test_from_json_normalizes_host_bits() {
        let json = r#"{ "prefixes": [ { "ipv4Prefix": "8.8.8.8/24" } ] }"#;
        let ip_ranges = IpRanges::from_json(json).unwrap();
        assert_eq!(ip_ranges.ipv4_prefixes()[0].to_string(), "8.8.8.0/24");
    }

    #[test]
    fn test_from_json_invalid_prefix() {
        let json = r#"{ "prefixes": [ { "ipv4Prefix": "8.8.8.0/33" } ] }"#;
        assert!(matches!(
            IpRanges::from_json(json),
            Err(Error::InvalidPrefixLength { length: 33, .. })
        ));

        let json = r#"{ "prefixes": [ { "ipv6Prefix": "2001:zz8::/32" } ] }"#;
        assert!(matches!(
            IpRanges::from_json(json),
            Err(Error::MalformedAddress { .. })
        ));
    }

    #[test]
    fn test_from_json_escaped_prefixes() {
        let json = r#"{
          "syncToken": "17040\u0036",
          "prefixes": [
            { "ipv4Prefix": "8.8.8.0\/24" },
            { "ipv6Prefix": "2001:db8::\/32", "service": "Google\u0020Cloud" }
          ]
        }"#;

        let ip_ranges = IpRanges::from_json(json).unwrap();
        assert_eq!(ip_ranges.sync_token(), Some("170406"));
        assert_eq!(ip_ranges.ipv4_prefixes()[0].to_string(), "8.8.8.0/24");
        assert_eq!(ip_ranges.ipv6_prefixes()[0].to_string(), "2001:db8::/32");
    }

    #[test]
    fn test_from_json_prefix_in_wrong_field() {
        let json = r#"{ "prefixes": [ { "ipv4Prefix": "2001:db8::/32" } ] }"#;
        assert!(matches!(
            IpRanges::from_json(json),
            Err(Error::MalformedAddress {
                family: Family::IPv4,
                ..
            })
        ));
    }

    #[test]
    fn test_from_cidrs() {
        let ip_ranges = test_ip_ranges(["8.8.8.0/24", "2001:db8::/32", "10.0.0.0/8"]);
        assert_eq!(ip_ranges.count(Family::IPv4), 2);
        assert_eq!(ip_ranges.count(Family::IPv6), 1);
        assert!(!ip_ranges.is_empty());

        assert!(IpRanges::from_cidrs(Vec::<String>::new()).unwrap().is_empty());
        assert!(IpRanges::from_cidrs(["8.8.8.0/24", "garbage"]).is_err());
    }
}
