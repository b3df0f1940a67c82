use crate::core::errors::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

pub fn parse(json: &str) -> Result<JsonIpRanges<'_>> {
    Ok(serde_json::from_str(json)?)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  JSON IP Ranges
--------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonIpRanges<'j> {
    #[serde(rename = "syncToken", default, borrow)]
    pub sync_token: Option<Cow<'j, str>>,

    #[serde(rename = "creationTime", default, with = "crate::core::datetime")]
    pub creation_time: Option<DateTime<Utc>>,

    #[serde(borrow)]
    pub prefixes: Vec<JsonIpPrefix<'j>>,
}

/*--------------------------------------------------------------------------------------
  JSON IP Prefix
--------------------------------------------------------------------------------------*/

/// A prefix record. Each record carries an IPv4 prefix, an IPv6 prefix, or (rarely) neither.
///
/// Strings are borrowed from the document when possible and owned when they contain escape
/// sequences (e.g. `"8.8.8.0\/24"`).
#[derive(Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonIpPrefix<'j> {
    #[serde(
        rename = "ipv4Prefix",
        default,
        borrow,
        skip_serializing_if = "Option::is_none"
    )]
    pub ipv4_prefix: Option<Cow<'j, str>>,

    #[serde(
        rename = "ipv6Prefix",
        default,
        borrow,
        skip_serializing_if = "Option::is_none"
    )]
    pub ipv6_prefix: Option<Cow<'j, str>>,

    #[serde(default, borrow, skip_serializing_if = "Option::is_none")]
    pub service: Option<Cow<'j, str>>,

    #[serde(default, borrow, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Cow<'j, str>>,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
