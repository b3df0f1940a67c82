/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod client;
pub mod codec;
pub mod datetime;
pub mod decompose;
pub mod diff;
pub mod diff_results;
pub mod difference;
pub mod errors;
pub mod family;
pub mod ip_ranges;
pub mod json;
pub mod prefix;
pub mod range;
pub mod range_set;
pub mod wide_int;
