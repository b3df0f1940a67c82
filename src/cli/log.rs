use cidrdiff::{DiffResults, Family, IpRanges};
use log::{info, warn};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Difference Results
--------------------------------------------------------------------------------------*/

pub fn diff_results(source: &IpRanges, excluded: &IpRanges, results: &DiffResults) {
    for family in [Family::IPv4, Family::IPv6] {
        let source_count = source.count(family);
        let excluded_count = excluded.count(family);
        let result_count = results.count(family);

        info!(
            "{family}: {source_count} source prefix(es) minus {excluded_count} excluded prefix(es) \
             leaves {result_count} prefix(es)"
        );

        if source_count > 0 && result_count == 0 {
            warn!("{family}: every source prefix is covered by the excluded prefixes");
        }
    }

    if let (Some(source_time), Some(excluded_time)) =
        (source.creation_time(), excluded.creation_time())
    {
        if source_time != excluded_time {
            info!("Documents were published at different times: {source_time} and {excluded_time}");
        }
    }
}
