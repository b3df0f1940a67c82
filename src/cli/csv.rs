use cidrdiff::{AddressFamily, DiffResults, Prefix, Result};
use csv::Writer;
use std::fs::File;
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Save Difference Results to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(results: &DiffResults, path: &PathBuf) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize(["Prefix", "Family", "Network", "Netmask"])?;

    // Write prefix records
    for prefix in &results.ipv4_prefixes {
        write_prefix(&mut writer, prefix)?;
    }
    for prefix in &results.ipv6_prefixes {
        write_prefix(&mut writer, prefix)?;
    }

    writer.flush()?;

    Ok(())
}

fn write_prefix<F: AddressFamily>(writer: &mut Writer<File>, prefix: &Prefix<F>) -> Result<()> {
    let network = prefix.to_ip_network()?;
    let record = (
        prefix.to_string(),
        prefix.family().to_string(),
        network.network().to_string(),
        network.mask().to_string(),
    );
    writer.serialize(record)?;
    Ok(())
}
