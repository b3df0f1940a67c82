use cidrdiff::{int_to_address, AddressFamily, DiffResults, Family, Prefix, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Prefix Table
--------------------------------------------------------------------------------------*/

pub fn prefix_table(results: &DiffResults) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("IP Prefix")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Family")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("First Address")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Last Address")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Addresses")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    for row in results
        .ipv4_prefixes
        .iter()
        .map(prefix_row)
        .chain(results.ipv6_prefixes.iter().map(prefix_row))
    {
        table.add_row(row);
    }

    // Right-align the IP Prefix and Addresses columns
    for index in [0, 4] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    println!("{table}");
}

fn prefix_row<F: AddressFamily>(prefix: &Prefix<F>) -> Vec<Cell> {
    vec![
        Cell::new(prefix).add_attribute(Attribute::Bold),
        Cell::new(prefix.family()),
        Cell::new(int_to_address::<F>(prefix.network())),
        Cell::new(int_to_address::<F>(prefix.broadcast())),
        Cell::new(address_count(prefix)),
    ]
}

/// Address count of a block; blocks larger than 2^32 addresses are shown as a power of two.
fn address_count<F: AddressFamily>(prefix: &Prefix<F>) -> String {
    match prefix.host_bits() {
        host_bits if host_bits <= 32 => (1u64 << host_bits).to_string(),
        host_bits => format!("2^{host_bits}"),
    }
}

/*--------------------------------------------------------------------------------------
  Summary Table
--------------------------------------------------------------------------------------*/

pub fn summary_table(results: &DiffResults) {
    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for family in [Family::IPv4, Family::IPv6] {
        summary_table.add_row(vec![
            Cell::new(results.count(family)),
            Cell::new(format!("{family} Prefixes")),
        ]);
        summary_table.add_row(vec![
            Cell::new(results.address_count(family)),
            Cell::new(format!("{family} Addresses")),
        ]);
    }

    if let Some(column) = summary_table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  Prefixes In CIDR Format
--------------------------------------------------------------------------------------*/

pub fn prefixes_in_cidr_format(results: &DiffResults) {
    for cidr in results.ipv4_cidrs().iter().chain(results.ipv6_cidrs().iter()) {
        println!("{cidr}");
    }
}

/*--------------------------------------------------------------------------------------
  Prefixes In Netmask Format
--------------------------------------------------------------------------------------*/

pub fn prefixes_in_netmask_format(results: &DiffResults) -> Result<()> {
    for prefix in &results.ipv4_prefixes {
        println!("{}", netmask_format(prefix)?);
    }
    for prefix in &results.ipv6_prefixes {
        println!("{}", netmask_format(prefix)?);
    }
    Ok(())
}

fn netmask_format<F: AddressFamily>(prefix: &Prefix<F>) -> Result<String> {
    let network = prefix.to_ip_network()?;
    Ok(format!("{} {}", network.network(), network.mask()))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use cidrdiff::{Ipv4, Ipv6};

    #[test]
    fn test_netmask_format() {
        let prefix: Prefix<Ipv4> = "8.8.8.128/25".parse().unwrap();
        assert_eq!(netmask_format(&prefix).unwrap(), "8.8.8.128 255.255.255.128");

        let prefix: Prefix<Ipv6> = "2001:db8:8000::/33".parse().unwrap();
        assert_eq!(
            netmask_format(&prefix).unwrap(),
            "2001:db8:8000:: ffff:ffff:8000::"
        );
    }

    #[test]
    fn test_address_count() {
        let prefix: Prefix<Ipv4> = "8.8.8.128/25".parse().unwrap();
        assert_eq!(address_count(&prefix), "128");

        let prefix: Prefix<Ipv4> = "0.0.0.0/0".parse().unwrap();
        assert_eq!(address_count(&prefix), "4294967296");

        let prefix: Prefix<Ipv6> = "2001:db8::/32".parse().unwrap();
        assert_eq!(address_count(&prefix), "2^96");
    }
}
