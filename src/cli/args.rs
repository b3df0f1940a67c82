use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "List the IP prefixes in a provider's network that are not part of an excluded subset.",
    long_about = None
)]
pub struct Args {
    /// Source (whole network) IP ranges document; URL or file path
    #[arg(long)]
    pub source: Option<String>,

    /// Excluded (subset) IP ranges document; URL or file path
    #[arg(long)]
    pub excluded: Option<String>,

    /// Include IPv4 prefixes
    #[arg(short = '4', long)]
    pub ipv4: bool,

    /// Include IPv6 prefixes
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Cidr)]
    pub output: OutputFormat,

    /// Include a summary of the resulting prefixes
    #[arg(long)]
    pub summary: bool,

    /// Save the results to a CSV file
    #[arg(long = "csv")]
    pub csv_file: Option<PathBuf>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(ValueEnum, Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    /// List of (RFC4632) CIDR-format prefixes, one per line
    #[default]
    Cidr,

    /// List of IP networks in network mask format (n.n.n.n m.m.m.m)
    Netmask,

    /// Table of prefixes with their family and address count
    Table,
}

/*--------------------------------------------------------------------------------------
  Arguments Implementation
--------------------------------------------------------------------------------------*/

impl Args {
    /// Family selected by `-4` / `-6`; both or neither select both families.
    pub fn family(&self) -> Option<cidrdiff::Family> {
        match (self.ipv4, self.ipv6) {
            (true, false) => Some(cidrdiff::Family::IPv4),
            (false, true) => Some(cidrdiff::Family::IPv6),
            _ => None,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
