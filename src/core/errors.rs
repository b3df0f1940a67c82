use crate::core::family::Family;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors produced while converting, subtracting, or retrieving IP ranges.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The address literal cannot be parsed for the stated family.
    #[error("malformed {family} address: {literal:?}")]
    MalformedAddress { literal: String, family: Family },

    /// The text is not in `address/prefix-length` form.
    #[error("malformed CIDR: {0:?}")]
    MalformedCidr(String),

    /// The prefix length is outside `[0, max]` for the family.
    #[error("invalid prefix length /{length}; must be between 0 and {max}")]
    InvalidPrefixLength { length: i128, max: u32 },

    /// An upstream ranges document could not be retrieved or yielded no usable data.
    #[error("upstream ranges unavailable from {location}: {reason}")]
    UpstreamUnavailable { location: String, reason: String },

    #[error(transparent)]
    IpNetwork(#[from] ipnetwork::IpNetworkError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}
