use crate::core::diff::difference;
use crate::core::diff_results::DiffResults;
use crate::core::errors::{Error, Result};
use crate::core::ip_ranges::IpRanges;
use log::{info, warn};
use std::env;
use std::fs;
use std::{thread, time};

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ retrieves the source and excluded IP ranges documents using
/// the default client configuration and returns their difference.
///
/// ```no_run
/// let results = cidrdiff::get_difference()?;
/// for cidr in results.ipv4_cidrs() {
///     println!("{cidr}");
/// }
/// # Ok::<(), cidrdiff::Error>(())
/// ```
pub fn get_difference() -> Result<DiffResults> {
    Client::new().get_difference()
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration. The
/// [ClientBuilder] struct provides setters for each configuration value and a
/// [ClientBuilder::build] method to create a [Client] instance.
///
/// ```
/// let client = cidrdiff::ClientBuilder::new()
///     .source("https://www.gstatic.com/ipranges/goog.json")
///     .excluded("./cloud.json")
///     .retry_count(4)
///     .retry_initial_delay(200) // 200 ms
///     .retry_backoff_factor(2)
///     .retry_timeout(5000) // 5 seconds
///     .build();
/// ```
///
/// The [ClientBuilder::new] method attempts to source configuration values from environment
/// variables when set and uses default values when the environment variables are not set.
///
/// If you want to use the default configuration values, ignoring any environment variables, use
/// the [ClientBuilder::default] method to create a new [ClientBuilder] instance.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    source: String,
    excluded: String,
    retry_count: u32,
    retry_initial_delay: u64,
    retry_backoff_factor: u64,
    retry_timeout: u64,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with default configuration values.
    ///
    /// ```
    /// let client = cidrdiff::ClientBuilder::default().build();
    ///
    /// assert_eq!(client.source(), "https://www.gstatic.com/ipranges/goog.json");
    /// assert_eq!(client.excluded(), "https://www.gstatic.com/ipranges/cloud.json");
    /// assert_eq!(client.retry_count(), 4);
    /// ```
    fn default() -> Self {
        Self {
            source: "https://www.gstatic.com/ipranges/goog.json".to_string(),
            excluded: "https://www.gstatic.com/ipranges/cloud.json".to_string(),
            retry_count: 4,
            retry_initial_delay: 200, // 200 ms
            retry_backoff_factor: 2,
            retry_timeout: 5000, // 5 seconds
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `CIDRDIFF_SOURCE_URL`
    /// - `CIDRDIFF_EXCLUDED_URL`
    /// - `CIDRDIFF_RETRY_COUNT`
    /// - `CIDRDIFF_RETRY_INITIAL_DELAY`
    /// - `CIDRDIFF_RETRY_BACKOFF_FACTOR`
    /// - `CIDRDIFF_RETRY_TIMEOUT`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            source: get_env_var("CIDRDIFF_SOURCE_URL", default.source),
            excluded: get_env_var("CIDRDIFF_EXCLUDED_URL", default.excluded),
            retry_count: get_env_var("CIDRDIFF_RETRY_COUNT", default.retry_count),
            retry_initial_delay: get_env_var(
                "CIDRDIFF_RETRY_INITIAL_DELAY",
                default.retry_initial_delay,
            ),
            retry_backoff_factor: get_env_var(
                "CIDRDIFF_RETRY_BACKOFF_FACTOR",
                default.retry_backoff_factor,
            ),
            retry_timeout: get_env_var("CIDRDIFF_RETRY_TIMEOUT", default.retry_timeout),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the location of the source (whole network) IP ranges document; defaults to
    /// `https://www.gstatic.com/ipranges/goog.json`. Locations that are not `http://` or
    /// `https://` URLs are read as local file paths.
    pub fn source(&mut self, source: &str) -> &mut Self {
        self.source = source.to_string();
        self
    }

    /// Set the location of the excluded (subset) IP ranges document; defaults to
    /// `https://www.gstatic.com/ipranges/cloud.json`.
    pub fn excluded(&mut self, excluded: &str) -> &mut Self {
        self.excluded = excluded.to_string();
        self
    }

    /// Set the number of attempts to retrieve a document from a URL; defaults to `4`.
    pub fn retry_count(&mut self, retry_count: u32) -> &mut Self {
        self.retry_count = retry_count;
        self
    }

    /// Set the initial delay (in milliseconds) between retry attempts; defaults to `200`
    /// milliseconds.
    ///
    /// The delay between retry attempts is calculated as:
    /// `retry_initial_delay * (retry_backoff_factor ^ attempt)`.
    pub fn retry_initial_delay(&mut self, retry_initial_delay: u64) -> &mut Self {
        self.retry_initial_delay = retry_initial_delay;
        self
    }

    /// Set the backoff factor used to increase the delay between retry attempts; defaults to
    /// `2`.
    pub fn retry_backoff_factor(&mut self, retry_backoff_factor: u64) -> &mut Self {
        self.retry_backoff_factor = retry_backoff_factor;
        self
    }

    /// Set the maximum time (in milliseconds) to spend retrieving a document from a URL;
    /// defaults to `5000` milliseconds (5 seconds).
    pub fn retry_timeout(&mut self, retry_timeout: u64) -> &mut Self {
        self.retry_timeout = retry_timeout;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Client {
        Client {
            source: self.source.clone(),
            excluded: self.excluded.clone(),
            retry_count: self.retry_count,
            retry_initial_delay: self.retry_initial_delay,
            retry_backoff_factor: self.retry_backoff_factor,
            retry_timeout: self.retry_timeout,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// A client for retrieving the source and excluded IP ranges documents from URLs or local files.
/// Client implements a simple exponential-backoff retry mechanism for URLs.
///
/// Any failure to retrieve or parse either document is reported as
/// [Error::UpstreamUnavailable]; a difference is never computed from partial data.
#[derive(Debug, Clone)]
pub struct Client {
    source: String,
    excluded: String,
    retry_count: u32,
    retry_initial_delay: u64,
    retry_backoff_factor: u64,
    retry_timeout: u64,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Default for Client {
    /// Create a new [Client] with default configuration values.
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}

impl Client {
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Location of the source (whole network) IP ranges document.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Location of the excluded (subset) IP ranges document.
    pub fn excluded(&self) -> &str {
        &self.excluded
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn retry_initial_delay(&self) -> u64 {
        self.retry_initial_delay
    }

    pub fn retry_backoff_factor(&self) -> u64 {
        self.retry_backoff_factor
    }

    pub fn retry_timeout(&self) -> u64 {
        self.retry_timeout
    }

    /*-------------------------------------------------------------------------
      Get Ranges
    -------------------------------------------------------------------------*/

    /// Retrieve and parse the source IP ranges document.
    pub fn get_source_ranges(&self) -> Result<IpRanges> {
        self.get_ranges(&self.source)
    }

    /// Retrieve and parse the excluded IP ranges document.
    pub fn get_excluded_ranges(&self) -> Result<IpRanges> {
        self.get_ranges(&self.excluded)
    }

    /// Retrieve both documents and compute the prefixes in the source that are not in the
    /// excluded ranges.
    pub fn get_difference(&self) -> Result<DiffResults> {
        let source = self.get_source_ranges()?;
        let excluded = self.get_excluded_ranges()?;
        Ok(difference(&source, &excluded))
    }

    /// Retrieve and parse the IP ranges document at `location`. Retrieval and parse failures,
    /// and documents without any usable prefixes, are reported as
    /// [Error::UpstreamUnavailable].
    pub fn get_ranges(&self, location: &str) -> Result<IpRanges> {
        let unavailable = |reason: String| Error::UpstreamUnavailable {
            location: location.to_string(),
            reason,
        };

        let json = self
            .get_json(location)
            .map_err(|error| unavailable(error.to_string()))?;

        let ip_ranges =
            IpRanges::from_json(&json).map_err(|error| unavailable(error.to_string()))?;

        if ip_ranges.is_empty() {
            return Err(unavailable("no IPv4 or IPv6 prefixes".to_string()));
        }

        info!(
            "{location} published {}: {} IPv4 and {} IPv6 prefixes",
            ip_ranges
                .creation_time()
                .map_or_else(|| "at an unknown time".to_string(), ToString::to_string),
            ip_ranges.ipv4_prefixes().len(),
            ip_ranges.ipv6_prefixes().len()
        );

        Ok(ip_ranges)
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    /// Get an IP ranges JSON document from a URL or file.
    fn get_json(&self, location: &str) -> Result<String> {
        if is_url(location) {
            self.get_json_from_url(location)
        } else {
            get_json_from_file(location)
        }
    }

    /// Delay before the retry that follows `attempt`:
    /// `retry_initial_delay * (retry_backoff_factor ^ attempt)`, saturating at `u64::MAX` ms.
    fn retry_delay(&self, attempt: u32) -> time::Duration {
        time::Duration::from_millis(
            self.retry_initial_delay
                .saturating_mul(self.retry_backoff_factor.saturating_pow(attempt)),
        )
    }

    /// Get an IP ranges JSON document from a URL.
    fn get_json_from_url(&self, url: &str) -> Result<String> {
        let start_time = time::Instant::now();
        let max_elapsed_time = time::Duration::from_millis(self.retry_timeout);

        let mut attempt: u32 = 0;
        loop {
            info!("Get IP ranges from URL; Attempt {}: GET {}", attempt, url);
            let json: Result<String> = reqwest::blocking::get(url)
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.text())
                .map_err(Error::from)
                .and_then(validate_json);

            match json {
                Ok(json) => {
                    info!("Get IP ranges from URL; Attempt {}: Ok", attempt);
                    break Ok(json);
                }
                Err(error) => {
                    log::error!(
                        "Get IP ranges from URL; Attempt {}: FAILED: {}",
                        attempt,
                        error
                    );

                    let delay = self.retry_delay(attempt);

                    attempt += 1;

                    if (start_time.elapsed() + delay < max_elapsed_time)
                        && (attempt < self.retry_count)
                    {
                        thread::sleep(delay);
                        continue;
                    } else {
                        break Err(error);
                    }
                }
            }
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get an IP ranges JSON document from a file.
fn get_json_from_file(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(Error::from)
        .and_then(validate_json)
        .inspect(|_| info!("Successfully read IP ranges JSON from: {:?}", path))
        .inspect_err(|error| {
            log::error!("Failed to read IP ranges JSON from `{:?}`: {}", path, error)
        })
}

fn is_url(location: &str) -> bool {
    location.starts_with("https://") || location.starts_with("http://")
}

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/// Validate a string contains parsable JSON.
fn validate_json(json: String) -> Result<String> {
    serde_json::from_str::<serde::de::IgnoredAny>(&json)?;
    Ok(json)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
