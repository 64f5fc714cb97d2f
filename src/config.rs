//! Configuration for the mosaic endpoint and HTTP client

use serde::{Deserialize, Serialize};
use log::{debug, error};

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str
  = "http://127.0.0.1:5000/AlbumCoverMosaic";

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "MOSAIC_ENDPOINT";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "MOSAIC_TIMEOUT_SECS";

/// Mosaic client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicConfig
{   /// Full URL the request is POSTed to
    pub endpoint: String
  , /// Request timeout in seconds, transport default when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>
}

impl Default for MosaicConfig
{   fn default() -> Self
    {   MosaicConfig
        {   endpoint: DEFAULT_ENDPOINT.to_string()
          , timeout_secs: None
        }
    }
}

impl MosaicConfig
{   /// Config pointing at a specific endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self
    {   MosaicConfig
        {   endpoint: endpoint.into()
          , ..MosaicConfig::default()
        }
    }

    /// Build from the process environment, falling back to defaults
    pub fn from_env() -> Self
    {   let mut config = MosaicConfig::default();

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV)
        {   debug!("Endpoint from {}: {}", ENDPOINT_ENV, endpoint);
            config.endpoint = endpoint;
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV)
        {   match raw.trim().parse::<u64>()
            {   Ok(secs) => config.timeout_secs = Some(secs)
              , Err(_) => {
                  error!(
                    "Ignoring {}: not a number of seconds: {}",
                    TIMEOUT_ENV, raw
                  );
                }
            }
        }

        config
    }
}
