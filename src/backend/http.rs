use std::time::Duration;
use log::{debug, trace, error};
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};

use crate::config::MosaicConfig;
use crate::error::Error;
use crate::request::{MosaicRequest, MosaicResponse};

/// Stateless HTTP client for the mosaic endpoint
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct MosaicClient
{   endpoint: String
  , http_client: reqwest::Client
}

impl MosaicClient
{   /// Build a client from configuration
    ///
    /// Redirects are not followed: anything but a 200 is a failed call.
    pub fn new(config: &MosaicConfig) -> Result<Self, Error>
    {   debug!("Creating MosaicClient for {}", config.endpoint);
        let mut builder = reqwest::Client::builder()
          .redirect(reqwest::redirect::Policy::none());

        if let Some(secs) = config.timeout_secs
        {   builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          Error::Transport(e.to_string())
        })?;

        Ok(MosaicClient
        {   endpoint: config.endpoint.clone()
          , http_client
        })
    }

    pub fn endpoint(&self) -> &str
    {   &self.endpoint
    }

    fn endpoint_url(&self) -> Result<Url, Error>
    {   let url = Url::parse(&self.endpoint).map_err(|e| {
          error!("Invalid endpoint {}: {}", self.endpoint, e);
          Error::InvalidUrl(self.endpoint.clone())
        })?;

        match url.scheme()
        {   "http" | "https" => Ok(url)
          , scheme => {
              error!("Unsupported endpoint scheme: {}", scheme);
              Err(Error::InvalidUrl(self.endpoint.clone()))
            }
        }
    }

    /// POST one request and decode the mosaic it produces
    pub async fn submit(
      &self
    , request: &MosaicRequest
    ) -> Result<MosaicResponse, Error>
    {   let url = self.endpoint_url()?;
        debug!(
          "Submitting mosaic for {:?} by {:?}",
          request.album_name, request.artist
        );
        trace!("Mosaic request: {:?}", request);

        let response = self.http_client
          .post(url)
          .header(CONTENT_TYPE, "application/json")
          .json(request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            Error::Transport(e.to_string())
          })?;

        let status = response.status();
        trace!("Mosaic response status: {}", status);

        if status != StatusCode::OK
        {   error!("Mosaic endpoint answered {}", status);
            return Err(Error::InvalidResponse(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
          error!("Failed reading response body: {}", e);
          Error::Transport(e.to_string())
        })?;

        let mosaic: MosaicResponse = serde_json::from_slice(&body)
          .map_err(|e| {
            error!("Parse error: {}", e);
            Error::InvalidData(e.to_string())
          })?;

        debug!("Received mosaic at {}", mosaic.mosaic_url);
        Ok(mosaic)
    }
}
