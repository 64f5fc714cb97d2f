use std::fmt;

/// Error type for mosaic submissions and session commands
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error
{   /// Configured endpoint is not a usable http(s) URL
    InvalidUrl(String)
  , /// Server answered with a status other than 200
    InvalidResponse(u16)
  , /// Response body did not decode into a mosaic
    InvalidData(String)
  , /// Request never produced a response (DNS, refused, timeout)
    Transport(String)
  , /// A submission is already outstanding for this session
    SubmissionInFlight
  , /// Form field name not recognised
    UnknownField(String)
  , /// Form field value could not be parsed
    InvalidField
    {   field: String
      , value: String
    }
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::InvalidUrl(endpoint) => {
              write!(f, "Invalid URL: {}", endpoint)
            }
          , Error::InvalidResponse(status) => {
              write!(f, "Invalid response: HTTP status {}", status)
            }
          , Error::InvalidData(reason) => {
              write!(f, "Invalid data: {}", reason)
            }
          , Error::Transport(cause) => {
              write!(f, "Transport error: {}", cause)
            }
          , Error::SubmissionInFlight => {
              write!(f,
                "A mosaic submission is already in progress"
              )
            }
          , Error::UnknownField(name) => {
              write!(f, "Unknown form field: {}", name)
            }
          , Error::InvalidField { field, value } => {
              write!(f,
                "Invalid value for {}: {:?}",
                field, value
              )
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
