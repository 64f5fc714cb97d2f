//! Mosaic generation backend access

pub mod http;

// Re-export for convenience
pub use http::MosaicClient;
