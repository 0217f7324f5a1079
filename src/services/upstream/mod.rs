pub mod client;
pub mod http;
pub mod translate;

pub use client::{Payload, UpstreamClient, UpstreamFailure, UpstreamRequest, UpstreamResult};
pub use http::HttpUpstream;
pub use translate::translate;
