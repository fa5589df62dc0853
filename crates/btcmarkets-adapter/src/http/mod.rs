/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod error;
pub mod executor;
pub mod public;
pub mod request;
pub mod signature;
pub mod trades;

pub use client::{BtcMarketsClient, ClientConfig, Credentials};
pub use error::{BtcMarketsError, Result};
pub use executor::RestResponse;
pub use request::{RequestBuilder, RequestSpec, RestMethod, RestRequest};
pub use signature::RequestSigner;
