/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public BTC Markets adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    BtcMarketsClient,
    BtcMarketsError,
    ClientConfig,
    Credentials,
    RequestBuilder,
    RequestSigner,
    RequestSpec,
    RestMethod,
    RestRequest,
    RestResponse,
    Result,
};

// Re-export all types
pub use types::*;
