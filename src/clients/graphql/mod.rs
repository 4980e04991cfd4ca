//! Generic GraphQL client and response classification.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: Sends operations to one endpoint, with retries
//! - [`ClientResponse`]: The classified outcome of a request
//! - [`ResponseErrors`]: What went wrong, as data
//! - [`GraphqlError`]: Error type of the raw [`GraphqlClient::fetch`] path
//!
//! # Response Structure
//!
//! A GraphQL payload carries up to three top-level fields:
//!
//! - `data`: The operation result
//! - `errors`: GraphQL errors, possibly alongside partial `data`
//! - `extensions`: Cost and context information
//!
//! [`ClientResponse`] keeps `data` and `extensions` whenever the payload has
//! them, and sets `errors` when the status, content type or payload shape
//! shows a problem.

mod client;
mod errors;
mod response;

pub use client::{GraphqlClient, GraphqlClientBuilder};
pub use errors::GraphqlError;
pub use response::{
    ClientResponse, ResponseErrors, CONTENT_TYPE_JSON, GQL_API_ERROR, MULTIPART_CONTENT_TYPE,
    NO_DATA_OR_ERRORS, NULL_BODY,
};
