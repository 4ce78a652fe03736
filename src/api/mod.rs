//! Marketplace backend API
//!
//! This module is the only I/O boundary of the front end. It knows how to
//! read the item collection and how to submit a new listing as a multipart
//! request; everything else lives in the callers.

pub mod client;
pub mod errors;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{HttpApiClient, MarketplaceApi, MarketplaceEndpoints};
pub use errors::ApiError;
