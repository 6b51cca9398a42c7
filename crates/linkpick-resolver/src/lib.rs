//! Shopping-link resolver.
//!
//! Takes a product URL from one of the supported shops (Musinsa, Ably,
//! Zigzag), expands short links, fetches the page, extracts the embedded
//! product data with a site-specific strategy, and normalizes the result
//! into a common [`ProductRecord`].

pub mod client;
pub mod error;
mod normalize;
mod redirect;
mod resolve;
mod scan;
mod sites;
pub mod types;

pub use client::ResolverClient;
pub use error::ResolveError;
pub use resolve::resolve;
pub use sites::detect_source;
pub use types::{ProductRecord, Source};
