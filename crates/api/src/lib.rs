//! reqwest-backed implementation of the marketplace port.

pub mod client;

pub use client::HttpMarketplace;
