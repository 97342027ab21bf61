//! Session adapter for the marketplace contract.
//!
//! This crate owns the lifecycle of the wallet connection and exposes a
//! small, stable request surface to the rest of the application: connect,
//! mint, publish a listing, purchase, and query active listings. The
//! marketplace contract itself is an opaque, externally-deployed
//! collaborator; the adapter forwards requests to it through the delivery
//! layer and normalizes responses and failures into a small typed shape.

/// The session adapter and its state machine.
pub mod adapter;
/// Marketplace contract call encoding and response decoding.
pub mod contract;
/// Error taxonomy surfaced to callers.
pub mod error;

pub use adapter::SessionAdapter;
pub use contract::MarketplaceContract;
pub use error::SessionError;
