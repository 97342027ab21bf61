//! Common types module for the marketplace client.
//!
//! This module defines the core data types and structures shared by the
//! wallet, delivery, and session crates. It provides a centralized location
//! for shared types to ensure consistency across all components.

/// Account-related types: addresses and transactions.
pub mod account;
/// Transaction delivery types: hashes, logs, and receipts.
pub mod delivery;
/// Listing projections and draft inputs for the marketplace contract.
pub mod listing;
/// Network configuration types.
pub mod network;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Session lifecycle types and wallet notifications.
pub mod session;
/// Utility functions for conversions and formatting.
pub mod utils;
/// Configuration validation for TOML sections.
pub mod validation;

// Re-export all types for convenient access
pub use account::*;
pub use delivery::*;
pub use listing::*;
pub use network::NetworkConfig;
pub use registry::ImplementationRegistry;
pub use session::*;
pub use utils::{
	eth_string_to_wei, parse_address, truncate_id, wei_string_to_eth_string, wei_to_eth_string,
	with_0x_prefix, without_0x_prefix,
};
pub use validation::*;
