//! Utility functions for common type conversions and transformations.
//!
//! The conversion module owns the decimal-string ↔ base-unit boundary: all
//! monetary values cross the contract boundary as wei, and this is the only
//! place that translation happens.

pub mod conversion;
pub mod formatting;

pub use conversion::{
	eth_string_to_wei, parse_address, wei_string_to_eth_string, wei_to_eth_string,
};
pub use formatting::{truncate_id, with_0x_prefix, without_0x_prefix};
