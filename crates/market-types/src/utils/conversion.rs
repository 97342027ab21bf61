//! Conversion utilities for the contract boundary.
//!
//! All monetary values cross the contract boundary as wei (18-decimal base
//! units). The functions here are the single place where decimal ETH strings
//! are translated to and from that representation.

use crate::Address;

use super::formatting::without_0x_prefix;
use alloy_primitives::{
	utils::{format_ether, parse_ether},
	U256,
};

/// Parse a hex string (with or without "0x" prefix) into a 20-byte [`Address`].
pub fn parse_address(hex_str: &str) -> Result<Address, String> {
	let hex = without_0x_prefix(hex_str);
	hex::decode(hex)
		.map_err(|e| format!("Invalid hex: {}", e))
		.and_then(|bytes| {
			if bytes.len() != 20 {
				Err(format!(
					"Invalid address length: expected 20 bytes, got {}",
					bytes.len()
				))
			} else {
				Ok(Address(bytes))
			}
		})
}

/// Convert a decimal ETH string (e.g. "0.05") to wei.
///
/// Rejects anything `parse_ether` cannot represent exactly in 18 decimals,
/// including non-numeric input. Negative amounts are rejected here:
/// `parse_ether` would otherwise wrap them into the unsigned range via
/// two's complement.
pub fn eth_string_to_wei(eth_amount: &str) -> Result<U256, String> {
	let amount = eth_amount.trim();
	if amount.starts_with('-') {
		return Err(format!("Negative ETH amount '{}'", eth_amount));
	}
	parse_ether(amount).map_err(|e| format!("Failed to parse ETH amount '{}': {}", eth_amount, e))
}

/// Convert a wei amount to a decimal ETH string (full 18-digit precision).
pub fn wei_to_eth_string(wei_amount: U256) -> String {
	format_ether(wei_amount)
}

/// Convert a wei decimal string to an ETH decimal string.
pub fn wei_string_to_eth_string(wei_string: &str) -> Result<String, String> {
	let wei = U256::from_str_radix(wei_string, 10)
		.map_err(|e| format!("Invalid wei amount '{}': {}", wei_string, e))?;
	Ok(wei_to_eth_string(wei))
}
