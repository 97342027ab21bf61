//! Network configuration types.
//!
//! The client talks to a single EVM network; this module defines the
//! RPC endpoint and chain settings required to reach it.

use serde::{Deserialize, Serialize};

/// Configuration for the blockchain network the contract is deployed on.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
	/// Chain ID used for replay protection and signer binding.
	pub chain_id: u64,
	/// HTTP(S) RPC endpoint URL.
	pub http_url: String,
	/// Optional WebSocket RPC endpoint URL for push-based subscriptions.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ws_url: Option<String>,
}

impl NetworkConfig {
	/// Returns the HTTP RPC URL.
	pub fn get_http_url(&self) -> &str {
		&self.http_url
	}
}
