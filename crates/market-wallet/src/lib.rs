//! Wallet provider abstraction for the marketplace client.
//!
//! This module defines the interface to the component holding the user's
//! signing key material. The session adapter talks to a [`WalletInterface`]
//! regardless of which underlying wallet implementation is configured, and
//! receives account/chain-change notifications through a subscription
//! channel for the lifetime of the adapter.

use async_trait::async_trait;
use market_types::{Address, ConfigSchema, ImplementationRegistry, WalletEvent};
use thiserror::Error;
use tokio::sync::broadcast;

/// Signer abstraction module
pub mod signer;

/// Re-export WalletSigner for convenience
pub use signer::WalletSigner;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
	/// No wallet is present in the execution environment.
	#[error("Wallet unavailable: {0}")]
	Unavailable(String),
	/// The wallet denied the permission request.
	#[error("Request rejected: {0}")]
	Rejected(String),
	/// A cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error raised by the wallet implementation itself.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the interface for wallet implementations.
///
/// A wallet holds the signing identity and mediates the account permission
/// request. Implementations also push [`WalletEvent`]s when the signing
/// account or chain changes out from under the session.
#[async_trait]
pub trait WalletInterface: Send + Sync {
	/// Returns the configuration schema for this wallet implementation.
	///
	/// The schema validates the wallet's TOML section before the
	/// implementation is instantiated.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Requests account access, i.e. the wallet's permission prompt.
	///
	/// Returns the accounts the user granted, primary account first.
	/// Fails with [`WalletError::Rejected`] if the user denies the request.
	async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

	/// Returns the chain id the wallet is currently bound to.
	fn chain_id(&self) -> u64;

	/// Returns a signer handle for transaction submission.
	fn signer(&self) -> WalletSigner;

	/// Subscribes to account-changed and chain-changed notifications.
	///
	/// Each call returns an independent receiver; dropping the receiver
	/// releases the subscription.
	fn subscribe(&self) -> broadcast::Receiver<WalletEvent>;
}

/// Factory function type for wallet implementations.
///
/// Takes the wallet's TOML configuration section and the chain id of the
/// configured network.
pub type WalletFactory = fn(&toml::Value, u64) -> Result<Box<dyn WalletInterface>, WalletError>;

/// Registry trait for wallet implementations.
pub trait WalletRegistry: ImplementationRegistry<Factory = WalletFactory> {}

/// Get all registered wallet implementations.
///
/// Returns (name, factory) tuples; the configured implementation name is
/// looked up here, and an unknown name means no wallet is available.
pub fn get_all_implementations() -> Vec<(&'static str, WalletFactory)> {
	use implementations::local;

	vec![(local::Registry::NAME, local::Registry::factory())]
}

/// Service that wraps the configured wallet implementation.
///
/// This is the handle the session adapter owns; it delegates to the
/// underlying implementation.
pub struct WalletService {
	implementation: Box<dyn WalletInterface>,
}

impl WalletService {
	/// Creates a new WalletService with the specified implementation.
	pub fn new(implementation: Box<dyn WalletInterface>) -> Self {
		Self { implementation }
	}

	/// Requests account access from the wallet.
	pub async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
		self.implementation.request_accounts().await
	}

	/// Returns the chain id the wallet is bound to.
	pub fn chain_id(&self) -> u64 {
		self.implementation.chain_id()
	}

	/// Returns a signer handle for the delivery layer.
	pub fn signer(&self) -> WalletSigner {
		self.implementation.signer()
	}

	/// Subscribes to wallet notifications.
	pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
		self.implementation.subscribe()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_PRIVATE_KEY: &str =
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn test_config() -> toml::Value {
		toml::from_str(&format!("private_key = \"{}\"", TEST_PRIVATE_KEY)).unwrap()
	}

	#[test]
	fn test_wallet_error_display() {
		let err = WalletError::Unavailable("no wallet configured".to_string());
		assert_eq!(format!("{}", err), "Wallet unavailable: no wallet configured");

		let err = WalletError::Rejected("user denied".to_string());
		assert_eq!(format!("{}", err), "Request rejected: user denied");
	}

	#[test]
	fn test_get_all_implementations_includes_local() {
		let impls = get_all_implementations();
		assert!(impls.iter().any(|(name, _)| *name == "local"));
	}

	#[tokio::test]
	async fn test_wallet_service_request_accounts() {
		use implementations::local::create_wallet;

		let wallet = create_wallet(&test_config(), 1337).unwrap();
		let service = WalletService::new(wallet);

		let accounts = service.request_accounts().await.unwrap();
		assert_eq!(accounts.len(), 1);
		assert_eq!(
			accounts[0].to_string(),
			// Anvil account #0
			"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
		assert_eq!(service.chain_id(), 1337);
	}

	#[tokio::test]
	async fn test_wallet_service_signer_matches_account() {
		use implementations::local::create_wallet;

		let wallet = create_wallet(&test_config(), 1).unwrap();
		let service = WalletService::new(wallet);

		let accounts = service.request_accounts().await.unwrap();
		let signer = service.signer();
		assert_eq!(
			format!("{:?}", signer.address()).to_lowercase(),
			accounts[0].to_string()
		);
	}
}
