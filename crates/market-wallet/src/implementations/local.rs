//! Local private-key wallet implementation.
//!
//! Holds a private key in memory and grants account requests without
//! prompting. Suitable for development and test environments where key
//! management simplicity is preferred; a browser-extension wallet would
//! implement the same interface with a real prompt.

use crate::{WalletError, WalletInterface, WalletSigner};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use market_types::{Address, ConfigSchema, Field, FieldType, Schema, WalletEvent};
use tokio::sync::broadcast;

/// Capacity of the notification channel. Events are rare (account/chain
/// switches), so a small buffer suffices.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Local wallet backed by an in-memory private key.
pub struct LocalWallet {
	/// The underlying signer that handles cryptographic operations.
	signer: PrivateKeySigner,
	/// Chain the wallet is bound to.
	chain_id: u64,
	/// Notification channel for account/chain-change events.
	events: broadcast::Sender<WalletEvent>,
}

impl LocalWallet {
	/// Creates a new LocalWallet from a hex-encoded private key.
	pub fn new(private_key_hex: &str, chain_id: u64) -> Result<Self, WalletError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| WalletError::InvalidKey(format!("Invalid private key: {}", e)))?;

		let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

		Ok(Self {
			signer,
			chain_id,
			events,
		})
	}

	/// The wallet's account address.
	pub fn address(&self) -> Address {
		Signer::address(&self.signer).into()
	}
}

/// Configuration schema for LocalWallet.
pub struct LocalWalletSchema;

impl LocalWalletSchema {
	/// Static validation method for use before instance creation.
	pub fn validate_config(config: &toml::Value) -> Result<(), market_types::ValidationError> {
		let instance = Self;
		instance.validate(config)
	}
}

impl ConfigSchema for LocalWalletSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), market_types::ValidationError> {
		let schema = Schema::new(
			vec![
				Field::new("private_key", FieldType::String).with_validator(|value| {
					match value.as_str() {
						Some(key) => {
							let key_without_prefix = key.strip_prefix("0x").unwrap_or(key);

							if key_without_prefix.len() != 64 {
								return Err(
									"Private key must be 64 hex characters (32 bytes)".to_string()
								);
							}

							if hex::decode(key_without_prefix).is_err() {
								return Err("Private key must be valid hexadecimal".to_string());
							}

							Ok(())
						},
						None => Err("Expected string value for private_key".to_string()),
					}
				}),
			],
			vec![],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl WalletInterface for LocalWallet {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(LocalWalletSchema)
	}

	async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
		// A local key grants automatically; there is no user to prompt.
		Ok(vec![self.address()])
	}

	fn chain_id(&self) -> u64 {
		self.chain_id
	}

	fn signer(&self) -> WalletSigner {
		WalletSigner::Local(self.signer.clone())
	}

	fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
		self.events.subscribe()
	}
}

/// Factory function to create a local wallet from configuration.
///
/// # Errors
///
/// Returns an error if `private_key` is missing or malformed.
pub fn create_wallet(
	config: &toml::Value,
	chain_id: u64,
) -> Result<Box<dyn WalletInterface>, WalletError> {
	// Validate configuration first
	LocalWalletSchema::validate_config(config)
		.map_err(|e| WalletError::InvalidKey(format!("Invalid configuration: {}", e)))?;

	let private_key = config
		.get("private_key")
		.and_then(|v| v.as_str())
		.ok_or_else(|| WalletError::InvalidKey("private_key missing".to_string()))?;

	Ok(Box::new(LocalWallet::new(private_key, chain_id)?))
}

/// Registry for the local wallet implementation.
pub struct Registry;

impl market_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = crate::WalletFactory;

	fn factory() -> Self::Factory {
		create_wallet
	}
}

impl crate::WalletRegistry for Registry {}
