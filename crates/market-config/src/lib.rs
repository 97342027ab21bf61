//! Configuration for the marketplace client.
//!
//! Loads TOML configuration files and validates the few values whose
//! shape serde alone cannot enforce. The marketplace contract address is
//! fixed here; the client never derives or discovers it at runtime.

use market_types::{Address, NetworkConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the marketplace client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Wallet provider selection and provider-specific settings.
	pub wallet: WalletConfig,
	/// The network the marketplace contract is deployed on.
	pub network: NetworkConfig,
	/// Contract address and confirmation policy.
	pub marketplace: MarketplaceConfig,
}

/// Wallet provider configuration.
///
/// `implementation` selects the provider by registry name; the remaining
/// keys of the section are passed through to that provider's factory and
/// validated against its own schema.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletConfig {
	/// Registry name of the wallet implementation to use.
	pub implementation: String,
	/// Implementation-specific settings, validated by the implementation.
	#[serde(flatten)]
	pub settings: toml::Value,
}

/// Marketplace contract binding and confirmation policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketplaceConfig {
	/// Address of the deployed marketplace contract.
	pub address: Address,
	/// Confirmations required before a transaction counts as final.
	#[serde(default = "default_min_confirmations")]
	pub min_confirmations: u64,
	/// Upper bound in seconds on any single confirmation wait.
	#[serde(default = "default_confirm_timeout_seconds")]
	pub confirm_timeout_seconds: u64,
}

fn default_min_confirmations() -> u64 {
	1
}

fn default_confirm_timeout_seconds() -> u64 {
	300
}

impl Config {
	/// Loads configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		Self::from_str_content(&content)
	}

	/// Parses configuration from TOML content.
	pub fn from_str_content(content: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(content)?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.wallet.implementation.is_empty() {
			return Err(ConfigError::Validation(
				"wallet.implementation must not be empty".to_string(),
			));
		}
		if self.network.chain_id == 0 {
			return Err(ConfigError::Validation(
				"network.chain_id must be non-zero".to_string(),
			));
		}
		if self.network.http_url.is_empty() {
			return Err(ConfigError::Validation(
				"network.http_url must not be empty".to_string(),
			));
		}
		if self.marketplace.confirm_timeout_seconds == 0 {
			return Err(ConfigError::Validation(
				"marketplace.confirm_timeout_seconds must be non-zero".to_string(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const VALID: &str = r#"
		[wallet]
		implementation = "local"
		private_key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"

		[network]
		chain_id = 31337
		http_url = "http://localhost:8545"

		[marketplace]
		address = "0x5fbdb2315678afecb367f032d93f642f64180aa3"
	"#;

	#[test]
	fn test_parse_valid_config() {
		let config = Config::from_str_content(VALID).unwrap();
		assert_eq!(config.wallet.implementation, "local");
		assert_eq!(config.network.chain_id, 31337);
		assert_eq!(config.marketplace.min_confirmations, 1);
		assert_eq!(config.marketplace.confirm_timeout_seconds, 300);

		// Implementation-specific keys stay in the flattened section
		let settings = config.wallet.settings.as_table().unwrap();
		assert!(settings.contains_key("private_key"));
	}

	#[test]
	fn test_explicit_confirmation_policy() {
		let content = VALID.replace(
			"address = \"0x5fbdb2315678afecb367f032d93f642f64180aa3\"",
			"address = \"0x5fbdb2315678afecb367f032d93f642f64180aa3\"\n\t\tmin_confirmations = 3\n\t\tconfirm_timeout_seconds = 60",
		);
		let config = Config::from_str_content(&content).unwrap();
		assert_eq!(config.marketplace.min_confirmations, 3);
		assert_eq!(config.marketplace.confirm_timeout_seconds, 60);
	}

	#[test]
	fn test_rejects_malformed_address() {
		let content = VALID.replace(
			"0x5fbdb2315678afecb367f032d93f642f64180aa3",
			"0x5fbdb2",
		);
		assert!(matches!(
			Config::from_str_content(&content).unwrap_err(),
			ConfigError::Parse(_)
		));
	}

	#[test]
	fn test_rejects_zero_chain_id() {
		let content = VALID.replace("chain_id = 31337", "chain_id = 0");
		assert!(matches!(
			Config::from_str_content(&content).unwrap_err(),
			ConfigError::Validation(_)
		));
	}

	#[test]
	fn test_missing_section_is_parse_error() {
		let content = VALID.replace("[network]", "[not_network]");
		assert!(matches!(
			Config::from_str_content(content.as_str()).unwrap_err(),
			ConfigError::Parse(_)
		));
	}
}
