//! Unified signer abstraction for wallet backends.
//!
//! The `WalletSigner` enum lets the delivery layer work with any wallet's
//! signing backend without knowing the underlying implementation.

use alloy_consensus::SignableTransaction;
use alloy_network::TxSigner;
use alloy_primitives::{Address, PrimitiveSignature, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

/// Unified signer that wraps the wallet's signing backend.
#[derive(Clone)]
pub enum WalletSigner {
	/// Local signer using a private key held in memory.
	Local(PrivateKeySigner),
}

impl WalletSigner {
	/// Returns the signer's Ethereum address.
	pub fn address(&self) -> Address {
		match self {
			Self::Local(s) => Signer::address(s),
		}
	}

	/// Returns the signer's chain ID.
	pub fn chain_id(&self) -> Option<u64> {
		match self {
			Self::Local(s) => Signer::chain_id(s),
		}
	}

	/// Returns a new signer bound to the specified chain ID.
	pub fn with_chain_id(self, chain_id: Option<u64>) -> Self {
		match self {
			Self::Local(s) => Self::Local(Signer::with_chain_id(s, chain_id)),
		}
	}

	/// Signs the given hash.
	pub async fn sign_hash(&self, hash: &B256) -> alloy_signer::Result<PrimitiveSignature> {
		match self {
			Self::Local(s) => s.sign_hash(hash).await,
		}
	}
}

// TxSigner so WalletSigner can back an EthereumWallet in the delivery layer
#[async_trait]
impl TxSigner<PrimitiveSignature> for WalletSigner {
	fn address(&self) -> Address {
		WalletSigner::address(self)
	}

	async fn sign_transaction(
		&self,
		tx: &mut dyn SignableTransaction<PrimitiveSignature>,
	) -> alloy_signer::Result<PrimitiveSignature> {
		match self {
			Self::Local(s) => TxSigner::sign_transaction(s, tx).await,
		}
	}
}

impl std::fmt::Debug for WalletSigner {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Local(_) => f
				.debug_struct("WalletSigner::Local")
				.finish_non_exhaustive(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_PRIVATE_KEY: &str =
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn create_test_signer() -> WalletSigner {
		let signer: PrivateKeySigner = TEST_PRIVATE_KEY.parse().unwrap();
		WalletSigner::Local(signer)
	}

	#[test]
	fn test_wallet_signer_address() {
		let signer = create_test_signer();
		assert_eq!(
			format!("{:?}", signer.address()).to_lowercase(),
			"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
	}

	#[test]
	fn test_wallet_signer_with_chain_id() {
		let signer = create_test_signer();
		assert_eq!(signer.chain_id(), None);

		let bound = signer.with_chain_id(Some(1337));
		assert_eq!(bound.chain_id(), Some(1337));
	}

	#[tokio::test]
	async fn test_wallet_signer_sign_hash() {
		let signer = create_test_signer();
		let signature = signer.sign_hash(&B256::ZERO).await;
		assert!(signature.is_ok());
	}

	#[test]
	fn test_wallet_signer_debug_hides_key() {
		let debug_str = format!("{:?}", create_test_signer());
		assert!(debug_str.contains("WalletSigner::Local"));
		assert!(!debug_str.contains(&TEST_PRIVATE_KEY[2..10]));
	}
}
