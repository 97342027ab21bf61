//! Transaction delivery module for the marketplace client.
//!
//! This module handles the submission and confirmation of contract
//! transactions and read-only calls. Every request operation of the session
//! adapter is fire-and-wait: submit, then block the logical caller until the
//! transaction is mined, reverted, or the configured timeout elapses. No
//! retry of the transaction itself is attempted; failures surface verbatim.

use alloy_primitives::Bytes;
use async_trait::async_trait;
use market_types::{Transaction, TransactionHash, TransactionReceipt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The transaction executed but reverted, or could not be mined.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
	/// The confirmation wait exceeded the configured timeout.
	#[error("Timed out after {0}s waiting for confirmation")]
	Timeout(u64),
}

/// Trait defining the interface for transaction delivery implementations.
#[async_trait]
pub trait DeliveryInterface: Send + Sync {
	/// Signs and submits a transaction, returning its hash.
	///
	/// The provider's wallet handles signing; gas and nonce are filled
	/// automatically when the transaction leaves them unset.
	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, DeliveryError>;

	/// Waits until the transaction has the requested number of
	/// confirmations, then returns its receipt.
	///
	/// This wait is unbounded; [`DeliveryService`] imposes the timeout.
	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		confirmations: u64,
	) -> Result<TransactionReceipt, DeliveryError>;

	/// Retrieves the receipt for a transaction if already mined.
	async fn get_receipt(&self, hash: &TransactionHash)
		-> Result<TransactionReceipt, DeliveryError>;

	/// Executes a read-only contract call (eth_call) and returns the raw
	/// return data.
	async fn call(&self, tx: Transaction) -> Result<Bytes, DeliveryError>;
}

/// Factory function type for delivery implementations.
pub type DeliveryFactory = fn(
	&market_types::NetworkConfig,
	&market_wallet::WalletSigner,
) -> Result<Box<dyn DeliveryInterface>, DeliveryError>;

/// Service that manages transaction delivery for the bound network.
///
/// Wraps the delivery implementation with the session's confirmation policy:
/// how many confirmations to require and how long to wait before surfacing
/// a timeout instead of hanging.
pub struct DeliveryService {
	/// The underlying delivery implementation.
	implementation: Arc<dyn DeliveryInterface>,
	/// Confirmations required before a transaction counts as final.
	min_confirmations: u64,
	/// Upper bound on any single confirmation wait.
	confirm_timeout: Duration,
}

impl DeliveryService {
	/// Creates a new DeliveryService with the given confirmation policy.
	pub fn new(
		implementation: Arc<dyn DeliveryInterface>,
		min_confirmations: u64,
		confirm_timeout: Duration,
	) -> Self {
		Self {
			implementation,
			min_confirmations,
			confirm_timeout,
		}
	}

	/// Submits a transaction and waits for it to confirm.
	///
	/// Returns the receipt once `min_confirmations` is reached, or
	/// [`DeliveryError::Timeout`] if the wait exceeds the configured bound.
	pub async fn submit_and_confirm(
		&self,
		tx: Transaction,
	) -> Result<TransactionReceipt, DeliveryError> {
		let hash = self.implementation.submit(tx).await?;

		tracing::debug!(tx_hash = %hash, "Transaction submitted, awaiting confirmation");

		match tokio::time::timeout(
			self.confirm_timeout,
			self.implementation
				.wait_for_confirmation(&hash, self.min_confirmations),
		)
		.await
		{
			Ok(result) => result,
			Err(_) => {
				tracing::warn!(tx_hash = %hash, "Confirmation wait timed out");
				Err(DeliveryError::Timeout(self.confirm_timeout.as_secs()))
			},
		}
	}

	/// Retrieves the receipt for an already-submitted transaction.
	pub async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError> {
		self.implementation.get_receipt(hash).await
	}

	/// Executes a read-only contract call.
	pub async fn call(&self, tx: Transaction) -> Result<Bytes, DeliveryError> {
		self.implementation.call(tx).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::U256;
	use market_types::Address;

	/// Test double that records submissions and hangs on confirmation.
	struct HangingDelivery;

	#[async_trait]
	impl DeliveryInterface for HangingDelivery {
		async fn submit(&self, _tx: Transaction) -> Result<TransactionHash, DeliveryError> {
			Ok(TransactionHash(vec![0xab; 32]))
		}

		async fn wait_for_confirmation(
			&self,
			_hash: &TransactionHash,
			_confirmations: u64,
		) -> Result<TransactionReceipt, DeliveryError> {
			// Never resolves; the service must cut this off.
			std::future::pending().await
		}

		async fn get_receipt(
			&self,
			_hash: &TransactionHash,
		) -> Result<TransactionReceipt, DeliveryError> {
			Err(DeliveryError::Network("not mined".to_string()))
		}

		async fn call(&self, _tx: Transaction) -> Result<Bytes, DeliveryError> {
			Ok(Bytes::new())
		}
	}

	fn test_tx() -> Transaction {
		Transaction::contract_call(Address(vec![0x11; 20]), vec![], U256::ZERO, 1337)
	}

	#[tokio::test]
	async fn test_submit_and_confirm_times_out() {
		let service = DeliveryService::new(
			Arc::new(HangingDelivery),
			1,
			Duration::from_millis(20),
		);

		let result = service.submit_and_confirm(test_tx()).await;
		assert!(matches!(result, Err(DeliveryError::Timeout(_))));
	}

	#[tokio::test]
	async fn test_delivery_error_display() {
		let err = DeliveryError::Timeout(300);
		assert_eq!(
			format!("{}", err),
			"Timed out after 300s waiting for confirmation"
		);

		let err = DeliveryError::TransactionFailed("reverted".to_string());
		assert_eq!(format!("{}", err), "Transaction failed: reverted");
	}
}
