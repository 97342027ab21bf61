//! Alloy-based EVM delivery implementation.
//!
//! Uses the Alloy provider stack to submit and confirm transactions on the
//! configured network. The provider carries the wallet's signer, so
//! submission handles signing, nonce, and gas filling in one place.

use crate::{DeliveryError, DeliveryInterface};
use alloy_network::EthereumWallet;
use alloy_primitives::{Bytes, FixedBytes};
use alloy_provider::{
	fillers::{ChainIdFiller, GasFiller, NonceFiller, SimpleNonceManager},
	DynProvider, PendingTransactionConfig, Provider, ProviderBuilder,
};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types::TransactionRequest;
use alloy_transport::layers::RetryBackoffLayer;
use async_trait::async_trait;
use market_types::{
	with_0x_prefix, Log, NetworkConfig, Transaction, TransactionHash, TransactionReceipt, H256,
};
use market_wallet::WalletSigner;

/// Polling interval for receipt watching, in seconds.
const POLL_INTERVAL_SECS: u64 = 3;

/// Alloy-based delivery for the single configured EVM network.
pub struct AlloyDelivery {
	/// Provider bound to the network's RPC endpoint and the wallet signer.
	provider: DynProvider,
	/// Chain the provider is connected to.
	chain_id: u64,
}

impl AlloyDelivery {
	/// Creates a new AlloyDelivery for the given network and signer.
	pub fn new(network: &NetworkConfig, signer: WalletSigner) -> Result<Self, DeliveryError> {
		let url = network.get_http_url().parse().map_err(|e| {
			DeliveryError::Network(format!(
				"Invalid RPC URL for chain {}: {}",
				network.chain_id, e
			))
		})?;

		let chain_signer = signer.with_chain_id(Some(network.chain_id));
		let wallet = EthereumWallet::from(chain_signer);

		// Retry layer for transient network errors and rate limits
		let retry_layer = RetryBackoffLayer::new(
			5,    // max_retry: retry up to 5 times
			1000, // backoff: initial backoff in milliseconds
			10,   // cups: compute units per second
		);

		let client = RpcClient::builder().layer(retry_layer).http(url);

		let provider = ProviderBuilder::new()
			.filler(NonceFiller::new(SimpleNonceManager::default()))
			.filler(GasFiller)
			.filler(ChainIdFiller::default())
			.wallet(wallet)
			.connect_client(client);

		provider
			.client()
			.set_poll_interval(std::time::Duration::from_secs(POLL_INTERVAL_SECS));

		Ok(Self {
			provider: provider.erased(),
			chain_id: network.chain_id,
		})
	}
}

#[async_trait]
impl DeliveryInterface for AlloyDelivery {
	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, DeliveryError> {
		let request: TransactionRequest =
			tx.try_into().map_err(DeliveryError::TransactionFailed)?;

		tracing::debug!(
			chain_id = self.chain_id,
			to = ?request.to,
			value = ?request.value,
			data_len = request.input.input().map(|d| d.len()).unwrap_or(0),
			"Sending transaction"
		);

		let pending_tx = self.provider.send_transaction(request).await.map_err(|e| {
			tracing::error!(chain_id = self.chain_id, "Transaction submission failed: {}", e);
			DeliveryError::Network(format!("Failed to send transaction: {}", e))
		})?;

		let tx_hash = *pending_tx.tx_hash();
		tracing::info!(
			tx_hash = %with_0x_prefix(&hex::encode(tx_hash.0)),
			"Transaction accepted by node"
		);

		Ok(TransactionHash(tx_hash.0.to_vec()))
	}

	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		confirmations: u64,
	) -> Result<TransactionReceipt, DeliveryError> {
		let tx_hash = FixedBytes::<32>::from_slice(&hash.0);

		let config =
			PendingTransactionConfig::new(tx_hash).with_required_confirmations(confirmations);

		let pending_tx = self
			.provider
			.watch_pending_transaction(config)
			.await
			.map_err(|e| DeliveryError::Network(format!("Transaction watch failed: {}", e)))?;

		let confirmed_hash = pending_tx
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to confirm transaction: {}", e)))?;

		self.get_receipt(&TransactionHash(confirmed_hash.0.to_vec()))
			.await
	}

	async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError> {
		let tx_hash = FixedBytes::<32>::from_slice(&hash.0);

		match self.provider.get_transaction_receipt(tx_hash).await {
			Ok(Some(receipt)) => {
				let logs = receipt
					.inner
					.logs()
					.iter()
					.map(|log| Log {
						address: market_types::Address(log.address().0.to_vec()),
						topics: log.topics().iter().map(|topic| H256(topic.0)).collect(),
						data: log.inner.data.data.to_vec(),
					})
					.collect();

				Ok(TransactionReceipt {
					hash: TransactionHash(receipt.transaction_hash.0.to_vec()),
					block_number: receipt.block_number.unwrap_or(0),
					success: receipt.status(),
					logs,
				})
			},
			Ok(None) => Err(DeliveryError::Network(format!(
				"Transaction {} not found",
				hash
			))),
			Err(e) => Err(DeliveryError::Network(format!(
				"Failed to get receipt: {}",
				e
			))),
		}
	}

	async fn call(&self, tx: Transaction) -> Result<Bytes, DeliveryError> {
		let request: TransactionRequest =
			tx.try_into().map_err(DeliveryError::TransactionFailed)?;

		self.provider
			.call(request)
			.await
			.map_err(|e| DeliveryError::Network(format!("Contract call failed: {}", e)))
	}
}

/// Factory function to create an Alloy delivery from the network
/// configuration and the wallet's signer.
pub fn create_delivery(
	network: &NetworkConfig,
	signer: &WalletSigner,
) -> Result<Box<dyn DeliveryInterface>, DeliveryError> {
	Ok(Box::new(AlloyDelivery::new(network, signer.clone())?))
}

/// Registry for the Alloy delivery implementation.
pub struct Registry;

impl market_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "evm_alloy";
	type Factory = crate::DeliveryFactory;

	fn factory() -> Self::Factory {
		create_delivery
	}
}
