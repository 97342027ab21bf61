//! Wallet-backed session over the marketplace contract.
//!
//! The adapter owns the connection lifecycle and exposes the contract's
//! entry points as request operations. Every operation either completes
//! against the chain or returns a [`SessionError`]; nothing is retried or
//! swallowed here.

use std::sync::{Arc, Mutex};

use alloy_primitives::U256;
use market_delivery::DeliveryService;
use market_types::{
	utils::{eth_string_to_wei, truncate_id},
	DraftInput, ListingView, Session, SessionState, TransactionReceipt, WalletEvent,
};
use market_wallet::WalletService;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;

use crate::contract::MarketplaceContract;
use crate::error::SessionError;

/// Session adapter binding one wallet and one marketplace deployment.
///
/// Cheap to share: all state lives behind `Arc`s, so clones observe the
/// same session.
pub struct SessionAdapter {
	/// Wallet used for account access and signing.
	wallet: Arc<WalletService>,
	/// Delivery service bound to the marketplace's network.
	delivery: Arc<DeliveryService>,
	/// Handle to the marketplace contract.
	contract: MarketplaceContract,
	/// Current session state.
	state: Arc<RwLock<SessionState>>,
	/// Serializes concurrent connect attempts so the wallet is prompted
	/// at most once.
	connect_lock: tokio::sync::Mutex<()>,
	/// Background task following wallet events; spawned on first connect.
	events_task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionAdapter {
	/// Creates an adapter in the disconnected state.
	pub fn new(
		wallet: Arc<WalletService>,
		delivery: Arc<DeliveryService>,
		contract: MarketplaceContract,
	) -> Self {
		Self {
			wallet,
			delivery,
			contract,
			state: Arc::new(RwLock::new(SessionState::Disconnected)),
			connect_lock: tokio::sync::Mutex::new(()),
			events_task: Mutex::new(None),
		}
	}

	/// Requests account access from the wallet and binds the session to
	/// the first granted account.
	///
	/// Concurrent calls coalesce into a single wallet prompt: the lock is
	/// held across the request, and callers that arrive while a connect is
	/// in flight return the established session without a second prompt.
	/// Connecting while already connected is a no-op returning the current
	/// session.
	pub async fn connect(&self) -> Result<Session, SessionError> {
		let _guard = self.connect_lock.lock().await;

		{
			let state = self.state.read().await;
			if let SessionState::Connected { .. } = &*state {
				return Ok(Session::from(&*state));
			}
		}

		*self.state.write().await = SessionState::Connecting;

		let accounts = match self.wallet.request_accounts().await {
			Ok(accounts) => accounts,
			Err(e) => {
				*self.state.write().await = SessionState::Disconnected;
				return Err(e.into());
			},
		};

		let account = match accounts.into_iter().next() {
			Some(account) => account,
			None => {
				*self.state.write().await = SessionState::Disconnected;
				return Err(SessionError::WalletUnavailable(
					"Wallet granted no accounts".to_string(),
				));
			},
		};

		let chain_id = self.wallet.chain_id();
		let connected = SessionState::Connected {
			account: account.clone(),
			chain_id,
		};
		*self.state.write().await = connected.clone();

		tracing::info!(
			account = %account,
			chain_id = chain_id,
			"Wallet connected"
		);

		self.spawn_event_task();

		Ok(Session::from(&connected))
	}

	/// Clears the session. Subsequent request operations fail with
	/// [`SessionError::NotConnected`] until the next connect.
	pub async fn disconnect(&self) {
		*self.state.write().await = SessionState::Disconnected;
		tracing::info!("Session disconnected");
	}

	/// Snapshot of the current session.
	pub async fn session(&self) -> Session {
		Session::from(&*self.state.read().await)
	}

	/// Mints a new token owned by the connected account and returns its
	/// identifier.
	///
	/// The id is read from the mint's transfer log; if the receipt carries
	/// no such log, the contract's mint counter (post-mint, so counter
	/// minus one) is queried instead.
	pub async fn mint_draft(&self) -> Result<String, SessionError> {
		self.require_connected().await?;

		let receipt = self
			.delivery
			.submit_and_confirm(self.contract.create_call())
			.await?;
		self.check_receipt(&receipt)?;

		let token_id = match self.contract.token_id_from_receipt(&receipt) {
			Some(id) => id,
			None => {
				tracing::debug!(
					tx_hash = %receipt.hash,
					"Mint receipt carried no transfer log; querying counter"
				);
				let data = self
					.delivery
					.call(self.contract.token_counter_call())
					.await?;
				let counter = MarketplaceContract::decode_token_counter(&data)
					.map_err(SessionError::ContractCallFailed)?;
				if counter.is_zero() {
					return Err(SessionError::ContractCallFailed(
						"Mint confirmed but token counter is zero".to_string(),
					));
				}
				counter - U256::from(1)
			},
		};

		tracing::info!(
			token_id = %token_id,
			tx_hash = %truncate_id(&receipt.hash.to_string()),
			"Token minted"
		);

		Ok(token_id.to_string())
	}

	/// Lists a token for sale with the draft's name, description and
	/// price.
	///
	/// The price is converted from its decimal ETH string to base units
	/// before submission; conversion or input errors are returned before
	/// anything reaches the network.
	pub async fn publish_listing(
		&self,
		token_id: &str,
		draft: DraftInput,
	) -> Result<(), SessionError> {
		self.require_connected().await?;

		if draft.name.trim().is_empty() {
			return Err(SessionError::InvalidInput(
				"Listing name must not be empty".to_string(),
			));
		}
		let token_id = parse_token_id(token_id)?;
		let price_wei = eth_string_to_wei(&draft.price_eth).map_err(SessionError::InvalidPrice)?;

		let receipt = self
			.delivery
			.submit_and_confirm(self.contract.list_call(
				token_id,
				draft.name,
				draft.description,
				price_wei,
			))
			.await?;
		self.check_receipt(&receipt)?;

		tracing::info!(token_id = %token_id, price_wei = %price_wei, "Token listed");

		Ok(())
	}

	/// Purchases a listed token, attaching the asking price as payment.
	pub async fn purchase(
		&self,
		token_id: &str,
		price_eth: &str,
	) -> Result<TransactionReceipt, SessionError> {
		self.require_connected().await?;

		let token_id = parse_token_id(token_id)?;
		let price_wei = eth_string_to_wei(price_eth).map_err(SessionError::InvalidPrice)?;

		let receipt = self
			.delivery
			.submit_and_confirm(self.contract.buy_call(token_id, price_wei))
			.await?;
		self.check_receipt(&receipt)?;

		tracing::info!(
			token_id = %token_id,
			tx_hash = %truncate_id(&receipt.hash.to_string()),
			"Token purchased"
		);

		Ok(receipt)
	}

	/// Queries the contract for all currently listed tokens, in the order
	/// the contract reports them. An empty marketplace yields an empty
	/// vec.
	pub async fn list_active(&self) -> Result<Vec<ListingView>, SessionError> {
		self.require_connected().await?;

		let data = self.delivery.call(self.contract.fetch_listed_call()).await?;
		let ids = MarketplaceContract::decode_listed_ids(&data)
			.map_err(SessionError::ContractCallFailed)?;

		let mut listings = Vec::with_capacity(ids.len());
		for id in ids {
			let data = self
				.delivery
				.call(self.contract.token_record_call(id))
				.await?;
			let view = MarketplaceContract::decode_token_record(id, &data)
				.map_err(SessionError::ContractCallFailed)?;
			listings.push(view);
		}

		tracing::debug!(count = listings.len(), "Fetched active listings");

		Ok(listings)
	}

	async fn require_connected(&self) -> Result<(), SessionError> {
		match &*self.state.read().await {
			SessionState::Connected { .. } => Ok(()),
			_ => Err(SessionError::NotConnected),
		}
	}

	fn check_receipt(&self, receipt: &TransactionReceipt) -> Result<(), SessionError> {
		if receipt.success {
			Ok(())
		} else {
			Err(SessionError::ContractCallFailed(format!(
				"Transaction {} reverted",
				receipt.hash
			)))
		}
	}

	/// Spawns the wallet event follower once per adapter.
	fn spawn_event_task(&self) {
		let mut task = match self.events_task.lock() {
			Ok(task) => task,
			Err(poisoned) => poisoned.into_inner(),
		};
		if task.is_some() {
			return;
		}

		let events = self.wallet.subscribe();
		let state = self.state.clone();
		*task = Some(tokio::spawn(async move {
			follow_wallet_events(events, state).await;
		}));
	}
}

impl Drop for SessionAdapter {
	fn drop(&mut self) {
		if let Ok(mut task) = self.events_task.lock() {
			if let Some(handle) = task.take() {
				handle.abort();
			}
		}
	}
}

/// Applies wallet events to the session state until the wallet side of
/// the channel closes.
///
/// The delivery layer's signing handle is bound at connect time, so a
/// switch to a different account invalidates it: the session resets and
/// the caller must reconnect to bind the new account. A notification
/// carrying the already-bound account is the only no-op. An empty account
/// set or a chain change clears the session the same way, since the bound
/// contract address is only meaningful on its own chain.
async fn follow_wallet_events(
	mut events: broadcast::Receiver<WalletEvent>,
	state: Arc<RwLock<SessionState>>,
) {
	loop {
		match events.recv().await {
			Ok(WalletEvent::AccountsChanged(accounts)) => match accounts.into_iter().next() {
				Some(account) => {
					let mut state = state.write().await;
					if let SessionState::Connected {
						account: current, ..
					} = &*state
					{
						if *current == account {
							continue;
						}
						tracing::info!(
							account = %account,
							"Wallet switched accounts; session reset pending reconnect"
						);
						*state = SessionState::Disconnected;
					}
				},
				None => {
					tracing::info!("Wallet revoked all accounts");
					*state.write().await = SessionState::Disconnected;
				},
			},
			Ok(WalletEvent::ChainChanged(chain_id)) => {
				tracing::info!(chain_id = chain_id, "Wallet changed chains; session reset");
				*state.write().await = SessionState::Disconnected;
			},
			Err(broadcast::error::RecvError::Lagged(skipped)) => {
				tracing::warn!(skipped = skipped, "Dropped wallet events");
			},
			Err(broadcast::error::RecvError::Closed) => break,
		}
	}
}

fn parse_token_id(token_id: &str) -> Result<U256, SessionError> {
	token_id
		.trim()
		.parse::<U256>()
		.map_err(|e| SessionError::InvalidInput(format!("Invalid token id '{}': {}", token_id, e)))
}
