//! Error taxonomy for the session adapter.
//!
//! The adapter performs no silent recovery: every failure is returned to
//! the caller with its kind and the underlying message, so the caller can
//! render a user-facing message and retry. No failure is fatal to the
//! process.

use market_delivery::DeliveryError;
use market_wallet::WalletError;
use thiserror::Error;

/// Errors surfaced by the session adapter's request operations.
#[derive(Debug, Error)]
pub enum SessionError {
	/// No wallet is present in the execution environment.
	#[error("Wallet unavailable: {0}")]
	WalletUnavailable(String),
	/// The wallet denied the permission request.
	#[error("Connection rejected by wallet: {0}")]
	UserRejected(String),
	/// An operation was called before a successful connect, or after the
	/// session was reset by a chain change or disconnect.
	#[error("Not connected")]
	NotConnected,
	/// Locally-rejected input (empty name, malformed token id).
	#[error("Invalid input: {0}")]
	InvalidInput(String),
	/// The price string could not be converted to base units.
	#[error("Invalid price: {0}")]
	InvalidPrice(String),
	/// The wallet's account cannot cover the attached value plus gas.
	#[error("Insufficient funds: {0}")]
	InsufficientFunds(String),
	/// The contract call reverted or the network request failed.
	#[error("Contract call failed: {0}")]
	ContractCallFailed(String),
	/// The confirmation wait exceeded the configured timeout.
	#[error("Timed out after {0}s waiting for confirmation")]
	Timeout(u64),
}

impl From<WalletError> for SessionError {
	fn from(err: WalletError) -> Self {
		match err {
			WalletError::Rejected(msg) => SessionError::UserRejected(msg),
			WalletError::Unavailable(msg)
			| WalletError::InvalidKey(msg)
			| WalletError::Implementation(msg) => SessionError::WalletUnavailable(msg),
		}
	}
}

impl From<DeliveryError> for SessionError {
	fn from(err: DeliveryError) -> Self {
		match err {
			DeliveryError::Timeout(secs) => SessionError::Timeout(secs),
			DeliveryError::Network(msg) if msg.contains("insufficient funds") => {
				SessionError::InsufficientFunds(msg)
			},
			DeliveryError::Network(msg) | DeliveryError::TransactionFailed(msg) => {
				SessionError::ContractCallFailed(msg)
			},
		}
	}
}
