//! Session lifecycle types and wallet notifications.
//!
//! The session is a single owned value with an explicit lifecycle: created
//! on the first successful connect and reset to disconnected on account
//! switch, account revocation, chain change, or explicit disconnect. The
//! signing handle is bound at connect time, so any change of the signing
//! identity forces a reconnect rather than a silent rebind.

use crate::Address;
use serde::{Deserialize, Serialize};

/// Connection state of the session adapter.
///
/// `Connecting` is the only state in which a second concurrent connect
/// attempt must be coalesced into the in-flight one, so the wallet is
/// prompted exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
	/// No wallet bound; every request operation fails until connect.
	Disconnected,
	/// A connect attempt is in flight (wallet prompt pending).
	Connecting,
	/// Wallet bound; requests are forwarded to the contract.
	Connected {
		/// The signing account granted by the wallet.
		account: Address,
		/// Chain the session is bound to.
		chain_id: u64,
	},
}

/// Snapshot of the current session, as rendered to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Whether a wallet is currently bound.
	pub connected: bool,
	/// The bound account address, if connected.
	pub account: Option<Address>,
	/// The bound chain id, if connected.
	pub chain_id: Option<u64>,
}

impl From<&SessionState> for Session {
	fn from(state: &SessionState) -> Self {
		match state {
			SessionState::Connected { account, chain_id } => Session {
				connected: true,
				account: Some(account.clone()),
				chain_id: Some(*chain_id),
			},
			_ => Session {
				connected: false,
				account: None,
				chain_id: None,
			},
		}
	}
}

/// Notifications pushed by the wallet provider after connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
	/// The wallet switched signing accounts. An empty list means the user
	/// revoked access entirely.
	AccountsChanged(Vec<Address>),
	/// The wallet switched chains. The session must reset before any
	/// further operation is accepted.
	ChainChanged(u64),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_session_from_connected_state() {
		let state = SessionState::Connected {
			account: Address(vec![0x11; 20]),
			chain_id: 1337,
		};
		let session = Session::from(&state);
		assert!(session.connected);
		assert_eq!(session.account, Some(Address(vec![0x11; 20])));
		assert_eq!(session.chain_id, Some(1337));
	}

	#[test]
	fn test_session_from_disconnected_states() {
		for state in [SessionState::Disconnected, SessionState::Connecting] {
			let session = Session::from(&state);
			assert!(!session.connected);
			assert!(session.account.is_none());
			assert!(session.chain_id.is_none());
		}
	}
}
