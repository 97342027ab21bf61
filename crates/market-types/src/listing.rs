//! Listing projections and draft inputs for the marketplace contract.
//!
//! A [`ListingView`] is a read-only projection of contract state. It is only
//! ever produced by decoding a query result from the contract and is never
//! mutated locally; callers re-fetch after every state-changing call so the
//! client cannot drift from on-chain state.

use serde::{Deserialize, Serialize};

/// Read-only projection of a listed token as reported by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingView {
	/// Token identifier, decimal string.
	pub token_id: String,
	/// Display name recorded when the token was listed.
	pub name: String,
	/// Description recorded when the token was listed.
	pub description: String,
	/// Asking price in wei, decimal string (arbitrary precision).
	pub price_wei: String,
	/// Current owner address.
	pub owner: String,
	/// Previous owner address.
	pub prev_owner: String,
	/// Whether the token is currently listed for sale.
	pub is_listed: bool,
}

/// Ephemeral input for a single create/list submission.
///
/// Discarded after submission; validated locally before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftInput {
	/// Display name, must be non-empty.
	pub name: String,
	/// Free-form description.
	pub description: String,
	/// Asking price as a decimal ETH string (e.g. "0.05").
	pub price_eth: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_listing_view_serializes() {
		let listing = ListingView {
			token_id: "7".into(),
			name: "Pixel Cat".into(),
			description: "a cat".into(),
			price_wei: "50000000000000000".into(),
			owner: "0x1111111111111111111111111111111111111111".into(),
			prev_owner: "0x2222222222222222222222222222222222222222".into(),
			is_listed: true,
		};

		let json = serde_json::to_string(&listing).unwrap();
		assert!(json.contains("50000000000000000"));
		let parsed: ListingView = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, listing);
	}
}
