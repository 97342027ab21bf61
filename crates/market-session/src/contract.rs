//! Marketplace contract call encoding and response decoding.
//!
//! The contract is externally deployed at a fixed address; this module is
//! the only place its ABI appears. Every [`market_types::ListingView`] in
//! the system is produced by [`MarketplaceContract::decode_token_record`],
//! which keeps client state a pure projection of contract state.

use alloy_primitives::U256;
use alloy_sol_types::{sol, SolCall, SolEvent};
use market_types::{Address, ListingView, Transaction, TransactionReceipt};

sol! {
	/// Mints a new token to the caller.
	function createNFT() external;

	/// Marks a token listed for sale at the given price (in wei).
	function listNFT(uint256 tokenId, string name, string description, uint256 price) external;

	/// Purchases a listed token; payment is the attached value.
	function buyNFT(uint256 tokenId) external payable;

	/// Returns the identifiers of all currently listed tokens.
	function fetchListedNFTs() external view returns (uint256[] ids);

	/// Per-token listing record.
	function listedTokens(uint256 tokenId) external view returns (
		string name,
		string description,
		uint256 price,
		address currOwner,
		address prevOwner,
		bool isListed
	);

	/// Running mint counter; the next token id to be assigned.
	function tokenCounter() external view returns (uint256 counter);

	/// ERC-721 transfer event; a mint carries the zero address as `from`.
	event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
}

/// Signer-bound handle to the marketplace contract.
///
/// Holds the fixed deployment address and chain id; produces ready-to-send
/// [`Transaction`]s for each entry point and decodes their responses.
#[derive(Debug, Clone)]
pub struct MarketplaceContract {
	/// Deployment address of the contract.
	address: Address,
	/// Chain the contract is deployed on.
	chain_id: u64,
}

impl MarketplaceContract {
	/// Creates a handle for the contract at the given address and chain.
	pub fn new(address: Address, chain_id: u64) -> Self {
		Self { address, chain_id }
	}

	/// The contract's deployment address.
	pub fn address(&self) -> &Address {
		&self.address
	}

	fn tx(&self, data: Vec<u8>, value: U256) -> Transaction {
		Transaction::contract_call(self.address.clone(), data, value, self.chain_id)
	}

	/// Transaction invoking the creation entry point.
	pub fn create_call(&self) -> Transaction {
		self.tx(createNFTCall {}.abi_encode(), U256::ZERO)
	}

	/// Transaction invoking the listing entry point.
	pub fn list_call(
		&self,
		token_id: U256,
		name: String,
		description: String,
		price_wei: U256,
	) -> Transaction {
		let call = listNFTCall {
			tokenId: token_id,
			name,
			description,
			price: price_wei,
		};
		self.tx(call.abi_encode(), U256::ZERO)
	}

	/// Transaction invoking the purchase entry point, with the price
	/// attached as payment.
	pub fn buy_call(&self, token_id: U256, price_wei: U256) -> Transaction {
		let call = buyNFTCall { tokenId: token_id };
		self.tx(call.abi_encode(), price_wei)
	}

	/// Read-only call querying the active listing identifiers.
	pub fn fetch_listed_call(&self) -> Transaction {
		self.tx(fetchListedNFTsCall {}.abi_encode(), U256::ZERO)
	}

	/// Read-only call querying a token's listing record.
	pub fn token_record_call(&self, token_id: U256) -> Transaction {
		let call = listedTokensCall { tokenId: token_id };
		self.tx(call.abi_encode(), U256::ZERO)
	}

	/// Read-only call querying the mint counter.
	pub fn token_counter_call(&self) -> Transaction {
		self.tx(tokenCounterCall {}.abi_encode(), U256::ZERO)
	}

	/// Decodes the return data of the active-listings query.
	pub fn decode_listed_ids(data: &[u8]) -> Result<Vec<U256>, String> {
		fetchListedNFTsCall::abi_decode_returns_validate(data)
			.map_err(|e| format!("Failed to decode listed token ids: {}", e))
	}

	/// Decodes the return data of a token-record query into a
	/// [`ListingView`].
	pub fn decode_token_record(token_id: U256, data: &[u8]) -> Result<ListingView, String> {
		let record = listedTokensCall::abi_decode_returns_validate(data)
			.map_err(|e| format!("Failed to decode record for token {}: {}", token_id, e))?;

		Ok(ListingView {
			token_id: token_id.to_string(),
			name: record.name,
			description: record.description,
			price_wei: record.price.to_string(),
			owner: format!("0x{:x}", record.currOwner),
			prev_owner: format!("0x{:x}", record.prevOwner),
			is_listed: record.isListed,
		})
	}

	/// Decodes the return data of the mint-counter query.
	pub fn decode_token_counter(data: &[u8]) -> Result<U256, String> {
		tokenCounterCall::abi_decode_returns_validate(data)
			.map_err(|e| format!("Failed to decode token counter: {}", e))
	}

	/// Extracts the minted token id from a mint receipt.
	///
	/// Looks for a `Transfer` event emitted by this contract with the zero
	/// address as `from`; the third topic carries the token id. Returns
	/// None when the receipt has no such log, in which case the caller
	/// falls back to the mint counter.
	pub fn token_id_from_receipt(&self, receipt: &TransactionReceipt) -> Option<U256> {
		receipt.logs.iter().find_map(|log| {
			if log.address != self.address || log.topics.len() != 4 {
				return None;
			}
			if log.topics[0].0 != Transfer::SIGNATURE_HASH.0 {
				return None;
			}
			// Mint: from == zero address
			if log.topics[1].0 != [0u8; 32] {
				return None;
			}
			Some(U256::from_be_bytes(log.topics[3].0))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, Address as AlloyAddress};
	use alloy_sol_types::SolValue;
	use market_types::{Log, TransactionHash, H256};

	fn contract() -> MarketplaceContract {
		MarketplaceContract::new(Address(vec![0x11; 20]), 1337)
	}

	#[test]
	fn test_create_call_encodes_selector() {
		let tx = contract().create_call();
		assert_eq!(tx.to, Some(Address(vec![0x11; 20])));
		assert_eq!(tx.chain_id, 1337);
		assert_eq!(tx.value, U256::ZERO);
		// 4-byte selector, no arguments
		assert_eq!(tx.data.len(), 4);
	}

	#[test]
	fn test_list_call_round_trips_arguments() {
		let tx = contract().list_call(
			U256::from(7),
			"Pixel Cat".to_string(),
			"a cat".to_string(),
			U256::from(50_000_000_000_000_000u64),
		);

		let decoded = listNFTCall::abi_decode_validate(&tx.data).unwrap();
		assert_eq!(decoded.tokenId, U256::from(7));
		assert_eq!(decoded.name, "Pixel Cat");
		assert_eq!(decoded.description, "a cat");
		assert_eq!(decoded.price, U256::from(50_000_000_000_000_000u64));
		assert_eq!(tx.value, U256::ZERO);
	}

	#[test]
	fn test_buy_call_attaches_payment() {
		let price = U256::from(1_000_000_000_000_000_000u64);
		let tx = contract().buy_call(U256::from(3), price);

		let decoded = buyNFTCall::abi_decode_validate(&tx.data).unwrap();
		assert_eq!(decoded.tokenId, U256::from(3));
		assert_eq!(tx.value, price);
	}

	#[test]
	fn test_decode_listed_ids() {
		let ids = vec![U256::from(1), U256::from(7), U256::from(42)];
		let data = (ids.clone(),).abi_encode_params();
		assert_eq!(MarketplaceContract::decode_listed_ids(&data).unwrap(), ids);

		// Zero listings decode to an empty sequence, not an error
		let empty: Vec<U256> = vec![];
		let data = (empty,).abi_encode_params();
		assert!(MarketplaceContract::decode_listed_ids(&data)
			.unwrap()
			.is_empty());
	}

	#[test]
	fn test_decode_listed_ids_rejects_garbage() {
		assert!(MarketplaceContract::decode_listed_ids(&[0x00, 0x01]).is_err());
	}

	#[test]
	fn test_decode_token_record() {
		let owner = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
		let prev = AlloyAddress::ZERO;
		let data = (
			"Pixel Cat".to_string(),
			"a cat".to_string(),
			U256::from(50_000_000_000_000_000u64),
			owner,
			prev,
			true,
		)
			.abi_encode_params();

		let view = MarketplaceContract::decode_token_record(U256::from(7), &data).unwrap();
		assert_eq!(view.token_id, "7");
		assert_eq!(view.name, "Pixel Cat");
		assert_eq!(view.description, "a cat");
		assert_eq!(view.price_wei, "50000000000000000");
		assert_eq!(view.owner, "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
		assert_eq!(
			view.prev_owner,
			"0x0000000000000000000000000000000000000000"
		);
		assert!(view.is_listed);
	}

	#[test]
	fn test_decode_token_counter() {
		let data = (U256::from(8),).abi_encode_params();
		assert_eq!(
			MarketplaceContract::decode_token_counter(&data).unwrap(),
			U256::from(8)
		);
	}

	fn mint_receipt(contract_addr: Address, token_id: u64) -> TransactionReceipt {
		let mut id_topic = [0u8; 32];
		id_topic[24..].copy_from_slice(&token_id.to_be_bytes());

		TransactionReceipt {
			hash: TransactionHash(vec![0xab; 32]),
			block_number: 10,
			success: true,
			logs: vec![Log {
				address: contract_addr,
				topics: vec![
					H256(Transfer::SIGNATURE_HASH.0),
					H256([0u8; 32]), // from: zero address (mint)
					H256([0x22; 32]),
					H256(id_topic),
				],
				data: vec![],
			}],
		}
	}

	#[test]
	fn test_token_id_from_receipt() {
		let contract = contract();
		let receipt = mint_receipt(Address(vec![0x11; 20]), 7);
		assert_eq!(contract.token_id_from_receipt(&receipt), Some(U256::from(7)));
	}

	#[test]
	fn test_token_id_from_receipt_ignores_foreign_logs() {
		let contract = contract();

		// Log from a different contract
		let receipt = mint_receipt(Address(vec![0x99; 20]), 7);
		assert_eq!(contract.token_id_from_receipt(&receipt), None);

		// Transfer that is not a mint (from != zero)
		let mut receipt = mint_receipt(Address(vec![0x11; 20]), 7);
		receipt.logs[0].topics[1] = H256([0x33; 32]);
		assert_eq!(contract.token_id_from_receipt(&receipt), None);

		// No logs at all
		receipt.logs.clear();
		assert_eq!(contract.token_id_from_receipt(&receipt), None);
	}
}
