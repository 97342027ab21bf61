//! Account-related types for the marketplace client.
//!
//! This module defines the address and transaction types used throughout
//! the client for wallet management and contract calls.

use crate::with_0x_prefix;
use alloy_primitives::{Address as AlloyAddress, Bytes, U256};
use alloy_rpc_types::TransactionRequest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Blockchain address representation.
///
/// Stores addresses as raw bytes; rendered as 0x-prefixed hex for display
/// and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(pub Vec<u8>);

impl Serialize for Address {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&with_0x_prefix(&hex::encode(&self.0)))
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		let hex_str = s.trim_start_matches("0x");
		let bytes = hex::decode(hex_str)
			.map_err(|e| serde::de::Error::custom(format!("Invalid hex address: {}", e)))?;

		if bytes.len() != 20 {
			return Err(serde::de::Error::custom(format!(
				"Invalid address length: expected 20 bytes, got {}",
				bytes.len()
			)));
		}

		Ok(Address(bytes))
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

impl From<AlloyAddress> for Address {
	fn from(addr: AlloyAddress) -> Self {
		Address(addr.as_slice().to_vec())
	}
}

/// Blockchain transaction representation.
///
/// Contains the fields needed to construct marketplace contract calls.
/// Gas and nonce fields are optional; the provider fills them on submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
	/// Recipient address (the marketplace contract for all calls here).
	pub to: Option<Address>,
	/// Call data.
	pub data: Vec<u8>,
	/// Value to transfer in wei.
	pub value: U256,
	/// Chain ID for replay protection.
	pub chain_id: u64,
	/// Transaction nonce (filled by the provider when None).
	pub nonce: Option<u64>,
	/// Gas limit for transaction execution.
	pub gas_limit: Option<u64>,
	/// Legacy gas price.
	pub gas_price: Option<u128>,
	/// Maximum fee per gas (EIP-1559).
	pub max_fee_per_gas: Option<u128>,
	/// Maximum priority fee per gas (EIP-1559).
	pub max_priority_fee_per_gas: Option<u128>,
}

impl Transaction {
	/// Creates a contract-call transaction with the given calldata and value.
	pub fn contract_call(to: Address, data: Vec<u8>, value: U256, chain_id: u64) -> Self {
		Self {
			to: Some(to),
			data,
			value,
			chain_id,
			nonce: None,
			gas_limit: None,
			gas_price: None,
			max_fee_per_gas: None,
			max_priority_fee_per_gas: None,
		}
	}
}

/// Conversion to Alloy's TransactionRequest for provider submission.
///
/// Fails when the recipient address does not hold exactly 20 bytes;
/// `Address` is a raw byte container, so the length is checked here
/// rather than assumed.
impl TryFrom<Transaction> for TransactionRequest {
	type Error = String;

	fn try_from(tx: Transaction) -> Result<Self, Self::Error> {
		let to = match tx.to {
			Some(to) => {
				let addr_bytes: [u8; 20] = to.0.as_slice().try_into().map_err(|_| {
					format!(
						"Invalid recipient address length: expected 20 bytes, got {}",
						to.0.len()
					)
				})?;
				Some(alloy_primitives::TxKind::Call(AlloyAddress::from(
					addr_bytes,
				)))
			},
			None => None,
		};

		Ok(TransactionRequest {
			chain_id: Some(tx.chain_id),
			value: Some(tx.value),
			to,
			nonce: tx.nonce,
			gas: tx.gas_limit,
			gas_price: tx.gas_price,
			max_fee_per_gas: tx.max_fee_per_gas,
			max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
			input: alloy_rpc_types::TransactionInput {
				input: Some(Bytes::from(tx.data)),
				data: None,
			},
			..Default::default()
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::utils::parse_address;

	fn test_address(hex: &str) -> Address {
		parse_address(hex).expect("Invalid test address")
	}

	#[test]
	fn test_address_display() {
		let address = test_address("0xa0b86a33e6776fb78b3e1e6b2d0d2e8f0c1d2a3b");
		assert_eq!(
			format!("{}", address),
			"0xa0b86a33e6776fb78b3e1e6b2d0d2e8f0c1d2a3b"
		);
	}

	#[test]
	fn test_address_serialization_round_trip() {
		let original = test_address("0x123456789abcdef0112233445566778899aabbcc");

		let json = serde_json::to_string(&original).unwrap();
		assert_eq!(json, "\"0x123456789abcdef0112233445566778899aabbcc\"");

		let deserialized: Address = serde_json::from_str(&json).unwrap();
		assert_eq!(original, deserialized);
	}

	#[test]
	fn test_address_deserialization_rejects_bad_input() {
		let invalid_hex = "\"0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz\"";
		let result: Result<Address, _> = serde_json::from_str(invalid_hex);
		assert!(result.is_err());

		// 19 bytes
		let too_short = "\"0xa0b86a33e6776fb78b3e1e6b2d0d2e8f0c1d2a\"";
		let result: Result<Address, _> = serde_json::from_str(too_short);
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("Invalid address length"));
	}

	#[test]
	fn test_contract_call_constructor() {
		let to = test_address("0x1111111111111111111111111111111111111111");
		let tx = Transaction::contract_call(to.clone(), vec![0x12, 0x34], U256::from(7), 1337);

		assert_eq!(tx.to, Some(to));
		assert_eq!(tx.data, vec![0x12, 0x34]);
		assert_eq!(tx.value, U256::from(7));
		assert_eq!(tx.chain_id, 1337);
		assert!(tx.nonce.is_none());
		assert!(tx.gas_limit.is_none());
	}

	#[test]
	fn test_transaction_to_alloy_request() {
		let tx = Transaction::contract_call(
			test_address("0xa0b86a33e6776fb78b3e1e6b2d0d2e8f0c1d2a3b"),
			vec![0xff, 0xee],
			U256::from(750),
			42,
		);

		let req: TransactionRequest = tx.try_into().unwrap();

		assert!(req.to.is_some());
		assert_eq!(req.value, Some(U256::from(750)));
		assert_eq!(req.chain_id, Some(42));
		assert_eq!(req.input.input.unwrap().to_vec(), vec![0xff, 0xee]);
		assert!(req.nonce.is_none());
		assert!(req.gas.is_none());
	}

	#[test]
	fn test_transaction_rejects_malformed_recipient() {
		// Address is a raw byte container; a short one must error, not panic
		let tx = Transaction::contract_call(Address(vec![0x11; 19]), vec![], U256::ZERO, 1);

		let result: Result<TransactionRequest, _> = tx.try_into();
		assert!(result
			.unwrap_err()
			.contains("Invalid recipient address length"));
	}
}
