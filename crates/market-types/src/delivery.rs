//! Transaction delivery types for the marketplace client.
//!
//! This module defines types related to blockchain transaction submission
//! and confirmation, including transaction hashes, logs, and receipts.

use crate::Address;
use crate::with_0x_prefix;
use std::fmt;

/// Blockchain transaction hash representation.
///
/// Stored as raw bytes; rendered as 0x-prefixed hex for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionHash(pub Vec<u8>);

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", with_0x_prefix(&hex::encode(&self.0)))
	}
}

/// Fixed-size hash type for log topics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct H256(pub [u8; 32]);

/// Event log emitted by the marketplace contract.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Log {
	/// Contract address that emitted the log.
	pub address: Address,
	/// Indexed event parameters. Topic[0] is the event signature hash.
	pub topics: Vec<H256>,
	/// Non-indexed event data.
	pub data: Vec<u8>,
}

/// Transaction receipt containing execution details.
///
/// Produced once a submitted transaction has been included in a block.
/// The session adapter inspects `logs` to recover minted token identifiers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
	/// Event logs emitted during transaction execution.
	pub logs: Vec<Log>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_transaction_hash_display() {
		let hash = TransactionHash(vec![0xde, 0xad, 0xbe, 0xef]);
		assert_eq!(format!("{}", hash), "0xdeadbeef");
	}

	#[test]
	fn test_receipt_serialization_round_trip() {
		let receipt = TransactionReceipt {
			hash: TransactionHash(vec![0xab; 32]),
			block_number: 42,
			success: true,
			logs: vec![Log {
				address: Address(vec![0x11; 20]),
				topics: vec![H256([0x22; 32])],
				data: vec![1, 2, 3],
			}],
		};

		let json = serde_json::to_string(&receipt).unwrap();
		let parsed: TransactionReceipt = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, receipt);
	}
}
