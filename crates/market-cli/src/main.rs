//! Command-line client for the NFT marketplace contract.
//!
//! Each invocation connects the configured wallet, performs one
//! marketplace operation, and prints the result as JSON. State-changing
//! commands refresh the listing view afterwards; a refresh failure is
//! reported separately because the confirmed transaction stands
//! regardless.

use clap::{Parser, Subcommand};
use market_config::Config;
use market_delivery::{implementations::evm::alloy, DeliveryService};
use market_session::{MarketplaceContract, SessionAdapter, SessionError};
use market_types::{utils::wei_string_to_eth_string, DraftInput, ListingView};
use market_wallet::{get_all_implementations, WalletService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Command-line arguments for the marketplace client.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long)]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

/// Marketplace operations.
#[derive(Subcommand, Debug)]
enum Command {
	/// Connect the wallet and print the session
	Status,
	/// Mint a new token and print its id
	Mint,
	/// List a token for sale
	List {
		/// Token id to list
		token_id: String,
		/// Display name for the listing
		#[arg(long)]
		name: String,
		/// Description for the listing
		#[arg(long, default_value = "")]
		description: String,
		/// Asking price in ETH (decimal string, e.g. "0.05")
		#[arg(long)]
		price: String,
	},
	/// Buy a listed token
	Buy {
		/// Token id to buy
		token_id: String,
		/// Asking price in ETH, attached as payment
		#[arg(long)]
		price: String,
	},
	/// Print all active listings
	Listings,
}

#[tokio::main]
async fn main() {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));

	fmt().with_env_filter(env_filter).with_target(true).init();

	if let Err(e) = run(args).await {
		eprintln!("Error: {}", e);
		std::process::exit(1);
	}
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
	let config = Config::from_file(&args.config)?;
	tracing::info!(chain_id = config.network.chain_id, "Loaded configuration");

	let adapter = build_adapter(&config)?;

	let session = adapter.connect().await?;
	tracing::info!(account = ?session.account, "Session established");

	match args.command {
		Command::Status => {
			println!("{}", serde_json::to_string_pretty(&session)?);
		},
		Command::Mint => {
			let token_id = adapter.mint_draft().await?;
			println!("{}", serde_json::json!({ "token_id": token_id }));
			refresh_listings(&adapter).await;
		},
		Command::List {
			token_id,
			name,
			description,
			price,
		} => {
			let draft = DraftInput {
				name,
				description,
				price_eth: price,
			};
			adapter.publish_listing(&token_id, draft).await?;
			println!("{}", serde_json::json!({ "listed": token_id }));
			refresh_listings(&adapter).await;
		},
		Command::Buy { token_id, price } => {
			let receipt = adapter.purchase(&token_id, &price).await?;
			println!(
				"{}",
				serde_json::json!({
					"purchased": token_id,
					"tx_hash": receipt.hash.to_string(),
					"block_number": receipt.block_number,
				})
			);
			refresh_listings(&adapter).await;
		},
		Command::Listings => {
			let listings = adapter.list_active().await?;
			println!("{}", render_listings(&listings)?);
		},
	}

	Ok(())
}

/// Assembles the session adapter from configuration.
fn build_adapter(config: &Config) -> Result<Arc<SessionAdapter>, Box<dyn std::error::Error>> {
	let factory = get_all_implementations()
		.into_iter()
		.find(|(name, _)| *name == config.wallet.implementation)
		.map(|(_, factory)| factory)
		.ok_or_else(|| {
			SessionError::WalletUnavailable(format!(
				"Unknown wallet implementation '{}'",
				config.wallet.implementation
			))
		})?;

	let wallet = WalletService::new(factory(
		&config.wallet.settings,
		config.network.chain_id,
	)?);

	let delivery = DeliveryService::new(
		Arc::from(alloy::create_delivery(&config.network, &wallet.signer())?),
		config.marketplace.min_confirmations,
		Duration::from_secs(config.marketplace.confirm_timeout_seconds),
	);

	let contract = MarketplaceContract::new(
		config.marketplace.address.clone(),
		config.network.chain_id,
	);

	Ok(Arc::new(SessionAdapter::new(
		Arc::new(wallet),
		Arc::new(delivery),
		contract,
	)))
}

/// Re-fetches listings after a state change and prints them.
///
/// A failure here does not undo the confirmed transaction, so it is
/// reported on its own rather than turning the command into an error.
async fn refresh_listings(adapter: &SessionAdapter) {
	match adapter.list_active().await {
		Ok(listings) => match render_listings(&listings) {
			Ok(rendered) => println!("{}", rendered),
			Err(e) => tracing::warn!("Failed to render listings: {}", e),
		},
		Err(e) => {
			tracing::warn!("Transaction confirmed, but refreshing listings failed: {}", e);
		},
	}
}

/// Renders listings as JSON, with the wei price also expanded to an ETH
/// decimal string for readability.
fn render_listings(listings: &[ListingView]) -> Result<String, Box<dyn std::error::Error>> {
	let rendered: Vec<serde_json::Value> = listings
		.iter()
		.map(|listing| {
			let mut value = serde_json::to_value(listing)?;
			if let Some(object) = value.as_object_mut() {
				if let Ok(eth) = wei_string_to_eth_string(&listing.price_wei) {
					object.insert("price_eth".to_string(), serde_json::Value::String(eth));
				}
			}
			Ok(value)
		})
		.collect::<Result<_, serde_json::Error>>()?;

	Ok(serde_json::to_string_pretty(&rendered)?)
}
