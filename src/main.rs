//! Ledgerweb main entry point
//!
//! Loads a plain-text ledger file, parses it into transactions and prints
//! them, optionally narrowed by a filter tree read from a JSON file.

use clap::Parser;
use ledgerweb_config::Config;
use ledgerweb_core::{LedgerService, MemoryStore};
use ledgerweb_filter::FilterGroup;
use ledgerweb_utils::format_number;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "ledgerweb")]
#[command(version = "0.1.0")]
#[command(about = "A plain-text accounting engine: ledger parsing and transaction filtering", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Ledger file to load (overrides the configured data path)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON file holding a filter tree to apply
    #[arg(long)]
    filter: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = if args.config.exists() {
            Config::load(args.config.clone())?
        } else {
            Config::default()
        };

        let ledger_path = args.file.clone().unwrap_or_else(|| config.ledger_path());
        log::info!("Loading ledger file: {}", ledger_path.display());

        let content = std::fs::read_to_string(&ledger_path)?;

        let store = Arc::new(MemoryStore::new());
        let file = store
            .insert_file(&ledger_path.to_string_lossy(), &content)
            .await;
        let service = LedgerService::new(store);

        let count = service.parse_and_upsert(file.id).await?;
        log::info!("Parsed {} transactions", count);

        let filter: Option<FilterGroup> = match &args.filter {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Some(serde_json::from_str(&text)?)
            }
            None => None,
        };

        let transactions = service.list_transactions(file.id, filter.as_ref()).await?;

        println!("{} transaction(s)", transactions.len());
        for tx in &transactions {
            let tags = if tx.tags.is_empty() {
                String::new()
            } else {
                format!(
                    "  [{}]",
                    tx.tags
                        .iter()
                        .map(|t| format!("#{}", t))
                        .collect::<Vec<_>>()
                        .join(" ")
                )
            };
            println!(
                "{}  {:<40}  {:>14}{}",
                tx.date,
                tx.narration,
                format_number(&format!("{:.2}", tx.amount)),
                tags
            );
            for posting in &tx.postings {
                let currency = posting.currency.as_deref().unwrap_or("");
                println!(
                    "    {:<38}  {:>12} {}",
                    posting.account,
                    format_number(&format!("{:.2}", posting.amount)),
                    currency
                );
            }
        }

        Ok(())
    })
}
