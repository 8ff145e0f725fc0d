use clap::Parser;
use miette::{IntoDiagnostic, Result};
use moveday::application::settlement::{SettlementEngine, SettlementOutcome};
use moveday::domain::cost::PricingConfig;
use moveday::domain::ports::BookingStoreBox;
use moveday::infrastructure::in_memory::InMemoryBookingStore;
#[cfg(feature = "storage-rocksdb")]
use moveday::infrastructure::rocksdb::RocksDbBookingStore;
use moveday::interfaces::csv::booking_writer::BookingWriter;
use moveday::interfaces::csv::checkout_reader::CheckoutReader;
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// Replays a CSV of checkout requests through the settlement engine and
/// prints the persisted bookings as CSV.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input checkout requests CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store: BookingStoreBox = match cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => Box::new(RocksDbBookingStore::open(db_path).into_diagnostic()?),
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            return Err(miette::miette!(
                "--db-path requires the storage-rocksdb feature"
            ));
        }
        None => Box::new(InMemoryBookingStore::new()),
    };
    let engine = SettlementEngine::new(store);
    let pricing = PricingConfig::default();

    // Settle checkouts
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CheckoutReader::new(file);
    for row_result in reader.checkouts() {
        match row_result {
            Ok(row) => match engine.settle(row.into_request(&pricing)).await {
                SettlementOutcome::Succeeded { .. } => {}
                SettlementOutcome::Failed { message, .. } => {
                    eprintln!("Checkout failed: {}", message);
                }
                SettlementOutcome::AlreadyInFlight => {}
            },
            Err(e) => {
                eprintln!("Error reading checkout: {}", e);
            }
        }
    }

    // Collect persisted bookings from the engine
    let bookings = engine.into_bookings().await.into_diagnostic()?;

    // Output final state
    let stdout = io::stdout();
    let mut writer = BookingWriter::new(stdout.lock());
    writer.write_bookings(bookings).into_diagnostic()?;

    Ok(())
}
