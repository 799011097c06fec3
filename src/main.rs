use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use studio_booking::application::desk::BookingDesk;
use studio_booking::application::wizard::{BookingWizard, WizardStep};
use studio_booking::config::StudioConfig;
use studio_booking::domain::booking::{BookingRecord, BookingStatus, Field};
use studio_booking::domain::payment::PaymentMethod;
use studio_booking::domain::ports::{BookingRepositoryRef, PaymentGatewayRef};
use studio_booking::error::BookingError;
use studio_booking::infrastructure::in_memory::{InMemoryBookingRepository, InMemoryCatalog};
#[cfg(feature = "storage-rocksdb")]
use studio_booking::infrastructure::rocksdb::RocksDBStore;
use studio_booking::infrastructure::simulated_gateway::SimulatedGateway;
use studio_booking::interfaces::csv::booking_reader::{BookingReader, BookingRow};
use studio_booking::interfaces::csv::booking_writer::BookingWriter;
use studio_booking::logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Studio configuration file (TOML). Built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Override the simulated gateway's response delay.
    #[arg(long, global = true)]
    payment_delay_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the service catalog with the deposit due for each package
    Services,
    /// Book a service and pay the deposit
    Book(BookArgs),
    /// Book every request in a CSV file and print the stored bookings
    Import {
        /// Booking requests CSV file
        input: PathBuf,
    },
    /// Print all stored bookings as CSV
    Bookings,
    /// Change the status of a booking
    SetStatus { id: u32, status: BookingStatus },
    /// Delete a booking
    Remove { id: u32 },
    /// Show booking counts and collected deposits
    Summary,
}

#[derive(Args)]
struct BookArgs {
    #[arg(long)]
    service: String,
    #[arg(long)]
    package: Option<String>,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    /// Session date, YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// Session time, HH:MM
    #[arg(long)]
    time: String,
    #[arg(long, default_value = "")]
    notes: String,
    /// airtel-money, tnm-mpamba or card
    #[arg(long)]
    method: PaymentMethod,
    /// Print the stored booking as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

impl From<&BookArgs> for BookingRow {
    fn from(args: &BookArgs) -> Self {
        Self {
            service: args.service.clone(),
            package: args.package.clone(),
            name: args.name.clone(),
            email: args.email.clone(),
            phone: args.phone.clone(),
            date: args.date.clone(),
            time: args.time.clone(),
            notes: args.notes.clone(),
            method: args.method,
        }
    }
}

struct Studio {
    config: StudioConfig,
    desk: BookingDesk,
    gateway: PaymentGatewayRef,
}

impl Studio {
    fn wizard(&self) -> BookingWizard {
        BookingWizard::new(self.desk.clone(), self.gateway.clone())
            .with_payment_timeout(self.config.payment.timeout())
    }

    /// Drives a fresh wizard through every step for one request.
    async fn book(&self, row: &BookingRow) -> Result<BookingRecord, BookingError> {
        let mut wizard = self.wizard();
        wizard.select_service(&row.service).await?;
        if let Some(package) = &row.package {
            wizard.select_package(package)?;
        }

        let fields = [
            (Field::Name, &row.name),
            (Field::Email, &row.email),
            (Field::Phone, &row.phone),
            (Field::Date, &row.date),
            (Field::Time, &row.time),
            (Field::Notes, &row.notes),
        ];
        for (field, value) in fields {
            wizard.set_field(field, value.as_str())?;
        }

        if wizard.submit_details()? != WizardStep::Payment {
            return Err(BookingError::ValidationError(wizard.errors().clone()));
        }

        wizard.choose_payment_method(row.method)?;
        let record = wizard.pay().await?;
        Ok(record.clone())
    }
}

fn open_repository(db_path: Option<PathBuf>) -> Result<BookingRepositoryRef> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Arc::new(InMemoryBookingRepository::new()))
        }
        None => Ok(Arc::new(InMemoryBookingRepository::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => StudioConfig::load(path).into_diagnostic()?,
        None => StudioConfig::default(),
    };
    if let Some(delay_ms) = cli.payment_delay_ms {
        config.payment.delay_ms = delay_ms;
    }

    let repository = open_repository(cli.db_path)?;
    let catalog = Arc::new(InMemoryCatalog::new(config.services.clone()));
    let gateway: PaymentGatewayRef = Arc::new(SimulatedGateway::new(
        config.payment.delay(),
        config.payment.outcome.clone(),
    ));
    let studio = Studio {
        desk: BookingDesk::new(catalog, repository),
        gateway,
        config,
    };
    let currency = studio.config.currency.as_str();

    match cli.command {
        Command::Services => {
            for service in studio.desk.services().await.into_diagnostic()? {
                println!(
                    "{}  {}  from {} (deposit {} {})",
                    service.id,
                    service.title,
                    service.price_start,
                    currency,
                    service.deposit_for(None)
                );
                for package in &service.packages {
                    println!(
                        "    {}: {} (deposit {} {}, ready in {})",
                        package.name,
                        package.price,
                        currency,
                        service.deposit_for(Some(&package.name)),
                        package.turnaround
                    );
                }
            }
        }
        Command::Book(args) => {
            let record = studio.book(&BookingRow::from(&args)).await.into_diagnostic()?;
            if args.json {
                let json = serde_json::to_string_pretty(&record).into_diagnostic()?;
                println!("{json}");
            } else {
                let service = studio.desk.service(&record.service_id).await.into_diagnostic()?;
                println!("Booking confirmed");
                println!("Reference: {}", record.reference);
                println!("Booking ID: {}", record.id);
                match &record.package {
                    Some(package) => println!("Service: {} ({})", service.title, package),
                    None => println!("Service: {}", service.title),
                }
                println!("When: {} {}", record.date, record.time.format("%H:%M"));
                println!(
                    "Deposit paid: {} {} via {}",
                    currency, record.amount, record.payment_method
                );
                println!("Status: {}", record.status);
            }
        }
        Command::Import { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = BookingReader::new(file);
            let mut placed = Vec::new();
            for (index, row) in reader.rows().enumerate() {
                // Header is line 1.
                let line = index + 2;
                match row {
                    Ok(row) => match studio.book(&row).await {
                        Ok(record) => placed.push(record),
                        Err(e) => eprintln!("Error processing booking on line {}: {}", line, e),
                    },
                    Err(e) => eprintln!("Error reading booking request: {}", e),
                }
            }

            let stdout = io::stdout();
            let mut writer = BookingWriter::new(stdout.lock());
            writer.write_bookings(&placed).into_diagnostic()?;
        }
        Command::Bookings => {
            let records = studio.desk.bookings().await.into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = BookingWriter::new(stdout.lock());
            writer.write_bookings(&records).into_diagnostic()?;
        }
        Command::SetStatus { id, status } => {
            let record = studio.desk.set_status(id, status).await.into_diagnostic()?;
            println!("Booking {} is now {}", record.id, record.status);
        }
        Command::Remove { id } => {
            studio.desk.remove(id).await.into_diagnostic()?;
            println!("Booking {} removed", id);
        }
        Command::Summary => {
            let summary = studio.desk.summary().await.into_diagnostic()?;
            println!("Total bookings: {}", summary.total);
            for (status, count) in &summary.by_status {
                println!("  {}: {}", status, count);
            }
            println!(
                "Deposits collected: {} {}",
                currency, summary.deposits_collected
            );
        }
    }

    Ok(())
}
