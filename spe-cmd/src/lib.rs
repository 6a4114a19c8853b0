//! Command implementations for the pricing CLI.
//!
//! Read-only queries talk to the API directly; `simulate` and `upload`
//! drive a `Session` so they follow the same source and selection rules
//! as the dashboard.

use clap::Subcommand;
use log::info;
use spe_core::client::HttpClient;
use spe_core::controller::Message;
use spe_core::data_source::DataSource;
use spe_core::runtime::Session;

pub use spe_core::client::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub mod query;
pub mod simulate;
pub mod transfer;

#[derive(Subcommand)]
pub enum Command {
    /// Show whether the API holds an uploaded dataset
    Status {
        /// Print the raw status as JSON
        #[arg(long)]
        json: bool,
    },

    /// List products with price, expiry and freshness
    Products {
        /// Use the uploaded dataset instead of the demo data
        #[arg(long)]
        custom: bool,
    },

    /// Get the pricing recommendation for one product
    Recommend {
        /// Product name, exactly as listed
        product: String,

        /// Simulated day (1-based)
        #[arg(short, long, default_value_t = 1)]
        day: u32,

        #[arg(long)]
        custom: bool,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Step through days and print a recommendation for each
    Simulate {
        /// Product to follow (defaults to the first listed)
        #[arg(short, long)]
        product: Option<String>,

        /// Number of days to simulate
        #[arg(short = 'n', long, default_value_t = 7)]
        days: u32,

        #[arg(long)]
        custom: bool,
    },

    /// Download the pricing report CSV
    Export {
        #[arg(long)]
        custom: bool,

        /// Output path (defaults to pricing-report-YYYY-MM-DD.csv)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Upload a product CSV and switch to it
    Upload {
        /// CSV with Product_Name, Unit_Price, Days_to_Expiry, Catagory columns
        file: String,
    },

    /// Show regional sales statistics
    Regions {
        /// Only show one region (North, South, East, West, Central, Other)
        #[arg(short, long)]
        region: Option<String>,
    },
}

fn source_flag(custom: bool) -> DataSource {
    if custom {
        DataSource::Custom
    } else {
        DataSource::Demo
    }
}

/// Start a session and settle it on `source`.
pub(crate) async fn open_session(
    client: HttpClient,
    source: DataSource,
) -> anyhow::Result<Session<HttpClient>> {
    let mut session = Session::new(client);
    session.start().await;
    if session.controller().source() != source {
        session.send(Message::SwitchSource(source)).await;
    }
    let controller = session.controller();
    if controller.source() != source {
        anyhow::bail!(
            "No {} data available on the API{}",
            source,
            controller
                .error()
                .map(|e| format!(" ({})", e))
                .unwrap_or_default()
        );
    }
    info!(
        "Session on {} data with {} products",
        source,
        session.controller().products().len()
    );
    Ok(session)
}

pub async fn run(command: Command, config: ApiConfig) -> anyhow::Result<()> {
    let client = HttpClient::new(config)?;
    match command {
        Command::Status { json } => query::run_status(&client, json).await,
        Command::Products { custom } => query::run_products(&client, source_flag(custom)).await,
        Command::Recommend {
            product,
            day,
            custom,
            json,
        } => query::run_recommend(&client, source_flag(custom), &product, day, json).await,
        Command::Simulate {
            product,
            days,
            custom,
        } => simulate::run_simulate(client, source_flag(custom), product.as_deref(), days).await,
        Command::Export { custom, output } => {
            transfer::run_export(&client, source_flag(custom), output.as_deref()).await
        }
        Command::Upload { file } => transfer::run_upload(client, &file).await,
        Command::Regions { region } => query::run_regions(region.as_deref()),
    }
}
