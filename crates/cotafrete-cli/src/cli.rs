//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cotafrete_domain::model::DimensionUnit;
use cotafrete_types::OutputFormat;

#[derive(Parser)]
#[command(name = "cotafrete")]
#[command(version)]
#[command(about = "Freight quote management for a transport brokerage")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database file override (bypasses the configured data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage carriers and their contacts
    Carrier {
        #[command(subcommand)]
        command: CarrierCommands,
    },

    /// Enter and browse freight quotes
    Quote {
        #[command(subcommand)]
        command: QuoteCommands,
    },

    /// Cubic volume calculator
    Cubage {
        /// Box line as QTYxWIDTHxLENGTHxHEIGHT (e.g. 2x50x40x30), repeatable
        #[arg(long = "box", short = 'b', required = true)]
        boxes: Vec<String>,

        /// Dimension unit (cm or m)
        #[arg(long, short = 'u', default_value = "cm")]
        unit: DimensionUnit,

        /// Persist a snapshot of the calculation
        #[arg(long)]
        save: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set the default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum CarrierCommands {
    /// Register a carrier
    Add {
        /// Carrier name
        name: String,

        /// CNPJ (digits or masked; stored masked)
        #[arg(long)]
        tax_id: Option<String>,

        /// Base fee percent (kept for the default carrier only)
        #[arg(long)]
        base_fee: Option<f64>,

        /// ICMS percent (kept for the default carrier only)
        #[arg(long)]
        tax: Option<f64>,

        /// Phone number, repeatable
        #[arg(long = "phone")]
        phones: Vec<String>,

        /// E-mail address, repeatable
        #[arg(long = "email")]
        emails: Vec<String>,

        /// Contact person attached to each contact entry
        #[arg(long)]
        person: Option<String>,
    },

    /// List carriers
    List,

    /// Show one carrier with its contacts
    Show {
        id: i64,
    },

    /// Update a carrier; passing any contact flag replaces the whole list
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        tax_id: Option<String>,

        #[arg(long)]
        base_fee: Option<f64>,

        #[arg(long)]
        tax: Option<f64>,

        #[arg(long = "phone")]
        phones: Vec<String>,

        #[arg(long = "email")]
        emails: Vec<String>,

        #[arg(long)]
        person: Option<String>,
    },

    /// Remove a carrier (the default carrier is refused)
    Remove {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum QuoteCommands {
    /// Enter a new quote with one freight value per carrier
    New {
        /// Supplier name
        #[arg(long)]
        supplier: String,

        /// Invoice (NF) value, money text (e.g. "1.234,56")
        #[arg(long)]
        invoice: String,

        /// Order number
        #[arg(long)]
        order: Option<String>,

        /// Shipment weight in kg, money-style text (e.g. "77,7")
        #[arg(long)]
        weight: Option<String>,

        /// Number of volumes
        #[arg(long)]
        volumes: Option<i64>,

        /// Cubage in m³ (e.g. "0,746")
        #[arg(long)]
        cubage: Option<String>,

        /// Quote date (YYYY-MM-DD); today if not given
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Carrier freight as "Name=value", repeatable.
        /// The default carrier is priced automatically and must be omitted.
        #[arg(long = "freight", short = 'F')]
        freights: Vec<String>,

        /// Winning carrier name
        #[arg(long)]
        winner: Option<String>,
    },

    /// List quote history, newest first
    List {
        /// Start date (inclusive, YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (inclusive, YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Supplier name substring (case-insensitive)
        #[arg(long)]
        supplier: Option<String>,

        /// Winning carrier name substring (case-insensitive)
        #[arg(long)]
        carrier: Option<String>,

        /// Export the listing to an .xlsx file instead of printing
        #[arg(long)]
        export: bool,

        /// Output file for --export (timestamped name if not given)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show one quote with its carrier comparison, cheapest first
    Show {
        id: i64,

        /// Export the quote to an .xlsx file instead of printing
        #[arg(long)]
        export: bool,

        /// Output file for --export (timestamped name if not given)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Edit a quote; freight flags replace the stored candidate set
    Edit {
        id: i64,

        #[arg(long)]
        supplier: Option<String>,

        #[arg(long)]
        invoice: Option<String>,

        #[arg(long)]
        order: Option<String>,

        #[arg(long)]
        weight: Option<String>,

        #[arg(long)]
        volumes: Option<i64>,

        #[arg(long)]
        cubage: Option<String>,

        #[arg(long)]
        date: Option<NaiveDate>,

        /// Carrier freight as "Name=value", repeatable; 0 clears the entry
        #[arg(long = "freight", short = 'F')]
        freights: Vec<String>,

        /// Winning carrier name
        #[arg(long)]
        winner: Option<String>,

        /// Clear the winning carrier
        #[arg(long, conflicts_with = "winner")]
        no_winner: bool,
    },

    /// Delete a quote (asks for a typed confirmation)
    Remove {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
