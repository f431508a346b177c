//! Stampdesk CLI - drive the Stampdesk console from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and show the dashboard
//! stampdesk login -u jane@example.com
//! stampdesk dashboard
//!
//! # Browse and edit products
//! stampdesk product list --page 2
//! stampdesk product create --name "Green Tea" --gtin 8930000000001 --price 12.50
//! stampdesk product update p_123 --price 13
//!
//! # Stamp lifecycle
//! stampdesk generation create --template t_1 --quantity 500
//! stampdesk activation create --stamp s_1 --stamp s_2 --product p_123
//! ```
//!
//! # Environment Variables
//!
//! - `STAMPDESK_API_BASE_URL` - Base URL of the API (required)
//! - `STAMPDESK_SESSION_FILE` - Where the access token is kept
//! - `STAMPDESK_LOG_JSON` - Emit JSON log lines
//! - `RUST_LOG` - Log filter (default `stampdesk=info,stampdesk_console=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stampdesk_console::{Console, ConsoleConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "stampdesk")]
#[command(author, version, about = "Stampdesk console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the access token
    Login {
        /// Email or username
        #[arg(short, long)]
        user: String,

        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// Show the signed-in user
    Dashboard,
    /// Manage the signed-in user's profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Manage businesses
    Business {
        #[command(subcommand)]
        action: BusinessAction,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage stamp templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
    /// Stamp generation batches
    Generation {
        #[command(subcommand)]
        action: GenerationAction,
    },
    /// Stamp activations
    Activation {
        #[command(subcommand)]
        action: ActivationAction,
    },
    /// Retail orders
    Retail {
        #[command(subcommand)]
        action: RetailAction,
    },
    /// Stamp destructions
    Destruction {
        #[command(subcommand)]
        action: DestructionAction,
    },
    /// List every API operation the console knows
    Endpoints,
}

/// Paging options shared by every `list` command.
#[derive(Args, Debug, Clone, Copy)]
struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Rows per page (defaults to `STAMPDESK_PAGE_SIZE`)
    #[arg(long)]
    per_page: Option<u32>,
}

#[derive(Args, Debug, Default)]
struct ProfileFields {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// Avatar image file
    #[arg(long)]
    avatar: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile
    Show,
    /// Create the profile
    Create(ProfileFields),
    /// Update the profile; omitted fields keep their current value
    Update(ProfileFields),
}

#[derive(Args, Debug, Default)]
struct BusinessFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    short_name: Option<String>,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    tax_code: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    province_code: Option<String>,
    #[arg(long)]
    district_code: Option<String>,
    #[arg(long)]
    ward_code: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    youtube: Option<String>,
    /// Logo image file
    #[arg(long)]
    logo: Option<PathBuf>,
    /// Slide image file (repeatable)
    #[arg(long = "slide-image")]
    slide_images: Vec<PathBuf>,
    /// Intro image file (repeatable)
    #[arg(long = "intro-image")]
    intro_images: Vec<PathBuf>,
    /// Business registration scan (repeatable)
    #[arg(long = "registration-scan")]
    registration_scans: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum BusinessAction {
    /// List businesses
    List(ListArgs),
    /// Show one business
    Show { id: String },
    /// Show the signed-in account's business
    Current,
    /// Register a business
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        tax_code: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Logo image file
        #[arg(long)]
        logo: Option<PathBuf>,
    },
    /// Update the current business; omitted fields keep their current value
    Update(BusinessFields),
}

#[derive(Args, Debug, Default)]
struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    /// Global Trade Item Number
    #[arg(long)]
    gtin: Option<String>,
    /// Decimal price, e.g. `12.50`
    #[arg(long)]
    price: Option<String>,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List(ListArgs),
    /// Show one product
    Show { id: String },
    /// Create a product
    Create(ProductFields),
    /// Update a product; omitted fields keep their current value
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List stamp templates
    List(ListArgs),
    /// Show one template
    Show { id: String },
    /// Create a template
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        size: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
enum GenerationAction {
    /// List generation batches
    List(ListArgs),
    /// Show one batch
    Show { id: String },
    /// Generate a batch of stamps from a template
    Create {
        #[arg(long)]
        template: String,
        #[arg(long)]
        product: Option<String>,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
enum ActivationAction {
    /// List activations
    List(ListArgs),
    /// Show one activation
    Show { id: String },
    /// Activate stamps
    Create {
        /// Stamp id (repeatable)
        #[arg(long = "stamp")]
        stamps: Vec<String>,
        #[arg(long)]
        product: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
enum RetailAction {
    /// List retail orders
    List(ListArgs),
    /// Show one order
    Show { id: String },
    /// Record a retail sale
    Create {
        /// Stamp id (repeatable)
        #[arg(long = "stamp")]
        stamps: Vec<String>,
        #[arg(long)]
        customer_name: Option<String>,
        #[arg(long)]
        customer_phone: Option<String>,
    },
}

#[derive(Subcommand)]
enum DestructionAction {
    /// List destructions
    List(ListArgs),
    /// Show one destruction
    Show { id: String },
    /// Destroy stamps
    Create {
        /// Stamp id (repeatable)
        #[arg(long = "stamp")]
        stamps: Vec<String>,
        #[arg(long)]
        reason: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = ConsoleConfig::from_env();
    init_tracing(config.as_ref().is_ok_and(|c| c.log_json));

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stampdesk=info,stampdesk_console=info".into());

    // Logs go to stderr so command output stays pipeable
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, config: ConsoleConfig) -> Result<(), CliError> {
    let mut console = Console::new(config)?;

    match cli.command {
        Commands::Login { user, password } => {
            commands::auth::login(&mut console, user, password).await?;
        }
        Commands::Logout => commands::auth::logout(&console).await?,
        Commands::Dashboard => commands::auth::dashboard(&mut console).await?,
        Commands::Profile { action } => commands::profile::run(&mut console, action).await?,
        Commands::Business { action } => commands::business::run(&mut console, action).await?,
        Commands::Product { action } => commands::product::run(&mut console, action).await?,
        Commands::Template { action } => commands::stamp::templates(&mut console, action).await?,
        Commands::Generation { action } => {
            commands::stamp::generations(&mut console, action).await?;
        }
        Commands::Activation { action } => {
            commands::stamp::activations(&mut console, action).await?;
        }
        Commands::Retail { action } => commands::stamp::retail(&mut console, action).await?,
        Commands::Destruction { action } => {
            commands::stamp::destructions(&mut console, action).await?;
        }
        Commands::Endpoints => commands::endpoints(),
    }
    Ok(())
}
