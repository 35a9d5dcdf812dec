mod account;
mod admin;
mod cart;
mod catalog;
mod checkout;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use techmart_api::TechmartClient;
use techmart_core::{AppConfig, CustomerInfo, PaymentMethod, ProductQuery, ProductSort};
use techmart_storefront::{CartStore, FileStore, SessionStore};
use tracing_subscriber::EnvFilter;

use crate::admin::AdminCommands;
use crate::cart::CartCommands;

#[derive(Debug, Parser)]
#[command(name = "techmart")]
#[command(about = "TechMart storefront command line client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        /// Only show products in this category
        #[arg(long)]
        category: Option<String>,
        /// Free-text search over product names and descriptions
        #[arg(long)]
        search: Option<String>,
        /// Sort order: price-asc, price-desc, or name-asc
        #[arg(long)]
        sort: Option<ProductSort>,
    },
    /// Show a single product
    Product { id: String },
    /// List product categories
    Categories,
    /// List active promotional banners
    Banners,
    /// Look up an order by id
    Order { id: String },
    /// Inspect or change the local cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Place an order for the current cart
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// Full shipping address
        #[arg(long)]
        address: String,
        /// Payment method: cod or razorpay
        #[arg(long, default_value = "cod")]
        payment: PaymentMethod,
    },
    /// Create a customer account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TECHMART_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in as a customer
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TECHMART_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out of the customer session
    Logout,
    /// Store administration (requires `admin login`)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

/// Shared handles for command handlers.
pub(crate) struct Context {
    pub(crate) config: AppConfig,
    pub(crate) client: TechmartClient,
    storage: Arc<FileStore>,
}

impl Context {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let client = TechmartClient::new(&config)?;
        let storage = Arc::new(FileStore::open(config.state_dir.clone())?);
        Ok(Self {
            config,
            client,
            storage,
        })
    }

    pub(crate) fn cart(&self) -> CartStore<Arc<FileStore>> {
        CartStore::load(Arc::clone(&self.storage))
    }

    pub(crate) fn session(&self) -> SessionStore<Arc<FileStore>> {
        SessionStore::new(Arc::clone(&self.storage))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        println!("techmart: no command given; run `techmart --help` for usage");
        return Ok(());
    };

    let config = techmart_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, api = %config.api_base_url, "configuration loaded");

    let ctx = Context::new(config)?;
    match command {
        Commands::Products {
            category,
            search,
            sort,
        } => {
            let query = ProductQuery {
                category,
                search,
                sort,
            };
            catalog::run_products(&ctx, &query).await
        }
        Commands::Product { id } => catalog::run_product(&ctx, &id).await,
        Commands::Categories => catalog::run_categories(&ctx).await,
        Commands::Banners => catalog::run_banners(&ctx).await,
        Commands::Order { id } => catalog::run_order(&ctx, &id).await,
        Commands::Cart { command } => cart::run_cart(&ctx, command).await,
        Commands::Checkout {
            name,
            email,
            phone,
            address,
            payment,
        } => {
            let customer = CustomerInfo {
                name,
                email,
                phone,
                address,
            };
            checkout::run_checkout(&ctx, &customer, payment).await
        }
        Commands::Register {
            username,
            email,
            password,
        } => account::run_register(&ctx, &username, &email, &password).await,
        Commands::Login { email, password } => account::run_login(&ctx, &email, &password).await,
        Commands::Logout => account::run_logout(&ctx),
        Commands::Admin { command } => admin::run_admin(&ctx, command).await,
    }
}

/// Format an amount in rupees with two decimal places.
pub(crate) fn fmt_money(amount: Decimal) -> String {
    format!("\u{20b9}{amount:.2}")
}

/// Shorten `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests;
