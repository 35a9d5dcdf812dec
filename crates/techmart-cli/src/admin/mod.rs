//! Store administration command handlers.
//!
//! Every command except `login` needs the admin token saved by
//! `techmart admin login`. A rejected token is reported with a hint to log in
//! again rather than as a raw HTTP error.

mod catalog;
mod orders;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use techmart_api::{AdminApi, ApiError};
use techmart_core::OrderStatus;

use crate::Context;

/// Sub-commands available under `admin`.
#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Sign in as an administrator
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "TECHMART_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved admin token
    Logout,
    /// List all orders, newest first
    Orders,
    /// Change an order's fulfilment status
    OrderStatus {
        order_id: String,
        /// Placed, Processing, Shipped, Delivered, or Cancelled
        status: OrderStatus,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage promotional banners
    Banner {
        #[command(subcommand)]
        command: BannerCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// Create a product
    Create(ProductArgs),
    /// Replace a product's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub price: Decimal,
    #[arg(long)]
    pub category: String,
    #[arg(long, default_value = "0")]
    pub stock: i64,
    /// Hosted image URL (ignored when --image is given)
    #[arg(long)]
    pub image_url: Option<String>,
    /// Local image file to upload with the product
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// Create a category
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a category
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum BannerCommands {
    /// List all banners, including inactive ones
    List,
    /// Create a banner
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        image_url: String,
        /// Storefront-relative link, e.g. /products?category=Laptops
        #[arg(long, default_value = "/")]
        link_url: String,
        /// Create the banner hidden from the storefront
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a banner
    Delete { id: String },
}

/// # Errors
///
/// Returns an error if no admin token is saved, the token is rejected, or
/// the backend call fails.
pub(crate) async fn run_admin(ctx: &Context, command: AdminCommands) -> anyhow::Result<()> {
    let command = match command {
        AdminCommands::Login { username, password } => {
            let token = ctx.client.admin_login(&username, &password).await?;
            ctx.session().set_admin_token(&token.access_token)?;
            tracing::info!(username = %username, "admin signed in");
            println!("signed in as admin {username}");
            return Ok(());
        }
        AdminCommands::Logout => {
            ctx.session().clear_admin_token()?;
            println!("admin signed out");
            return Ok(());
        }
        other => other,
    };

    let token = ctx
        .session()
        .admin_token()?
        .ok_or_else(|| anyhow::anyhow!("not signed in as admin; run `techmart admin login` first"))?;
    let admin = ctx.client.admin(&token);

    let result = dispatch(&admin, command).await;
    result.map_err(|e| match e.downcast::<ApiError>() {
        Ok(ApiError::Unauthorized { detail }) => anyhow::anyhow!(
            "admin session rejected ({detail}); run `techmart admin login` again"
        ),
        Ok(other) => other.into(),
        Err(e) => e,
    })
}

async fn dispatch(admin: &AdminApi<'_>, command: AdminCommands) -> anyhow::Result<()> {
    match command {
        AdminCommands::Login { .. } | AdminCommands::Logout => Ok(()),
        AdminCommands::Orders => orders::run_list_orders(admin).await,
        AdminCommands::OrderStatus { order_id, status } => {
            orders::run_update_status(admin, &order_id, &status).await
        }
        AdminCommands::Product { command } => match command {
            ProductCommands::Create(fields) => catalog::run_create_product(admin, &fields).await,
            ProductCommands::Update { id, fields } => {
                catalog::run_update_product(admin, &id, &fields).await
            }
            ProductCommands::Delete { id } => catalog::run_delete_product(admin, &id).await,
        },
        AdminCommands::Category { command } => match command {
            CategoryCommands::Create { name, description } => {
                catalog::run_create_category(admin, name, description).await
            }
            CategoryCommands::Delete { id } => catalog::run_delete_category(admin, &id).await,
        },
        AdminCommands::Banner { command } => match command {
            BannerCommands::List => catalog::run_list_banners(admin).await,
            BannerCommands::Create {
                title,
                description,
                image_url,
                link_url,
                inactive,
            } => {
                let banner = techmart_core::NewBanner {
                    title,
                    description,
                    image_url,
                    link_url,
                    is_active: !inactive,
                };
                catalog::run_create_banner(admin, &banner).await
            }
            BannerCommands::Delete { id } => catalog::run_delete_banner(admin, &id).await,
        },
    }
}
