pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod payments;
mod timestamps;

pub use app_config::{AppConfig, Environment};
pub use cart::CartLineItem;
pub use catalog::{
    Banner, Category, NewBanner, NewCategory, NewProduct, Product, ProductQuery, ProductSort,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ValidationError};
pub use orders::{
    CustomerInfo, Order, OrderDraft, OrderItem, OrderLine, OrderStatus, PaymentMethod,
};
pub use payments::{GatewayResponse, PaymentSession, PaymentVerification};
