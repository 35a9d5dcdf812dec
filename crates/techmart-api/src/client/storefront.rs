//! Public catalog endpoints and customer authentication.

use techmart_core::{Banner, Category, Order, Product, ProductQuery};

use super::TechmartClient;
use crate::error::ApiError;
use crate::types::{AuthToken, CustomerProfile, LoginForm, RegisterRequest};

impl TechmartClient {
    /// Lists products, optionally filtered by category, search text, and sort order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure (after retries), a non-2xx
    /// status, or a body that is not an array of products.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint_with_query(&["products"], &query.to_pairs())?;
        self.get_json(url, None).await
    }

    /// Fetches a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the product does not exist, or any
    /// other [`ApiError`] on failure.
    pub async fn get_product(&self, product_id: &str) -> Result<Product, ApiError> {
        let url = self.endpoint(&["products", product_id])?;
        self.get_json(url, None).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or a
    /// malformed body.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint(&["categories"])?;
        self.get_json(url, None).await
    }

    /// Lists the banners currently marked active.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or a
    /// malformed body.
    pub async fn list_banners(&self) -> Result<Vec<Banner>, ApiError> {
        let url = self.endpoint(&["banners"])?;
        self.get_json(url, None).await
    }

    /// Fetches an order by id (used for the confirmation view).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the order does not exist, or any
    /// other [`ApiError`] on failure.
    pub async fn get_order(&self, order_id: &str) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders", order_id])?;
        self.get_json(url, None).await
    }

    /// Registers a customer account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with status 400 when the email is already
    /// registered, or any other [`ApiError`] on failure.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<CustomerProfile, ApiError> {
        let url = self.endpoint(&["register"])?;
        let body = RegisterRequest {
            username,
            email,
            password,
        };
        let request = self.client.post(url.clone()).json(&body);
        self.send_json(request, &url).await
    }

    /// Exchanges customer credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] on bad credentials, or any other
    /// [`ApiError`] on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, ApiError> {
        let url = self.endpoint(&["login"])?;
        let form = LoginForm {
            username: email,
            password,
        };
        let request = self.client.post(url.clone()).form(&form);
        let token: AuthToken = self.send_json(request, &url).await?;
        tracing::info!(email, "customer logged in");
        Ok(token)
    }

    /// Exchanges admin credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] on bad credentials, or any other
    /// [`ApiError`] on failure.
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<AuthToken, ApiError> {
        let url = self.endpoint(&["admin", "login"])?;
        let form = LoginForm { username, password };
        let request = self.client.post(url.clone()).form(&form);
        let token: AuthToken = self.send_json(request, &url).await?;
        tracing::info!(username, "admin logged in");
        Ok(token)
    }
}
