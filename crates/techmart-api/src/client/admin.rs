//! Bearer-authenticated admin console endpoints.

use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use techmart_core::{Banner, Category, NewBanner, NewCategory, NewProduct, Order, OrderStatus, Product};

use super::TechmartClient;
use crate::error::ApiError;
use crate::types::ProductImage;

/// Admin endpoint group. Obtain one with [`TechmartClient::admin`]; every
/// request carries `Authorization: Bearer <token>`.
pub struct AdminApi<'a> {
    client: &'a TechmartClient,
    token: &'a str,
}

impl<'a> AdminApi<'a> {
    pub(super) fn new(client: &'a TechmartClient, token: &'a str) -> Self {
        Self { client, token }
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.token)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] if the token is rejected, or any other
    /// [`ApiError`] on failure.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.client.endpoint(&["admin", "orders"])?;
        self.client.get_json(url, Some(self.token)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown order, or any other
    /// [`ApiError`] on failure.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: &OrderStatus,
    ) -> Result<(), ApiError> {
        let url = self.client.endpoint_with_query(
            &["admin", "orders", order_id, "status"],
            &[("status", status.as_str().to_owned())],
        )?;
        let request = self.authed(self.client.client.put(url.clone()));
        self.client.send_expect_success(request, &url).await?;
        tracing::info!(order_id, %status, "order status updated");
        Ok(())
    }

    /// Creates a product from JSON fields (image referenced by URL).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or transport failure.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let url = self.client.endpoint(&["admin", "products"])?;
        let request = self.authed(self.client.client.post(url.clone()).json(product));
        let created: Product = self.client.send_json(request, &url).await?;
        tracing::info!(product_id = %created.id, name = %created.name, "product created");
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown product, or any other
    /// [`ApiError`] on failure.
    pub async fn update_product(
        &self,
        product_id: &str,
        product: &NewProduct,
    ) -> Result<Product, ApiError> {
        let url = self.client.endpoint(&["admin", "products", product_id])?;
        let request = self.authed(self.client.client.put(url.clone()).json(product));
        let updated: Product = self.client.send_json(request, &url).await?;
        tracing::info!(product_id, "product updated");
        Ok(updated)
    }

    /// Creates a product with an uploaded image (multipart form).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection (including a failed image upload on
    /// the server side) or transport failure.
    pub async fn create_product_with_image(
        &self,
        product: &NewProduct,
        image: ProductImage,
    ) -> Result<Product, ApiError> {
        let url = self.client.endpoint(&["admin", "products-with-image"])?;
        let form = product_form(product, Some(image))?;
        let request = self.authed(self.client.client.post(url.clone()).multipart(form));
        let created: Product = self.client.send_json(request, &url).await?;
        tracing::info!(product_id = %created.id, name = %created.name, "product created with image");
        Ok(created)
    }

    /// Updates a product, optionally replacing its image. Without an image the
    /// server keeps the existing one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown product, or any other
    /// [`ApiError`] on failure.
    pub async fn update_product_with_image(
        &self,
        product_id: &str,
        product: &NewProduct,
        image: Option<ProductImage>,
    ) -> Result<Product, ApiError> {
        let url = self
            .client
            .endpoint(&["admin", "products-with-image", product_id])?;
        let form = product_form(product, image)?;
        let request = self.authed(self.client.client.put(url.clone()).multipart(form));
        let updated: Product = self.client.send_json(request, &url).await?;
        tracing::info!(product_id, "product updated with image");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown product, or any other
    /// [`ApiError`] on failure.
    pub async fn delete_product(&self, product_id: &str) -> Result<(), ApiError> {
        let url = self.client.endpoint(&["admin", "products", product_id])?;
        let request = self.authed(self.client.client.delete(url.clone()));
        self.client.send_expect_success(request, &url).await?;
        tracing::info!(product_id, "product deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or transport failure.
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        let url = self.client.endpoint(&["admin", "categories"])?;
        let request = self.authed(self.client.client.post(url.clone()).json(category));
        let created: Category = self.client.send_json(request, &url).await?;
        tracing::info!(category_id = %created.id, name = %created.name, "category created");
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown category, or any other
    /// [`ApiError`] on failure.
    pub async fn delete_category(&self, category_id: &str) -> Result<(), ApiError> {
        let url = self.client.endpoint(&["admin", "categories", category_id])?;
        let request = self.authed(self.client.client.delete(url.clone()));
        self.client.send_expect_success(request, &url).await?;
        tracing::info!(category_id, "category deleted");
        Ok(())
    }

    /// Lists all banners, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or transport failure.
    pub async fn list_banners(&self) -> Result<Vec<Banner>, ApiError> {
        let url = self.client.endpoint(&["admin", "banners"])?;
        self.client.get_json(url, Some(self.token)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection or transport failure.
    pub async fn create_banner(&self, banner: &NewBanner) -> Result<Banner, ApiError> {
        let url = self.client.endpoint(&["admin", "banners"])?;
        let request = self.authed(self.client.client.post(url.clone()).json(banner));
        let created: Banner = self.client.send_json(request, &url).await?;
        tracing::info!(banner_id = %created.id, title = %created.title, "banner created");
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown banner, or any other
    /// [`ApiError`] on failure.
    pub async fn delete_banner(&self, banner_id: &str) -> Result<(), ApiError> {
        let url = self.client.endpoint(&["admin", "banners", banner_id])?;
        let request = self.authed(self.client.client.delete(url.clone()));
        self.client.send_expect_success(request, &url).await?;
        tracing::info!(banner_id, "banner deleted");
        Ok(())
    }
}

/// Builds the multipart body for the `products-with-image` endpoints.
fn product_form(product: &NewProduct, image: Option<ProductImage>) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("name", product.name.clone())
        .text("description", product.description.clone())
        .text("price", product.price.normalize().to_string())
        .text("category", product.category.clone())
        .text("stock", product.stock.to_string());

    if let Some(image) = image {
        let content_type = image.content_type().to_owned();
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&content_type)?;
        form = form.part("image", part);
    }

    Ok(form)
}
