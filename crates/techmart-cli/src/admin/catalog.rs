use std::path::Path;

use techmart_api::{AdminApi, ProductImage};
use techmart_core::{NewBanner, NewCategory, NewProduct};

use super::ProductArgs;
use crate::{fmt_money, truncate};

async fn load_image(path: &Path) -> anyhow::Result<ProductImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read image {}: {e}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow::anyhow!("image path {} has no file name", path.display()))?
        .to_string();
    Ok(ProductImage {
        file_name,
        bytes,
        mime: None,
    })
}

fn new_product(fields: &ProductArgs) -> NewProduct {
    NewProduct {
        name: fields.name.clone(),
        description: fields.description.clone(),
        price: fields.price,
        category: fields.category.clone(),
        stock: fields.stock,
        image_url: fields.image_url.clone(),
    }
}

pub(crate) async fn run_create_product(
    admin: &AdminApi<'_>,
    fields: &ProductArgs,
) -> anyhow::Result<()> {
    let product = new_product(fields);
    let created = match &fields.image {
        Some(path) => {
            let image = load_image(path).await?;
            admin.create_product_with_image(&product, image).await?
        }
        None => admin.create_product(&product).await?,
    };
    println!(
        "created product {} ({}, {})",
        created.id,
        created.name,
        fmt_money(created.price)
    );
    Ok(())
}

pub(crate) async fn run_update_product(
    admin: &AdminApi<'_>,
    product_id: &str,
    fields: &ProductArgs,
) -> anyhow::Result<()> {
    let product = new_product(fields);
    let updated = match &fields.image {
        Some(path) => {
            let image = load_image(path).await?;
            admin
                .update_product_with_image(product_id, &product, Some(image))
                .await?
        }
        None => admin.update_product(product_id, &product).await?,
    };
    println!("updated product {} ({})", updated.id, updated.name);
    Ok(())
}

pub(crate) async fn run_delete_product(admin: &AdminApi<'_>, product_id: &str) -> anyhow::Result<()> {
    admin.delete_product(product_id).await?;
    println!("deleted product {product_id}");
    Ok(())
}

pub(crate) async fn run_create_category(
    admin: &AdminApi<'_>,
    name: String,
    description: String,
) -> anyhow::Result<()> {
    let created = admin
        .create_category(&NewCategory { name, description })
        .await?;
    println!("created category {} ({})", created.id, created.name);
    Ok(())
}

pub(crate) async fn run_delete_category(
    admin: &AdminApi<'_>,
    category_id: &str,
) -> anyhow::Result<()> {
    admin.delete_category(category_id).await?;
    println!("deleted category {category_id}");
    Ok(())
}

pub(crate) async fn run_list_banners(admin: &AdminApi<'_>) -> anyhow::Result<()> {
    let banners = admin.list_banners().await?;

    if banners.is_empty() {
        println!("no banners");
        return Ok(());
    }

    println!("{:<38}{:<32}{:<8}LINK", "ID", "TITLE", "ACTIVE");
    for banner in &banners {
        println!(
            "{:<38}{:<32}{:<8}{}",
            banner.id,
            truncate(&banner.title, 30),
            if banner.is_active { "yes" } else { "no" },
            banner.link_url.as_deref().unwrap_or("\u{2014}")
        );
    }

    Ok(())
}

pub(crate) async fn run_create_banner(admin: &AdminApi<'_>, banner: &NewBanner) -> anyhow::Result<()> {
    let created = admin.create_banner(banner).await?;
    println!("created banner {} ({})", created.id, created.title);
    Ok(())
}

pub(crate) async fn run_delete_banner(admin: &AdminApi<'_>, banner_id: &str) -> anyhow::Result<()> {
    admin.delete_banner(banner_id).await?;
    println!("deleted banner {banner_id}");
    Ok(())
}
