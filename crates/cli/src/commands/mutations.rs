//! Commands that write to the catalog: products, SKUs, prices and stock.

use rust_decimal::Decimal;
use vtex_console_admin::actions::{self, NewProductForm, ProductForm, SkuForm};
use vtex_console_admin::settings::SettingsStore;
use vtex_console_core::{FieldId, FieldValueId, SkuId, WarehouseId};

use super::{CliError, client, into_result, parse, print_json};

/// Build the product form from command-line values.
#[must_use]
pub fn product_form(
    name: String,
    department: String,
    category: String,
    brand: Option<String>,
    ref_id: String,
    description: String,
) -> ProductForm {
    ProductForm {
        name,
        department_id: department,
        category_id: category,
        brand_id: brand,
        ref_id,
        description,
    }
}

/// Create a product. With a `(price, quantity)` pair, also create its SKU
/// and set its price and stock.
///
/// # Errors
///
/// Returns an error if the product or SKU cannot be created.
pub async fn create_product(
    store: &SettingsStore,
    form: ProductForm,
    price_and_quantity: Option<(String, String)>,
) -> Result<(), CliError> {
    let client = client(store)?;

    match price_and_quantity {
        Some((price, quantity)) => {
            let form = NewProductForm {
                product: form,
                price,
                quantity,
            };
            let created = into_result(actions::create_product_with_sku(&client, &form).await)?;
            if !created.price_updated {
                tracing::warn!("Product created but the price was not set");
            }
            if !created.inventory_updated {
                tracing::warn!("Product created but the stock was not set");
            }
            print_json(&created)
        }
        None => {
            let product = into_result(actions::create_product(&client, &form).await)?;
            tracing::info!(product_id = ?product.id, "Created product");
            print_json(&product)
        }
    }
}

/// Create a SKU under `product`.
///
/// # Errors
///
/// Returns an error if the product id is invalid or VTEX rejects the SKU.
pub async fn create_sku(
    store: &SettingsStore,
    product: String,
    name: String,
    ref_id: String,
) -> Result<(), CliError> {
    let form = SkuForm {
        product_id: product,
        name,
        ref_id,
    };
    let sku = into_result(actions::create_sku(&client(store)?, &form).await)?;
    tracing::info!(sku_id = ?sku.id, "Created SKU");
    print_json(&sku)
}

/// Attach an image to a SKU.
///
/// # Errors
///
/// Returns an error if the SKU id is invalid or the request fails.
pub async fn add_image(
    store: &SettingsStore,
    sku: &str,
    url: &str,
    name: &str,
) -> Result<(), CliError> {
    let sku: SkuId = parse("skuId", sku)?;
    let response = into_result(actions::add_sku_image(&client(store)?, sku, url, name).await)?;
    print_json(&response)
}

/// Attach a specification value to a SKU.
///
/// # Errors
///
/// Returns an error if an id is invalid or the request fails.
pub async fn add_specification(
    store: &SettingsStore,
    sku: &str,
    field: &str,
    value: &str,
) -> Result<(), CliError> {
    let sku: SkuId = parse("skuId", sku)?;
    let field: FieldId = parse("fieldId", field)?;
    let value: FieldValueId = parse("fieldValueId", value)?;
    let response =
        into_result(actions::add_sku_specification(&client(store)?, sku, field, value).await)?;
    print_json(&response)
}

/// Set the price of a SKU.
///
/// # Errors
///
/// Returns an error if an argument is invalid or the update fails.
pub async fn set_price(
    store: &SettingsStore,
    sku: &str,
    base_price: &str,
    list_price: Option<&str>,
) -> Result<(), CliError> {
    let sku: SkuId = parse("skuId", sku)?;
    let base_price: Decimal = parse("basePrice", base_price)?;
    let list_price: Option<Decimal> = list_price
        .map(|raw| parse("listPrice", raw))
        .transpose()?;

    let client = client(store)?;
    into_result(actions::update_price(&client, sku, base_price, list_price).await)?;
    tracing::info!(%sku, %base_price, "Updated price");
    Ok(())
}

/// Set the stock of a SKU in a warehouse.
///
/// # Errors
///
/// Returns an error if an argument is invalid or the update fails.
pub async fn set_inventory(
    store: &SettingsStore,
    sku: &str,
    quantity: &str,
    warehouse: &str,
) -> Result<(), CliError> {
    let sku: SkuId = parse("skuId", sku)?;
    let quantity: i64 = parse("quantity", quantity)?;
    let warehouse = WarehouseId::from(warehouse);

    let client = client(store)?;
    into_result(actions::update_inventory(&client, sku, &warehouse, quantity).await)?;
    tracing::info!(%sku, %warehouse, quantity, "Updated inventory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::open(dir.path().join("settings.json"))
    }

    #[tokio::test]
    async fn test_set_price_rejects_invalid_amount() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = set_price(&empty_store(&dir), "12", "doce", None)
            .await
            .expect_err("invalid");
        assert_eq!(err.to_string(), "Invalid basePrice: \"doce\"");
    }

    #[tokio::test]
    async fn test_set_inventory_rejects_invalid_sku() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = set_inventory(&empty_store(&dir), "abc", "5", "1_1")
            .await
            .expect_err("invalid");
        assert!(matches!(err, CliError::InvalidArgument { field: "skuId", .. }));
    }

    #[tokio::test]
    async fn test_create_product_requires_credentials() {
        let dir = tempfile::tempdir().expect("tempdir");
        let form = product_form(
            "Morral".to_string(),
            "1".to_string(),
            "10".to_string(),
            None,
            "MOR-1".to_string(),
            String::new(),
        );

        let err = create_product(&empty_store(&dir), form, None)
            .await
            .expect_err("no credentials");
        assert!(matches!(err, CliError::Settings(_)));
    }
}
