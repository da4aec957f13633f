use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const PRODUCT_TYPES: [&str; 5] = ["Electronics", "Furniture", "Clothing", "Food", "Books"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub product_name: String,
    pub description: String,
    pub product_type: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// Incoming create/update body. Every field is optional so that missing
/// fields are reported as validation details rather than a decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub product_type: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_name: String,
    pub description: String,
    pub product_type: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl ProductPayload {
    /// Check every field, collecting one message per problem.
    pub fn validate(self) -> Result<NewProduct, Vec<String>> {
        let mut details = Vec::new();

        let product_name = self.product_name.unwrap_or_default().trim().to_string();
        if product_name.is_empty() {
            details.push("productName must not be blank".to_string());
        }

        let description = self.description.unwrap_or_default().trim().to_string();
        if description.is_empty() {
            details.push("description must not be blank".to_string());
        }

        let raw_type = self.product_type.unwrap_or_default();
        let product_type = PRODUCT_TYPES
            .iter()
            .find(|t| t.eq_ignore_ascii_case(raw_type.trim()))
            .map(|t| t.to_string());
        if product_type.is_none() {
            details.push(format!(
                "productType must be one of {}",
                PRODUCT_TYPES.join(", ")
            ));
        }

        let quantity = self.quantity.filter(|q| q.is_finite() && *q > 0.0);
        if quantity.is_none() {
            details.push("quantity must be greater than 0".to_string());
        }

        let unit_price = self.unit_price.filter(|p| p.is_finite() && *p > 0.0);
        if unit_price.is_none() {
            details.push("unitPrice must be greater than 0".to_string());
        }

        match (product_type, quantity, unit_price) {
            (Some(product_type), Some(quantity), Some(unit_price)) if details.is_empty() => {
                Ok(NewProduct {
                    product_name,
                    description,
                    product_type,
                    quantity,
                    unit_price,
                })
            }
            _ => Err(details),
        }
    }
}

/// In-memory product table. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct Store {
    last_id: u64,
    products: BTreeMap<u64, Product>,
}

impl Store {
    pub fn insert(&mut self, input: NewProduct) -> Product {
        self.last_id += 1;
        let product = Product {
            id: self.last_id,
            product_name: input.product_name,
            description: input.description,
            product_type: input.product_type,
            quantity: input.quantity,
            unit_price: input.unit_price,
        };
        self.products.insert(product.id, product.clone());
        product
    }

    /// A store pre-filled with a handful of products for manual testing.
    pub fn with_samples() -> Self {
        let mut store = Store::default();
        let samples = [
            ("Office Chair", "Ergonomic mesh chair", "Furniture", 5.0, 3500.0),
            ("Laptop Stand", "Aluminium, adjustable height", "Electronics", 12.0, 1299.0),
            ("Cotton Shirt", "Plain white, size M", "Clothing", 40.0, 450.0),
            ("Rice 5kg", "Jasmine rice", "Food", 25.0, 320.0),
            ("Rust in Action", "Systems programming book", "Books", 3.0, 2100.0),
        ];
        for (name, description, product_type, quantity, unit_price) in samples {
            store.insert(NewProduct {
                product_name: name.to_string(),
                description: description.to_string(),
                product_type: product_type.to_string(),
                quantity,
                unit_price,
            });
        }
        store
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn not_found(id: u64) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error_message: format!("Product {id} not found"),
            details: Vec::new(),
        }),
    )
}

fn bad_request(error_message: String, details: Vec<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error_message,
            details,
        }),
    )
}

/// Decode and validate a create/update body.
fn accept(payload: Result<Json<ProductPayload>, JsonRejection>) -> Result<NewProduct, ApiError> {
    let Json(payload) = payload.map_err(|rejection| bad_request(rejection.body_text(), Vec::new()))?;
    payload.validate().map_err(|details| {
        let message = details.first().cloned().unwrap_or_default();
        bad_request(message, details)
    })
}

pub fn app() -> Router {
    router(Store::default())
}

pub fn router(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Store::default()).await
}

pub async fn serve(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, router(store)).await
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// Lists every product, or those whose name contains `?name=`
/// (case-insensitive). A blank name lists everything.
async fn list_products(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Product>> {
    let store = db.read().await;
    let needle = params
        .name
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty());
    let products = store
        .products
        .values()
        .filter(|p| match &needle {
            Some(needle) => p.product_name.to_lowercase().contains(needle),
            None => true,
        })
        .cloned()
        .collect();
    Json(products)
}

async fn create_product(
    State(db): State<Db>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let input = accept(payload)?;
    let product = db.write().await.insert(input);
    info!(id = product.id, name = %product.product_name, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ApiError> {
    let store = db.read().await;
    store.products.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let mut store = db.write().await;
    let product = store.products.get_mut(&id).ok_or_else(|| not_found(id))?;
    let input = accept(payload)?;
    product.product_name = input.product_name;
    product.description = input.description;
    product.product_type = input.product_type;
    product.quantity = input.quantity;
    product.unit_price = input.unit_price;
    info!(id, "product updated");
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    store.products.remove(&id).ok_or_else(|| not_found(id))?;
    info!(id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> ProductPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn product_serializes_camel_case() {
        let product = Product {
            id: 1,
            product_name: "Chair".to_string(),
            description: "Pine".to_string(),
            product_type: "Furniture".to_string(),
            quantity: 5.0,
            unit_price: 100.0,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["productName"], "Chair");
        assert_eq!(json["unitPrice"], 100.0);
    }

    #[test]
    fn valid_payload_is_normalized() {
        let input = payload(
            r#"{"productName":" Desk ","description":"Oak","productType":"furniture","quantity":2,"unitPrice":500}"#,
        )
        .validate()
        .unwrap();
        assert_eq!(input.product_name, "Desk");
        assert_eq!(input.product_type, "Furniture");
        assert_eq!(input.quantity, 2.0);
    }

    #[test]
    fn empty_payload_reports_every_field() {
        let details = payload("{}").validate().unwrap_err();
        assert_eq!(details.len(), 5);
        assert_eq!(details[0], "productName must not be blank");
    }

    #[test]
    fn non_positive_numbers_are_rejected() {
        let details = payload(
            r#"{"productName":"Desk","description":"Oak","productType":"Furniture","quantity":0,"unitPrice":-1}"#,
        )
        .validate()
        .unwrap_err();
        assert_eq!(
            details,
            vec![
                "quantity must be greater than 0".to_string(),
                "unitPrice must be greater than 0".to_string(),
            ]
        );
    }

    #[test]
    fn fractional_quantity_is_kept() {
        let input = payload(
            r#"{"productName":"Rice","description":"Jasmine","productType":"Food","quantity":2.5,"unitPrice":64}"#,
        )
        .validate()
        .unwrap();
        assert_eq!(input.quantity, 2.5);
    }

    #[test]
    fn store_assigns_increasing_ids() {
        let mut store = Store::default();
        let input = NewProduct {
            product_name: "Desk".to_string(),
            description: "Oak".to_string(),
            product_type: "Furniture".to_string(),
            quantity: 2.0,
            unit_price: 500.0,
        };
        let a = store.insert(input.clone());
        let b = store.insert(input);
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn samples_cover_every_type() {
        let store = Store::with_samples();
        assert!(!store.is_empty());
        for t in PRODUCT_TYPES {
            assert!(store.products.values().any(|p| p.product_type == t), "{t}");
        }
    }
}
