//! Stateless HTTP request builder and response parser for the inventory API.
//!
//! # Design
//! `InventoryClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The convenience methods (`list_all`, `get_by_id`, ...)
//! run both halves through a caller-supplied `Transport`. No call is ever
//! retried.

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{Product, ProductId, ProductInput};

/// Synchronous, stateless client for the inventory API.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    base_url: String,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_all(&self) -> HttpRequest {
        get(format!("{}/products", self.base_url))
    }

    pub fn build_get_by_id(&self, id: ProductId) -> HttpRequest {
        get(format!("{}/products/{id}", self.base_url))
    }

    /// A blank query is sent as a plain list request.
    pub fn build_search(&self, query: &str) -> HttpRequest {
        let query = query.trim();
        if query.is_empty() {
            return self.build_list_all();
        }
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        get(format!("{}/products?name={encoded}", self.base_url))
    }

    pub fn build_create(&self, input: &ProductInput) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/products", self.base_url), input)
    }

    pub fn build_update(&self, id: ProductId, input: &ProductInput) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, format!("{}/products/{id}", self.base_url), input)
    }

    pub fn build_remove(&self, id: ProductId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/products/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_all(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(response)
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        parse_json(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(response)
    }

    pub fn parse_remove(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn list_all<T: Transport>(&self, transport: &T) -> Result<Vec<Product>, ApiError> {
        self.parse_list_all(transport.execute(self.build_list_all())?)
    }

    pub fn get_by_id<T: Transport>(&self, transport: &T, id: ProductId) -> Result<Product, ApiError> {
        self.parse_get_by_id(transport.execute(self.build_get_by_id(id))?)
    }

    pub fn search<T: Transport>(&self, transport: &T, query: &str) -> Result<Vec<Product>, ApiError> {
        self.parse_search(transport.execute(self.build_search(query))?)
    }

    pub fn create<T: Transport>(&self, transport: &T, input: &ProductInput) -> Result<Product, ApiError> {
        self.parse_create(transport.execute(self.build_create(input)?)?)
    }

    pub fn update<T: Transport>(
        &self,
        transport: &T,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.parse_update(transport.execute(self.build_update(id, input)?)?)
    }

    pub fn remove<T: Transport>(&self, transport: &T, id: ProductId) -> Result<(), ApiError> {
        self.parse_remove(transport.execute(self.build_remove(id))?)
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request(method: HttpMethod, path: String, input: &ProductInput) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_status(response.status, &response.body))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::types::ProductType;

    fn client() -> InventoryClient {
        InventoryClient::new("http://localhost:3000")
    }

    fn desk() -> ProductInput {
        ProductInput {
            product_name: "Desk".to_string(),
            description: "Oak".to_string(),
            product_type: ProductType::Furniture,
            quantity: 2.0,
            unit_price: 500.0,
        }
    }

    const CHAIR: &str = r#"{"id":1,"productName":"Chair","description":"Pine","productType":"Furniture","quantity":5,"unitPrice":100}"#;

    #[test]
    fn build_list_all_produces_correct_request() {
        let req = client().build_list_all();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/products");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_by_id_produces_correct_request() {
        let req = client().build_get_by_id(ProductId(42));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/products/42");
    }

    #[test]
    fn build_search_encodes_query() {
        let req = client().build_search("oak desk&co");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/products?name=oak+desk%26co");
    }

    #[test]
    fn build_search_with_blank_query_lists_all() {
        assert_eq!(client().build_search("   "), client().build_list_all());
    }

    #[test]
    fn build_create_produces_correct_request() {
        let req = client().build_create(&desk()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/products");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["productName"], "Desk");
        assert_eq!(body["productType"], "Furniture");
        assert_eq!(body["quantity"], 2.0);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_produces_correct_request() {
        let req = client().build_update(ProductId(3), &desk()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/products/3");
        assert!(req.body.is_some());
    }

    #[test]
    fn build_remove_produces_correct_request() {
        let req = client().build_remove(ProductId(3));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/products/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_all_success() {
        let products = client()
            .parse_list_all(HttpResponse::new(200, format!("[{CHAIR}]")))
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "Chair");
        assert_eq!(products[0].id, ProductId(1));
    }

    #[test]
    fn parse_search_empty_is_not_an_error() {
        let products = client().parse_search(HttpResponse::new(200, "[]")).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn parse_get_by_id_not_found() {
        let err = client().parse_get_by_id(HttpResponse::new(404, "")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn parse_create_accepts_any_2xx() {
        for status in [200, 201] {
            let product = client().parse_create(HttpResponse::new(status, CHAIR)).unwrap();
            assert_eq!(product.quantity, 5.0);
        }
    }

    #[test]
    fn parse_create_validation_failure() {
        let response = HttpResponse::new(400, r#"{"errorMessage":"Product name is required"}"#);
        let err = client().parse_create(response).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
        assert_eq!(err.server_message().as_deref(), Some("Product name is required"));
    }

    #[test]
    fn parse_list_all_server_error() {
        let err = client()
            .parse_list_all(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
    }

    #[test]
    fn parse_remove_success_and_not_found() {
        assert!(client().parse_remove(HttpResponse::new(204, "")).is_ok());
        let err = client().parse_remove(HttpResponse::new(404, "")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn parse_list_all_bad_json() {
        let err = client()
            .parse_list_all(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = InventoryClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_all().path, "http://localhost:3000/products");
    }

    /// Answers every request with a canned response and records what it saw.
    struct Canned {
        response: Result<HttpResponse, ApiError>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.response.clone()
        }
    }

    #[test]
    fn convenience_methods_run_through_transport() {
        let transport = Canned {
            response: Ok(HttpResponse::new(200, CHAIR)),
            seen: RefCell::new(Vec::new()),
        };
        let product = client().get_by_id(&transport, ProductId(1)).unwrap();
        assert_eq!(product.product_name, "Chair");
        assert_eq!(transport.seen.borrow().len(), 1);
        assert_eq!(transport.seen.borrow()[0].path, "http://localhost:3000/products/1");
    }

    #[test]
    fn transport_failure_propagates() {
        let transport = Canned {
            response: Err(ApiError::Network("refused".to_string())),
            seen: RefCell::new(Vec::new()),
        };
        let err = client().list_all(&transport).unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
