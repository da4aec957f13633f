//! The three screens and their URL paths.

use std::fmt;

use crate::types::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/add-product`
    AddProduct,
    /// `/update-product/:id`
    UpdateProduct(ProductId),
}

impl Route {
    /// Match a path against the known routes. A trailing slash is ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::List),
            "/add-product" => Some(Route::AddProduct),
            _ => {
                let id = trimmed.strip_prefix("/update-product/")?;
                id.parse().ok().map(Route::UpdateProduct)
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::AddProduct => "/add-product".to_string(),
            Route::UpdateProduct(id) => format!("/update-product/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::List));
        assert_eq!(Route::parse(""), Some(Route::List));
        assert_eq!(Route::parse("/add-product"), Some(Route::AddProduct));
        assert_eq!(Route::parse("/add-product/"), Some(Route::AddProduct));
        assert_eq!(
            Route::parse("/update-product/17"),
            Some(Route::UpdateProduct(ProductId(17)))
        );
        assert_eq!(Route::parse("/?tab=all"), Some(Route::List));
    }

    #[test]
    fn rejects_unknown_paths() {
        assert_eq!(Route::parse("/update-product/"), None);
        assert_eq!(Route::parse("/update-product/abc"), None);
        assert_eq!(Route::parse("/products"), None);
    }

    #[test]
    fn path_matches_parse() {
        for route in [Route::List, Route::AddProduct, Route::UpdateProduct(ProductId(5))] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }
}
