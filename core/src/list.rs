//! State of the product list screen: the fetched collection, the active
//! search and the filtered view derived from it.
//!
//! # Design
//! `ListState` is a plain value. Actions (`mount`, `submit_search`,
//! `delete`) update it and hand back the `Ticket` to execute; outcomes come
//! back through `Screen::receive`. The collection is always replaced
//! wholesale, never patched.

use tracing::{debug, info};

use crate::client::InventoryClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::screen::{InFlight, Screen, Ticket};
use crate::types::{Product, ProductId};

pub const LOAD_FAILED: &str = "Failed to load products.";
pub const SEARCH_FAILED: &str = "Failed to search products.";
pub const DELETE_FAILED: &str = "Failed to delete product.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListOp {
    Load,
    Search,
    Delete(ProductId),
    /// The reload issued after a successful delete.
    Refresh,
}

#[derive(Debug)]
pub struct ListState {
    client: InventoryClient,
    phase: ListPhase,
    products: Vec<Product>,
    filtered: Vec<Product>,
    query: String,
    error: Option<String>,
    /// A full collection has arrived at least once.
    loaded: bool,
    inflight: InFlight<ListOp>,
}

impl ListState {
    pub fn new(client: InventoryClient) -> Self {
        Self {
            client,
            phase: ListPhase::Idle,
            products: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            error: None,
            loaded: false,
            inflight: InFlight::new(),
        }
    }

    /// Load the full collection.
    pub fn mount(&mut self) -> Ticket {
        self.inflight.mount();
        let request = self.client.build_list_all();
        self.begin(ListOp::Load, request)
    }

    /// Search by product name. A blank query behaves like `reset_search`.
    pub fn submit_search(&mut self, query: &str) -> Option<Ticket> {
        if query.trim().is_empty() {
            return self.reset_search();
        }
        self.query = query.to_string();
        let request = self.client.build_search(query);
        Some(self.begin(ListOp::Search, request))
    }

    /// Clear the query and show the full collection again.
    ///
    /// Only a pending search is abandoned. A load, refresh or delete keeps
    /// running, and if no collection has ever arrived it is requested again
    /// instead of presenting an empty list as loaded.
    pub fn reset_search(&mut self) -> Option<Ticket> {
        self.query.clear();
        match self.inflight.pending_op() {
            Some(ListOp::Load | ListOp::Refresh) => None,
            Some(ListOp::Delete(_)) => {
                self.filtered = self.products.clone();
                None
            }
            Some(ListOp::Search) | None if !self.loaded => {
                let request = self.client.build_list_all();
                Some(self.begin(ListOp::Load, request))
            }
            Some(ListOp::Search) | None => {
                self.inflight.cancel();
                self.filtered = self.products.clone();
                self.error = None;
                self.phase = ListPhase::Loaded;
                None
            }
        }
    }

    /// Delete a product; on success the collection is reloaded.
    ///
    /// A search still in flight is abandoned along with its query.
    pub fn delete(&mut self, id: ProductId) -> Ticket {
        if self.inflight.pending_op() == Some(ListOp::Search) {
            self.query.clear();
            self.filtered = self.products.clone();
        }
        let request = self.client.build_remove(id);
        self.begin(ListOp::Delete(id), request)
    }

    pub fn unmount(&mut self) {
        self.inflight.unmount();
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.inflight.is_pending()
    }

    /// Every product from the last successful load.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The products currently on screen.
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A search completed but matched nothing.
    pub fn no_matches(&self) -> bool {
        self.phase == ListPhase::Loaded && !self.query.trim().is_empty() && self.filtered.is_empty()
    }

    fn begin(&mut self, op: ListOp, request: HttpRequest) -> Ticket {
        self.phase = ListPhase::Loading;
        self.error = None;
        self.inflight.issue(op, request)
    }

    fn fail(&mut self, err: ApiError, fallback: &str) {
        debug!(error = %err, "list request failed");
        self.error = Some(err.user_message(fallback));
        self.phase = ListPhase::Failed;
    }
}

impl Screen for ListState {
    fn receive(&mut self, seq: u64, outcome: Result<HttpResponse, ApiError>) -> Option<Ticket> {
        let op = self.inflight.resolve(seq)?;
        match op {
            ListOp::Load | ListOp::Refresh => {
                match outcome.and_then(|r| self.client.parse_list_all(r)) {
                    Ok(products) => {
                        debug!(count = products.len(), "products loaded");
                        self.filtered = products.clone();
                        self.products = products;
                        self.loaded = true;
                        self.phase = ListPhase::Loaded;
                    }
                    Err(err) => {
                        self.filtered.clear();
                        self.fail(err, LOAD_FAILED);
                    }
                }
            }
            ListOp::Search => match outcome.and_then(|r| self.client.parse_search(r)) {
                Ok(found) => {
                    debug!(query = %self.query, count = found.len(), "search finished");
                    self.filtered = found;
                    self.phase = ListPhase::Loaded;
                }
                Err(err) => {
                    self.filtered.clear();
                    self.fail(err, SEARCH_FAILED);
                }
            },
            ListOp::Delete(id) => match outcome.and_then(|r| self.client.parse_remove(r)) {
                Ok(()) => {
                    info!(%id, "product deleted");
                    self.query.clear();
                    let request = self.client.build_list_all();
                    return Some(self.begin(ListOp::Refresh, request));
                }
                Err(err) => self.fail(err, DELETE_FAILED),
            },
        }
        None
    }
}
