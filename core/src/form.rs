//! State of the add and update product forms.
//!
//! # Design
//! Both screens share one `FormState`; `FormMode` decides whether submit
//! creates or updates and whether delete is available. The update form
//! starts in `FetchingExisting` and fills its draft from the fetched
//! product. Validation runs synchronously inside `submit`, so a rejected
//! draft never produces a request. After a failed submit the draft is left
//! untouched for correction and resubmission.

use tracing::{debug, info};

use crate::client::InventoryClient;
use crate::draft::{Draft, Field};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::route::Route;
use crate::screen::{InFlight, Screen, Ticket};
use crate::types::{Product, ProductId};

pub const ADD_FAILED: &str = "Failed to add product.";
pub const UPDATE_FAILED: &str = "Failed to update product.";
pub const DELETE_FAILED: &str = "Failed to delete product.";
pub const NOT_FOUND: &str = "Product not found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Update(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Loading the product an update form edits.
    FetchingExisting,
    /// The product to edit could not be loaded.
    NotFound,
    Editing,
    Submitting,
    Deleting,
    /// Saved or deleted; the screen should return to the list.
    Succeeded,
    /// The server rejected the last submit or delete.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormOp {
    Fetch,
    Submit,
    Delete,
}

#[derive(Debug)]
pub struct FormState {
    client: InventoryClient,
    mode: FormMode,
    draft: Draft,
    phase: FormPhase,
    error: Option<String>,
    saved: Option<Product>,
    inflight: InFlight<FormOp>,
}

impl FormState {
    /// An empty form for a new product.
    pub fn add(client: InventoryClient) -> Self {
        Self::with_mode(client, FormMode::Add, FormPhase::Editing)
    }

    /// A form for editing `id`, with the request that loads it.
    pub fn update(client: InventoryClient, id: ProductId) -> (Self, Ticket) {
        let mut state = Self::with_mode(client, FormMode::Update(id), FormPhase::FetchingExisting);
        let request = state.client.build_get_by_id(id);
        let ticket = state.inflight.issue(FormOp::Fetch, request);
        (state, ticket)
    }

    fn with_mode(client: InventoryClient, mode: FormMode, phase: FormPhase) -> Self {
        Self {
            client,
            mode,
            draft: Draft::default(),
            phase,
            error: None,
            saved: None,
            inflight: InFlight::new(),
        }
    }

    /// Edit one field. Returns false when the form is not editable (a
    /// request is in flight, or there is nothing to edit).
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.draft.set(field, value);
        true
    }

    /// Validate the draft and, if it passes, issue the create or update.
    ///
    /// A validation failure sets the error message and returns `None`.
    pub fn submit(&mut self) -> Option<Ticket> {
        if !self.is_editable() {
            return None;
        }
        let input = match self.draft.validate() {
            Ok(input) => input,
            Err(err) => {
                debug!(error = %err, "draft rejected");
                self.error = Some(err.to_string());
                self.phase = FormPhase::Editing;
                return None;
            }
        };
        let built = match self.mode {
            FormMode::Add => self.client.build_create(&input),
            FormMode::Update(id) => self.client.build_update(id, &input),
        };
        match built {
            Ok(request) => Some(self.begin(FormOp::Submit, FormPhase::Submitting, request)),
            Err(err) => {
                self.fail(err, self.submit_fallback());
                None
            }
        }
    }

    /// Delete the product being edited. Only available on the update form.
    pub fn delete(&mut self) -> Option<Ticket> {
        let FormMode::Update(id) = self.mode else {
            return None;
        };
        if !self.is_editable() {
            return None;
        }
        let request = self.client.build_remove(id);
        Some(self.begin(FormOp::Delete, FormPhase::Deleting, request))
    }

    pub fn unmount(&mut self) {
        self.inflight.unmount();
    }

    /// Where the screen should go next, once the form is done.
    pub fn navigation(&self) -> Option<Route> {
        (self.phase == FormPhase::Succeeded).then_some(Route::List)
    }

    /// The route this form is shown under.
    pub fn route(&self) -> Route {
        match self.mode {
            FormMode::Add => Route::AddProduct,
            FormMode::Update(id) => Route::UpdateProduct(id),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.inflight.is_pending()
    }

    /// The product returned by a successful create or update.
    pub fn saved(&self) -> Option<&Product> {
        self.saved.as_ref()
    }

    fn is_editable(&self) -> bool {
        matches!(self.phase, FormPhase::Editing | FormPhase::Failed)
    }

    fn submit_fallback(&self) -> &'static str {
        match self.mode {
            FormMode::Add => ADD_FAILED,
            FormMode::Update(_) => UPDATE_FAILED,
        }
    }

    fn begin(&mut self, op: FormOp, phase: FormPhase, request: HttpRequest) -> Ticket {
        self.phase = phase;
        self.error = None;
        self.inflight.issue(op, request)
    }

    fn fail(&mut self, err: ApiError, fallback: &str) {
        debug!(error = %err, "form request failed");
        self.error = Some(err.user_message(fallback));
        self.phase = FormPhase::Failed;
    }
}

impl Screen for FormState {
    fn receive(&mut self, seq: u64, outcome: Result<HttpResponse, ApiError>) -> Option<Ticket> {
        let op = self.inflight.resolve(seq)?;
        match op {
            FormOp::Fetch => match outcome.and_then(|r| self.client.parse_get_by_id(r)) {
                Ok(product) => {
                    self.draft = Draft::from_product(&product);
                    self.phase = FormPhase::Editing;
                }
                Err(err) => {
                    debug!(error = %err, "product to edit could not be loaded");
                    self.error = Some(err.user_message(NOT_FOUND));
                    self.phase = FormPhase::NotFound;
                }
            },
            FormOp::Submit => {
                let parsed = match self.mode {
                    FormMode::Add => outcome.and_then(|r| self.client.parse_create(r)),
                    FormMode::Update(_) => outcome.and_then(|r| self.client.parse_update(r)),
                };
                match parsed {
                    Ok(product) => {
                        info!(id = %product.id, mode = ?self.mode, "product saved");
                        self.saved = Some(product);
                        self.phase = FormPhase::Succeeded;
                    }
                    Err(err) => self.fail(err, self.submit_fallback()),
                }
            }
            FormOp::Delete => match outcome.and_then(|r| self.client.parse_remove(r)) {
                Ok(()) => {
                    info!(mode = ?self.mode, "product deleted");
                    self.phase = FormPhase::Succeeded;
                }
                Err(err) => self.fail(err, DELETE_FAILED),
            },
        }
        None
    }
}
