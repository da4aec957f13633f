//! Client core for the inventory service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and models the three
//! screens of the inventory UI (product list, add form, update form) as
//! state machines driven by those requests.
//!
//! # Design
//! - `InventoryClient` is stateless; it holds only `base_url`.
//! - Each API operation is split into `build_*` and `parse_*`, with
//!   convenience wrappers that run both through a `Transport`.
//! - `ListState` and `FormState` never perform I/O. Their actions return a
//!   sequence-numbered `Ticket`; the host executes it and feeds the outcome
//!   back through `Screen::receive`. Stale and post-unmount responses are
//!   dropped.
//! - User input lives in a text-only `Draft` and becomes a typed
//!   `ProductInput` only through validation.

pub mod client;
pub mod draft;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod route;
pub mod screen;
pub mod types;

pub use client::InventoryClient;
pub use draft::{Draft, DraftError, Field};
pub use error::ApiError;
pub use form::{FormMode, FormPhase, FormState};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use list::{ListPhase, ListState};
pub use route::Route;
pub use screen::{run, Screen, Ticket};
pub use types::{Product, ProductId, ProductInput, ProductType, CURRENCY};
