//! Request bookkeeping shared by the list and form state machines.
//!
//! # Design
//! A screen never performs I/O. Every action that needs the network returns
//! a `Ticket`: the request plus a sequence number. The host executes the
//! request and feeds the outcome back through `Screen::receive` with the
//! same number. Sequence numbers increase monotonically per screen and only
//! the most recently issued one is accepted, so a superseded request that
//! resolves late is dropped instead of overwriting newer state. Once a
//! screen is unmounted every response is dropped.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// A request issued by a screen, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub request: HttpRequest,
}

/// A screen state machine that consumes request outcomes.
pub trait Screen {
    /// Apply the outcome of the request issued as `seq`.
    ///
    /// Returns a follow-up request when the outcome triggers one (the list
    /// refresh after a delete, for instance).
    fn receive(&mut self, seq: u64, outcome: Result<HttpResponse, ApiError>) -> Option<Ticket>;
}

/// Execute `ticket` and every follow-up request it triggers, in order.
pub fn run<S, T>(screen: &mut S, transport: &T, ticket: Option<Ticket>)
where
    S: Screen + ?Sized,
    T: Transport + ?Sized,
{
    let mut next = ticket;
    while let Some(Ticket { seq, request }) = next.take() {
        debug!(seq, method = request.method.as_str(), path = %request.path, "executing request");
        let outcome = transport.execute(request);
        next = screen.receive(seq, outcome);
    }
}

/// Tracks the single request a screen is waiting on.
#[derive(Debug)]
pub(crate) struct InFlight<Op> {
    last_seq: u64,
    pending: Option<(u64, Op)>,
    mounted: bool,
}

impl<Op: Copy + std::fmt::Debug> InFlight<Op> {
    pub(crate) fn new() -> Self {
        Self {
            last_seq: 0,
            pending: None,
            mounted: true,
        }
    }

    /// Issue a new request, superseding whatever was pending.
    pub(crate) fn issue(&mut self, op: Op, request: HttpRequest) -> Ticket {
        self.last_seq += 1;
        if let Some((stale, previous)) = self.pending.replace((self.last_seq, op)) {
            debug!(stale, ?previous, "superseding in-flight request");
        }
        Ticket {
            seq: self.last_seq,
            request,
        }
    }

    /// Forget the pending request; its response will be dropped.
    pub(crate) fn cancel(&mut self) {
        if let Some((stale, op)) = self.pending.take() {
            debug!(stale, ?op, "cancelling in-flight request");
        }
    }

    /// Claim the pending operation if `seq` is the one being waited on.
    pub(crate) fn resolve(&mut self, seq: u64) -> Option<Op> {
        if !self.mounted {
            debug!(seq, "dropping response for unmounted screen");
            return None;
        }
        match self.pending {
            Some((pending, op)) if pending == seq => {
                self.pending = None;
                Some(op)
            }
            _ => {
                debug!(seq, latest = self.last_seq, "dropping stale response");
                None
            }
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The operation currently being waited on, if any.
    pub(crate) fn pending_op(&self) -> Option<Op> {
        self.pending.map(|(_, op)| op)
    }

    pub(crate) fn mount(&mut self) {
        self.mounted = true;
    }

    pub(crate) fn unmount(&mut self) {
        self.mounted = false;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "http://localhost:3000/products".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn sequence_numbers_increase() {
        let mut inflight = InFlight::new();
        let a = inflight.issue('a', request());
        let b = inflight.issue('b', request());
        assert!(b.seq > a.seq);
    }

    #[test]
    fn only_latest_request_resolves() {
        let mut inflight = InFlight::new();
        let a = inflight.issue('a', request());
        let b = inflight.issue('b', request());
        assert_eq!(inflight.resolve(a.seq), None);
        assert!(inflight.is_pending());
        assert_eq!(inflight.resolve(b.seq), Some('b'));
        assert!(!inflight.is_pending());
        assert_eq!(inflight.resolve(b.seq), None);
    }

    #[test]
    fn cancelled_request_does_not_resolve() {
        let mut inflight = InFlight::new();
        let a = inflight.issue('a', request());
        inflight.cancel();
        assert_eq!(inflight.resolve(a.seq), None);
    }

    #[test]
    fn unmounted_screen_drops_everything() {
        let mut inflight = InFlight::new();
        let a = inflight.issue('a', request());
        inflight.unmount();
        assert_eq!(inflight.resolve(a.seq), None);
    }
}
