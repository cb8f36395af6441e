//! Per-slot request ownership
//!
//! A slot hands out one ticket per request. Starting a new request cancels
//! the previous ticket's token and retires its generation, so a late reply
//! from the old request fails `is_current` and is never committed.

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Ownership proof for one request issued through a [`RequestSlot`].
#[derive(Debug, Clone)]
pub struct SlotTicket {
    generation: u64,
    token: CancellationToken,
}

impl SlotTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// A logical "current request" position that at most one request owns.
///
/// Starting a new request cancels the previous owner's token and bumps the
/// generation, so a superseded request can neither keep running nor commit.
#[derive(Debug)]
pub struct RequestSlot {
    name: &'static str,
    generation: u64,
    token: Option<CancellationToken>,
}

impl RequestSlot {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: 0,
            token: None,
        }
    }

    /// Supersede whatever is in flight and hand out the ticket for a new request
    pub fn begin(&mut self) -> SlotTicket {
        self.invalidate();
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        SlotTicket {
            generation: self.generation,
            token,
        }
    }

    /// Supersede whatever is in flight without starting anything new
    pub fn invalidate(&mut self) {
        if let Some(token) = self.token.take() {
            if !token.is_cancelled() {
                debug!("Cancelling in-flight {} request (generation {})", self.name, self.generation);
            }
            token.cancel();
        }
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: &SlotTicket) -> bool {
        ticket.generation == self.generation && !ticket.token.is_cancelled()
    }

    /// Whether a request currently owns the slot
    pub fn is_in_flight(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Release the token after the owner committed, keeping the generation
    pub fn finish(&mut self, ticket: &SlotTicket) {
        if self.is_current(ticket) {
            self.token = None;
        }
    }
}
