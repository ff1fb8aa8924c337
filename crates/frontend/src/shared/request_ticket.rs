//! Generation tokens for in-flight lookups.
//!
//! Every owner keeps its own counter; only the answer carrying the latest
//! ticket it issued is applied.

/// Identifies one in-flight lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Advance a per-owner generation counter and return its new ticket
    pub fn issue(counter: &mut u64) -> Self {
        *counter += 1;
        RequestTicket(*counter)
    }
}
