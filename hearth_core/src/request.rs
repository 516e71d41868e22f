// Copyright 2025 the Hearth Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stale-response rejection for dataset fetches.

/// Identifies one issued fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Returns the raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing [`RequestTicket`]s.
///
/// Only the newest ticket is accepted, so a slow response to an older request can never
/// overwrite state produced by a newer one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestGate {
    latest: u64,
}

impl RequestGate {
    /// Creates a gate that has issued no tickets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a new request; every earlier ticket becomes stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.latest = self.latest.wrapping_add(1);
        RequestTicket(self.latest)
    }

    /// Returns `true` if `ticket` is the newest one issued.
    pub fn accepts(&self, ticket: RequestTicket) -> bool {
        self.latest != 0 && ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_newest_ticket_is_accepted() {
        let mut gate = RequestGate::new();
        let first = gate.begin();
        assert!(gate.accepts(first));
        let second = gate.begin();
        assert!(!gate.accepts(first));
        assert!(gate.accepts(second));
        assert!(second > first);
    }
}
