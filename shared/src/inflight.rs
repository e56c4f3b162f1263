use std::collections::HashMap;

/// Proof that a request was started; compare it when the response lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: String,
    generation: u64,
}

/// Tracks the newest request per resource.
///
/// Starting a request for a key supersedes every earlier one for that key;
/// responses carrying a superseded ticket should be dropped.
#[derive(Debug, Default)]
pub struct InFlightTracker {
    latest: HashMap<String, u64>,
    next: u64,
}

impl InFlightTracker {
    pub fn begin(&mut self, key: &str) -> Ticket {
        self.next += 1;
        self.latest.insert(key.to_string(), self.next);
        Ticket { key: key.to_string(), generation: self.next }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.key) == Some(&ticket.generation)
    }

    /// Mark the request done. Returns whether it was still the newest one;
    /// a superseded ticket leaves the newer request tracked.
    pub fn finish(&mut self, ticket: &Ticket) -> bool {
        if self.is_current(ticket) {
            self.latest.remove(&ticket.key);
            true
        } else {
            false
        }
    }
}

/// The transaction a delete confirmation is waiting on.
///
/// `confirm` hands the id out once; a second confirmation for the same
/// request gets nothing, so one dialog sends at most one DELETE.
#[derive(Debug, Default, PartialEq)]
pub struct PendingDelete {
    id: Option<String>,
}

impl PendingDelete {
    pub fn request(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn confirm(&mut self) -> Option<String> {
        self.id.take()
    }

    pub fn cancel(&mut self) {
        self.id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut tracker = InFlightTracker::default();
        let first = tracker.begin("category:1");
        let second = tracker.begin("category:1");

        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));

        // The older response lands last and is ignored
        assert!(tracker.finish(&second));
        assert!(!tracker.finish(&first));
        assert!(!tracker.is_current(&second));
    }

    #[test]
    fn test_stale_finish_keeps_newer_request_pending() {
        let mut tracker = InFlightTracker::default();
        let first = tracker.begin("category:1");
        let second = tracker.begin("category:1");
        assert!(!tracker.finish(&first));
        assert!(tracker.is_current(&second));
        assert!(tracker.finish(&second));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut tracker = InFlightTracker::default();
        let rent = tracker.begin("category:1");
        let food = tracker.begin("category:2");
        assert!(tracker.is_current(&rent));
        assert!(tracker.is_current(&food));
    }

    #[test]
    fn test_confirm_hands_out_the_id_once() {
        let mut pending = PendingDelete::default();
        pending.request("t-7");
        assert_eq!(pending.confirm(), Some("t-7".to_string()));
        assert_eq!(pending.confirm(), None);
    }

    #[test]
    fn test_cancel_clears_the_request() {
        let mut pending = PendingDelete::default();
        pending.request("t-7");
        pending.cancel();
        assert_eq!(pending.confirm(), None);
    }

    #[test]
    fn test_new_request_replaces_the_old_one() {
        let mut pending = PendingDelete::default();
        pending.request("t-1");
        pending.request("t-2");
        assert_eq!(pending.confirm(), Some("t-2".to_string()));
        assert_eq!(pending.confirm(), None);
    }
}
