//! Keeps repeated clicks on one submission from producing parallel analyses.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Set of submission ids whose analysis is currently running.
#[derive(Clone, Default)]
pub struct SubmissionGate {
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

/// Held for the lifetime of one analysis; releases the id on drop.
pub struct InFlight {
    gate: SubmissionGate,
    id: Uuid,
}

impl SubmissionGate {
    /// Returns `None` if `id` is already running.
    pub fn try_begin(&self, id: Uuid) -> Option<InFlight> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        in_flight.insert(id).then(|| InFlight {
            gate: self.clone(),
            id,
        })
    }

    #[cfg(test)]
    pub fn is_in_flight(&self, id: Uuid) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&id)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.gate
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.id);
    }
}
