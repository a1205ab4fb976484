//! In-memory enrichment state.

use std::collections::HashMap;

use records::{CheckpointEnvelope, EnrichmentDetails, EnrichmentRecord, RawVideoRecord};

/// The per-video enrichment ledger.
///
/// Entries are kept in first-seen order (the persisted file is stable and
/// diffable across runs); a side index maps video ids to positions for O(1)
/// lookups. Entries are never deleted.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentState {
    entries: Vec<EnrichmentRecord>,
    index: HashMap<String, usize>,
}

impl EnrichmentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted checkpoint envelope.
    pub fn from_envelope(envelope: CheckpointEnvelope) -> Self {
        let mut state = Self::new();
        for entry in envelope.result {
            state.insert(entry);
        }
        state
    }

    /// Snapshot into the persisted envelope shape.
    pub fn to_envelope(&self) -> CheckpointEnvelope {
        CheckpointEnvelope::new(self.entries.clone())
    }

    /// Register raw records: every unseen video id gets a pending entry,
    /// existing entries (resolved or not) are left untouched. Safe to call
    /// repeatedly; this is the resume entry point.
    pub fn initialize(&mut self, raw: &[RawVideoRecord]) {
        for record in raw {
            if !self.index.contains_key(&record.id) {
                self.insert(EnrichmentRecord::pending(record.id.clone()));
            }
        }
    }

    /// True iff the given id is known and its details have not been fetched.
    pub fn needs_fetch(&self, id: &str) -> bool {
        self.index
            .get(id)
            .map(|&pos| self.entries[pos].is_pending())
            .unwrap_or(false)
    }

    /// Record a fetch outcome. `Some` resolves the entry; `None` leaves it
    /// unresolved for the next run. An already-resolved entry is never
    /// overwritten.
    pub fn record_result(&mut self, id: &str, details: Option<EnrichmentDetails>) {
        if let Some(&pos) = self.index.get(id) {
            let entry = &mut self.entries[pos];
            if entry.is_pending() {
                entry.details = details;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&EnrichmentRecord> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[EnrichmentRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolved(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_pending()).count()
    }

    pub fn unresolved(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    /// Resolved details keyed by video id, as consumed by the reconciler.
    pub fn resolved_details(&self) -> HashMap<String, EnrichmentDetails> {
        self.entries
            .iter()
            .filter_map(|e| {
                e.details
                    .as_ref()
                    .map(|d| (e.id.clone(), d.clone()))
            })
            .collect()
    }

    fn insert(&mut self, entry: EnrichmentRecord) {
        // Last-writer-wins would corrupt resume state; keep the first entry.
        if self.index.contains_key(&entry.id) {
            return;
        }
        self.index.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
    }
}
