/*!
 * Batch planning for structured translations.
 *
 * Large key sets are split into consecutive, order-preserving chunks so that
 * each provider call stays within a manageable size.
 */

use crate::document::Entries;

/// Splits an ordered mapping into fixed-size batches
#[derive(Debug, Clone, Copy)]
pub struct BatchPlanner {
    /// Maximum keys per batch; 0 disables pagination
    max_items_per_batch: usize,
}

impl BatchPlanner {
    /// Create a planner; `0` means a single batch holding every entry
    pub fn new(max_items_per_batch: usize) -> Self {
        Self { max_items_per_batch }
    }

    /// Whether more than one batch may be produced
    pub fn is_paginated(&self) -> bool {
        self.max_items_per_batch > 0
    }

    /// Lazily partition `entries` into batches.
    ///
    /// The returned iterator borrows `entries`; planning is deterministic, so
    /// cloning an unstarted plan (or planning again) replays the same batches.
    pub fn plan<'a>(&self, entries: &'a Entries) -> Batches<'a> {
        let size = if self.is_paginated() {
            self.max_items_per_batch
        } else {
            entries.len().max(1)
        };
        Batches {
            entries,
            size,
            paginated: self.is_paginated(),
            offset: 0,
            emitted: false,
        }
    }

    /// Number of batches `plan` yields for `len` entries
    pub fn batch_count(&self, len: usize) -> usize {
        if !self.is_paginated() {
            1
        } else {
            len.div_ceil(self.max_items_per_batch)
        }
    }
}

/// Iterator over consecutive batches of an ordered mapping
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    entries: &'a Entries,
    size: usize,
    paginated: bool,
    offset: usize,
    emitted: bool,
}

impl Iterator for Batches<'_> {
    type Item = Entries;

    fn next(&mut self) -> Option<Self::Item> {
        // An unpaginated plan always yields exactly one batch, even when empty
        if self.offset >= self.entries.len() && (self.paginated || self.emitted) {
            return None;
        }

        let batch: Entries = self
            .entries
            .iter()
            .skip(self.offset)
            .take(self.size)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        self.offset += self.size;
        self.emitted = true;
        Some(batch)
    }
}
