//! The last record list fetched from the server.
//!
//! Refreshes are never patched in place: a successful `list` replaces the
//! whole snapshot. Each refresh is issued a [`RefreshTicket`] carrying a
//! monotonically increasing sequence number, and a response is only applied
//! when its ticket is newer than the last one applied. This keeps a slow,
//! stale `list` from overwriting the result of a later one.

use super::record::{Record, RecordId};

/// Sequence number handed out when a refresh starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    /// Raw sequence number, for logging.
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Whether a refresh response replaced the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was the newest seen and now backs the table.
    Applied,
    /// A newer response was already applied; this one was dropped.
    Stale,
}

/// Ordered records currently displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSnapshot {
    records: Vec<Record>,
    last_issued: u64,
    last_applied: u64,
}

impl CollectionSnapshot {
    /// Reserve the next sequence number for a refresh about to be sent.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.last_issued += 1;
        RefreshTicket(self.last_issued)
    }

    /// Replace the snapshot with `records` unless a newer refresh already
    /// landed.
    ///
    /// # Examples
    /// ```
    /// use records_console::domain::{CollectionSnapshot, RefreshOutcome};
    ///
    /// let mut snapshot = CollectionSnapshot::default();
    /// let older = snapshot.begin_refresh();
    /// let newer = snapshot.begin_refresh();
    /// assert_eq!(snapshot.apply(newer, Vec::new()), RefreshOutcome::Applied);
    /// assert_eq!(snapshot.apply(older, Vec::new()), RefreshOutcome::Stale);
    /// ```
    pub fn apply(&mut self, ticket: RefreshTicket, records: Vec<Record>) -> RefreshOutcome {
        if ticket.0 <= self.last_applied {
            return RefreshOutcome::Stale;
        }
        self.last_applied = ticket.0;
        self.records = records;
        RefreshOutcome::Applied
    }

    /// Records in server order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Look a record up by identifier.
    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Record at a 1-based table position.
    pub fn at_position(&self, position: usize) -> Option<&Record> {
        position
            .checked_sub(1)
            .and_then(|index| self.records.get(index))
    }

    /// Number of records displayed.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are displayed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
