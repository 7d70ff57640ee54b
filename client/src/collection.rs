//! The in-memory copy of one remote collection and the rules for splicing
//! mutation responses into it.
//!
//! After every successful mutation the collection holds exactly one entry per
//! id: creates append, updates replace in place, deletes filter. A failed
//! call never touches the items. The network side lives in
//! [`crate::screens::ScreenCore`], which keeps the collection behind a lock
//! and only splices once a call has returned.
//!
//! Fetches are sequenced. [`RemoteCollection::begin_fetch`] hands out a
//! ticket and [`RemoteCollection::finish_fetch`] drops any response whose
//! ticket is older than the newest one issued, so the most recently started
//! fetch wins even if an earlier one resolves after it.

use youth_council_shared::Resource;

use crate::error::ApiError;

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { count: usize },
    /// A newer fetch was issued; this response was discarded.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCollection<R> {
    items: Vec<R>,
    latest_ticket: u64,
}

impl<R: Resource> Default for RemoteCollection<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            latest_ticket: 0,
        }
    }
}

impl<R: Resource> RemoteCollection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<R>) -> Self {
        Self {
            items,
            latest_ticket: 0,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&R> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.id() == Some(id))
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        FetchTicket(self.latest_ticket)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// Replace the items with a fetched list unless a newer fetch exists.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, items: Vec<R>) -> FetchOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(
                "discarding stale {} fetch #{} (latest #{})",
                R::LABEL,
                ticket.0,
                self.latest_ticket
            );
            return FetchOutcome::Stale;
        }
        let count = items.len();
        self.items = items;
        FetchOutcome::Applied {
            count,
        }
    }

    /// Append a created entity. An id already present is replaced in place
    /// instead so ids stay unique.
    pub fn apply_created(&mut self, entity: R) -> Result<(), ApiError> {
        let id = entity.id().ok_or(ApiError::MissingId(R::LABEL))?;
        match self.position(id) {
            Some(index) => self.items[index] = entity,
            None => self.items.push(entity),
        }
        Ok(())
    }

    /// Replace the entry whose id matches the returned entity. An entity the
    /// collection has never seen is appended.
    pub fn apply_updated(&mut self, entity: R) -> Result<(), ApiError> {
        let id = entity.id().ok_or(ApiError::MissingId(R::LABEL))?;
        match self.position(id) {
            Some(index) => self.items[index] = entity,
            None => {
                tracing::warn!("updated {} {id} was not in the local list", R::LABEL);
                self.items.push(entity);
            },
        }
        Ok(())
    }

    /// Remove the entry with `id`, returning it if it was present.
    pub fn apply_deleted(&mut self, id: i64) -> Option<R> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }
}
