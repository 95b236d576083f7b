//! Paginated prefix listing.

use std::collections::VecDeque;

use crate::domain::errors::StoreError;
use crate::ports::outbound::{ListEntry, ObjectStore};

/// Iterator-style wrapper over the store's paginated `list` primitive.
///
/// The resume token is the last key of the previous page, so page
/// boundaries may fall anywhere in the key space without entries being
/// omitted or duplicated, even while objects are created or deleted
/// between pages.
pub(crate) struct Lister<'a, S: ObjectStore> {
    store: &'a S,
    prefix: String,
    page_size: usize,
    token: Option<String>,
    buffer: VecDeque<ListEntry>,
    exhausted: bool,
}

impl<'a, S: ObjectStore> Lister<'a, S> {
    pub(crate) fn new(store: &'a S, prefix: String, page_size: usize) -> Self {
        Self {
            store,
            prefix,
            page_size: page_size.max(1),
            token: None,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    pub(crate) fn next(&mut self) -> Result<Option<ListEntry>, StoreError> {
        loop {
            if let Some(entry) = self.buffer.pop_front() {
                return Ok(Some(entry));
            }
            if self.exhausted {
                return Ok(None);
            }
            let page = self
                .store
                .list(&self.prefix, self.token.take(), self.page_size)?;
            self.exhausted = page.next_token.is_none();
            self.token = page.next_token;
            self.buffer.extend(page.entries);
        }
    }
}
