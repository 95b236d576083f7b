//! Block I/O: put, get, touch, mtime, index.

use std::cmp::Ordering;
use std::io::Write;

use tracing::{debug, info, warn};

use super::index::Lister;
use super::*;
use crate::domain::errors::VolumeError;
use crate::domain::locator::Locator;
use crate::domain::markers::{self, RECENT_PREFIX};
use crate::domain::policy::{self, ReadFallback};
use crate::domain::Timestamp;
use crate::ports::inbound::VolumeApi;

impl<S, C> VolumeApi for VolumeService<S, C>
where
    S: ObjectStore,
    C: Clock,
{
    fn put(&mut self, locator: &Locator, data: &[u8]) -> Result<(), VolumeError> {
        self.require_writable()?;
        let actual = Locator::from_content(data);
        if actual != *locator {
            return Err(VolumeError::LocatorMismatch {
                expected: locator.clone(),
                actual,
            });
        }
        // Data first, then the marker: a crash in between leaves a readable
        // block whose missing marker protects it from Trash.
        self.store
            .put(&markers::data_key(locator), data, OCTET_STREAM)?;
        self.write_recent_marker(locator)?;
        debug!(%locator, size = data.len(), "stored block");
        Ok(())
    }

    fn get(&self, locator: &Locator) -> Result<Vec<u8>, VolumeError> {
        if let Some(bytes) = self.store.get(&markers::data_key(locator))? {
            if !locator.matches(&bytes) {
                return Err(VolumeError::Corrupt {
                    locator: locator.clone(),
                    detail: "data object does not hash to its locator".to_string(),
                });
            }
            return Ok(bytes);
        }
        let Some(trash) = self.store.head(&markers::trash_key(locator))? else {
            return Err(VolumeError::NotFound(locator.clone()));
        };
        let recent = self.store.head(&markers::recent_key(locator))?;
        let fallback = policy::decide_read_fallback(
            trash.modified,
            recent.map(|info| info.modified),
            &self.config,
        );
        match fallback {
            ReadFallback::Rescue => {
                info!(%locator, "data object missing, serving trash copy written within the race window");
                match self.read_trash_copy(locator)? {
                    Some(bytes) => Ok(bytes),
                    None => Err(VolumeError::NotFound(locator.clone())),
                }
            }
            ReadFallback::Missing => Err(VolumeError::NotFound(locator.clone())),
        }
    }

    fn touch(&mut self, locator: &Locator) -> Result<(), VolumeError> {
        self.require_writable()?;
        if self.store.head(&markers::data_key(locator))?.is_none() {
            // The data object may have been trashed out from under a writer
            // that still wants it; restore it when the markers say so.
            let trash = self.store.head(&markers::trash_key(locator))?;
            let recent = self.store.head(&markers::recent_key(locator))?;
            let rescued = match trash {
                Some(t) => {
                    let fallback = policy::decide_read_fallback(
                        t.modified,
                        recent.map(|info| info.modified),
                        &self.config,
                    );
                    fallback == ReadFallback::Rescue && self.restore_from_trash(locator)?
                }
                None => false,
            };
            if !rescued {
                return Err(VolumeError::NotFound(locator.clone()));
            }
            warn!(%locator, "restored block that was trashed during a concurrent write");
        }
        self.write_recent_marker(locator)
    }

    fn mtime(&self, locator: &Locator) -> Result<Timestamp, VolumeError> {
        let Some(data) = self.store.head(&markers::data_key(locator))? else {
            return Err(VolumeError::NotFound(locator.clone()));
        };
        match self.store.head(&markers::recent_key(locator))? {
            Some(recent) => Ok(recent.modified),
            // Blocks written before the marker scheme have no recency
            // marker; the write time is the best available proxy.
            None => Ok(data.modified),
        }
    }

    fn index_to(&self, prefix: &str, sink: &mut dyn Write) -> Result<(), VolumeError> {
        let page_size = self.config.index_page_size;
        let mut data_keys = Lister::new(&self.store, prefix.to_string(), page_size);
        let mut recent_keys =
            Lister::new(&self.store, format!("{RECENT_PREFIX}{prefix}"), page_size);

        // Merge join: both listings are key-ordered, so one pass over each
        // pairs every data object with its recency marker, if any.
        let mut recent = recent_keys.next()?;
        while let Some(entry) = data_keys.next()? {
            // An unanchored listing eventually walks into the marker key
            // space; locator keys all sort before "recent/".
            if entry.key.as_str() >= RECENT_PREFIX {
                break;
            }
            let Ok(locator) = Locator::parse(&entry.key) else {
                continue;
            };
            let mut stamp = entry.modified;
            loop {
                let (order, marker_mtime) = match &recent {
                    None => break,
                    Some(marker) => {
                        let suffix = marker
                            .key
                            .strip_prefix(RECENT_PREFIX)
                            .unwrap_or(&marker.key);
                        (suffix.cmp(entry.key.as_str()), marker.modified)
                    }
                };
                match order {
                    Ordering::Less => recent = recent_keys.next()?,
                    Ordering::Equal => {
                        stamp = marker_mtime;
                        recent = recent_keys.next()?;
                        break;
                    }
                    Ordering::Greater => break,
                }
            }
            writeln!(sink, "{}+{} {}", locator, entry.size, stamp)?;
        }
        Ok(())
    }
}
