use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{ParsedSamples, ReshapedSeries, SeriesDescriptor, SeriesId, merge, reshape};

use super::ViewportStateMachine;

/// Identity of one in-flight sample request.
///
/// A response is only merged while its key still matches the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchKey {
    pub feed_id: SeriesId,
    pub window_start: f64,
    pub window_duration: f64,
    pub interval_seconds: f64,
}

/// What the host should fetch for one feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub key: FetchKey,
    pub descriptor: SeriesDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// Accepted; other requests of the batch are still in flight.
    Pending,
    /// Accepted and the whole batch merged into the loaded frame.
    Merged,
    /// Dropped: the viewport moved on or the request was already settled.
    Stale,
}

#[derive(Debug)]
struct FetchSlot {
    key: FetchKey,
    descriptor: SeriesDescriptor,
    result: Option<ReshapedSeries>,
}

/// Requests issued for the current window, keyed by feed.
#[derive(Debug, Default)]
pub(super) struct FetchBatch {
    slots: IndexMap<SeriesId, FetchSlot>,
}

impl FetchBatch {
    pub(super) fn clear(&mut self) {
        self.slots.clear();
    }

    pub(super) fn remove(&mut self, id: &SeriesId) {
        self.slots.shift_remove(id);
    }

    fn is_complete(&self) -> bool {
        !self.slots.is_empty() && self.slots.values().all(|slot| slot.result.is_some())
    }

    fn pending_keys(&self) -> Vec<FetchKey> {
        self.slots
            .values()
            .filter(|slot| slot.result.is_none())
            .map(|slot| slot.key.clone())
            .collect()
    }

    fn take_results(&mut self) -> Vec<ReshapedSeries> {
        self.slots
            .drain(..)
            .filter_map(|(_, slot)| slot.result)
            .collect()
    }
}

impl ViewportStateMachine {
    /// Key a request for `feed_id` must carry right now.
    #[must_use]
    pub fn fetch_key_for(&self, feed_id: &SeriesId) -> Option<FetchKey> {
        self.feeds.contains_key(feed_id).then(|| FetchKey {
            feed_id: feed_id.clone(),
            window_start: self.state.window_start,
            window_duration: self.state.window_duration,
            interval_seconds: self.state.interval_seconds,
        })
    }

    /// Starts a batch: one request per active feed for the current window.
    ///
    /// Any batch still in flight is abandoned.
    pub fn begin_fetch(&mut self) -> Vec<FetchRequest> {
        self.fetch.clear();

        let requests: Vec<FetchRequest> = self
            .feeds
            .values()
            .filter_map(|feed| {
                Some(FetchRequest {
                    key: self.fetch_key_for(&feed.info.id)?,
                    descriptor: feed.descriptor(),
                })
            })
            .collect();

        for request in &requests {
            self.fetch.slots.insert(
                request.key.feed_id.clone(),
                FetchSlot {
                    key: request.key.clone(),
                    descriptor: request.descriptor.clone(),
                    result: None,
                },
            );
        }
        debug!(requests = requests.len(), "fetch batch started");
        requests
    }

    /// Requests of the current batch still awaiting a response.
    #[must_use]
    pub fn pending_fetches(&self) -> Vec<FetchKey> {
        self.fetch.pending_keys()
    }

    /// Settles a request with its samples.
    pub fn receive_samples(&mut self, key: &FetchKey, parsed: &ParsedSamples) -> FetchOutcome {
        let Some(slot) = self.open_slot(key) else {
            debug!(feed = %key.feed_id, "discarding stale fetch response");
            return FetchOutcome::Stale;
        };
        slot.result = Some(reshape(slot.descriptor.clone(), parsed));
        self.finish_settle()
    }

    /// Settles a failed request as an empty series so the batch can complete.
    pub fn receive_failure(&mut self, key: &FetchKey) -> FetchOutcome {
        let Some(slot) = self.open_slot(key) else {
            debug!(feed = %key.feed_id, "discarding stale fetch failure");
            return FetchOutcome::Stale;
        };
        warn!(feed = %key.feed_id, "feed fetch failed, plotting it empty");
        slot.result = Some(ReshapedSeries {
            points: Vec::new(),
            descriptor: slot.descriptor.clone(),
            skipped: 0,
        });
        self.finish_settle()
    }

    pub(super) fn invalidate_fetches(&mut self) {
        if !self.fetch.slots.is_empty() {
            debug!(abandoned = self.fetch.slots.len(), "fetch batch invalidated");
        }
        self.fetch.clear();
    }

    /// Merges the batch into the loaded frame once every request settled.
    pub(super) fn try_complete_fetch(&mut self) -> bool {
        if !self.fetch.is_complete() {
            return false;
        }
        self.loaded = Some(merge(self.fetch.take_results()));
        true
    }

    fn open_slot(&mut self, key: &FetchKey) -> Option<&mut FetchSlot> {
        if self.fetch_key_for(&key.feed_id).as_ref() != Some(key) {
            return None;
        }
        self.fetch
            .slots
            .get_mut(&key.feed_id)
            .filter(|slot| &slot.key == key && slot.result.is_none())
    }

    fn finish_settle(&mut self) -> FetchOutcome {
        if self.try_complete_fetch() {
            FetchOutcome::Merged
        } else {
            FetchOutcome::Pending
        }
    }
}
