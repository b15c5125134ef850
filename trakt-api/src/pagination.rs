//! Multi-page retrieval over a [`PagedRoute`].
//!
//! Two modes, both driven by the same rule: page 1 is fetched first to
//! learn the page count, then pages 2..=count fan out under bounded
//! concurrency.
//!
//! - [`PagedRoute::fetch_all_pages`] merges every page into one
//!   deduplicated set. Any page failure fails the whole call.
//! - [`PagedRoute::stream_pages`] yields one `Vec<T>` per page in strict
//!   ascending page order, buffering out-of-order completions. Dropping
//!   the stream cancels all in-flight fetches.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use trakt_core::constants::DEFAULT_MAX_CONCURRENT_PAGE_REQUESTS;
use trakt_core::error::{TraktError, TraktResult};

use crate::route::PagedRoute;

impl<T> PagedRoute<T>
where
    T: DeserializeOwned + Eq + Hash + Send + 'static,
{
    /// [`Self::fetch_all_pages_bounded`] with the default concurrency
    /// limit.
    pub async fn fetch_all_pages(self) -> TraktResult<HashSet<T>> {
        self.fetch_all_pages_bounded(DEFAULT_MAX_CONCURRENT_PAGE_REQUESTS)
            .await
    }

    /// Fetch every page and merge the items into one deduplicated set.
    ///
    /// Pages 2..=count are pulled from a shared work queue by at most
    /// `max_concurrent` workers, so a finished fetch immediately starts
    /// the next pending page. The first page error aborts the remaining
    /// fetches and surfaces.
    pub async fn fetch_all_pages_bounded(self, max_concurrent: usize) -> TraktResult<HashSet<T>> {
        let first = self.clone().page(1).perform().await?;
        let page_count = first.page_count;
        let mut items: HashSet<T> = first.items.into_iter().collect();
        if page_count <= 1 {
            return Ok(items);
        }

        let workers = max_concurrent.max(1).min(page_count as usize - 1);
        debug!(page_count, workers, "fanning out page fetches");

        // Workers pull the next pending page index from a shared counter.
        let next_page = Arc::new(AtomicU32::new(2));
        let mut join_set: JoinSet<TraktResult<Vec<T>>> = JoinSet::new();
        for _ in 0..workers {
            let route = self.clone();
            let next_page = Arc::clone(&next_page);
            join_set.spawn(async move {
                let mut fetched: Vec<T> = Vec::new();
                loop {
                    let page = next_page.fetch_add(1, Ordering::SeqCst);
                    if page > page_count {
                        return Ok(fetched);
                    }
                    let paged = route.clone().page(page).perform().await?;
                    fetched.extend(paged.items);
                }
            });
        }

        while let Some(joined) = join_set.join_next().await {
            let fetched = joined
                .map_err(|e| TraktError::Network(format!("page fetch task failed: {e}")))??;
            items.extend(fetched);
        }
        Ok(items)
    }
}

impl<T> PagedRoute<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// [`Self::stream_pages_bounded`] with the default concurrency limit.
    pub fn stream_pages(self) -> ReceiverStream<TraktResult<Vec<T>>> {
        self.stream_pages_bounded(DEFAULT_MAX_CONCURRENT_PAGE_REQUESTS)
    }

    /// Stream pages in ascending order as a lazy, finite sequence.
    ///
    /// Fetches run concurrently, gated by a semaphore acquired before
    /// each dispatch, but a page is only yielded once every
    /// lower-numbered page has been. A page error ends the stream with
    /// that error; pages buffered behind it are discarded.
    pub fn stream_pages_bounded(self, max_concurrent: usize) -> ReceiverStream<TraktResult<Vec<T>>> {
        let (tx, rx) = mpsc::channel(max_concurrent.max(1));
        tokio::spawn(drive_stream(self, max_concurrent.max(1), tx));
        ReceiverStream::new(rx)
    }
}

async fn drive_stream<T>(
    route: PagedRoute<T>,
    max_concurrent: usize,
    tx: mpsc::Sender<TraktResult<Vec<T>>>,
) where
    T: DeserializeOwned + Send + 'static,
{
    let first = tokio::select! {
        result = route.clone().page(1).perform() => result,
        _ = tx.closed() => return,
    };
    let (items, page_count) = match first {
        Ok(paged) => (paged.items, paged.page_count),
        Err(e) => {
            let _ = tx.send(Err(e)).await;
            return;
        }
    };
    if tx.send(Ok(items)).await.is_err() {
        return;
    }
    if page_count <= 1 {
        return;
    }

    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let mut join_set: JoinSet<(u32, TraktResult<Vec<T>>)> = JoinSet::new();
    let mut next_to_dispatch: u32 = 2;
    let mut next_to_yield: u32 = 2;
    // Completed pages waiting for their predecessors.
    let mut buffered: BTreeMap<u32, Vec<T>> = BTreeMap::new();

    while next_to_yield <= page_count {
        tokio::select! {
            // Consumer dropped the stream: cancel everything in flight.
            _ = tx.closed() => {
                join_set.abort_all();
                return;
            }
            permit = Arc::clone(&semaphore).acquire_owned(),
                if next_to_dispatch <= page_count =>
            {
                // The semaphore is never closed while we hold it.
                let Ok(permit) = permit else { return };
                let page = next_to_dispatch;
                next_to_dispatch += 1;
                let route = route.clone();
                join_set.spawn(async move {
                    let result = route.page(page).perform().await.map(|paged| paged.items);
                    drop(permit);
                    (page, result)
                });
            }
            Some(joined) = join_set.join_next() => {
                match joined {
                    Ok((page, Ok(items))) => {
                        buffered.insert(page, items);
                    }
                    Ok((_, Err(e))) => {
                        let _ = tx.send(Err(e)).await;
                        join_set.abort_all();
                        return;
                    }
                    Err(e) => {
                        let _ = tx
                            .send(Err(TraktError::Network(format!(
                                "page fetch task failed: {e}"
                            ))))
                            .await;
                        join_set.abort_all();
                        return;
                    }
                }
                while let Some(items) = buffered.remove(&next_to_yield) {
                    if tx.send(Ok(items)).await.is_err() {
                        join_set.abort_all();
                        return;
                    }
                    next_to_yield += 1;
                }
            }
        }
    }
}
