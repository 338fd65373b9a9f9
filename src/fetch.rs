use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::tmdb::{CastMember, CatalogItem, Genre, ItemDetails, MediaType, TmdbClient, TmdbError};

/// Outcomes sent from fetch tasks back to the UI loop.
///
/// Supersedable slots (trending panel, search box) carry the generation that
/// was current when the request went out; the receiver discards outcomes whose
/// generation is no longer the latest issued for that slot.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Initial page load settled: genre list plus featured items.
    PageLoaded {
        media: MediaType,
        genres: Vec<Genre>,
        featured: Vec<CatalogItem>,
    },

    PageFailed {
        media: MediaType,
        error: TmdbError,
    },

    /// Genre-filtered trending list settled.
    TrendingLoaded {
        media: MediaType,
        generation: u64,
        items: Vec<CatalogItem>,
    },

    TrendingFailed {
        media: MediaType,
        generation: u64,
        error: TmdbError,
    },

    /// Search lookup settled.
    SearchLoaded {
        generation: u64,
        items: Vec<CatalogItem>,
    },

    SearchFailed {
        generation: u64,
        error: TmdbError,
    },

    /// Details + credits both resolved.
    DetailsLoaded {
        details: ItemDetails,
        cast: Vec<CastMember>,
    },

    DetailsFailed {
        error: TmdbError,
    },
}

/// Monotonic request counter for one supersedable slot.
///
/// Issuing a new generation invalidates every outcome still in flight for the
/// slot, so a late response can never overwrite a newer selection's result.
#[derive(Debug, Default)]
pub struct Slot {
    issued: u64,
}

impl Slot {
    /// Allocate the next generation; all earlier ones become stale.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.issued
    }
}

/// Spawns fetch tasks against the catalog API and funnels their outcomes into
/// a single channel drained by the UI loop.
pub struct Fetcher {
    client: Arc<TmdbClient>,
    tx: UnboundedSender<FetchOutcome>,
}

impl Fetcher {
    pub fn new(client: Arc<TmdbClient>) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { client, tx }, rx)
    }

    /// Initial page load: genre list first, then the popular listing.
    /// Either failing fails the whole page.
    pub fn spawn_page_load(&self, media: MediaType) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = async {
                let genres = client.genres(media).await?;
                let featured = client.popular(media).await?;
                Ok::<_, TmdbError>((genres, featured))
            }
            .await;

            let msg = match outcome {
                Ok((genres, featured)) => FetchOutcome::PageLoaded {
                    media,
                    genres,
                    featured,
                },
                Err(error) => {
                    tracing::warn!(media = media.path_segment(), %error, "page load failed");
                    FetchOutcome::PageFailed { media, error }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Genre-filtered trending fetch for one page.
    pub fn spawn_trending(&self, media: MediaType, genre_id: i64, generation: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let msg = match client.discover_by_genre(media, genre_id).await {
                Ok(items) => FetchOutcome::TrendingLoaded {
                    media,
                    generation,
                    items,
                },
                Err(error) => {
                    tracing::warn!(media = media.path_segment(), genre_id, %error, "trending fetch failed");
                    FetchOutcome::TrendingFailed {
                        media,
                        generation,
                        error,
                    }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Search lookup, issued only after the debounce delay elapses.
    pub fn spawn_search(&self, media: MediaType, query: String, generation: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let msg = match client.search(media, &query).await {
                Ok(items) => FetchOutcome::SearchLoaded { generation, items },
                Err(error) => {
                    tracing::warn!(%query, %error, "search failed");
                    FetchOutcome::SearchFailed { generation, error }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Details then credits, in sequence. A failure of either surfaces as one
    /// generic error; the overlay never renders a partial view.
    pub fn spawn_details(&self, media: MediaType, id: i64) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = async {
                let details = client.details(media, id).await?;
                let cast = client.credits(media, id).await?;
                Ok::<_, TmdbError>((details, cast))
            }
            .await;

            let msg = match outcome {
                Ok((details, cast)) => FetchOutcome::DetailsLoaded { details, cast },
                Err(error) => {
                    tracing::warn!(media = media.path_segment(), id, %error, "details fetch failed");
                    FetchOutcome::DetailsFailed { error }
                }
            };
            let _ = tx.send(msg);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_generations_are_monotonic() {
        let mut slot = Slot::default();
        let first = slot.issue();
        let second = slot.issue();
        assert!(second > first);
    }

    #[test]
    fn test_slot_marks_earlier_generation_stale() {
        let mut slot = Slot::default();
        let first = slot.issue();
        assert!(slot.is_current(first));

        let second = slot.issue();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }

    #[test]
    fn test_slot_untracked_generation_is_stale() {
        let slot = Slot::default();
        assert!(!slot.is_current(1));
    }

    #[tokio::test]
    async fn test_outcome_channel_roundtrip() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(FetchOutcome::SearchLoaded {
            generation: 3,
            items: Vec::new(),
        })
        .unwrap();

        match rx.recv().await {
            Some(FetchOutcome::SearchLoaded { generation, items }) => {
                assert_eq!(generation, 3);
                assert!(items.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
