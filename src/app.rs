use std::time::{Duration, Instant};

use crate::fetch::{FetchOutcome, Fetcher, Slot};
use crate::tmdb::{CastMember, CatalogItem, Genre, ItemDetails, MediaType, TmdbClient};

/// Quiescence interval before a typed query is looked up.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// The dropdown never shows more than this many results.
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// The featured section shows the first slice of the popular listing.
pub const FEATURED_LIMIT: usize = 3;

/// The details overlay shows the first slice of the cast.
pub const CAST_LIMIT: usize = 4;

/// Which section of the browse page has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Featured,
    Genres,
    Trending,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Featured => Self::Genres,
            Self::Genres => Self::Trending,
            Self::Trending => Self::Featured,
        }
    }
}

/// Input mode: normal navigation, or typing into the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Searching,
}

/// Page container lifecycle. `Ready` carries a nested trending sub-state via
/// [`PageState::trending_loading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePhase {
    InitialLoading,
    Ready,
    Failed(String),
}

/// State for one page container (movies or series).
pub struct PageState {
    pub media: MediaType,
    pub phase: PagePhase,
    /// Whether the initial load has been requested yet (pages load on first visit).
    pub requested: bool,

    pub featured: Vec<CatalogItem>,
    pub featured_selected: usize,

    pub genres: Vec<Genre>,
    pub genre_cursor: usize,
    pub selected_genre: Option<Genre>,

    pub trending: Vec<CatalogItem>,
    pub trending_selected: usize,
    pub trending_loading: bool,
    pub trending_slot: Slot,
}

impl PageState {
    pub fn new(media: MediaType) -> Self {
        Self {
            media,
            phase: PagePhase::InitialLoading,
            requested: false,
            featured: Vec::new(),
            featured_selected: 0,
            genres: Vec::new(),
            genre_cursor: 0,
            selected_genre: None,
            trending: Vec::new(),
            trending_selected: 0,
            trending_loading: false,
            trending_slot: Slot::default(),
        }
    }

    /// The genre this page preselects and resets to.
    pub fn default_genre(&self) -> Option<Genre> {
        let id = self.media.default_genre_id();
        self.genres.iter().find(|g| g.id == id).cloned()
    }
}

/// Search coordinator state: the query, its debounce deadline, and the
/// transient dropdown contents.
pub struct SearchState {
    pub query: String,
    /// Pending debounce deadline; overwritten on every keystroke, `None` once
    /// fired or cancelled.
    pub deadline: Option<Instant>,
    pub slot: Slot,
    pub results: Vec<CatalogItem>,
    pub selected: usize,
    pub open: bool,
}

impl SearchState {
    fn new() -> Self {
        Self {
            query: String::new(),
            deadline: None,
            slot: Slot::default(),
            results: Vec::new(),
            selected: 0,
            open: false,
        }
    }

    /// Drop the query and everything derived from it. Cancelling the deadline
    /// guarantees no lookup is issued for the discarded text.
    fn clear(&mut self) {
        self.query.clear();
        self.deadline = None;
        self.results.clear();
        self.selected = 0;
        self.open = false;
    }
}

/// Details overlay lifecycle. Renders only once both details and credits have
/// resolved; a failure of either shows the generic error state.
pub enum DetailsOverlay {
    Loading,
    Ready {
        media: MediaType,
        details: ItemDetails,
        cast: Vec<CastMember>,
    },
    Failed(String),
}

/// Main application state.
pub struct App {
    fetcher: Fetcher,
    pub should_quit: bool,
    pub show_help: bool,

    /// Which page container is active.
    pub active: MediaType,
    pub movies: PageState,
    pub series: PageState,
    pub focus: Focus,

    pub input_mode: InputMode,
    pub search: SearchState,

    /// Catalog type of the details fetch in flight, so the overlay knows
    /// which endpoint family the loaded item came from.
    pending_details: Option<MediaType>,
    pub overlay: Option<DetailsOverlay>,

    pub status_msg: String,
}

impl App {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            should_quit: false,
            show_help: false,
            active: MediaType::Movie,
            movies: PageState::new(MediaType::Movie),
            series: PageState::new(MediaType::Series),
            focus: Focus::Trending,
            input_mode: InputMode::Normal,
            search: SearchState::new(),
            pending_details: None,
            overlay: None,
            status_msg: "Loading movies...".to_string(),
        }
    }

    /// Kick off the initial load for the starting page.
    pub fn init(&mut self) {
        self.movies.requested = true;
        self.fetcher.spawn_page_load(MediaType::Movie);
    }

    pub fn page(&self) -> &PageState {
        match self.active {
            MediaType::Movie => &self.movies,
            MediaType::Series => &self.series,
        }
    }

    pub fn page_mut(&mut self) -> &mut PageState {
        match self.active {
            MediaType::Movie => &mut self.movies,
            MediaType::Series => &mut self.series,
        }
    }

    fn page_for(&mut self, media: MediaType) -> &mut PageState {
        match media {
            MediaType::Movie => &mut self.movies,
            MediaType::Series => &mut self.series,
        }
    }

    /// Switch between the movies and series pages. Search state belongs to
    /// the page it was typed on, so it does not survive navigation.
    pub fn switch_page(&mut self, media: MediaType) {
        if self.active == media {
            return;
        }
        self.active = media;
        self.search.clear();
        self.input_mode = InputMode::Normal;
        self.focus = Focus::Trending;

        let needs_load = {
            let page = self.page_mut();
            if page.requested {
                false
            } else {
                page.requested = true;
                true
            }
        };
        if needs_load {
            self.fetcher.spawn_page_load(media);
            self.status_msg = format!("Loading {}...", media.label().to_lowercase());
        }
    }

    // ── Genre filter ──

    /// Select the genre under the cursor. Selecting the already-selected
    /// genre is a no-op; otherwise the trending panel enters its loading
    /// sub-state immediately and a fresh generation goes out.
    pub fn select_genre_at_cursor(&mut self) {
        let page = self.page();
        let Some(genre) = page.genres.get(page.genre_cursor).cloned() else {
            return;
        };
        self.select_genre(genre);
    }

    fn select_genre(&mut self, genre: Genre) {
        let media = self.active;
        let page = self.page_mut();
        if page.selected_genre.as_ref().is_some_and(|g| g.id == genre.id) {
            return;
        }
        let generation = page.trending_slot.issue();
        page.trending_loading = true;
        page.selected_genre = Some(genre.clone());
        self.fetcher.spawn_trending(media, genre.id, generation);
        self.status_msg = format!("Loading trending in {}...", genre.name);
    }

    /// Restore the page's fixed default genre.
    pub fn reset_genre(&mut self) {
        let Some(default) = self.page().default_genre() else {
            return;
        };
        let page = self.page_mut();
        if let Some(pos) = page.genres.iter().position(|g| g.id == default.id) {
            page.genre_cursor = pos;
        }
        self.select_genre(default);
    }

    pub fn genre_cursor_left(&mut self) {
        let page = self.page_mut();
        page.genre_cursor = page.genre_cursor.saturating_sub(1);
    }

    pub fn genre_cursor_right(&mut self) {
        let page = self.page_mut();
        if page.genre_cursor + 1 < page.genres.len() {
            page.genre_cursor += 1;
        }
    }

    /// Re-issue the full initial load after a failure. Only the movies page
    /// exposes this action.
    pub fn retry_page(&mut self) {
        let media = self.active;
        self.page_mut().phase = PagePhase::InitialLoading;
        self.fetcher.spawn_page_load(media);
        self.status_msg = format!("Reloading {}...", media.label().to_lowercase());
    }

    // ── List navigation ──

    pub fn list_next(&mut self) {
        let focus = self.focus;
        let page = self.page_mut();
        match focus {
            Focus::Featured => {
                if page.featured_selected + 1 < page.featured.len() {
                    page.featured_selected += 1;
                }
            }
            Focus::Trending => {
                if page.trending_selected + 1 < page.trending.len() {
                    page.trending_selected += 1;
                }
            }
            Focus::Genres => {}
        }
    }

    pub fn list_prev(&mut self) {
        let focus = self.focus;
        let page = self.page_mut();
        match focus {
            Focus::Featured => {
                page.featured_selected = page.featured_selected.saturating_sub(1);
            }
            Focus::Trending => {
                page.trending_selected = page.trending_selected.saturating_sub(1);
            }
            Focus::Genres => {}
        }
    }

    /// Item under the cursor in the focused section, if any.
    pub fn focused_item(&self) -> Option<&CatalogItem> {
        let page = self.page();
        match self.focus {
            Focus::Featured => page.featured.get(page.featured_selected),
            Focus::Trending => page.trending.get(page.trending_selected),
            Focus::Genres => None,
        }
    }

    // ── Search ──

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn search_push(&mut self, c: char) {
        self.search.query.push(c);
        self.search.deadline = Some(Instant::now() + SEARCH_DEBOUNCE);
    }

    pub fn search_backspace(&mut self) {
        self.search.query.pop();
        if self.search.query.is_empty() {
            // Emptied before the delay elapsed: the pending lookup dies here.
            self.search.deadline = None;
            self.search.results.clear();
            self.search.open = false;
            self.search.selected = 0;
        } else {
            self.search.deadline = Some(Instant::now() + SEARCH_DEBOUNCE);
        }
    }

    /// Fire the debounced lookup if its deadline has passed. Returns whether
    /// a lookup actually went out.
    pub fn search_tick(&mut self, now: Instant) -> bool {
        match self.search.deadline {
            Some(deadline) if now >= deadline => {}
            _ => return false,
        }
        self.search.deadline = None;
        if self.search.query.is_empty() {
            return false;
        }
        let generation = self.search.slot.issue();
        self.fetcher
            .spawn_search(self.active, self.search.query.clone(), generation);
        true
    }

    pub fn search_next(&mut self) {
        if self.search.selected + 1 < self.search.results.len() {
            self.search.selected += 1;
        }
    }

    pub fn search_prev(&mut self) {
        self.search.selected = self.search.selected.saturating_sub(1);
    }

    /// Pick the highlighted result: the query is cleared, the dropdown
    /// closes, and the details overlay opens for the picked item.
    pub fn select_search_result(&mut self) {
        let Some(item) = self.search.results.get(self.search.selected).cloned() else {
            return;
        };
        self.search.clear();
        self.input_mode = InputMode::Normal;
        self.open_details(item.id);
    }

    /// Leave search: close the dropdown and drop the query.
    pub fn dismiss_search(&mut self) {
        self.search.clear();
        self.input_mode = InputMode::Normal;
    }

    // ── Details overlay ──

    pub fn open_details(&mut self, id: i64) {
        let media = self.active;
        self.pending_details = Some(media);
        self.overlay = Some(DetailsOverlay::Loading);
        self.fetcher.spawn_details(media, id);
    }

    pub fn open_focused_details(&mut self) {
        if let Some(item) = self.focused_item() {
            let id = item.id;
            self.open_details(id);
        }
    }

    pub fn dismiss_overlay(&mut self) {
        self.overlay = None;
        self.pending_details = None;
    }

    /// Open the focused item's public catalog page in the system browser.
    pub fn open_focused_in_browser(&mut self) {
        let media = self.active;
        if let Some(item) = self.focused_item() {
            let url = TmdbClient::web_url(media, item.id);
            self.open_url(url);
        }
    }

    /// Open the overlay item's public catalog page in the system browser.
    pub fn open_overlay_in_browser(&mut self) {
        if let Some(DetailsOverlay::Ready { media, details, .. }) = &self.overlay {
            let url = TmdbClient::web_url(*media, details.id);
            self.open_url(url);
        }
    }

    fn open_url(&mut self, url: String) {
        match open::that(&url) {
            Ok(()) => self.status_msg = format!("Opening: {url}"),
            Err(e) => {
                tracing::warn!(%url, error = %e, "failed to open browser");
                self.status_msg = format!("Link: {url} (browser not available)");
            }
        }
    }

    // ── Fetch outcomes ──

    /// Apply a settled fetch to the state. Outcomes for supersedable slots
    /// are dropped when their generation is no longer the latest issued.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::PageLoaded {
                media,
                genres,
                featured,
            } => {
                let page = self.page_for(media);
                page.phase = PagePhase::Ready;
                page.featured = featured;
                page.featured.truncate(FEATURED_LIMIT);
                page.featured_selected = 0;
                page.genres = genres;
                self.status_msg = format!("{} loaded", media.label());

                if let Some(default) = self.page_for(media).default_genre() {
                    let page = self.page_for(media);
                    if let Some(pos) = page.genres.iter().position(|g| g.id == default.id) {
                        page.genre_cursor = pos;
                    }
                    let generation = page.trending_slot.issue();
                    page.trending_loading = true;
                    page.selected_genre = Some(default.clone());
                    self.fetcher.spawn_trending(media, default.id, generation);
                }
            }

            FetchOutcome::PageFailed { media, error } => {
                let msg = error.user_message();
                self.page_for(media).phase = PagePhase::Failed(msg.clone());
                self.status_msg = msg;
            }

            FetchOutcome::TrendingLoaded {
                media,
                generation,
                items,
            } => {
                let page = self.page_for(media);
                if !page.trending_slot.is_current(generation) {
                    tracing::debug!(
                        media = media.path_segment(),
                        generation,
                        "stale trending response discarded"
                    );
                    return;
                }
                page.trending_loading = false;
                page.trending = items;
                page.trending_selected = 0;
                let count = page.trending.len();
                if let Some(genre) = page.selected_genre.clone() {
                    self.status_msg = format!("{} trending in {}", count, genre.name);
                }
            }

            FetchOutcome::TrendingFailed {
                media,
                generation,
                error,
            } => {
                let page = self.page_for(media);
                if !page.trending_slot.is_current(generation) {
                    return;
                }
                page.trending_loading = false;
                self.status_msg = error.user_message();
            }

            FetchOutcome::SearchLoaded { generation, items } => {
                if !self.search.slot.is_current(generation) {
                    tracing::debug!(generation, "stale search response discarded");
                    return;
                }
                // The user may have left search while the lookup was in
                // flight; a late result must not reopen the dropdown.
                if self.input_mode != InputMode::Searching || self.search.query.is_empty() {
                    return;
                }
                self.search.results = items;
                self.search.results.truncate(SEARCH_RESULT_LIMIT);
                self.search.selected = 0;
                self.search.open = !self.search.results.is_empty();
            }

            FetchOutcome::SearchFailed { generation, error } => {
                if !self.search.slot.is_current(generation) {
                    return;
                }
                self.search.results.clear();
                self.search.open = false;
                self.status_msg = error.user_message();
            }

            FetchOutcome::DetailsLoaded { details, cast } => {
                let Some(media) = self.pending_details else {
                    return;
                };
                if self.overlay.is_none() {
                    // Dismissed while loading.
                    return;
                }
                let mut cast = cast;
                cast.truncate(CAST_LIMIT);
                self.overlay = Some(DetailsOverlay::Ready {
                    media,
                    details,
                    cast,
                });
            }

            FetchOutcome::DetailsFailed { error } => {
                if self.overlay.is_none() {
                    return;
                }
                self.overlay = Some(DetailsOverlay::Failed(error.user_message()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::TmdbError;
    use std::sync::Arc;

    fn test_app() -> App {
        let client = Arc::new(TmdbClient::new("test-key".to_string()).unwrap());
        let (fetcher, _rx) = Fetcher::new(client);
        App::new(fetcher)
    }

    fn genre(id: i64, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    fn item(id: i64, title: &str) -> CatalogItem {
        serde_json::from_str(&format!(r#"{{"id": {id}, "title": "{title}"}}"#)).unwrap()
    }

    fn transport_error() -> TmdbError {
        TmdbError::Status {
            path: "/test".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn load_movies_page(app: &mut App) {
        app.apply_outcome(FetchOutcome::PageLoaded {
            media: MediaType::Movie,
            genres: vec![genre(28, "Action"), genre(35, "Comedy"), genre(18, "Drama")],
            featured: vec![item(1, "A"), item(2, "B"), item(3, "C"), item(4, "D")],
        });
    }

    #[tokio::test]
    async fn test_page_load_selects_default_genre() {
        let mut app = test_app();
        load_movies_page(&mut app);

        assert_eq!(app.movies.phase, PagePhase::Ready);
        assert_eq!(app.movies.selected_genre, Some(genre(28, "Action")));
        assert!(app.movies.trending_loading);
        assert_eq!(app.movies.genre_cursor, 0);
    }

    #[tokio::test]
    async fn test_featured_truncated_to_limit() {
        let mut app = test_app();
        load_movies_page(&mut app);
        assert_eq!(app.movies.featured.len(), FEATURED_LIMIT);
    }

    #[tokio::test]
    async fn test_genre_selection_sets_and_clears_loading() {
        let mut app = test_app();
        load_movies_page(&mut app);

        app.movies.genre_cursor = 1; // Comedy
        app.select_genre_at_cursor();
        assert!(app.movies.trending_loading);

        // Page load issued generation 1, the Comedy selection issued 2.
        app.apply_outcome(FetchOutcome::TrendingLoaded {
            media: MediaType::Movie,
            generation: 2,
            items: vec![item(10, "X")],
        });
        assert!(!app.movies.trending_loading);
        assert_eq!(app.movies.trending.len(), 1);
    }

    #[tokio::test]
    async fn test_trending_failure_clears_loading() {
        let mut app = test_app();
        load_movies_page(&mut app);

        app.apply_outcome(FetchOutcome::TrendingFailed {
            media: MediaType::Movie,
            generation: 1,
            error: transport_error(),
        });
        assert!(!app.movies.trending_loading);
        assert_eq!(app.status_msg, "Failed to load. Please try again.");
    }

    #[tokio::test]
    async fn test_reselecting_same_genre_is_noop() {
        let mut app = test_app();
        load_movies_page(&mut app);
        app.apply_outcome(FetchOutcome::TrendingLoaded {
            media: MediaType::Movie,
            generation: 1,
            items: vec![item(10, "X")],
        });

        app.movies.genre_cursor = 0; // Action, already selected
        app.select_genre_at_cursor();
        assert!(!app.movies.trending_loading);
    }

    #[tokio::test]
    async fn test_stale_trending_response_discarded() {
        let mut app = test_app();
        load_movies_page(&mut app);

        // Supersede the page-load generation before its response lands.
        app.movies.genre_cursor = 1;
        app.select_genre_at_cursor();

        app.apply_outcome(FetchOutcome::TrendingLoaded {
            media: MediaType::Movie,
            generation: 1,
            items: vec![item(99, "Stale")],
        });
        assert!(app.movies.trending.is_empty());
        assert!(app.movies.trending_loading);

        app.apply_outcome(FetchOutcome::TrendingLoaded {
            media: MediaType::Movie,
            generation: 2,
            items: vec![item(10, "Fresh")],
        });
        assert_eq!(app.movies.trending[0].title, "Fresh");
        assert!(!app.movies.trending_loading);
    }

    #[tokio::test]
    async fn test_reset_restores_default_genre() {
        let mut app = test_app();
        load_movies_page(&mut app);

        app.movies.genre_cursor = 2; // Drama
        app.select_genre_at_cursor();
        assert_eq!(app.movies.selected_genre, Some(genre(18, "Drama")));

        app.reset_genre();
        assert_eq!(app.movies.selected_genre, Some(genre(28, "Action")));
        assert_eq!(app.movies.genre_cursor, 0);
        assert!(app.movies.trending_loading);
    }

    #[tokio::test]
    async fn test_cleared_query_never_issues_lookup() {
        let mut app = test_app();
        app.start_search();
        app.search_push('d');
        app.search_push('u');
        app.search_backspace();
        app.search_backspace();

        assert!(app.search.deadline.is_none());
        let fired = app.search_tick(Instant::now() + SEARCH_DEBOUNCE * 2);
        assert!(!fired);
    }

    #[tokio::test]
    async fn test_keystroke_restarts_debounce() {
        let mut app = test_app();
        app.start_search();
        app.search_push('d');
        let first = app.search.deadline.unwrap();

        // Before the first deadline, another keystroke pushes it out.
        assert!(!app.search_tick(first - Duration::from_millis(1)));
        app.search_push('u');
        let second = app.search.deadline.unwrap();
        assert!(second >= first);

        assert!(!app.search_tick(second - Duration::from_millis(1)));
        assert!(app.search_tick(second));
        // Fired once; the deadline is consumed.
        assert!(!app.search_tick(second + Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_search_results_truncated_to_five() {
        let mut app = test_app();
        app.start_search();
        app.search_push('a');
        assert!(app.search_tick(Instant::now() + SEARCH_DEBOUNCE));

        let items = (0..20).map(|i| item(i, "R")).collect();
        app.apply_outcome(FetchOutcome::SearchLoaded {
            generation: 1,
            items,
        });
        assert_eq!(app.search.results.len(), SEARCH_RESULT_LIMIT);
        assert!(app.search.open);
    }

    #[tokio::test]
    async fn test_stale_search_response_discarded() {
        let mut app = test_app();
        app.start_search();
        app.search_push('a');
        assert!(app.search_tick(Instant::now() + SEARCH_DEBOUNCE));
        app.search_push('b');
        assert!(app.search_tick(Instant::now() + SEARCH_DEBOUNCE * 2));

        app.apply_outcome(FetchOutcome::SearchLoaded {
            generation: 1,
            items: vec![item(1, "Stale")],
        });
        assert!(app.search.results.is_empty());

        app.apply_outcome(FetchOutcome::SearchLoaded {
            generation: 2,
            items: vec![item(2, "Fresh")],
        });
        assert_eq!(app.search.results[0].title, "Fresh");
    }

    #[tokio::test]
    async fn test_result_arriving_after_dismiss_stays_closed() {
        let mut app = test_app();
        app.start_search();
        app.search_push('a');
        assert!(app.search_tick(Instant::now() + SEARCH_DEBOUNCE));
        app.dismiss_search();

        app.apply_outcome(FetchOutcome::SearchLoaded {
            generation: 1,
            items: vec![item(1, "Late")],
        });
        assert!(!app.search.open);
        assert!(app.search.results.is_empty());
    }

    #[tokio::test]
    async fn test_selecting_result_clears_query_and_closes_dropdown() {
        let mut app = test_app();
        app.start_search();
        app.search_push('a');
        assert!(app.search_tick(Instant::now() + SEARCH_DEBOUNCE));
        app.apply_outcome(FetchOutcome::SearchLoaded {
            generation: 1,
            items: vec![item(7, "Pick me")],
        });

        app.select_search_result();
        assert!(app.search.query.is_empty());
        assert!(!app.search.open);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(matches!(app.overlay, Some(DetailsOverlay::Loading)));
    }

    #[tokio::test]
    async fn test_credits_failure_yields_error_overlay_not_partial_view() {
        let mut app = test_app();
        app.open_details(550);
        assert!(matches!(app.overlay, Some(DetailsOverlay::Loading)));

        // The sequenced details+credits fetch surfaces one combined failure.
        app.apply_outcome(FetchOutcome::DetailsFailed {
            error: transport_error(),
        });
        match &app.overlay {
            Some(DetailsOverlay::Failed(msg)) => {
                assert_eq!(msg, "Failed to load. Please try again.");
            }
            _ => panic!("expected failed overlay"),
        }
    }

    #[tokio::test]
    async fn test_cast_truncated_to_four() {
        let mut app = test_app();
        app.open_details(550);

        let details: ItemDetails =
            serde_json::from_str(r#"{"id": 550, "title": "Fight Club"}"#).unwrap();
        let cast = (0..10)
            .map(|i| CastMember {
                id: i,
                name: format!("Actor {i}"),
                character: None,
                profile_path: None,
            })
            .collect();
        app.apply_outcome(FetchOutcome::DetailsLoaded { details, cast });

        match &app.overlay {
            Some(DetailsOverlay::Ready { cast, .. }) => assert_eq!(cast.len(), CAST_LIMIT),
            _ => panic!("expected ready overlay"),
        }
    }

    #[tokio::test]
    async fn test_details_arriving_after_dismiss_discarded() {
        let mut app = test_app();
        app.open_details(550);
        app.dismiss_overlay();

        let details: ItemDetails = serde_json::from_str(r#"{"id": 550}"#).unwrap();
        app.apply_outcome(FetchOutcome::DetailsLoaded {
            details,
            cast: Vec::new(),
        });
        assert!(app.overlay.is_none());
    }

    #[tokio::test]
    async fn test_switching_page_clears_search_and_loads_lazily() {
        let mut app = test_app();
        app.start_search();
        app.search_push('x');

        app.switch_page(MediaType::Series);
        assert_eq!(app.active, MediaType::Series);
        assert!(app.search.query.is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.series.requested);

        // Switching back keeps the already-loaded movie page state.
        app.switch_page(MediaType::Movie);
        assert_eq!(app.active, MediaType::Movie);
    }

    #[tokio::test]
    async fn test_page_failure_records_message() {
        let mut app = test_app();
        app.apply_outcome(FetchOutcome::PageFailed {
            media: MediaType::Movie,
            error: transport_error(),
        });
        assert_eq!(
            app.movies.phase,
            PagePhase::Failed("Failed to load. Please try again.".to_string())
        );
    }

    #[test]
    fn test_focus_cycles_through_sections() {
        assert_eq!(Focus::Featured.next(), Focus::Genres);
        assert_eq!(Focus::Genres.next(), Focus::Trending);
        assert_eq!(Focus::Trending.next(), Focus::Featured);
    }
}
