use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const TMDB_WEB_BASE: &str = "https://www.themoviedb.org";
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Which half of the catalog an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Path segment used by the upstream API ("movie" or "tv").
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        }
    }

    /// Genre preselected when a page loads: Action for movies,
    /// Action & Adventure for series.
    pub fn default_genre_id(self) -> i64 {
        match self {
            Self::Movie => 28,
            Self::Series => 10759,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Series => "Series",
        }
    }
}

/// Errors from the upstream catalog API.
///
/// Transport failures, non-2xx statuses and decode failures are kept apart for
/// logging, but all collapse into one generic message for the user.
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("TMDB API key cannot be empty")]
    EmptyApiKey,

    #[error("failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned HTTP {status}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TmdbError {
    /// The single user-visible failure message. Network failure, bad status
    /// and malformed payload are deliberately indistinguishable here.
    pub fn user_message(&self) -> String {
        match self {
            TmdbError::EmptyApiKey => "TMDB API key is missing or empty".to_string(),
            _ => "Failed to load. Please try again.".to_string(),
        }
    }
}

// ── Response types ──

/// Wrapper around every listing endpoint (`results` array).
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub results: Vec<CatalogItem>,
}

/// Wrapper around the genre listing endpoint (`genres` array).
#[derive(Debug, Clone, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<Genre>,
}

/// A movie or TV series record as returned by listing and search endpoints.
///
/// Movies carry `title`/`release_date`, series carry `name`/`first_air_date`;
/// the aliases fold both shapes into one view model.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    #[serde(default, alias = "name")]
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default, alias = "first_air_date")]
    pub release_date: String,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

impl CatalogItem {
    /// Release year, or an empty string when the date is absent.
    pub fn year(&self) -> &str {
        self.release_date.split('-').next().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Extended record from the details endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDetails {
    pub id: i64,
    #[serde(default, alias = "name")]
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default, alias = "first_air_date")]
    pub release_date: String,
    pub runtime: Option<i64>,
    #[serde(default)]
    pub episode_run_time: Vec<i64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    pub budget: Option<i64>,
    pub revenue: Option<i64>,
}

impl ItemDetails {
    pub fn year(&self) -> &str {
        self.release_date.split('-').next().unwrap_or("")
    }

    /// Runtime in minutes: movies report `runtime`, series report a list of
    /// per-episode run times.
    pub fn runtime_minutes(&self) -> Option<i64> {
        self.runtime.or_else(|| self.episode_run_time.first().copied())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

/// Client for the TMDB v3 API.
///
/// One method per endpoint, generalized over [`MediaType`]. Plain GET plus
/// JSON decode; no retry, no backoff, no caching.
pub struct TmdbClient {
    client: Client,
    api_key: String,
}

impl TmdbClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: String) -> Result<Self, TmdbError> {
        if api_key.trim().is_empty() {
            return Err(TmdbError::EmptyApiKey);
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(TmdbError::ClientBuild)?;

        Ok(Self { client, api_key })
    }

    /// Popular listing: featured items for a page.
    pub async fn popular(&self, media: MediaType) -> Result<Vec<CatalogItem>, TmdbError> {
        tracing::debug!(media = media.path_segment(), "fetching popular");
        let path = format!("/{}/popular", media.path_segment());
        let params = [
            ("language", "en-US".to_string()),
            ("page", "1".to_string()),
        ];
        let response: ListResponse = self.get_json(&path, &params).await?;
        Ok(response.results)
    }

    /// Discover listing filtered to a single genre, most popular first.
    pub async fn discover_by_genre(
        &self,
        media: MediaType,
        genre_id: i64,
    ) -> Result<Vec<CatalogItem>, TmdbError> {
        tracing::debug!(media = media.path_segment(), genre_id, "fetching by genre");
        let path = format!("/discover/{}", media.path_segment());
        let params = [
            ("with_genres", genre_id.to_string()),
            ("sort_by", "popularity.desc".to_string()),
        ];
        let response: ListResponse = self.get_json(&path, &params).await?;
        Ok(response.results)
    }

    /// Extended information for one item.
    pub async fn details(&self, media: MediaType, id: i64) -> Result<ItemDetails, TmdbError> {
        tracing::debug!(media = media.path_segment(), id, "fetching details");
        let path = format!("/{}/{}", media.path_segment(), id);
        let params = [("language", "en-US".to_string())];
        self.get_json(&path, &params).await
    }

    /// Cast list for one item.
    pub async fn credits(&self, media: MediaType, id: i64) -> Result<Vec<CastMember>, TmdbError> {
        tracing::debug!(media = media.path_segment(), id, "fetching credits");
        let path = format!("/{}/{}/credits", media.path_segment(), id);
        let response: Credits = self.get_json(&path, &[]).await?;
        Ok(response.cast)
    }

    /// Reference list of genres for a catalog type.
    pub async fn genres(&self, media: MediaType) -> Result<Vec<Genre>, TmdbError> {
        tracing::debug!(media = media.path_segment(), "fetching genre list");
        let path = format!("/genre/{}/list", media.path_segment());
        let params = [("language", "en-US".to_string())];
        let response: GenreListResponse = self.get_json(&path, &params).await?;
        Ok(response.genres)
    }

    /// Free-text search within a catalog type.
    pub async fn search(
        &self,
        media: MediaType,
        query: &str,
    ) -> Result<Vec<CatalogItem>, TmdbError> {
        tracing::debug!(media = media.path_segment(), query, "searching");
        let path = format!("/search/{}", media.path_segment());
        let params = [
            ("query", query.to_string()),
            ("language", "en-US".to_string()),
            ("page", "1".to_string()),
        ];
        let response: ListResponse = self.get_json(&path, &params).await?;
        Ok(response.results)
    }

    /// Image URL for a poster or profile path.
    ///
    /// Common sizes: "w92", "w200", "w500", "original".
    pub fn poster_url(path: &str, size: &str) -> String {
        format!("{}/{}{}", TMDB_IMAGE_BASE, size, path)
    }

    /// Public web page for an item, for the open-in-browser action.
    pub fn web_url(media: MediaType, id: i64) -> String {
        format!("{}/{}/{}", TMDB_WEB_BASE, media.path_segment(), id)
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, TmdbError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", TMDB_BASE_URL, path);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|source| TmdbError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::Status {
                path: path.to_string(),
                status,
            });
        }

        response.json::<T>().await.map_err(|source| TmdbError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            TmdbClient::new("".to_string()),
            Err(TmdbError::EmptyApiKey)
        ));
        assert!(matches!(
            TmdbClient::new("   ".to_string()),
            Err(TmdbError::EmptyApiKey)
        ));
    }

    #[test]
    fn test_poster_url() {
        let url = TmdbClient::poster_url("/abc123.jpg", "w500");
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/abc123.jpg");
    }

    #[test]
    fn test_web_url() {
        assert_eq!(
            TmdbClient::web_url(MediaType::Movie, 550),
            "https://www.themoviedb.org/movie/550"
        );
        assert_eq!(
            TmdbClient::web_url(MediaType::Series, 1399),
            "https://www.themoviedb.org/tv/1399"
        );
    }

    #[test]
    fn test_media_type_mapping() {
        assert_eq!(MediaType::Movie.path_segment(), "movie");
        assert_eq!(MediaType::Series.path_segment(), "tv");
        assert_eq!(MediaType::Movie.default_genre_id(), 28);
        assert_eq!(MediaType::Series.default_genre_id(), 10759);
    }

    #[test]
    fn test_movie_item_deserializes() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "poster_path": "/poster.jpg",
            "overview": "An insomniac office worker...",
            "vote_average": 8.4,
            "release_date": "1999-10-15",
            "genre_ids": [18, 53]
        }"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 550);
        assert_eq!(item.title, "Fight Club");
        assert_eq!(item.year(), "1999");
        assert_eq!(item.genre_ids, vec![18, 53]);
    }

    #[test]
    fn test_series_item_aliases_fold_into_movie_fields() {
        let json = r#"{
            "id": 1399,
            "name": "Game of Thrones",
            "poster_path": null,
            "vote_average": 8.5,
            "first_air_date": "2011-04-17",
            "genre_ids": [10759, 18]
        }"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "Game of Thrones");
        assert_eq!(item.release_date, "2011-04-17");
        assert_eq!(item.year(), "2011");
        assert!(item.poster_path.is_none());
        assert!(item.overview.is_empty());
    }

    #[test]
    fn test_sparse_item_uses_defaults() {
        let item: CatalogItem = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.year(), "");
        assert!(item.genre_ids.is_empty());
    }

    #[test]
    fn test_details_runtime_minutes() {
        let movie: ItemDetails = serde_json::from_str(
            r#"{"id": 550, "title": "Fight Club", "runtime": 139}"#,
        )
        .unwrap();
        assert_eq!(movie.runtime_minutes(), Some(139));

        let series: ItemDetails = serde_json::from_str(
            r#"{"id": 1399, "name": "Game of Thrones", "episode_run_time": [60, 55]}"#,
        )
        .unwrap();
        assert_eq!(series.runtime_minutes(), Some(60));

        let unknown: ItemDetails = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(unknown.runtime_minutes(), None);
    }

    #[test]
    fn test_genre_list_deserializes() {
        let json = r#"{"genres": [{"id": 28, "name": "Action"}, {"id": 35, "name": "Comedy"}]}"#;
        let response: GenreListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.genres.len(), 2);
        assert_eq!(response.genres[0], Genre { id: 28, name: "Action".to_string() });
    }

    #[test]
    fn test_credits_cast_defaults_to_empty() {
        let credits: Credits = serde_json::from_str(r#"{"id": 550}"#).unwrap();
        assert!(credits.cast.is_empty());
    }
}
