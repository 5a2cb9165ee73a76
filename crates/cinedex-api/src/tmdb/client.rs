//! `TmdbClient` - TMDB API client implementation.

use std::fmt;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::error::TmdbError;
use super::normalize::normalize_keys;
use super::params::{ExternalSource, Query, ResourceType};
use super::rate_limit::RateLimitStatus;
use super::sleeper::{LocalSleeper, TokioSleeper};
use super::types::{
    FindCandidate, FindResponse, Movie, MovieCastCredit, MovieCreditsResponse, MovieCrewCredit,
    MovieImage, MovieImagesResponse, MovieVideo, MovieVideosResponse, Person,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Query parameter carrying the API key.
const API_KEY_PARAM: &str = "api_key";

/// TMDB API client.
///
/// Holds only immutable configuration, so a shared reference can serve
/// concurrent calls. Each call discovers rate limiting from its own
/// responses and cools down independently.
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient<S = TokioSleeper> {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key sent as `api_key`.
    api_key: String,
    /// Language sent as `language` by resource accessors.
    language: String,
    /// Cooldown mechanism.
    sleeper: S,
    /// Maximum number of cooldowns per call (`None` = unbounded).
    max_rate_limit_retries: Option<u32>,
}

impl<S: fmt::Debug> fmt::Debug for TmdbClient<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"***")
            .field("language", &self.language)
            .field("sleeper", &self.sleeper)
            .field("max_rate_limit_retries", &self.max_rate_limit_retries)
            .finish_non_exhaustive()
    }
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder<S = TokioSleeper> {
    base_url: Option<Url>,
    api_key: Option<String>,
    language: Option<String>,
    user_agent: Option<String>,
    sleeper: S,
    max_rate_limit_retries: Option<u32>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            language: None,
            user_agent: None,
            sleeper: TokioSleeper,
            max_rate_limit_retries: None,
        }
    }
}

impl<S> TmdbClientBuilder<S> {
    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the response language (default: `"en"`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the User-Agent (default: crate name and version).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Caps the number of rate-limit cooldowns per call.
    ///
    /// Unset by default, in which case a call keeps cooling down until
    /// the remote accepts it.
    #[must_use]
    pub fn max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = Some(retries);
        self
    }

    /// Replaces the cooldown mechanism.
    #[must_use]
    pub fn sleeper<T>(self, sleeper: T) -> TmdbClientBuilder<T> {
        TmdbClientBuilder {
            base_url: self.base_url,
            api_key: self.api_key,
            language: self.language,
            user_agent: self.user_agent,
            sleeper,
            max_rate_limit_retries: self.max_rate_limit_retries,
        }
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient<S>> {
        let api_key = self.api_key.context("api_key is required")?;
        if api_key.trim().is_empty() {
            bail!("api_key must not be empty");
        }

        let mut base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let language = self
            .language
            .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE));
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
            language,
            sleeper: self.sleeper,
            max_rate_limit_retries: self.max_rate_limit_retries,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }
}

impl<S> TmdbClient<S> {
    /// Returns the configured response language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Builds a query carrying only the configured language.
    fn language_query(&self) -> Query {
        Query::new().param("language", self.language.as_str())
    }
}

impl<S: LocalSleeper> TmdbClient<S> {
    /// Sends a GET request for `resource` and returns the key-normalized body.
    ///
    /// On a non-2xx response with `x-ratelimit-remaining: 0`, waits
    /// `max(x-ratelimit-reset - now, 30)` seconds and sends the request
    /// again. A missing `x-ratelimit-remaining` header is not treated as
    /// rate limiting; the response is classified by status instead.
    ///
    /// `Null` query values are omitted. A caller-supplied `api_key`
    /// parameter is ignored in favor of the configured key.
    ///
    /// # Errors
    ///
    /// - [`TmdbError::NotFound`] on HTTP 404.
    /// - [`TmdbError::Remote`] on any other non-2xx status that is not rate limiting.
    /// - [`TmdbError::RateLimited`] when the optional cooldown cap is reached.
    /// - [`TmdbError::InvalidResource`] when `resource` is an absolute URL or
    ///   contains dot segments; no request is sent.
    /// - [`TmdbError::Http`] / [`TmdbError::Decode`] / [`TmdbError::Url`] on
    ///   transport, body, or path failures.
    pub async fn execute(&self, resource: &str, query: &Query) -> Result<Value, TmdbError> {
        let url = self.resource_url(resource)?;
        self.send(resource, url, query).await
    }

    /// Resolves `resource` against the base URL, keeping it under the base path.
    fn resource_url(&self, resource: &str) -> Result<Url, TmdbError> {
        let relative = resource.trim_start_matches('/');
        let path = relative.split(['?', '#']).next().unwrap_or_default();
        let invalid = || TmdbError::InvalidResource {
            resource: String::from(resource),
        };

        if Url::parse(relative).is_ok() || path.split(['/', '\\']).any(is_dot_segment) {
            return Err(invalid());
        }

        let url = self.base_url.join(relative)?;
        if url.origin() != self.base_url.origin() || !url.path().starts_with(self.base_url.path())
        {
            return Err(invalid());
        }
        Ok(url)
    }

    /// Appends `segments` to the base URL, percent-encoding each as a single segment.
    fn segment_url(&self, segments: &[&str]) -> Result<Url, TmdbError> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| segment.is_empty() || is_dot_segment(segment))
        {
            return Err(TmdbError::InvalidResource {
                resource: String::from(*bad),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TmdbError::InvalidResource {
                resource: segments.join("/"),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Request loop behind [`Self::execute`].
    #[instrument(skip_all, fields(resource = %resource))]
    async fn send(&self, resource: &str, url: Url, query: &Query) -> Result<Value, TmdbError> {
        let mut cooldowns = 0u32;
        loop {
            let mut pairs: Vec<(&str, String)> = vec![(API_KEY_PARAM, self.api_key.clone())];
            pairs.extend(
                query
                    .to_pairs()
                    .into_iter()
                    .filter(|(name, _)| *name != API_KEY_PARAM),
            );

            let request = self.http_client.get(url.clone()).query(&pairs).build()?;

            tracing::debug!(url = %redact_api_key(request.url()), "TMDB API request");

            let response = self.http_client.execute(request).await?;
            let status = response.status();
            let rate_limit = RateLimitStatus::from_headers(response.headers());

            if status.is_success() {
                let body = response.text().await?;
                return decode_body(resource, &body).map(normalize_keys);
            }

            if rate_limit.is_exhausted() {
                if let Some(max) = self.max_rate_limit_retries
                    && cooldowns >= max
                {
                    return Err(TmdbError::RateLimited {
                        attempts: cooldowns,
                    });
                }
                cooldowns = cooldowns.saturating_add(1);

                let cooldown = rate_limit.cooldown(Utc::now().timestamp());
                tracing::warn!(
                    code = status.as_u16(),
                    attempt = cooldowns,
                    cooldown_secs = cooldown.as_secs(),
                    "TMDB API rate limit reached. Waiting..."
                );
                self.sleeper.sleep(cooldown).await;
                continue;
            }

            if status == StatusCode::NOT_FOUND {
                return Err(TmdbError::NotFound);
            }

            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!(code = status.as_u16(), error = %e, "failed to read TMDB error body");
                String::new()
            });
            return Err(remote_error(status, &body));
        }
    }

    /// Sends a GET request and deserializes the normalized body into `T`.
    async fn get_as<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &Query,
    ) -> Result<T, TmdbError> {
        let body = self.execute(resource, query).await?;
        project(resource, body)
    }

    /// Fetches `movie/{movie_id}/images`.
    async fn movie_images(
        &self,
        movie_id: u64,
        include_image_language: Option<&[&str]>,
    ) -> Result<MovieImagesResponse, TmdbError> {
        let query = Query::new()
            .param(
                "include_image_language",
                include_image_language.map(|langs| langs.join(",")),
            )
            .param("language", self.language.as_str());
        self.get_as(&format!("movie/{movie_id}/images"), &query)
            .await
    }

    /// Fetches `movie/{movie_id}/credits`.
    async fn movie_credits(&self, movie_id: u64) -> Result<MovieCreditsResponse, TmdbError> {
        self.get_as(&format!("movie/{movie_id}/credits"), &self.language_query())
            .await
    }
}

/// Deserializes a normalized body into `T`.
fn project<T: DeserializeOwned>(resource: &str, body: Value) -> Result<T, TmdbError> {
    serde_json::from_value(body).map_err(|e| {
        tracing::warn!(
            %resource,
            error = %e,
            "TMDB response does not match the expected shape"
        );
        TmdbError::UnexpectedResponse
    })
}

/// Returns `true` for `.` and `..`, including their percent-encoded forms.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Decodes a success body. An empty body decodes as `{}`.
fn decode_body(resource: &str, body: &str) -> Result<Value, TmdbError> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(body).map_err(|source| TmdbError::Decode {
        context: String::from(resource),
        source,
    })
}

/// Builds a [`TmdbError::Remote`] from an error body.
///
/// Falls back to the HTTP status code and the raw body (or the reason
/// phrase for an empty body) when `status_code` / `status_message` are
/// missing.
fn remote_error(status: StatusCode, body: &str) -> TmdbError {
    let decoded = serde_json::from_str::<Value>(body).ok().map(normalize_keys);

    let code = decoded
        .as_ref()
        .and_then(|v| v.get("statusCode"))
        .and_then(Value::as_i64)
        .unwrap_or_else(|| i64::from(status.as_u16()));

    let message = decoded
        .as_ref()
        .and_then(|v| v.get("statusMessage"))
        .and_then(Value::as_str)
        .map_or_else(
            || {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    String::from(status.canonical_reason().unwrap_or_default())
                } else {
                    String::from(trimmed)
                }
            },
            String::from,
        );

    TmdbError::Remote { code, message }
}

/// Returns a copy of `url` with the `api_key` value masked, for logging.
fn redact_api_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == API_KEY_PARAM {
                String::from("***")
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

impl<S: LocalSleeper> LocalTmdbApi for TmdbClient<S> {
    #[instrument(skip_all)]
    async fn movie(&self, movie_id: u64) -> Result<Movie, TmdbError> {
        let path = format!("movie/{movie_id}");
        let mut movie: Movie = self.get_as(&path, &self.language_query()).await?;

        // TMDB reports unknown revenue and runtime as 0.
        movie.revenue = movie.revenue.filter(|&revenue| revenue != 0);
        movie.runtime = movie.runtime.filter(|&runtime| runtime != 0);

        Ok(movie)
    }

    #[instrument(skip_all)]
    async fn movie_backdrop_images(
        &self,
        movie_id: u64,
        include_image_language: Option<&[&str]>,
    ) -> Result<Vec<MovieImage>, TmdbError> {
        self.movie_images(movie_id, include_image_language)
            .await
            .map(|images| images.backdrops)
    }

    #[instrument(skip_all)]
    async fn movie_poster_images(
        &self,
        movie_id: u64,
        include_image_language: Option<&[&str]>,
    ) -> Result<Vec<MovieImage>, TmdbError> {
        self.movie_images(movie_id, include_image_language)
            .await
            .map(|images| images.posters)
    }

    #[instrument(skip_all)]
    async fn movie_cast_credits(&self, movie_id: u64) -> Result<Vec<MovieCastCredit>, TmdbError> {
        self.movie_credits(movie_id)
            .await
            .map(|credits| credits.cast)
    }

    #[instrument(skip_all)]
    async fn movie_crew_credits(&self, movie_id: u64) -> Result<Vec<MovieCrewCredit>, TmdbError> {
        self.movie_credits(movie_id)
            .await
            .map(|credits| credits.crew)
    }

    #[instrument(skip_all)]
    async fn movie_videos(&self, movie_id: u64) -> Result<Vec<MovieVideo>, TmdbError> {
        let path = format!("movie/{movie_id}/videos");
        let videos: MovieVideosResponse = self.get_as(&path, &self.language_query()).await?;
        Ok(videos.results)
    }

    #[instrument(skip_all)]
    async fn person(&self, person_id: u64) -> Result<Person, TmdbError> {
        let path = format!("person/{person_id}");
        self.get_as(&path, &self.language_query()).await
    }

    #[instrument(skip_all, fields(resource_type = %resource_type, external_source = %external_source))]
    async fn find_id(
        &self,
        resource_type: ResourceType,
        external_source: ExternalSource,
        external_id: &str,
    ) -> Result<u64, TmdbError> {
        let pick: fn(FindResponse) -> Option<Vec<FindCandidate>> =
            match (resource_type, external_source) {
                (ResourceType::Movie, ExternalSource::Imdb) => |found| found.movie_results,
                (ResourceType::Person, ExternalSource::Imdb) => |found| found.person_results,
                _ => return Err(TmdbError::Unimplemented),
            };

        let url = self.segment_url(&["find", external_id])?;
        let query = Query::new().param("external_source", external_source.query_value());
        let resource = format!("find/{external_id}");
        let found: FindResponse = project(&resource, self.send(&resource, url, &query).await?)?;

        let Some(candidates) = pick(found) else {
            tracing::warn!(%resource_type, "TMDB find response has no results for resource type");
            return Err(TmdbError::UnexpectedResponse);
        };

        match candidates.as_slice() {
            [] => Err(TmdbError::NotFound),
            [only] => Ok(only.id),
            _ => {
                tracing::warn!(
                    count = candidates.len(),
                    external_id,
                    "TMDB find returned multiple candidates"
                );
                Err(TmdbError::UnexpectedResponse)
            }
        }
    }
}
