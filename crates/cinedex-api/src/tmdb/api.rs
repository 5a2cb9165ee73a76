//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::TmdbError;
use super::params::{ExternalSource, ResourceType};
use super::types::{Movie, MovieCastCredit, MovieCrewCredit, MovieImage, MovieVideo, Person};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches movie details.
    ///
    /// A `revenue` or `runtime` of `0` is reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::NotFound`] for an unknown ID, or any other
    /// [`TmdbError`] from the request.
    async fn movie(&self, movie_id: u64) -> Result<Movie, TmdbError>;

    /// Fetches backdrop images of a movie.
    ///
    /// `include_image_language` is sent comma-joined; `None` omits it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body has no `backdrops`.
    async fn movie_backdrop_images(
        &self,
        movie_id: u64,
        include_image_language: Option<&[&str]>,
    ) -> Result<Vec<MovieImage>, TmdbError>;

    /// Fetches poster images of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body has no `posters`.
    async fn movie_poster_images(
        &self,
        movie_id: u64,
        include_image_language: Option<&[&str]>,
    ) -> Result<Vec<MovieImage>, TmdbError>;

    /// Fetches the cast of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body has no `cast`.
    async fn movie_cast_credits(&self, movie_id: u64) -> Result<Vec<MovieCastCredit>, TmdbError>;

    /// Fetches the crew of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body has no `crew`.
    async fn movie_crew_credits(&self, movie_id: u64) -> Result<Vec<MovieCrewCredit>, TmdbError>;

    /// Fetches videos (trailers, teasers, ...) of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body has no `results`.
    async fn movie_videos(&self, movie_id: u64) -> Result<Vec<MovieVideo>, TmdbError>;

    /// Fetches person details.
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::NotFound`] for an unknown ID, or any other
    /// [`TmdbError`] from the request.
    async fn person(&self, person_id: u64) -> Result<Person, TmdbError>;

    /// Resolves an external ID to a TMDB ID.
    ///
    /// # Errors
    ///
    /// - [`TmdbError::Unimplemented`] for any combination other than
    ///   movie/person with IMDb (no request is made).
    /// - [`TmdbError::NotFound`] when no candidate matches.
    /// - [`TmdbError::UnexpectedResponse`] when more than one candidate matches.
    async fn find_id(
        &self,
        resource_type: ResourceType,
        external_source: ExternalSource,
        external_id: &str,
    ) -> Result<u64, TmdbError>;
}
