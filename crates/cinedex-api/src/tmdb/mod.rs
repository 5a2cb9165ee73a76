//! TMDB API client module.
//!
//! Sends authenticated GET requests to TMDB API v3, waits out exhausted
//! rate-limit windows, normalizes response keys to lowerCamelCase, and
//! projects bodies into typed movie and person records.

mod api;
mod client;
mod error;
mod normalize;
mod params;
mod rate_limit;
mod sleeper;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_LANGUAGE, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::TmdbError;
pub use normalize::{camel_case, deep_map_keys, normalize_keys};
pub use params::{ExternalSource, Query, QueryValue, ResourceType};
pub use rate_limit::{MIN_COOLDOWN, RateLimitStatus, cooldown_until};
pub use sleeper::{LocalSleeper, Sleeper, TokioSleeper};
pub use types::{
    Collection, Genre, Movie, MovieCastCredit, MovieCrewCredit, MovieImage, MovieVideo, Person,
    ProductionCompany, ProductionCountry, SpokenLanguage,
};
