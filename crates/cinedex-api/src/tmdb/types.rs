//! TMDB API response types.
//!
//! Every type is deserialized from the key-normalized body, so field
//! names are matched in lowerCamelCase. Missing fields fall back to
//! their defaults.

use serde::{Deserialize, Serialize};

// --- Movie ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// IMDb ID (`tt…`).
    pub imdb_id: Option<String>,
    /// Localized title.
    pub title: String,
    /// Original title.
    pub original_title: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Release status (e.g., "Released").
    pub status: Option<String>,
    /// Runtime in minutes. `None` when unknown.
    pub runtime: Option<u32>,
    /// Revenue in USD. `None` when unknown.
    pub revenue: Option<u64>,
    /// Budget in USD.
    pub budget: u64,
    /// Genres.
    pub genres: Vec<Genre>,
    /// Production companies.
    pub production_companies: Vec<ProductionCompany>,
    /// Production countries.
    pub production_countries: Vec<ProductionCountry>,
    /// Spoken languages.
    pub spoken_languages: Vec<SpokenLanguage>,
    /// Collection this movie belongs to.
    pub belongs_to_collection: Option<Collection>,
    /// Popularity score.
    pub popularity: f64,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u64,
    /// Adult flag.
    pub adult: bool,
    /// Video flag.
    pub video: bool,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path.
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1).
    pub origin_country: Option<String>,
}

/// Production country entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductionCountry {
    /// ISO 3166-1 code.
    pub iso_3166_1: String,
    /// Country name.
    pub name: String,
}

/// Spoken language entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpokenLanguage {
    /// ISO 639-1 code.
    pub iso_639_1: String,
    /// Localized language name.
    pub name: String,
    /// English language name.
    pub english_name: Option<String>,
}

/// Collection summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Collection {
    /// Collection ID.
    pub id: u64,
    /// Collection name.
    pub name: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

// --- Movie Credits ---

/// A cast member in `movie/{movie_id}/credits`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieCastCredit {
    /// TMDB person ID.
    pub id: u64,
    /// Cast ID within the movie.
    pub cast_id: u64,
    /// Credit ID.
    pub credit_id: String,
    /// Person name.
    pub name: String,
    /// Original person name.
    pub original_name: Option<String>,
    /// Character name.
    pub character: String,
    /// Billing order.
    pub order: u32,
    /// Gender (0 = unknown, 1 = female, 2 = male, 3 = non-binary).
    pub gender: Option<u8>,
    /// Department the person is known for.
    pub known_for_department: Option<String>,
    /// Popularity score.
    pub popularity: f64,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Adult flag.
    pub adult: bool,
}

/// A crew member in `movie/{movie_id}/credits`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieCrewCredit {
    /// TMDB person ID.
    pub id: u64,
    /// Credit ID.
    pub credit_id: String,
    /// Person name.
    pub name: String,
    /// Original person name.
    pub original_name: Option<String>,
    /// Department (e.g., "Directing").
    pub department: String,
    /// Job (e.g., "Director").
    pub job: String,
    /// Gender (0 = unknown, 1 = female, 2 = male, 3 = non-binary).
    pub gender: Option<u8>,
    /// Department the person is known for.
    pub known_for_department: Option<String>,
    /// Popularity score.
    pub popularity: f64,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Adult flag.
    pub adult: bool,
}

// --- Movie Images ---

/// A backdrop or poster in `movie/{movie_id}/images`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieImage {
    /// Image path.
    pub file_path: String,
    /// Aspect ratio.
    pub aspect_ratio: f64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Image language (ISO 639-1), `None` for language-neutral images.
    pub iso_639_1: Option<String>,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u64,
}

// --- Movie Videos ---

/// A video in `movie/{movie_id}/videos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieVideo {
    /// Video ID.
    pub id: String,
    /// Site-specific key (e.g., a YouTube video ID).
    pub key: String,
    /// Video name.
    pub name: String,
    /// Hosting site (e.g., "YouTube").
    pub site: String,
    /// Resolution (e.g., 1080).
    pub size: u32,
    /// Video type (e.g., "Trailer").
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the video is official.
    pub official: bool,
    /// Language (ISO 639-1).
    pub iso_639_1: Option<String>,
    /// Country (ISO 3166-1).
    pub iso_3166_1: Option<String>,
    /// Publication timestamp.
    pub published_at: Option<String>,
}

// --- Person ---

/// Response from `person/{person_id}` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    /// TMDB person ID.
    pub id: u64,
    /// IMDb ID (`nm…`).
    pub imdb_id: Option<String>,
    /// Name.
    pub name: String,
    /// Other names.
    pub also_known_as: Vec<String>,
    /// Biography.
    pub biography: Option<String>,
    /// Birthday (YYYY-MM-DD).
    pub birthday: Option<String>,
    /// Day of death (YYYY-MM-DD).
    pub deathday: Option<String>,
    /// Place of birth.
    pub place_of_birth: Option<String>,
    /// Gender (0 = unknown, 1 = female, 2 = male, 3 = non-binary).
    pub gender: Option<u8>,
    /// Department the person is known for.
    pub known_for_department: Option<String>,
    /// Popularity score.
    pub popularity: f64,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Adult flag.
    pub adult: bool,
}

// --- Envelopes (projected by the client) ---

/// `movie/{movie_id}/credits` body.
#[derive(Debug, Deserialize)]
pub(crate) struct MovieCreditsResponse {
    pub cast: Vec<MovieCastCredit>,
    pub crew: Vec<MovieCrewCredit>,
}

/// `movie/{movie_id}/images` body.
#[derive(Debug, Deserialize)]
pub(crate) struct MovieImagesResponse {
    pub backdrops: Vec<MovieImage>,
    pub posters: Vec<MovieImage>,
}

/// `movie/{movie_id}/videos` body.
#[derive(Debug, Deserialize)]
pub(crate) struct MovieVideosResponse {
    pub results: Vec<MovieVideo>,
}

/// `find/{external_id}` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FindResponse {
    pub movie_results: Option<Vec<FindCandidate>>,
    pub person_results: Option<Vec<FindCandidate>>,
}

/// A single `find` candidate. Only the ID is projected.
#[derive(Debug, Deserialize)]
pub(crate) struct FindCandidate {
    pub id: u64,
}
