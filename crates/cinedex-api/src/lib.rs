//! API client library for cinedex.
//!
//! Provides a rate-limit aware client for the TMDB API.

/// TMDB API client.
pub mod tmdb;
