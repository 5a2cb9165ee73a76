//! cinedex - TMDB movie and person lookup CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use cinedex_api::tmdb::{ExternalSource, LocalTmdbApi, Query, ResourceType, TmdbClient};

/// Environment variable that overrides the configured API key.
const API_KEY_ENV: &str = "TMDB_API_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Response language (overrides config; default: "en").
    #[arg(long, global = true)]
    language: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Manage the config file.
    Config(ConfigCommand),
    /// Get movie details.
    Movie(IdArgs),
    /// Get person details.
    Person(IdArgs),
    /// List the cast (or crew) of a movie.
    Credits(CreditsArgs),
    /// List backdrop (or poster) images of a movie.
    Images(ImagesArgs),
    /// List videos of a movie.
    Videos(IdArgs),
    /// Resolve an external ID (e.g. IMDb) to a TMDB ID.
    Find(FindArgs),
    /// Send a raw GET request and print the normalized JSON body.
    Get(GetArgs),
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Store the API key and/or the global `--language` as default.
    Set(ConfigSetArgs),
    /// Show the current config.
    Show,
}

/// Arguments for the `config set` subcommand.
#[derive(clap::Args)]
struct ConfigSetArgs {
    /// TMDB API key (v3).
    #[arg(long)]
    api_key: Option<String>,
}

/// Arguments for subcommands that take a single TMDB ID.
#[derive(clap::Args)]
struct IdArgs {
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `credits` subcommand.
#[derive(clap::Args)]
struct CreditsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,

    /// List crew instead of cast.
    #[arg(long)]
    crew: bool,
}

/// Arguments for the `images` subcommand.
#[derive(clap::Args)]
struct ImagesArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,

    /// List posters instead of backdrops.
    #[arg(long)]
    posters: bool,

    /// Comma-separated image languages (e.g. "en,null").
    #[arg(long, value_delimiter = ',')]
    include_image_language: Option<Vec<String>>,
}

/// Arguments for the `find` subcommand.
#[derive(clap::Args)]
struct FindArgs {
    /// Resource type: movie, person, tv.
    #[arg(long, default_value = "movie", value_parser = parse_resource_type)]
    resource_type: ResourceType,

    /// External source: imdb, tvdb, facebook, twitter, instagram.
    #[arg(long, default_value = "imdb", value_parser = parse_external_source)]
    source: ExternalSource,

    /// External ID (e.g. "tt0137523").
    #[arg(long, required = true)]
    external_id: String,
}

/// Arguments for the `get` subcommand.
#[derive(clap::Args)]
struct GetArgs {
    /// Resource path relative to the API root (e.g. "movie/550/keywords").
    resource: String,

    /// Query parameter as `key=value` (repeatable).
    #[arg(long = "param", value_parser = parse_key_value)]
    params: Vec<(String, String)>,
}

/// Parses a `key=value` pair.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{s}`"))?;
    if key.is_empty() {
        return Err(format!("invalid key=value: empty key in `{s}`"));
    }
    Ok((String::from(key), String::from(value)))
}

fn parse_resource_type(s: &str) -> Result<ResourceType, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn parse_external_source(s: &str) -> Result<ExternalSource, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

/// Builds a `TmdbClient` from the environment and the config file.
///
/// The API key comes from `TMDB_API_KEY`, falling back to `[tmdb] api_key`.
/// The language comes from `--language`, falling back to `[tmdb] language`.
///
/// # Errors
///
/// Returns an error if no API key is configured, the config cannot be
/// loaded, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(dir: Option<&PathBuf>, language: Option<&str>) -> Result<TmdbClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let api_key = std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .or(config.tmdb.api_key)
        .context(
            "TMDB API key is not configured (set TMDB_API_KEY or run `cinedex config set --api-key`)",
        )?;

    let mut builder = TmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(language) = language.map(String::from).or(config.tmdb.language) {
        builder = builder.language(language);
    }

    builder.build().context("failed to build TMDB client")
}

/// Runs the `config set` subcommand.
///
/// # Errors
///
/// Returns an error if nothing is given to set or the config cannot be saved.
#[instrument(skip_all)]
fn run_config_set(
    args: ConfigSetArgs,
    dir: Option<&PathBuf>,
    language: Option<&str>,
) -> Result<()> {
    if args.api_key.is_none() && language.is_none() {
        bail!("nothing to set: pass --api-key and/or --language");
    }

    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;

    if let Some(api_key) = args.api_key {
        config.tmdb.api_key = Some(api_key);
    }
    if let Some(language) = language {
        config.tmdb.language = Some(String::from(language));
    }

    config.save(&config_path).context("failed to save config")?;
    tracing::info!("Saved config to {}", config_path.display());

    Ok(())
}

/// Runs the `config show` subcommand. The API key is never printed.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    tracing::info!("Config file: {}", config_path.display());
    tracing::info!(
        "api_key: {}",
        if config.tmdb.api_key.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    tracing::info!(
        "language: {}",
        config.tmdb.language.as_deref().unwrap_or("(default)")
    );

    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movie(client: &TmdbClient, args: &IdArgs) -> Result<()> {
    let movie = client
        .movie(args.id)
        .await
        .context("TMDB movie request failed")?;

    tracing::info!("ID: {}", movie.id);
    tracing::info!("Title: {}", movie.title);
    tracing::info!("Original Title: {}", movie.original_title);
    tracing::info!("IMDb: {}", movie.imdb_id.as_deref().unwrap_or("-"));
    tracing::info!(
        "Release Date: {}",
        movie.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "Runtime: {}",
        movie
            .runtime
            .map_or_else(|| String::from("-"), |r| format!("{r}min"))
    );
    tracing::info!(
        "Revenue: {}",
        movie
            .revenue
            .map_or_else(|| String::from("-"), |r| r.to_string())
    );
    let genres: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
    tracing::info!("Genres: {}", genres.join(", "));

    Ok(())
}

/// Runs the `person` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_person(client: &TmdbClient, args: &IdArgs) -> Result<()> {
    let person = client
        .person(args.id)
        .await
        .context("TMDB person request failed")?;

    tracing::info!("ID: {}", person.id);
    tracing::info!("Name: {}", person.name);
    tracing::info!("IMDb: {}", person.imdb_id.as_deref().unwrap_or("-"));
    tracing::info!("Birthday: {}", person.birthday.as_deref().unwrap_or("-"));
    tracing::info!(
        "Place of Birth: {}",
        person.place_of_birth.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "Known For: {}",
        person.known_for_department.as_deref().unwrap_or("-")
    );

    Ok(())
}

/// Runs the `credits` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_credits(client: &TmdbClient, args: &CreditsArgs) -> Result<()> {
    if args.crew {
        let crew = client
            .movie_crew_credits(args.id)
            .await
            .context("TMDB movie credits request failed")?;
        tracing::info!("ID\tDepartment\tJob\t\tName");
        for member in &crew {
            tracing::info!(
                "{}\t{}\t{}\t{}",
                member.id,
                member.department,
                member.job,
                member.name
            );
        }
    } else {
        let cast = client
            .movie_cast_credits(args.id)
            .await
            .context("TMDB movie credits request failed")?;
        tracing::info!("Order\tID\tName\t\t\tCharacter");
        for member in &cast {
            tracing::info!(
                "{}\t{}\t{}\t{}",
                member.order,
                member.id,
                member.name,
                member.character
            );
        }
    }

    Ok(())
}

/// Runs the `images` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_images(client: &TmdbClient, args: &ImagesArgs) -> Result<()> {
    let languages: Option<Vec<&str>> = args
        .include_image_language
        .as_ref()
        .map(|langs| langs.iter().map(String::as_str).collect());
    let languages = languages.as_deref();

    let images = if args.posters {
        client.movie_poster_images(args.id, languages).await
    } else {
        client.movie_backdrop_images(args.id, languages).await
    }
    .context("TMDB movie images request failed")?;

    tracing::info!("Images: {}", images.len());
    for image in &images {
        tracing::info!(
            "{}\t{}x{}\t{}",
            image.file_path,
            image.width,
            image.height,
            image.iso_639_1.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Runs the `videos` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_videos(client: &TmdbClient, args: &IdArgs) -> Result<()> {
    let videos = client
        .movie_videos(args.id)
        .await
        .context("TMDB movie videos request failed")?;

    tracing::info!("Type\tSite\tKey\t\tName");
    for video in &videos {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            video.kind,
            video.site,
            video.key,
            video.name
        );
    }

    Ok(())
}

/// Runs the `find` subcommand.
///
/// # Errors
///
/// Returns an error if an argument is invalid or the lookup fails.
#[instrument(skip_all)]
async fn run_find(client: &TmdbClient, args: &FindArgs) -> Result<()> {
    let (resource_type, source) = (args.resource_type, args.source);

    let id = client
        .find_id(resource_type, source, &args.external_id)
        .await
        .with_context(|| {
            format!(
                "TMDB find failed for {source} ID {} ({resource_type})",
                args.external_id
            )
        })?;

    tracing::info!("TMDB ID: {id}");

    Ok(())
}

/// Runs the `get` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails or the body cannot be rendered.
#[instrument(skip_all)]
async fn run_get(client: &TmdbClient, args: &GetArgs) -> Result<()> {
    let query: Query = args
        .params
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    let body = client
        .execute(&args.resource, &query)
        .await
        .with_context(|| format!("TMDB request for {} failed", args.resource))?;

    let rendered = serde_json::to_string_pretty(&body).context("failed to render JSON")?;
    tracing::info!("{rendered}");

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    let language = cli.language.as_deref();

    match cli.command {
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Set(args) => run_config_set(args, dir, language),
            ConfigSubcommands::Show => run_config_show(dir),
        },
        Commands::Movie(args) => run_movie(&build_tmdb_client(dir, language)?, &args).await,
        Commands::Person(args) => run_person(&build_tmdb_client(dir, language)?, &args).await,
        Commands::Credits(args) => run_credits(&build_tmdb_client(dir, language)?, &args).await,
        Commands::Images(args) => run_images(&build_tmdb_client(dir, language)?, &args).await,
        Commands::Videos(args) => run_videos(&build_tmdb_client(dir, language)?, &args).await,
        Commands::Find(args) => run_find(&build_tmdb_client(dir, language)?, &args).await,
        Commands::Get(args) => run_get(&build_tmdb_client(dir, language)?, &args).await,
    }
}
