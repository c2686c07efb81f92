//! Suite context: everything a scenario reads, built once at startup.

use std::path::Path;
use std::sync::Arc;

use restcheck_application::{
    ApplicationError, Clock, Config, HttpClientError, RestClient, SuiteSettings,
};
use restcheck_infrastructure::{
    ConfigLoadError, ReqwestHttpClient, SchemaCatalog, SchemaError, SystemClock, TestRunner,
    load_config_file, load_config_str,
};
use thiserror::Error;
use tracing::debug;

/// Configuration shipped with the binary.
pub const BUNDLED_CONFIG: &str = include_str!("../config/application.yml");

/// Errors raised while assembling the suite context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Load(#[from] ConfigLoadError),

    /// A required setting is missing or invalid.
    #[error(transparent)]
    Settings(#[from] ApplicationError),

    /// An HTTP transport could not be created.
    #[error("cannot create HTTP client: {0}")]
    Transport(#[from] HttpClientError),

    /// A bundled schema does not parse.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Loads `path` when given, the bundled configuration otherwise.
///
/// # Errors
///
/// Fails when the file cannot be read or is not a YAML mapping of scalars.
pub fn load_config(path: Option<&Path>) -> Result<Config, ContextError> {
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration file");
            load_config_file(path)?
        }
        None => load_config_str(BUNDLED_CONFIG)?,
    };
    Ok(config)
}

/// Shared, read-only state handed to every scenario.
pub struct SuiteContext {
    /// Resolved settings.
    pub settings: SuiteSettings,
    /// Client for the blog API.
    pub blog: RestClient,
    /// Client for the film API, sharing the blog client's connection pool.
    pub films: RestClient,
    /// Blog client that skips certificate validation.
    pub relaxed_blog: RestClient,
    /// Assertion evaluator.
    pub runner: TestRunner,
}

impl SuiteContext {
    /// Builds the context from `config` using the system clock.
    ///
    /// # Errors
    ///
    /// Fails on missing settings, transport setup errors or a broken bundled schema.
    pub fn new(config: &Config) -> Result<Self, ContextError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Builds the context with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`SuiteContext::new`].
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, ContextError> {
        let settings = SuiteSettings::from_config(config)?;

        let shared = Arc::new(ReqwestHttpClient::new(&settings.connection)?);
        let relaxed = Arc::new(ReqwestHttpClient::new(&settings.connection.relaxed_tls())?);

        let blog = RestClient::new(shared.clone(), settings.base_url.clone());
        let films = RestClient::new(shared, settings.films_base_url.clone());
        let relaxed_blog = RestClient::new(relaxed, settings.base_url.clone());

        let runner = TestRunner::new(SchemaCatalog::bundled()?, clock);

        Ok(Self {
            settings,
            blog,
            films,
            relaxed_blog,
            runner,
        })
    }
}
