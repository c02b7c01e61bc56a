use config::Config;
use tracing::{info, subscriber::DefaultGuard, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
    Layer,
    Registry,
};

pub mod config;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to initialize telemetry: {0}")]
    Initialization(#[from] TryInitError),
}

/// Logging setup for the application.
///
/// Everything is written to stderr so stdout stays reserved for program output.
pub struct Telemetry {
    config: Config,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Telemetry {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Temporary subscriber used before the configuration is loaded.
    #[must_use]
    pub fn bootstrap() -> DefaultGuard {
        tracing::subscriber::set_default(
            Registry::default()
                .with(Self::fmt_layer::<Registry>(cfg!(debug_assertions), FmtSpan::NONE))
                .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())),
        )
    }

    /// Install the global subscriber.
    ///
    /// # Errors
    /// If a global default subscriber has already been set, this function will return an error.
    pub fn init(self) -> Result<Self, Error> {
        Registry::default()
            .with(Self::fmt_layer::<Registry>(self.config.ansi, self.span_events()))
            .with(self.get_filter())
            .try_init()?;

        info!(config = %self.config, "initialized global telemetry");
        Ok(self)
    }

    /// Install the subscriber for the current thread only, until the guard is dropped.
    ///
    /// # Errors
    /// Never fails at the moment, see [`Telemetry::init`].
    pub fn init_scoped(self) -> Result<(Self, DefaultGuard), Error> {
        let guard = tracing::subscriber::set_default(
            Registry::default()
                .with(Self::fmt_layer::<Registry>(self.config.ansi, self.span_events()))
                .with(self.get_filter()),
        );

        info!(config = %self.config, "initialized scoped telemetry");
        Ok((self, guard))
    }

    fn span_events(&self) -> FmtSpan {
        if self.config.span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn get_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.config.directives()))
    }

    fn fmt_layer<S>(ansi: bool, span_events: FmtSpan) -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_thread_names(true)
            .with_span_events(span_events)
    }
}
