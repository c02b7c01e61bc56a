use std::fmt::Display;

use garde::Validate;
use serde::{Deserialize, Serialize};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[garde(custom(|value: &String, (): &()| {
        if value.parse::<tracing::Level>().is_ok() {
            return Ok(())
        }
        Err(garde::Error::new("invalid log level"))
    }))]
    pub level: String,
    /// Extra `EnvFilter` directives, e.g. `tessera_crypto=debug`.
    #[garde(inner(ascii, length(min = 1)))]
    pub filter: Vec<String>,
    #[garde(skip)]
    pub ansi: bool,
    /// Log span close events with their timings.
    #[garde(skip)]
    pub span_events: bool,
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ level: {}, filter: [{}], ansi: {}, span_events: {} }}",
            self.level,
            self.filter.join(","),
            self.ansi,
            self.span_events
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            filter: vec![],
            ansi: cfg!(debug_assertions),
            span_events: false,
        }
    }
}

impl Config {
    /// Directives in `EnvFilter` syntax, the level last.
    #[must_use]
    pub fn directives(&self) -> String {
        let mut directives = self.filter.clone();
        directives.push(self.level.clone());
        directives.join(",")
    }
}
