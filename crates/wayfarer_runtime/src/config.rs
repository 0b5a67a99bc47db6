//! Server configuration.
//!
//! Values come from defaults, then the environment
//! (`WAYFARER_FRAME_MS`, `WAYFARER_TIME_SCALE`, `WAYFARER_SEED`), then
//! command-line flags. Each layer overrides the one before it.

use std::str::FromStr;
use std::time::Duration;

use wayfarer_engine::ClockConfig;
use wayfarer_foundation::{Error, Result};

/// Environment variable holding the frame length in milliseconds.
pub const ENV_FRAME_MS: &str = "WAYFARER_FRAME_MS";
/// Environment variable holding the time scale.
pub const ENV_TIME_SCALE: &str = "WAYFARER_TIME_SCALE";
/// Environment variable holding the world seed.
pub const ENV_SEED: &str = "WAYFARER_SEED";

/// Configuration for one server run.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// World clock settings.
    pub clock: ClockConfig,
    /// Seed for the world's random number generator.
    pub seed: u64,
    /// Print a world summary on exit.
    pub dump_world: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            seed: 42,
            dump_world: false,
        }
    }
}

impl ServerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration whose game time runs `scale` times faster than wall time.
    #[must_use]
    pub fn accelerated(scale: f64) -> Self {
        Self::default().with_clock(ClockConfig::accelerated(scale))
    }

    /// Sets the clock configuration.
    #[must_use]
    pub fn with_clock(mut self, clock: ClockConfig) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the frame length.
    #[must_use]
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.clock = self.clock.with_frame(frame);
        self
    }

    /// Sets the time scale.
    #[must_use]
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.clock = self.clock.with_time_scale(time_scale);
        self
    }

    /// Sets the world seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables the exit summary.
    #[must_use]
    pub const fn with_dump_world(mut self, dump_world: bool) -> Self {
        self.dump_world = dump_world;
        self
    }

    /// Reads the defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::default().with_vars(|key| std::env::var(key).ok())
    }

    /// Applies variables from `lookup`, keyed like the process environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set to an invalid value.
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_FRAME_MS) {
            self = self.with_frame(Duration::from_millis(parse_value(ENV_FRAME_MS, &raw)?));
        }
        if let Some(raw) = lookup(ENV_TIME_SCALE) {
            self = self.with_time_scale(parse_value(ENV_TIME_SCALE, &raw)?);
        }
        if let Some(raw) = lookup(ENV_SEED) {
            self = self.with_seed(parse_value(ENV_SEED, &raw)?);
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks that the configuration can drive a clock.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero frame or a non-positive scale.
    pub fn validate(&self) -> Result<()> {
        self.clock.validate()
    }
}

fn parse_value<T: FromStr>(source: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::config(format!("invalid {source} value: {raw}")))
}

// =============================================================================
// Command Line
// =============================================================================

/// Options read from the command line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliOptions {
    /// `-h`/`--help` was given.
    pub show_help: bool,
    /// `-V`/`--version` was given.
    pub show_version: bool,
    /// `--frame-ms N`.
    pub frame_ms: Option<u64>,
    /// `--time-scale X`.
    pub time_scale: Option<f64>,
    /// `--seed N`.
    pub seed: Option<u64>,
    /// `--name NAME`, the console player's name.
    pub name: Option<String>,
    /// `--dump-world`.
    pub dump_world: bool,
}

impl CliOptions {
    /// Parses arguments, not including the program name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown options, missing values, or
    /// values that do not parse.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut options = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => options.show_help = true,
                "-V" | "--version" => options.show_version = true,
                "--dump-world" => options.dump_world = true,
                "--frame-ms" => options.frame_ms = Some(parse_value(arg, value_of(arg, iter.next())?)?),
                "--time-scale" => {
                    options.time_scale = Some(parse_value(arg, value_of(arg, iter.next())?)?);
                }
                "--seed" => options.seed = Some(parse_value(arg, value_of(arg, iter.next())?)?),
                "--name" => options.name = Some(value_of(arg, iter.next())?.to_string()),
                other => return Err(Error::config(format!("unknown option: {other}"))),
            }
        }
        Ok(options)
    }

    /// Overrides `config` with every option that was given.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the result is invalid.
    pub fn apply(&self, mut config: ServerConfig) -> Result<ServerConfig> {
        if let Some(ms) = self.frame_ms {
            config = config.with_frame(Duration::from_millis(ms));
        }
        if let Some(scale) = self.time_scale {
            config = config.with_time_scale(scale);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.dump_world {
            config = config.with_dump_world(true);
        }
        config.validate()?;
        Ok(config)
    }
}

fn value_of<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| Error::config(format!("{flag} requires a value")))
}
