// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::Append;
use crate::Error;
use crate::ErrorKind;
use crate::enrich::Enrich;
use crate::logger::log_impl::Logger;
use crate::property::DefaultPropertyFactory;
use crate::property::PropertyFactory;

/// Create a new empty [`LoggerBuilder`] instance for configuring enrichment and appenders.
///
/// # Examples
///
/// ```
/// use logforth_enrich::append;
///
/// let logger = logforth_enrich::builder()
///     .with_machine_name()
///     .append(append::Stderr::default())
///     .build();
/// ```
pub fn builder() -> LoggerBuilder {
    LoggerBuilder {
        max_level: log::LevelFilter::Trace,
        enrichers: vec![],
        factory: Box::new(DefaultPropertyFactory::default()),
        appends: vec![],
    }
}

/// A builder for configuring a [`Logger`] and optionally installing it as the global logger.
///
/// Enrichers run in the order they are registered. Since an enricher never replaces a
/// property that is already present, the first registered enricher for a name wins.
///
/// # Examples
///
/// ```
/// use logforth_enrich::append;
///
/// # fn main() -> Result<(), logforth_enrich::Error> {
/// let logger = logforth_enrich::builder()
///     .max_level(log::LevelFilter::Info)
///     .with_property("service", "checkout")?
///     .with_environment("DEPLOYMENT")?
///     .with_function("pid", || Ok(std::process::id().to_string()))?
///     .append(append::Stdout::default())
///     .build();
/// # Ok(())
/// # }
/// ```
#[must_use = "call `apply` to set the global logger or `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    max_level: log::LevelFilter,
    // registered in order; invoked in the same order
    pub(super) enrichers: Vec<Box<dyn Enrich>>,
    factory: Box<dyn PropertyFactory>,
    appends: Vec<Box<dyn Append>>,
}

impl LoggerBuilder {
    /// Set the most verbose level that will be logged.
    ///
    /// Default to [`log::LevelFilter::Trace`].
    pub fn max_level(mut self, level: log::LevelFilter) -> Self {
        self.max_level = level;
        self
    }

    /// Read the max level from the environment variable `variable`, e.g., `RUST_LOG=info`.
    ///
    /// An unset or blank variable leaves the current max level untouched.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](ErrorKind::InvalidArgument) error if the variable holds
    /// something other than a level name.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), logforth_enrich::Error> {
    /// let logger = logforth_enrich::builder()
    ///     .max_level_from_env("MY_APP_LOG")?
    ///     .build();
    /// # Ok(())
    /// # }
    /// ```
    pub fn max_level_from_env(self, variable: &str) -> Result<Self, Error> {
        let Ok(value) = std::env::var(variable) else {
            return Ok(self);
        };

        let value = value.trim();
        if value.is_empty() {
            return Ok(self);
        }

        let level = value.parse::<log::LevelFilter>().map_err(|err| {
            Error::new(ErrorKind::InvalidArgument, "malformed level")
                .with_context("variable", variable)
                .with_context("value", value)
                .with_source(err)
        })?;
        Ok(self.max_level(level))
    }

    /// Set the factory enrichers create properties with.
    ///
    /// Default to [`DefaultPropertyFactory`].
    pub fn property_factory(mut self, factory: impl Into<Box<dyn PropertyFactory>>) -> Self {
        self.factory = factory.into();
        self
    }

    /// Register an enricher.
    ///
    /// # Examples
    ///
    /// ```
    /// use logforth_enrich::enrich::EnvironmentEnricher;
    ///
    /// let logger = logforth_enrich::builder()
    ///     .enrich(EnvironmentEnricher::machine_name())
    ///     .build();
    /// ```
    pub fn enrich(mut self, enricher: impl Into<Box<dyn Enrich>>) -> Self {
        self.enrichers.push(enricher.into());
        self
    }

    /// Add an appender.
    ///
    /// # Examples
    ///
    /// ```
    /// use logforth_enrich::append;
    ///
    /// let logger = logforth_enrich::builder()
    ///     .append(append::Stdout::default())
    ///     .build();
    /// ```
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.appends.push(append.into());
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        Logger::new(self.max_level, self.enrichers, self.factory, self.appends)
    }

    /// Set up the global logger with the configured enrichers and appenders.
    ///
    /// This should be called early in the execution of a Rust program. Any log events that occur
    /// before initialization will be ignored.
    ///
    /// # Errors
    ///
    /// Return an error if a global logger has already been set.
    ///
    /// # Examples
    ///
    /// ```
    /// if logforth_enrich::builder().try_apply().is_err() {
    ///     eprintln!("failed to set logger");
    /// }
    /// ```
    pub fn try_apply(self) -> Result<(), Error> {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self.build())).map_err(|err| {
            Error::new(ErrorKind::Unexpected, "failed to set global logger").with_source(err)
        })?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Set up the global logger with the configured enrichers and appenders.
    ///
    /// This should be called early in the execution of a Rust program. Any log events that occur
    /// before initialization will be ignored.
    ///
    /// # Panics
    ///
    /// Panic if the global logger has already been set.
    ///
    /// # Examples
    ///
    /// ```
    /// logforth_enrich::builder().apply();
    /// ```
    pub fn apply(self) {
        self.try_apply()
            .expect("LoggerBuilder::apply must be called before the global logger initialized");
    }
}
