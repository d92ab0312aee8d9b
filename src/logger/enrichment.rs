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

//! Shorthands for registering the built-in enrichers.
//!
//! Every method validates its arguments right away, so a misconfigured enricher is reported
//! while the logger is being built, never while an event is being logged.

use value_bag::ValueBag;

use crate::Error;
use crate::enrich::EnvironmentEnricher;
use crate::enrich::FunctionEnricher;
use crate::enrich::KeyValueEnricher;
use crate::event::LogEvent;
use crate::logger::LoggerBuilder;

impl LoggerBuilder {
    /// Enrich log events with a fixed property.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error if `key` is
    /// blank.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), logforth_enrich::Error> {
    /// let logger = logforth_enrich::builder()
    ///     .with_property("service", "checkout")?
    ///     .with_property("shard", 7)?
    ///     .build();
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_property<'v>(
        self,
        key: impl Into<String>,
        value: impl Into<ValueBag<'v>>,
    ) -> Result<Self, Error> {
        Ok(self.enrich(KeyValueEnricher::new(key, value)?))
    }

    /// Enrich log events with the environment variable `variable`, under its own name.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error if `variable`
    /// is not a valid environment variable name.
    pub fn with_environment(self, variable: impl Into<String>) -> Result<Self, Error> {
        Ok(self.enrich(EnvironmentEnricher::new(variable)?))
    }

    /// Enrich log events with the environment variable `variable`, under the name `property`.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error if `variable`
    /// is not a valid environment variable name or `property` is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), logforth_enrich::Error> {
    /// let logger = logforth_enrich::builder()
    ///     .with_environment_as("K_REVISION", "Revision")?
    ///     .build();
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_environment_as(
        self,
        variable: impl Into<String>,
        property: impl Into<String>,
    ) -> Result<Self, Error> {
        Ok(self.enrich(EnvironmentEnricher::with_property(variable, property)?))
    }

    /// Enrich log events with the machine name, as `MachineName`.
    ///
    /// See [`EnvironmentEnricher::machine_name`].
    pub fn with_machine_name(self) -> Self {
        self.enrich(EnvironmentEnricher::machine_name())
    }

    /// Enrich log events with the user name, as `UserName`.
    ///
    /// See [`EnvironmentEnricher::user_name`].
    pub fn with_user_name(self) -> Self {
        self.enrich(EnvironmentEnricher::user_name())
    }

    /// Enrich log events with the result of `f`.
    ///
    /// Errors returned by `f` and panics in `f` are reported to the
    /// [self-log](crate::self_log) and the event is logged without the property. A panic
    /// still runs the process panic hook first, which prints to stderr by default; see
    /// [`FunctionEnricher`].
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error if `key` is
    /// blank.
    pub fn with_function<F>(self, key: impl Into<String>, f: F) -> Result<Self, Error>
    where
        F: Fn() -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Ok(self.enrich(FunctionEnricher::new(key, f)?))
    }

    /// Enrich log events with the result of calling `f` with `parameter`.
    ///
    /// Errors returned by `f` and panics in `f` are reported to the
    /// [self-log](crate::self_log) and the event is logged without the property. A panic
    /// still runs the process panic hook first, which prints to stderr by default; see
    /// [`FunctionEnricher`].
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error if `key` is
    /// blank.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), logforth_enrich::Error> {
    /// let logger = logforth_enrich::builder()
    ///     .with_function_parameter("Len", |s: &&str| Ok(s.len().to_string()), "hello")?
    ///     .build();
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_function_parameter<P, F>(
        self,
        key: impl Into<String>,
        f: F,
        parameter: P,
    ) -> Result<Self, Error>
    where
        P: Send + Sync + 'static,
        F: Fn(&P) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Ok(self.enrich(FunctionEnricher::with_parameter(key, f, parameter)?))
    }

    /// Enrich log events with the result of calling `f` with the event itself.
    ///
    /// Errors returned by `f` and panics in `f` are reported to the
    /// [self-log](crate::self_log) and the event is logged without the property. A panic
    /// still runs the process panic hook first, which prints to stderr by default; see
    /// [`FunctionEnricher`].
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error if `key` is
    /// blank.
    pub fn with_function_event<F>(self, key: impl Into<String>, f: F) -> Result<Self, Error>
    where
        F: Fn(&LogEvent) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Ok(self.enrich(FunctionEnricher::with_event(key, f)?))
    }
}

#[cfg(test)]
mod tests {
    use crate::ErrorKind;
    use crate::logger::builder;

    #[test]
    fn test_registration_keeps_order() {
        let b = builder()
            .with_property("a", 1)
            .unwrap()
            .with_machine_name()
            .with_user_name()
            .with_function("b", || Ok("b".to_string()))
            .unwrap();

        let names = b
            .enrichers
            .iter()
            .map(|e| format!("{e:?}"))
            .collect::<Vec<_>>();
        assert_eq!(names.len(), 4);
        assert!(names[0].starts_with("KeyValueEnricher"));
        assert!(names[1].contains("MachineName"));
        assert!(names[2].contains("UserName"));
        assert!(names[3].starts_with("FunctionEnricher"));
    }

    #[test]
    fn test_invalid_arguments_fail_at_registration() {
        let err = builder().with_property("", "value").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = builder().with_environment("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = builder().with_environment_as("HOME", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = builder().with_function(" ", || Ok(String::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = builder()
            .with_function_parameter("", |n: &u32| Ok(n.to_string()), 1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = builder()
            .with_function_event("", |e| Ok(e.target().to_string()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
