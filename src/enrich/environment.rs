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

use std::env;

use value_bag::ValueBag;

use crate::Error;
use crate::enrich::Enrich;
use crate::enrich::is_blank;
use crate::event::LogEvent;
use crate::property::PropertyFactory;

const MACHINE_NAME_PROPERTY: &str = "MachineName";
const USER_NAME_PROPERTY: &str = "UserName";
const USER_NAME_VARIABLE: &str = "UserName";

/// An enricher that attaches the value of an environment variable.
///
/// The variable is read on every event, so changes to the process environment are picked
/// up. A variable that is unset, empty, or whitespace only adds nothing.
///
/// ## Example
///
/// ```rust
/// use logforth_enrich::enrich::EnvironmentEnricher;
///
/// let enricher = EnvironmentEnricher::new("DEPLOYMENT").unwrap();
/// assert_eq!(enricher.property(), "DEPLOYMENT");
///
/// let enricher = EnvironmentEnricher::with_property("DEPLOYMENT", "Deployment").unwrap();
/// assert_eq!(enricher.property(), "Deployment");
/// ```
#[derive(Debug, Clone)]
pub struct EnvironmentEnricher {
    variable: String,
    property: String,
}

impl EnvironmentEnricher {
    /// Create an enricher that attaches `variable` under its own name.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error if `variable`
    /// is not a name the environment can be queried with.
    pub fn new(variable: impl Into<String>) -> Result<Self, Error> {
        let variable = variable.into();
        check_variable(&variable)?;
        let property = variable.clone();
        Ok(Self { variable, property })
    }

    /// Create an enricher that attaches `variable` under the name `property`.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error if `variable`
    /// is not a name the environment can be queried with, or if `property` is blank.
    pub fn with_property(
        variable: impl Into<String>,
        property: impl Into<String>,
    ) -> Result<Self, Error> {
        let variable = variable.into();
        let property = property.into();
        check_variable(&variable)?;
        if is_blank(&property) {
            return Err(Error::invalid_argument("property name must not be blank")
                .with_context("variable", variable)
                .with_context("property", property));
        }
        Ok(Self { variable, property })
    }

    /// Create an enricher that attaches the machine name as `MachineName`.
    ///
    /// The name is read from `COMPUTERNAME` on Windows and from `HOSTNAME` elsewhere.
    pub fn machine_name() -> Self {
        let variable = if cfg!(windows) {
            "COMPUTERNAME"
        } else {
            "HOSTNAME"
        };

        Self {
            variable: variable.to_string(),
            property: MACHINE_NAME_PROPERTY.to_string(),
        }
    }

    /// Create an enricher that attaches the `UserName` environment variable as `UserName`.
    ///
    /// `UserName` is a Windows convention; other platforms usually leave it unset, in which
    /// case nothing is attached.
    pub fn user_name() -> Self {
        Self {
            variable: USER_NAME_VARIABLE.to_string(),
            property: USER_NAME_PROPERTY.to_string(),
        }
    }

    /// The environment variable read on each event.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The name of the attached property.
    pub fn property(&self) -> &str {
        &self.property
    }
}

impl Enrich for EnvironmentEnricher {
    fn enrich(&self, event: &mut LogEvent, factory: &dyn PropertyFactory) {
        let Some(value) = env::var_os(&self.variable) else {
            return;
        };

        let value = value.to_string_lossy();
        if is_blank(&value) {
            return;
        }

        let property = factory.create_property(&self.property, ValueBag::from(&*value));
        event.add_property_if_absent(property);
    }
}

fn check_variable(variable: &str) -> Result<(), Error> {
    // the platform lookup rejects these names
    if variable.is_empty() || variable.contains(['=', '\0']) {
        return Err(Error::invalid_argument(
            "environment variable name must be non-empty and contain no '=' or NUL",
        )
        .with_context("variable", variable));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::property::DefaultPropertyFactory;

    fn enrich(enricher: &EnvironmentEnricher) -> LogEvent {
        let mut event = LogEvent::builder().build();
        enricher.enrich(&mut event, &DefaultPropertyFactory::default());
        event
    }

    #[test]
    fn test_attaches_variable_under_its_own_name() {
        let name = "LOGFORTH_ENRICH_TEST_OWN_NAME";
        unsafe { env::set_var(name, "42") };

        let event = enrich(&EnvironmentEnricher::new(name).unwrap());
        assert_eq!(event.property(name).unwrap().to_string(), "42");
    }

    #[test]
    fn test_attaches_variable_under_custom_name() {
        let name = "LOGFORTH_ENRICH_TEST_CUSTOM_NAME";
        unsafe { env::set_var(name, "blue") };

        let event = enrich(&EnvironmentEnricher::with_property(name, "Color").unwrap());
        assert_eq!(event.property("Color").unwrap().to_string(), "blue");
        assert!(event.property(name).is_none());
    }

    #[test]
    fn test_skips_unset_empty_and_blank_values() {
        let name = "LOGFORTH_ENRICH_TEST_BLANK";
        let enricher = EnvironmentEnricher::new(name).unwrap();

        unsafe { env::remove_var(name) };
        assert!(enrich(&enricher).properties().is_empty());

        unsafe { env::set_var(name, "") };
        assert!(enrich(&enricher).properties().is_empty());

        unsafe { env::set_var(name, " \t ") };
        assert!(enrich(&enricher).properties().is_empty());
    }

    #[test]
    fn test_reads_variable_on_every_event() {
        let name = "LOGFORTH_ENRICH_TEST_CHANGING";
        let enricher = EnvironmentEnricher::new(name).unwrap();

        unsafe { env::set_var(name, "one") };
        assert_eq!(enrich(&enricher).property(name).unwrap().to_string(), "one");

        unsafe { env::set_var(name, "two") };
        assert_eq!(enrich(&enricher).property(name).unwrap().to_string(), "two");
    }

    #[test]
    fn test_does_not_overwrite_existing_property() {
        let name = "LOGFORTH_ENRICH_TEST_EXISTING";
        unsafe { env::set_var(name, "from-env") };

        let enricher = EnvironmentEnricher::new(name).unwrap();
        let mut event = LogEvent::builder().property(name, "from-origin").build();
        enricher.enrich(&mut event, &DefaultPropertyFactory::default());

        assert_eq!(event.property(name).unwrap().to_string(), "from-origin");
    }

    #[test]
    fn test_machine_name_variable_depends_on_platform() {
        let enricher = EnvironmentEnricher::machine_name();
        assert_eq!(enricher.property(), "MachineName");
        if cfg!(windows) {
            assert_eq!(enricher.variable(), "COMPUTERNAME");
        } else {
            assert_eq!(enricher.variable(), "HOSTNAME");
        }
    }

    #[test]
    fn test_user_name_reads_user_name_variable() {
        let enricher = EnvironmentEnricher::user_name();
        assert_eq!(enricher.variable(), "UserName");
        assert_eq!(enricher.property(), "UserName");
    }

    #[test]
    fn test_rejects_unusable_names() {
        for variable in ["", "A=B", "NUL\0"] {
            let err = EnvironmentEnricher::new(variable).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }

        let err = EnvironmentEnricher::with_property("PATH", " ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
