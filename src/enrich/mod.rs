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

//! Enrichers attach properties to a [`LogEvent`] before it is appended.
//!
//! An enricher only ever adds properties, and only if the event does not carry a property
//! with the same name yet. Enrichers registered earlier therefore take precedence over the
//! ones registered later, and properties set at the origin of the event take precedence
//! over all enrichers.

use std::fmt;

use crate::event::LogEvent;
use crate::property::PropertyFactory;

mod environment;
mod function;
mod key_value;

pub use self::environment::EnvironmentEnricher;
pub use self::function::FunctionEnricher;
pub use self::function::FunctionKind;
pub use self::key_value::KeyValueEnricher;

/// An enricher attaches properties to log events.
///
/// A single instance is shared by every event the logger emits, possibly from several
/// threads at once.
pub trait Enrich: fmt::Debug + Send + Sync + 'static {
    /// Attach properties to `event`, creating them with `factory`.
    ///
    /// This must not fail: whatever goes wrong is reported to the
    /// [self-log](crate::self_log) and the event is left as is.
    fn enrich(&self, event: &mut LogEvent, factory: &dyn PropertyFactory);
}

impl<T: Enrich> From<T> for Box<dyn Enrich> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
