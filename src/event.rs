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

//! The log event flowing through enrichers and appenders.

use std::borrow::Cow;

use jiff::Timestamp;
use log::Level;
use value_bag::ValueBag;

use crate::property::Properties;
use crate::property::Property;

/// One log occurrence.
///
/// Everything but the properties is fixed once the event is built. Properties can only be
/// appended, see [`Properties::add_if_absent`].
#[derive(Clone, Debug)]
pub struct LogEvent {
    // the observed time
    timestamp: Timestamp,

    // the metadata
    level: Level,
    target: Cow<'static, str>,

    // the payload
    message: Cow<'static, str>,

    // structural logging
    properties: Properties,
}

impl LogEvent {
    /// Returns a new builder.
    pub fn builder() -> LogEventBuilder {
        LogEventBuilder::default()
    }

    /// The observed time.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The verbosity level of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The name of the target of the directive.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The properties attached so far.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Get the value of the property named `name`.
    pub fn property(&self, name: &str) -> Option<ValueBag<'_>> {
        self.properties.get(name)
    }

    /// Add `property` unless the event already carries one with the same name.
    ///
    /// Return whether the property was added.
    pub fn add_property_if_absent(&mut self, property: Property) -> bool {
        self.properties.add_if_absent(property)
    }
}

/// A builder for [`LogEvent`].
#[derive(Debug)]
pub struct LogEventBuilder {
    event: LogEvent,
}

impl Default for LogEventBuilder {
    fn default() -> Self {
        LogEventBuilder {
            event: LogEvent {
                timestamp: Timestamp::now(),
                level: Level::Info,
                target: Cow::Borrowed(""),
                message: Cow::Borrowed(""),
                properties: Properties::default(),
            },
        }
    }
}

impl LogEventBuilder {
    /// Set [`timestamp`](LogEvent::timestamp).
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.event.timestamp = timestamp;
        self
    }

    /// Set [`level`](LogEvent::level).
    pub fn level(mut self, level: Level) -> Self {
        self.event.level = level;
        self
    }

    /// Set [`target`](LogEvent::target).
    pub fn target(mut self, target: impl Into<Cow<'static, str>>) -> Self {
        self.event.target = target.into();
        self
    }

    /// Set [`message`](LogEvent::message).
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.event.message = message.into();
        self
    }

    /// Attach a property at the origin of the event.
    ///
    /// The first value given for a name wins, as with enrichment.
    pub fn property<'v>(mut self, name: impl Into<String>, value: impl Into<ValueBag<'v>>) -> Self {
        self.event
            .properties
            .add_if_absent(Property::new(name, value.into()));
        self
    }

    /// Invoke the builder and return a `LogEvent`.
    pub fn build(self) -> LogEvent {
        self.event
    }
}
