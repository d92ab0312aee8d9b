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

//! Properties carried by a [`LogEvent`](crate::event::LogEvent).

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use value_bag::OwnedValueBag;
use value_bag::ValueBag;

/// A named value attached to a log event.
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    value: OwnedValueBag,
}

impl Property {
    /// Create a property, capturing an owned copy of `value`.
    pub fn new(name: impl Into<String>, value: ValueBag<'_>) -> Self {
        Self {
            name: name.into(),
            value: value.to_owned(),
        }
    }

    /// The property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The property value.
    pub fn value(&self) -> ValueBag<'_> {
        self.value.by_ref()
    }
}

/// Turns raw name-value pairs into [`Property`] instances.
///
/// Enrichers never build properties themselves; they always go through the factory handed
/// to them by the logger, so a host can decide how values are captured.
pub trait PropertyFactory: fmt::Debug + Send + Sync + 'static {
    /// Create a property named `name` holding `value`.
    fn create_property(&self, name: &str, value: ValueBag<'_>) -> Property;
}

impl<T: PropertyFactory> From<T> for Box<dyn PropertyFactory> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A property factory that keeps values as they are.
#[derive(Default, Debug, Clone, Copy)]
#[non_exhaustive]
pub struct DefaultPropertyFactory {}

impl PropertyFactory for DefaultPropertyFactory {
    fn create_property(&self, name: &str, value: ValueBag<'_>) -> Property {
        Property::new(name, value)
    }
}

/// An insertion ordered set of properties with unique names.
///
/// The only way to mutate it is [`Properties::add_if_absent`]: a property, once present,
/// keeps its value for the rest of the event's life.
#[derive(Default, Debug, Clone)]
pub struct Properties {
    map: IndexMap<String, OwnedValueBag>,
}

impl Properties {
    /// Add `property` unless a property with the same name is already present.
    ///
    /// Return whether the property was added.
    pub fn add_if_absent(&mut self, property: Property) -> bool {
        match self.map.entry(property.name) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(property.value);
                true
            }
        }
    }

    /// Get the value of the property named `name`.
    pub fn get(&self, name: &str) -> Option<ValueBag<'_>> {
        self.map.get(name).map(OwnedValueBag::by_ref)
    }

    /// Whether a property named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// The number of properties.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether there are no properties.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over properties in the order they were added.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, ValueBag<'_>)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.by_ref()))
    }
}
