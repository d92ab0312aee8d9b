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

use value_bag::OwnedValueBag;
use value_bag::ValueBag;

use crate::Error;
use crate::enrich::Enrich;
use crate::enrich::is_blank;
use crate::event::LogEvent;
use crate::property::PropertyFactory;

/// An enricher that attaches one fixed property to every event.
///
/// ## Example
///
/// ```rust
/// use logforth_enrich::enrich::KeyValueEnricher;
///
/// let enricher = KeyValueEnricher::new("service", "checkout").unwrap();
/// assert_eq!(enricher.key(), "service");
/// ```
#[derive(Debug, Clone)]
pub struct KeyValueEnricher {
    key: String,
    value: OwnedValueBag,
}

impl KeyValueEnricher {
    /// Create a new [`KeyValueEnricher`].
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error if `key` is
    /// empty or whitespace only.
    pub fn new<'v>(key: impl Into<String>, value: impl Into<ValueBag<'v>>) -> Result<Self, Error> {
        let key = key.into();
        if is_blank(&key) {
            return Err(Error::invalid_argument("property key must not be blank")
                .with_context("key", key));
        }

        let value: ValueBag<'v> = value.into();
        Ok(Self {
            key,
            value: value.to_owned(),
        })
    }

    /// The property name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The property value.
    pub fn value(&self) -> ValueBag<'_> {
        self.value.by_ref()
    }
}

impl Enrich for KeyValueEnricher {
    fn enrich(&self, event: &mut LogEvent, factory: &dyn PropertyFactory) {
        event.add_property_if_absent(factory.create_property(&self.key, self.value.by_ref()));
    }
}
