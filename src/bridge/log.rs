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

//! Bridge the [`log`] facade into the enrichment pipeline.

use value_bag::ValueBag;

use crate::Error;
use crate::ErrorKind;
use crate::Logger;
use crate::event::LogEvent;
use crate::property::Property;
use crate::self_log;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level())
    }

    fn log(&self, record: &log::Record) {
        if !Logger::enabled(self, record.level()) {
            return;
        }

        let mut event = LogEvent::builder()
            .level(record.level())
            .target(record.target().to_string())
            .message(record.args().to_string())
            .build();

        // call site key-values become origin properties, which enrichers never replace
        let mut visitor = KeyValueVisitor { event: &mut event };
        if let Err(err) = record.key_values().visit(&mut visitor) {
            let err = Error::new(ErrorKind::Unexpected, "failed to visit key-values")
                .with_context("target", record.target())
                .with_source(err);
            self_log::write(&err);
        }

        Logger::log(self, event);
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

struct KeyValueVisitor<'a> {
    event: &'a mut LogEvent,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KeyValueVisitor<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.event
            .add_property_if_absent(to_property(key.as_str(), &value));
        Ok(())
    }
}

fn to_property(key: &str, value: &log::kv::Value<'_>) -> Property {
    if let Some(v) = value.to_borrowed_str() {
        Property::new(key, ValueBag::from(v))
    } else if let Some(v) = value.to_bool() {
        Property::new(key, ValueBag::from(v))
    } else if let Some(v) = value.to_i64() {
        Property::new(key, ValueBag::from(v))
    } else if let Some(v) = value.to_u64() {
        Property::new(key, ValueBag::from(v))
    } else if let Some(v) = value.to_f64() {
        Property::new(key, ValueBag::from(v))
    } else {
        Property::new(key, ValueBag::from(value.to_string().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;
    use crate::append::Testing;
    use crate::logger::builder;

    #[test]
    fn test_record_key_values_are_origin_properties() {
        let testing = Testing::default();
        let logger = builder()
            .with_property("user", "enriched")
            .unwrap()
            .with_property("service", "checkout")
            .unwrap()
            .append(testing.clone())
            .build();

        let kvs = [("user", "alice"), ("attempt", "2")];
        Log::log(
            &logger,
            &log::Record::builder()
                .args(format_args!("login failed"))
                .level(log::Level::Warn)
                .target("auth")
                .key_values(&kvs)
                .build(),
        );

        let events = testing.take();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.message(), "login failed");
        assert_eq!(event.target(), "auth");
        assert_eq!(event.level(), log::Level::Warn);
        assert_eq!(event.property("user").unwrap().to_string(), "alice");
        assert_eq!(event.property("attempt").unwrap().to_string(), "2");
        assert_eq!(event.property("service").unwrap().to_string(), "checkout");
    }

    #[test]
    fn test_disabled_records_are_skipped() {
        let testing = Testing::default();
        let logger = builder()
            .max_level(log::LevelFilter::Warn)
            .append(testing.clone())
            .build();

        let metadata = log::Metadata::builder()
            .level(log::Level::Info)
            .target("noisy")
            .build();
        assert!(!Log::enabled(&logger, &metadata));

        Log::log(
            &logger,
            &log::Record::builder()
                .args(format_args!("chatter"))
                .level(log::Level::Info)
                .build(),
        );
        assert!(testing.events().is_empty());
    }
}
