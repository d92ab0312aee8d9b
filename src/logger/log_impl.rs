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

use log::Level;

use crate::Append;
use crate::enrich::Enrich;
use crate::event::LogEvent;
use crate::property::PropertyFactory;
use crate::self_log;

/// A logger that enriches log events and dispatches them to appenders.
///
/// A `Logger` is shared freely between threads; enrichers and appenders are invoked on the
/// thread that logs the event.
///
/// # Examples
///
/// ```
/// use logforth_enrich::append;
/// use logforth_enrich::event::LogEvent;
///
/// let logger = logforth_enrich::builder()
///     .with_machine_name()
///     .append(append::Stderr::default())
///     .build();
/// logger.log(LogEvent::builder().message("hello world!").build());
/// ```
#[derive(Debug)]
pub struct Logger {
    max_level: log::LevelFilter,
    enrichers: Vec<Box<dyn Enrich>>,
    factory: Box<dyn PropertyFactory>,
    appends: Vec<Box<dyn Append>>,
}

impl Logger {
    pub(super) fn new(
        max_level: log::LevelFilter,
        enrichers: Vec<Box<dyn Enrich>>,
        factory: Box<dyn PropertyFactory>,
        appends: Vec<Box<dyn Append>>,
    ) -> Self {
        Self {
            max_level,
            enrichers,
            factory,
            appends,
        }
    }

    /// Determine if a log event at `level` would be logged.
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    /// Run every registered enricher on `event`, in registration order.
    pub fn enrich(&self, event: &mut LogEvent) {
        for enricher in &self.enrichers {
            enricher.enrich(event, self.factory.as_ref());
        }
    }

    /// Enrich the event and append it to every appender.
    ///
    /// Events above the max level are dropped. Appender failures are written to the
    /// [self-log](crate::self_log); the remaining appenders still receive the event.
    pub fn log(&self, mut event: LogEvent) {
        if !self.enabled(event.level()) {
            return;
        }

        self.enrich(&mut event);

        for append in &self.appends {
            if let Err(err) = append.append(&event) {
                self_log::write(&err.with_context("target", event.target()));
            }
        }
    }

    /// Flush every appender.
    pub fn flush(&self) {
        for append in &self.appends {
            if let Err(err) = append.flush() {
                self_log::write(&err);
            }
        }
    }
}
