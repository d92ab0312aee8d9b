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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::append::Append;
use crate::event::LogEvent;
use crate::layout::Layout;
use crate::layout::PlainTextLayout;

/// An appender for tests.
///
/// Each event is written to stderr through `eprintln!`, so that the Rust test harness
/// captures the output of each test, and is also kept in memory for assertions. Clones share
/// the recorded events.
///
/// # Examples
///
/// ```
/// use logforth_enrich::append::Testing;
/// use logforth_enrich::event::LogEvent;
///
/// let testing = Testing::default();
/// let logger = logforth_enrich::builder()
///     .with_property("service", "checkout")
///     .unwrap()
///     .append(testing.clone())
///     .build();
///
/// logger.log(LogEvent::builder().message("hello").build());
///
/// let events = testing.take();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].property("service").unwrap().to_string(), "checkout");
/// ```
#[derive(Debug, Clone)]
pub struct Testing {
    layout: Arc<dyn Layout>,
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl Default for Testing {
    fn default() -> Self {
        Self {
            layout: Arc::new(PlainTextLayout::default()),
            events: Arc::default(),
        }
    }
}

impl Testing {
    /// Set the layout for the [`Testing`] appender.
    ///
    /// Default to [`PlainTextLayout`].
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = Arc::from(layout.into());
        self
    }

    /// Copies of the events appended so far.
    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    /// Remove and return the events appended so far.
    pub fn take(&self) -> Vec<LogEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Append for Testing {
    fn append(&self, event: &LogEvent) -> Result<(), Error> {
        let bytes = self.layout.format(event)?;
        eprintln!("{}", String::from_utf8_lossy(&bytes));
        self.lock().push(event.clone());
        Ok(())
    }
}
