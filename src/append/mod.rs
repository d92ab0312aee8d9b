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

//! Dispatch enriched log events to their destinations.

use std::fmt;

use crate::Error;
use crate::event::LogEvent;

mod stdio;
mod testing;

pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::testing::Testing;

/// A trait representing an appender that can process enriched log events.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Dispatch a log event to the append target.
    fn append(&self, event: &LogEvent) -> Result<(), Error>;

    /// Flush any buffered events.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
