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

//! Traps receive errors the logging pipeline cannot hand back to its caller.

use std::fmt;
use std::io;
use std::io::Write;

use crate::Error;

/// A trap for errors raised while enriching or appending log events.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error.
    fn trap(&self, err: &Error);
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A trap that writes each error to standard error as a single line tagged with
/// `[logforth-enrich]`.
///
/// Failing to write to standard error is ignored.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct DefaultTrap {}

impl Trap for DefaultTrap {
    fn trap(&self, err: &Error) {
        let _ = writeln!(io::stderr().lock(), "[logforth-enrich] {err}");
    }
}
