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

use std::fmt::Write;

use crate::Error;
use crate::event::LogEvent;
use crate::layout::Layout;

/// A layout that formats log events as plain text, without colors.
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172105Z ERROR simple_stdout: Hello error! MachineName=web-1
/// 2024-08-11T22:44:57.172219Z  WARN simple_stdout: Hello warn! MachineName=web-1
/// 2024-08-11T22:44:57.172276Z  INFO simple_stdout: Hello info! MachineName=web-1 Len=5
/// ```
///
/// # Examples
///
/// ```
/// use logforth_enrich::layout::PlainTextLayout;
///
/// let layout = PlainTextLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct PlainTextLayout {}

impl Layout for PlainTextLayout {
    fn format(&self, event: &LogEvent) -> Result<Vec<u8>, Error> {
        let mut text = String::new();

        let timestamp = event.timestamp();
        let level = event.level();
        let target = event.target();
        let message = event.message();
        write!(&mut text, "{timestamp} {level:>5} {target}: {message}")
            .map_err(Error::from_fmt_error)?;

        for (key, value) in event.properties().iter() {
            write!(&mut text, " {key}={value}").map_err(Error::from_fmt_error)?;
        }

        Ok(text.into_bytes())
    }
}
