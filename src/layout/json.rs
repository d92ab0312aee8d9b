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

use jiff::Timestamp;
use serde::Serialize;
use serde::Serializer;

use crate::Error;
use crate::ErrorKind;
use crate::event::LogEvent;
use crate::layout::Layout;
use crate::property::Properties;

/// A layout that formats log events as JSON lines.
///
/// Output format:
///
/// ```json
/// {"timestamp":"2024-08-11T22:44:57.172105Z","level":"ERROR","target":"simple_stdout","message":"Hello error!","properties":{"MachineName":"web-1"}}
/// {"timestamp":"2024-08-11T22:44:57.172219Z","level":"INFO","target":"simple_stdout","message":"Hello info!","properties":{"MachineName":"web-1","Len":"5"}}
/// ```
///
/// # Examples
///
/// ```
/// use logforth_enrich::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default();
/// ```
#[derive(Default, Debug, Clone)]
#[non_exhaustive]
pub struct JsonLayout {}

#[derive(Serialize)]
struct EventLine<'a> {
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: Timestamp,
    level: &'a str,
    target: &'a str,
    message: &'a str,
    #[serde(serialize_with = "serialize_properties")]
    properties: &'a Properties,
}

fn serialize_timestamp<S>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(timestamp)
}

fn serialize_properties<S>(properties: &&Properties, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(properties.iter())
}

impl Layout for JsonLayout {
    fn format(&self, event: &LogEvent) -> Result<Vec<u8>, Error> {
        let line = EventLine {
            timestamp: event.timestamp(),
            level: event.level().as_str(),
            target: event.target(),
            message: event.message(),
            properties: event.properties(),
        };

        serde_json::to_vec(&line).map_err(|err| {
            Error::new(ErrorKind::Unexpected, "failed to serialize log event").with_source(err)
        })
    }
}
