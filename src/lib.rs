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

//! Enrichers for structured logging: attach environment variables, the machine name, the
//! user name, or the result of your own functions to every log event.
//!
//! # Overview
//!
//! Enrichers are registered on a [`LoggerBuilder`] and run, in registration order, on each
//! event before it reaches the appenders. An enricher only adds properties the event does
//! not carry yet, so it never overwrites a value set at the call site or by an earlier
//! enricher. Failures inside user supplied functions never reach the application; they are
//! reported to the [`self_log`] instead.
//!
//! # Examples
//!
//! ```
//! use logforth_enrich::append;
//!
//! # fn main() -> Result<(), logforth_enrich::Error> {
//! logforth_enrich::builder()
//!     .with_machine_name()
//!     .with_environment("DEPLOYMENT")?
//!     .with_function_parameter("Len", |s: &&str| Ok(s.len().to_string()), "hello")?
//!     .append(append::Stdout::default())
//!     .apply();
//!
//! log::info!("This is an info message.");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod enrich;
pub mod event;
pub mod layout;
pub mod property;
pub mod self_log;
pub mod trap;

mod bridge;
mod error;
mod logger;

pub use append::Append;
pub use enrich::Enrich;
pub use error::Error;
pub use error::ErrorKind;
pub use layout::Layout;
pub use logger::Logger;
pub use logger::LoggerBuilder;
pub use logger::builder;
pub use property::PropertyFactory;
pub use trap::Trap;
