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

//! The self-log: a side channel for failures of the logging pipeline itself.
//!
//! Nothing that goes wrong while enriching or appending an event is allowed to reach the
//! application, neither as an error nor as a log line. Such failures are written here
//! instead. The self-log is disabled by default, so they are dropped unless a
//! [`Trap`] has been enabled.
//!
//! # Examples
//!
//! ```
//! use logforth_enrich::self_log;
//! use logforth_enrich::trap::DefaultTrap;
//!
//! self_log::enable(DefaultTrap::default());
//! assert!(self_log::is_enabled());
//!
//! self_log::disable();
//! assert!(!self_log::is_enabled());
//! ```

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::Error;
use crate::trap::Trap;

static TRAP: RwLock<Option<Arc<dyn Trap>>> = RwLock::new(None);

/// Route self-log output to `trap`, replacing any trap enabled before.
pub fn enable(trap: impl Into<Box<dyn Trap>>) {
    let trap: Arc<dyn Trap> = Arc::from(trap.into());
    let mut slot = TRAP.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(trap);
}

/// Stop writing self-log output.
pub fn disable() {
    let mut slot = TRAP.write().unwrap_or_else(PoisonError::into_inner);
    *slot = None;
}

/// Whether a trap is currently enabled.
pub fn is_enabled() -> bool {
    let slot = TRAP.read().unwrap_or_else(PoisonError::into_inner);
    slot.is_some()
}

/// Write `err` to the enabled trap, if any.
///
/// The trap runs without any lock held, so it may itself enable or disable the self-log.
pub fn write(err: &Error) {
    let trap = {
        let slot = TRAP.read().unwrap_or_else(PoisonError::into_inner);
        slot.clone()
    };

    if let Some(trap) = trap {
        trap.trap(err);
    }
}
