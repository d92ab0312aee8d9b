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

use std::any::Any;
use std::fmt;
use std::panic;
use std::panic::AssertUnwindSafe;

use value_bag::ValueBag;

use crate::Error;
use crate::ErrorKind;
use crate::enrich::Enrich;
use crate::enrich::is_blank;
use crate::event::LogEvent;
use crate::property::PropertyFactory;
use crate::self_log;

type NoArgFn = dyn Fn() -> anyhow::Result<String> + Send + Sync;
type WithEventFn = dyn Fn(&LogEvent) -> anyhow::Result<String> + Send + Sync;

/// The call shape of a [`FunctionEnricher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// Called with no arguments.
    NoArg,
    /// Called with a parameter bound at construction.
    WithParameter,
    /// Called with the event being enriched.
    WithEvent,
}

/// A function bound to the parameter it is called with.
trait BoundFn: Send + Sync {
    fn call(&self) -> anyhow::Result<String>;
}

struct Bound<P, F> {
    parameter: P,
    f: F,
}

impl<P, F> BoundFn for Bound<P, F>
where
    P: Send + Sync,
    F: Fn(&P) -> anyhow::Result<String> + Send + Sync,
{
    fn call(&self) -> anyhow::Result<String> {
        (self.f)(&self.parameter)
    }
}

enum Callback {
    NoArg(Box<NoArgFn>),
    WithParameter(Box<dyn BoundFn>),
    WithEvent(Box<WithEventFn>),
}

/// An enricher that attaches the result of a user supplied function.
///
/// The function runs once per event. If it returns an error or panics, nothing is attached
/// and the failure is reported to the [self-log](crate::self_log) only; the event goes on
/// to the appenders as usual.
///
/// A panic is caught only after the process panic hook has run. The default hook prints the
/// panic message to stderr, so with a [`Stderr`](crate::append::Stderr) appender that text
/// ends up next to your log lines. Return an `Err` instead of panicking, or install a
/// quieter hook with [`std::panic::set_hook`], to keep such failures out of stderr.
///
/// ## Example
///
/// ```rust
/// use logforth_enrich::enrich::FunctionEnricher;
/// use logforth_enrich::enrich::FunctionKind;
///
/// let pid = FunctionEnricher::new("pid", || Ok(std::process::id().to_string())).unwrap();
/// assert_eq!(pid.kind(), FunctionKind::NoArg);
///
/// let len = FunctionEnricher::with_parameter("len", |s: &&str| Ok(s.len().to_string()), "hello")
///     .unwrap();
/// assert_eq!(len.kind(), FunctionKind::WithParameter);
///
/// let level = FunctionEnricher::with_event("lvl", |e| Ok(e.level().to_string())).unwrap();
/// assert_eq!(level.kind(), FunctionKind::WithEvent);
/// ```
pub struct FunctionEnricher {
    key: String,
    callback: Callback,
}

impl fmt::Debug for FunctionEnricher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEnricher")
            .field("key", &self.key)
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

impl FunctionEnricher {
    /// Create an enricher calling `f` with no arguments.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](ErrorKind::InvalidArgument) error if `key` is blank.
    pub fn new<F>(key: impl Into<String>, f: F) -> Result<Self, Error>
    where
        F: Fn() -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self::build(key.into(), Callback::NoArg(Box::new(f)))
    }

    /// Create an enricher calling `f` with `parameter`.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](ErrorKind::InvalidArgument) error if `key` is blank.
    pub fn with_parameter<P, F>(key: impl Into<String>, f: F, parameter: P) -> Result<Self, Error>
    where
        P: Send + Sync + 'static,
        F: Fn(&P) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        let bound = Bound { parameter, f };
        Self::build(key.into(), Callback::WithParameter(Box::new(bound)))
    }

    /// Create an enricher calling `f` with the event being enriched.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidArgument`](ErrorKind::InvalidArgument) error if `key` is blank.
    pub fn with_event<F>(key: impl Into<String>, f: F) -> Result<Self, Error>
    where
        F: Fn(&LogEvent) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self::build(key.into(), Callback::WithEvent(Box::new(f)))
    }

    fn build(key: String, callback: Callback) -> Result<Self, Error> {
        if is_blank(&key) {
            return Err(Error::invalid_argument("property key must not be blank")
                .with_context("key", key));
        }
        Ok(Self { key, callback })
    }

    /// The property name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The call shape of the bound function.
    pub fn kind(&self) -> FunctionKind {
        match self.callback {
            Callback::NoArg(_) => FunctionKind::NoArg,
            Callback::WithParameter(_) => FunctionKind::WithParameter,
            Callback::WithEvent(_) => FunctionKind::WithEvent,
        }
    }

    fn call(&self, event: &LogEvent) -> Result<String, Error> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| match &self.callback {
            Callback::NoArg(f) => f(),
            Callback::WithParameter(f) => f.call(),
            Callback::WithEvent(f) => f(event),
        }));

        match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(self.failure().with_source(err)),
            Err(payload) => Err(self
                .failure()
                .with_context("cause", "panic")
                .with_source(anyhow::anyhow!(panic_message(payload.as_ref())))),
        }
    }

    fn failure(&self) -> Error {
        Error::new(
            ErrorKind::EnrichmentCallbackFailure,
            "enrichment function failed",
        )
        .with_context("key", &self.key)
    }
}

impl Enrich for FunctionEnricher {
    fn enrich(&self, event: &mut LogEvent, factory: &dyn PropertyFactory) {
        match self.call(event) {
            Ok(value) => {
                let property = factory.create_property(&self.key, ValueBag::from(value.as_str()));
                event.add_property_if_absent(property);
            }
            Err(err) => self_log::write(&err),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::property::DefaultPropertyFactory;

    fn enrich(enricher: &FunctionEnricher, event: &mut LogEvent) {
        enricher.enrich(event, &DefaultPropertyFactory::default());
    }

    #[test]
    fn test_no_arg_function_is_called_once_per_event() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let enricher = FunctionEnricher::new("seq", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(n.to_string())
        })
        .unwrap();

        let mut first = LogEvent::builder().build();
        enrich(&enricher, &mut first);
        let mut second = LogEvent::builder().build();
        enrich(&enricher, &mut second);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(first.property("seq").unwrap().to_string(), "1");
        assert_eq!(second.property("seq").unwrap().to_string(), "2");
    }

    #[test]
    fn test_parameter_function_is_called_once_with_bound_parameter() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let enricher = FunctionEnricher::with_parameter(
            "Len",
            move |s: &&str| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(s.len().to_string())
            },
            "hello",
        )
        .unwrap();
        assert_eq!(enricher.kind(), FunctionKind::WithParameter);

        let mut event = LogEvent::builder().build();
        enrich(&enricher, &mut event);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(event.property("Len").unwrap().to_string(), "5");

        let mut event = LogEvent::builder().build();
        enrich(&enricher, &mut event);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(event.property("Len").unwrap().to_string(), "5");
    }

    #[test]
    fn test_event_function_is_called_once_with_the_event() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let enricher = FunctionEnricher::with_event("Shout", move |e| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(e.message().to_uppercase())
        })
        .unwrap();
        assert_eq!(enricher.kind(), FunctionKind::WithEvent);

        let mut event = LogEvent::builder().message("quiet please").build();
        enrich(&enricher, &mut event);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(event.property("Shout").unwrap().to_string(), "QUIET PLEASE");

        let mut event = LogEvent::builder().message("still quiet").build();
        enrich(&enricher, &mut event);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(event.property("Shout").unwrap().to_string(), "STILL QUIET");
    }

    #[test]
    fn test_error_adds_nothing() {
        let enricher =
            FunctionEnricher::new("broken", || Err(anyhow::anyhow!("no value today"))).unwrap();

        let mut event = LogEvent::builder().message("still here").build();
        enrich(&enricher, &mut event);

        assert!(event.properties().is_empty());
        assert_eq!(event.message(), "still here");

        let err = enricher.call(&event).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnrichmentCallbackFailure);
        assert_eq!(err.context("key"), Some("broken"));
    }

    #[test]
    fn test_panic_is_contained() {
        let enricher = FunctionEnricher::with_parameter(
            "first",
            |v: &Vec<String>| Ok(v[0].clone()),
            Vec::new(),
        )
        .unwrap();

        let mut event = LogEvent::builder().build();
        enrich(&enricher, &mut event);
        assert!(event.properties().is_empty());

        let err = enricher.call(&event).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnrichmentCallbackFailure);
        assert_eq!(err.context("cause"), Some("panic"));
    }

    #[test]
    fn test_existing_property_is_kept() {
        let enricher = FunctionEnricher::new("user", || Ok("computed".to_string())).unwrap();

        let mut event = LogEvent::builder().property("user", "origin").build();
        enrich(&enricher, &mut event);
        enrich(&enricher, &mut event);

        assert_eq!(event.property("user").unwrap().to_string(), "origin");
    }

    #[test]
    fn test_rejects_blank_key() {
        let err = FunctionEnricher::new("", || Ok(String::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = FunctionEnricher::with_event(" ", |_| Ok(String::new())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
