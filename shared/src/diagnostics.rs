use std::{cell::RefCell, collections::HashSet, error::Error};

use log::error;

/// Receives reports of failures that were recovered from locally.
///
/// Reporting must never block or fail the caller.
pub trait DiagnosticsSink {
    fn report(&self, message: &str, error: Option<&dyn Error>);
}

/// Forwards every report to the `log` facade at error level
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn report(&self, message: &str, error: Option<&dyn Error>) {
        match error {
            Some(error) => error!("{message}: {error}"),
            None => error!("{message}"),
        }
    }
}

/// Passes each distinct message through to the inner sink only once, so an
/// entity that fails every tick doesn't flood the sink.
pub struct ReportOnce<S: DiagnosticsSink> {
    inner: S,
    seen: RefCell<HashSet<String>>,
}

impl<S: DiagnosticsSink> ReportOnce<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            seen: RefCell::new(HashSet::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Forget what has been reported, so every message may pass once more
    pub fn reset(&self) {
        self.seen.borrow_mut().clear();
    }
}

impl<S: DiagnosticsSink> DiagnosticsSink for ReportOnce<S> {
    fn report(&self, message: &str, error: Option<&dyn Error>) {
        if !self.seen.borrow_mut().insert(message.to_string()) {
            return;
        }
        self.inner.report(message, error);
    }
}
