// crates/films-contract/src/runner.rs
// ============================================================================
// Module: Contract Verifier
// Description: Executes selected checks and aggregates their reports.
// Purpose: Run independent checks sequentially or on a bounded worker pool.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`ContractVerifier`] owns the check context and an [`EventSink`]. Each
//! check runs in isolation: a failure or transport error in one check never
//! stops the others. With `max_parallel > 1` checks run on scoped worker
//! threads pulling from a shared cursor; reports are still returned in
//! catalog order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use crate::check::CheckId;
use crate::check::CheckOutcome;
use crate::check::CheckReport;
use crate::check::Selection;
use crate::checks::CheckContext;
use crate::checks::CheckError;
use crate::checks::Endpoints;
use crate::checks::execute;
use crate::client::FilmsClient;
use crate::config::ContractConfig;
use crate::error::ContractError;
use crate::events::CheckEvent;
use crate::events::EventSink;
use crate::events::NoopEventSink;
use crate::events::RunEvent;
use crate::formats::FormatRules;
use crate::report::RunReport;

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// Runs contract checks against one service root.
pub struct ContractVerifier {
    /// Validated configuration.
    config: ContractConfig,
    /// Shared check state.
    context: CheckContext,
    /// Event destination.
    sink: Arc<dyn EventSink>,
}

impl ContractVerifier {
    /// Validates the configuration and builds the client and format rules.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the configuration is invalid, the client
    /// cannot be built, or a format pattern fails to compile.
    pub fn new(config: ContractConfig) -> Result<Self, ContractError> {
        config.validate()?;
        let endpoints = Endpoints::new(config.service_root_url()?)?;
        let client = FilmsClient::new(&config)?;
        let rules = FormatRules::new()?;
        let context = CheckContext {
            client,
            endpoints,
            rules,
            latency_budget: config.latency_budget(),
        };
        Ok(Self {
            config,
            context,
            sink: Arc::new(NoopEventSink),
        })
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the validated configuration.
    #[must_use]
    pub const fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Runs one check and records its event.
    ///
    /// A panic inside the check is reported as an error outcome.
    #[must_use]
    pub fn run_check(&self, id: CheckId) -> CheckReport {
        let started = Instant::now();
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| execute(&self.context, id))) {
            Ok(Ok(())) => CheckOutcome::Passed,
            Ok(Err(CheckError::Failed(failure))) => CheckOutcome::Failed {
                failure,
            },
            Ok(Err(CheckError::Transport(message) | CheckError::Decode(message))) => {
                CheckOutcome::Error {
                    message,
                }
            }
            Err(_) => CheckOutcome::Error {
                message: "check panicked".to_string(),
            },
        };
        let report = CheckReport::new(id, outcome, started.elapsed());
        self.sink.record_check(&CheckEvent::new(&report));
        report
    }

    /// Runs every selected check and aggregates the reports in catalog order.
    #[must_use]
    pub fn run(&self, selection: &Selection) -> RunReport {
        let ids = selection.resolve();
        let workers = self.config.max_parallel.clamp(1, ids.len().max(1));
        let checks = if workers == 1 {
            ids.iter().map(|id| self.run_check(*id)).collect()
        } else {
            self.run_parallel(&ids, workers)
        };
        let report =
            RunReport::new(self.context.endpoints.root().as_str(), self.config.strict, checks);
        self.sink.record_run(&RunEvent::new(
            &report.service_root,
            report.summary,
            report.is_success(),
        ));
        report
    }

    /// Runs checks on `workers` scoped threads.
    ///
    /// Workers send each report as soon as it is finished, so a worker that
    /// dies only loses the check it was running.
    fn run_parallel(&self, ids: &[CheckId], workers: usize) -> Vec<CheckReport> {
        let cursor = AtomicUsize::new(0);
        let cursor = &cursor;
        let (sender, receiver) = mpsc::channel::<(usize, CheckReport)>();
        thread::scope(|scope| {
            let handles: Vec<_> = (0 .. workers)
                .map(|_| {
                    let sender = sender.clone();
                    scope.spawn(move || {
                        loop {
                            let index = cursor.fetch_add(1, Ordering::Relaxed);
                            let Some(id) = ids.get(index) else {
                                break;
                            };
                            if sender.send((index, self.run_check(*id))).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        });
        drop(sender);

        let mut slots: Vec<Option<CheckReport>> = vec![None; ids.len()];
        for (index, report) in receiver {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(report);
            }
        }
        ids.iter()
            .zip(slots)
            .map(|(id, slot)| {
                slot.unwrap_or_else(|| {
                    CheckReport::new(
                        *id,
                        CheckOutcome::Error {
                            message: "check worker terminated before reporting".to_string(),
                        },
                        Duration::ZERO,
                    )
                })
            })
            .collect()
    }
}
