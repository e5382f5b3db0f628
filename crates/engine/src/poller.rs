// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generic remote-status polling loop.
//!
//! Voice clone waiting and training tracking are the same shape: probe a
//! status endpoint, normalize the answer, surface non-terminal progress,
//! stop on a terminal state or an exhausted budget. This module holds that
//! shape once; the orchestrator supplies the probe, the budgets, and what
//! to do with each observation.

use std::future::Future;
use std::time::Duration;

use dh_core::RemoteStatus;
use thiserror::Error;

/// Budgets and pacing for one polling run.
#[derive(Debug, Clone)]
pub struct PollPlan {
    /// Pause between successful probes.
    pub interval: Duration,
    /// Pause after a transport failure before retrying.
    pub error_backoff: Duration,
    /// Total probe ceiling, or `None` for stop-on-terminal-only.
    pub max_attempts: Option<u32>,
    /// Consecutive transport failures tolerated before giving up. A
    /// successful probe resets the streak.
    pub max_transport_failures: u32,
}

/// One successful probe, handed to the caller before the loop decides
/// whether to continue.
#[derive(Debug)]
pub struct Observation<'a, P> {
    /// 1-based probe counter, counting transport failures too.
    pub attempt: u32,
    pub status: RemoteStatus,
    pub payload: &'a P,
}

/// Terminal answer from the remote side, with the payload that carried it.
#[derive(Debug)]
pub enum Polled<P> {
    Completed(P),
    Failed(P),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    /// The probe ceiling ran out before the remote reached a terminal state.
    #[error("no terminal status after {attempts} attempts")]
    Exhausted { attempts: u32 },

    /// Too many transport failures in a row.
    #[error("gave up after {failures} consecutive transport failures: {last_error}")]
    TransportLimit { failures: u32, last_error: String },
}

/// Runs `probe` until it reports a terminal status or a budget runs out.
///
/// Probes immediately; any lead-in delay is the caller's to apply. Each
/// successful probe is passed to `observe` (terminal ones included) before
/// the loop acts on it.
pub async fn run<P, F, Fut, O>(
    plan: &PollPlan,
    mut probe: F,
    mut observe: O,
) -> Result<Polled<P>, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(RemoteStatus, P), String>>,
    O: FnMut(Observation<'_, P>),
{
    let mut attempt: u32 = 0;
    let mut transport_failures: u32 = 0;

    loop {
        attempt += 1;
        match probe().await {
            Ok((status, payload)) => {
                transport_failures = 0;
                observe(Observation { attempt, status, payload: &payload });
                match status {
                    RemoteStatus::Completed => return Ok(Polled::Completed(payload)),
                    RemoteStatus::Failed => return Ok(Polled::Failed(payload)),
                    _ => {}
                }
                if let Some(max) = plan.max_attempts {
                    if attempt >= max {
                        return Err(PollError::Exhausted { attempts: attempt });
                    }
                }
                tokio::time::sleep(plan.interval).await;
            }
            Err(message) => {
                transport_failures += 1;
                tracing::warn!(attempt, transport_failures, error = %message, "status probe failed");
                if transport_failures >= plan.max_transport_failures {
                    return Err(PollError::TransportLimit {
                        failures: transport_failures,
                        last_error: message,
                    });
                }
                if let Some(max) = plan.max_attempts {
                    if attempt >= max {
                        return Err(PollError::Exhausted { attempts: attempt });
                    }
                }
                tokio::time::sleep(plan.error_backoff).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
