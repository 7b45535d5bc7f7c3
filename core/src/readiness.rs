//! Waiting/Ready state machine for attaching to a host page that loads at
//! its own pace.
//!
//! The poller does not own a timer. The caller sleeps for
//! [`ReadinessPoller::interval_ms`] between calls to [`ReadinessPoller::poll`]
//! and stops once a terminal step comes back.

use std::fmt;

pub const POLL_INTERVAL_MS_DEFAULT: u32 = 2500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessError {
    /// A required anchor is missing; expected while the host is loading.
    NotReady { missing: String },
    /// An assumption about the host page does not hold; polling cannot fix it.
    Fatal { reason: String },
}

impl ReadinessError {
    pub fn not_ready(missing: impl Into<String>) -> Self {
        ReadinessError::NotReady {
            missing: missing.into(),
        }
    }

    pub fn fatal(reason: impl Into<String>) -> Self {
        ReadinessError::Fatal {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ReadinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessError::NotReady { missing } => write!(f, "cannot find the {missing} element"),
            ReadinessError::Fatal { reason } => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for ReadinessError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadinessState {
    Waiting { attempts: u32 },
    Ready { attempts: u32 },
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollStep {
    /// Anchors not there yet; poll again after the interval.
    Retry { attempt: u32, missing: String },
    /// Setup ran on this attempt.
    Ready { attempt: u32 },
    /// Setup failed; polling is over.
    Failed { reason: String },
    /// A terminal state was already reached; nothing ran.
    Finished,
}

impl PollStep {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollStep::Retry { .. })
    }
}

#[derive(Debug)]
pub struct ReadinessPoller {
    interval_ms: u32,
    state: ReadinessState,
}

impl Default for ReadinessPoller {
    fn default() -> Self {
        Self::new(POLL_INTERVAL_MS_DEFAULT)
    }
}

impl ReadinessPoller {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            state: ReadinessState::Waiting { attempts: 0 },
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn state(&self) -> &ReadinessState {
        &self.state
    }

    /// Runs one check. Any error from `lookup` counts as not ready, so a
    /// host page that is still building its DOM gets another attempt.
    /// `setup` is only called with the anchors `lookup` found and only ever
    /// once per poller.
    pub fn poll<A, L, S>(&mut self, lookup: L, setup: S) -> PollStep
    where
        L: FnOnce() -> Result<A, ReadinessError>,
        S: FnOnce(A) -> Result<(), ReadinessError>,
    {
        let attempt = match &self.state {
            ReadinessState::Waiting { attempts } => attempts.saturating_add(1),
            ReadinessState::Ready { .. } | ReadinessState::Failed { .. } => {
                return PollStep::Finished;
            }
        };
        let anchors = match lookup() {
            Ok(anchors) => anchors,
            Err(ReadinessError::NotReady { missing: detail })
            | Err(ReadinessError::Fatal { reason: detail }) => {
                self.state = ReadinessState::Waiting { attempts: attempt };
                return PollStep::Retry {
                    attempt,
                    missing: detail,
                };
            }
        };
        // Setup errors are fatal even if they claim not-ready: the anchors
        // were already found.
        match setup(anchors) {
            Ok(()) => {
                self.state = ReadinessState::Ready { attempts: attempt };
                PollStep::Ready { attempt }
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn fail(&mut self, reason: String) -> PollStep {
        self.state = ReadinessState::Failed {
            reason: reason.clone(),
        };
        PollStep::Failed { reason }
    }
}
