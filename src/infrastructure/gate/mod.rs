//! Key validation gate
//!
//! Two-stage accept/redirect flow guarding the protected playground
//! view. A submitted candidate runs through a validity predicate; on
//! acceptance it is stashed in a session slot and the caller is told to
//! navigate after a fixed delay. The protected view re-reads the slot
//! and re-runs the same predicate, so both checks must independently
//! pass before the view unlocks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::api_key::{is_plausible_key, ApiKeyRepository};
use crate::domain::{DomainError, Severity};
use crate::infrastructure::notification::NotificationChannel;
use crate::infrastructure::session::{SessionStore, SessionToken};

/// Route of the submission view
pub const SUBMISSION_ROUTE: &str = "/playground";

/// Route of the protected view
pub const PROTECTED_ROUTE: &str = "/protected";

/// Delay before the caller should navigate after an accepted submit
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Gate states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Idle,
    Validating,
    Accepted,
    Rejected,
}

/// Result of running the validity predicate
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub accepted: bool,
    pub reason: String,
}

/// Navigation instruction returned to the caller; never slept on
/// server-side
#[derive(Debug, Clone)]
pub struct PendingNavigation {
    pub target: &'static str,
    pub after: Duration,
    pub token: SessionToken,
}

/// Outcome of a submission
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub outcome: ValidationOutcome,
    pub navigation: Option<PendingNavigation>,
}

/// What the protected view should render
#[derive(Debug, Clone, PartialEq)]
pub enum ProtectedView {
    /// Both checks passed; the view is unlocked
    Unlocked { api_key: String },
    /// No live session slot; go back to the submission view now
    RedirectToSubmission,
    /// Slot present but the candidate failed re-validation; the view
    /// holds and the redirect rides on notification dismissal
    Rejected,
}

/// Validity predicate for candidate keys
#[async_trait]
pub trait KeyValidator: Send + Sync + std::fmt::Debug {
    async fn validate(&self, candidate: &str) -> Result<bool, DomainError>;
}

/// Shape-only check: fixed prefix and length. Does not verify the key
/// was ever issued.
#[derive(Debug, Default)]
pub struct HeuristicValidator;

#[async_trait]
impl KeyValidator for HeuristicValidator {
    async fn validate(&self, candidate: &str) -> Result<bool, DomainError> {
        Ok(is_plausible_key(candidate))
    }
}

/// Stronger variant: the shape check plus a repository lookup, so only
/// issued keys pass
#[derive(Debug)]
pub struct StoreBackedValidator<R: ApiKeyRepository> {
    repository: Arc<R>,
}

impl<R: ApiKeyRepository> StoreBackedValidator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ApiKeyRepository> KeyValidator for StoreBackedValidator<R> {
    async fn validate(&self, candidate: &str) -> Result<bool, DomainError> {
        if !is_plausible_key(candidate) {
            return Ok(false);
        }

        let found = self.repository.find_by_secret(candidate).await?;
        Ok(found.is_some())
    }
}

/// The validation gate
#[derive(Debug)]
pub struct ValidationGate {
    validator: Arc<dyn KeyValidator>,
    sessions: Arc<SessionStore>,
    notifier: Arc<NotificationChannel>,
    state: RwLock<GateState>,
    redirect_delay: Duration,
}

impl ValidationGate {
    pub fn new(
        validator: Arc<dyn KeyValidator>,
        sessions: Arc<SessionStore>,
        notifier: Arc<NotificationChannel>,
    ) -> Self {
        Self {
            validator,
            sessions,
            notifier,
            state: RwLock::new(GateState::Idle),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }

    /// Override the pre-navigation delay
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Current gate state
    pub async fn state(&self) -> GateState {
        *self.state.read().await
    }

    /// Run the validity predicate without touching gate state, the
    /// session store, or the notification slot
    pub async fn check(&self, candidate: &str) -> Result<bool, DomainError> {
        self.validator.validate(candidate).await
    }

    /// Submit a candidate key
    ///
    /// Accept: success notification, the candidate goes into a session
    /// slot, and the caller receives the token plus the instruction to
    /// navigate to the protected view after the configured delay.
    /// Reject: error notification, no navigation.
    pub async fn submit(&self, candidate: &str) -> Result<SubmitOutcome, DomainError> {
        {
            let mut state = self.state.write().await;
            *state = GateState::Validating;
        }

        let accepted = match self.validator.validate(candidate).await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Key validation errored");
                let mut state = self.state.write().await;
                *state = GateState::Idle;
                return Err(e);
            }
        };

        if accepted {
            debug!("Candidate key accepted");

            {
                let mut state = self.state.write().await;
                *state = GateState::Accepted;
            }

            self.notifier
                .show("Valid API key, /protected can be accessed", Severity::Success)
                .await;

            let token = self.sessions.put(candidate).await;

            Ok(SubmitOutcome {
                outcome: ValidationOutcome {
                    accepted: true,
                    reason: "Valid API key, /protected can be accessed".to_string(),
                },
                navigation: Some(PendingNavigation {
                    target: PROTECTED_ROUTE,
                    after: self.redirect_delay,
                    token,
                }),
            })
        } else {
            debug!("Candidate key rejected");

            {
                let mut state = self.state.write().await;
                *state = GateState::Rejected;
            }

            self.notifier.show("Invalid API key", Severity::Error).await;

            Ok(SubmitOutcome {
                outcome: ValidationOutcome {
                    accepted: false,
                    reason: "Invalid API key".to_string(),
                },
                navigation: None,
            })
        }
    }

    /// Enter the protected view
    ///
    /// An absent or expired slot redirects to the submission view
    /// immediately. A live slot is re-validated with the same
    /// predicate before the view unlocks.
    pub async fn enter_protected(&self, token: Option<&SessionToken>) -> ProtectedView {
        let candidate = match token {
            Some(token) => self.sessions.get(token).await,
            None => None,
        };

        let Some(candidate) = candidate else {
            debug!("No session slot, redirecting to submission");
            let mut state = self.state.write().await;
            *state = GateState::Idle;
            return ProtectedView::RedirectToSubmission;
        };

        match self.validator.validate(&candidate).await {
            Ok(true) => {
                let mut state = self.state.write().await;
                *state = GateState::Accepted;
                ProtectedView::Unlocked { api_key: candidate }
            }
            Ok(false) => {
                {
                    let mut state = self.state.write().await;
                    *state = GateState::Rejected;
                }
                self.notifier.show("Invalid API key", Severity::Error).await;
                ProtectedView::Rejected
            }
            Err(e) => {
                warn!(error = %e, "Re-validation on protected entry errored");
                {
                    let mut state = self.state.write().await;
                    *state = GateState::Rejected;
                }
                self.notifier.show("Invalid API key", Severity::Error).await;
                ProtectedView::Rejected
            }
        }
    }

    /// Dismiss the visible notification; when the last outcome was a
    /// rejection this doubles as the navigation trigger back to the
    /// submission view
    pub async fn acknowledge_notification(&self) -> Option<&'static str> {
        self.notifier.dismiss().await;

        let mut state = self.state.write().await;
        if *state == GateState::Rejected {
            *state = GateState::Idle;
            Some(SUBMISSION_ROUTE)
        } else {
            None
        }
    }
}
