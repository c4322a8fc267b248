//! Client session: credential storage and token refresh coordination
//!
//! Several requests can hit an expired token at the same time. Only the
//! first of them calls `/auth/refresh`; the others queue behind it and are
//! resolved in arrival order with the outcome of that single call.

pub mod store;

pub use store::{Credentials, FileTokenStore, MemoryTokenStore, TokenStore};

use crate::backend::BackendClient;
use crate::domain::TokenPair;
use crate::error::{AppError, Result};
use crate::jwt;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;

type RefreshOutcome = std::result::Result<String, RefreshFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshFailure {
    /// The backend refused the refresh token
    Rejected,
    /// The refreshing caller went away, or the session was cleared meanwhile
    Cancelled,
}

#[derive(Default)]
struct SessionState {
    credentials: Option<Credentials>,
    refreshing: bool,
    waiters: VecDeque<oneshot::Sender<RefreshOutcome>>,
    /// Bumped on every sign-in and sign-out
    epoch: u64,
}

enum Settled {
    Applied(VecDeque<oneshot::Sender<RefreshOutcome>>),
    /// The session changed during the refresh; carries its current token
    Superseded(VecDeque<oneshot::Sender<RefreshOutcome>>, Option<String>),
}

enum RefreshStep {
    Current(String),
    Wait(oneshot::Receiver<RefreshOutcome>),
    Lead { refresh_token: String, epoch: u64 },
}

/// Holds the signed-in user's tokens and refreshes them single-flight
pub struct SessionManager<S: TokenStore> {
    backend: BackendClient,
    store: S,
    expiry_skew_secs: i64,
    state: Mutex<SessionState>,
}

impl<S: TokenStore> SessionManager<S> {
    pub fn new(backend: BackendClient, store: S, expiry_skew_secs: i64) -> Self {
        Self {
            backend,
            store,
            expiry_skew_secs,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load persisted credentials. Returns whether any were found.
    pub async fn restore(&self) -> Result<bool> {
        let credentials = self.store.load().await?;
        let found = credentials.is_some();
        let mut state = self.lock_state();
        state.credentials = credentials;
        state.epoch += 1;
        Ok(found)
    }

    /// Start a session from freshly issued tokens
    pub async fn establish(&self, tokens: TokenPair) -> Result<()> {
        let credentials = Credentials {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token.unwrap_or_default(),
        };
        {
            let mut state = self.lock_state();
            state.credentials = Some(credentials.clone());
            state.epoch += 1;
        }
        self.store.save(&credentials).await
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.lock_state().credentials.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_state().credentials.is_some()
    }

    /// Drop the session in memory and in storage
    pub async fn clear(&self) -> Result<()> {
        {
            let mut state = self.lock_state();
            state.credentials = None;
            state.epoch += 1;
        }
        self.store.clear().await
    }

    /// Current bearer token, refreshed first if it is about to expire
    pub async fn access_token(&self) -> Result<String> {
        let token = self
            .lock_state()
            .credentials
            .as_ref()
            .map(|c| c.access_token.clone())
            .ok_or(AppError::SessionExpired)?;

        if jwt::expires_within(&token, self.expiry_skew_secs) {
            tracing::debug!("Access token about to expire, refreshing ahead of time");
            return self.refresh_after_unauthorized(&token).await;
        }
        Ok(token)
    }

    /// Called after the backend rejected `rejected_token`.
    ///
    /// Returns the token to replay the request with. At most one refresh call
    /// is in flight; concurrent callers wait for its result.
    pub async fn refresh_after_unauthorized(&self, rejected_token: &str) -> Result<String> {
        let step = {
            let mut guard = self.lock_state();
            let state = &mut *guard;
            match &state.credentials {
                None => return Err(AppError::SessionExpired),
                Some(current) if current.access_token != rejected_token => {
                    RefreshStep::Current(current.access_token.clone())
                }
                Some(_) if state.refreshing => {
                    let (tx, rx) = oneshot::channel();
                    state.waiters.push_back(tx);
                    RefreshStep::Wait(rx)
                }
                Some(current) => {
                    state.refreshing = true;
                    RefreshStep::Lead {
                        refresh_token: current.refresh_token.clone(),
                        epoch: state.epoch,
                    }
                }
            }
        };

        match step {
            RefreshStep::Current(token) => Ok(token),
            RefreshStep::Wait(rx) => match rx.await {
                Ok(Ok(token)) => Ok(token),
                Ok(Err(failure)) => {
                    tracing::debug!(?failure, "Queued request released without a token");
                    Err(AppError::SessionExpired)
                }
                Err(_) => Err(AppError::SessionExpired),
            },
            RefreshStep::Lead {
                refresh_token,
                epoch,
            } => {
                let guard = InFlightGuard {
                    state: &self.state,
                    armed: true,
                };
                let result = if refresh_token.is_empty() {
                    Err(AppError::SessionExpired)
                } else {
                    self.backend.refresh(&refresh_token).await
                };
                guard.disarm();
                self.finish_refresh(result, refresh_token, epoch).await
            }
        }
    }

    async fn finish_refresh(
        &self,
        result: Result<TokenPair>,
        previous_refresh_token: String,
        epoch: u64,
    ) -> Result<String> {
        let refreshed = result.map(|tokens| Credentials {
            access_token: tokens.access_token,
            refresh_token: tokens
                .refresh_token
                .filter(|t| !t.is_empty())
                .unwrap_or(previous_refresh_token),
        });

        let settled = {
            let mut state = self.lock_state();
            state.refreshing = false;
            let waiters = std::mem::take(&mut state.waiters);
            if state.epoch != epoch {
                // Sign-in, restore or sign-out happened meanwhile
                let current = state.credentials.as_ref().map(|c| c.access_token.clone());
                Settled::Superseded(waiters, current)
            } else {
                match &refreshed {
                    Ok(credentials) => state.credentials = Some(credentials.clone()),
                    Err(_) => {
                        state.credentials = None;
                        state.epoch += 1;
                    }
                }
                Settled::Applied(waiters)
            }
        };

        let waiters = match settled {
            Settled::Applied(waiters) => waiters,
            Settled::Superseded(waiters, current) => {
                tracing::info!("Session changed while refreshing, discarding refresh outcome");
                return match current {
                    Some(token) => {
                        release(waiters, Ok(token.clone()));
                        Ok(token)
                    }
                    None => {
                        release(waiters, Err(RefreshFailure::Cancelled));
                        Err(AppError::SessionExpired)
                    }
                };
            }
        };

        match refreshed {
            Ok(credentials) => {
                release(waiters, Ok(credentials.access_token.clone()));
                if let Err(e) = self.store.save(&credentials).await {
                    tracing::warn!(error = %e, "Failed to persist refreshed credentials");
                }
                metrics::counter!("club_portal_token_refresh_total", "result" => "success")
                    .increment(1);
                tracing::info!("Access token refreshed");
                Ok(credentials.access_token)
            }
            Err(e) => {
                release(waiters, Err(RefreshFailure::Rejected));
                if let Err(store_err) = self.store.clear().await {
                    tracing::warn!(error = %store_err, "Failed to clear stored credentials");
                }
                metrics::counter!("club_portal_token_refresh_total", "result" => "failure")
                    .increment(1);
                tracing::warn!(error = %e, "Token refresh failed, session cleared");

                Err(match e {
                    AppError::Backend { status, .. } if status.is_client_error() => {
                        AppError::SessionExpired
                    }
                    other => other,
                })
            }
        }
    }
}

fn release(waiters: VecDeque<oneshot::Sender<RefreshOutcome>>, outcome: RefreshOutcome) {
    for waiter in waiters {
        // Receiver may have been dropped; nothing to deliver then
        let _ = waiter.send(outcome.clone());
    }
}

/// Resets the in-flight flag if the refreshing future is dropped mid-call
struct InFlightGuard<'a> {
    state: &'a Mutex<SessionState>,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let waiters = {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };
        tracing::debug!(waiting = waiters.len(), "Token refresh cancelled");
        release(waiters, Err(RefreshFailure::Cancelled));
    }
}
