//! Session lifecycle manager: login, logout, restore, and coalesced refresh.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::{Mutex, broadcast, watch};
use tracing::{debug, error, info, warn};

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_entity::session::{Identity, Session, SessionEvent, SessionState};

use crate::service::AuthService;

use super::store::SessionStore;

/// Buffered lifecycle events per subscriber.
const EVENT_CAPACITY: usize = 16;

/// A refresh shared by every caller that arrives while it is outstanding.
type RefreshFuture = Shared<BoxFuture<'static, AppResult<String>>>;

/// The refresh currently on the wire, tagged with the epoch it started in.
struct InFlight {
    epoch: u64,
    future: RefreshFuture,
}

/// Mutable state guarded by the manager lock.
struct Inner {
    /// In-memory mirror of the persisted session.
    session: Option<Session>,
    /// Bumped on every login and logout; results from older epochs are dropped.
    epoch: u64,
    /// Outstanding refresh, if any.
    in_flight: Option<InFlight>,
}

struct ManagerCore {
    auth: Arc<dyn AuthService>,
    store: SessionStore,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<SessionState>,
    events_tx: broadcast::Sender<SessionEvent>,
}

/// Owns the session state machine and is the only writer of the session.
///
/// Cloning is cheap; all clones share the same session.
#[derive(Clone)]
pub struct SessionManager {
    core: Arc<ManagerCore>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .field("auth", &self.core.auth)
            .finish()
    }
}

impl SessionManager {
    /// Creates a manager in the `Unauthenticated` state.
    ///
    /// Call [`restore`](Self::restore) to pick up a persisted session.
    pub fn new(auth: Arc<dyn AuthService>, store: SessionStore) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Unauthenticated);
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            core: Arc::new(ManagerCore {
                auth,
                store,
                inner: Mutex::new(Inner {
                    session: None,
                    epoch: 0,
                    in_flight: None,
                }),
                state_tx,
                events_tx,
            }),
        }
    }

    /// Current state of the session state machine.
    pub fn state(&self) -> SessionState {
        *self.core.state_tx.borrow()
    }

    /// Whether a usable session exists.
    pub fn is_authenticated(&self) -> bool {
        self.state().is_signed_in()
    }

    /// Watch state transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.core.state_tx.subscribe()
    }

    /// Receive lifecycle events emitted after this call.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.core.events_tx.subscribe()
    }

    /// Identity of the signed-in store, if any.
    pub async fn current_user(&self) -> Option<Identity> {
        let inner = self.core.inner.lock().await;
        inner.session.as_ref().map(|s| s.user.clone())
    }

    /// Latest access token, if any.
    pub async fn access_token(&self) -> Option<String> {
        let inner = self.core.inner.lock().await;
        inner.session.as_ref().map(|s| s.access_token.clone())
    }

    /// Loads a persisted session, moving to `Authenticated` if one exists.
    ///
    /// Has no effect once the state machine has left `Unauthenticated`.
    pub async fn restore(&self) -> AppResult<Option<Identity>> {
        let mut inner = self.core.inner.lock().await;
        if inner.session.is_some() || self.state() != SessionState::Unauthenticated {
            return Ok(inner.session.as_ref().map(|s| s.user.clone()));
        }

        match self.core.store.load().await? {
            Some(session) => {
                let user = session.user.clone();
                info!(user_id = %user.id, "Restored persisted session");
                inner.session = Some(session);
                self.set_state(SessionState::Authenticated);
                Ok(Some(user))
            }
            None => {
                debug!("No persisted session found");
                Ok(None)
            }
        }
    }

    /// Signs in with email and password.
    ///
    /// Only valid from `Unauthenticated`. On failure the stored session is
    /// left untouched and the state returns to `Unauthenticated`.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Identity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let epoch = {
            let mut inner = self.core.inner.lock().await;
            let state = self.state();
            if !state.can_login() {
                return Err(match state {
                    SessionState::Authenticating => {
                        AppError::validation("A login is already in progress")
                    }
                    _ => AppError::validation("Already authenticated"),
                });
            }
            inner.epoch += 1;
            self.set_state(SessionState::Authenticating);
            inner.epoch
        };

        let outcome = self.core.auth.login(email, password).await;

        let mut inner = self.core.inner.lock().await;
        if inner.epoch != epoch {
            debug!(epoch, current = inner.epoch, "Discarding superseded login result");
            return Err(AppError::authentication("Login was cancelled"));
        }

        match outcome {
            Ok(grant) => {
                let session = Session::from(grant);
                if let Err(e) = self.core.store.save(&session).await {
                    error!(error = %e, "Failed to persist session after login");
                    if let Err(clear_err) = self.core.store.clear().await {
                        warn!(error = %clear_err, "Failed to clear partially written session");
                    }
                    self.set_state(SessionState::Unauthenticated);
                    return Err(e);
                }

                let user = session.user.clone();
                inner.session = Some(session);
                self.set_state(SessionState::Authenticated);
                info!(user_id = %user.id, "Login successful");
                self.emit(SessionEvent::LoggedIn {
                    user_id: user.id.clone(),
                });
                Ok(user)
            }
            Err(e) => {
                self.set_state(SessionState::Unauthenticated);
                warn!(kind = %e.kind, "Login failed");
                Err(e)
            }
        }
    }

    /// Ends the session. Calling it without a session is a no-op success.
    ///
    /// Any refresh still on the wire is invalidated.
    pub async fn logout(&self) -> AppResult<()> {
        let mut inner = self.core.inner.lock().await;
        let was = self.state();
        let user_id = inner.session.as_ref().map(|s| s.user.id.clone());

        let cleared = self.end_session(&mut inner).await;

        if was != SessionState::Unauthenticated {
            info!(user_id = user_id.as_deref().unwrap_or(""), "Logged out");
            self.emit(SessionEvent::LoggedOut);
        }
        cleared
    }

    /// Refreshes the session tokens and returns the new access token.
    ///
    /// Concurrent callers share one call to the auth service and observe the
    /// same outcome. Any failure ends the session and emits `SessionExpired`.
    pub async fn refresh(&self) -> AppResult<String> {
        let future = {
            let mut inner = self.core.inner.lock().await;
            if let Some(flight) = &inner.in_flight {
                debug!("Joining in-flight token refresh");
                flight.future.clone()
            } else {
                let (refresh_token, user_id) = match inner.session.as_ref() {
                    Some(session) => (session.refresh_token.clone(), session.user.id.clone()),
                    None => return Err(AppError::authentication("No active session to refresh")),
                };

                let epoch = inner.epoch;
                let future = self
                    .clone()
                    .run_refresh(epoch, refresh_token)
                    .boxed()
                    .shared();
                inner.in_flight = Some(InFlight {
                    epoch,
                    future: future.clone(),
                });
                self.set_state(SessionState::Refreshing);
                info!(user_id = %user_id, "Refreshing session tokens");
                future
            }
        };

        future.await
    }

    /// Performs one refresh and applies its result if the epoch is unchanged.
    async fn run_refresh(self, epoch: u64, refresh_token: String) -> AppResult<String> {
        let outcome = self.core.auth.refresh(&refresh_token).await;

        let mut inner = self.core.inner.lock().await;
        if inner.in_flight.as_ref().is_some_and(|f| f.epoch == epoch) {
            inner.in_flight = None;
        }
        if inner.epoch != epoch {
            debug!(epoch, current = inner.epoch, "Discarding superseded refresh result");
            return Err(AppError::authentication("Session ended while refreshing"));
        }

        match outcome {
            Ok(tokens) => {
                let Some(current) = inner.session.as_ref() else {
                    return Err(AppError::authentication("No active session to refresh"));
                };
                let updated = current.with_tokens(&tokens);
                if let Err(e) = self.core.store.save_tokens(&updated).await {
                    warn!(error = %e, "Failed to persist refreshed tokens");
                }

                info!(
                    user_id = %updated.user.id,
                    rotated = tokens.refresh_token.is_some(),
                    "Session tokens refreshed"
                );
                let access_token = updated.access_token.clone();
                inner.session = Some(updated);
                self.set_state(SessionState::Authenticated);
                self.emit(SessionEvent::Refreshed);
                Ok(access_token)
            }
            Err(e) => {
                warn!(kind = %e.kind, error = %e.message, "Token refresh failed, ending session");
                if let Err(clear_err) = self.end_session(&mut inner).await {
                    error!(error = %clear_err, "Failed to clear expired session");
                }
                self.emit(SessionEvent::SessionExpired {
                    reason: e.message.clone(),
                });
                Err(AppError::session_expired(format!(
                    "Session expired: {}",
                    e.message
                )))
            }
        }
    }

    /// Drops the in-memory session, invalidates the epoch, and clears storage.
    async fn end_session(&self, inner: &mut Inner) -> AppResult<()> {
        inner.session = None;
        inner.in_flight = None;
        inner.epoch += 1;
        self.set_state(SessionState::Unauthenticated);
        self.core.store.clear().await
    }

    fn set_state(&self, state: SessionState) {
        let previous = self.core.state_tx.send_replace(state);
        if previous != state {
            debug!(from = %previous, to = %state, "Session state changed");
        }
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.core.events_tx.send(event);
    }
}
