//! Session lifecycle monitor.
//!
//! Derives remaining validity from the profile's expiry timestamp, drives
//! the 1-second countdown, and forces sign-out the instant the credential
//! expires. State machine: `Unresolved -> Valid -> Expired -> SignedOut`,
//! with `SignedOut` terminal and timer-free.
//!
//! No fetch elsewhere in the crate proceeds without this monitor having
//! produced a `Valid` profile for the route's role.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::info;

use mealdrop_core::{Profile, Role};

use crate::session::clock::Clock;
use crate::session::store::SessionStore;

/// Human-readable notice surfaced when a session times out.
pub const EXPIRED_NOTICE: &str = "Session expired, please sign in again.";

/// Lifecycle state of the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not yet hydrated from the store.
    Unresolved,
    /// Profile present, role matched, credential unexpired.
    Valid,
    /// Credential hit its expiry; transitions straight to `SignedOut`.
    Expired,
    /// Terminal. No profile, no timer activity.
    SignedOut,
}

/// Where the caller must navigate after a terminal session outcome.
///
/// The expired-session notice travels here as transient state only; it is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// To the role's login screen, optionally carrying a notice.
    Login { role: Role, notice: Option<String> },
    /// To the role picker (profile exists but belongs to another role).
    RolePicker,
}

/// Monitors the stored profile for the route's expected role.
pub struct SessionMonitor {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    route_role: Role,
    state: SessionState,
    profile: Option<Profile>,
    remaining_ms: Option<i64>,
}

impl SessionMonitor {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>, route_role: Role) -> Self {
        Self {
            store,
            clock,
            route_role,
            state: SessionState::Unresolved,
            profile: None,
            remaining_ms: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The valid profile, if the monitor is in `Valid`.
    #[must_use]
    pub const fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Remaining validity in milliseconds, clamped at zero.
    #[must_use]
    pub fn remaining_ms(&self) -> Option<i64> {
        self.remaining_ms.map(|ms| ms.max(0))
    }

    /// Countdown formatted as `MM:SS`, clamped at `00:00`.
    #[must_use]
    pub fn countdown_label(&self) -> Option<String> {
        self.remaining_ms().map(format_countdown)
    }

    /// Resolve the stored session against the route's expected role.
    ///
    /// Returns `None` when the session is valid; otherwise the redirect the
    /// caller must follow. The three failure outcomes are distinct: no
    /// profile redirects to this role's login, a role mismatch redirects to
    /// the role picker, and an expired profile clears the store and
    /// redirects to login with the expired notice.
    pub fn hydrate(&mut self) -> Option<Redirect> {
        let Some(profile) = self.store.load() else {
            self.state = SessionState::SignedOut;
            return Some(Redirect::Login {
                role: self.route_role,
                notice: None,
            });
        };

        if profile.role != self.route_role {
            // Another role's session stays intact; only this route bails.
            self.state = SessionState::SignedOut;
            return Some(Redirect::RolePicker);
        }

        let now_ms = self.clock.now_ms();
        if profile.is_expired(now_ms) {
            self.state = SessionState::Expired;
            return Some(self.force_sign_out(true));
        }

        self.remaining_ms = Some(profile.remaining_ms(now_ms));
        self.profile = Some(profile);
        self.state = SessionState::Valid;
        None
    }

    /// One countdown step.
    ///
    /// Recomputes the remaining validity; when it reaches zero the
    /// `Valid -> Expired -> SignedOut` transition fires, exactly once per
    /// session, clearing the store and yielding the expired redirect. Ticks
    /// in any other state are no-ops.
    pub fn tick(&mut self) -> Option<Redirect> {
        if self.state != SessionState::Valid {
            return None;
        }
        let remaining = self
            .profile
            .as_ref()
            .map(|p| p.remaining_ms(self.clock.now_ms()))?;
        self.remaining_ms = Some(remaining);

        if remaining <= 0 {
            self.state = SessionState::Expired;
            return Some(self.force_sign_out(true));
        }
        None
    }

    /// Manual sign-out: clears the store, no expiry notice.
    pub fn sign_out(&mut self) -> Redirect {
        self.force_sign_out(false)
    }

    fn force_sign_out(&mut self, expired: bool) -> Redirect {
        if expired {
            info!(role = %self.route_role, "session expired, signing out");
        }
        self.store.clear();
        self.profile = None;
        self.remaining_ms = None;
        self.state = SessionState::SignedOut;
        Redirect::Login {
            role: self.route_role,
            notice: expired.then(|| EXPIRED_NOTICE.to_string()),
        }
    }

    /// Spawn the 1-second countdown driver.
    ///
    /// The driver stops on its own when a tick produces a redirect (expiry)
    /// and is torn down from outside via [`CountdownDriver::stop`] or drop,
    /// covering every exit path so no orphaned timer can act on a stale
    /// profile.
    #[must_use]
    pub fn spawn_countdown(
        monitor: Arc<Mutex<Self>>,
        on_redirect: mpsc::UnboundedSender<Redirect>,
    ) -> CountdownDriver {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let redirect = monitor
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .tick();
                        if let Some(redirect) = redirect {
                            let _ = on_redirect.send(redirect);
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
        });
        CountdownDriver {
            shutdown: shutdown_tx,
            handle,
        }
    }
}

/// Handle to the running countdown task.
#[derive(Debug)]
pub struct CountdownDriver {
    shutdown: watch::Sender<bool>,
    handle: tokio::task::JoinHandle<()>,
}

impl CountdownDriver {
    /// Stop the countdown and wait for the task to finish.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        let _ = (&mut self.handle).await;
    }
}

impl Drop for CountdownDriver {
    fn drop(&mut self) {
        // Unmount path: a dropped driver must not keep ticking.
        let _ = self.shutdown.send(true);
    }
}

fn format_countdown(remaining_ms: i64) -> String {
    let total_seconds = remaining_ms.max(0) / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}
