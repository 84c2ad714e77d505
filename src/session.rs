//! The detail view of a single listing: find the user, decide if they are close enough, and
//! unlock on request.
//!
//! ```text
//! PermissionUnknown -> PermissionDenied
//!                   -> PositionUnavailable
//!                   -> Evaluated(within | not within)
//! ```
//!
//! There is no way back to `PermissionUnknown`; each session evaluates once.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::{
    config::GateConfig,
    errors::HomeGateErr,
    gate::{ProximityGate, ProximityResult},
    listing::Listing,
    location::{LocationProvider, Permission},
    notify::{AlertSink, Notice, Notifier},
};

/// Where a session is in its one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateState {
    /// Nothing asked yet.
    PermissionUnknown,
    /// The user refused access to their location.
    PermissionDenied,
    /// Permission was granted (or never answered) but there is no position fix.
    PositionUnavailable,
    /// The position was compared with the listing.
    Evaluated(ProximityResult),
}

/// Unlock logic for one listing.
pub struct UnlockSession {
    listing: Listing,
    gate: ProximityGate,
    config: GateConfig,
    notifier: Notifier,
    alerts: Arc<dyn AlertSink>,
    state: GateState,
}

impl std::fmt::Debug for UnlockSession {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("UnlockSession")
            .field("listing", &self.listing.id)
            .field("gate", &self.gate)
            .field("state", &self.state)
            .finish()
    }
}

impl UnlockSession {
    /// Create a session that has not looked for the user yet.
    pub fn new(
        listing: Listing,
        notifier: Notifier,
        alerts: Arc<dyn AlertSink>,
        config: GateConfig,
    ) -> Self {
        UnlockSession {
            listing,
            gate: ProximityGate::with_radius(config.radius),
            config,
            notifier,
            alerts,
            state: GateState::PermissionUnknown,
        }
    }

    /// Create a session and run its evaluation.
    pub async fn open(
        listing: Listing,
        provider: &dyn LocationProvider,
        notifier: Notifier,
        alerts: Arc<dyn AlertSink>,
        config: GateConfig,
    ) -> Self {
        let mut session = Self::new(listing, notifier, alerts, config);
        session.evaluate(provider).await;
        session
    }

    /// Ask for permission, get a position, and compare it with the listing.
    ///
    /// Only the first call does anything, later calls return the state already reached.
    pub async fn evaluate(&mut self, provider: &dyn LocationProvider) -> GateState {
        if self.state != GateState::PermissionUnknown {
            log::debug!(
                "listing {} already evaluated, state {:?}",
                self.listing.id,
                self.state
            );
            return self.state;
        }

        self.state = self.run_evaluation(provider).await;

        // The state is settled before the sink is involved, so a slow sink only delays the
        // return, bounded by `Notifier::HAND_OVER_TIMEOUT`.
        if self.can_unlock() {
            let body = format!(
                "User is within {} meters of {}.",
                self.gate.radius(),
                self.listing.address
            );
            self.notifier.post("User Vicinity Alert", &body).await;
        }

        self.state
    }

    async fn run_evaluation(&self, provider: &dyn LocationProvider) -> GateState {
        let timeout = self.config.location_timeout;

        match bounded(timeout, "location permission", provider.request_permission()).await {
            Ok(Permission::Granted) => {}
            Ok(Permission::Denied) => {
                log::info!("location permission denied for listing {}", self.listing.id);
                self.alerts.alert(Notice::PermissionDenied);
                return GateState::PermissionDenied;
            }
            Err(err) => {
                log::warn!("no permission answer for listing {}: {}", self.listing.id, err);
                return GateState::PositionUnavailable;
            }
        }

        let position = match bounded(timeout, "position fix", provider.current_position()).await {
            Ok(position) => position,
            Err(err) => {
                log::warn!("no position for listing {}: {}", self.listing.id, err);
                return GateState::PositionUnavailable;
            }
        };

        let result = self.gate.evaluate(&position, &self.listing.coords);
        log::info!(
            "listing {} is {:.1} m away, unlock available: {}",
            self.listing.id,
            result.distance(),
            result.within_threshold()
        );

        GateState::Evaluated(result)
    }

    /// The listing this session is about.
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Where the session is.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// The proximity result, if the session got that far.
    pub fn proximity(&self) -> Option<ProximityResult> {
        match self.state {
            GateState::Evaluated(result) => Some(result),
            _ => None,
        }
    }

    /// True if the user was close enough when the session evaluated.
    pub fn can_unlock(&self) -> bool {
        self.proximity()
            .map(|result| result.within_threshold())
            .unwrap_or(false)
    }

    /// Unlock the listing after the configured delay.
    ///
    /// The returned handle completes once the notice is shown and the notification posted; it
    /// can be dropped. Must be called from within a tokio runtime.
    pub fn unlock(&self) -> Result<JoinHandle<()>, HomeGateErr> {
        if !self.can_unlock() {
            return Err(HomeGateErr::UnlockUnavailable);
        }

        let notifier = self.notifier.clone();
        let alerts = Arc::clone(&self.alerts);
        let address = self.listing.address.clone();
        let delay = self.config.unlock_delay;

        log::info!(
            "unlocking listing {} in {} ms",
            self.listing.id,
            delay.as_millis()
        );

        Ok(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let body = format!("You have successfully unlocked {}.", address);
            alerts.alert(Notice::Unlocked { address });
            notifier.post("Home Unlocked", &body).await;
        }))
    }
}

async fn bounded<T>(
    limit: Duration,
    what: &'static str,
    fut: impl Future<Output = Result<T, HomeGateErr>>,
) -> Result<T, HomeGateErr> {
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res,
        Err(_) => Err(HomeGateErr::Timeout(what)),
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
