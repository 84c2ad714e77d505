//! Where the user is, as told by the device.

use std::time::Duration;

use async_trait::async_trait;

use crate::{coords::Coords, errors::HomeGateErr};

/// Answer to a request for access to the device location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsStaticStr, EnumIter)]
#[allow(missing_docs)]
pub enum Permission {
    #[strum(to_string = "granted", serialize = "GRANTED")]
    Granted,
    #[strum(to_string = "denied", serialize = "DENIED")]
    Denied,
}

/// The device location service.
///
/// Both calls are one-shot. Implementations are not expected to retry or to time out on their
/// own, the caller bounds them.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask the user for access to their location.
    async fn request_permission(&self) -> Result<Permission, HomeGateErr>;

    /// Get a single position fix.
    async fn current_position(&self) -> Result<Coords, HomeGateErr>;
}

/// A provider with canned answers.
#[derive(Debug, Clone)]
pub struct FixedLocation {
    permission: Permission,
    position: Option<Coords>,
    delay: Duration,
}

impl FixedLocation {
    /// Permission granted, always at `position`.
    pub fn granted(position: Coords) -> Self {
        FixedLocation {
            permission: Permission::Granted,
            position: Some(position),
            delay: Duration::from_secs(0),
        }
    }

    /// Permission denied.
    pub fn denied() -> Self {
        FixedLocation {
            permission: Permission::Denied,
            position: None,
            delay: Duration::from_secs(0),
        }
    }

    /// Permission granted, but no position fix can be had.
    pub fn unavailable() -> Self {
        FixedLocation {
            permission: Permission::Granted,
            position: None,
            delay: Duration::from_secs(0),
        }
    }

    /// Wait this long before answering each call.
    pub fn with_delay(self, delay: Duration) -> Self {
        FixedLocation { delay, ..self }
    }

    async fn pause(&self) {
        if self.delay > Duration::from_secs(0) {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> Result<Permission, HomeGateErr> {
        self.pause().await;
        Ok(self.permission)
    }

    async fn current_position(&self) -> Result<Coords, HomeGateErr> {
        self.pause().await;

        if self.permission == Permission::Denied {
            return Err(HomeGateErr::LocationUnavailable(
                "location permission denied".to_owned(),
            ));
        }

        self.position.ok_or_else(|| {
            HomeGateErr::LocationUnavailable("no position fix available".to_owned())
        })
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    use std::str::FromStr;
    use strum::{AsStaticRef, IntoEnumIterator};

    #[test]
    fn round_trip_strings_for_permission() {
        for permission in Permission::iter() {
            assert_eq!(
                Permission::from_str(permission.as_static()).unwrap(),
                permission
            );
        }
        assert_eq!(Permission::from_str("DENIED").unwrap(), Permission::Denied);
    }

    #[tokio::test]
    async fn test_fixed_location_answers() {
        let here = Coords::new(46.8721, -113.994).unwrap();

        let provider = FixedLocation::granted(here);
        assert_eq!(
            provider.request_permission().await.unwrap(),
            Permission::Granted
        );
        assert_eq!(provider.current_position().await.unwrap(), here);

        let provider = FixedLocation::denied();
        assert_eq!(
            provider.request_permission().await.unwrap(),
            Permission::Denied
        );
        assert!(provider.current_position().await.is_err());

        let provider = FixedLocation::unavailable();
        assert!(matches!(
            provider.current_position().await,
            Err(HomeGateErr::LocationUnavailable(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_location_delay() {
        let provider = FixedLocation::denied().with_delay(Duration::from_secs(5));
        let start = tokio::time::Instant::now();

        provider.request_permission().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
