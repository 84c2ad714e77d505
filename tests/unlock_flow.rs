use std::{sync::Arc, time::Duration};

use homegate::{
    Catalog, Coords, FixedLocation, GateConfig, GateState, Notice, Notifier, Presentation,
    RecordingAlerts, RecordingSink, UnlockSession,
};

#[tokio::test(start_paused = true)]
async fn standing_at_the_listing_unlocks_it() {
    let cat = Catalog::bundled().expect("bundled catalog");
    let listing = cat.require("1").expect("listing 1");
    assert_eq!(listing.coords, Coords::new(37.7749, -122.4194).unwrap());

    let sink = Arc::new(RecordingSink::new());
    let alerts = Arc::new(RecordingAlerts::new());
    let notifier = Notifier::init(sink.clone(), Presentation::default());

    let session = UnlockSession::open(
        listing.clone(),
        &FixedLocation::granted(Coords::new(37.7749, -122.4194).unwrap()),
        notifier,
        alerts.clone(),
        GateConfig::default(),
    )
    .await;

    let result = session.proximity().expect("no evaluation");
    assert!(result.distance().abs() < 1.0e-9);
    assert!(result.within_threshold());

    let posted = sink.posted();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].title, "User Vicinity Alert");
    assert_eq!(
        posted[0].body,
        format!("User is within 30 meters of {}.", listing.address)
    );

    let start = tokio::time::Instant::now();
    let handle = session.unlock().expect("unlock refused");

    // Nothing happens before the delay runs out.
    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(sink.posted().len(), 1);

    handle.await.expect("unlock task failed");
    assert!(start.elapsed() >= Duration::from_secs(1));

    let posted = sink.posted();
    assert_eq!(posted.len(), 2);
    assert_eq!(posted[1].title, "Home Unlocked");
    assert_eq!(
        posted[1].body,
        format!("You have successfully unlocked {}.", listing.address)
    );
    assert_eq!(
        alerts.shown(),
        vec![Notice::Unlocked {
            address: listing.address.clone()
        }]
    );
}

#[tokio::test]
async fn denied_permission_never_unlocks() {
    let cat = Catalog::bundled().expect("bundled catalog");
    let listing = cat.require("1").expect("listing 1");

    let sink = Arc::new(RecordingSink::new());
    let alerts = Arc::new(RecordingAlerts::new());
    let notifier = Notifier::init(sink.clone(), Presentation::default());

    let session = UnlockSession::open(
        listing,
        &FixedLocation::denied(),
        notifier,
        alerts.clone(),
        GateConfig::default(),
    )
    .await;

    assert_eq!(session.state(), GateState::PermissionDenied);
    assert!(!session.can_unlock());
    assert!(session.unlock().is_err());
    assert!(sink.posted().is_empty());
    assert_eq!(alerts.shown(), vec![Notice::PermissionDenied]);
}

#[tokio::test]
async fn a_block_away_is_too_far() {
    let cat = Catalog::bundled().expect("bundled catalog");
    let listing = cat.require("1").expect("listing 1");

    let sink = Arc::new(RecordingSink::new());
    let notifier = Notifier::init(sink.clone(), Presentation::default());

    // About 110 m north.
    let user = Coords::new(37.7759, -122.4194).unwrap();
    let session = UnlockSession::open(
        listing,
        &FixedLocation::granted(user),
        notifier,
        Arc::new(RecordingAlerts::new()),
        GateConfig::default(),
    )
    .await;

    let result = session.proximity().expect("no evaluation");
    assert!(result.distance() > 100.0 && result.distance() < 120.0);
    assert!(!session.can_unlock());
    assert!(sink.posted().is_empty());
}
