//! Canonical event fixtures

use papas_reco::pipeline::PapasEvent;
use papas_reco::shared::models::Vector3;

use super::builders::*;

/// Central direction (|eta| well inside the barrel)
pub fn barrel() -> Vector3 {
    Vector3::new(1.0, 0.5, 0.2)
}

/// Forward direction (|eta| > 1.48)
pub fn endcap() -> Vector3 {
    Vector3::new(0.3, 0.1, 2.0)
}

/// Lone positive track, energy 10
pub fn lone_track() -> PapasEvent {
    EventBuilder::new()
        .track(1, 10.0, 1, barrel())
        .block(&[tid(1)], &[])
        .build()
}

/// Lone ecal, energy 5
pub fn lone_ecal() -> PapasEvent {
    EventBuilder::new()
        .ecal(1, 5.0, Vector3::new(0.0, 3.0, 4.0))
        .block(&[eid(1)], &[])
        .build()
}

/// Lone hcal below the neutral kaon mass
pub fn soft_hcal() -> PapasEvent {
    EventBuilder::new()
        .hcal(1, 0.05, barrel())
        .block(&[hid(1)], &[])
        .build()
}

/// Track (10) linked to an hcal (20)
pub fn track_and_hot_hcal() -> PapasEvent {
    EventBuilder::new()
        .track(1, 10.0, 1, barrel())
        .hcal(1, 20.0, barrel())
        .block(&[tid(1), hid(1)], &[(tid(1), hid(1), 0.05)])
        .build()
}

/// Two tracks (6 and 4) on one hcal carrying exactly their energy
pub fn two_tracks_one_hcal() -> PapasEvent {
    EventBuilder::new()
        .track(1, 6.0, 1, barrel())
        .track(2, 4.0, -1, barrel())
        .hcal(1, 10.0, barrel())
        .block(
            &[tid(1), tid(2), hid(1)],
            &[(tid(1), hid(1), 0.02), (tid(2), hid(1), 0.08)],
        )
        .build()
}

/// Track reaching two hcals plus an ecal linked to the far hcal
///
/// Normalization drops t1-h2 and e1-h2, leaving {t1, h1}, {h2}, {e1}.
pub fn forked_track() -> PapasEvent {
    EventBuilder::new()
        .track(1, 10.0, 1, barrel())
        .hcal(1, 10.0, barrel())
        .hcal(2, 8.0, barrel())
        .ecal(1, 3.0, barrel())
        .block(
            &[tid(1), hid(1), hid(2), eid(1)],
            &[(tid(1), hid(1), 0.01), (tid(1), hid(2), 0.2), (eid(1), hid(2), 0.03)],
        )
        .build()
}
