//! Edge cases for the reservation service.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use ticketboss::aggregates::LedgerEnvironment;
use ticketboss::config::EventConfig;
use ticketboss::types::{PartnerId, ReservationId};
use ticketboss::{LedgerError, ReservationService};
use ticketboss_testing::{SequentialIdGenerator, test_clock};
use uuid::Uuid;

fn service(total_seats: u32) -> ReservationService {
    ReservationService::new(
        EventConfig {
            total_seats,
            ..EventConfig::default()
        },
        LedgerEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new())),
    )
}

#[tokio::test]
async fn reserve_then_cancel_round_trip() {
    let service = service(500);

    let reservation = service.reserve(PartnerId::new("abc-corp"), 10).await.unwrap();
    let summary = service.summary().await;
    assert_eq!(summary.available_seats, 490);
    assert_eq!(summary.reservation_count, 1);
    assert_eq!(summary.version, 1);

    service.cancel(reservation.reservation_id).await.unwrap();
    let summary = service.summary().await;
    assert_eq!(summary.available_seats, 500);
    assert_eq!(summary.reservation_count, 0);
    assert_eq!(summary.version, 2);
}

#[tokio::test]
async fn seat_bounds_are_inclusive() {
    let service = service(500);

    assert!(service.reserve(PartnerId::new("A"), 1).await.is_ok());
    assert!(service.reserve(PartnerId::new("A"), 10).await.is_ok());

    for seats in [0, 11, -1] {
        assert_eq!(
            service.reserve(PartnerId::new("A"), seats).await,
            Err(LedgerError::InvalidRequest { requested: seats })
        );
    }

    let summary = service.summary().await;
    assert_eq!(summary.available_seats, 489);
    assert_eq!(summary.version, 2);
}

#[tokio::test]
async fn exact_fill_then_reject() {
    let service = service(5);

    service.reserve(PartnerId::new("A"), 5).await.unwrap();
    assert_eq!(
        service.reserve(PartnerId::new("B"), 1).await,
        Err(LedgerError::InsufficientCapacity {
            requested: 1,
            available: 0
        })
    );

    let summary = service.summary().await;
    assert_eq!(summary.available_seats, 0);
    assert_eq!(summary.version, 1);
}

#[tokio::test]
async fn partial_fit_is_rejected_whole() {
    let service = service(5);
    service.reserve(PartnerId::new("A"), 3).await.unwrap();

    assert_eq!(
        service.reserve(PartnerId::new("B"), 3).await,
        Err(LedgerError::InsufficientCapacity {
            requested: 3,
            available: 2
        })
    );
    assert_eq!(service.summary().await.available_seats, 2);
}

#[tokio::test]
async fn cancel_is_single_use() {
    let service = service(500);
    let id = service.reserve(PartnerId::new("A"), 4).await.unwrap().reservation_id;

    service.cancel(id).await.unwrap();
    assert_eq!(service.cancel(id).await, Err(LedgerError::NotFound { reservation_id: id }));

    let summary = service.summary().await;
    assert_eq!(summary.available_seats, 500);
    assert_eq!(summary.version, 2);
}

#[tokio::test]
async fn cancel_unknown_id_changes_nothing() {
    let service = service(500);
    let unknown = ReservationId::from_uuid(Uuid::new_v4());

    assert_eq!(
        service.cancel(unknown).await,
        Err(LedgerError::NotFound { reservation_id: unknown })
    );
    assert_eq!(service.summary().await.version, 0);
}

#[tokio::test]
async fn bootstrap_resets_state() {
    let service = service(50);
    let kept = service.reserve(PartnerId::new("A"), 10).await.unwrap();
    service.reserve(PartnerId::new("B"), 10).await.unwrap();

    let event = service.bootstrap().await.unwrap();
    assert_eq!(event.available_seats, 50);
    assert_eq!(event.version, 0);

    let summary = service.summary().await;
    assert_eq!(summary.reservation_count, 0);
    assert_eq!(
        service.cancel(kept.reservation_id).await,
        Err(LedgerError::NotFound {
            reservation_id: kept.reservation_id
        })
    );
}

#[tokio::test]
async fn version_is_monotonic_between_bootstraps() {
    let service = service(500);
    let mut last = service.summary().await.version;
    let mut held = Vec::new();

    for i in 0..20_i64 {
        if i % 3 == 2 {
            let id = held.pop().unwrap();
            service.cancel(id).await.unwrap();
        } else {
            held.push(service.reserve(PartnerId::new("A"), i % 10 + 1).await.unwrap().reservation_id);
        }
        // rejected operations must not move the version
        let _ = service.reserve(PartnerId::new("A"), 0).await;

        let version = service.summary().await.version;
        assert_eq!(version, last + 1);
        last = version;
    }

    assert!(service.is_consistent().await);
}
