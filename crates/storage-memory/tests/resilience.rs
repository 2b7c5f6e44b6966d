mod common;

use std::sync::Arc;

use blume_core::errors::{Error, StoreError};
use blume_core::faults::RecoveryReport;
use blume_core::settings::InventorySettings;
use blume_core::utils::FixedClock;
use blume_core::{InventoryService, InventoryServiceTrait};
use blume_storage_memory::{MemoryRecordStore, StoreOp};

use common::{harness, settings, today, ARCHIVE, DEVICES, FAULTS, PENDING};

#[tokio::test]
async fn interrupted_archive_is_finished_by_recovery() {
    let h = harness();
    h.add("B-0001").await;
    let ticket = h
        .service
        .report_fault("B-0001", "Physical damage", "")
        .await
        .unwrap();

    h.store.fail_next_on(
        StoreOp::DeleteRow,
        FAULTS,
        StoreError::unavailable("connection reset"),
    );
    let err = h
        .service
        .archive_resolved_ticket(&ticket, "glued hinge")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Unavailable(_))));

    assert_eq!(h.store.rows(FAULTS).len(), 1);
    assert_eq!(h.store.rows(ARCHIVE).len(), 1);
    assert_eq!(h.ticket_ids(PENDING), vec![ticket.clone()]);

    let report = h.service.recover_pending_archives().await.unwrap();
    assert_eq!(
        report,
        RecoveryReport {
            pending: 1,
            archived: 0,
            removed_from_active: 1,
            completed: 1,
        }
    );
    assert!(h.store.rows(FAULTS).is_empty());
    assert!(h.store.rows(PENDING).is_empty());
    assert_eq!(h.ticket_ids(ARCHIVE), vec![ticket]);

    let device = h.service.get_device("B-0001").await.unwrap();
    assert_eq!(device.last_service_date.as_deref(), Some("2024-07-01"));
}

#[tokio::test]
async fn startup_recovers_a_move_that_never_reached_the_archive() {
    let h = harness();
    h.add("B-0001").await;
    let ticket = h
        .service
        .report_fault("B-0001", "Tracking error", "")
        .await
        .unwrap();

    h.store.fail_next_on(
        StoreOp::AppendRow,
        ARCHIVE,
        StoreError::unavailable("timeout"),
    );
    assert!(h
        .service
        .archive_resolved_ticket(&ticket, "reseated cable")
        .await
        .is_err());
    assert!(h.store.rows(ARCHIVE).is_empty());
    assert_eq!(h.store.rows(PENDING).len(), 1);

    let restarted = InventoryService::start(
        h.store.clone(),
        settings(),
        Arc::new(FixedClock(today())),
    )
    .await
    .unwrap();

    let archived = h.store.rows(ARCHIVE);
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0]["Tech Notes"], "reseated cable");
    assert!(h.store.rows(FAULTS).is_empty());
    assert!(h.store.rows(PENDING).is_empty());

    let again = restarted.recover_pending_archives().await.unwrap();
    assert_eq!(again, RecoveryReport::default());
}

#[tokio::test]
async fn journal_left_behind_after_the_active_row_is_gone_is_cleared() {
    let h = harness();
    h.add("B-0001").await;
    let ticket = h
        .service
        .report_fault("B-0001", "Physical damage", "")
        .await
        .unwrap();

    h.store
        .fail_next_on(StoreOp::DeleteRow, PENDING, StoreError::unavailable("reset"));
    assert!(h
        .service
        .archive_resolved_ticket(&ticket, "new lens")
        .await
        .is_err());

    assert!(h.store.rows(FAULTS).is_empty());
    assert_eq!(h.ticket_ids(ARCHIVE), vec![ticket.clone()]);
    assert_eq!(h.ticket_ids(PENDING), vec![ticket.clone()]);
    assert!(!h
        .service
        .archive_resolved_ticket(&ticket, "new lens")
        .await
        .unwrap());
    assert_eq!(h.store.rows(PENDING).len(), 1);

    let report = h.service.recover_pending_archives().await.unwrap();
    assert_eq!(
        report,
        RecoveryReport {
            pending: 1,
            ..RecoveryReport::default()
        }
    );
    assert!(h.store.rows(PENDING).is_empty());
    assert_eq!(h.ticket_ids(ARCHIVE), vec![ticket]);

    let device = h.service.get_device("B-0001").await.unwrap();
    assert_eq!(device.last_service_date.as_deref(), Some("2024-07-01"));
}

#[tokio::test]
async fn retrying_a_failed_resolve_does_not_duplicate_the_archive_row() {
    let h = harness();
    h.add("B-0001").await;
    let ticket = h
        .service
        .report_fault("B-0001", "Software Error", "")
        .await
        .unwrap();

    h.store
        .fail_next_on(StoreOp::DeleteRow, FAULTS, StoreError::unavailable("reset"));
    assert!(h
        .service
        .archive_resolved_ticket(&ticket, "reflashed")
        .await
        .is_err());

    assert!(h
        .service
        .archive_resolved_ticket(&ticket, "reflashed again")
        .await
        .unwrap());

    let archived = h.store.rows(ARCHIVE);
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0]["Tech Notes"], "reflashed");
    assert!(h.store.rows(FAULTS).is_empty());
    assert!(h.store.rows(PENDING).is_empty());
}

#[tokio::test]
async fn rate_limited_write_is_retried_once_accepted() {
    let h = harness();
    h.add("B-0001").await;

    h.store.fail_next_on(
        StoreOp::AppendRow,
        FAULTS,
        StoreError::rate_limited("quota exceeded"),
    );
    let ticket = h
        .service
        .report_fault("B-0001", "Physical damage", "")
        .await
        .unwrap();

    assert_eq!(ticket, "ID-00001");
    assert_eq!(h.ticket_ids(FAULTS), vec!["ID-00001"]);
}

#[tokio::test]
async fn ambiguous_write_failure_is_not_replayed() {
    let h = harness();
    h.add("B-0001").await;

    h.store.fail_after_apply_on(
        StoreOp::AppendRow,
        FAULTS,
        StoreError::unavailable("connection dropped"),
    );
    let err = h
        .service
        .report_fault("B-0001", "Physical damage", "")
        .await
        .unwrap_err();
    assert!(err.is_store());
    assert_eq!(h.ticket_ids(FAULTS), vec!["ID-00001"]);

    let next = h
        .service
        .report_fault("B-0001", "Tracking error", "")
        .await
        .unwrap();
    assert_eq!(next, "ID-00002");
}

#[tokio::test]
async fn reads_retry_until_attempts_run_out() {
    let h = harness();
    h.add("B-0001").await;

    for _ in 0..2 {
        h.store
            .fail_next(StoreOp::GetAllRecords, StoreError::unavailable("flaky"));
    }
    assert_eq!(h.service.search_device("B-0001").await.unwrap().len(), 1);

    for _ in 0..3 {
        h.store
            .fail_next(StoreOp::GetAllRecords, StoreError::unavailable("down"));
    }
    let err = h.service.search_device("B-0001").await.unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn permanent_store_errors_fail_fast() {
    let h = harness();

    h.store.fail_next_on(
        StoreOp::GetAllRecords,
        DEVICES,
        StoreError::TableNotFound(DEVICES.to_string()),
    );
    let err = h.service.get_fleet_stats().await.unwrap_err();

    assert!(matches!(err, Error::Store(StoreError::TableNotFound(_))));
    assert_eq!(h.store.call_count(StoreOp::GetAllRecords), 1);
}

#[tokio::test]
async fn invalid_settings_are_rejected_at_startup() {
    let store = Arc::new(MemoryRecordStore::new());
    let bad = InventorySettings {
        maintenance_threshold_days: 0,
        ..InventorySettings::default()
    };

    let result = InventoryService::start(store, bad, Arc::new(FixedClock(today()))).await;
    assert!(matches!(result, Err(Error::Settings(_))));
}
