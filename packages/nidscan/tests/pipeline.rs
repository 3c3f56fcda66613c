//! End-to-end scan scenarios against a fake recognizer.

mod common;

use common::{jpeg, verifier, verifier_with_timeout, Behaviour, FakeFactory};
use nidscan::prelude::*;
use std::time::Duration;

#[tokio::test]
async fn test_scan_verified_overwrites_identity_fields() {
    let factory = FakeFactory::text("Name: JOHN SMITH\nID: 1234567890123");
    let verifier = verifier(factory.clone());

    let mut session = ScanSession::new();
    session.set_full_name("john");
    session.set_nid_number("999");
    session.set_email("john@example.com");

    let status = session.scan(&verifier, &jpeg()).await.unwrap();
    assert_eq!(status, NidStatus::Verified);

    let draft = session.draft();
    assert_eq!(draft.full_name, "JOHN SMITH");
    assert_eq!(draft.nid_number, "1234567890123");
    assert_eq!(draft.email, "john@example.com");
    let data = draft.nid_data.as_ref().unwrap();
    assert_eq!(data.match_confidence, 0.85);
    assert!(data.is_authentic);
    assert_eq!(factory.counters.outstanding(), 0);
}

#[tokio::test]
async fn test_scan_without_fields_is_rejected_and_draft_kept() {
    let factory = FakeFactory::text("no usable fields here");
    let mut session = ScanSession::new();
    session.set_full_name("Typed Name");
    session.set_nid_number("5512345678");

    let status = session.scan(&verifier(factory), &jpeg()).await.unwrap();
    assert_eq!(status, NidStatus::Rejected);

    let draft = session.draft();
    assert_eq!(draft.full_name, "Typed Name");
    assert_eq!(draft.nid_number, "5512345678");
    let data = draft.nid_data.as_ref().unwrap();
    assert_eq!(data.extracted_name, "NAME NOT FOUND");
    assert_eq!(data.extracted_id, "ID NOT FOUND");
    assert_eq!(data.match_confidence, 0.4);
}

#[tokio::test]
async fn test_recognizer_failure_rejects_and_releases() {
    let factory = FakeFactory::failing("unsupported image format");
    let mut session = ScanSession::new();
    session.set_full_name("Typed Name");

    let err = session.scan(&verifier(factory.clone()), &jpeg()).await.unwrap_err();
    assert!(matches!(err, VerifyError::Recognition(OcrError::EngineError(_))));
    assert_eq!(session.status(), NidStatus::Rejected);
    assert_eq!(session.draft().full_name, "Typed Name");
    assert!(session.draft().nid_data.is_none());
    assert_eq!(factory.counters.acquired(), 1);
    assert_eq!(factory.counters.terminated(), 1);
}

#[tokio::test]
async fn test_rescan_after_verified_can_reject() {
    let good = verifier(FakeFactory::text("Name: RAHIM UDDIN\n19901234567"));
    let bad = verifier(FakeFactory::failing("blurred"));

    let mut session = ScanSession::new();
    let mut seen = vec![session.status()];
    seen.push(session.scan(&good, &jpeg()).await.unwrap());
    let _ = session.scan(&bad, &jpeg()).await;
    seen.push(session.status());

    assert_eq!(
        seen,
        vec![NidStatus::NotStarted, NidStatus::Verified, NidStatus::Rejected]
    );
    // The failed rescan neither clears nor replaces the earlier extraction.
    assert_eq!(session.draft().full_name, "RAHIM UDDIN");
    assert_eq!(session.draft().nid_data.as_ref().unwrap().extracted_id, "19901234567");
}

#[tokio::test(start_paused = true)]
async fn test_slow_recognizer_times_out() {
    let factory = FakeFactory::new(Behaviour::Sleep(
        Duration::from_secs(120),
        "ID 1234567890".into(),
    ));
    let verifier = verifier_with_timeout(factory.clone(), Duration::from_secs(30));
    let mut session = ScanSession::new();

    let err = session.scan(&verifier, &jpeg()).await.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(session.status(), NidStatus::Rejected);
    assert_eq!(factory.counters.outstanding(), 0);
}

#[tokio::test]
async fn test_independent_sessions_scan_concurrently() {
    let factory = FakeFactory::new(Behaviour::Sleep(
        Duration::from_millis(20),
        "Name: KARIM\n1234567890".into(),
    ));
    let verifier = verifier(factory.clone());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let verifier = verifier.clone();
        handles.push(tokio::spawn(async move {
            let mut session = ScanSession::new();
            session.scan(&verifier, &jpeg()).await.map(|_| session)
        }));
    }
    for handle in handles {
        let session = handle.await.unwrap().unwrap();
        assert_eq!(session.status(), NidStatus::Verified);
        assert_eq!(session.draft().full_name, "KARIM");
    }
    assert_eq!(factory.counters.acquired(), 8);
    assert_eq!(factory.counters.outstanding(), 0);
}

#[tokio::test]
async fn test_finalized_scan_lands_in_audit_log() {
    let dir = tempfile::tempdir().unwrap();
    let mut log = AuditLog::open(dir.path().join("audit.json")).await.unwrap();
    let verifier = verifier(FakeFactory::text("নাম: SALMA BEGUM\nNID 8712345678901"));

    let mut session = ScanSession::new();
    session.set_phone("+8801812345678");
    session.scan(&verifier, &jpeg()).await.unwrap();
    let record = session.finalize(fingerprint());
    log.append(record).await.unwrap();

    assert_eq!(session.status(), NidStatus::NotStarted);
    let stored = &log.records()[0];
    assert_eq!(stored.full_name, "SALMA BEGUM");
    assert_eq!(stored.nid_number, "8712345678901");
    assert_eq!(stored.nid_status, NidStatus::Verified);
    assert!(stored.signature_fingerprint.starts_with("WAVE-BD-"));
    assert_eq!(log.stats().verified, 1);
}

#[tokio::test]
async fn test_title_case_card_name_replaces_typed_name_whole() {
    let factory = FakeFactory::text("Name: Rahim Uddin\nNID 1990123456789");
    let mut session = ScanSession::new();
    session.set_full_name("rahim");

    let status = session.scan(&verifier(factory), &jpeg()).await.unwrap();
    assert_eq!(status, NidStatus::Verified);
    assert_eq!(session.draft().full_name, "Rahim Uddin");
    assert_eq!(session.draft().nid_number, "1990123456789");
}
