//! Integration tests for the stored workflow transition functions.
//!
//! These exercise the state machine the orchestration layer consumes:
//! legal transitions, WF400 signalling on illegal ones, chain advancement,
//! revision bumps, and the one-audit-row-per-transition guarantee.

use assert_matches::assert_matches;
use sqlx::PgPool;

use docflow_core::{status, DocKind};
use docflow_db::models::document::{CreateDocument, DocumentHeader};
use docflow_db::repositories::transition_repo::is_invalid_state;
use docflow_db::repositories::{DocumentRepo, TransitionRepo, WfTransRepo};

/// Seed a draft document of the given kind created by `user`.
async fn seed_draft(pool: &PgPool, kind: DocKind, user: &str) -> DocumentHeader {
    DocumentRepo::create(
        pool,
        kind,
        &CreateDocument {
            created_by: user.to_string(),
        },
    )
    .await
    .expect("seed draft")
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_assigns_prefixed_business_id(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::PurchaseRequest, "alice").await;
    assert!(doc.business_id.starts_with("PR"));
    assert_eq!(doc.status_id, status::DRAFT);
    assert_eq!(doc.revision, 0);
    assert!(doc.current_approver.is_none());

    let other = seed_draft(&pool, DocKind::SalesInvoice, "alice").await;
    assert!(other.business_id.starts_with("SI"));
    assert_ne!(doc.business_id, other.business_id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_installs_first_approver(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::PurchaseRequest, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    let submitted = TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap()
        .expect("document exists");

    assert_eq!(submitted.status_id, status::SUBMITTED);
    assert_eq!(submitted.current_approver.as_deref(), Some("amara.osei"));
    assert_eq!(submitted.current_index, Some(0));
    assert!(submitted.wf_trans_id.is_some());
    assert_eq!(submitted.modified_by, "alice");

    let count = WfTransRepo::count_for_ref(&pool, &submitted.business_id, 1)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_missing_rec_id_returns_no_row(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let result = TransitionRepo::submit_by_id(&mut conn, 9999, "alice")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_twice_raises_invalid_state(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::PurchaseOrder, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap();

    let err = TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap_err();
    assert!(is_invalid_state(&err), "expected WF400, got {err}");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_approve_advances_chain_then_terminates(pool: PgPool) {
    // Purchase orders run a two-stage chain.
    let doc = seed_draft(&pool, DocKind::PurchaseOrder, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap();

    let first = TransitionRepo::approve_by_id(&mut conn, doc.rec_id, "amara.osei", "ok")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.status_id, status::SUBMITTED);
    assert_eq!(first.current_approver.as_deref(), Some("lena.fischer"));
    assert_eq!(first.current_index, Some(1));

    let last = TransitionRepo::approve_by_id(&mut conn, doc.rec_id, "lena.fischer", "")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(last.status_id, status::APPROVED);
    assert!(last.current_approver.is_none());
    assert_eq!(last.current_index, Some(2));
    assert!(last.wf_trans_id.is_none());

    // submit + approve + approve
    let count = WfTransRepo::count_for_ref(&pool, &last.business_id, 2)
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_approve_draft_raises_invalid_state(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::DeliveryOrder, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    let err = TransitionRepo::approve_by_id(&mut conn, doc.rec_id, "amara.osei", "")
        .await
        .unwrap_err();
    assert!(is_invalid_state(&err));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reject_records_notes_and_clears_approver(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::PurchaseRequest, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap();

    let rejected = TransitionRepo::reject_by_id(
        &mut conn,
        doc.rec_id,
        "amara.osei",
        "insufficient budget",
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(rejected.status_id, status::REJECTED);
    assert!(rejected.current_approver.is_none());
    assert!(rejected.current_index.is_none());

    let history = WfTransRepo::history(&pool, &rejected.business_id, 1)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action, "submit");
    assert_eq!(history[1].action, "reject");
    assert_eq!(history[1].notes, "insufficient budget");
    assert_eq!(history[1].user_id, "amara.osei");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_recall_round_trip_returns_to_draft(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::CustomerOrder, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap();

    let recalled = TransitionRepo::recall_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(recalled.status_id, status::DRAFT);
    assert!(recalled.current_approver.is_none());
    assert!(recalled.current_index.is_none());
    assert!(recalled.wf_trans_id.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_recall_after_first_approval_raises_invalid_state(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::PurchaseRequest, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap();
    TransitionRepo::approve_by_id(&mut conn, doc.rec_id, "amara.osei", "")
        .await
        .unwrap();

    let err = TransitionRepo::recall_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap_err();
    assert!(is_invalid_state(&err));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resubmit_after_reject_bumps_revision_for_pr_and_co(pool: PgPool) {
    let pr = seed_draft(&pool, DocKind::PurchaseRequest, "alice").await;
    let co = seed_draft(&pool, DocKind::CustomerOrder, "alice").await;
    let po = seed_draft(&pool, DocKind::PurchaseOrder, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    for doc in [&pr, &co, &po] {
        TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
            .await
            .unwrap();
        TransitionRepo::reject_by_id(&mut conn, doc.rec_id, "amara.osei", "redo")
            .await
            .unwrap();
    }

    // The revision-tracking kinds bump on resubmit.
    for doc in [&pr, &co] {
        let again = TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again.revision, 1, "{} should bump", again.business_id);
    }

    let po_again = TransitionRepo::submit_by_id(&mut conn, po.rec_id, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(po_again.revision, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_close_requires_full_approval(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::SalesInvoice, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap();

    // Still pending: close is illegal.
    let err = TransitionRepo::close_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap_err();
    assert!(is_invalid_state(&err));

    TransitionRepo::approve_by_id(&mut conn, doc.rec_id, "amara.osei", "")
        .await
        .unwrap();
    TransitionRepo::approve_by_id(&mut conn, doc.rec_id, "lena.fischer", "")
        .await
        .unwrap();

    let closed = TransitionRepo::close_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.status_id, status::CLOSED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_history_is_ordered_oldest_first(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::PurchaseOrder, "alice").await;

    let mut conn = pool.acquire().await.unwrap();
    TransitionRepo::submit_by_id(&mut conn, doc.rec_id, "alice")
        .await
        .unwrap();
    TransitionRepo::approve_by_id(&mut conn, doc.rec_id, "amara.osei", "looks fine")
        .await
        .unwrap();
    TransitionRepo::approve_by_id(&mut conn, doc.rec_id, "lena.fischer", "")
        .await
        .unwrap();

    let history = WfTransRepo::history(&pool, &doc.business_id, 2)
        .await
        .unwrap();
    let actions: Vec<&str> = history.iter().map(|t| t.action.as_str()).collect();
    assert_eq!(actions, ["submit", "approve", "approve"]);
    assert_matches!(history[1].notes.as_str(), "looks fine");
    assert!(history.windows(2).all(|w| w[0].action_date <= w[1].action_date));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_transition_rolls_back_with_enclosing_transaction(pool: PgPool) {
    let doc = seed_draft(&pool, DocKind::PurchaseRequest, "alice").await;

    {
        let mut tx = pool.begin().await.unwrap();
        let submitted = TransitionRepo::submit_by_id(&mut tx, doc.rec_id, "alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submitted.status_id, status::SUBMITTED);
        // Dropped without commit.
    }

    let reread = DocumentRepo::find_by_id(&pool, DocKind::PurchaseRequest, doc.rec_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reread.status_id, status::DRAFT);

    let count = WfTransRepo::count_for_ref(&pool, &doc.business_id, 1)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
