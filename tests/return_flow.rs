use std::sync::atomic::Ordering;
use std::sync::Arc;
use uuid::Uuid;
use zibal_gateway::config::{GatewayConfig, GatewayMode};
use zibal_gateway::domain::order::Order;
use zibal_gateway::domain::payment::{PaymentRecord, PaymentState, ReturnOutcome};
use zibal_gateway::error::PaymentError;
use zibal_gateway::gateway::mock::MockGatewayClient;
use zibal_gateway::repo::memory::InMemoryPayments;
use zibal_gateway::service::return_handler::{ReturnHandler, ReturnParams, TrackIdLocks};

#[tokio::test]
async fn paid_callback_verifies_and_records_exactly_one_payment() {
    let gateway = Arc::new(MockGatewayClient::succeeding("abc", 500_000, "R1"));
    let payments = InMemoryPayments::default();
    let handler = handler(gateway.clone(), payments.clone());

    let outcome = handler
        .handle_return(&order(1, 50_000, "IRR"), &paid("abc"), Some("10.0.0.1"))
        .await
        .unwrap();

    let record = match outcome {
        ReturnOutcome::VerifiedSuccess { record } => record,
        other => panic!("expected success, got {other:?}"),
    };
    assert_eq!(record.remote_state, "abc");
    assert_eq!(record.remote_id, "R1");
    assert_eq!(record.state, PaymentState::Completed);
    assert_eq!(record.order_id, 1);
    assert!(record.test);

    let stored = payments.records();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].remote_state, "abc");
    assert_eq!(gateway.verify_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn known_track_id_is_rejected_before_any_verify_call() {
    let gateway = Arc::new(MockGatewayClient::succeeding("abc", 500_000, "R1"));
    let payments = InMemoryPayments::default();
    payments.seed(completed_record("abc"));
    let handler = handler(gateway.clone(), payments.clone());

    let outcome = handler
        .handle_return(&order(1, 50_000, "IRR"), &paid("abc"), Some("10.0.0.1"))
        .await
        .unwrap();

    assert!(matches!(outcome, ReturnOutcome::DuplicateRejected));
    assert_eq!(gateway.verify_calls.load(Ordering::SeqCst), 0);
    assert_eq!(payments.records().len(), 1);
}

#[tokio::test]
async fn replayed_callback_does_not_create_a_second_record() {
    let gateway = Arc::new(MockGatewayClient::succeeding("abc", 500_000, "R1"));
    let payments = InMemoryPayments::default();
    let handler = handler(gateway.clone(), payments.clone());
    let order = order(1, 50_000, "IRR");

    let first = handler.handle_return(&order, &paid("abc"), None).await.unwrap();
    let second = handler.handle_return(&order, &paid("abc"), None).await.unwrap();

    assert!(matches!(first, ReturnOutcome::VerifiedSuccess { .. }));
    assert!(matches!(second, ReturnOutcome::DuplicateRejected));
    assert_eq!(payments.records().len(), 1);
    assert_eq!(gateway.verify_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_paid_statuses_short_circuit_before_verify() {
    let gateway = Arc::new(MockGatewayClient::succeeding("abc", 500_000, "R1"));
    let payments = InMemoryPayments::default();
    let handler = handler(gateway.clone(), payments.clone());

    for status in ["-1", "-2", "1", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "weird", ""] {
        let params = ReturnParams {
            track_id: Some(format!("t-{status}")),
            status: Some(status.to_string()),
            success: None,
        };
        let outcome = handler
            .handle_return(&order(1, 50_000, "IRR"), &params, None)
            .await
            .unwrap();
        match outcome {
            ReturnOutcome::UserCanceled { status: got, .. } => assert_eq!(got, status),
            other => panic!("status {status:?} produced {other:?}"),
        }
    }

    assert_eq!(gateway.verify_calls.load(Ordering::SeqCst), 0);
    assert!(payments.records().is_empty());
}

#[tokio::test]
async fn canceled_status_carries_the_mapped_message() {
    let gateway = Arc::new(MockGatewayClient::succeeding("abc", 500_000, "R1"));
    let handler = handler(gateway, InMemoryPayments::default());

    let params = ReturnParams {
        track_id: Some("abc".to_string()),
        status: Some("3".to_string()),
        success: None,
    };
    let outcome = handler
        .handle_return(&order(1, 50_000, "IRR"), &params, None)
        .await
        .unwrap();

    match outcome {
        ReturnOutcome::UserCanceled { message, .. } => {
            assert_eq!(message, "لغوشده توسط کاربر");
        }
        other => panic!("expected cancellation, got {other:?}"),
    }
}

#[tokio::test]
async fn accepted_verify_with_wrong_amount_is_not_recorded() {
    let gateway = Arc::new(MockGatewayClient::succeeding("abc", 999_999, "R1"));
    let payments = InMemoryPayments::default();
    let handler = handler(gateway, payments.clone());

    let outcome = handler
        .handle_return(&order(1, 50_000, "IRR"), &paid("abc"), None)
        .await
        .unwrap();

    match outcome {
        ReturnOutcome::AmountMismatch { expected, reported } => {
            assert_eq!(expected, 500_000);
            assert_eq!(reported, Some(999_999));
        }
        other => panic!("expected mismatch, got {other:?}"),
    }
    assert!(payments.records().is_empty());
}

#[tokio::test]
async fn verify_rejection_maps_the_result_code() {
    let mut mock = MockGatewayClient::succeeding("abc", 500_000, "R1");
    mock.verify_result = 202;
    let payments = InMemoryPayments::default();
    let handler = handler(Arc::new(mock), payments.clone());

    let outcome = handler
        .handle_return(&order(1, 50_000, "IRR"), &paid("abc"), None)
        .await
        .unwrap();

    match outcome {
        ReturnOutcome::VerifiedFailed { code, message } => {
            assert_eq!(code, 202);
            assert_eq!(message, "سفارش پرداخت نشده یا ناموفق بوده است");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(payments.records().is_empty());
}

#[tokio::test]
async fn missing_track_id_fails_without_touching_the_gateway() {
    let gateway = Arc::new(MockGatewayClient::succeeding("abc", 500_000, "R1"));
    let handler = handler(gateway.clone(), InMemoryPayments::default());

    let params = ReturnParams {
        track_id: None,
        status: Some("2".to_string()),
        success: None,
    };
    let outcome = handler
        .handle_return(&order(1, 50_000, "IRR"), &params, None)
        .await
        .unwrap();

    match outcome {
        ReturnOutcome::VerifiedFailed { code, .. } => assert_eq!(code, 203),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(gateway.verify_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn gateway_outage_is_ambiguous_not_an_outcome() {
    let gateway = Arc::new(MockGatewayClient::unreachable());
    let payments = InMemoryPayments::default();
    let handler = handler(gateway, payments.clone());

    let err = handler
        .handle_return(&order(1, 50_000, "IRR"), &paid("abc"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentError::Network(_)));
    assert!(payments.records().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_replays_credit_exactly_once() {
    let gateway = Arc::new(MockGatewayClient::succeeding("abc", 500_000, "R1"));
    let payments = InMemoryPayments::default();
    let handler = Arc::new(handler(gateway.clone(), payments.clone()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let handler = handler.clone();
        handles.push(tokio::spawn(async move {
            handler
                .handle_return(&order(1, 50_000, "IRR"), &paid("abc"), None)
                .await
        }));
    }

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            ReturnOutcome::VerifiedSuccess { .. } => successes += 1,
            ReturnOutcome::DuplicateRejected => duplicates += 1,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(payments.records().len(), 1);
    assert_eq!(gateway.verify_calls.load(Ordering::SeqCst), 1);
}

fn handler(gateway: Arc<MockGatewayClient>, payments: InMemoryPayments) -> ReturnHandler {
    ReturnHandler {
        config: GatewayConfig {
            mode: GatewayMode::Test,
            merchant_code: String::new(),
        },
        gateway,
        payments: Arc::new(payments),
        locks: TrackIdLocks::default(),
    }
}

fn order(order_id: i64, total_minor: i64, currency_code: &str) -> Order {
    Order {
        order_id,
        total_minor,
        currency_code: currency_code.to_string(),
        store_label: "Main store".to_string(),
    }
}

fn paid(track_id: &str) -> ReturnParams {
    ReturnParams {
        track_id: Some(track_id.to_string()),
        status: Some("2".to_string()),
        success: Some("1".to_string()),
    }
}

fn completed_record(track_id: &str) -> PaymentRecord {
    PaymentRecord {
        payment_id: Uuid::new_v4(),
        order_id: 1,
        state: PaymentState::Completed,
        amount_minor: 50_000,
        currency_code: "IRR".to_string(),
        test: true,
        remote_id: "R0".to_string(),
        remote_state: track_id.to_string(),
        authorized_at: chrono::Utc::now(),
    }
}
