use chrono::Utc;

use super::common::*;
use crate::concierge::MessageSender;
use crate::fitting::confidence::FitLevel;
use crate::orders::service::OrderServiceError;
use crate::production::domain::{OrderStatus, ProductionStep};

#[test]
fn placing_an_order_snapshots_fit_and_standard_timeline() {
    let (service, _, notifications) = build_service();

    let record = service.place(order_request(), Utc::now()).expect("order placed");

    assert_eq!(record.fit.percentage, 100);
    assert_eq!(record.fit.level, FitLevel::High);
    assert_eq!(record.status, OrderStatus::Received);
    assert_eq!(record.stage, "Pattern Drafting");
    assert_eq!(record.timeline.steps().len(), 7);
    assert!(record.share_key.is_none());

    let events = notifications.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "order_received");
}

#[test]
fn sparse_measurements_place_with_low_confidence() {
    let (service, _, _) = build_service();

    let record = service
        .place(sparse_order_request(), Utc::now())
        .expect("partial form accepted");

    assert_eq!(record.fit.percentage, 20);
    assert_eq!(record.fit.level, FitLevel::Low);
}

#[test]
fn out_of_range_measurements_are_rejected() {
    let (service, _, _) = build_service();
    let mut request = order_request();
    request.measurements.hips = Some(20.0);

    let error = service
        .place(request, Utc::now())
        .expect_err("range violation rejected");
    assert!(matches!(error, OrderServiceError::InvalidMeasurements { .. }));
    assert!(error.to_string().contains("Hips"));
}

#[test]
fn toggling_a_step_cascades_and_promotes_status() {
    let (service, _, _) = build_service();
    let record = service.place(order_request(), Utc::now()).expect("order placed");

    let toggled = service
        .toggle_step(&record.id, ProductionStep::FabricCutting.label(), Utc::now())
        .expect("toggle applied");

    assert_eq!(toggled.timeline.completed_count(), 3);
    assert_eq!(toggled.status, OrderStatus::InProduction);
    assert_eq!(toggled.stage, "Sewing");

    let fetched = service.get(&record.id).expect("order persisted");
    assert_eq!(fetched.timeline.completed_count(), 3);
}

#[test]
fn toggling_an_unknown_label_persists_no_change() {
    let (service, _, _) = build_service();
    let record = service.place(order_request(), Utc::now()).expect("order placed");

    let toggled = service
        .toggle_step(&record.id, "Beading", Utc::now())
        .expect("no-op toggle");

    assert_eq!(toggled.timeline, record.timeline);
    assert_eq!(toggled.status, OrderStatus::Received);
}

#[test]
fn publishing_an_update_provisions_one_share_key() {
    let (service, _, notifications) = build_service();
    let record = service.place(order_request(), Utc::now()).expect("order placed");

    let first = service
        .record_progress_update(
            &record.id,
            crate::orders::domain::ProgressUpdateRequest {
                title: "Toile ready".to_string(),
                message: "Your toile is ready for the first fitting.".to_string(),
                step_label: Some(ProductionStep::ToileFitting.label().to_string()),
                publish: true,
            },
            Utc::now(),
        )
        .expect("update recorded");
    let share_key = first.share_key.clone().expect("share key provisioned");

    let second = service
        .record_progress_update(
            &record.id,
            crate::orders::domain::ProgressUpdateRequest {
                title: "Internal note".to_string(),
                message: "Fabric order confirmed.".to_string(),
                step_label: None,
                publish: false,
            },
            Utc::now(),
        )
        .expect("draft recorded");
    assert_eq!(second.share_key, Some(share_key.clone()));
    assert_eq!(second.updates.len(), 2);

    let published_events: Vec<_> = notifications
        .events()
        .into_iter()
        .filter(|event| event.template == "progress_published")
        .collect();
    assert_eq!(published_events.len(), 1);
    assert_eq!(
        published_events[0].details.get("share_key"),
        Some(&share_key.to_string())
    );
}

#[test]
fn shared_view_hides_drafts_and_contact_details() {
    let (service, _, _) = build_service();
    let record = service.place(order_request(), Utc::now()).expect("order placed");

    service
        .record_progress_update(
            &record.id,
            crate::orders::domain::ProgressUpdateRequest {
                title: "Draft".to_string(),
                message: "Not for the client yet.".to_string(),
                step_label: None,
                publish: false,
            },
            Utc::now(),
        )
        .expect("draft recorded");
    let published = service
        .record_progress_update(
            &record.id,
            crate::orders::domain::ProgressUpdateRequest {
                title: "Sewing underway".to_string(),
                message: "The gown entered the sewing room today.".to_string(),
                step_label: Some(ProductionStep::Sewing.label().to_string()),
                publish: true,
            },
            Utc::now(),
        )
        .expect("published");

    let share_key = published.share_key.expect("share key provisioned");
    let view = service.shared_view(&share_key.0).expect("shared view");

    assert_eq!(view.reference, record.id.0);
    assert_eq!(view.updates.len(), 1);
    assert_eq!(view.updates[0].title, "Sewing underway");

    let serialized = serde_json::to_string(&view).expect("serializes");
    assert!(!serialized.contains("elena@example.com"));
    assert!(!serialized.contains("Elena"));
}

#[test]
fn unknown_share_keys_are_not_found() {
    let (service, _, _) = build_service();
    let error = service.shared_view("not-a-key").expect_err("unknown key");
    assert!(matches!(
        error,
        OrderServiceError::Repository(crate::orders::repository::RepositoryError::NotFound)
    ));
}

#[test]
fn concierge_thread_appends_and_notifies_on_client_messages() {
    let (service, _, notifications) = build_service();
    let record = service.place(order_request(), Utc::now()).expect("order placed");

    service
        .post_message(
            &record.id,
            MessageSender::Client,
            "Could we raise the neckline slightly?".to_string(),
            Utc::now(),
        )
        .expect("client message");
    service
        .post_message(
            &record.id,
            MessageSender::Atelier,
            "Of course - noted for the toile fitting.".to_string(),
            Utc::now(),
        )
        .expect("atelier reply");

    let thread = service.messages(&record.id).expect("thread");
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].sender, MessageSender::Client);

    let pings: Vec<_> = notifications
        .events()
        .into_iter()
        .filter(|event| event.template == "concierge_message")
        .collect();
    assert_eq!(pings.len(), 1);
}

#[test]
fn empty_messages_are_rejected() {
    let (service, _, _) = build_service();
    let record = service.place(order_request(), Utc::now()).expect("order placed");

    let error = service
        .post_message(&record.id, MessageSender::Client, "   ".to_string(), Utc::now())
        .expect_err("blank message rejected");
    assert!(matches!(error, OrderServiceError::EmptyMessage));
}

#[test]
fn open_orders_excludes_completed_timelines() {
    let (service, _, _) = build_service();
    let active = service.place(order_request(), Utc::now()).expect("first order");
    let finished = service.place(order_request(), Utc::now()).expect("second order");

    service
        .toggle_step(
            &finished.id,
            ProductionStep::PackagingAndDispatch.label(),
            Utc::now(),
        )
        .expect("complete entire timeline");

    let open = service.open_orders(10).expect("open orders");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, active.id);
}

#[test]
fn admin_overwrite_replaces_production_state() {
    let (service, _, _) = build_service();
    let record = service.place(order_request(), Utc::now()).expect("order placed");

    let mut steps = record.timeline.steps().to_vec();
    for step in steps.iter_mut().take(5) {
        step.completed = true;
        step.completed_at = Some(Utc::now());
    }

    let updated = service
        .update_production(
            &record.id,
            crate::orders::domain::ProductionUpdate {
                timeline: steps,
                status: OrderStatus::QualityControl,
                stage: "Quality Check".to_string(),
                eta: chrono::NaiveDate::from_ymd_opt(2026, 5, 1),
            },
        )
        .expect("overwrite applied");

    assert_eq!(updated.status, OrderStatus::QualityControl);
    assert_eq!(updated.timeline.completed_count(), 5);
    assert_eq!(updated.eta, chrono::NaiveDate::from_ymd_opt(2026, 5, 1));
}
