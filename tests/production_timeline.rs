use atelier_portal::production::{ProductionStep, ProductionTimeline, TimelineStep};
use chrono::{DateTime, TimeZone, Utc};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn three_step_timeline() -> ProductionTimeline {
    ProductionTimeline::from_steps(vec![
        TimelineStep {
            label: "Pattern Drafting".to_string(),
            completed: false,
            completed_at: None,
        },
        TimelineStep {
            label: "Sewing".to_string(),
            completed: false,
            completed_at: None,
        },
        TimelineStep {
            label: "Quality Check".to_string(),
            completed: false,
            completed_at: None,
        },
    ])
}

#[test]
fn completing_the_last_step_completes_the_whole_timeline() {
    let timeline = three_step_timeline().toggle_step("Quality Check", at(1, 9));

    assert!(timeline.is_complete());
    assert!(timeline
        .steps()
        .iter()
        .all(|step| step.completed_at == Some(at(1, 9))));
}

#[test]
fn uncompleting_a_middle_step_clears_it_and_everything_after() {
    let completed = three_step_timeline().toggle_step("Quality Check", at(1, 9));
    let rolled_back = completed.toggle_step("Sewing", at(2, 10));

    let steps = rolled_back.steps();
    assert!(steps[0].completed);
    assert_eq!(steps[0].completed_at, Some(at(1, 9)));
    assert!(!steps[1].completed && steps[1].completed_at.is_none());
    assert!(!steps[2].completed && steps[2].completed_at.is_none());
}

#[test]
fn uncompleting_the_first_step_resets_every_following_step() {
    let completed = ProductionTimeline::standard()
        .toggle_step(ProductionStep::PackagingAndDispatch.label(), at(1, 9));
    let reset = completed.toggle_step(ProductionStep::PatternDrafting.label(), at(2, 9));

    assert_eq!(reset.completed_count(), 0);
    assert!(reset.steps().iter().all(|step| step.completed_at.is_none()));
}

#[test]
fn unknown_labels_return_an_equal_timeline() {
    let timeline = three_step_timeline().toggle_step("Sewing", at(1, 9));
    let toggled = timeline.toggle_step("Nonexistent", at(2, 9));
    assert_eq!(timeline, toggled);
}

#[test]
fn completing_a_later_step_keeps_earlier_timestamps() {
    let timeline = three_step_timeline().toggle_step("Pattern Drafting", at(1, 9));
    let original = timeline.steps()[0].completed_at;

    let advanced = timeline.toggle_step("Quality Check", at(5, 16));

    assert_eq!(advanced.steps()[0].completed_at, original);
    assert_eq!(advanced.steps()[1].completed_at, Some(at(5, 16)));
    assert_eq!(advanced.steps()[2].completed_at, Some(at(5, 16)));
}

#[test]
fn double_toggle_returns_to_the_starting_shape() {
    let timeline = three_step_timeline();
    let twice = timeline
        .toggle_step("Sewing", at(1, 9))
        .toggle_step("Sewing", at(1, 10));

    // Completion state matches; the earlier implied step keeps its stamp.
    assert!(!twice.steps()[1].completed);
    assert!(twice.steps()[1].completed_at.is_none());
    assert!(twice.steps()[0].completed);
}

#[test]
fn toggle_produces_a_new_timeline_without_touching_the_input() {
    let timeline = three_step_timeline();
    let before = timeline.clone();

    let toggled = timeline.toggle_step("Sewing", at(1, 9));

    assert_eq!(timeline, before);
    assert_ne!(toggled, timeline);
}

#[test]
fn standard_timeline_follows_the_canonical_catalog_order() {
    let timeline = ProductionTimeline::standard();
    let labels: Vec<&str> = timeline.steps().iter().map(|step| step.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Pattern Drafting",
            "Toile Fitting",
            "Fabric Cutting",
            "Sewing",
            "Hand Embellishment",
            "Quality Check",
            "Packaging & Dispatch",
        ]
    );
}
