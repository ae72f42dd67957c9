use approx::assert_relative_eq;
use feedchart::api::{SubRange, ViewportConfig, ViewportStateMachine};
use feedchart::core::{AxisSide, DataPoint, FeedInfo, RangeBound, SeriesId, SeriesValue};
use feedchart::interaction::NavigationMode;

fn machine() -> ViewportStateMachine {
    let mut machine = ViewportStateMachine::new(ViewportConfig::default()).expect("machine init");
    machine.add_feed(FeedInfo::new(1u64, "mains", 0.0, 10_000.0), AxisSide::Left);
    machine.add_feed(FeedInfo::new(2u64, "temperature", 0.0, 10_000.0), AxisSide::Right);
    machine
}

fn row(date: f64, id: u64, value: f64) -> DataPoint {
    DataPoint::new(date).with_series(SeriesId::Numeric(id), SeriesValue::scalar(Some(value)))
}

#[test]
fn set_draft_selection_does_not_move_the_window() {
    let mut machine = machine();
    let before = machine.state().window_range();
    machine.set_draft_selection(300.0, 100.0);
    assert_eq!(machine.state().window_range(), before);
    assert_eq!(machine.state().selection.draft_start, 300.0);
    assert_eq!(machine.state().selection.draft_end, 100.0);
}

#[test]
fn window_zoom_normalizes_reversed_selection() {
    let mut machine = machine();
    machine.set_draft_selection(200.0, 100.0);
    machine.commit_reference_area_as_window_zoom();

    let state = machine.state();
    assert_eq!(state.window_start, 100.0);
    assert_eq!(state.window_duration, 100.0);
    // below the smallest preset: interval saturates to it
    assert_eq!(state.interval_seconds, 5.0);
    assert!(state.selection.is_cleared());
    assert!(!state.nav_capabilities.can_zoom_in);
    assert!(state.nav_capabilities.can_zoom_out);
}

#[test]
fn window_zoom_takes_interval_from_next_smaller_preset() {
    let mut machine = machine();
    machine.set_draft_selection(1_000.0, 44_200.0);
    machine.commit_reference_area_as_window_zoom();

    let state = machine.state();
    assert_eq!(state.window_start, 1_000.0);
    assert_eq!(state.window_duration, 43_200.0);
    assert_eq!(state.interval_seconds, 30.0);
    assert_eq!(machine.active_preset().label, "6h");
    assert!(state.nav_capabilities.can_zoom_in);
    assert!(state.nav_capabilities.can_zoom_out);
}

#[test]
fn degenerate_commit_is_a_no_op_that_clears_the_draft() {
    let mut machine = machine();
    let before = machine.state().window_range();

    machine.set_draft_selection(500.0, 500.0);
    machine.commit_reference_area_as_window_zoom();
    assert_eq!(machine.state().window_range(), before);
    assert!(machine.state().selection.is_cleared());

    machine.set_draft_selection(500.0, 0.0);
    machine.commit_reference_area_as_window_zoom();
    assert_eq!(machine.state().window_range(), before);
    assert!(machine.state().selection.is_cleared());

    machine.set_draft_selection(700.0, 700.0);
    machine.commit_reference_area_as_sub_range_zoom(&[row(700.0, 1, 1.0)]);
    assert!(!machine.state().is_sub_range_zoomed);
    assert_eq!(machine.mode(), NavigationMode::Window);
    assert!(machine.state().selection.is_cleared());
}

#[test]
fn sub_range_zoom_ranges_each_axis_side() {
    let mut machine = machine();
    let points = vec![
        row(10.0, 1, 5.0),
        row(20.0, 1, 15.0),
        row(30.0, 1, 5.0),
        row(40.0, 1, 20.0),
        row(10.0, 2, -10.0),
        row(40.0, 2, 10.0),
        row(500.0, 1, 1_000.0),
    ];
    let window_before = machine.state().window_range();

    machine.set_draft_selection(45.0, 5.0);
    machine.commit_reference_area_as_sub_range_zoom(&points);

    let state = machine.state();
    assert_eq!(state.window_range(), window_before);
    assert_eq!(state.sub_range, SubRange::new(5.0, 45.0));
    assert!(state.is_sub_range_zoomed);
    assert!(state.selection.is_cleared());
    assert_eq!(machine.mode(), NavigationMode::SubRange);

    let domain = state.axis_domain;
    assert_relative_eq!(domain.top_left.value().expect("top left"), 20.75);
    assert_relative_eq!(domain.bottom_left.value().expect("bottom left"), 4.25);
    assert_relative_eq!(domain.top_right.value().expect("top right"), 11.0);
    assert_relative_eq!(domain.bottom_right.value().expect("bottom right"), -11.0);
}

#[test]
fn sub_range_zoom_keeps_previous_domain_for_empty_side() {
    let mut machine = machine();
    machine.set_draft_selection(0.0, 50.0);
    machine.commit_reference_area_as_sub_range_zoom(&[row(10.0, 1, 1.0), row(20.0, 2, 3.0)]);
    let right_before = machine.state().axis_domain.top_right;
    assert!(matches!(right_before, RangeBound::At(_)));

    machine.set_draft_selection(100.0, 200.0);
    machine.commit_reference_area_as_sub_range_zoom(&[row(150.0, 1, 8.0)]);
    assert_eq!(machine.state().axis_domain.top_right, right_before);
    assert_relative_eq!(
        machine.state().axis_domain.top_left.value().expect("top left"),
        8.5
    );
}

#[test]
fn commits_while_idle_only_clear_the_draft() {
    let mut machine = ViewportStateMachine::new(ViewportConfig::default()).expect("machine init");
    let idle = machine.state().clone();

    machine.set_draft_selection(10.0, 20.0);
    machine.commit_reference_area_as_sub_range_zoom(&[]);
    assert_eq!(machine.mode(), NavigationMode::Window);
    assert_eq!(machine.state(), &idle);

    machine.set_draft_selection(200.0, 100.0);
    machine.commit_reference_area_as_window_zoom();
    assert_eq!(machine.state(), &idle);

    machine.add_feed(FeedInfo::new(1u64, "mains", 1_000.0, 1_000_000.0), AxisSide::Left);
    assert_eq!(machine.state().window_start, 1_000.0);
    assert!(!machine.state().is_sub_range_zoomed);

    machine.zoom_in();
    assert_eq!(machine.state().window_duration, 43_200.0);
}
