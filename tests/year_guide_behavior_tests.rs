use stockchart_view::core::{Granularity, PeriodRecord, date_key_to_unix_seconds};
use stockchart_view::surface::{DrawingSurface, MockFactory};
use stockchart_view::view::{ChartView, ChartViewConfig, year_boundaries};

fn record(date_key: &str) -> PeriodRecord {
    PeriodRecord::new(date_key, 100.0, 102.0, 99.0, 101.0, 700).expect("valid record")
}

fn spanning_records() -> Vec<PeriodRecord> {
    vec![record("20231230"), record("20231231"), record("20240102")]
}

fn mounted_view(
    records: Vec<PeriodRecord>,
    granularity: Granularity,
) -> (ChartView<MockFactory>, MockFactory) {
    let factory = MockFactory::new();
    let probe = factory.clone();
    let mut view = ChartView::new(factory);
    view.mount(ChartViewConfig::new(records, granularity, 600))
        .expect("mount");
    (view, probe)
}

#[test]
fn marks_appear_at_the_first_record_and_each_year_change() {
    let (mut view, probe) = mounted_view(spanning_records(), Granularity::Daily);

    // Mount schedules the initial pass; it runs on the next frame.
    assert!(view.year_guides().marks().is_empty());
    view.run_frame();

    let marks = view.year_guides().marks();
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].label, "2023");
    assert_eq!(marks[1].label, "2024");

    let surface = probe.last_surface().expect("surface");
    let first = date_key_to_unix_seconds("20231230").expect("timestamp");
    let third = date_key_to_unix_seconds("20240102").expect("timestamp");
    assert!((marks[0].x - surface.time_to_coordinate(first).expect("x")).abs() <= 1e-9);
    assert!((marks[1].x - surface.time_to_coordinate(third).expect("x")).abs() <= 1e-9);
    assert!(marks[1].label_x() > marks[1].x);

    assert_eq!(view.year_guides().size(), (600.0, 350.0));
}

#[test]
fn yearly_granularity_skips_the_overlay_entirely() {
    let (mut view, _probe) = mounted_view(spanning_records(), Granularity::Yearly);
    view.run_frame();
    assert!(view.year_guides().marks().is_empty());
}

#[test]
fn empty_dataset_draws_no_marks() {
    let (mut view, _probe) = mounted_view(Vec::new(), Granularity::Daily);
    view.run_frame();
    assert!(view.year_guides().marks().is_empty());
}

#[test]
fn unprojectable_marks_are_dropped() {
    let (mut view, probe) = mounted_view(spanning_records(), Granularity::Daily);
    let mut surface = probe.last_surface().expect("surface");

    // Pan so the 2023 records sit left of the viewport.
    surface.set_visible_logical_range(1.5, 4.0);
    view.visible_range_changed();
    view.run_frame();

    let marks = view.year_guides().marks();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].label, "2024");
}

#[test]
fn range_changes_within_one_frame_coalesce_into_a_single_recompute() {
    let (mut view, probe) = mounted_view(spanning_records(), Granularity::Daily);
    let surface = probe.last_surface().expect("surface");
    view.run_frame();
    let after_mount = surface.time_to_coordinate_calls();

    view.visible_range_changed();
    view.visible_range_changed();
    view.visible_range_changed();
    view.run_frame();

    // One recompute resolves each candidate boundary exactly once.
    let candidates = year_boundaries(view.config().expect("config").records.as_slice()).len();
    assert_eq!(
        surface.time_to_coordinate_calls() - after_mount,
        candidates
    );

    // Nothing left pending afterwards.
    let settled = surface.time_to_coordinate_calls();
    view.run_frame();
    assert_eq!(surface.time_to_coordinate_calls(), settled);
}

#[test]
fn resize_updates_surface_width_and_reruns_the_overlay() {
    let (mut view, probe) = mounted_view(spanning_records(), Granularity::Daily);
    view.run_frame();

    view.resize(800).expect("resize");
    assert!(view.has_pending_frame_work());
    view.run_frame();

    let surface = probe.last_surface().expect("surface");
    assert_eq!(surface.width(), 800);
    assert_eq!(view.year_guides().size(), (800.0, 350.0));
}

#[test]
fn disposal_cancels_a_pending_recompute() {
    let (mut view, probe) = mounted_view(spanning_records(), Granularity::Daily);
    let surface = probe.last_surface().expect("surface");
    view.run_frame();
    let settled = surface.time_to_coordinate_calls();

    view.visible_range_changed();
    assert!(view.has_pending_frame_work());
    view.dispose();
    view.run_frame();

    assert_eq!(surface.time_to_coordinate_calls(), settled);
    assert_eq!(surface.calls_after_destroy(), 0);
    assert!(view.year_guides().marks().is_empty());
    assert!(!view.has_pending_frame_work());
}
