use stockchart_view::core::{
    BarDirection, Granularity, PeriodRecord, ReferenceLevels, date_key_to_unix_seconds,
};
use stockchart_view::surface::{DrawingSurface, MockFactory};
use stockchart_view::view::{ChartView, ChartViewConfig, CrosshairEvent};

fn record(date_key: &str, open: f64, close: f64, volume: u64) -> PeriodRecord {
    let high = open.max(close) + 10.0;
    let low = open.min(close) - 10.0;
    PeriodRecord::new(date_key, open, high, low, close, volume)
        .expect("valid record")
        .with_averages(Some(1_020.0), None, None, None)
}

fn mounted_view(prev_close: Option<f64>) -> (ChartView<MockFactory>, MockFactory) {
    let records = vec![
        record("20240102", 1_000.0, 1_010.0, 1_500),
        record("20240103", 1_010.0, 1_030.0, 2_500),
        record("20240104", 1_030.0, 1_050.0, 12_345),
    ];
    let factory = MockFactory::new();
    let probe = factory.clone();
    let mut view = ChartView::new(factory);
    let config = ChartViewConfig::new(records, Granularity::Daily, 600).with_reference_levels(
        ReferenceLevels {
            prev_close,
            session_high: None,
            session_low: None,
        },
    );
    view.mount(config).expect("mount");
    (view, probe)
}

#[test]
fn unresolvable_event_hides_tooltip_and_guide() {
    let (mut view, _probe) = mounted_view(None);
    let ts = date_key_to_unix_seconds("20240103").expect("timestamp");

    view.crosshair_moved(CrosshairEvent::at(ts, 200.0, 100.0));
    assert!(view.tooltip().is_visible());
    assert!(view.hover_guide().is_visible());

    view.crosshair_moved(CrosshairEvent::leave());
    assert!(!view.tooltip().is_visible());
    assert!(!view.hover_guide().is_visible());
}

#[test]
fn hover_guide_lands_on_the_sample_coordinate() {
    let (mut view, probe) = mounted_view(None);
    let ts = date_key_to_unix_seconds("20240103").expect("timestamp");

    view.crosshair_moved(CrosshairEvent::at(ts, 200.0, 100.0));

    let surface = probe.last_surface().expect("surface");
    let expected = surface.time_to_coordinate(ts).expect("coordinate");
    let actual = view.hover_guide().x().expect("guide position");
    assert!((actual - expected).abs() <= 1e-9);
}

#[test]
fn gap_timestamp_hides_tooltip_but_keeps_the_guide() {
    let (mut view, _probe) = mounted_view(None);
    // Halfway between two samples: projectable, but no candle exists there.
    let ts = date_key_to_unix_seconds("20240103").expect("timestamp") + 43_200;

    view.crosshair_moved(CrosshairEvent::at(ts, 200.0, 100.0));

    assert!(!view.tooltip().is_visible());
    assert!(view.hover_guide().is_visible());
}

#[test]
fn tooltip_content_carries_all_display_fields() {
    let (mut view, _probe) = mounted_view(Some(1_000.0));
    let ts = date_key_to_unix_seconds("20240104").expect("timestamp");

    view.crosshair_moved(CrosshairEvent::at(ts, 200.0, 100.0));

    let content = view.tooltip().content().expect("content").clone();
    assert_eq!(content.date_label, "2024.01.04");
    assert_eq!(content.close_label, "1,050");
    assert_eq!(content.direction, BarDirection::Up);
    assert_eq!(content.open_label, "1,030");
    assert_eq!(content.volume_label, "12,345");
    assert_eq!(content.trend_labels[0], "1,020");
    assert_eq!(content.trend_labels[1], "-");

    let change = content.change.expect("change row");
    assert_eq!(change.label, "+50 (5.00%)");
    assert_eq!(change.direction, BarDirection::Up);
}

#[test]
fn missing_previous_close_omits_the_change_row() {
    let (mut view, _probe) = mounted_view(None);
    let ts = date_key_to_unix_seconds("20240104").expect("timestamp");

    view.crosshair_moved(CrosshairEvent::at(ts, 200.0, 100.0));
    assert!(view.tooltip().content().expect("content").change.is_none());
}

#[test]
fn zero_previous_close_shows_percentage_as_unavailable() {
    let (mut view, _probe) = mounted_view(Some(0.0));
    let ts = date_key_to_unix_seconds("20240104").expect("timestamp");

    view.crosshair_moved(CrosshairEvent::at(ts, 200.0, 100.0));
    let content = view.tooltip().content().expect("content");
    assert_eq!(content.change.as_ref().expect("change row").label, "+1,050 (-%)");
}

#[test]
fn panel_repositions_only_on_the_next_frame() {
    let (mut view, _probe) = mounted_view(Some(1_000.0));
    let ts = date_key_to_unix_seconds("20240103").expect("timestamp");

    view.crosshair_moved(CrosshairEvent::at(ts, 40.0, 60.0));
    assert_eq!(view.tooltip().position(), (0.0, 0.0));
    assert!(view.has_pending_frame_work());

    view.run_frame();
    let (left, top) = view.tooltip().position();
    assert!((left - 52.0).abs() <= 1e-9);
    assert!((top - 72.0).abs() <= 1e-9);
}

#[test]
fn panel_is_clamped_inside_the_plotted_area() {
    let (mut view, _probe) = mounted_view(Some(1_000.0));
    let ts = date_key_to_unix_seconds("20240103").expect("timestamp");

    view.crosshair_moved(CrosshairEvent::at(ts, 595.0, 345.0));
    view.run_frame();

    let (panel_width, panel_height) = view.tooltip().size();
    let (left, top) = view.tooltip().position();
    assert!((left - (600.0 - panel_width)).abs() <= 1e-9);
    assert!((top - (350.0 - panel_height)).abs() <= 1e-9);
    assert!(left >= 0.0 && top >= 0.0);
}

#[test]
fn newer_pointer_position_supersedes_a_pending_one() {
    let (mut view, _probe) = mounted_view(Some(1_000.0));
    let ts = date_key_to_unix_seconds("20240103").expect("timestamp");

    view.crosshair_moved(CrosshairEvent::at(ts, 40.0, 60.0));
    view.crosshair_moved(CrosshairEvent::at(ts, 100.0, 120.0));
    view.run_frame();

    let (left, top) = view.tooltip().position();
    assert!((left - 112.0).abs() <= 1e-9);
    assert!((top - 132.0).abs() <= 1e-9);
}
