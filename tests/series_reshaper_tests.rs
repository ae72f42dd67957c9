use feedchart::core::{
    AxisSide, ParsedSamples, Sample, SeriesDescriptor, SeriesFrame, SeriesId, SeriesValue,
    domain_for, empty_placeholder, merge, parse_samples_json, reshape, reshape_all,
    reshape_tuples,
};
use serde_json::json;

fn descriptor(id: u64, side: AxisSide) -> SeriesDescriptor {
    SeriesDescriptor::new(id, format!("feed {id}"), side)
}

#[test]
fn scalar_tuple_becomes_plain_value() {
    let reshaped = reshape_tuples(descriptor(7, AxisSide::Left), &[vec![Some(100.0), Some(42.0)]]);
    assert_eq!(reshaped.points.len(), 1);
    let point = &reshaped.points[0];
    assert_eq!(point.date, 100.0);
    assert_eq!(point.value(&SeriesId::Numeric(7)), Some(42.0));
    assert_eq!(point.range(&SeriesId::Numeric(7)), None);
}

#[test]
fn banded_tuple_takes_third_field_as_value() {
    let reshaped = reshape_tuples(
        descriptor(7, AxisSide::Left),
        &[vec![Some(100.0), Some(10.0), Some(42.0), Some(50.0)]],
    );
    let point = &reshaped.points[0];
    assert_eq!(point.date, 100.0);
    assert_eq!(point.value(&SeriesId::Numeric(7)), Some(42.0));
    assert_eq!(point.range(&SeriesId::Numeric(7)), Some([10.0, 50.0]));
}

#[test]
fn malformed_tuples_are_dropped_and_counted() {
    let reshaped = reshape_tuples(
        descriptor(3, AxisSide::Left),
        &[
            vec![Some(1.0)],
            vec![Some(2.0), Some(5.0)],
            vec![Some(3.0), Some(1.0), Some(2.0)],
            vec![None, Some(9.0)],
        ],
    );
    assert_eq!(reshaped.points.len(), 1);
    assert_eq!(reshaped.skipped, 3);
}

#[test]
fn null_value_differs_from_absent_series() {
    let reshaped = reshape(
        descriptor(3, AxisSide::Left),
        &ParsedSamples::from_samples(vec![Sample::scalar(10.0, None)]),
    );
    let point = &reshaped.points[0];
    assert!(point.contains(&SeriesId::Numeric(3)));
    assert_eq!(point.series[&SeriesId::Numeric(3)], SeriesValue::scalar(None));
    assert!(!point.contains(&SeriesId::Numeric(4)));
}

#[test]
fn merge_orders_left_before_right_without_dedup() {
    let r1 = reshape_tuples(
        descriptor(10, AxisSide::Right),
        &[vec![Some(100.0), Some(1.0)], vec![Some(200.0), Some(2.0)]],
    );
    let l1 = reshape_tuples(
        descriptor(20, AxisSide::Left),
        &[vec![Some(100.0), Some(3.0)], vec![Some(200.0), Some(4.0)]],
    );
    let l2 = reshape_tuples(descriptor(30, AxisSide::Left), &[vec![Some(100.0), Some(5.0)]]);

    let frame = merge(vec![r1, l1, l2]);
    let ids: Vec<_> = frame.feeds.iter().map(|d| d.id.clone()).collect();
    assert_eq!(
        ids,
        vec![SeriesId::Numeric(20), SeriesId::Numeric(30), SeriesId::Numeric(10)]
    );

    let dates: Vec<f64> = frame.data.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![100.0, 200.0, 100.0, 100.0, 200.0]);
    assert_eq!(frame.data[2].value(&SeriesId::Numeric(30)), Some(5.0));
    assert_eq!(frame.data[3].value(&SeriesId::Numeric(10)), Some(1.0));
}

#[test]
fn placeholder_synthesizes_null_grid() {
    let frame = empty_placeholder(1_000.0, 86_400.0, 120.0);
    assert_eq!(frame.data.len(), 720);
    assert_eq!(frame.data[0].date, 1_000.0);
    assert_eq!(frame.data[719].date, 1_000.0 + 719.0 * 120.0);
    assert_eq!(frame.feeds.len(), 1);
    assert_eq!(frame.feeds[0].id, SeriesId::Numeric(0));
    assert_eq!(frame.feeds[0].display_name, "null");
    assert_eq!(frame.feeds[0].axis_side, AxisSide::Left);
    assert!(frame.data.iter().all(|p| {
        p.contains(&SeriesId::Numeric(0)) && p.value(&SeriesId::Numeric(0)).is_none()
    }));

    assert_eq!(empty_placeholder(0.0, 100.0, 30.0).data.len(), 4);
}

#[test]
fn json_payload_reshapes_end_to_end() {
    let parsed =
        parse_samples_json(&json!([[100, 10, 42, 50], [160, null, null, null], [220]]))
            .expect("array payload");
    let reshaped = reshape(descriptor(5, AxisSide::Right), &parsed);
    assert_eq!(reshaped.points.len(), 2);
    assert_eq!(reshaped.skipped, 1);
    assert_eq!(reshaped.points[1].value(&SeriesId::Numeric(5)), None);
    assert_eq!(reshaped.points[1].range(&SeriesId::Numeric(5)), None);
}

#[test]
fn reshape_all_preserves_input_order() {
    let inputs = (0..16u64)
        .map(|id| {
            (
                descriptor(id, AxisSide::Left),
                ParsedSamples::from_samples(vec![Sample::scalar(id as f64, Some(id as f64))]),
            )
        })
        .collect();
    let results = reshape_all(inputs);
    assert!(
        results
            .iter()
            .enumerate()
            .all(|(index, result)| result.descriptor.id == SeriesId::Numeric(index as u64))
    );
}

#[test]
fn named_series_ids_key_rows() {
    let reshaped = reshape_tuples(
        SeriesDescriptor::new("solar", "Solar PV", AxisSide::Left),
        &[vec![Some(1.0), Some(2.5)]],
    );
    assert_eq!(reshaped.points[0].value(&SeriesId::from("solar")), Some(2.5));
    assert_eq!(SeriesId::from("solar").to_string(), "solar");
    assert_eq!(SeriesId::Numeric(7).to_string(), "7");
}

#[test]
fn merged_frame_survives_json_round_trip() {
    let frame = merge(vec![reshape_tuples(
        descriptor(7, AxisSide::Left),
        &[vec![Some(100.0), Some(42.0)], vec![Some(160.0), Some(40.0)]],
    )]);
    let id = SeriesId::Numeric(7);
    let before = domain_for(&frame.data, 0.0, 200.0, &id);
    assert_eq!(before, Some((40.0, 42.0)));

    let json = serde_json::to_string(&frame).expect("serialize frame");
    let restored: SeriesFrame = serde_json::from_str(&json).expect("deserialize frame");
    assert_eq!(restored, frame);
    assert_eq!(domain_for(&restored.data, 0.0, 200.0, &restored.feeds[0].id), before);
}
