use viewsync_rs::core::{ThresholdIntervalChooser, TimeWindow, ViewState, WindowMode};
use viewsync_rs::query::{QueryCodec, QueryMap, keys};

const FOUR_HOURS: i64 = 4 * 60 * 60 * 1000;
const NOW: i64 = 1_000_000_000_000;

fn codec() -> QueryCodec {
    QueryCodec::new("Web", "total-time", FOUR_HOURS).expect("codec")
}

fn rolling_state(last_millis: i64) -> ViewState {
    let chooser = ThresholdIntervalChooser::default();
    ViewState {
        transaction_type: "Web".to_owned(),
        transaction_name: None,
        sort_order: "total-time".to_owned(),
        window: TimeWindow::rolling(last_millis, NOW, &chooser).expect("rolling window"),
    }
}

fn absolute_state(from: i64, to: i64) -> ViewState {
    ViewState {
        transaction_type: "Web".to_owned(),
        transaction_name: None,
        sort_order: "total-time".to_owned(),
        window: TimeWindow::absolute(from, to).expect("absolute window"),
    }
}

#[test]
fn default_fields_are_omitted_from_the_encoded_query() {
    let state = rolling_state(FOUR_HOURS);

    let encoded = codec().encode(&state, QueryMap::new());

    assert!(!encoded.contains(keys::TRANSACTION_TYPE));
    assert!(!encoded.contains(keys::SORT_ORDER));
    assert!(!encoded.contains(keys::LAST));
    assert!(!encoded.contains(keys::FROM));
    assert!(!encoded.contains(keys::TO));
}

#[test]
fn transaction_name_is_always_written() {
    let mut state = rolling_state(FOUR_HOURS);

    let encoded = codec().encode(&state, QueryMap::new());
    assert_eq!(encoded.get(keys::TRANSACTION_NAME), Some(""));

    state.transaction_name = Some("/checkout".to_owned());
    let encoded = codec().encode(&state, QueryMap::new());
    assert_eq!(encoded.get(keys::TRANSACTION_NAME), Some("/checkout"));
}

#[test]
fn non_default_rolling_duration_replaces_stale_absolute_bounds() {
    let mut base = QueryMap::new();
    base.set_millis(keys::FROM, 100);
    base.set_millis(keys::TO, 200);

    let encoded = codec().encode(&rolling_state(60 * 60 * 1000), base);

    assert_eq!(encoded.millis(keys::LAST), 60 * 60 * 1000);
    assert!(!encoded.contains(keys::FROM));
    assert!(!encoded.contains(keys::TO));
}

#[test]
fn default_rolling_duration_clears_every_time_field() {
    let mut base = QueryMap::new();
    base.set_millis(keys::FROM, 100);
    base.set_millis(keys::TO, 200);
    base.set_millis(keys::LAST, 60_000);

    let encoded = codec().encode(&rolling_state(FOUR_HOURS), base);

    assert!(!encoded.contains(keys::LAST));
    assert!(!encoded.contains(keys::FROM));
    assert!(!encoded.contains(keys::TO));
}

#[test]
fn absolute_window_writes_bounds_and_clears_last() {
    let mut base = QueryMap::new();
    base.set_millis(keys::LAST, 60_000);

    let encoded = codec().encode(&absolute_state(100, 200), base);

    assert_eq!(encoded.millis(keys::FROM), 100);
    assert_eq!(encoded.millis(keys::TO), 200);
    assert!(!encoded.contains(keys::LAST));
}

#[test]
fn foreign_query_fields_pass_through_encoding() {
    let mut base = QueryMap::new();
    base.set("flame-graph", "on");

    let encoded = codec().encode(&absolute_state(100, 200), base);

    assert_eq!(encoded.get("flame-graph"), Some("on"));
}

#[test]
fn transaction_type_leads_the_encoded_query() {
    let mut state = absolute_state(100, 200);
    state.transaction_type = "Background".to_owned();

    let encoded = codec().encode(&state, QueryMap::new());

    let first = encoded.iter().next().map(|(key, _)| key);
    assert_eq!(first, Some(keys::TRANSACTION_TYPE));
}

#[test]
fn decode_fills_defaults_for_absent_and_empty_values() {
    let chooser = ThresholdIntervalChooser::default();
    let mut raw = QueryMap::new();
    raw.set(keys::TRANSACTION_NAME, "");
    raw.set(keys::SORT_ORDER, "");

    let state = codec().decode(&raw, NOW, &chooser).expect("decoded state");

    assert_eq!(state.transaction_type, "Web");
    assert_eq!(state.transaction_name, None);
    assert_eq!(state.sort_order, "total-time");
    assert_eq!(state.window.mode(), WindowMode::Rolling);
    assert_eq!(state.window.last_millis(), FOUR_HOURS);
}

#[test]
fn decode_coerces_malformed_time_fields_to_the_default_window() {
    let chooser = ThresholdIntervalChooser::default();
    let mut raw = QueryMap::new();
    raw.set(keys::FROM, "yesterday");
    raw.set(keys::TO, "1e9");
    raw.set(keys::LAST, "");

    let state = codec().decode(&raw, NOW, &chooser).expect("decoded state");

    assert_eq!(state.window.mode(), WindowMode::Rolling);
    assert_eq!(state.window.last_millis(), FOUR_HOURS);
}

#[test]
fn absolute_state_round_trips_exactly() {
    let chooser = ThresholdIntervalChooser::default();
    let mut state = absolute_state(999_000_000_000, 999_900_000_000);
    state.transaction_name = Some("/api/orders".to_owned());
    state.sort_order = "throughput".to_owned();

    let encoded = codec().encode(&state, QueryMap::new());
    let decoded = codec()
        .decode(&encoded, NOW, &chooser)
        .expect("decoded state");

    assert_eq!(decoded, state);
}

#[test]
fn rolling_state_round_trips_under_the_same_clock() {
    let chooser = ThresholdIntervalChooser::default();
    let state = rolling_state(30 * 60 * 1000);

    let encoded = codec().encode(&state, QueryMap::new());
    let decoded = codec()
        .decode(&encoded, NOW, &chooser)
        .expect("decoded state");

    assert_eq!(decoded, state);
}

#[test]
fn header_query_pins_the_default_rolling_duration() {
    let query = codec().header_query(&rolling_state(FOUR_HOURS), "Web");

    assert_eq!(query.millis(keys::LAST), FOUR_HOURS);
    assert!(!query.contains(keys::TRANSACTION_TYPE));
}

#[test]
fn header_query_for_absolute_windows_carries_bounds() {
    let query = codec().header_query(&absolute_state(100, 200), "Background");

    assert_eq!(query.get(keys::TRANSACTION_TYPE), Some("Background"));
    assert_eq!(query.millis(keys::FROM), 100);
    assert_eq!(query.millis(keys::TO), 200);
    assert!(!query.contains(keys::LAST));
}

#[test]
fn rejects_non_positive_default_window() {
    assert!(QueryCodec::new("Web", "total-time", 0).is_err());
}
