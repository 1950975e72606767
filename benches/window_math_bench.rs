use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use viewsync_rs::core::{ThresholdIntervalChooser, TimeWindow, ViewState};
use viewsync_rs::query::{QueryCodec, QueryMap};

const FOUR_HOURS: i64 = 4 * 60 * 60 * 1000;
const NOW: i64 = 1_000_000_000_000;

fn bench_rolling_window(c: &mut Criterion) {
    let chooser = ThresholdIntervalChooser::default();

    c.bench_function("rolling_window_four_hours", |b| {
        b.iter(|| {
            TimeWindow::rolling(black_box(FOUR_HOURS), black_box(NOW), &chooser)
                .expect("rolling window")
        })
    });
}

fn bench_codec_round_trip(c: &mut Criterion) {
    let chooser = ThresholdIntervalChooser::default();
    let codec = QueryCodec::new("Web", "total-time", FOUR_HOURS).expect("codec");
    let state = ViewState {
        transaction_type: "Background".to_owned(),
        transaction_name: Some("/api/orders".to_owned()),
        sort_order: "throughput".to_owned(),
        window: TimeWindow::rolling(60 * 60 * 1000, NOW, &chooser).expect("rolling window"),
    };

    c.bench_function("codec_encode_decode_round_trip", |b| {
        b.iter(|| {
            let encoded = codec.encode(black_box(&state), QueryMap::new());
            codec
                .decode(black_box(&encoded), NOW, &chooser)
                .expect("decoded state")
        })
    });
}

criterion_group!(benches, bench_rolling_window, bench_codec_round_trip);
criterion_main!(benches);
