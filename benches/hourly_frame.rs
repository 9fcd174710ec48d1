use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meteo_archive::{HourlyData, HourlyFrame, HourlyVariable, HOURLY_VARIABLES};

// 2000-01-01 to 2024-07-01, the range the command line program downloads
const START: i64 = 946_684_800;
const END: i64 = 1_719_792_000;
const INTERVAL: i64 = 3600;

fn synthetic_hourly() -> HourlyData {
    let steps = ((END - START) / INTERVAL) as usize;
    HourlyData {
        time: START,
        time_end: END,
        interval: INTERVAL,
        variables: HOURLY_VARIABLES
            .iter()
            .map(|name| HourlyVariable {
                name: name.to_string(),
                values: (0..steps).map(|i| Some(i as f64 * 0.1)).collect(),
            })
            .collect(),
    }
}

fn bench_hourly_frame(c: &mut Criterion) {
    let hourly = synthetic_hourly();
    let variables: Vec<String> = HOURLY_VARIABLES.iter().map(|v| v.to_string()).collect();
    c.bench_function("hourly_frame_from_hourly", |b| {
        b.iter(|| HourlyFrame::from_hourly(black_box(&hourly), black_box(&variables)))
    });
}

criterion_group!(benches, bench_hourly_frame);
criterion_main!(benches);
