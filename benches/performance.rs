use criterion::{black_box, criterion_group, criterion_main, Criterion};

// The GPU painter needs a window, so only the engine parts are measured here

use chrono::NaiveTime;
use clock_app::clock::angles::hand_angles;
use clock_app::clock::element::{ClockElement, ElementMap};
use clock_app::clock::geometry::PivotSpec;
use clock_app::clock::render::{ClockLayout, ClockRenderer, HandPose, RedrawKind};
use clock_app::clock::transform::{rotate_hand, target_length, transform_hand, HandGeometry};
use image::{Rgba, RgbaImage};

fn hand_image() -> RgbaImage {
    RgbaImage::from_fn(24, 240, |x, _| {
        if (8..16).contains(&x) {
            Rgba([20, 20, 20, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn benchmark_angles(c: &mut Criterion) {
    c.bench_function("hand_angles_full_day", |b| {
        let times: Vec<NaiveTime> = (0..86_400)
            .step_by(37)
            .filter_map(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, 250_000_000))
            .collect();
        b.iter(|| {
            let mut sum = 0.0f32;
            for time in &times {
                sum += hand_angles(time, true).hour;
            }
            black_box(sum)
        })
    });
}

fn benchmark_geometry(c: &mut Criterion) {
    c.bench_function("hand_geometry_360", |b| {
        let length = target_length(ClockElement::Minute, 150.0, 1.0);
        b.iter(|| {
            for degree in 0..360 {
                black_box(HandGeometry::compute((24, 240), length, PivotSpec::ratio(0.5, 0.82), degree as f32));
            }
        })
    });
}

fn benchmark_rotate(c: &mut Criterion) {
    let source = hand_image();
    c.bench_function("rotate_second_hand", |b| {
        let length = target_length(ClockElement::Second, 150.0, 1.0);
        let geometry = HandGeometry::compute(source.dimensions(), length, PivotSpec::Bottom, 137.0);
        b.iter(|| black_box(rotate_hand(&source, &geometry)))
    });

    c.bench_function("transform_hour_hand", |b| {
        b.iter(|| {
            black_box(transform_hand(
                &source,
                target_length(ClockElement::Hour, 150.0, 1.0),
                PivotSpec::ratio(0.5, 0.82),
                black_box(215.5),
            ))
        })
    });
}

fn benchmark_hands_only_redraw(c: &mut Criterion) {
    let assets = ElementMap::from_fn(|element| match element {
        ClockElement::Face => Some(RgbaImage::from_pixel(300, 300, Rgba([240, 240, 240, 255]))),
        _ => Some(hand_image()),
    });
    let mut renderer = ClockRenderer::with_assets(assets);
    let layout = ClockLayout::new(300, 300);
    let mut poses = ElementMap::from_fn(|_| HandPose::default());
    renderer.redraw(RedrawKind::Full, layout, &poses);

    c.bench_function("hands_only_redraw", |b| {
        let mut second = 0.0f32;
        b.iter(|| {
            second = (second + 6.0) % 360.0;
            poses.get_mut(ClockElement::Second).angle = second;
            renderer.redraw(RedrawKind::HandsOnly, layout, &poses);
        })
    });
}

criterion_group!(
    benches,
    benchmark_angles,
    benchmark_geometry,
    benchmark_rotate,
    benchmark_hands_only_redraw
);
criterion_main!(benches);
