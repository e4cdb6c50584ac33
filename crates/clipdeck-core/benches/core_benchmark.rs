//! Benchmark tests for clipdeck-core operations
//!
//! Run with: cargo bench -p clipdeck-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use clipdeck_core::overlay::{format_time, render_plan};
use clipdeck_core::{
    Dimensions, HeadlessDecoder, HeadlessScreen, MediaFormat, PlayerCallbacks, PlayerConfig,
    PlayerEvent, SourceDescriptor, VideoPlayer,
};

// ============================================================================
// Helpers
// ============================================================================

fn loaded_player(duration: f64) -> VideoPlayer<HeadlessDecoder, HeadlessScreen> {
    let mut player = VideoPlayer::mount(
        PlayerConfig::default(),
        SourceDescriptor::remote("https://cdn.example.com/stream/master.m3u8").unwrap(),
        HeadlessDecoder::new(),
        HeadlessScreen::default(),
        PlayerCallbacks::default(),
    )
    .unwrap();
    player.on_loaded(duration);
    player
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    group.bench_function("progress_tick", |b| {
        let mut player = loaded_player(3600.0);
        let log = player.decoder().log();
        let mut t = 0.0;
        b.iter(|| {
            t = (t + 0.25) % 3600.0;
            player
                .dispatch(black_box(PlayerEvent::Progress { time: t }))
                .unwrap();
        });
        log.drain();
    });

    for position in [0.0_f64, 1800.0, 1e9] {
        group.bench_with_input(BenchmarkId::new("seek", position), &position, |b, &p| {
            let mut player = loaded_player(3600.0);
            let log = player.decoder().log();
            b.iter(|| {
                black_box(player.seek(black_box(p)));
                log.drain();
            });
        });
    }

    group.bench_function("overlay_taps", |b| {
        let mut player = loaded_player(600.0);
        b.iter(|| {
            player.dispatch(PlayerEvent::ToggleSpeedMenu).unwrap();
            player.dispatch(PlayerEvent::TapOverlay).unwrap();
            player.dispatch(PlayerEvent::TapOverlay).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Render Plan Benchmarks
// ============================================================================

fn bench_render_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_plan");
    let player = loaded_player(5400.0);
    let config = PlayerConfig::default();

    for (name, dims) in [
        ("phone", Dimensions::new(390.0, 844.0)),
        ("tablet", Dimensions::new(1280.0, 800.0)),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                render_plan(
                    black_box(player.playback()),
                    black_box(player.ui()),
                    false,
                    &config,
                    dims,
                )
            });
        });
    }

    group.bench_function("offline", |b| {
        b.iter(|| {
            render_plan(
                player.playback(),
                player.ui(),
                black_box(true),
                &config,
                Dimensions::default(),
            )
        });
    });

    group.finish();
}

// ============================================================================
// Helper Benchmarks
// ============================================================================

fn bench_helpers(c: &mut Criterion) {
    c.bench_function("format_time", |b| {
        b.iter(|| format_time(black_box(5399.7)));
    });

    c.bench_function("detect_format", |b| {
        b.iter(|| MediaFormat::detect(black_box("https://cdn.example.com/a/b/manifest.mpd?sig=abc")));
    });

    c.bench_function("parse_config", |b| {
        let json = PlayerConfig::default().to_json();
        b.iter(|| PlayerConfig::from_json(black_box(&json)).unwrap());
    });
}

criterion_group!(dispatch_benches, bench_dispatch);
criterion_group!(render_benches, bench_render_plan);
criterion_group!(helper_benches, bench_helpers);

criterion_main!(dispatch_benches, render_benches, helper_benches);
