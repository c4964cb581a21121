use criterion::{black_box, criterion_group, criterion_main, Criterion};
use traffic_canvas::{
    config::TrafficConfig,
    graphics::{PixelCanvas, TrafficRenderer, HudStats},
    simulation::{SurfaceSize, TrafficManager, TrafficSimulation},
    RoadLayout,
};

fn benchmark_traffic_update(c: &mut Criterion) {
    let config = TrafficConfig::enhanced();
    let mut state = TrafficManager::new(config.clone(), Some(42)).populate(SurfaceSize::new(1200, 600));
    let mut simulation = TrafficSimulation::new(config, Some(43));

    c.bench_function("traffic_update", |b| {
        b.iter(|| {
            simulation.update(black_box(&mut state));
        })
    });
}

/// The proximity check compares every pair, so cost grows with the square
/// of the fleet size.
fn benchmark_update_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_scaling");

    for vehicle_count in [8u32, 32, 128].iter() {
        let config = TrafficConfig {
            vehicle_count: *vehicle_count,
            ..TrafficConfig::enhanced()
        };
        let mut state = TrafficManager::new(config.clone(), Some(42)).populate(SurfaceSize::new(1920, 1080));
        let mut simulation = TrafficSimulation::new(config, Some(43));

        group.bench_with_input(
            format!("{}_vehicles", vehicle_count),
            vehicle_count,
            |b, _vehicle_count| {
                b.iter(|| {
                    simulation.update(black_box(&mut state));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_software_render(c: &mut Criterion) {
    let size = SurfaceSize::new(1200, 600);
    let config = TrafficConfig::enhanced();
    let state = TrafficManager::new(config, Some(42)).populate(size);
    let renderer = TrafficRenderer::new(RoadLayout::enhanced());
    let mut canvas = PixelCanvas::new(size);

    c.bench_function("pixel_canvas_frame", |b| {
        b.iter(|| {
            renderer.render(black_box(&state), &mut canvas, &HudStats { fps: 60.0 });
        })
    });
}

criterion_group!(
    benches,
    benchmark_traffic_update,
    benchmark_update_scaling,
    benchmark_software_render
);
criterion_main!(benches);
