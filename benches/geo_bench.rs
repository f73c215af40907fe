use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rayon::prelude::*;

use geostream::circle::GeoCircle;
use geostream::geojson::GeoJson;
use geostream::graticule::Graticule;
use geostream::measure::{area, bounds};
use geostream::path::GeoPath;
use geostream::proj::{Mercator, ProjectionKind, RawProjection};

fn make_circles(n: usize) -> Vec<GeoJson> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            GeoCircle::new([-180.0 + 360.0 * t, -60.0 + 120.0 * t], 5.0 + 20.0 * t).polygon()
        })
        .collect()
}

fn bench_raw_throughput(c: &mut Criterion) {
    // Points/sec for the bare Mercator formula
    let n = 1_000_000_usize;
    let fill = |coords: &mut Vec<(f64, f64)>| {
        for (i, c) in coords.iter_mut().enumerate() {
            let t = i as f64 / n as f64;
            *c = (-3.0 + 6.0 * t, -1.2 + 2.4 * t);
        }
    };
    let mut coords = vec![(0.0, 0.0); n];

    c.bench_function("raw_mercator_forward_1M", |b| {
        b.iter(|| {
            fill(&mut coords);
            Mercator.forward_batch(&mut coords);
            black_box(&coords);
        });
    });

    c.bench_function("raw_mercator_roundtrip_1M", |b| {
        b.iter(|| {
            fill(&mut coords);
            Mercator.forward_batch(&mut coords);
            Mercator.inverse_batch(&mut coords).unwrap();
            black_box(&coords);
        });
    });
}

fn bench_graticule_svg(c: &mut Criterion) {
    let graticule = Graticule::default().multi_line();
    for kind in [
        ProjectionKind::Equirectangular,
        ProjectionKind::Mercator,
        ProjectionKind::Orthographic,
        ProjectionKind::Stereographic,
    ] {
        let path = GeoPath::new(Some(kind.projection()));
        c.bench_function(&format!("graticule_svg_{kind}"), |b| {
            b.iter(|| black_box(path.svg(&graticule)));
        });
    }
}

fn bench_clip_sphere(c: &mut Criterion) {
    let mut projection = ProjectionKind::Orthographic.projection();
    projection.set_rotate(&[-30.0, -45.0]);
    let path = GeoPath::new(Some(projection));
    c.bench_function("orthographic_sphere_area", |b| {
        b.iter(|| black_box(path.area(&GeoJson::Sphere)));
    });
}

fn bench_spherical_measures(c: &mut Criterion) {
    let circles = GeoJson::FeatureCollection {
        features: make_circles(1000).into_iter().map(GeoJson::feature).collect(),
    };
    c.bench_function("area_1000_circles", |b| {
        b.iter(|| black_box(area(&circles)));
    });
    c.bench_function("bounds_1000_circles", |b| {
        b.iter(|| black_box(bounds(&circles)));
    });
}

fn bench_render_thread_scaling(c: &mut Criterion) {
    // Render 10k polygons independently with different thread counts
    let circles = make_circles(10_000);
    let path = GeoPath::new(Some(ProjectionKind::Orthographic.projection()));

    for &threads in &[1, 2, 4, 8] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();

        c.bench_function(&format!("render_threads_{threads}_10k_circles"), |b| {
            b.iter(|| {
                black_box(pool.install(|| {
                    circles
                        .par_iter()
                        .map(|circle| path.svg(circle).len())
                        .sum::<usize>()
                }))
            });
        });
    }
}

criterion_group!(
    benches,
    bench_raw_throughput,
    bench_graticule_svg,
    bench_clip_sphere,
    bench_spherical_measures,
    bench_render_thread_scaling
);
criterion_main!(benches);
