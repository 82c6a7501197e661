use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cellraster::bench::{RowScratch, ScanlineRasterizer};
use cellraster::config::hardware_concurrency;
use cellraster::math::vec3::Vec3;
use cellraster::{make_cuboid, Camera, Cell, Color, Engine, Image, Polygon, RenderConfig};

const IMAGE_WIDTH: usize = 160;
const IMAGE_HEIGHT: usize = 80;

fn camera() -> Camera {
    Camera::looking_at(Vec3::new(0.4, 0.6, -3.0), Vec3::ZERO)
}

/// A `n` x `n` grid of small cubes facing the camera.
fn cube_grid(n: usize) -> Vec<Polygon> {
    let step = 2.0 / n as f64;
    (0..n)
        .flat_map(|row| {
            (0..n).map(move |col| {
                let x = -1.0 + col as f64 * step;
                let y = -1.0 + row as f64 * step;
                let cell = Cell::glyph('#', Color::from_index(row + col));
                make_cuboid(Vec3::new(x, y, 0.0), Vec3::new(x + step * 0.8, y + step * 0.8, 0.3))
                    .with_texture(cell)
            })
        })
        .collect()
}

fn benchmark_single_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_row");

    let rasterizer = ScanlineRasterizer::default();
    let view = camera().view();

    for n in [1, 4, 16] {
        let scene = cube_grid(n);
        group.bench_with_input(BenchmarkId::new("cubes", n * n), &scene, |b, scene| {
            let mut image = Image::new(IMAGE_HEIGHT, IMAGE_WIDTH);
            let mut scratch = RowScratch::new();
            b.iter(|| {
                if let Some(mut row) = image.rows_mut().nth(IMAGE_HEIGHT / 2) {
                    rasterizer.render_row(&view, IMAGE_HEIGHT, black_box(scene), &mut row, &mut scratch);
                }
            });
        });
    }

    group.finish();
}

fn benchmark_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");

    let scene = cube_grid(8);
    let camera = camera();
    let mut workers = vec![1, 2];
    if hardware_concurrency() > 2 {
        workers.push(hardware_concurrency());
    }

    for threads in workers {
        let Ok(engine) = Engine::new(RenderConfig::default().with_workers(threads)) else {
            continue;
        };
        group.bench_function(BenchmarkId::new("workers", threads), |b| {
            let mut image = Image::new(IMAGE_HEIGHT, IMAGE_WIDTH);
            b.iter(|| {
                image.clear();
                engine.render_into(&mut image, black_box(&camera), black_box(&scene));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_row, benchmark_full_frame);
criterion_main!(benches);
