//! Terminal demo: a spinning textured cuboid over a checkered floor.
//!
//! Controls: `y`/`u`/`i` orbit the camera about the X/Y/Z axis, `q` or Esc
//! quits. An optional image path argument textures the cuboid with that image.

use std::f64::consts::FRAC_PI_6;
use std::time::{Duration, Instant};

use cellraster::prelude::*;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

const TARGET_FRAME_TIME: Duration = Duration::from_millis(1000 / 30);
/// Terminal cells are about twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;
const ORBIT_STEP: f64 = FRAC_PI_6;

fn cuboid_texture(image_path: Option<&str>) -> Result<Texture> {
    let placement = Placement {
        width: 0.5,
        height: 0.5,
        ..Placement::default()
    };
    let mapping = match image_path {
        Some(path) => PlaneMapping::from_image(path, placement)?,
        None => PlaneMapping::from_glyphs(
            &["/\\/\\", "\\/\\/", "####"],
            Color::Yellow,
            Color::Blue,
            placement,
        )?,
    };
    Ok(Texture::plane_mapped(mapping))
}

fn floor() -> Polygon {
    let checker = |p: Vec3| {
        let tile = ((p.x * 2.0).floor() + (p.z * 2.0).floor()) as i64;
        if tile.rem_euclid(2) == 0 {
            Cell::glyph('.', Color::Green)
        } else {
            Cell::glyph(':', Color::Cyan)
        }
    };
    make_cuboid(Vec3::new(-2.0, -1.05, -2.0), Vec3::new(2.0, -1.0, 2.0))
        .with_texture(Texture::custom(checker))
}

/// What the key loop asks the frame loop to do.
enum Action {
    Quit,
    Orbit(Mat4),
    Idle,
}

fn poll_action() -> Result<Action> {
    while event::poll(Duration::ZERO)? {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        else {
            continue;
        };
        return Ok(match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('y') => Action::Orbit(Mat4::rotate_x(ORBIT_STEP)),
            KeyCode::Char('u') => Action::Orbit(Mat4::rotate_y(ORBIT_STEP)),
            KeyCode::Char('i') => Action::Orbit(Mat4::rotate_z(ORBIT_STEP)),
            _ => Action::Idle,
        });
    }
    Ok(Action::Idle)
}

fn run(image_path: Option<&str>) -> Result<()> {
    let engine = Engine::new(RenderConfig::default())?;
    let cuboid = make_cuboid(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5))
        .with_texture(cuboid_texture(image_path)?);
    let floor = floor();

    let mut screen = Screen::new(TerminalDisplay::open()?)?;
    let (height, width) = fit_aspect(screen.height(), screen.width(), CELL_ASPECT);
    let mut camera = Camera::looking_at(Vec3::new(0.0, 0.8, -3.0), Vec3::ZERO);
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();

        match poll_action()? {
            Action::Quit => return Ok(()),
            Action::Orbit(rotation) => camera = camera.apply_transform(&rotation),
            Action::Idle => {}
        }

        let t = started.elapsed().as_secs_f64();
        let spin = Mat4::rotate_y(t * 0.7) * Mat4::rotate_x(t * 0.4);
        let scene = [cuboid.apply_transform(&spin), floor.clone()];

        let image = engine.render(&camera, &scene, height, width);
        screen.draw(&image).render()?;

        let elapsed = frame_start.elapsed();
        if elapsed < TARGET_FRAME_TIME {
            std::thread::sleep(TARGET_FRAME_TIME - elapsed);
        }
    }
}

fn main() {
    let image_path = std::env::args().nth(1);
    if let Err(err) = run(image_path.as_deref()) {
        eprintln!("cellraster: {err}");
        std::process::exit(1);
    }
}
