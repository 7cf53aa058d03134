//! Decorative backdrop: drifting particles and spinning film reels.
//!
//! A small 3D scene (a cloud of particles and a handful of torus "reels")
//! is projected through a slowly orbiting perspective camera onto a braille
//! [`Canvas`]. It holds no application data and runs regardless of which
//! view is shown.

use std::f64::consts::PI;
use std::time::Duration;

use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Points},
    },
};

use crate::tui::Theme;

/// A visual effect with its own frame loop.
pub trait Decoration {
    /// Starts (or resumes) the animation.
    fn start(&mut self);
    /// Stops the animation. Further ticks leave the scene unchanged.
    fn stop(&mut self);
    /// Returns true while the animation is running.
    fn is_running(&self) -> bool;
    /// Adapts the projection to a new drawing area.
    fn on_resize(&mut self, area: Rect);
    /// Advances the scene by `dt`.
    fn tick(&mut self, dt: Duration);
    /// Draws the current frame.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

const PARTICLE_COUNT: usize = 1000;
const PARTICLE_SPREAD: f64 = 100.0;
const REEL_COUNT: usize = 5;
const REEL_SPREAD: f64 = 50.0;
const REEL_RADIUS: f64 = 5.0;
const REEL_TUBE: f64 = 2.0;
const REEL_SEGMENTS: usize = 32;
const REEL_TUBE_SEGMENTS: usize = 8;
const CAMERA_DISTANCE: f64 = 30.0;
const FIELD_OF_VIEW_DEG: f64 = 75.0;
const NEAR_PLANE: f64 = 0.1;
/// Particle hues are spread over this many colour buckets.
const HUE_BUCKETS: usize = 4;

type Vec3 = [f64; 3];

#[derive(Debug, Clone)]
struct Reel {
    position: Vec3,
    rotation: Vec3,
    /// Spin rate in radians per second, applied to x and y.
    spin: f64,
    /// Phase offset of the vertical bob.
    phase: f64,
}

/// Particle cloud and film reels seen through an orbiting camera.
#[derive(Debug, Clone)]
pub struct Backdrop {
    particles: Vec<Vec3>,
    /// Colour bucket of each particle.
    buckets: Vec<usize>,
    palette: [Color; HUE_BUCKETS],
    reels: Vec<Reel>,
    reel_color: Color,
    /// Local points of one reel, shared by all reels.
    reel_mesh: Vec<Vec3>,
    /// Animation clock in seconds.
    time: f64,
    /// Width over height of the drawing area, in braille dots.
    aspect: f64,
    running: bool,
}

impl Backdrop {
    /// Builds a scene with random placement.
    pub fn new<R: Rng>(rng: &mut R, theme: &Theme) -> Self {
        let half = PARTICLE_SPREAD / 2.0;
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                [
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                ]
            })
            .collect();
        let buckets = (0..PARTICLE_COUNT)
            .map(|_| rng.gen_range(0..HUE_BUCKETS))
            .collect();

        let half = REEL_SPREAD / 2.0;
        let reels = (0..REEL_COUNT)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)] // i < REEL_COUNT
                let index = (i + 1) as f64;
                Reel {
                    position: [
                        rng.gen_range(-half..half),
                        rng.gen_range(-half..half),
                        rng.gen_range(-half..half),
                    ],
                    rotation: [
                        rng.gen_range(0.0..PI),
                        rng.gen_range(0.0..PI),
                        rng.gen_range(0.0..PI),
                    ],
                    spin: (0.01 + index * 0.001) * 60.0,
                    phase: index,
                }
            })
            .collect();

        Self {
            particles,
            buckets,
            palette: particle_palette(),
            reels,
            reel_color: theme.reel,
            reel_mesh: torus_mesh(),
            time: 0.0,
            aspect: 1.0,
            running: false,
        }
    }

    /// Current animation clock, in seconds.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Width over height used by the projection.
    #[must_use]
    pub const fn aspect(&self) -> f64 {
        self.aspect
    }

    fn camera(&self) -> Camera {
        let position = [
            (self.time * 0.2).sin() * 5.0,
            (self.time * 0.15).cos() * 3.0,
            CAMERA_DISTANCE,
        ];
        Camera::looking_at_origin(position, self.aspect)
    }

    /// Projects the particle cloud, grouped by colour bucket.
    fn particle_points(&self, camera: &Camera) -> [Vec<(f64, f64)>; HUE_BUCKETS] {
        let mut groups: [Vec<(f64, f64)>; HUE_BUCKETS] = Default::default();
        let (ax, ay) = (self.time * 0.05, self.time * 0.1);
        for (point, bucket) in self.particles.iter().zip(&self.buckets) {
            let world = rotate_xyz(*point, [ax, ay, 0.0]);
            if let Some(screen) = camera.project(world) {
                groups[*bucket].push(screen);
            }
        }
        groups
    }

    /// Projects the reel wireframes.
    fn reel_points(&self, camera: &Camera) -> Vec<(f64, f64)> {
        let mut points = Vec::with_capacity(self.reels.len() * self.reel_mesh.len());
        for reel in &self.reels {
            let angle = reel.spin * self.time;
            let rotation = [reel.rotation[0] + angle, reel.rotation[1] + angle, reel.rotation[2]];
            let offset = [
                reel.position[0],
                (self.time + reel.phase).sin() * 2.0,
                reel.position[2],
            ];
            for local in &self.reel_mesh {
                let world = add(rotate_xyz(*local, rotation), offset);
                if let Some(screen) = camera.project(world) {
                    points.push(screen);
                }
            }
        }
        points
    }
}

impl Decoration for Backdrop {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn on_resize(&mut self, area: Rect) {
        if area.height == 0 {
            return;
        }
        // A braille cell is 2 dots wide and 4 dots tall, and dots are roughly square.
        self.aspect = f64::from(area.width) * 2.0 / (f64::from(area.height) * 4.0);
    }

    fn tick(&mut self, dt: Duration) {
        if self.running {
            self.time += dt.as_secs_f64();
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let camera = self.camera();
        let particles = self.particle_points(&camera);
        let reels = self.reel_points(&camera);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0])
            .paint(|ctx| {
                for (coords, color) in particles.iter().zip(self.palette) {
                    ctx.draw(&Points {
                        coords: coords.as_slice(),
                        color,
                    });
                }
                ctx.draw(&Points {
                    coords: reels.as_slice(),
                    color: self.reel_color,
                });
            })
            .render(area, buf);
    }
}

/// Perspective camera aimed at the origin.
struct Camera {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    /// `1 / tan(fov / 2)`.
    focal: f64,
    aspect: f64,
}

impl Camera {
    fn looking_at_origin(position: Vec3, aspect: f64) -> Self {
        let forward = normalize(scale(position, -1.0));
        let right = normalize(cross(forward, [0.0, 1.0, 0.0]));
        let up = cross(right, forward);
        Self {
            position,
            right,
            up,
            forward,
            focal: 1.0 / (FIELD_OF_VIEW_DEG.to_radians() / 2.0).tan(),
            aspect,
        }
    }

    /// Maps a world point to canvas coordinates in `[-1, 1]`, or `None` when
    /// it is behind the camera or off screen.
    fn project(&self, point: Vec3) -> Option<(f64, f64)> {
        let rel = sub(point, self.position);
        let depth = dot(rel, self.forward);
        if depth < NEAR_PLANE {
            return None;
        }
        let x = dot(rel, self.right) * self.focal / (depth * self.aspect);
        let y = dot(rel, self.up) * self.focal / depth;
        ((-1.0..=1.0).contains(&x) && (-1.0..=1.0).contains(&y)).then_some((x, y))
    }
}

/// Vertices of a torus wireframe centred on the origin.
fn torus_mesh() -> Vec<Vec3> {
    let mut mesh = Vec::with_capacity(REEL_SEGMENTS * REEL_TUBE_SEGMENTS);
    for i in 0..REEL_SEGMENTS {
        #[allow(clippy::cast_precision_loss)] // small segment counts
        let u = i as f64 / REEL_SEGMENTS as f64 * 2.0 * PI;
        for j in 0..REEL_TUBE_SEGMENTS {
            #[allow(clippy::cast_precision_loss)]
            let v = j as f64 / REEL_TUBE_SEGMENTS as f64 * 2.0 * PI;
            let ring = REEL_RADIUS + REEL_TUBE * v.cos();
            mesh.push([ring * u.cos(), ring * u.sin(), REEL_TUBE * v.sin()]);
        }
    }
    mesh
}

/// Purple to red hues at full saturation, one per bucket.
fn particle_palette() -> [Color; HUE_BUCKETS] {
    let mut palette = [Color::Reset; HUE_BUCKETS];
    for (i, slot) in palette.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let hue = 0.8 + 0.2 * (i as f64 + 0.5) / HUE_BUCKETS as f64;
        *slot = hsl_to_rgb(hue, 1.0, 0.5);
    }
    palette
}

/// Converts HSL (all components in `[0, 1]`) to an RGB colour.
#[allow(clippy::many_single_char_names)]
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = (h.rem_euclid(1.0)) * 6.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let (r, g, b) = match h6 {
        h if h < 1.0 => (c, x, 0.0),
        h if h < 2.0 => (x, c, 0.0),
        h if h < 3.0 => (0.0, c, x),
        h if h < 4.0 => (0.0, x, c),
        h if h < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=255
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}

/// Rotates about z, then y, then x, matching an XYZ Euler rotation matrix.
fn rotate_xyz(p: Vec3, angles: Vec3) -> Vec3 {
    let [ax, ay, az] = angles;
    let (sz, cz) = az.sin_cos();
    let p = [p[0] * cz - p[1] * sz, p[0] * sz + p[1] * cz, p[2]];
    let (sy, cy) = ay.sin_cos();
    let p = [p[0] * cy + p[2] * sy, p[1], -p[0] * sy + p[2] * cy];
    let (sx, cx) = ax.sin_cos();
    [p[0], p[1] * cx - p[2] * sx, p[1] * sx + p[2] * cx]
}

fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(a: Vec3, k: f64) -> Vec3 {
    [a[0] * k, a[1] * k, a[2] * k]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(a: Vec3) -> Vec3 {
    let len = dot(a, a).sqrt();
    if len == 0.0 { a } else { scale(a, 1.0 / len) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn backdrop() -> Backdrop {
        Backdrop::new(&mut StdRng::seed_from_u64(42), &Theme::default())
    }

    #[test]
    fn clock_only_moves_while_running() {
        let mut b = backdrop();
        b.tick(Duration::from_millis(500));
        assert!(b.time().abs() < f64::EPSILON);

        b.start();
        b.tick(Duration::from_millis(500));
        assert!((b.time() - 0.5).abs() < 1e-9);

        b.stop();
        assert!(!b.is_running());
        b.tick(Duration::from_secs(3));
        assert!((b.time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn resize_tracks_dot_aspect() {
        let mut b = backdrop();
        b.on_resize(Rect::new(0, 0, 80, 20));
        assert!((b.aspect() - 2.0).abs() < 1e-9);
        b.on_resize(Rect::new(0, 0, 80, 0));
        assert!((b.aspect() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn origin_projects_to_center() {
        let camera = Camera::looking_at_origin([0.0, 0.0, CAMERA_DISTANCE], 1.0);
        let (x, y) = camera.project([0.0, 0.0, 0.0]).unwrap();
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let camera = Camera::looking_at_origin([0.0, 0.0, CAMERA_DISTANCE], 1.0);
        assert!(camera.project([0.0, 0.0, 40.0]).is_none());
    }

    #[test]
    fn right_of_origin_projects_right() {
        let camera = Camera::looking_at_origin([0.0, 0.0, CAMERA_DISTANCE], 1.0);
        let (x, _) = camera.project([5.0, 0.0, 0.0]).unwrap();
        assert!(x > 0.0);
        let (_, y) = camera.project([0.0, 5.0, 0.0]).unwrap();
        assert!(y > 0.0);
    }

    #[test]
    fn torus_vertices_lie_on_surface() {
        for [x, y, z] in torus_mesh() {
            let ring = (x * x + y * y).sqrt() - REEL_RADIUS;
            let tube = (ring * ring + z * z).sqrt();
            assert!((tube - REEL_TUBE).abs() < 1e-9);
        }
    }

    #[test]
    fn palette_is_purple_to_red() {
        for color in particle_palette() {
            let Color::Rgb(r, _, _) = color else {
                panic!("expected rgb");
            };
            assert!(r > 100);
        }
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn renders_some_dots() {
        let mut b = backdrop();
        let area = Rect::new(0, 0, 60, 20);
        b.on_resize(area);
        let mut buf = Buffer::empty(area);
        Decoration::render(&b, area, &mut buf);
        let drawn = buf.content().iter().filter(|c| c.symbol() != " ").count();
        assert!(drawn > 0);
    }

    #[test]
    fn tiny_area_is_skipped() {
        let b = backdrop();
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        Decoration::render(&b, area, &mut buf);
        assert_eq!(buf.content()[0].symbol(), " ");
    }
}
