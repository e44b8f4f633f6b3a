use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stardrift::surface::CIRCLE_SEGMENTS;
use stardrift::viewport::logical_point;
use stardrift::{
    CommandList, LoopState, Motion, Palette, Particle, ParticleField, PointerTracker,
    RenderLoop, ShapeBatch, Startup, Surface, Viewport,
};
use std::cell::Cell;

fn start(surface: &mut dyn Surface, startup: Startup, seed: u64) -> (RenderLoop, PointerTracker) {
    let pointer = PointerTracker::centered(surface.viewport());
    let mut rng = StdRng::seed_from_u64(seed);
    let render_loop = RenderLoop::start(startup, &Palette::default(), surface, &pointer, &mut rng);
    (render_loop, pointer)
}

const DESKTOP: Startup = Startup {
    reduced_motion: false,
    logical_width: 1440.0,
};

// ==================================================================================
// Field bounds
// ==================================================================================

#[test]
fn particles_stay_within_one_radius_of_the_viewport() {
    let mut surface = CommandList::new(Viewport::new(900, 600));
    let (mut render_loop, mut pointer) = start(&mut surface, DESKTOP, 11);
    let noop = || {};

    for step in 0..2000u32 {
        let t = step as f32 * 0.01;
        pointer.on_move(Vec2::new(450.0 + 300.0 * t.cos(), 300.0 + 200.0 * t.sin()), Vec2::ZERO);
        assert!(render_loop.frame(&mut surface, &pointer, &noop));

        for p in render_loop.field().unwrap().particles() {
            let r = p.radius;
            assert!(p.position.x >= -r && p.position.x <= 900.0 + r, "{:?}", p);
            assert!(p.position.y >= -r && p.position.y <= 600.0 + r, "{:?}", p);
        }
    }
}

#[test]
fn shrinking_the_surface_wraps_without_reseeding() {
    let mut surface = CommandList::new(Viewport::new(1600, 1000));
    let (mut render_loop, pointer) = start(&mut surface, DESKTOP, 5);
    let noop = || {};
    render_loop.run_for(3, &mut surface, &pointer, &noop);

    surface.resize(Viewport::new(200, 150));
    render_loop.run_for(1, &mut surface, &pointer, &noop);

    let field = render_loop.field().unwrap();
    assert_eq!(field.particles().len(), 50);
    for p in field.particles().iter().filter(|p| p.is_star()) {
        assert!(p.position.x <= 200.0 + p.radius);
        assert!(p.position.y <= 150.0 + p.radius);
    }
}

// ==================================================================================
// Seeding
// ==================================================================================

#[test]
fn seeding_counts_follow_the_mobile_breakpoint() {
    let mut rng = StdRng::seed_from_u64(0);
    let palette = Palette::default();
    let pointer = Vec2::new(10.0, 10.0);

    let mobile = ParticleField::seed(Viewport::new(375, 812), pointer, true, &palette, &mut rng);
    assert_eq!((mobile.star_count(), mobile.circle_count()), (20, 5));

    let desktop = ParticleField::seed(Viewport::new(1920, 1080), pointer, false, &palette, &mut rng);
    assert_eq!((desktop.star_count(), desktop.circle_count()), (40, 10));
}

// ==================================================================================
// Motion rules
// ==================================================================================

#[test]
fn stars_near_the_pointer_move_away() {
    let mut rng = StdRng::seed_from_u64(21);
    let palette = Palette::default();
    let mut field = ParticleField::seed(Viewport::new(800, 600), Vec2::ZERO, false, &palette, &mut rng);
    let mut surface = CommandList::new(Viewport::new(800, 600));

    // Pointer 20px from the first star on its edge side, so the push is inward
    let star = field.particles()[0];
    let side = if star.position.x > 400.0 { 1.0 } else { -1.0 };
    let pointer = star.position + Vec2::new(20.0 * side, 0.0);
    let before = star.position.distance(pointer);

    field.tick(&mut surface, pointer);
    let after = field.particles()[0].position.distance(pointer);
    assert!(after > before, "before {} after {}", before, after);
}

#[test]
fn repel_radius_is_fifty_logical_pixels_at_any_scale() {
    let soft_blue = Palette::default().soft_blue;

    for scale in [1.0, 1.5, 2.0, 3.0] {
        let viewport = Viewport::from_physical((1280.0 * scale) as u32, (800.0 * scale) as u32, scale);
        assert_eq!(viewport, Viewport::new(1280, 800), "scale {}", scale);

        let mut pointer = PointerTracker::centered(viewport);
        let cursor = Vec2::new(340.0, 300.0) * scale as f32;
        pointer.on_move(logical_point(cursor, scale), Vec2::ZERO);

        // 40 logical px away: pushed by (50 - 40) / 50 * 0.8
        let mut near = Particle::star(Vec2::new(300.0, 300.0), 0.5, soft_blue, Vec2::ZERO);
        near.update(pointer.position(), viewport);
        assert!((near.position.x - 299.84).abs() < 1e-3, "scale {}: {:?}", scale, near.position);
        assert!((near.position.y - 300.0).abs() < 1e-3);

        // 60 logical px away: untouched
        let mut far = Particle::star(Vec2::new(280.0, 300.0), 0.5, soft_blue, Vec2::ZERO);
        far.update(pointer.position(), viewport);
        assert_eq!(far.position, Vec2::new(280.0, 300.0), "scale {}", scale);
    }
}

#[test]
fn circles_ease_eight_percent_toward_their_orbit_point() {
    let mut rng = StdRng::seed_from_u64(8);
    let palette = Palette::default();
    let start = Vec2::new(400.0, 300.0);
    let mut field = ParticleField::seed(Viewport::new(800, 600), start, false, &palette, &mut rng);
    let mut surface = CommandList::new(Viewport::new(800, 600));

    let before: Vec<_> = field.particles().iter().filter(|p| !p.is_star()).copied().collect();
    let pointer = Vec2::new(420.0, 310.0);
    field.tick(&mut surface, pointer);
    let after: Vec<_> = field.particles().iter().filter(|p| !p.is_star()).copied().collect();

    for (old, new) in before.iter().zip(&after) {
        let Motion::Circle { orbit_radius, phase_angle } = old.motion else {
            panic!("expected a circle");
        };
        let angle = phase_angle + 0.02;
        let target = pointer + Vec2::new(angle.cos(), angle.sin()) * orbit_radius;
        let expected = old.position + (target - old.position) * 0.08;
        assert!((new.position - expected).length() < 1e-3);
    }
}

// ==================================================================================
// Render loop
// ==================================================================================

#[test]
fn reduced_motion_creates_nothing_and_fills_once() {
    let mut surface = CommandList::new(Viewport::new(1024, 768));
    let startup = Startup {
        reduced_motion: true,
        logical_width: 1024.0,
    };
    let (mut render_loop, pointer) = start(&mut surface, startup, 1);
    let requests = Cell::new(0);
    let scheduler = || requests.set(requests.get() + 1);

    assert_eq!(render_loop.state(), LoopState::Static);
    assert!(render_loop.field().is_none());
    assert_eq!(render_loop.run_for(60, &mut surface, &pointer, &scheduler), 0);
    assert_eq!(surface.fill_count(), 1);
    assert_eq!(requests.get(), 0);
}

#[test]
fn shape_batch_holds_one_frame_of_triangles() {
    let mut batch = ShapeBatch::new(Viewport::new(1280, 720));
    let (mut render_loop, pointer) = start(&mut batch, DESKTOP, 3);
    let noop = || {};

    render_loop.run_for(2, &mut batch, &pointer, &noop);

    let star_vertices = 40 * 8 * 3;
    let circle_vertices = 10 * CIRCLE_SEGMENTS * 3;
    assert_eq!(batch.vertices().len(), star_vertices + circle_vertices);
}
