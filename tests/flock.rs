use boid_school::physics::{self, Bounds, TimeStep};
use boid_school::{rules, Boid, FlockParams};
use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bounds() -> Bounds {
    Bounds::new(640.0, 480.0).unwrap()
}

#[test]
fn school_stays_finite_and_inside_the_wrap_margin() {
    let mut rng = StdRng::seed_from_u64(0xB01D);
    let params = FlockParams::default();
    let mut boids: Vec<Boid> = (0..60)
        .map(|_| Boid::random(bounds(), &params, &mut rng))
        .collect();

    // A mix of ordinary and very long frames
    let steps = [1.0 / 30.0, 1.0 / 60.0, 0.25, 0.001];
    for tick in 0..400 {
        let dt = TimeStep::new(steps[tick % steps.len()]).unwrap();
        physics::step_flock(&mut boids, dt, bounds(), &params, &mut rng);

        for boid in &boids {
            let half = boid.size / 2.0;
            assert!(boid.heading.is_finite());
            assert!(boid.position.x >= -half && boid.position.x <= 640.0 + half);
            assert!(boid.position.y >= -half && boid.position.y <= 480.0 + half);
            assert!(boid.trail().len() <= params.trail_length);
        }
    }
}

#[test]
fn close_pair_separates() {
    let mut boids = vec![
        Boid::new(pt2(300.0, 240.0), 0.0, 100.0, 10.0),
        Boid::new(pt2(305.0, 240.0), 0.0, 100.0, 10.0),
    ];
    rules::apply_separation(&mut boids, 30.0, 0.1);

    let left = boids[0].heading.to_radians().sin();
    let right = boids[1].heading.to_radians().sin();
    assert!(left < 0.0, "first boid should turn away to the left");
    assert!(right > 0.0, "second boid should turn away to the right");
}

#[test]
fn isolated_boids_only_wander() {
    let mut rng = StdRng::seed_from_u64(12);
    let params = FlockParams {
        jitter: 0.0,
        ..FlockParams::default()
    };
    let mut boids = vec![
        Boid::new(pt2(200.0, 200.0), 30.0, 50.0, 10.0),
        Boid::new(pt2(450.0, 250.0), -60.0, 50.0, 10.0),
    ];
    physics::step_flock(
        &mut boids,
        TimeStep::new(0.01).unwrap(),
        bounds(),
        &params,
        &mut rng,
    );
    assert_eq!(boids[0].heading, 30.0);
    assert_eq!(boids[1].heading, -60.0);
}

#[test]
fn trail_points_only_fade() {
    let mut rng = StdRng::seed_from_u64(77);
    let params = FlockParams::default();
    let mut boids: Vec<Boid> = (0..10)
        .map(|_| Boid::random(bounds(), &params, &mut rng))
        .collect();
    let dt = TimeStep::new(1.0 / 30.0).unwrap();

    physics::step_flock(&mut boids, dt, bounds(), &params, &mut rng);
    let tracked: Vec<_> = boids.iter().map(|b| b.trail()[0]).collect();

    for _ in 0..(params.trail_length - 1) {
        physics::step_flock(&mut boids, dt, bounds(), &params, &mut rng);
        for (boid, point) in boids.iter().zip(&tracked) {
            let now = boid.trail()[0];
            assert_eq!(now.position, point.position);
            assert!(now.alpha <= point.alpha);
        }
    }
}

#[test]
fn resizing_keeps_survivors_in_order() {
    let mut rng = StdRng::seed_from_u64(5);
    let params = FlockParams::default();
    let mut boids: Vec<Boid> = (0..10)
        .map(|_| Boid::random(bounds(), &params, &mut rng))
        .collect();
    let original: Vec<_> = boids.iter().map(Boid::state).collect();

    physics::resize_population(&mut boids, 15, || Boid::random(bounds(), &params, &mut rng));
    assert_eq!(boids.len(), 15);
    let grown: Vec<_> = boids.iter().take(10).map(Boid::state).collect();
    assert_eq!(grown, original);

    physics::resize_population(&mut boids, 5, || unreachable!());
    let shrunk: Vec<_> = boids.iter().map(Boid::state).collect();
    assert_eq!(shrunk, original[..5].to_vec());
}
