use boid_school::{SimError, SimulationParams};

#[test]
fn bundled_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/tight_school.json");
    let params = SimulationParams::load(path).unwrap();
    assert_eq!(params.num_boids, 120);
    assert_eq!(params.flock.trail_length, 30);
    assert_eq!(params.bubbles.max_bubbles, 80);
    // Not in the file
    assert_eq!(params.flock.boid_size, SimulationParams::default().flock.boid_size);
}

#[test]
fn missing_file_is_a_config_error() {
    let err = SimulationParams::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}
