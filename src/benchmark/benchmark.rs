use std::time::Instant;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::forces::{Acceleration, NewtonianGravity};
use crate::simulation::integrator::{euler_step, integrate};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::SimulationState;

/// Earth/Moon initial state and parameters with `steps` steps
fn make_earth_moon(steps: usize) -> (SimulationState, NewtonianGravity, Parameters) {
    let mut cfg = ScenarioConfig::default();
    cfg.parameters.steps = steps;
    // defaults are always valid
    let scenario = Scenario::build_scenario(cfg).unwrap_or_else(|e| panic!("default scenario rejected: {e}"));
    (scenario.initial, scenario.forces, scenario.parameters)
}

/// Time the force law alone
pub fn bench_gravity() {
    let (state, forces, _) = make_earth_moon(1);
    let evals = 1_000_000;

    // Warm up
    let _ = forces.acceleration(&state);

    let t0 = Instant::now();
    let mut sink = 0.0;
    for _ in 0..evals {
        sink += forces.acceleration(&state).secondary.x;
    }
    let per_eval = t0.elapsed().as_secs_f64() / evals as f64;

    println!("gravity: {:10.3} ns per evaluation (checksum {:e})", per_eval * 1e9, sink);
}

/// Time one step of the integrator
pub fn bench_step() {
    let (mut state, forces, params) = make_earth_moon(1);
    let steps = 1_000_000;

    let t0 = Instant::now();
    for _ in 0..steps {
        state = euler_step(&state, &forces, params.dt);
    }
    let per_step = t0.elapsed().as_secs_f64() / steps as f64;

    println!("euler_step: {:10.3} ns per step (final t = {:e} s)", per_step * 1e9, state.t);
}

/// Time full trajectory builds for growing step counts.
/// Paste output directly into a spreadsheet to graph
pub fn bench_integrate_curve() {
    println!("steps,total_ms,ns_per_step");

    for steps in [500, 5_000, 50_000, 500_000] {
        let (state, forces, params) = make_earth_moon(steps);

        let t0 = Instant::now();
        let trajectory = integrate(state, &forces, &params);
        let elapsed = t0.elapsed().as_secs_f64();

        assert_eq!(trajectory.len(), steps);
        println!("{},{:.6},{:.3}", steps, elapsed * 1000.0, elapsed * 1e9 / steps as f64);
    }
}
