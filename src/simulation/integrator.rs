//! Fixed-step time integrator for the two-body system
//!
//! Semi-implicit (symplectic) Euler: velocities are kicked with the
//! accelerations at the start of the step, then positions drift with the
//! already-updated velocities. The drift must use the new velocity; using the
//! old one turns this into plain explicit Euler, which spirals outwards.

use tracing::debug;

use super::forces::Acceleration;
use super::params::Parameters;
use super::states::{SimulationState, Snapshot, Trajectory};

/// Advance the system by one step of size `dt`.
/// Pure: the input state is left untouched and the advanced state returned.
pub fn euler_step(state: &SimulationState, forces: &impl Acceleration, dt: f64) -> SimulationState {
    let a = forces.acceleration(state);

    let mut next = *state;

    // Kick: v_n+1 = v_n + dt * a_n
    next.primary.v += a.primary * dt;
    next.secondary.v += a.secondary * dt;

    // Drift: x_n+1 = x_n + dt * v_n+1
    next.primary.x += next.primary.v * dt;
    next.secondary.x += next.secondary.v * dt;

    next.t += dt;
    next
}

/// Run `params.steps` steps from `initial` and record the positions after
/// every step. Zero steps gives an empty trajectory.
pub fn integrate(initial: SimulationState, forces: &impl Acceleration, params: &Parameters) -> Trajectory {
    integrate_to_end(initial, forces, params).0
}

/// Same as [`integrate`], also handing back the final state (velocities
/// included) for diagnostics.
pub fn integrate_to_end(
    initial: SimulationState,
    forces: &impl Acceleration,
    params: &Parameters,
) -> (Trajectory, SimulationState) {
    let mut trajectory = Trajectory::with_capacity(params.steps);
    let mut state = initial;

    for _ in 0..params.steps {
        state = euler_step(&state, forces, params.dt);
        trajectory.push(Snapshot::capture(&state));
    }

    debug!(steps = trajectory.len(), t = state.t, "integration finished");
    (trajectory, state)
}
