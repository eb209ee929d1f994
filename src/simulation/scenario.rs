//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), validates it and produces the
//! runtime bundle:
//! - numerical parameters (`Parameters`)
//! - initial system state (`SimulationState` with both bodies at t = 0)
//! - the force law (`NewtonianGravity`)
//! - presentation settings (`RenderStyle`)
//!
//! `Scenario::run` integrates the whole trajectory up front; the renderers
//! only ever see the finished `Trajectory`.

use tracing::{info, warn};

use crate::configuration::config::{ResolvedBody, ScenarioConfig};
use crate::error::ConfigError;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::integrate_to_end;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, SimulationState, Trajectory};
use crate::visualization::frames::RenderStyle;

#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub initial: SimulationState,
    pub forces: NewtonianGravity,
    pub render: RenderStyle,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let p_cfg = &cfg.parameters;
        if !(p_cfg.dt.is_finite() && p_cfg.dt > 0.0) {
            return Err(ConfigError::NonPositiveTimeStep(p_cfg.dt));
        }
        if p_cfg.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }

        let primary = body_from(cfg.primary_body(), "primary")?;
        let secondary = body_from(cfg.secondary_body(), "secondary")?;

        let initial = SimulationState::new(primary, secondary);
        if initial.separation() == 0.0 {
            // Not rejected: the force law is singular here and the run will
            // produce non-finite positions.
            warn!("primary and secondary start at the same position");
        }

        let parameters = Parameters {
            dt: p_cfg.dt,
            steps: p_cfg.steps,
            G: p_cfg.G,
        };

        let render = RenderStyle::from_config(&cfg.render, &primary, &secondary, parameters.dt);

        info!(
            dt = parameters.dt,
            steps = parameters.steps,
            t_end = parameters.t_end(),
            separation = initial.separation(),
            "scenario built"
        );

        Ok(Self {
            parameters,
            initial,
            forces: NewtonianGravity { G: parameters.G },
            render,
        })
    }

    /// Integrate the full run and return the recorded positions
    pub fn run(&self) -> Trajectory {
        let (trajectory, last) = integrate_to_end(self.initial, &self.forces, &self.parameters);

        let g = self.parameters.G;
        let e0 = self.initial.total_energy(g);
        let e1 = last.total_energy(g);
        let p_drift = (last.total_momentum() - self.initial.total_momentum()).norm();

        info!(
            steps = trajectory.len(),
            t_end = last.t,
            final_separation = last.separation(),
            energy_drift = (e1 - e0) / e0.abs(),
            momentum_drift = p_drift,
            "simulation finished"
        );

        trajectory
    }
}

fn body_from(b: ResolvedBody, which: &'static str) -> Result<Body, ConfigError> {
    if !(b.m.is_finite() && b.m > 0.0) {
        return Err(ConfigError::NonPositiveMass(which, b.m));
    }
    Ok(Body {
        x: NVec3::from(b.x),
        v: NVec3::from(b.v),
        m: b.m,
        radius: b.radius,
    })
}
