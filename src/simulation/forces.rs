//! Force / acceleration law for the two-body engine
//!
//! Defines the [`Acceleration`] trait and unsoftened Newtonian gravity.
//! There is no softening term: coincident bodies give a zero distance and
//! the resulting accelerations are non-finite.

use crate::simulation::states::{NVec3, SimulationState};

/// Accelerations of both bodies at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairAccel {
    pub primary: NVec3,
    pub secondary: NVec3,
}

/// Trait for acceleration sources operating on a [`SimulationState`]
pub trait Acceleration {
    fn acceleration(&self, state: &SimulationState) -> PairAccel;
}

/// Newtonian gravity between the two bodies
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl NewtonianGravity {
    /// F = G * m1 * m2 / r^2
    pub fn force_magnitude(&self, m1: f64, m2: f64, r: f64) -> f64 {
        self.G * m1 * m2 / (r * r)
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, state: &SimulationState) -> PairAccel {
        let p = &state.primary;
        let s = &state.secondary;

        // d points from the primary to the secondary
        let d = s.x - p.x;
        let r = d.norm();
        let unit = d / r;

        let f = self.force_magnitude(p.m, s.m, r);

        // Equal and opposite force, each scaled by the body's own mass:
        // the primary is pulled along +d, the secondary along -d
        PairAccel {
            primary: (f / p.m) * unit,
            secondary: -(f / s.m) * unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::Body;

    fn pair(dist: f64, m1: f64, m2: f64) -> SimulationState {
        let b = |x: f64, m: f64| Body { x: NVec3::new(x, 0.0, 0.0), v: NVec3::zeros(), m, radius: 0.0 };
        SimulationState::new(b(0.0, m1), b(dist, m2))
    }

    #[test]
    fn net_force_is_zero() {
        let g = NewtonianGravity { G: 0.1 };
        let state = pair(1.5, 2.0, 3.0);
        let a = g.acceleration(&state);
        let net = a.primary * 2.0 + a.secondary * 3.0;
        assert!(net.norm() < 1e-12, "net force not zero: {:?}", net);
    }

    #[test]
    fn inverse_square() {
        let g = NewtonianGravity { G: 1.0 };
        let near = g.acceleration(&pair(1.0, 1.0, 1.0)).primary.norm();
        let far = g.acceleration(&pair(2.0, 1.0, 1.0)).primary.norm();
        assert!((near / far - 4.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_bodies_are_not_finite() {
        let g = NewtonianGravity { G: 1.0 };
        let a = g.acceleration(&pair(0.0, 1.0, 1.0));
        assert!(!a.primary.x.is_finite());
    }
}
