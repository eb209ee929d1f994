//! Core state types for the two-body simulation.
//!
//! - `Body`            one point mass (position, velocity, mass, display radius)
//! - `SimulationState` the primary/secondary pair at time `t`
//! - `Snapshot`        positions of both bodies after one step (value copy)
//! - `Trajectory`      the full step-indexed sequence of snapshots

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: NVec3, // position (m)
    pub v: NVec3, // velocity (m/s)
    pub m: f64, // mass (kg)
    pub radius: f64, // radius (m), only used for drawing
}

impl Body {
    pub fn momentum(&self) -> NVec3 {
        self.m * self.v
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

/// The pair of bodies at elapsed time `t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub primary: Body, // planet
    pub secondary: Body, // satellite
    pub t: f64, // elapsed time (s)
}

impl SimulationState {
    pub fn new(primary: Body, secondary: Body) -> Self {
        Self { primary, secondary, t: 0.0 }
    }

    /// Vector from the primary to the secondary
    pub fn displacement(&self) -> NVec3 {
        self.secondary.x - self.primary.x
    }

    pub fn separation(&self) -> f64 {
        self.displacement().norm()
    }

    pub fn total_momentum(&self) -> NVec3 {
        self.primary.momentum() + self.secondary.momentum()
    }

    /// Kinetic plus Newtonian potential energy for gravitational constant `g`.
    /// Not conserved exactly by the fixed-step scheme.
    pub fn total_energy(&self, g: f64) -> f64 {
        let potential = -g * self.primary.m * self.secondary.m / self.separation();
        self.primary.kinetic_energy() + self.secondary.kinetic_energy() + potential
    }
}

/// Positions of both bodies after one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub t: f64,
    pub primary: NVec3,
    pub secondary: NVec3,
}

impl Snapshot {
    pub fn capture(state: &SimulationState) -> Self {
        Self {
            t: state.t,
            primary: state.primary.x,
            secondary: state.secondary.x,
        }
    }
}

/// Step-indexed sequence of snapshots. Built once by the integrator and
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    frames: Vec<Snapshot>,
}

impl Trajectory {
    pub fn with_capacity(steps: usize) -> Self {
        Self { frames: Vec::with_capacity(steps) }
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.frames.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&Snapshot> {
        self.frames.get(step)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
