//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size `dt` and the number of steps,
//! - the gravitational constant `G`

#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub dt: f64, // step size (s)
    pub steps: usize, // number of steps
    pub G: f64, // gravitational constant
}

impl Parameters {
    /// Total simulated time covered by a full run
    pub fn t_end(&self) -> f64 {
        self.dt * self.steps as f64
    }
}
