pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod output;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, SimulationState, Snapshot, Trajectory, NVec3};
pub use simulation::forces::{Acceleration, PairAccel, NewtonianGravity};
pub use simulation::integrator::{euler_step, integrate, integrate_to_end};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, ParametersConfig, BodyConfig, RenderConfig};
pub use error::{ConfigError, ExportError};

pub use visualization::frames::{frame_draw, FrameDraw, BodyDraw, RenderStyle};
pub use visualization::gif::{export_gif, export_gif_to_path};
pub use visualization::viewer3d::run_viewer;
pub use output::trajectory_csv::{write_csv, write_csv_to_path};

pub use benchmark::benchmark::{bench_gravity, bench_step, bench_integrate_curve};
