use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Can't read scenario file {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Can't parse scenario YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Mass of the {0} body must be positive and finite, got {1}")]
    NonPositiveMass(&'static str, f64),
    #[error("Time step dt must be positive and finite, got {0}")]
    NonPositiveTimeStep(f64),
    #[error("Step count must be at least 1")]
    ZeroSteps,
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: trajectory is empty")]
    EmptyTrajectory,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("GIF encoding error: {0}")]
    Gif(#[from] image::ImageError),
}
