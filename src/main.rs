use tbsim::{ScenarioConfig, Scenario, Trajectory};
use tbsim::{run_viewer, export_gif_to_path, write_csv_to_path};
use tbsim::{bench_gravity, bench_step, bench_integrate_curve};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Interactive 3D playback
    View,
    /// Write an animated GIF
    Gif,
    /// Write the trajectory as CSV
    Csv,
    /// Print the final positions only
    Summary,
    /// Time the integrator
    Bench,
}

#[derive(Parser, Debug)]
#[command(name = "tbsim", about = "Two-body gravity simulator")]
struct Args {
    /// Scenario file: a path, or a name under `scenarios/`
    #[arg(short, long, default_value = "earth_moon.yaml")]
    file_name: String,

    #[arg(short, long, value_enum, default_value_t = Mode::View)]
    mode: Mode,

    /// Output path for `gif` and `csv` modes
    #[arg(short, long)]
    output: Option<PathBuf>,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    info!(path = %config_path.display(), "scenario loaded");

    Ok(scenario_cfg)
}

/// Load, validate and integrate. Integration always completes before anything is drawn
fn simulate(file_name: &str) -> Result<(Trajectory, Scenario)> {
    let scenario_cfg = load_scenario_from_yaml(file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    let trajectory = scenario.run();
    Ok((trajectory, scenario))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    match args.mode {
        Mode::Bench => {
            bench_gravity();
            bench_step();
            bench_integrate_curve();
        }
        Mode::View => {
            let (trajectory, scenario) = simulate(&args.file_name)?;
            run_viewer(trajectory, scenario.render);
        }
        Mode::Gif => {
            let (trajectory, scenario) = simulate(&args.file_name)?;
            let path = args.output.unwrap_or_else(|| PathBuf::from("animation.gif"));
            export_gif_to_path(&trajectory, &scenario.render, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        Mode::Csv => {
            let (trajectory, _) = simulate(&args.file_name)?;
            let path = args.output.unwrap_or_else(|| PathBuf::from("trajectory.csv"));
            write_csv_to_path(&trajectory, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        Mode::Summary => {
            let (trajectory, _) = simulate(&args.file_name)?;
            if let Some(last) = trajectory.last() {
                println!("steps      {}", trajectory.len());
                println!("t          {:e} s", last.t);
                println!("primary    [{:e}, {:e}, {:e}] m", last.primary.x, last.primary.y, last.primary.z);
                println!("secondary  [{:e}, {:e}, {:e}] m", last.secondary.x, last.secondary.y, last.secondary.z);
                println!("separation {:e} m", (last.secondary - last.primary).norm());
            }
        }
    }

    Ok(())
}
