//! Frame index -> draw instructions.
//!
//! Both presentation back ends (the bevy viewer and the GIF exporter) go
//! through [`frame_draw`], so neither touches the integrator directly.

use std::f64::consts::TAU;

use crate::configuration::config::RenderConfig;
use crate::simulation::states::{Body, NVec3, Trajectory};

/// Colour and on-screen size of one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyStyle {
    pub radius: f64, // drawn radius (m), already exaggerated
    pub color: [u8; 3],
}

/// Runtime presentation settings derived from [`RenderConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub frame_interval_ms: u64,
    pub fps: u32,
    pub x_limits: [f64; 2],
    pub y_limits: [f64; 2],
    pub z_limits: [f64; 2],
    pub primary: BodyStyle,
    pub secondary: BodyStyle,
    pub spin_per_frame: f64, // primary rotation per trajectory step (rad)
    pub primary_texture: Option<String>,
    pub gif_size: [u32; 2],
    pub looping: bool,
}

impl RenderStyle {
    pub fn from_config(cfg: &RenderConfig, primary: &Body, secondary: &Body, dt: f64) -> Self {
        // one full turn per rotation_period, advanced once per step of dt
        let spin_per_frame = if cfg.rotation_period > 0.0 {
            TAU * dt / cfg.rotation_period
        } else {
            0.0
        };

        Self {
            frame_interval_ms: cfg.frame_interval_ms.max(1),
            fps: cfg.fps.max(1),
            x_limits: cfg.x_limits,
            y_limits: cfg.y_limits,
            z_limits: cfg.z_limits,
            primary: BodyStyle {
                radius: primary.radius * cfg.radius_scale,
                color: cfg.primary_color,
            },
            secondary: BodyStyle {
                radius: secondary.radius * cfg.radius_scale,
                color: cfg.secondary_color,
            },
            spin_per_frame,
            primary_texture: cfg.primary_texture.clone(),
            gif_size: cfg.gif_size,
            looping: cfg.looping,
        }
    }
}

/// One sphere to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDraw {
    pub center: NVec3,
    pub radius: f64,
    pub color: [u8; 3],
    pub spin: f64, // rotation about the body's own z axis (rad)
}

/// Everything needed to draw trajectory frame `index`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDraw {
    pub index: usize,
    pub t: f64,
    pub primary: BodyDraw,
    pub secondary: BodyDraw,
}

/// Draw instructions for frame `index`, or `None` past the end of the trajectory
pub fn frame_draw(trajectory: &Trajectory, style: &RenderStyle, index: usize) -> Option<FrameDraw> {
    let snap = trajectory.get(index)?;
    let spin = (style.spin_per_frame * index as f64).rem_euclid(TAU);

    Some(FrameDraw {
        index,
        t: snap.t,
        primary: BodyDraw {
            center: snap.primary,
            radius: style.primary.radius,
            color: style.primary.color,
            spin,
        },
        secondary: BodyDraw {
            center: snap.secondary,
            radius: style.secondary.radius,
            color: style.secondary.color,
            spin: 0.0,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{SimulationState, Snapshot};

    fn body(x: f64, radius: f64) -> Body {
        Body { x: NVec3::new(x, 0.0, 0.0), v: NVec3::zeros(), m: 1.0, radius }
    }

    fn short_trajectory(n: usize) -> Trajectory {
        let mut traj = Trajectory::with_capacity(n);
        for i in 0..n {
            let mut s = SimulationState::new(body(0.0, 1.0), body(i as f64, 1.0));
            s.t = i as f64;
            traj.push(Snapshot::capture(&s));
        }
        traj
    }

    #[test]
    fn style_scales_radii_and_spin() {
        let cfg = RenderConfig { radius_scale: 2.0, rotation_period: 86400.0, ..Default::default() };
        let style = RenderStyle::from_config(&cfg, &body(0.0, 3.0), &body(1.0, 1.0), 3600.0);
        assert_eq!(style.primary.radius, 6.0);
        assert_eq!(style.secondary.radius, 2.0);
        assert!((style.spin_per_frame - TAU / 24.0).abs() < 1e-12);
    }

    #[test]
    fn frames_follow_trajectory_and_stop_at_end() {
        let traj = short_trajectory(4);
        let style = RenderStyle::from_config(&RenderConfig::default(), &body(0.0, 1.0), &body(1.0, 1.0), 3600.0);

        let f = frame_draw(&traj, &style, 3).unwrap();
        assert_eq!(f.secondary.center, NVec3::new(3.0, 0.0, 0.0));
        assert_eq!(f.primary.color, style.primary.color);
        assert!((f.primary.spin - 3.0 * style.spin_per_frame).abs() < 1e-12);
        assert_eq!(f.secondary.spin, 0.0);

        assert!(frame_draw(&traj, &style, 4).is_none());
    }

    #[test]
    fn zero_period_means_no_spin() {
        let cfg = RenderConfig { rotation_period: 0.0, ..Default::default() };
        let style = RenderStyle::from_config(&cfg, &body(0.0, 1.0), &body(1.0, 1.0), 3600.0);
        assert_eq!(style.spin_per_frame, 0.0);
    }
}
