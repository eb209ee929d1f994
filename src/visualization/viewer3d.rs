use std::f32::consts::TAU;
use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::math::primitives::{Sphere, Cuboid};
use bevy::render::mesh::VertexAttributeValues;

use crate::simulation::states::{NVec3, Trajectory};
use crate::visualization::frames::{frame_draw, RenderStyle};

/// Which body a sphere entity stands for
#[derive(Component, Clone, Copy, PartialEq, Eq)]
enum BodyRole {
    Primary,
    Secondary,
}

/// Finished trajectory plus presentation settings, read-only during playback
#[derive(Resource)]
struct Playback {
    trajectory: Trajectory,
    style: RenderStyle,
}

/// Current frame index and the timer that advances it
#[derive(Resource)]
struct PlaybackClock {
    frame: usize,
    timer: Timer,
}

/// Metres -> render units. Keeps orbit-scale coordinates well inside f32 range.
const SCALE3D: f64 = 1.0e-6;

/// Vertical field of view (degrees)
const CAMERA_FOV_DEG: f32 = 75.0;

/// Headroom around the configured limits
const VIEW_MARGIN: f32 = 1.1;

/// Perspective camera on +Z looking at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
struct CameraPlacement {
    distance: f32, // along +Z, render units
    fov: f32, // vertical, radians
    far: f32,
}

impl CameraPlacement {
    /// Frame the x/y limits for any window at least as wide as it is tall.
    /// The nearest plane of the volume (z = max |z|) is the one that must
    /// still fit, so the distance is measured from there.
    fn for_style(style: &RenderStyle) -> Self {
        let abs_max = |l: [f64; 2]| (l[0].abs().max(l[1].abs()) * SCALE3D) as f32;
        let half = abs_max(style.x_limits).max(abs_max(style.y_limits)) * VIEW_MARGIN;
        let depth = abs_max(style.z_limits);

        let fov = CAMERA_FOV_DEG.to_radians();
        let distance = half / (0.5 * fov).tan() + depth;

        Self {
            distance,
            fov,
            far: 2.0 * (distance + depth),
        }
    }

    /// Half the visible height in the plane at height `z`
    fn half_height_at(&self, z: f32) -> f32 {
        (self.distance - z) * (0.5 * self.fov).tan()
    }
}

/// Open a window and play the trajectory. Blocks until the window is closed.
pub fn run_viewer(trajectory: Trajectory, style: RenderStyle) {
    info!("starting 3D viewer with {} frames", trajectory.len());

    let interval = Duration::from_millis(style.frame_interval_ms);

    App::new()
        .insert_resource(Playback { trajectory, style })
        .insert_resource(PlaybackClock {
            frame: 0,
            timer: Timer::new(interval, TimerMode::Repeating),
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "tbsim".into(),
                        ..default()
                    }),
                    ..default()
                })
                // main installs the tracing subscriber
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_3d)
        .add_systems(Update, (advance_frame, sync_transforms_3d).chain())
        .run();
}

fn to_render(v: &NVec3) -> Vec3 {
    Vec3::new(
        (v.x * SCALE3D) as f32,
        (v.y * SCALE3D) as f32,
        (v.z * SCALE3D) as f32,
    )
}

fn srgb(c: [u8; 3]) -> Color {
    Color::srgb_u8(c[0], c[1], c[2])
}

/// Startup system: spawn camera, light, axes and one sphere per body
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    playback: Res<Playback>,
) {
    let style = &playback.style;

    let placement = CameraPlacement::for_style(style);
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..default()
        },
        projection: Projection::Perspective(PerspectiveProjection {
            fov: placement.fov,
            far: placement.far,
            ..default()
        }),
        transform: Transform::from_xyz(0.0, 0.0, placement.distance).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        transform: Transform::from_xyz(1.0, 0.5, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials, style);

    let Some(first) = frame_draw(&playback.trajectory, style, 0) else {
        warn!("trajectory is empty, nothing to draw");
        return;
    };

    // Primary: textured if an image was configured, banded otherwise so the spin shows
    let primary_radius = (first.primary.radius * SCALE3D) as f32;
    let primary_material = match &style.primary_texture {
        Some(path) => StandardMaterial {
            base_color_texture: Some(asset_server.load(path.clone())),
            ..default()
        },
        None => StandardMaterial {
            base_color: srgb(first.primary.color),
            ..default()
        },
    };
    let mut primary_mesh = Mesh::from(Sphere::new(primary_radius));
    if style.primary_texture.is_none() {
        paint_longitude_bands(&mut primary_mesh);
    }

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(primary_mesh),
            material: materials.add(primary_material),
            transform: Transform::from_translation(to_render(&first.primary.center)),
            ..default()
        },
        BodyRole::Primary,
    ));

    let secondary_radius = (first.secondary.radius * SCALE3D) as f32;
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(secondary_radius).mesh()),
            material: materials.add(StandardMaterial {
                base_color: srgb(first.secondary.color),
                ..default()
            }),
            transform: Transform::from_translation(to_render(&first.secondary.center)),
            ..default()
        },
        BodyRole::Secondary,
    ));
}

/// Alternate light/dark vertex colours by longitude. Multiplied with the
/// material's base colour, so the sphere keeps its hue.
fn paint_longitude_bands(mesh: &mut Mesh) {
    let Some(VertexAttributeValues::Float32x3(positions)) = mesh.attribute(Mesh::ATTRIBUTE_POSITION) else {
        return;
    };

    let colors: Vec<[f32; 4]> = positions
        .iter()
        .map(|p| {
            // longitude around the mesh's +Y axis
            let lon = p[2].atan2(p[0]).rem_euclid(TAU);
            if (lon / TAU * 8.0) as u32 % 2 == 0 {
                [1.0, 1.0, 1.0, 1.0]
            } else {
                [0.45, 0.45, 0.45, 1.0]
            }
        })
        .collect();

    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
}

/// Step the frame index on the configured interval; wrap or hold at the end
fn advance_frame(time: Res<Time>, playback: Res<Playback>, mut clock: ResMut<PlaybackClock>) {
    let len = playback.trajectory.len();
    if len == 0 {
        return;
    }

    clock.timer.tick(time.delta());
    let ticks = clock.timer.times_finished_this_tick() as usize;
    if ticks == 0 {
        return;
    }

    clock.frame = next_frame(clock.frame, ticks, len, playback.style.looping);
}

/// Frame index `ticks` frames after `frame`: wraps when looping, otherwise
/// holds on the last frame. `len` must be non-zero.
fn next_frame(frame: usize, ticks: usize, len: usize, looping: bool) -> usize {
    let next = frame + ticks;
    if looping {
        next % len
    } else {
        next.min(len - 1)
    }
}

fn sync_transforms_3d(
    playback: Res<Playback>,
    clock: Res<PlaybackClock>,
    mut query: Query<(&BodyRole, &mut Transform)>,
) {
    let Some(frame) = frame_draw(&playback.trajectory, &playback.style, clock.frame) else {
        return;
    };

    for (role, mut transform) in &mut query {
        match role {
            BodyRole::Primary => {
                transform.translation = to_render(&frame.primary.center);
                // mesh pole is +Y; tilt it onto +Z, then spin about Z
                transform.rotation = Quat::from_rotation_z(frame.primary.spin as f32)
                    * Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);
            }
            BodyRole::Secondary => {
                transform.translation = to_render(&frame.secondary.center);
            }
        }
    }
}

// =========================================================================================
// Draw 3D axes for visual reference, spanning the configured limits
// =========================================================================================

fn spawn_axes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    style: &RenderStyle,
) {
    let thickness = 0.5;
    let span = |l: [f64; 2]| ((l[1] - l[0]) * SCALE3D) as f32;
    let mid = |l: [f64; 2]| (0.5 * (l[0] + l[1]) * SCALE3D) as f32;

    let axes = [
        (Cuboid::new(span(style.x_limits), thickness, thickness), Vec3::new(mid(style.x_limits), 0.0, 0.0), Color::srgb(1.0, 0.0, 0.0)),
        (Cuboid::new(thickness, span(style.y_limits), thickness), Vec3::new(0.0, mid(style.y_limits), 0.0), Color::srgb(0.0, 1.0, 0.0)),
        (Cuboid::new(thickness, thickness, span(style.z_limits)), Vec3::new(0.0, 0.0, mid(style.z_limits)), Color::srgb(0.0, 0.0, 1.0)),
    ];

    for (cuboid, center, color) in axes {
        commands.spawn(PbrBundle {
            mesh: meshes.add(cuboid.mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..default()
            }),
            transform: Transform::from_translation(center),
            ..default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::config::RenderConfig;
    use crate::simulation::states::Body;

    fn style(cfg: RenderConfig) -> RenderStyle {
        let b = Body { x: NVec3::zeros(), v: NVec3::zeros(), m: 1.0, radius: 1.0e6 };
        RenderStyle::from_config(&cfg, &b, &b, 3600.0)
    }

    #[test]
    fn camera_sees_configured_limits() {
        for cfg in [
            RenderConfig::default(),
            RenderConfig { y_limits: [-9.0e8, 2.0e8], z_limits: [-1.0e8, 3.0e8], ..Default::default() },
            RenderConfig { x_limits: [-1.0e9, 1.0e9], y_limits: [-1.0e8, 1.0e8], ..Default::default() },
        ] {
            let s = style(cfg);
            let cam = CameraPlacement::for_style(&s);
            let half_y = (s.y_limits[0].abs().max(s.y_limits[1].abs()) * SCALE3D) as f32;
            let half_x = (s.x_limits[0].abs().max(s.x_limits[1].abs()) * SCALE3D) as f32;
            let top = (s.z_limits[0].abs().max(s.z_limits[1].abs()) * SCALE3D) as f32;

            // orbital plane and the nearest plane of the volume both fit
            assert!(cam.half_height_at(0.0) >= half_y.max(half_x));
            assert!(cam.half_height_at(top) >= half_y.max(half_x));
            // nothing in the volume lies beyond the far plane
            assert!(cam.far > cam.distance + top);
        }
    }

    #[test]
    fn default_camera_contains_moon_orbit() {
        let cam = CameraPlacement::for_style(&style(RenderConfig::default()));
        let moon_y = (3.844e8 * SCALE3D) as f32;
        assert!(cam.half_height_at(0.0) > moon_y);
        assert!(cam.far > cam.distance);
    }

    #[test]
    fn looping_playback_wraps() {
        assert_eq!(next_frame(0, 1, 5, true), 1);
        assert_eq!(next_frame(4, 1, 5, true), 0);
        assert_eq!(next_frame(3, 4, 5, true), 2);
    }

    #[test]
    fn non_looping_playback_holds_last_frame() {
        assert_eq!(next_frame(2, 1, 5, false), 3);
        assert_eq!(next_frame(4, 1, 5, false), 4);
        assert_eq!(next_frame(3, 10, 5, false), 4);
        assert_eq!(next_frame(0, 3, 1, false), 0);
    }
}
