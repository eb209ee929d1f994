//! Animated GIF export of a finished trajectory.
//!
//! Orthographic projection onto the x/y plane inside the configured axis
//! limits, black background, one GIF frame per trajectory step.

use std::f64::consts::TAU;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use tracing::info;

use crate::error::ExportError;
use crate::simulation::states::Trajectory;
use crate::visualization::frames::{frame_draw, BodyDraw, FrameDraw, RenderStyle};

/// Smallest disc drawn, so a satellite never vanishes below one pixel
const MIN_RADIUS_PX: f64 = 2.0;

/// Longitude bands painted on the primary so its spin is visible
const SPIN_BANDS: f64 = 8.0;

/// Encode every trajectory frame into `writer`. Returns the number of frames.
pub fn export_gif<W: Write>(trajectory: &Trajectory, style: &RenderStyle, writer: W) -> Result<usize, ExportError> {
    if trajectory.is_empty() {
        return Err(ExportError::EmptyTrajectory);
    }

    let mut encoder = GifEncoder::new(writer);
    encoder.set_repeat(if style.looping { Repeat::Infinite } else { Repeat::Finite(0) })?;

    let delay = Delay::from_numer_denom_ms(1000, style.fps);
    let mut written = 0;
    for index in 0..trajectory.len() {
        let Some(frame) = frame_draw(trajectory, style, index) else { break };
        encoder.encode_frame(Frame::from_parts(render_frame(&frame, style), 0, 0, delay))?;
        written += 1;
    }

    Ok(written)
}

pub fn export_gif_to_path(trajectory: &Trajectory, style: &RenderStyle, path: &Path) -> Result<usize, ExportError> {
    let file = BufWriter::new(File::create(path)?);
    let frames = export_gif(trajectory, style, file)?;
    info!(frames, path = %path.display(), "GIF written");
    Ok(frames)
}

/// Rasterize one frame
pub fn render_frame(frame: &FrameDraw, style: &RenderStyle) -> RgbaImage {
    let [w, h] = style.gif_size;
    let mut img = RgbaImage::from_pixel(w.max(1), h.max(1), Rgba([0, 0, 0, 255]));

    // Looking down -z: draw the lower body first so the upper one covers it
    let mut bodies = [(frame.primary, true), (frame.secondary, false)];
    bodies.sort_by(|a, b| a.0.center.z.total_cmp(&b.0.center.z));

    for (body, banded) in bodies {
        draw_disc(&mut img, style, &body, banded);
    }
    img
}

fn draw_disc(img: &mut RgbaImage, style: &RenderStyle, body: &BodyDraw, banded: bool) {
    let (w, h) = (img.width() as f64, img.height() as f64);
    let [x0, x1] = style.x_limits;
    let [y0, y1] = style.y_limits;
    // Non-square limits or image sizes stretch positions; discs use the
    // smaller axis scale so they stay round and never overdraw
    let px_per_m = (w / (x1 - x0)).min(h / (y1 - y0));

    let cx = (body.center.x - x0) / (x1 - x0) * w;
    let cy = (y1 - body.center.y) / (y1 - y0) * h;
    let r = (body.radius * px_per_m).max(MIN_RADIUS_PX);

    // Entirely outside the visible window
    if cx + r < 0.0 || cy + r < 0.0 || cx - r >= w || cy - r >= h {
        return;
    }

    let px_min = (cx - r).floor().max(0.0) as u32;
    let px_max = (cx + r).ceil().min(w - 1.0) as u32;
    let py_min = (cy - r).floor().max(0.0) as u32;
    let py_max = (cy + r).ceil().min(h - 1.0) as u32;

    for py in py_min..=py_max {
        for px in px_min..=px_max {
            let dx = px as f64 + 0.5 - cx;
            let dy = cy - (py as f64 + 0.5);
            let rho2 = (dx * dx + dy * dy) / (r * r);
            if rho2 > 1.0 {
                continue;
            }

            // limb darkening
            let mut shade = 0.55 + 0.45 * (1.0 - rho2).sqrt();
            if banded {
                let lon = (dy.atan2(dx) - body.spin).rem_euclid(TAU);
                if (lon / TAU * SPIN_BANDS) as u32 % 2 == 1 {
                    shade *= 0.6;
                }
            }

            let [r8, g8, b8] = body.color;
            let scale = |c: u8| (c as f64 * shade).round().clamp(0.0, 255.0) as u8;
            img.put_pixel(px, py, Rgba([scale(r8), scale(g8), scale(b8), 255]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::config::RenderConfig;
    use crate::simulation::states::{Body, NVec3, SimulationState, Snapshot};

    fn body(x: f64) -> Body {
        Body { x: NVec3::new(x, 0.0, 0.0), v: NVec3::zeros(), m: 1.0, radius: 2.0e6 }
    }

    fn setup(n: usize) -> (Trajectory, RenderStyle) {
        let mut traj = Trajectory::with_capacity(n);
        for i in 0..n {
            let s = SimulationState::new(body(0.0), body(3.0e8 - i as f64 * 1.0e7));
            traj.push(Snapshot::capture(&s));
        }
        let cfg = RenderConfig { gif_size: [64, 64], ..Default::default() };
        let style = RenderStyle::from_config(&cfg, &body(0.0), &body(1.0), 3600.0);
        (traj, style)
    }

    #[test]
    fn bodies_land_where_projected() {
        let (traj, style) = setup(1);
        let frame = frame_draw(&traj, &style, 0).unwrap();
        let img = render_frame(&frame, &style);

        // primary at the origin -> image centre, green dominant
        let c = img.get_pixel(32, 32);
        assert!(c[1] > c[0] && c[1] > c[2], "centre pixel {:?}", c);

        // corner stays background
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));

        // secondary at x = 3e8 -> column 32 + 0.3 * 64
        let s = img.get_pixel(51, 32);
        assert!(s[0] > 0 && s[0] == s[1] && s[1] == s[2], "secondary pixel {:?}", s);
    }

    #[test]
    fn disc_radius_uses_smaller_axis_scale() {
        let (traj, _) = setup(1);
        // 128 x 64 pixels over square limits: 12.8 px per 1e8 m across, 6.4 px up
        let cfg = RenderConfig { gif_size: [128, 64], ..Default::default() };
        let big = Body { radius: 1.0e7, ..body(0.0) };
        let style = RenderStyle::from_config(&cfg, &big, &body(1.0), 3600.0);
        let frame = frame_draw(&traj, &style, 0).unwrap();
        let img = render_frame(&frame, &style);

        // primary centred at (64, 32) with a 6.4 px radius
        assert_ne!(*img.get_pixel(69, 32), Rgba([0, 0, 0, 255]));
        assert_ne!(*img.get_pixel(64, 27), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(74, 32), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(54, 32), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn writes_gif_stream() {
        let (traj, style) = setup(5);
        let mut buf = Vec::new();
        let frames = export_gif(&traj, &style, &mut buf).unwrap();
        assert_eq!(frames, 5);
        assert_eq!(&buf[..6], b"GIF89a");
    }

    #[test]
    fn empty_trajectory_is_rejected() {
        let (_, style) = setup(1);
        let err = export_gif(&Trajectory::default(), &style, Vec::new()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyTrajectory));
    }
}
