//! Draws a small plot overlay and a rotated badge into a draw buffer and
//! logs what a host renderer would upload.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example transformed_shapes --features draw-stats
//! ```

use std::f64::consts::FRAC_PI_4;

use ink2d::prelude::*;
use ink2d::DrawVert;

/// A plot spanning x in [0, 10] and y in [0, 5] inside a 400x200 pixel area.
struct Plot {
    origin: (f64, f64),
}

impl HostFrame for Plot {
    fn plot_to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
        (self.origin.0 + x * 40.0, self.origin.1 + 200.0 - y * 40.0)
    }

    fn window_pos(&self) -> Vec2 {
        vec2(self.origin.0 as f32, self.origin.1 as f32)
    }
}

fn draw(ctx: &Context, buffer: &mut DrawBuffer, plot: &Plot, t: f64) -> Result<()> {
    let mut painter = ctx.painter(buffer);

    // Axes and a sine wave, in plot units.
    painter.push_plot_transform(plot);
    painter.add_line([0.0, 0.0], [10.0, 0.0], Color::WHITE, 0.05)?;
    painter.add_line([0.0, 0.0], [0.0, 5.0], Color::WHITE, 0.05)?;
    let samples: Vec<Vec2> = (0..=100)
        .map(|i| {
            let x = i as f32 * 0.1;
            vec2(x, 2.5 + 2.0 * (x + t as f32).sin())
        })
        .collect();
    painter.add_vertices(&samples, Color::from_hex(0x4FC3F7))?;
    painter.add_ellipse(
        [5.0, 2.5],
        1.0,
        0.5,
        Color::rgba(1.0, 0.6, 0.0, 0.4),
        Color::rgb(1.0, 0.6, 0.0),
        0.05,
        None,
    )?;
    painter.pop_transform(1)?;

    // A badge in window coordinates, rocking about its centre.
    painter.push_window_transform(plot);
    painter.push_local_clip_rect([0.0, 0.0], [400.0, 200.0]);
    let badge = Transform::from_parts((350.0, 30.0), FRAC_PI_4 * t.sin(), (1.0, 1.0));
    painter.with_transform(badge, |p| {
        p.add_rect([-20.0, -10.0], [20.0, 10.0], Color::BLACK, Color::WHITE, 2.0)?;
        p.add_circle([0.0, 0.0], 6.0, Color::rgb(0.9, 0.1, 0.1), Color::UNSET, None, 24)
    })?;
    painter.pop_clip_rect();
    painter.pop_transform(1)?;

    log::info!(
        "{} vertices, {} indices, {} draw commands",
        painter.verts().len(),
        painter.indices().len(),
        painter.cmds().len()
    );
    painter.finish()
}

fn main() {
    env_logger::init();

    let mut ctx: Context = Context::with_config(DrawConfig::default().circle_segments(48));
    let mut buffer = DrawBuffer::new(Rect::from_xywh(0.0, 0.0, 800.0, 600.0));
    let plot = Plot {
        origin: (100.0, 80.0),
    };

    for frame in 0..3 {
        buffer.clear();
        ctx.begin_frame();
        if let Err(err) = draw(&ctx, &mut buffer, &plot, frame as f64 * 0.5) {
            log::error!("frame {} failed: {}", frame, err);
        }
        ctx.end_frame();
    }

    let bytes: &[u8] = bytemuck::cast_slice(buffer.vertices());
    log::info!(
        "last frame: {} bytes of vertex data, stride {}",
        bytes.len(),
        DrawVert::desc().array_stride
    );
}
