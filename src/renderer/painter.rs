use crate::color::Color;
use crate::config::DrawConfig;
use crate::error::{Error, Result};
use crate::geometry::{vec2, Rect, Vec2};
use crate::host::{HostFrame, TextRenderer};
use crate::transform::Transform;
use crate::transform_stack::TransformStack;

use super::buffer::{DrawBuffer, DrawCmd, TextureId};
use super::retransform::apply_transform;
use super::tessellate;
use super::vertex::{DrawIdx, DrawVert};

/// Plot-space distance used to sample the host's plot-to-pixel mapping.
const PLOT_SAMPLE: f64 = 1.0e8;

/// Immediate-mode drawing into a [`DrawBuffer`] under a stack of transforms.
///
/// Every primitive is tessellated in local coordinates and then mapped in
/// place by the current transform, so callers can draw in whatever frame
/// is convenient (plot units, a rotated widget, ...) and still end up with
/// pixel-space vertices.
///
/// ```
/// use ink2d::{Color, DrawBuffer, Painter, Transform};
///
/// let mut buffer = DrawBuffer::default();
/// let mut painter = Painter::new(&mut buffer);
/// painter.push_transform(Transform::translate(5.0, 5.0));
/// painter
///     .add_rect([0.0, 0.0], [10.0, 10.0], Color::WHITE, Color::UNSET, None)
///     .unwrap();
/// painter.pop_transform(1).unwrap();
/// painter.finish().unwrap();
///
/// assert_eq!(buffer.vertices()[0].pos, [5.0, 5.0]);
/// ```
pub struct Painter<'a> {
    buffer: &'a mut DrawBuffer,
    transforms: TransformStack,
    config: DrawConfig,
}

impl<'a> Painter<'a> {
    pub fn new(buffer: &'a mut DrawBuffer) -> Self {
        Self::with_config(buffer, DrawConfig::default())
    }

    pub fn with_config(buffer: &'a mut DrawBuffer, config: DrawConfig) -> Self {
        Self {
            buffer,
            transforms: TransformStack::new(),
            config,
        }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn buffer(&self) -> &DrawBuffer {
        self.buffer
    }

    // -- Transforms --

    /// Push a transform. It is interpreted inside the current one.
    pub fn push_transform(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    /// Push rotation, then scaling, placed at `translation`.
    pub fn push_transform_parts(
        &mut self,
        translation: (f64, f64),
        rotation: f64,
        scale: (f64, f64),
    ) {
        self.push_transform(Transform::from_parts(translation, rotation, scale));
    }

    /// Like [`push_transform_parts`](Self::push_transform_parts) with the
    /// translation and scale given as two-element slices.
    pub fn push_transform_slices(
        &mut self,
        translation: &[f64],
        rotation: f64,
        scale: &[f64],
    ) -> Result<()> {
        let translation = pair("translation", translation)?;
        let scale = pair("scale", scale)?;
        self.push_transform_parts(translation, rotation, scale);
        Ok(())
    }

    /// Push the host's plot-to-pixel mapping, so that subsequent geometry
    /// is given in plot units.
    pub fn push_plot_transform<H: HostFrame + ?Sized>(&mut self, host: &H) {
        let a = host.plot_to_pixels(0.0, 0.0);
        let b = host.plot_to_pixels(PLOT_SAMPLE, PLOT_SAMPLE);
        let sx = ((b.0 - a.0) / PLOT_SAMPLE).abs();
        let sy = ((b.1 - a.1) / PLOT_SAMPLE).abs();

        // Plot y grows upwards, pixel y downwards.
        let mut mapping = Transform::scale_xy(sx, -sy);
        mapping.m20 = a.0;
        mapping.m21 = a.1;
        self.push_transform(mapping);
    }

    /// Push a translation to the host window's top-left corner.
    pub fn push_window_transform<H: HostFrame + ?Sized>(&mut self, host: &H) {
        let pos = host.window_pos();
        self.push_transform(Transform::translate(pos.x as f64, pos.y as f64));
    }

    /// Pop `count` transforms. Popping more than were pushed is an error
    /// and leaves the stack as it was.
    pub fn pop_transform(&mut self, count: usize) -> Result<()> {
        self.transforms.pop(count).inspect_err(|err| {
            log::warn!("pop_transform: {}", err);
        })
    }

    /// The effective transform (identity when nothing is pushed).
    pub fn current_transform(&self) -> Transform {
        self.transforms.current()
    }

    pub fn transform_depth(&self) -> usize {
        self.transforms.depth()
    }

    /// Run `f` with `transform` pushed, popping it again afterwards.
    pub fn with_transform<R>(
        &mut self,
        transform: Transform,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.push_transform(transform);
        let result = f(self);
        self.pop_transform(1)?;
        result
    }

    // -- Primitives --

    /// Run one emission and map whatever it wrote through the current transform.
    ///
    /// The transform is applied even when the emission fails part way, so
    /// nothing it wrote is left in local space.
    fn emit(&mut self, f: impl FnOnce(&mut DrawBuffer) -> Result<()>) -> Result<()> {
        if self.transforms.top().is_some_and(|t| !t.is_finite()) {
            return tessellate::skip("primitive", "non-finite transform");
        }
        let start = self.buffer.vertex_cursor();
        let result = f(self.buffer);
        apply_transform(self.buffer, start, self.transforms.top());
        result
    }

    fn resolve(&self, color: Color) -> Option<u32> {
        color.resolve(self.config.global_alpha)
    }

    fn stroke_width(&self, width: Option<f32>) -> Option<f32> {
        let width = width.unwrap_or(self.config.line_width);
        if width > 0.0 {
            Some(width)
        } else {
            log::debug!("skipping stroke with non-positive width {}", width);
            None
        }
    }

    /// A line from `p0` to `p1`. `None` width uses the configured default.
    pub fn add_line(
        &mut self,
        p0: impl Into<Vec2>,
        p1: impl Into<Vec2>,
        color: impl Into<Color>,
        width: impl Into<Option<f32>>,
    ) -> Result<()> {
        let Some(col) = self.resolve(color.into()) else {
            return Ok(());
        };
        let Some(width) = self.stroke_width(width.into()) else {
            return Ok(());
        };
        let (p0, p1, cap) = (p0.into(), p1.into(), self.config.line_cap);
        self.emit(|buffer| tessellate::line(buffer, p0, p1, col, width, cap))
    }

    /// An axis-aligned rect, filled and/or stroked. Pass [`Color::UNSET`]
    /// to leave out either part.
    pub fn add_rect(
        &mut self,
        min: impl Into<Vec2>,
        max: impl Into<Vec2>,
        fill: impl Into<Color>,
        stroke: impl Into<Color>,
        width: impl Into<Option<f32>>,
    ) -> Result<()> {
        let (min, max) = (min.into(), max.into());

        if let Some(col) = self.resolve(fill.into()) {
            self.emit(|buffer| tessellate::rect_fill(buffer, min, max, col))?;
        }
        if let Some(col) = self.resolve(stroke.into()) {
            if let Some(width) = self.stroke_width(width.into()) {
                self.emit(|buffer| tessellate::rect_stroke(buffer, min, max, col, width))?;
            }
        }
        Ok(())
    }

    /// An ellipse with radii `a` (x) and `b` (y) approximated by `segments`
    /// sides. `None` segments uses the configured default.
    #[allow(clippy::too_many_arguments)]
    pub fn add_ellipse(
        &mut self,
        center: impl Into<Vec2>,
        a: f32,
        b: f32,
        fill: impl Into<Color>,
        stroke: impl Into<Color>,
        width: impl Into<Option<f32>>,
        segments: impl Into<Option<u32>>,
    ) -> Result<()> {
        let center = center.into();
        let radius = vec2(a, b);
        let segments = segments.into().unwrap_or(self.config.circle_segments);

        if let Some(col) = self.resolve(fill.into()) {
            self.emit(|buffer| tessellate::ngon_fill(buffer, center, radius, col, segments))?;
        }
        if let Some(col) = self.resolve(stroke.into()) {
            if let Some(width) = self.stroke_width(width.into()) {
                self.emit(|buffer| {
                    tessellate::ngon_stroke(buffer, center, radius, col, width, segments)
                })?;
            }
        }
        Ok(())
    }

    /// A circle of radius `r`; see [`add_ellipse`](Self::add_ellipse).
    pub fn add_circle(
        &mut self,
        center: impl Into<Vec2>,
        r: f32,
        fill: impl Into<Color>,
        stroke: impl Into<Color>,
        width: impl Into<Option<f32>>,
        segments: impl Into<Option<u32>>,
    ) -> Result<()> {
        self.add_ellipse(center, r, r, fill, stroke, width, segments)
    }

    /// A raw point set sharing one color.
    pub fn add_vertices(&mut self, points: &[Vec2], color: impl Into<Color>) -> Result<()> {
        let Some(col) = self.resolve(color.into()) else {
            return Ok(());
        };
        self.emit(|buffer| tessellate::points(buffer, points, col))
    }

    /// A point set given as interleaved `x, y` coordinates.
    pub fn add_vertices_flat(&mut self, coords: &[f32], color: impl Into<Color>) -> Result<()> {
        if coords.len() % 2 != 0 {
            return Err(Error::InvalidShape {
                what: "vertices",
                expected: "an even number of coordinates",
                actual: coords.len(),
            });
        }
        let points: Vec<Vec2> = coords.chunks_exact(2).map(|c| vec2(c[0], c[1])).collect();
        self.add_vertices(&points, color)
    }

    /// A textured quad. An unset tint draws the image untinted.
    pub fn add_image(
        &mut self,
        texture: TextureId,
        p_min: impl Into<Vec2>,
        p_max: impl Into<Vec2>,
        uv_min: impl Into<Vec2>,
        uv_max: impl Into<Vec2>,
        tint: impl Into<Color>,
    ) -> Result<()> {
        let col = self
            .resolve(tint.into())
            .or_else(|| self.resolve(Color::WHITE))
            .unwrap_or(u32::MAX);
        let (p_min, p_max) = (p_min.into(), p_max.into());
        let (uv_min, uv_max) = (uv_min.into(), uv_max.into());

        self.buffer.push_texture_id(texture);
        let result = self.emit(|buffer| {
            tessellate::image_quad(buffer, p_min, p_max, uv_min, uv_max, col)
        });
        self.buffer.pop_texture_id();
        result
    }

    /// Text through the host's text renderer, mapped like any other primitive.
    pub fn add_text<R: TextRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        position: impl Into<Vec2>,
        text: &str,
        color: impl Into<Color>,
    ) -> Result<()> {
        let Some(col) = self.resolve(color.into()) else {
            return Ok(());
        };
        let position = position.into();
        self.emit(|buffer| renderer.add_text(buffer, position, col, text))
    }

    // -- Clipping --

    /// Push a pixel-space clip rect.
    pub fn push_clip_rect(&mut self, min: impl Into<Vec2>, max: impl Into<Vec2>, intersect: bool) {
        self.buffer.push_clip_rect(min.into(), max.into(), intersect);
    }

    /// Push the pixel-space bounding box of a rect given in local space,
    /// intersected with the current clip rect.
    pub fn push_local_clip_rect(&mut self, min: impl Into<Vec2>, max: impl Into<Vec2>) {
        let (min, max) = (min.into(), max.into());
        let transform = self.current_transform();
        let corners = [min, vec2(max.x, min.y), max, vec2(min.x, max.y)]
            .map(|p| transform.transform_vec2(p));
        let bounds = Rect::bounding(&corners).unwrap_or(Rect::new(min, max));
        self.buffer.push_clip_rect(bounds.min, bounds.max, true);
    }

    pub fn pop_clip_rect(&mut self) {
        if !self.buffer.pop_clip_rect() {
            log::warn!("pop_clip_rect without a matching push");
        }
    }

    pub fn clip_rect(&self) -> Rect {
        self.buffer.clip_rect()
    }

    // -- Snapshots --

    pub fn cmds(&self) -> &[DrawCmd] {
        self.buffer.commands()
    }

    pub fn verts(&self) -> &[DrawVert] {
        self.buffer.vertices()
    }

    pub fn indices(&self) -> &[DrawIdx] {
        self.buffer.indices()
    }

    /// End drawing. Transforms still on the stack are discarded and
    /// reported as [`Error::UnbalancedTransforms`].
    pub fn finish(mut self) -> Result<()> {
        let depth = self.transforms.depth();
        self.transforms.clear();
        if depth > 0 {
            log::warn!("painter finished with {} transforms still pushed", depth);
            return Err(Error::UnbalancedTransforms { depth });
        }
        Ok(())
    }
}

fn pair(what: &'static str, values: &[f64]) -> Result<(f64, f64)> {
    match *values {
        [x, y] => Ok((x, y)),
        _ => Err(Error::InvalidShape {
            what,
            expected: "2 components",
            actual: values.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn approx_eq(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-3 && (a[1] - b[1]).abs() < 1e-3
    }

    struct Frame;

    impl HostFrame for Frame {
        fn plot_to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
            // 2 px per unit on x, 4 px per unit on y (flipped), origin at (100, 300)
            (100.0 + 2.0 * x, 300.0 - 4.0 * y)
        }

        fn window_pos(&self) -> Vec2 {
            vec2(40.0, 20.0)
        }
    }

    #[test]
    fn test_translated_rect() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter.push_transform_parts((5.0, 5.0), 0.0, (1.0, 1.0));
        painter
            .add_rect([0.0, 0.0], [10.0, 10.0], Color::WHITE, Color::UNSET, None)
            .unwrap();
        let pos: Vec<_> = painter.verts().iter().map(|v| v.pos).collect();
        assert_eq!(pos, vec![[5.0, 5.0], [15.0, 5.0], [15.0, 15.0], [5.0, 15.0]]);
    }

    #[test]
    fn test_rect_fill_and_stroke_counts() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter
            .add_rect([0.0, 0.0], [10.0, 10.0], Color::WHITE, Color::BLACK, 2.0)
            .unwrap();
        assert_eq!(painter.verts().len(), 12);
        assert_eq!(painter.indices().len(), 30);
    }

    #[test]
    fn test_unset_colors_emit_nothing() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter
            .add_rect([0.0, 0.0], [1.0, 1.0], Color::UNSET, Color::UNSET, 1.0)
            .unwrap();
        painter.add_line([0.0, 0.0], [1.0, 0.0], Color::UNSET, 1.0).unwrap();
        painter
            .add_circle([0.0, 0.0], 1.0, Color::UNSET, Color::UNSET, None, None)
            .unwrap();
        assert!(painter.verts().is_empty());
    }

    #[test]
    fn test_zero_width_stroke_is_skipped() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter
            .add_rect([0.0, 0.0], [1.0, 1.0], Color::UNSET, Color::BLACK, 0.0)
            .unwrap();
        assert!(painter.verts().is_empty());
    }

    #[test]
    fn test_rotated_line() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter.push_transform(Transform::rotate(FRAC_PI_2));
        painter.add_line([0.0, 0.0], [10.0, 0.0], Color::WHITE, 2.0).unwrap();
        let pos: Vec<_> = painter.verts().iter().map(|v| v.pos).collect();
        assert!(approx_eq(pos[0], [1.0, 0.0]));
        assert!(approx_eq(pos[2], [-1.0, 10.0]));
    }

    #[test]
    fn test_plot_transform() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter.push_plot_transform(&Frame);
        let t = painter.current_transform();
        assert_eq!(t.transform_point(0.0, 0.0), (100.0, 300.0));
        let (x, y) = t.transform_point(1.0, 1.0);
        assert!((x - 102.0).abs() < 1e-6);
        assert!((y - 296.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_then_local_transform() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter.push_window_transform(&Frame);
        painter.push_transform(Transform::scale(2.0));
        painter
            .add_vertices(&[vec2(1.0, 1.0)], Color::WHITE)
            .unwrap();
        assert_eq!(painter.verts()[0].pos, [42.0, 22.0]);
        painter.pop_transform(2).unwrap();
        assert_eq!(painter.transform_depth(), 0);
    }

    #[test]
    fn test_push_transform_slices_checks_arity() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        let err = painter
            .push_transform_slices(&[1.0, 2.0, 3.0], 0.0, &[1.0, 1.0])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidShape {
                what: "translation",
                actual: 3,
                ..
            }
        ));
        assert_eq!(painter.transform_depth(), 0);

        painter.push_transform_slices(&[1.0, 2.0], 0.0, &[3.0, 3.0]).unwrap();
        assert_eq!(painter.current_transform().transform_point(1.0, 1.0), (4.0, 5.0));
    }

    #[test]
    fn test_odd_flat_vertices_rejected() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        assert!(painter.add_vertices_flat(&[1.0, 2.0, 3.0], Color::WHITE).is_err());
        assert!(painter.verts().is_empty());
        painter.add_vertices_flat(&[1.0, 2.0, 3.0, 4.0], Color::WHITE).unwrap();
        assert_eq!(painter.indices(), &[0, 1]);
    }

    #[test]
    fn test_image_uses_texture_command() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter
            .add_rect([0.0, 0.0], [1.0, 1.0], Color::WHITE, Color::UNSET, None)
            .unwrap();
        painter
            .add_image(
                TextureId(3),
                [0.0, 0.0],
                [8.0, 8.0],
                [0.0, 0.0],
                [1.0, 1.0],
                Color::UNSET,
            )
            .unwrap();
        let cmds = painter.cmds();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[1].texture_id, TextureId(3));
        assert_eq!(cmds[1].elem_count, 6);
        assert_eq!(painter.verts()[4].col, 0xFFFF_FFFF);
    }

    #[test]
    fn test_local_clip_rect_is_transformed() {
        let mut buffer = DrawBuffer::new(Rect::from_xywh(0.0, 0.0, 200.0, 200.0));
        let mut painter = Painter::new(&mut buffer);
        painter.push_transform(Transform::translate(10.0, 20.0));
        painter.push_local_clip_rect([0.0, 0.0], [50.0, 50.0]);
        assert_eq!(
            painter.clip_rect(),
            Rect::new(vec2(10.0, 20.0), vec2(60.0, 70.0))
        );
        painter.pop_clip_rect();
        assert_eq!(painter.clip_rect(), Rect::from_xywh(0.0, 0.0, 200.0, 200.0));
    }

    #[test]
    fn test_finish_reports_unbalanced_stack() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter.push_transform(Transform::scale(2.0));
        assert_eq!(
            painter.finish(),
            Err(Error::UnbalancedTransforms { depth: 1 })
        );
    }

    #[test]
    fn test_with_transform_pops() {
        let mut buffer = DrawBuffer::default();
        let mut painter = Painter::new(&mut buffer);
        painter
            .with_transform(Transform::translate(1.0, 0.0), |p| {
                assert_eq!(p.transform_depth(), 1);
                p.add_vertices(&[Vec2::ZERO], Color::WHITE)
            })
            .unwrap();
        assert_eq!(painter.transform_depth(), 0);
        assert_eq!(painter.verts()[0].pos, [1.0, 0.0]);
    }
}
