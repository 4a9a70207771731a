//! Local-space tessellation of every built-in primitive.
//!
//! Each function reserves exactly the vertices and indices its primitive
//! needs and fills them in untransformed coordinates. Degenerate input is
//! skipped: nothing is reserved, the skip is logged at `debug` level and
//! counted in the draw stats.

use std::f64::consts::TAU;

use crate::config::LineCap;
use crate::draw_stats;
use crate::error::Result;
use crate::geometry::{vec2, Vec2};

use super::buffer::DrawBuffer;

/// Two triangles over a quad `0,1,2,3`.
const QUAD_INDICES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Outer ring is 0..4, inner ring is 4..8; two triangles per side.
const RECT_STROKE_INDICES: [usize; 24] = [
    0, 4, 1, 1, 4, 5, 1, 5, 2, 5, 6, 2, 6, 7, 2, 7, 3, 2, 4, 3, 7, 0, 3, 4,
];

pub(crate) fn skip(what: &str, reason: &str) -> Result<()> {
    log::debug!("skipping degenerate {}: {}", what, reason);
    draw_stats::record_skipped();
    Ok(())
}

fn emitted(what: &str, vertices: usize, indices: usize) {
    log::trace!("{}: {} vertices, {} indices", what, vertices, indices);
    draw_stats::record_primitive(vertices, indices);
}

/// A point set: one vertex per point and an identity index map.
pub fn points(buffer: &mut DrawBuffer, points: &[Vec2], col: u32) -> Result<()> {
    if points.is_empty() {
        return Ok(());
    }
    if !points.iter().all(|p| p.is_finite()) {
        return skip("point set", "non-finite position");
    }

    let uv = buffer.white_pixel_uv();
    let mut w = buffer.reserve(points.len(), points.len())?;
    for (i, p) in points.iter().enumerate() {
        w.vertex(i, *p, uv, col);
        w.index(i, i);
    }
    emitted("points", points.len(), points.len());
    Ok(())
}

/// A straight line of `width` from `p0` to `p1` as a single quad.
pub fn line(
    buffer: &mut DrawBuffer,
    p0: Vec2,
    p1: Vec2,
    col: u32,
    width: f32,
    cap: LineCap,
) -> Result<()> {
    if !(p0.is_finite() && p1.is_finite() && width.is_finite()) {
        return skip("line", "non-finite input");
    }
    let Some(dir) = (p1 - p0).normalized() else {
        return skip("line", "zero length");
    };

    let half = width * 0.5;
    let ortho = dir.perp() * half;
    let ext = match cap {
        LineCap::Butt => Vec2::ZERO,
        LineCap::Square => dir * half,
    };
    let corners = [
        p0 - ext - ortho,
        p0 - ext + ortho,
        p1 + ext + ortho,
        p1 + ext - ortho,
    ];

    quad(buffer, &corners, None, col)?;
    emitted("line", 4, 6);
    Ok(())
}

/// A filled axis-aligned rect.
pub fn rect_fill(buffer: &mut DrawBuffer, min: Vec2, max: Vec2, col: u32) -> Result<()> {
    if !(min.is_finite() && max.is_finite()) {
        return skip("rect", "non-finite corner");
    }
    let corners = [min, vec2(max.x, min.y), max, vec2(min.x, max.y)];
    quad(buffer, &corners, None, col)?;
    emitted("rect fill", 4, 6);
    Ok(())
}

/// The outline of an axis-aligned rect, centred on its edges.
pub fn rect_stroke(
    buffer: &mut DrawBuffer,
    min: Vec2,
    max: Vec2,
    col: u32,
    width: f32,
) -> Result<()> {
    if !(min.is_finite() && max.is_finite() && width.is_finite()) {
        return skip("rect stroke", "non-finite input");
    }

    let h = width * 0.5;
    let (omin, omax) = (min - Vec2::splat(h), max + Vec2::splat(h));
    let (imin, imax) = (min + Vec2::splat(h), max - Vec2::splat(h));
    let ring = [
        omin,
        vec2(omax.x, omin.y),
        omax,
        vec2(omin.x, omax.y),
        imin,
        vec2(imax.x, imin.y),
        imax,
        vec2(imin.x, imax.y),
    ];

    let uv = buffer.white_pixel_uv();
    let mut w = buffer.reserve(ring.len(), RECT_STROKE_INDICES.len())?;
    for (i, p) in ring.iter().enumerate() {
        w.vertex(i, *p, uv, col);
    }
    for (i, local) in RECT_STROKE_INDICES.iter().enumerate() {
        w.index(i, *local);
    }
    emitted("rect stroke", ring.len(), RECT_STROKE_INDICES.len());
    Ok(())
}

fn check_ngon(center: Vec2, radius: Vec2, segments: u32) -> Option<&'static str> {
    if !(center.is_finite() && radius.is_finite()) {
        Some("non-finite input")
    } else if segments < 3 {
        Some("fewer than 3 segments")
    } else if radius.x == 0.0 && radius.y == 0.0 {
        Some("zero radius")
    } else {
        None
    }
}

fn perimeter(center: Vec2, radius: Vec2, i: u32, segments: u32) -> Vec2 {
    let angle = TAU * i as f64 / segments as f64;
    let (sin, cos) = angle.sin_cos();
    vec2(
        center.x + (cos * radius.x as f64) as f32,
        center.y + (sin * radius.y as f64) as f32,
    )
}

/// A filled ellipse approximated by a regular n-gon, fanned from its centre.
pub fn ngon_fill(
    buffer: &mut DrawBuffer,
    center: Vec2,
    radius: Vec2,
    col: u32,
    segments: u32,
) -> Result<()> {
    if let Some(reason) = check_ngon(center, radius, segments) {
        return skip("ngon fill", reason);
    }

    let n = segments as usize;
    let uv = buffer.white_pixel_uv();
    let mut w = buffer.reserve(n + 1, n * 3)?;
    w.vertex(0, center, uv, col);
    for i in 0..n {
        w.vertex(i + 1, perimeter(center, radius, i as u32, segments), uv, col);
        let next = if i + 1 == n { 1 } else { i + 2 };
        w.triangle(i, 0, i + 1, next);
    }
    emitted("ngon fill", n + 1, n * 3);
    Ok(())
}

/// The outline of an n-gon ellipse, `width` wide and centred on the perimeter.
pub fn ngon_stroke(
    buffer: &mut DrawBuffer,
    center: Vec2,
    radius: Vec2,
    col: u32,
    width: f32,
    segments: u32,
) -> Result<()> {
    if !width.is_finite() {
        return skip("ngon stroke", "non-finite width");
    }
    if let Some(reason) = check_ngon(center, radius, segments) {
        return skip("ngon stroke", reason);
    }

    let n = segments as usize;
    let h = Vec2::splat(width * 0.5);
    let (inner, outer) = (radius - h, radius + h);
    let uv = buffer.white_pixel_uv();
    let mut w = buffer.reserve(n * 2, n * 6)?;
    for i in 0..n {
        // Even slots hold the inner ring, odd slots the outer ring.
        w.vertex(2 * i, perimeter(center, inner, i as u32, segments), uv, col);
        w.vertex(2 * i + 1, perimeter(center, outer, i as u32, segments), uv, col);

        let next = (i + 1) % n;
        w.triangle(2 * i, 2 * i, 2 * i + 1, 2 * next + 1);
        w.triangle(2 * i + 1, 2 * i, 2 * next + 1, 2 * next);
    }
    emitted("ngon stroke", n * 2, n * 6);
    Ok(())
}

/// A textured quad from `p_min` to `p_max` sampling `uv_min..uv_max`.
pub fn image_quad(
    buffer: &mut DrawBuffer,
    p_min: Vec2,
    p_max: Vec2,
    uv_min: Vec2,
    uv_max: Vec2,
    col: u32,
) -> Result<()> {
    if !(p_min.is_finite() && p_max.is_finite()) {
        return skip("image", "non-finite corner");
    }
    let corners = [p_min, vec2(p_max.x, p_min.y), p_max, vec2(p_min.x, p_max.y)];
    let uvs = [
        uv_min.to_array(),
        [uv_max.x, uv_min.y],
        uv_max.to_array(),
        [uv_min.x, uv_max.y],
    ];
    quad(buffer, &corners, Some(&uvs), col)?;
    emitted("image", 4, 6);
    Ok(())
}

fn quad(
    buffer: &mut DrawBuffer,
    corners: &[Vec2; 4],
    uvs: Option<&[[f32; 2]; 4]>,
    col: u32,
) -> Result<()> {
    let white = buffer.white_pixel_uv();
    let mut w = buffer.reserve(4, 6)?;
    for (i, p) in corners.iter().enumerate() {
        let uv = uvs.map_or(white, |uvs| uvs[i]);
        w.vertex(i, *p, uv, col);
    }
    for (i, local) in QUAD_INDICES.iter().enumerate() {
        w.index(i, *local);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(buffer: &DrawBuffer) -> Vec<Vec2> {
        buffer.vertices().iter().map(|v| Vec2::from(v.pos)).collect()
    }

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_points_identity_indices() {
        let mut buffer = DrawBuffer::default();
        points(&mut buffer, &[vec2(1.0, 1.0), vec2(2.0, 2.0), vec2(3.0, 3.0)], 7).unwrap();
        assert_eq!(buffer.vertex_cursor(), 3);
        assert_eq!(buffer.indices(), &[0, 1, 2]);
        assert!(buffer.vertices().iter().all(|v| v.col == 7));
    }

    #[test]
    fn test_line_butt() {
        let mut buffer = DrawBuffer::default();
        line(&mut buffer, Vec2::ZERO, vec2(10.0, 0.0), 1, 2.0, LineCap::Butt).unwrap();
        assert_eq!(
            positions(&buffer),
            vec![vec2(0.0, -1.0), vec2(0.0, 1.0), vec2(10.0, 1.0), vec2(10.0, -1.0)]
        );
        assert_eq!(buffer.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_line_square_cap_extends() {
        let mut buffer = DrawBuffer::default();
        line(&mut buffer, Vec2::ZERO, vec2(10.0, 0.0), 1, 2.0, LineCap::Square).unwrap();
        let p = positions(&buffer);
        assert_eq!(p[0], vec2(-1.0, -1.0));
        assert_eq!(p[2], vec2(11.0, 1.0));
    }

    #[test]
    fn test_zero_length_line_is_skipped() {
        let mut buffer = DrawBuffer::default();
        line(&mut buffer, vec2(3.0, 3.0), vec2(3.0, 3.0), 1, 2.0, LineCap::Butt).unwrap();
        assert_eq!(buffer.vertex_cursor(), 0);
        assert!(buffer.indices().is_empty());
    }

    #[test]
    fn test_rect_stroke_rings() {
        let mut buffer = DrawBuffer::default();
        rect_stroke(&mut buffer, Vec2::ZERO, vec2(10.0, 10.0), 1, 2.0).unwrap();
        let p = positions(&buffer);
        assert_eq!(p.len(), 8);
        assert_eq!(buffer.indices().len(), 24);
        assert_eq!(p[0], vec2(-1.0, -1.0));
        assert_eq!(p[2], vec2(11.0, 11.0));
        assert_eq!(p[4], vec2(1.0, 1.0));
        assert_eq!(p[6], vec2(9.0, 9.0));
    }

    #[test]
    fn test_ngon_fill_fan() {
        let mut buffer = DrawBuffer::default();
        ngon_fill(&mut buffer, vec2(5.0, 5.0), Vec2::splat(5.0), 1, 8).unwrap();
        assert_eq!(buffer.vertex_cursor(), 9);
        assert_eq!(buffer.indices().len(), 24);

        let p = positions(&buffer);
        assert_eq!(p[0], vec2(5.0, 5.0));
        assert!(approx_eq(p[1], vec2(10.0, 5.0)));
        assert!(approx_eq(p[3], vec2(5.0, 10.0)));
        // Last triangle closes back to the first perimeter vertex.
        assert_eq!(&buffer.indices()[21..], &[0, 8, 1]);
    }

    #[test]
    fn test_ngon_stroke_rings() {
        let mut buffer = DrawBuffer::default();
        ngon_stroke(&mut buffer, Vec2::ZERO, Vec2::splat(10.0), 1, 2.0, 4).unwrap();
        assert_eq!(buffer.vertex_cursor(), 8);
        assert_eq!(buffer.indices().len(), 24);

        let p = positions(&buffer);
        assert!(approx_eq(p[0], vec2(9.0, 0.0)));
        assert!(approx_eq(p[1], vec2(11.0, 0.0)));
        // Last quad wraps to the first ring pair.
        assert_eq!(&buffer.indices()[18..], &[6, 7, 1, 6, 1, 0]);
    }

    #[test]
    fn test_degenerate_ngons_are_skipped() {
        let mut buffer = DrawBuffer::default();
        ngon_fill(&mut buffer, Vec2::ZERO, Vec2::splat(5.0), 1, 2).unwrap();
        ngon_fill(&mut buffer, Vec2::ZERO, Vec2::ZERO, 1, 16).unwrap();
        ngon_stroke(&mut buffer, vec2(f32::NAN, 0.0), Vec2::splat(5.0), 1, 1.0, 16).unwrap();
        assert_eq!(buffer.vertex_cursor(), 0);
    }

    #[test]
    fn test_image_quad_uvs() {
        let mut buffer = DrawBuffer::default();
        image_quad(
            &mut buffer,
            Vec2::ZERO,
            vec2(4.0, 2.0),
            Vec2::ZERO,
            Vec2::ONE,
            0xFFFF_FFFF,
        )
        .unwrap();
        let v = buffer.vertices();
        assert_eq!(v[1].uv, [1.0, 0.0]);
        assert_eq!(v[3].uv, [0.0, 1.0]);
        assert_eq!(v[2].pos, [4.0, 2.0]);
    }

    #[test]
    fn test_indices_stay_below_cursor() {
        let mut buffer = DrawBuffer::default();
        rect_fill(&mut buffer, Vec2::ZERO, Vec2::ONE, 1).unwrap();
        ngon_stroke(&mut buffer, Vec2::ZERO, Vec2::splat(3.0), 1, 1.0, 12).unwrap();
        line(&mut buffer, Vec2::ZERO, Vec2::ONE, 1, 1.0, LineCap::Butt).unwrap();
        let cursor = buffer.vertex_cursor() as u32;
        assert!(buffer.indices().iter().all(|&i| i < cursor));
    }
}
