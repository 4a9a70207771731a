//! In-place transform post-pass over freshly emitted vertices.

use crate::draw_stats;
use crate::transform::Transform;

use super::buffer::DrawBuffer;

/// Map every vertex in `[start, cursor)` through `transform`.
///
/// Positions are lifted to `f64`, transformed and narrowed again. A `None`
/// transform (empty stack) or an empty range leaves the buffer untouched.
pub fn apply_transform(buffer: &mut DrawBuffer, start: usize, transform: Option<&Transform>) {
    let Some(transform) = transform else {
        return;
    };
    let vertices = buffer.vertices_from_mut(start);
    if vertices.is_empty() {
        return;
    }

    for v in vertices.iter_mut() {
        let (x, y) = transform.transform_point(v.pos[0] as f64, v.pos[1] as f64);
        v.pos = [x as f32, y as f32];
    }
    draw_stats::record_transformed(vertices.len());
}
