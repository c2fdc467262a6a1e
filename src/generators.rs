//! Geometry generators for strip and fan encoded shapes.
//!
//! These produce [`Geometry`] values whose index is ordered for a
//! non-list draw mode, as a GPU-efficient encoder would emit them.
//! They are the natural inputs for [`to_triangle_list`] in tests,
//! benches, and downstream demos.
//!
//! [`to_triangle_list`]: crate::to_triangle_list

use std::f32::consts::PI;

use crate::data::{BufferAttribute, Geometry, IndexData, POSITION};

/// Generate a flat ribbon on the XZ plane encoded as one triangle strip.
///
/// The ribbon is `quads` unit quads long and one unit wide, with two
/// rail vertices per column: `2 * (quads + 1)` vertices and the same
/// number of strip indices, expanding to `2 * quads` triangles.
///
/// # Arguments
///
/// * `quads` - Number of quads along the ribbon (at least 1)
pub fn generate_strip_ribbon(quads: u32) -> Geometry {
    let columns = quads + 1;
    let mut positions = Vec::with_capacity(columns as usize * 2 * 3);
    let mut indices = Vec::with_capacity(columns as usize * 2);

    for column in 0..columns {
        let x = column as f32;
        // Near rail then far rail, the zig-zag order a strip expects.
        positions.extend_from_slice(&[x, 0.0, 0.0]);
        positions.extend_from_slice(&[x, 0.0, 1.0]);
        indices.push(column * 2);
        indices.push(column * 2 + 1);
    }

    let vertex_count = columns as usize * 2;
    Geometry::new()
        .with_attribute(POSITION, BufferAttribute::new(positions, 3))
        .with_index(IndexData::from_values(&indices, vertex_count))
}

/// Generate a unit disc on the XY plane encoded as a triangle fan.
///
/// The apex sits at the origin with `segments + 1` rim vertices around
/// it (the first rim vertex repeated to close the disc): `segments + 2`
/// fan indices expanding to `segments` triangles.
///
/// # Arguments
///
/// * `segments` - Number of pie slices (at least 3 for a closed disc)
pub fn generate_fan_disc(segments: u32) -> Geometry {
    let mut positions = Vec::with_capacity((segments as usize + 2) * 3);
    let mut indices = Vec::with_capacity(segments as usize + 2);

    positions.extend_from_slice(&[0.0, 0.0, 0.0]);
    indices.push(0);

    for segment in 0..=segments {
        let phi = segment as f32 * 2.0 * PI / segments as f32;
        positions.extend_from_slice(&[phi.cos(), phi.sin(), 0.0]);
        indices.push(segment + 1);
    }

    let vertex_count = segments as usize + 2;
    Geometry::new()
        .with_attribute(POSITION, BufferAttribute::new(positions, 3))
        .with_index(IndexData::from_values(&indices, vertex_count))
}
