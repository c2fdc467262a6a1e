//! Strip and fan to triangle-list conversion.
//!
//! GPU APIs accept strip and fan primitive modes, but many mesh
//! pipelines (merging, normal generation, export) only operate on
//! explicit triangle lists. [`to_triangle_list`] re-indexes a
//! [`Geometry`] so that every three consecutive index elements form an
//! independent triangle, preserving vertex data and winding order.

use std::borrow::Cow;

use crate::data::{Geometry, IndexData};
use crate::error::TopologyError;

/// How a flat index sequence is grouped into triangles.
///
/// Discriminants are the WebGL/glTF primitive-mode constants, so raw
/// API values round-trip through [`DrawMode::from_gl_mode`] unchanged.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// Every three index elements form an independent triangle.
    #[default]
    TriangleList = 4,
    /// Each index element forms a triangle with the previous two.
    TriangleStrip = 5,
    /// Each consecutive index pair forms a triangle with the first element.
    TriangleFan = 6,
}

impl DrawMode {
    /// The graphics-API primitive-mode constant for this mode.
    pub fn gl_mode(self) -> u32 {
        self as u32
    }

    /// Map a raw graphics-API primitive-mode constant to a [`DrawMode`].
    ///
    /// Returns `None` for modes outside the triangle family
    /// (points, lines, line strips and loops).
    pub fn from_gl_mode(mode: u32) -> Option<Self> {
        match mode {
            4 => Some(Self::TriangleList),
            5 => Some(Self::TriangleStrip),
            6 => Some(Self::TriangleFan),
            _ => None,
        }
    }
}

impl Geometry {
    /// Attach the identity index `[0, 1, ..., n-1]` where `n` is the
    /// `position` attribute's row count, replacing any existing index.
    ///
    /// The element width follows the position count: `Uint32` above
    /// `u16::MAX` rows, `Uint16` otherwise.
    ///
    /// # Errors
    ///
    /// [`TopologyError::MissingPositionAttribute`] when the geometry
    /// has no `position` attribute to take the row count from.
    pub fn generate_sequential_index(&mut self) -> Result<(), TopologyError> {
        let position = self
            .position()
            .ok_or(TopologyError::MissingPositionAttribute)?;
        let count = position.count();

        let values: Vec<u32> = (0..count as u32).collect();
        self.set_index(IndexData::from_values(&values, count));
        Ok(())
    }
}

/// Convert a geometry's topology to an explicit triangle list.
///
/// - `TriangleList` input is returned as `Cow::Borrowed` untouched —
///   the identity case allocates nothing.
/// - Strip and fan input produce a `Cow::Owned` clone whose index is a
///   newly built triangle list. The clone's index width follows the
///   `position` row count (`Uint32` above `u16::MAX` rows).
///
/// A non-indexed input gains a sequential index in place before
/// re-expansion; this is the one documented mutation of the caller's
/// geometry. Use [`to_triangle_list_cloned`] to avoid it.
///
/// This function never fails. A non-indexed geometry without a
/// `position` attribute, and a source index too short to form a
/// triangle, are both logged via `log::error!` and answered with a
/// best-effort result (the input itself, or a clone with an empty
/// index).
pub fn to_triangle_list(geometry: &mut Geometry, draw_mode: DrawMode) -> Cow<'_, Geometry> {
    if draw_mode == DrawMode::TriangleList {
        return Cow::Borrowed(geometry);
    }

    if !geometry.is_indexed() {
        if let Err(err) = geometry.generate_sequential_index() {
            log::error!("{err}");
            return Cow::Borrowed(geometry);
        }
    }

    let index = match geometry.index() {
        Some(index) => index,
        // generate_sequential_index attached one above
        None => return Cow::Borrowed(geometry),
    };

    let number_of_triangles = index.len() as i64 - 2;

    let new_indices = match draw_mode {
        DrawMode::TriangleStrip => strip_indices(index, number_of_triangles),
        DrawMode::TriangleFan => fan_indices(index, number_of_triangles),
        DrawMode::TriangleList => return Cow::Borrowed(geometry),
    };

    // Sanity check against future mode-specific logic errors, not user
    // input; fires for degenerate counts below 2 as well.
    let produced = (new_indices.len() / 3) as i64;
    if produced != number_of_triangles {
        log::error!(
            "{}",
            TopologyError::TriangleCountMismatch {
                expected: number_of_triangles,
                produced,
            }
        );
    }

    let vertex_count = match geometry.position() {
        Some(position) => position.count(),
        // No position row count to pick the width from; size for the
        // largest index actually referenced.
        None => new_indices.iter().max().map_or(0, |&m| m as usize + 1),
    };

    let mut converted = geometry.clone();
    converted.set_index(IndexData::from_values(&new_indices, vertex_count));
    Cow::Owned(converted)
}

/// Non-mutating variant of [`to_triangle_list`].
///
/// Clones up front so the caller's geometry is never touched, at the
/// cost of the identity case also returning a fresh clone.
pub fn to_triangle_list_cloned(geometry: &Geometry, draw_mode: DrawMode) -> Geometry {
    let mut owned = geometry.clone();
    to_triangle_list(&mut owned, draw_mode).into_owned()
}

/// Expand a triangle strip index into independent triangles.
///
/// Strips alternate winding by construction; swapping the first two
/// vertices on odd triangles restores a uniform face orientation.
fn strip_indices(index: &IndexData, number_of_triangles: i64) -> Vec<u32> {
    let mut out = Vec::with_capacity(number_of_triangles.max(0) as usize * 3);
    for i in 0..number_of_triangles.max(0) as usize {
        if i % 2 == 0 {
            out.push(index.get(i));
            out.push(index.get(i + 1));
        } else {
            out.push(index.get(i + 1));
            out.push(index.get(i));
        }
        out.push(index.get(i + 2));
    }
    out
}

/// Expand a triangle fan index into independent triangles.
///
/// Every triangle shares `index[0]` as the fan's apex.
fn fan_indices(index: &IndexData, number_of_triangles: i64) -> Vec<u32> {
    let mut out = Vec::with_capacity(number_of_triangles.max(0) as usize * 3);
    for i in 1..=number_of_triangles.max(0) as usize {
        out.push(index.get(0));
        out.push(index.get(i));
        out.push(index.get(i + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BufferAttribute, IndexFormat, POSITION};
    use std::sync::Mutex;

    fn indexed_geometry(vertex_count: usize, indices: Vec<u16>) -> Geometry {
        Geometry::new()
            .with_attribute(
                POSITION,
                BufferAttribute::new(vec![0.0; vertex_count * 3], 3),
            )
            .with_index(IndexData::U16(indices))
    }

    fn triangles(geometry: &Geometry) -> Vec<[u32; 3]> {
        let flat = geometry.index().unwrap().to_u32_vec();
        flat.chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect()
    }

    #[test]
    fn test_list_mode_is_identity() {
        let mut geometry = indexed_geometry(5, vec![0, 1, 2, 3, 4]);
        let before = geometry.clone();

        let result = to_triangle_list(&mut geometry, DrawMode::TriangleList);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(*result, before);
        assert_eq!(geometry, before);
    }

    #[test]
    fn test_strip_conversion() {
        let mut geometry = indexed_geometry(5, vec![0, 1, 2, 3, 4]);
        let result = to_triangle_list(&mut geometry, DrawMode::TriangleStrip);

        assert!(matches!(result, Cow::Owned(_)));
        assert_eq!(
            triangles(&result),
            vec![[0, 1, 2], [2, 1, 3], [2, 3, 4]],
        );
    }

    #[test]
    fn test_fan_conversion() {
        let mut geometry = indexed_geometry(5, vec![0, 1, 2, 3, 4]);
        let result = to_triangle_list(&mut geometry, DrawMode::TriangleFan);

        assert_eq!(
            triangles(&result),
            vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]],
        );
    }

    #[test]
    fn test_strip_preserves_vertex_data() {
        let mut geometry = Geometry::new()
            .with_attribute(
                POSITION,
                BufferAttribute::new((0..12).map(|v| v as f32).collect(), 3),
            )
            .with_index(IndexData::U16(vec![0, 1, 2, 3]));
        let expected_position = geometry.position().unwrap().clone();

        let result = to_triangle_list(&mut geometry, DrawMode::TriangleStrip);
        assert_eq!(result.position(), Some(&expected_position));
        assert_eq!(result.index().unwrap().len(), 6);
    }

    #[test]
    fn test_sequential_index_synthesis_mutates_input() {
        let mut geometry = Geometry::new().with_attribute(
            POSITION,
            BufferAttribute::new(vec![0.0; 4 * 3], 3),
        );

        let result = to_triangle_list(&mut geometry, DrawMode::TriangleFan);
        assert_eq!(result.index().unwrap().len(), 6);

        // The input itself gained the identity index.
        assert_eq!(
            geometry.index().unwrap().to_u32_vec(),
            vec![0, 1, 2, 3],
        );
    }

    #[test]
    fn test_generate_sequential_index_without_position() {
        let mut geometry = Geometry::new();
        assert_eq!(
            geometry.generate_sequential_index(),
            Err(TopologyError::MissingPositionAttribute),
        );
        assert!(!geometry.is_indexed());
    }

    #[test]
    fn test_triangle_count_invariant() {
        for count in 2..20usize {
            let indices: Vec<u16> = (0..count as u16).collect();
            let mut geometry = indexed_geometry(count, indices);
            let result = to_triangle_list(&mut geometry, DrawMode::TriangleStrip);
            assert_eq!(result.index().unwrap().len(), 3 * (count - 2));
        }
    }

    #[test]
    fn test_width_selection() {
        let mut narrow = indexed_geometry(5, vec![0, 1, 2, 3, 4]);
        let result = to_triangle_list(&mut narrow, DrawMode::TriangleStrip);
        assert_eq!(result.index().unwrap().format(), IndexFormat::Uint16);

        // Non-indexed path so the source index is synthesized too.
        let mut wide = Geometry::new().with_attribute(
            POSITION,
            BufferAttribute::new(vec![0.0; 65536], 1),
        );
        let result = to_triangle_list(&mut wide, DrawMode::TriangleFan);
        assert_eq!(result.index().unwrap().format(), IndexFormat::Uint32);
        assert_eq!(result.index().unwrap().len(), 3 * 65534);
    }

    #[test]
    fn test_cloned_variant_leaves_input_untouched() {
        let geometry = Geometry::new().with_attribute(
            POSITION,
            BufferAttribute::new(vec![0.0; 4 * 3], 3),
        );

        let result = to_triangle_list_cloned(&geometry, DrawMode::TriangleFan);
        assert_eq!(result.index().unwrap().len(), 6);
        assert!(!geometry.is_indexed());
    }

    #[test]
    fn test_draw_mode_constants() {
        assert_eq!(DrawMode::TriangleList.gl_mode(), 4);
        assert_eq!(DrawMode::TriangleStrip.gl_mode(), 5);
        assert_eq!(DrawMode::TriangleFan.gl_mode(), 6);

        assert_eq!(DrawMode::from_gl_mode(4), Some(DrawMode::TriangleList));
        assert_eq!(DrawMode::from_gl_mode(5), Some(DrawMode::TriangleStrip));
        assert_eq!(DrawMode::from_gl_mode(6), Some(DrawMode::TriangleFan));
        assert_eq!(DrawMode::from_gl_mode(0), None);
        assert_eq!(DrawMode::from_gl_mode(7), None);
    }

    // -----------------------------------------------------------------
    // Diagnostics capture
    // -----------------------------------------------------------------

    struct CaptureLogger;

    static MESSAGES: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static LOGGER: CaptureLogger = CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            MESSAGES.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_diagnostics_are_logged_not_fatal() {
        // Sole owner of the global logger within this test binary.
        log::set_logger(&LOGGER).expect("another test installed a logger");
        log::set_max_level(log::LevelFilter::Error);

        let logged_since = |start: usize, needle: &str| {
            MESSAGES.lock().unwrap()[start..]
                .iter()
                .any(|m| m == needle)
        };

        // Missing position: input returned unchanged, error logged.
        let start = MESSAGES.lock().unwrap().len();
        let mut bare = Geometry::new();
        let result = to_triangle_list(&mut bare, DrawMode::TriangleStrip);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(!result.is_indexed());
        assert!(logged_since(
            start,
            "Undefined position attribute. Processing not possible."
        ));

        // Index count below 2: zero triangles produced, mismatch logged,
        // result still returned.
        let start = MESSAGES.lock().unwrap().len();
        let mut degenerate = indexed_geometry(1, vec![0]);
        let result = to_triangle_list(&mut degenerate, DrawMode::TriangleStrip);
        assert!(result.index().unwrap().is_empty());
        assert!(logged_since(
            start,
            "Unable to generate correct amount of triangles."
        ));

        // A two-element index produces zero triangles without complaint.
        let start = MESSAGES.lock().unwrap().len();
        let mut two = indexed_geometry(2, vec![0, 1]);
        let result = to_triangle_list(&mut two, DrawMode::TriangleFan);
        assert!(result.index().unwrap().is_empty());
        assert!(!logged_since(
            start,
            "Unable to generate correct amount of triangles."
        ));
    }
}
