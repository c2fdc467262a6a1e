//! # trilist
//!
//! Strip and fan to triangle-list topology conversion for indexed meshes.
//!
//! GPU APIs draw from strip and fan encodings directly, but mesh
//! processing pipelines usually want an explicit triangle list. This
//! crate provides the one transformation that bridges the two:
//! [`to_triangle_list`] re-indexes a [`Geometry`] so that every three
//! consecutive index elements form an independent triangle, preserving
//! vertex data and winding order.
//!
//! ```
//! use trilist::{generators::generate_fan_disc, to_triangle_list, DrawMode};
//!
//! let mut disc = generate_fan_disc(16);
//! let list = to_triangle_list(&mut disc, DrawMode::TriangleFan);
//! assert_eq!(list.index().unwrap().len(), 16 * 3);
//! ```
//!
//! Diagnostics are reported through the `log` facade and never abort
//! the conversion; see [`TopologyError`] for the two conditions.

mod data;
mod error;
pub mod generators;
mod topology;

pub use data::{BufferAttribute, Geometry, IndexData, IndexFormat, POSITION};
pub use error::TopologyError;
pub use topology::{to_triangle_list, to_triangle_list_cloned, DrawMode};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
