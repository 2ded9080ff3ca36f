// SPDX-License-Identifier: MIT OR Apache-2.0
//! Camera rail engine.
//!
//! This crate owns the data side of a camera path:
//! - Ordered control points (position + orientation)
//! - Deterministic `t -> pose` evaluation (linear position, shortest-path slerp)
//! - Plain-data snapshots and the JSON export record
//! - Playback of progress over time
//!
//! ## Architecture
//!
//! [`CameraRail`] is the single source of truth. Everything that leaves the
//! rail (snapshots, documents, poses) is a value copy; ids, not references,
//! are the stable handle to a point.

pub mod control_point;
pub mod document;
pub mod error;
pub mod math;
pub mod playback;
pub mod rail;

pub use control_point::{
    CameraPose, ControlPoint, ControlPointData, InterpolationMode, PointId, QuatData, Vec3Data,
};
pub use document::{RailData, RailDocument, SceneReference, DOCUMENT_VERSION};
pub use error::{RailError, Result};
pub use math::Interpolation;
pub use playback::{PlaybackController, PlaybackState};
pub use rail::CameraRail;
