// SPDX-License-Identifier: MIT OR Apache-2.0
//! Camera rail editor.
//!
//! Pointer-driven authoring of camera rails in a 3D viewport:
//! - Create mode: one click places a control point on a camera-facing plane
//! - Select mode: drag a point's body to move it, its direction indicator to turn it
//! - Point list commands (delete, select, reorder) over a channel
//! - Rail documents and editor settings on disk
//!
//! ## Architecture
//!
//! The editor never renders anything itself. It reads a [`ViewCamera`],
//! consumes [`PointerEvent`]s, mutates the rail held by [`EditorState`],
//! and pushes every change through a [`VisualSync`] implementation.

pub mod camera;
pub mod commands;
pub mod error;
pub mod interaction;
pub mod picking;
pub mod project;
pub mod state;
pub mod visuals;

pub use camera::{EditorCamera, ViewCamera};
pub use commands::{CommandQueue, CommandSender, RailCommand};
pub use error::{EditorError, Result};
pub use interaction::{look_rotation, DragState, PointerButton, PointerEvent, RailInteraction};
pub use picking::{DragPlane, Ray, Viewport};
pub use project::{EditorSettings, SETTINGS_FILE_NAME};
pub use state::{EditorEvent, EditorMode, EditorState};
pub use visuals::{HandleHit, HandlePart, PointHandle, RailVisuals, SyncStats, VisualSync};
