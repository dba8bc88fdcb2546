#![forbid(unsafe_code)]

//! Render a two-day conference schedule as a single SVG board.
//!
//! The pipeline runs once, in one direction:
//!
//! 1. [`DataSet::load`] reads the schedule, sessions and speakers documents.
//! 2. [`assemble_talks`] joins slots with sessions and speakers into [`Talk`]s.
//! 3. [`layout`] places each day's talks on a room × compressed-time grid.
//! 4. [`build_board`] turns the layout into an [`SvgNode`] tree.
//! 5. [`render_svg`] serializes the tree, inlining photos from a [`PhotoStore`].
//!
//! [`pipeline::run`] does all of it and writes the file.

pub mod assets;
pub mod board;
pub mod config;
pub mod error;
pub mod layout;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod svg;
pub mod talks;

pub use assets::{EmbeddedImage, PhotoStore, normalize_rel_path};
pub use board::build_board;
pub use config::BoardConfig;
pub use error::{GridError, GridResult};
pub use layout::{ALL_ROOMS, Rect, RoomOrder, TimeScale};
pub use loader::{DataFiles, DataSet};
pub use model::{Speaker, Talk};
pub use pipeline::{RenderJob, RenderSummary, render_board, run};
pub use svg::{GroupTransform, SvgNode, render_svg};
pub use talks::assemble_talks;
