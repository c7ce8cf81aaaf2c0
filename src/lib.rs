//! Geometry, transform and spatial-index core for a vector whiteboard.
//!
//! Everything here is synchronous and single-threaded: pure functions over
//! element records plus one stateful object, the quad-tree
//! [`spatial::SpatialIndex`], owned by whichever controller drives input.
//! Transform engines never mutate elements; they return sparse
//! [`doc::PartialElement`] updates for the caller to apply.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller [`engine::EngineCore`] and its [`engine::Action`]s |
//! | [`doc`] | Element records, sparse updates and the in-memory store |
//! | [`camera`] | Points, rectangles and the pan/zoom camera |
//! | [`grid`] | Grid settings, snapping and grid-line enumeration |
//! | [`handles`] | Single-element resize and rotation handles |
//! | [`rotate`] | Pointer-driven rotation with 15° snapping |
//! | [`selection`] | Multi-selection bounds and group resize/rotation |
//! | [`spatial`] | Quad-tree spatial index |
//! | [`hit`] | Precise hit-testing on top of the index |
//! | [`placement`] | Finding free space for new elements |
//! | [`input`] | Modifier keys and the gesture state machine |
//! | [`config`] | Environment configuration and its errors |
//! | [`consts`] | Shared numeric constants (handle sizes, tolerances, minimum sizes) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod grid;
pub mod handles;
pub mod hit;
pub mod input;
pub mod placement;
pub mod rotate;
pub mod selection;
pub mod spatial;
