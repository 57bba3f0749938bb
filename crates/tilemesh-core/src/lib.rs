#![forbid(unsafe_code)]

//! Core: geometry primitives and pointer input types.
//!
//! # Role in tilemesh
//! `tilemesh-core` holds the value types shared by the engine and its hosts:
//! points, sizes, rectangles, the [`geometry::Axis`]/[`geometry::Edge`]
//! lookup enums, and the [`event::PointerEvent`] a host feeds to a mesh.
//!
//! # How it fits in the system
//! `tilemesh-layout` builds the partition model and gesture solvers on top of
//! these types. Nothing here has side effects.

pub mod event;
pub mod geometry;
