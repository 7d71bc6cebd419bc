//! Core 2-D procedural tree generation library.
//!
//! Main components:
//! - [`segment`] — immutable branch segments with derived length and heading.
//! - [`config`] — the parameter set that drives a generation run.
//! - [`interp`] — linear ramps over normalized depth.
//! - [`growth`] — single growth rounds (fork decision, child construction).
//! - [`tree`] — the growth engine folding rounds into a full tree.
//! - [`render`] — the painter capability used to draw a tree.
//! - [`error`] — errors raised while loading a parameter set.
//! - [`types`] — shared type aliases.

pub mod config;
pub mod error;
pub mod growth;
pub mod interp;
pub mod render;
pub mod segment;
pub mod tree;
pub mod types;
