// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of various structures used in the `correlation_rs` library.

pub mod atom;
pub mod element;
pub mod lattice;
pub mod position;
pub mod vector3d;
