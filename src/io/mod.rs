// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of functions for writing analysis results.

pub mod csv;
