// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Small functions for testing purposes.
