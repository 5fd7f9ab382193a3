// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! CPU rendering of the canvas object graph.

pub mod compose;
pub mod text;
