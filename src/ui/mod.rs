// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the image text editor.

pub mod canvas;
pub mod properties;
pub mod status;
pub mod toolbar;
