// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor data model.

pub mod layer;
pub mod session;
pub mod text;
