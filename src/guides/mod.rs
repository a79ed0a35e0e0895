// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Swing-plane guide drawing.

pub mod canvas;
pub mod geometry;
