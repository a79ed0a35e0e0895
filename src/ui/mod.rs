// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the comparison viewer.

pub mod toolbar;
pub mod transport;
pub mod viewer;
