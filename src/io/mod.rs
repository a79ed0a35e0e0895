// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for clips and settings files.

pub mod media;
pub mod serialization;
