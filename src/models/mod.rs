// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model shared by the synchronizer, renderer, and UI.

pub mod overlay;
pub mod playback;
