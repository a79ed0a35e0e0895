// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Two-player playback synchronization.

pub mod clip_player;
pub mod player;
pub mod synchronizer;
