// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the synchronizer and guide canvas, loads
//! clips in the background, and routes UI actions to them.

use crate::config::Settings;
use crate::guides::canvas::GuideCanvas;
use crate::io::media::{self, Clip, FRAME_EXTENSIONS};
use crate::models::overlay::OverlayConfig;
use crate::sync::clip_player::ClipPlayer;
use crate::sync::player::Role;
use crate::sync::synchronizer::Synchronizer;
use crate::ui::{toolbar, transport, viewer};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Largest frame delta fed to the player clocks, so a stalled window does
/// not jump playback forward.
const MAX_FRAME_DT: f64 = 0.1;

/// A clip decode running on a background thread.
struct PendingLoad {
    role: Role,
    /// Load generation for `role` when this load started
    generation: u64,
    receiver: Receiver<Result<Clip, String>>,
}

/// Texture holding the frame currently shown for one role.
struct FrameTexture {
    handle: egui::TextureHandle,
    frame: usize,
}

fn role_index(role: Role) -> usize {
    match role {
        Role::Primary => 0,
        Role::Secondary => 1,
    }
}

/// Paintable frame for `role`, once its texture exists.
fn clip_view<'a>(
    textures: &'a [Option<FrameTexture>; 2],
    sync: &'a Synchronizer<ClipPlayer>,
    role: Role,
) -> Option<viewer::ClipView<'a>> {
    let texture = textures[role_index(role)].as_ref()?;
    let frame_size = sync.player(role)?.clip().frame_size()?;
    Some(viewer::ClipView {
        texture: &texture.handle,
        frame_size,
    })
}

/// Main application state.
pub struct CompareApp {
    settings: Settings,

    /// Current display options
    overlay: OverlayConfig,

    /// Playback synchronization for the user and reference clips
    sync: Synchronizer<ClipPlayer>,

    /// Swing-plane guide overlay
    guides: GuideCanvas,

    /// Frame textures, indexed by role
    textures: [Option<FrameTexture>; 2],

    /// Background clip decodes
    pending: Vec<PendingLoad>,

    /// Latest load generation per role; older results are stale
    generations: [u64; 2],

    /// Last error shown in the status bar
    last_error: Option<String>,
}

impl CompareApp {
    /// Create a new application instance from `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            overlay: settings.overlay,
            sync: Synchronizer::new(settings.playback.drift_tolerance_secs),
            guides: GuideCanvas::new(settings.guides.anchor_height_ratio, settings.guides.opacity),
            settings,
            textures: [None, None],
            pending: Vec::new(),
            generations: [0, 0],
            last_error: None,
        }
    }

    /// Apply newly loaded settings to the running application.
    fn apply_settings(&mut self, settings: Settings) {
        self.sync.set_drift_tolerance(settings.playback.drift_tolerance_secs);
        self.guides
            .set_style(settings.guides.anchor_height_ratio, settings.guides.opacity);
        self.overlay = settings.overlay;
        self.settings = settings;
    }

    fn import_settings(&mut self, path: PathBuf) {
        match Settings::load(&path) {
            Ok(settings) => {
                self.apply_settings(settings);
                self.last_error = None;
            }
            Err(e) => {
                log::error!("Failed to load settings: {:#}", e);
                self.last_error = Some(format!("Failed to load settings: {}", e));
            }
        }
    }

    /// Decode a clip for `role` in the background, superseding any pending load.
    fn load_clip(&mut self, role: Role, path: PathBuf) {
        let idx = role_index(role);
        self.generations[idx] += 1;
        let generation = self.generations[idx];
        let media_settings = self.settings.media.clone();

        let (sender, receiver) = channel();
        self.pending.push(PendingLoad {
            role,
            generation,
            receiver,
        });

        log::info!("Loading {} clip from {}", role.label(), path.display());
        std::thread::spawn(move || {
            let result = media::load_clip(&path, &media_settings).map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    /// Attach finished loads and drop stale ones.
    fn poll_loads(&mut self) {
        let mut finished = Vec::new();
        self.pending.retain(|load| match load.receiver.try_recv() {
            Ok(result) => {
                finished.push((load.role, load.generation, result));
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => false,
        });

        for (role, generation, result) in finished {
            if generation != self.generations[role_index(role)] {
                log::warn!("Dropping superseded {} clip load", role.label());
                continue;
            }
            match result {
                Ok(clip) => {
                    log::info!("{} clip ready: {} ({:.2}s)", role.label(), clip.name, clip.duration());
                    self.textures[role_index(role)] = None;
                    if let Some(previous) = self.sync.attach(role, ClipPlayer::new(clip)) {
                        log::info!("Released {} clip {}", role.label(), previous.clip().name);
                    }
                    self.last_error = None;
                }
                Err(e) => {
                    log::error!("Failed to load {} clip: {}", role.label(), e);
                    self.last_error = Some(format!("Failed to load {} clip: {}", role.label(), e));
                }
            }
        }
    }

    /// Upload the current frame of each clip when it changed.
    fn update_textures(&mut self, ctx: &egui::Context) {
        for role in [Role::Primary, Role::Secondary] {
            let idx = role_index(role);
            let Some(player) = self.sync.player(role) else {
                self.textures[idx] = None;
                continue;
            };
            let frame = player.frame_index();
            let Some(image) = player.clip().frames.get(frame) else {
                continue;
            };

            match self.textures[idx] {
                Some(ref texture) if texture.frame == frame => {}
                Some(ref mut texture) => {
                    texture.handle.set(image.clone(), egui::TextureOptions::LINEAR);
                    texture.frame = frame;
                }
                None => {
                    let handle = ctx.load_texture(
                        format!("{}_frame", role.label().to_lowercase()),
                        image.clone(),
                        egui::TextureOptions::LINEAR,
                    );
                    self.textures[idx] = Some(FrameTexture { handle, frame });
                }
            }
        }
    }

    /// Release the clip for `role` and cancel any pending load for it.
    fn close_clip(&mut self, role: Role) {
        let idx = role_index(role);
        self.generations[idx] += 1;
        self.textures[idx] = None;
        if let Some(previous) = self.sync.detach(role) {
            log::info!("Closed {} clip {}", role.label(), previous.clip().name);
        }
    }

    fn has_clip(&self) -> bool {
        self.sync.player(Role::Primary).is_some() || self.sync.player(Role::Secondary).is_some()
    }

    fn toggle_play(&mut self) {
        if let Err(e) = self.sync.toggle_play() {
            self.last_error = Some(format!("Playback refused: {}", e));
        }
    }

    fn swap_clips(&mut self) {
        self.sync.swap_roles();
        self.textures.swap(0, 1);
        self.generations.swap(0, 1);
        for load in &mut self.pending {
            load.role = load.role.other();
        }
    }

    /// Seconds covered by one frame of an image clip.
    fn frame_step(&self) -> f64 {
        1.0 / self.settings.media.sequence_fps.max(1.0)
    }

    fn pick_clip_file(&mut self, role: Role) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title(format!("Open {} Clip", role.label()))
            .add_filter("Images", FRAME_EXTENSIONS)
            .pick_file()
        {
            self.load_clip(role, path);
        }
    }

    fn pick_clip_folder(&mut self, role: Role) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title(format!("Open {} Folder", role.label()))
            .pick_folder()
        {
            self.load_clip(role, path);
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (space, left, right) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
            )
        });
        if space {
            self.toggle_play();
        }
        if left {
            self.sync.step(-self.frame_step());
        }
        if right {
            self.sync.step(self.frame_step());
        }
    }

    fn status_text(&self) -> String {
        let name = |role: Role| {
            self.sync
                .player(role)
                .map(|p| p.clip().name.clone())
                .unwrap_or_else(|| "none".to_string())
        };
        format!(
            "User: {}  |  Reference: {}",
            name(Role::Primary),
            name(Role::Secondary)
        )
    }
}

impl eframe::App for CompareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt) as f64;
        self.sync.advance(dt.min(MAX_FRAME_DT));
        self.sync.pump();

        self.poll_loads();
        self.sync.pump();
        self.update_textures(ctx);

        // Keep repainting while clips advance or decode
        if self.sync.state().playing || !self.pending.is_empty() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    for role in [Role::Primary, Role::Secondary] {
                        if ui.button(format!("Open {} Clip...", role.label())).clicked() {
                            self.pick_clip_file(role);
                            ui.close_menu();
                        }
                    }
                    for role in [Role::Primary, Role::Secondary] {
                        if ui.button(format!("Open {} Folder...", role.label())).clicked() {
                            self.pick_clip_folder(role);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    for role in [Role::Primary, Role::Secondary] {
                        let open = self.sync.player(role).is_some();
                        if ui
                            .add_enabled(open, egui::Button::new(format!("Close {} Clip", role.label())))
                            .clicked()
                        {
                            self.close_clip(role);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.button("Load Settings...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Settings", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_settings(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let can_swap = self.has_clip();
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &mut self.overlay, can_swap))
            .inner;
        if let toolbar::ToolbarAction::SwapClips = toolbar_action {
            self.swap_clips();
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if !self.pending.is_empty() {
                    ui.spinner();
                    ui.label("Loading clip...");
                    ui.separator();
                }
                ui.label(self.status_text());
                if let Some(ref error) = self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(230, 90, 90), error.as_str());
                }
            });
        });

        // Transport controls
        let enabled = self.has_clip();
        let state = *self.sync.state();
        let transport_action = egui::TopBottomPanel::bottom("transport")
            .show(ctx, |ui| {
                ui.add_space(4.0);
                let action = transport::show(ui, &state, enabled);
                ui.add_space(4.0);
                action
            })
            .inner;

        match transport_action {
            transport::TransportAction::TogglePlay => self.toggle_play(),
            transport::TransportAction::SetRate(rate) => self.sync.set_rate(rate),
            transport::TransportAction::Scrub(t) => self.sync.scrub(t),
            transport::TransportAction::None => {}
        }

        self.handle_keyboard(ctx);

        // Viewer (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            let user = clip_view(&self.textures, &self.sync, Role::Primary);
            let reference = clip_view(&self.textures, &self.sync, Role::Secondary);
            viewer::show(ui, user, reference, &self.overlay, &mut self.guides);
        });
    }
}
