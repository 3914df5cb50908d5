use std::time::Duration;

use eframe::egui;
use lamp_grid_core::views::{Metrics, Scene, render_scene};
use lamp_grid_core::{LampStore, Origin, svg};
use lamp_grid_protocol::{GlobalAction, HitTarget, RenderCommand, ThemeToken, Viewport};

use crate::renderer::{self, RenderResult};
use crate::theme::{self, ThemeMode};

/// Render commands for one store revision at one canvas size.
struct CachedScene {
    revision: u64,
    size: (u32, u32),
    commands: Vec<RenderCommand>,
}

/// Main application state.
pub struct LampApp {
    store: LampStore,
    theme_mode: ThemeMode,
    scene: Option<CachedScene>,
    /// Hit regions from the last paint, in screen pixels.
    hits: RenderResult,
    /// Message from the last export, shown in the status bar.
    notice: Option<String>,
}

impl LampApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: LampStore) -> Self {
        let app = Self::with_store(store);
        theme::apply_typography(&cc.egui_ctx);
        cc.egui_ctx.set_visuals(theme::visuals(app.theme_mode));
        app
    }

    /// App state without an egui context attached.
    pub fn with_store(store: LampStore) -> Self {
        Self {
            store,
            theme_mode: ThemeMode::default(),
            scene: None,
            hits: RenderResult::default(),
            notice: None,
        }
    }

    pub fn store(&self) -> &LampStore {
        &self.store
    }

    /// Scene commands for a canvas of `width` x `height` pixels, rebuilt
    /// only when the store revision or the size changes.
    pub fn scene_commands(&mut self, width: f32, height: f32) -> &[RenderCommand] {
        let size = (width.round() as u32, height.round() as u32);
        let revision = self.store.revision();
        let fresh = self
            .scene
            .as_ref()
            .is_some_and(|s| s.revision == revision && s.size == size);
        if !fresh {
            let viewport = Viewport::new(f64::from(size.0), f64::from(size.1));
            let commands = render_scene(&Scene::of(&self.store), &viewport, Metrics::PIXELS);
            self.scene = Some(CachedScene {
                revision,
                size,
                commands,
            });
        }
        match &self.scene {
            Some(scene) => &scene.commands,
            None => &[],
        }
    }

    pub fn handle_target(&mut self, target: HitTarget) {
        tracing::debug!(?target, "click");
        self.store.dispatch(target);
    }

    /// The current scene as a standalone SVG document.
    pub fn svg_document(&mut self, width: f32, height: f32) -> String {
        let dark = self.theme_mode.is_dark();
        let commands = self.scene_commands(width, height);
        svg::render_svg(commands, f64::from(width), f64::from(height), dark)
    }

    fn export_svg(&mut self, size: egui::Vec2) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name("lamp-grid.svg")
            .save_file()
        else {
            return;
        };
        let doc = self.svg_document(size.x, size.y);
        match std::fs::write(&path, doc) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "exported svg");
                self.notice = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "svg export failed: {e}");
                self.notice = Some(format!("Export failed: {e}"));
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let pressed = ctx.input(|i| {
            [
                (egui::Key::B, Some(GlobalAction::Brighten)),
                (egui::Key::D, Some(GlobalAction::Dim)),
                (egui::Key::R, Some(GlobalAction::Randomize)),
                (egui::Key::X, Some(GlobalAction::Reset)),
                (egui::Key::Escape, None),
            ]
            .into_iter()
            .filter(|(key, _)| i.key_pressed(*key))
            .map(|(_, action)| action)
            .collect::<Vec<_>>()
        });
        for action in pressed {
            match action {
                Some(action) => self.store.apply_global(action),
                None => {
                    self.store.hide_picker();
                }
            }
        }
    }
}

impl eframe::App for LampApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.store.poll();
        self.handle_keys(ctx);

        let mut export_requested = false;

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("💡 lamp-grid");
                ui.separator();

                if ui.button(self.theme_mode.label()).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(theme::visuals(self.theme_mode));
                }

                if ui.button("🖼 Export SVG").clicked() {
                    export_requested = true;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let stats = self.store.stats();
                    ui.label(format!(
                        "{}/{} lit · mean glow {:.2}",
                        stats.active, stats.total, stats.mean_intensity
                    ));
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let origin = match self.store.origin() {
                    Origin::Loaded => "Restored saved lamps",
                    Origin::Generated => "Fresh lamp grid",
                };
                ui.label(origin);
                ui.separator();
                if self.store.pending_persist_ms().is_some() {
                    ui.label("Saving…");
                } else {
                    ui.label("Saved");
                }
                if let Some(notice) = &self.notice {
                    ui.separator();
                    ui.label(notice);
                }
            });
        });

        // Central panel: the lamp scene
        let mut canvas_size = egui::Vec2::ZERO;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                canvas_size = available.size();
                let response = ui.allocate_rect(available, egui::Sense::click());

                let painter = ui.painter_at(available);
                painter.rect_filled(
                    available,
                    egui::CornerRadius::ZERO,
                    theme::resolve(ThemeToken::Background, self.theme_mode),
                );
                let mode = self.theme_mode;
                let commands = self.scene_commands(available.width(), available.height());
                let hits = renderer::render_commands(&painter, commands, available.min, mode);
                self.hits = hits;

                if let Some(pos) = response.hover_pos()
                    && self.hits.target_at(pos).is_some()
                {
                    ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if response.clicked()
                    && let Some(pos) = response.interact_pointer_pos()
                    && let Some(target) = self.hits.target_at(pos)
                {
                    self.handle_target(target);
                    ctx.request_repaint();
                }
            });

        if export_requested {
            self.export_svg(canvas_size);
        }

        if let Some(ms) = self.store.pending_persist_ms() {
            ctx.request_repaint_after(Duration::from_millis(ms));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.store.flush() {
            tracing::info!("flushed pending lamps on exit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamp_grid_core::LampGridConfig;
    use lamp_grid_core::persist::{ManualClock, MemoryStorage};
    use lamp_grid_protocol::{Swatch, hit_test};

    fn app() -> (LampApp, MemoryStorage, ManualClock) {
        let storage = MemoryStorage::new();
        let clock = ManualClock::new();
        let config = LampGridConfig {
            seed: Some(5),
            ..LampGridConfig::default()
        };
        let store = LampStore::initialize(
            &config,
            Box::new(storage.clone()),
            Box::new(clock.clone()),
        );
        (LampApp::with_store(store), storage, clock)
    }

    #[test]
    fn scene_is_rebuilt_on_new_revision() {
        let (mut app, _, _) = app();
        let before = app.scene_commands(800.0, 600.0).to_vec();
        assert_eq!(app.scene_commands(800.0, 600.0), before.as_slice());
        app.handle_target(HitTarget::Lamp(3));
        let after = app.scene_commands(800.0, 600.0).to_vec();
        assert_ne!(after, before);
        assert!(
            after
                .iter()
                .any(|c| matches!(c, RenderCommand::BeginGroup { id, .. } if id == "picker"))
        );
    }

    #[test]
    fn picker_click_paints_selected_lamp() {
        let (mut app, storage, clock) = app();
        app.handle_target(HitTarget::Lamp(40));
        let commands = app.scene_commands(900.0, 700.0).to_vec();
        let swatch = commands.iter().find_map(|c| match c {
            RenderCommand::DrawRect {
                rect,
                target: Some(HitTarget::Swatch(Swatch::Lilac)),
                ..
            } => Some(rect.center()),
            _ => None,
        });
        let target = swatch.and_then(|p| hit_test(&commands, p));
        assert_eq!(target, Some(HitTarget::Swatch(Swatch::Lilac)));
        if let Some(t) = target {
            app.handle_target(t);
        }
        assert_eq!(app.store().lamps().get(40).map(|l| l.color), Some(Swatch::Lilac));

        clock.advance(300);
        app.store.poll();
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn svg_export_reflects_theme() {
        let (mut app, _, _) = app();
        let dark = app.svg_document(400.0, 300.0);
        app.theme_mode = app.theme_mode.toggled();
        let light = app.svg_document(400.0, 300.0);
        assert!(dark.starts_with("<svg"));
        assert_ne!(dark, light);
    }
}
