//! The egui overlay: page text, navigation buttons, load progress and a
//! small corner HUD with the shareable query form of the current page.

use crate::pages::PageContent;
use crate::render::SceneStatus;

const TITLE_COLOR: egui::Color32 = egui::Color32::from_rgb(235, 240, 244);
const BODY_COLOR: egui::Color32 = egui::Color32::from_rgb(205, 212, 220);
const HUD_COLOR: egui::Color32 = egui::Color32::from_rgb(120, 130, 140);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 120, 120);
const ACCENT_COLOR: egui::Color32 = egui::Color32::from_rgb(74, 158, 255);

/// Everything the overlay needs for one frame.
pub struct UiFrame<'a> {
    pub page: &'a PageContent,
    pub page_index: u32,
    /// Shareable `?page=N` form of the current history entry.
    pub query: Option<&'a str>,
    pub status: SceneStatus,
    pub fps: f32,
    pub show_hud: bool,
}

/// Navigation the user requested through the overlay buttons.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UiResponse {
    pub advance: bool,
    pub retreat: bool,
}

pub fn draw(ctx: &egui::Context, frame: &UiFrame) -> UiResponse {
    let mut response = UiResponse::default();

    // Load feedback stays visible even with the HUD off.
    match &frame.status {
        SceneStatus::Loading(percent) => {
            egui::Area::new(egui::Id::new("loading"))
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new(format!("model {percent} % loaded"))
                            .size(22.0)
                            .color(TITLE_COLOR),
                    );
                });
        }
        SceneStatus::Failed(message) => {
            egui::Area::new(egui::Id::new("load-error"))
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new(format!("failed to load scene: {message}"))
                            .size(16.0)
                            .color(ERROR_COLOR),
                    );
                });
        }
        SceneStatus::Idle | SceneStatus::Ready => {}
    }

    if !frame.show_hud {
        return response;
    }

    // Content card
    egui::Window::new("page")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(32.0, 32.0))
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(&frame.page.title)
                    .size(28.0)
                    .strong()
                    .color(TITLE_COLOR),
            );
            ui.add_space(8.0);
            for paragraph in &frame.page.paragraphs {
                ui.label(
                    egui::RichText::new(paragraph)
                        .size(15.0)
                        .color(BODY_COLOR),
                );
                ui.add_space(6.0);
            }
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if frame.page_index > 0
                    && ui.button(egui::RichText::new("Back").size(16.0)).clicked()
                {
                    response.retreat = true;
                }
                if ui
                    .button(egui::RichText::new(&frame.page.cta).size(16.0))
                    .clicked()
                {
                    response.advance = true;
                }
            });
        });

    // Corner HUD
    egui::Area::new(egui::Id::new("hud"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .show(ctx, |ui| {
            ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                if let Some(query) = frame.query {
                    ui.label(egui::RichText::new(query).size(12.0).color(ACCENT_COLOR));
                }
                if frame.fps > 0.0 {
                    ui.label(
                        egui::RichText::new(format!("{:.0} FPS", frame.fps))
                            .size(12.0)
                            .color(HUD_COLOR),
                    );
                }
            });
        });

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::Page;

    fn run_frame(status: SceneStatus, show_hud: bool) -> UiResponse {
        let content = Page::from_index(0).content();
        let frame = UiFrame {
            page: &content,
            page_index: 0,
            query: Some("?page=0"),
            status,
            fps: 60.0,
            show_hud,
        };
        let ctx = egui::Context::default();
        let mut response = UiResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = draw(ctx, &frame);
        });
        response
    }

    #[test]
    fn test_draw_without_input_requests_nothing() {
        for status in [
            SceneStatus::Idle,
            SceneStatus::Loading(42),
            SceneStatus::Ready,
            SceneStatus::Failed("boom".to_string()),
        ] {
            let response = run_frame(status, true);
            assert_eq!(response, UiResponse::default());
        }
    }

    #[test]
    fn test_hidden_hud_still_draws() {
        let response = run_frame(SceneStatus::Loading(7), false);
        assert_eq!(response, UiResponse::default());
    }
}
