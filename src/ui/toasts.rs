//! Notification toasts
//!
//! Toasts mirror the notification nodes in the document: a node carrying
//! the `show` class fades in, and fades out again once the class is dropped.

use eframe::egui;
use egui::{RichText, Stroke};
use crate::app::AppState;
use crate::presentation::color_mapping::{severity_color, severity_glyph, DocumentColors};

const FADE_SECONDS: f32 = 0.3;

pub fn render_toasts(ctx: &egui::Context, state: &AppState) {
    let dashboard = &state.dashboard;
    let live = dashboard.notifications().live();
    if live.is_empty() {
        return;
    }

    let doc = dashboard.surface();
    let colors = DocumentColors::from_document(doc, dashboard.theme());

    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 56.0])
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            for notification in live {
                let shown = doc
                    .notification(notification.id)
                    .is_some_and(|node| node.has_class("show"));
                let opacity = ctx.animate_bool_with_time(
                    egui::Id::new(("notification", notification.id)),
                    shown,
                    FADE_SECONDS,
                );
                if opacity <= 0.0 {
                    continue;
                }

                ui.scope(|ui| {
                    ui.set_opacity(opacity);
                    egui::Frame::popup(ui.style())
                        .fill(colors.card)
                        .stroke(Stroke::new(2.0, severity_color(notification.severity)))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.label(
                                RichText::new(format!(
                                    "{} {}",
                                    severity_glyph(notification.severity),
                                    notification.message
                                ))
                                .color(colors.text_primary),
                            );
                        });
                });
                ui.add_space(6.0);
            }
        });
}
