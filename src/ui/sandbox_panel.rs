//! Educational sandbox rendering
//!
//! The topic list goes in the side panel; the selected topic's concept
//! cards fill the central panel in as many columns as the grid allows.

use eframe::egui;
use egui::{RichText, Stroke};
use crate::app::AppState;
use crate::presentation::color_mapping::{accent_color, callout_fill, callout_stroke, DocumentColors};
use cryptodash::catalog::{concept_blocks, kind_glyph, BlockStyle, ConceptBlock};
use cryptodash::{hex_to_color32, Concept, ContainerId, Language, TextKey};

/// Result of user interaction with the sandbox
pub enum SandboxInteraction {
    TopicSelected(usize),
}

/// Renders one button per listed topic
pub fn render_topics(ui: &mut egui::Ui, state: &AppState) -> Option<SandboxInteraction> {
    let mut interaction = None;
    let selected = state.dashboard.catalog().selected();

    for summary in &state.topics {
        let accent = hex_to_color32(&summary.accent_color);
        let frame = egui::Frame::group(ui.style())
            .stroke(Stroke::new(1.5, accent))
            .inner_margin(egui::Margin::same(8));

        let response = frame
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                let title = RichText::new(&summary.title).strong().color(accent);
                let title = if selected == Some(summary.index) { title.underline() } else { title };
                ui.label(title);
                ui.label(RichText::new(summary.affordance).small());
            })
            .response
            .interact(egui::Sense::click());

        if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
            interaction = Some(SandboxInteraction::TopicSelected(summary.index));
        }
        ui.add_space(4.0);
    }

    interaction
}

/// Renders the selected topic once the document has revealed its container
pub fn render_topic_content(ui: &mut egui::Ui, state: &mut AppState) {
    let doc = state.dashboard.surface();
    if !doc.is_container_visible(ContainerId::SandboxContent) {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new(state.dashboard.text(TextKey::Sandbox)).heading());
        });
        return;
    }

    // Honor scroll-into-view requests made since the last frame
    let scroll_requests = doc
        .container(ContainerId::SandboxContent)
        .map(|container| container.scroll_requests)
        .unwrap_or(0);
    if scroll_requests > state.seen_scroll_requests {
        ui.scroll_to_cursor(Some(egui::Align::TOP));
        state.seen_scroll_requests = scroll_requests;
    }

    let Some(topic) = state.selected_topic() else {
        return;
    };
    let colors = DocumentColors::from_document(state.dashboard.surface(), state.dashboard.theme());
    let language = state.dashboard.language();
    let columns = state.grid.columns().min(topic.concepts.len()).max(1);

    ui.heading(RichText::new(format!("{} {}", topic.badge, topic.title)).color(hex_to_color32(&topic.accent_color)));
    ui.label(RichText::new(&topic.intro).color(colors.text_secondary));
    ui.add_space(8.0);

    ui.columns(columns, |cols| {
        for (index, concept) in topic.concepts.iter().enumerate() {
            render_concept_card(&mut cols[index % columns], concept, language, &colors);
        }
    });
}

fn render_concept_card(ui: &mut egui::Ui, concept: &Concept, language: Language, colors: &DocumentColors) {
    let accent = hex_to_color32(&concept.accent_color);
    egui::Frame::group(ui.style())
        .fill(colors.card)
        .stroke(Stroke::new(1.0, accent))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("{} {}", kind_glyph(&concept.kind), concept.title))
                    .strong()
                    .color(accent),
            );
            ui.label(&concept.definition);

            for block in concept_blocks(concept, language) {
                ui.add_space(4.0);
                render_block(ui, &block, colors);
            }
        });
    ui.add_space(8.0);
}

fn render_block(ui: &mut egui::Ui, block: &ConceptBlock<'_>, colors: &DocumentColors) {
    match block.style {
        BlockStyle::Inline(accent) => {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(format!("{}:", block.label)).strong());
                ui.label(RichText::new(block.text).color(accent_color(accent, colors)));
            });
        }
        BlockStyle::Code => {
            egui::Frame::new()
                .fill(colors.sidebar)
                .inner_margin(egui::Margin::same(6))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(block.label).strong());
                    ui.label(RichText::new(block.text).monospace());
                });
        }
        BlockStyle::Callout { tint, emoji } => {
            egui::Frame::new()
                .fill(callout_fill(tint))
                .stroke(Stroke::new(1.0, callout_stroke(tint)))
                .inner_margin(egui::Margin::same(6))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(format!("{} {}", emoji, block.label)).strong());
                    ui.label(block.text);
                });
        }
    }
}
