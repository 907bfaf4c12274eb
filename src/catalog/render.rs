//! Markup generation for topic summaries and concept cards.
//!
//! Optional concept fields are driven by [`FIELD_DESCRIPTORS`], a fixed
//! ordered table of (field, label, style). A block is emitted only for
//! populated fields.

use crate::formatting::escape_html;
use crate::i18n::{translate, Language, TextKey};

use super::model::{Concept, ConceptField, Topic};

/// Glyph used for kind tags missing from [`KIND_GLYPHS`]
pub const DEFAULT_KIND_GLYPH: &str = "📌";

/// Decorative glyph per concept kind tag
pub const KIND_GLYPHS: [(&str, &str); 18] = [
    ("oscilador", "🔁"),
    ("nivel", "📊"),
    ("confirmacion", "✅"),
    ("volatilidad", "📈"),
    ("impulso", "⚡"),
    ("proteccion", "🛡️"),
    ("objetivo", "🎯"),
    ("regla", "📏"),
    ("analisis", "📉"),
    ("riesgo", "⚠️"),
    ("emocion", "😰"),
    ("sesgo", "🧠"),
    ("comportamiento", "🔄"),
    ("habito", "💪"),
    ("metrica", "📊"),
    ("manipulacion", "🎭"),
    ("estadistica", "📈"),
    ("direccion", "🧭"),
];

/// Maps a kind tag to its glyph, falling back to [`DEFAULT_KIND_GLYPH`]
pub fn kind_glyph(kind: &str) -> &'static str {
    KIND_GLYPHS
        .iter()
        .find(|(tag, _)| *tag == kind)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(DEFAULT_KIND_GLYPH)
}

/// Themed color role used by inline field values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Info,
    Warning,
    Success,
    Primary,
    TextPrimary,
    TextSecondary,
}

impl Accent {
    pub fn css_var(&self) -> &'static str {
        match self {
            Accent::Info => "var(--info-color)",
            Accent::Warning => "var(--warning-color)",
            Accent::Success => "var(--success-color)",
            Accent::Primary => "var(--primary-color)",
            Accent::TextPrimary => "var(--text-primary)",
            Accent::TextSecondary => "var(--text-secondary)",
        }
    }
}

/// Presentation of one optional field block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// `Label: value` on one line, value tinted by `Accent`
    Inline(Accent),
    /// Monospace explanation box
    Code,
    /// Tinted callout with an emoji before the label
    Callout { tint: [u8; 3], emoji: &'static str },
}

/// Describes how one optional field is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: ConceptField,
    pub label: TextKey,
    pub style: BlockStyle,
}

const fn descriptor(field: ConceptField, label: TextKey, style: BlockStyle) -> FieldDescriptor {
    FieldDescriptor { field, label, style }
}

/// Render order of the optional concept fields
pub const FIELD_DESCRIPTORS: [FieldDescriptor; 14] = [
    descriptor(ConceptField::Range, TextKey::FieldRange, BlockStyle::Inline(Accent::Info)),
    descriptor(ConceptField::Signals, TextKey::FieldSignals, BlockStyle::Inline(Accent::Warning)),
    descriptor(ConceptField::Rule, TextKey::FieldRule, BlockStyle::Inline(Accent::Success)),
    descriptor(ConceptField::Importance, TextKey::FieldImportance, BlockStyle::Inline(Accent::Primary)),
    descriptor(ConceptField::Usage, TextKey::FieldUsage, BlockStyle::Inline(Accent::TextPrimary)),
    descriptor(ConceptField::Tools, TextKey::FieldTools, BlockStyle::Inline(Accent::TextSecondary)),
    descriptor(ConceptField::Implication, TextKey::FieldImplication, BlockStyle::Inline(Accent::Warning)),
    descriptor(ConceptField::Formula, TextKey::FieldFormula, BlockStyle::Code),
    descriptor(
        ConceptField::Example,
        TextKey::FieldExample,
        BlockStyle::Callout { tint: [76, 175, 80], emoji: "✅" },
    ),
    descriptor(
        ConceptField::CommonError,
        TextKey::FieldCommonError,
        BlockStyle::Callout { tint: [244, 67, 54], emoji: "❌" },
    ),
    descriptor(
        ConceptField::Solution,
        TextKey::FieldSolution,
        BlockStyle::Callout { tint: [33, 150, 243], emoji: "💡" },
    ),
    descriptor(
        ConceptField::Consequence,
        TextKey::FieldConsequence,
        BlockStyle::Callout { tint: [255, 193, 7], emoji: "⚠️" },
    ),
    descriptor(
        ConceptField::Protection,
        TextKey::FieldProtection,
        BlockStyle::Callout { tint: [156, 39, 176], emoji: "🛡️" },
    ),
    descriptor(
        ConceptField::Exercise,
        TextKey::FieldExercise,
        BlockStyle::Callout { tint: [0, 188, 212], emoji: "🧠" },
    ),
];

/// A populated optional field, resolved for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConceptBlock<'a> {
    pub field: ConceptField,
    pub label: &'static str,
    pub text: &'a str,
    pub style: BlockStyle,
}

/// Walks the descriptor table and yields one block per populated field
pub fn concept_blocks(concept: &Concept, language: Language) -> Vec<ConceptBlock<'_>> {
    FIELD_DESCRIPTORS
        .iter()
        .filter_map(|d| {
            concept.field(d.field).map(|text| ConceptBlock {
                field: d.field,
                label: translate(language, d.label),
                text,
                style: d.style,
            })
        })
        .collect()
}

/// CSS class that marks a field block, used by hosts and tests to find it
pub fn block_class(field: ConceptField) -> &'static str {
    match field {
        ConceptField::Range => "field-range",
        ConceptField::Signals => "field-signals",
        ConceptField::Formula => "field-formula",
        ConceptField::Example => "field-example",
        ConceptField::CommonError => "field-common-error",
        ConceptField::Solution => "field-solution",
        ConceptField::Consequence => "field-consequence",
        ConceptField::Rule => "field-rule",
        ConceptField::Importance => "field-importance",
        ConceptField::Exercise => "field-exercise",
        ConceptField::Protection => "field-protection",
        ConceptField::Usage => "field-usage",
        ConceptField::Tools => "field-tools",
        ConceptField::Implication => "field-implication",
    }
}

fn write_block(out: &mut String, block: &ConceptBlock<'_>) {
    let class = block_class(block.field);
    let label = escape_html(block.label);
    let text = escape_html(block.text);
    let html = match block.style {
        BlockStyle::Inline(accent) => format!(
            "<p class=\"{class}\"><strong>{label}:</strong> <span style=\"color: {};\">{text}</span></p>",
            accent.css_var()
        ),
        BlockStyle::Code => format!(
            "<div class=\"explanation {class}\"><code>{text}</code></div>"
        ),
        BlockStyle::Callout { tint: [r, g, b], emoji } => format!(
            "<div class=\"{class}\" style=\"background: rgba({r}, {g}, {b}, 0.1); padding: 1rem; border-radius: 8px; margin: 1rem 0;\">\
             <strong>{emoji} {label}:</strong>\
             <p style=\"margin: 0.5rem 0 0 0; color: var(--text-secondary);\">{text}</p></div>"
        ),
    };
    out.push_str(&html);
}

/// Renders one concept card
pub fn render_card(concept: &Concept, language: Language) -> String {
    let color = escape_html(&concept.accent_color);
    let mut out = format!(
        "<div class=\"tarjeta-concepto\" style=\"border-left: 5px solid {color}; background: rgba(255,255,255,0.02); padding: 1.5rem; margin: 1.5rem 0; border-radius: 12px;\">\
         <div style=\"display: flex; align-items: center; gap: 1rem; margin-bottom: 1rem;\">\
         <i class=\"{}\" style=\"font-size: 1.5rem; color: {color};\"></i>\
         <h5 style=\"margin: 0; color: {color};\">{} {}</h5></div>\
         <p style=\"margin-bottom: 1rem; color: var(--text-secondary);\">{}</p>",
        escape_html(&concept.icon),
        kind_glyph(&concept.kind),
        escape_html(&concept.title),
        escape_html(&concept.definition),
    );
    for block in concept_blocks(concept, language) {
        write_block(&mut out, &block);
    }
    out.push_str("</div>");
    out
}

/// Renders the expanded view of a topic: heading, intro and every card
pub fn render_topic(topic: &Topic, language: Language) -> String {
    let heading = if topic.badge.is_empty() {
        escape_html(&topic.title)
    } else {
        format!("{} {}", escape_html(&topic.badge), escape_html(&topic.title))
    };
    let mut out = format!("<h4>{heading}</h4>");
    if !topic.intro.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&topic.intro)));
    }
    for concept in &topic.concepts {
        out.push_str(&render_card(concept, language));
    }
    out
}

/// Renders one selectable summary card bound to `index`
pub fn render_summary(index: usize, topic: &Topic, language: Language) -> String {
    let color = escape_html(&topic.accent_color);
    format!(
        "<div class=\"indicator-card\" data-topic-index=\"{index}\" style=\"cursor: pointer;\">\
         <div class=\"indicator-icon\" style=\"background: {color}20; color: {color};\"><i class=\"{}\"></i></div>\
         <h4>{}</h4>\
         <p style=\"font-size: 0.875rem; color: var(--text-secondary);\">{}</p></div>",
        escape_html(&topic.icon),
        escape_html(&topic.title),
        escape_html(translate(language, TextKey::LearnMore)),
    )
}
