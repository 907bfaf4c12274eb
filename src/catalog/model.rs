//! Topic and concept records.

use serde::Deserialize;

/// An educational topic grouping an ordered list of concepts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub title: String,
    /// Icon class list, e.g. `fas fa-chart-line`
    pub icon: String,
    pub accent_color: String,
    /// Decorative glyph shown before the heading
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub concepts: Vec<Concept>,
}

/// A single concept card.
///
/// Required fields are always rendered; every optional field renders a
/// labelled block only when populated.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub title: String,
    pub icon: String,
    pub accent_color: String,
    pub definition: String,
    /// Kind tag selecting the decorative glyph
    #[serde(rename = "type")]
    pub kind: String,
    pub range: Option<String>,
    #[serde(alias = "signal")]
    pub signals: Option<String>,
    pub formula: Option<String>,
    pub example: Option<String>,
    pub common_error: Option<String>,
    pub solution: Option<String>,
    pub consequence: Option<String>,
    pub rule: Option<String>,
    pub importance: Option<String>,
    pub exercise: Option<String>,
    pub protection: Option<String>,
    pub usage: Option<String>,
    pub tools: Option<String>,
    pub implication: Option<String>,
}

/// Names of the optional concept fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConceptField {
    Range,
    Signals,
    Formula,
    Example,
    CommonError,
    Solution,
    Consequence,
    Rule,
    Importance,
    Exercise,
    Protection,
    Usage,
    Tools,
    Implication,
}

impl Concept {
    /// Creates a concept with only the required fields set
    pub fn new(title: &str, icon: &str, accent_color: &str, definition: &str, kind: &str) -> Self {
        Self {
            title: title.to_string(),
            icon: icon.to_string(),
            accent_color: accent_color.to_string(),
            definition: definition.to_string(),
            kind: kind.to_string(),
            ..Self::default()
        }
    }

    /// Sets an optional field, builder style
    pub fn with(mut self, field: ConceptField, value: &str) -> Self {
        *self.slot_mut(field) = Some(value.to_string());
        self
    }

    /// Value of an optional field; empty strings count as absent
    pub fn field(&self, field: ConceptField) -> Option<&str> {
        let value = match field {
            ConceptField::Range => &self.range,
            ConceptField::Signals => &self.signals,
            ConceptField::Formula => &self.formula,
            ConceptField::Example => &self.example,
            ConceptField::CommonError => &self.common_error,
            ConceptField::Solution => &self.solution,
            ConceptField::Consequence => &self.consequence,
            ConceptField::Rule => &self.rule,
            ConceptField::Importance => &self.importance,
            ConceptField::Exercise => &self.exercise,
            ConceptField::Protection => &self.protection,
            ConceptField::Usage => &self.usage,
            ConceptField::Tools => &self.tools,
            ConceptField::Implication => &self.implication,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    fn slot_mut(&mut self, field: ConceptField) -> &mut Option<String> {
        match field {
            ConceptField::Range => &mut self.range,
            ConceptField::Signals => &mut self.signals,
            ConceptField::Formula => &mut self.formula,
            ConceptField::Example => &mut self.example,
            ConceptField::CommonError => &mut self.common_error,
            ConceptField::Solution => &mut self.solution,
            ConceptField::Consequence => &mut self.consequence,
            ConceptField::Rule => &mut self.rule,
            ConceptField::Importance => &mut self.importance,
            ConceptField::Exercise => &mut self.exercise,
            ConceptField::Protection => &mut self.protection,
            ConceptField::Usage => &mut self.usage,
            ConceptField::Tools => &mut self.tools,
            ConceptField::Implication => &mut self.implication,
        }
    }
}
