//! In-memory document model.
//!
//! `MemoryDocument` implements [`DocumentSurface`] by recording every write.
//! The GUI renders from it and tests inspect it.

use std::collections::BTreeMap;

use crate::traits::{ContainerId, DocumentSurface, NotificationId};

/// A notification element attached to the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationNode {
    pub id: NotificationId,
    pub class: String,
    pub inner_html: String,
}

impl NotificationNode {
    /// Returns true if the element carries `class` in its class list
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }
}

/// State of one addressable container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerState {
    pub html: String,
    pub visible: bool,
    pub scroll_requests: usize,
}

/// Document state recorded from `DocumentSurface` writes.
///
/// Responsibilities:
/// - Holding root style variables and the document title
/// - Holding the optional language toggle control
/// - Tracking attached notification elements and create/remove counters
/// - Holding the topic summary and detail containers
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    style: BTreeMap<String, String>,
    style_batches: usize,
    title: String,
    language_toggle: Option<String>,
    notifications: Vec<NotificationNode>,
    created_notifications: usize,
    removed_notifications: usize,
    containers: BTreeMap<ContainerId, ContainerState>,
    /// Bumped on every write so renderers can skip unchanged frames
    revision: u64,
}

impl MemoryDocument {
    /// Creates an empty document without a language toggle control
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document that has a language toggle control
    pub fn with_language_toggle() -> Self {
        Self {
            language_toggle: Some(String::new()),
            ..Self::default()
        }
    }

    // ===== Style =====

    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    pub fn style_properties(&self) -> &BTreeMap<String, String> {
        &self.style
    }

    /// Number of style batches applied so far
    pub fn style_batches(&self) -> usize {
        self.style_batches
    }

    // ===== Title and toggle =====

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn language_toggle(&self) -> Option<&str> {
        self.language_toggle.as_deref()
    }

    // ===== Notifications =====

    pub fn notifications(&self) -> &[NotificationNode] {
        &self.notifications
    }

    pub fn notification(&self, id: NotificationId) -> Option<&NotificationNode> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn created_notifications(&self) -> usize {
        self.created_notifications
    }

    pub fn removed_notifications(&self) -> usize {
        self.removed_notifications
    }

    // ===== Containers =====

    pub fn container(&self, container: ContainerId) -> Option<&ContainerState> {
        self.containers.get(&container)
    }

    /// Inner markup of a container, empty if never written
    pub fn container_html(&self, container: ContainerId) -> &str {
        self.containers
            .get(&container)
            .map(|c| c.html.as_str())
            .unwrap_or("")
    }

    pub fn is_container_visible(&self, container: ContainerId) -> bool {
        self.containers.get(&container).is_some_and(|c| c.visible)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn container_mut(&mut self, container: ContainerId) -> &mut ContainerState {
        self.containers.entry(container).or_default()
    }
}

impl DocumentSurface for MemoryDocument {
    fn set_style_properties(&mut self, properties: &[(&str, &str)]) {
        for (name, value) in properties {
            self.style.insert((*name).to_string(), (*value).to_string());
        }
        self.style_batches += 1;
        self.revision += 1;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.revision += 1;
    }

    fn set_language_toggle(&mut self, inner_html: &str) -> bool {
        match self.language_toggle.as_mut() {
            Some(toggle) => {
                *toggle = inner_html.to_string();
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    fn append_notification(&mut self, id: NotificationId, class: &str, inner_html: &str) {
        self.notifications.push(NotificationNode {
            id,
            class: class.to_string(),
            inner_html: inner_html.to_string(),
        });
        self.created_notifications += 1;
        self.revision += 1;
    }

    fn set_notification_class(&mut self, id: NotificationId, class: &str) {
        if let Some(node) = self.notifications.iter_mut().find(|n| n.id == id) {
            node.class = class.to_string();
            self.revision += 1;
        }
    }

    fn remove_notification(&mut self, id: NotificationId) {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        if self.notifications.len() < before {
            self.removed_notifications += 1;
            self.revision += 1;
        }
    }

    fn set_container_html(&mut self, container: ContainerId, html: &str) {
        self.container_mut(container).html = html.to_string();
        self.revision += 1;
    }

    fn show_container(&mut self, container: ContainerId) {
        self.container_mut(container).visible = true;
        self.revision += 1;
    }

    fn scroll_into_view(&mut self, container: ContainerId) {
        self.container_mut(container).scroll_requests += 1;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_absent_by_default() {
        let mut doc = MemoryDocument::new();
        assert!(!doc.set_language_toggle("<i></i>"));
        assert_eq!(doc.language_toggle(), None);

        let mut doc = MemoryDocument::with_language_toggle();
        assert!(doc.set_language_toggle("<i></i>"));
        assert_eq!(doc.language_toggle(), Some("<i></i>"));
    }

    #[test]
    fn test_remove_counts_only_attached_nodes() {
        let mut doc = MemoryDocument::new();
        doc.append_notification(7, "notification info", "hi");
        assert!(doc.notification(7).is_some_and(|n| n.has_class("info")));

        doc.remove_notification(7);
        doc.remove_notification(7);
        assert_eq!(doc.created_notifications(), 1);
        assert_eq!(doc.removed_notifications(), 1);
    }

    #[test]
    fn test_containers() {
        let mut doc = MemoryDocument::new();
        assert_eq!(doc.container_html(ContainerId::SandboxContent), "");
        assert!(!doc.is_container_visible(ContainerId::SandboxContent));

        doc.set_container_html(ContainerId::SandboxContent, "<p>x</p>");
        doc.show_container(ContainerId::SandboxContent);
        doc.scroll_into_view(ContainerId::SandboxContent);

        let state = doc.container(ContainerId::SandboxContent).cloned().unwrap_or_default();
        assert_eq!(state.html, "<p>x</p>");
        assert!(state.visible);
        assert_eq!(state.scroll_requests, 1);
    }
}
