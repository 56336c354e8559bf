// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document configuration.

use alloc::string::String;

/// What tab traversal does at the ends of the focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    /// Stop at the first or last focusable node.
    Never,
    /// Continue from the other end.
    #[default]
    Wrap,
}

/// Knobs for a [`Document`](crate::Document).
///
/// ```
/// use grove_document::DocumentConfig;
///
/// let config = DocumentConfig {
///     focus_on_pointer_down: false,
///     ..DocumentConfig::default()
/// };
/// assert!(config.auto_fill_window);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentConfig {
    /// String id of the root element.
    pub id: String,
    /// Resize the root to the window on
    /// [`Document::window_resized`](crate::Document::window_resized).
    pub auto_fill_window: bool,
    /// Move focus to the nearest focusable ancestor-or-self on pointer down.
    pub focus_on_pointer_down: bool,
    /// Drop hover bookkeeping for touch and pen pointers once they lift,
    /// synthesizing out/leave for whatever they were over.
    pub release_non_hover_pointers: bool,
    /// Tab traversal behavior at the ends of the focus order.
    pub focus_wrap: WrapMode,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            id: String::from("document"),
            auto_fill_window: true,
            focus_on_pointer_down: true,
            release_non_hover_pointers: true,
            focus_wrap: WrapMode::Wrap,
        }
    }
}
