//! The catalog page skeleton

use crate::config::LibraryConfig;
use crate::dom::{Document, NodeId};
use crate::form::{Checkbox, Field};

/// Class shared by the three text inputs.
pub const ENTRY_CLASS: &str = "library-form__entry";

/// Class shared by the two read-status checkboxes.
pub const CHECKBOX_CLASS: &str = "library-form__checkbox";

/// Id of the submit control.
pub const SUBMIT_ID: &str = "submit";

/// Id of the paragraph reporting storage trouble.
pub const NOTICE_ID: &str = "notice";

/// Class of the storage notice, kept apart from form warnings.
pub const NOTICE_CLASS: &str = "notice";

/// The page the catalog lives in: a form and a card container.
///
/// ```text
/// body
/// ├── form.library-form
/// │   ├── input#title  input#author  input#pages
/// │   ├── input#yes    input#no      (checkboxes)
/// │   └── button#submit
/// ├── div.main-library               (cards)
/// └── p#notice.notice                (storage trouble, when present)
/// ```
#[derive(Debug, Clone)]
pub struct Page {
    document: Document,
    form: NodeId,
    library: NodeId,
}

impl Page {
    /// Build the stock page. Both checkboxes start unchecked.
    pub fn new(config: &LibraryConfig) -> Self {
        let mut document = Document::new();
        let body = document.body();
        // Parents below are freshly created, so every insertion succeeds.
        let form = document
            .add_element(body, "", "form", "", &[config.form_class.as_str()])
            .unwrap_or(body);
        for field in Field::ALL {
            let input = document.add_element(form, field.id(), "input", "", &[ENTRY_CLASS]);
            if let Some(input) = input {
                document.set_attribute(input, "type", "text");
                document.set_attribute(input, "value", "");
            }
        }
        for checkbox in Checkbox::ALL {
            let input = document.add_element(form, checkbox.id(), "input", "", &[CHECKBOX_CLASS]);
            if let Some(input) = input {
                document.set_attribute(input, "type", "checkbox");
            }
        }
        document.add_element(form, SUBMIT_ID, "button", "Add book", &[]);
        let library = document
            .add_element(body, "", "div", "", &[config.library_class.as_str()])
            .unwrap_or(body);

        Self {
            document,
            form,
            library,
        }
    }

    /// The underlying element tree.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the element tree.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The form element warnings are attached to.
    pub fn form(&self) -> NodeId {
        self.form
    }

    /// The container cards are rendered into.
    pub fn library(&self) -> NodeId {
        self.library
    }

    /// The input element for `field`.
    pub fn input(&self, field: Field) -> Option<NodeId> {
        self.document.get_element_by_id(field.id())
    }

    /// Current text of `field`.
    pub fn input_value(&self, field: Field) -> String {
        self.input(field)
            .and_then(|node| self.document.element(node))
            .and_then(|e| e.attribute("value"))
            .unwrap_or_default()
            .to_string()
    }

    /// Replace the text of `field`, as typing into it would.
    pub fn set_input_value(&mut self, field: Field, value: &str) {
        if let Some(node) = self.input(field) {
            self.document.set_attribute(node, "value", value);
        }
    }

    /// Whether `checkbox` is ticked.
    pub fn is_checked(&self, checkbox: Checkbox) -> bool {
        self.document
            .get_element_by_id(checkbox.id())
            .and_then(|node| self.document.element(node))
            .map_or(false, |e| e.attribute("checked").is_some())
    }

    /// Tick or untick `checkbox`.
    pub fn set_checked(&mut self, checkbox: Checkbox, checked: bool) {
        if let Some(node) = self.document.get_element_by_id(checkbox.id()) {
            if checked {
                self.document.set_attribute(node, "checked", "");
            } else {
                self.document.remove_attribute(node, "checked");
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Notices
    // ═══════════════════════════════════════════════════════════════════

    /// Show `text` in the notice paragraph, replacing any earlier notice.
    pub fn show_notice(&mut self, text: &str) {
        match self.document.get_element_by_id(NOTICE_ID) {
            Some(node) => {
                if let Some(element) = self.document.element_mut(node) {
                    element.text = text.to_string();
                }
            }
            None => {
                let body = self.document.body();
                self.document
                    .add_element(body, NOTICE_ID, "p", text, &[NOTICE_CLASS]);
            }
        }
    }

    /// Remove the notice paragraph, if shown.
    pub fn clear_notice(&mut self) {
        if let Some(node) = self.document.get_element_by_id(NOTICE_ID) {
            self.document.remove(node);
        }
    }

    /// Text of the notice currently shown.
    pub fn notice_text(&self) -> Option<&str> {
        self.document
            .get_element_by_id(NOTICE_ID)
            .and_then(|node| self.document.element(node))
            .map(|e| e.text.as_str())
    }
}
