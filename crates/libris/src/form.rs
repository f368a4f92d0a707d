//! Form intake: field validation and the read-status checkbox pair

use std::fmt;
use tracing::debug;

use crate::book::Book;
use crate::page::Page;

/// Class applied to an input left blank on submission.
pub const ERROR_CLASS: &str = "library-form__entry--error";

/// Id of the validation warning element.
pub const WARNING_ID: &str = "warning";

/// Class of the validation warning element.
pub const WARNING_CLASS: &str = "warning";

/// A required text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Book title
    Title,
    /// Book author
    Author,
    /// Page count
    Pages,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 3] = [Field::Title, Field::Author, Field::Pages];

    /// Element id of the field's input.
    pub fn id(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Pages => "pages",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One of the two mutually exclusive read-status checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checkbox {
    /// "I have read it"
    Yes,
    /// "I have not read it"
    No,
}

impl Checkbox {
    /// Both checkboxes.
    pub const ALL: [Checkbox; 2] = [Checkbox::Yes, Checkbox::No];

    /// Element id of the checkbox.
    pub fn id(self) -> &'static str {
        match self {
            Checkbox::Yes => "yes",
            Checkbox::No => "no",
        }
    }

    /// The checkbox this one excludes.
    pub fn other(self) -> Checkbox {
        match self {
            Checkbox::Yes => Checkbox::No,
            Checkbox::No => Checkbox::Yes,
        }
    }

    /// Look a checkbox up by element id.
    pub fn from_id(id: &str) -> Option<Checkbox> {
        Checkbox::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Raw text of the three inputs at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    /// Title input
    pub title: String,
    /// Author input
    pub author: String,
    /// Pages input, kept as typed
    pub pages: String,
}

impl FormInput {
    /// Read the inputs from the page.
    pub fn read(page: &Page) -> Self {
        Self {
            title: page.input_value(Field::Title),
            author: page.input_value(Field::Author),
            pages: page.input_value(Field::Pages),
        }
    }

    /// Text entered for `field`.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Pages => &self.pages,
        }
    }

    /// Fields left empty, in form order.
    pub fn blank_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.value(*f).is_empty())
            .collect()
    }
}

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more inputs were empty
    MissingFields(Vec<Field>),
    /// Neither checkbox was ticked
    NoSelection,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFields(fields) => {
                let ids: Vec<&str> = fields.iter().map(|f| f.id()).collect();
                write!(f, "Missing {}!", ids.join(", "))
            }
            ValidationError::NoSelection => write!(f, "Ensure a box is checked"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a submission and build the book it describes.
///
/// Only presence is checked; pages is stored as typed.
pub fn validate(input: &FormInput, selected: Option<Checkbox>) -> Result<Book, ValidationError> {
    let blank = input.blank_fields();
    if !blank.is_empty() {
        return Err(ValidationError::MissingFields(blank));
    }
    let selected = selected.ok_or(ValidationError::NoSelection)?;
    Ok(Book::new(
        input.title.clone(),
        input.author.clone(),
        input.pages.clone(),
        selected == Checkbox::Yes,
    ))
}

/// Transient form state: the checkbox selection and the warning flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    selected: Option<Checkbox>,
    warned: bool,
}

impl FormState {
    /// Fresh state: nothing selected, no warning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected checkbox.
    pub fn selected(&self) -> Option<Checkbox> {
        self.selected
    }

    /// Whether a warning is on display.
    pub fn warned(&self) -> bool {
        self.warned
    }

    /// Handle a click on `checkbox`.
    ///
    /// The click flips the box first, as a browser would. Ticking one box
    /// unticks the other; unticking the selected box clears the selection.
    pub fn click(&mut self, page: &mut Page, checkbox: Checkbox) {
        let now_checked = !page.is_checked(checkbox);
        page.set_checked(checkbox, now_checked);

        let other = checkbox.other();
        if page.is_checked(other) {
            self.selected = Some(checkbox);
            page.set_checked(other, false);
        } else if now_checked {
            self.selected = Some(checkbox);
        } else {
            self.selected = None;
        }
    }

    /// Run one submission against the page.
    ///
    /// On failure the blank inputs are flagged and a single warning is shown.
    /// On success any warning is cleared and the new book is returned; the
    /// inputs keep their text.
    pub fn submit(&mut self, page: &mut Page) -> Result<Book, ValidationError> {
        let input = FormInput::read(page);

        for field in Field::ALL {
            if let Some(node) = page.input(field) {
                page.document_mut().remove_class(node, ERROR_CLASS);
            }
        }
        if self.warned {
            self.clear_warning(page);
        }

        match validate(&input, self.selected) {
            Ok(book) => {
                self.clear_warning(page);
                Ok(book)
            }
            Err(err) => {
                if let ValidationError::MissingFields(fields) = &err {
                    for field in fields {
                        if let Some(node) = page.input(*field) {
                            page.document_mut().add_class(node, ERROR_CLASS);
                        }
                    }
                }
                self.show_warning(page, &err);
                debug!(reason = %err, "submission rejected");
                Err(err)
            }
        }
    }

    fn show_warning(&mut self, page: &mut Page, err: &ValidationError) {
        let form = page.form();
        page.document_mut()
            .add_element(form, WARNING_ID, "p", &err.to_string(), &[WARNING_CLASS]);
        self.warned = true;
    }

    fn clear_warning(&mut self, page: &mut Page) {
        while let Some(node) = page.document().get_element_by_id(WARNING_ID) {
            page.document_mut().remove(node);
        }
        self.warned = false;
    }
}
