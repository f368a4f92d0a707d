//! Projection of the library into book cards
//!
//! Every call to [`render`] throws the previous cards away and rebuilds them
//! from the collection. Card controls carry their action and the index of
//! their book as plain attributes, so a click is resolved against the current
//! collection by [`resolve_control`] rather than by anything captured when
//! the card was built.

use std::fmt;
use std::str::FromStr;

use crate::book::Book;
use crate::config::LibraryConfig;
use crate::dom::{Document, NodeId};
use crate::error::{LibraryError, Result};
use crate::library::Library;
use crate::page::Page;

/// Class of a card container.
pub const CARD_CLASS: &str = "container-card";

/// Class of the per-card control strip.
pub const BUTTON_CONTAINER_CLASS: &str = "button-container";

/// Class shared by every card text element.
pub const CARD_TEXT_CLASS: &str = "container-card__text";

/// Extra class on the card title.
pub const CARD_TITLE_CLASS: &str = "container-card__text--title";

/// Attribute naming a control's action.
pub const ACTION_ATTR: &str = "data-action";

/// Attribute holding a control's book index.
pub const INDEX_ATTR: &str = "data-index";

/// What a card control does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Remove the book
    Delete,
    /// Flip the book's read flag
    ToggleRead,
}

impl ControlAction {
    /// Attribute value identifying the action.
    pub fn as_str(self) -> &'static str {
        match self {
            ControlAction::Delete => "delete",
            ControlAction::ToggleRead => "toggle-read",
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlAction {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "delete" => Ok(ControlAction::Delete),
            "toggle-read" => Ok(ControlAction::ToggleRead),
            _ => Err(()),
        }
    }
}

/// A resolved card control: an action bound to a book index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    /// What the control does
    pub action: ControlAction,
    /// Index of the book it acts on
    pub index: usize,
}

/// Rebuild every card from `library`.
///
/// Returns the card containers in collection order.
pub fn render(page: &mut Page, library: &Library, config: &LibraryConfig) -> Vec<NodeId> {
    clear_cards(page);
    library
        .iter()
        .enumerate()
        .filter_map(|(index, book)| render_card(page, index, book, config))
        .collect()
}

/// Remove every rendered card.
pub fn clear_cards(page: &mut Page) {
    let doc = page.document_mut();
    for card in doc.query_class(CARD_CLASS) {
        doc.remove(card);
    }
}

fn render_card(
    page: &mut Page,
    index: usize,
    book: &Book,
    config: &LibraryConfig,
) -> Option<NodeId> {
    let container = page.library();
    let doc = page.document_mut();

    let card = doc.add_element(
        container,
        &format!("containerCard{index}"),
        "div",
        "",
        &[CARD_CLASS],
    )?;
    let buttons = doc.add_element(
        card,
        &format!("buttonContainer{index}"),
        "div",
        "",
        &[BUTTON_CONTAINER_CLASS],
    )?;

    let delete = doc.add_element(buttons, &format!("deleteButton{index}"), "img", "", &[])?;
    doc.set_attribute(delete, "src", config.delete_icon.as_str());
    bind_control(doc, delete, ControlAction::Delete, index, config);

    let toggle = doc.add_element(buttons, &format!("readToggle{index}"), "img", "", &[])?;
    doc.set_attribute(toggle, "src", config.read_toggle_icon(book.have_read));
    bind_control(doc, toggle, ControlAction::ToggleRead, index, config);

    doc.add_element(
        card,
        &format!("titleCard{index}"),
        "h2",
        &book.title,
        &[CARD_TEXT_CLASS, CARD_TITLE_CLASS],
    );
    doc.add_element(card, &format!("authorCard{index}"), "p", &book.author, &[CARD_TEXT_CLASS]);
    doc.add_element(
        card,
        &format!("pageCard{index}"),
        "p",
        &book.pages.to_string(),
        &[CARD_TEXT_CLASS],
    );
    Some(card)
}

fn bind_control(
    doc: &mut Document,
    node: NodeId,
    action: ControlAction,
    index: usize,
    config: &LibraryConfig,
) {
    doc.set_attribute(node, "width", config.icon_size.as_str());
    doc.set_attribute(node, "height", config.icon_size.as_str());
    doc.set_attribute(node, ACTION_ATTR, action.as_str());
    doc.set_attribute(node, INDEX_ATTR, index.to_string());
}

/// Resolve the control behind the element with id `element_id`.
///
/// Fails with [`LibraryError::UnknownControl`] if no such element exists or
/// it is not a card control.
pub fn resolve_control(page: &Page, element_id: &str) -> Result<Control> {
    let unknown = || LibraryError::UnknownControl(element_id.to_string());
    let doc = page.document();
    let element = doc
        .get_element_by_id(element_id)
        .and_then(|node| doc.element(node))
        .ok_or_else(unknown)?;
    let action = element
        .attribute(ACTION_ATTR)
        .and_then(|a| a.parse::<ControlAction>().ok())
        .ok_or_else(unknown)?;
    let index = element
        .attribute(INDEX_ATTR)
        .and_then(|i| i.parse::<usize>().ok())
        .ok_or_else(unknown)?;
    Ok(Control { action, index })
}

/// Number of cards currently on the page.
pub fn card_count(page: &Page) -> usize {
    page.document().query_class(CARD_CLASS).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup(books: Vec<Book>) -> (Page, Library, LibraryConfig) {
        let config = LibraryConfig::default();
        (Page::new(&config), Library::from(books), config)
    }

    fn attr(page: &Page, id: &str, name: &str) -> Option<String> {
        let doc = page.document();
        doc.get_element_by_id(id)
            .and_then(|n| doc.element(n))
            .and_then(|e| e.attribute(name))
            .map(str::to_string)
    }

    #[test]
    fn test_render_card_structure() {
        let (mut page, library, config) = setup(vec![Book::new("Dune", "Herbert", "412", true)]);
        let cards = render(&mut page, &library, &config);
        assert_eq!(cards.len(), 1);

        let doc = page.document();
        let card = doc.element(cards[0]).unwrap();
        assert_eq!(card.id, "containerCard0");
        let ids: Vec<_> = card
            .children()
            .iter()
            .filter_map(|n| doc.element(*n))
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["buttonContainer0", "titleCard0", "authorCard0", "pageCard0"]);

        let title = doc.element(doc.get_element_by_id("titleCard0").unwrap()).unwrap();
        assert_eq!(title.tag, "h2");
        assert_eq!(title.text, "Dune");
        assert!(title.has_class(CARD_TITLE_CLASS));

        assert_eq!(attr(&page, "deleteButton0", "src").as_deref(), Some("trash-solid.svg"));
        assert_eq!(attr(&page, "readToggle0", "src").as_deref(), Some("book-open-solid.svg"));
        assert_eq!(attr(&page, "readToggle0", "width").as_deref(), Some("15px"));
    }

    #[test]
    fn test_unread_icon() {
        let (mut page, library, config) = setup(vec![Book::new("A", "B", "1", false)]);
        render(&mut page, &library, &config);
        assert_eq!(attr(&page, "readToggle0", "src").as_deref(), Some("book-solid.svg"));
    }

    #[test]
    fn test_rerender_replaces_cards() {
        let (mut page, mut library, config) = setup(vec![
            Book::new("A", "a", "1", false),
            Book::new("B", "b", "2", false),
            Book::new("C", "c", "3", false),
        ]);
        render(&mut page, &library, &config);
        assert_eq!(card_count(&page), 3);

        library.remove(0).unwrap();
        render(&mut page, &library, &config);
        assert_eq!(card_count(&page), 2);

        let doc = page.document();
        let title = doc.element(doc.get_element_by_id("titleCard0").unwrap()).unwrap();
        assert_eq!(title.text, "B");
        assert!(doc.get_element_by_id("containerCard2").is_none());
    }

    #[test]
    fn test_resolve_control() {
        let (mut page, library, config) = setup(vec![
            Book::new("A", "a", "1", false),
            Book::new("B", "b", "2", false),
        ]);
        render(&mut page, &library, &config);

        assert_eq!(
            resolve_control(&page, "deleteButton1").unwrap(),
            Control {
                action: ControlAction::Delete,
                index: 1
            }
        );
        assert_eq!(
            resolve_control(&page, "readToggle0").unwrap(),
            Control {
                action: ControlAction::ToggleRead,
                index: 0
            }
        );
        assert!(matches!(
            resolve_control(&page, "titleCard0"),
            Err(LibraryError::UnknownControl(_))
        ));
        assert!(resolve_control(&page, "deleteButton7").is_err());
    }

    #[test]
    fn test_action_round_trip() {
        for action in [ControlAction::Delete, ControlAction::ToggleRead] {
            assert_eq!(action.to_string().parse::<ControlAction>(), Ok(action));
        }
        assert!("explode".parse::<ControlAction>().is_err());
    }
}
