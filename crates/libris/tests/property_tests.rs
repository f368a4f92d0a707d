//! Laws that hold for any collection

use libris::*;
use proptest::prelude::*;

fn pages() -> impl Strategy<Value = Pages> {
    prop_oneof![
        "[0-9a-z ]{0,5}".prop_map(Pages::Text),
        any::<u32>().prop_map(|n| Pages::from(u64::from(n))),
    ]
}

fn book() -> impl Strategy<Value = Book> {
    ("[A-Za-z \"\\\\]{0,16}", "[A-Za-z .]{0,16}", pages(), any::<bool>()).prop_map(
        |(title, author, pages, have_read)| Book {
            title,
            author,
            pages,
            have_read,
        },
    )
}

proptest! {
    #[test]
    fn save_then_load_is_identity(books in prop::collection::vec(book(), 0..8)) {
        let mut store = LibraryStore::new(MemoryStorage::new(), "myLibrary");
        store.save(&books).unwrap();
        prop_assert_eq!(store.load().unwrap(), books);
    }

    #[test]
    fn delete_keeps_the_rest_in_order(
        books in prop::collection::vec(book(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(books.len());
        let mut library = Library::from(books.clone());
        let removed = library.remove(index).unwrap();

        let mut expected = books.clone();
        prop_assert_eq!(&removed, &expected.remove(index));
        prop_assert_eq!(library.as_slice(), expected.as_slice());
    }

    #[test]
    fn double_toggle_restores(mut book in book()) {
        let before = book.have_read;
        book.toggle_read();
        book.toggle_read();
        prop_assert_eq!(book.have_read, before);
    }

    #[test]
    fn plural_only_above_one(n in 0u64..100_000) {
        let info = Book::new("T", "A", n.to_string(), false).info();
        if n > 1 {
            prop_assert!(info.contains(" pages, "));
        } else {
            prop_assert!(info.contains(" page, "));
        }
    }

    #[test]
    fn blank_submission_never_mutates(
        title in "[a-z]{0,3}",
        author in "[a-z]{0,3}",
        pages in "[0-9]{0,3}",
        tick_yes in any::<bool>(),
    ) {
        prop_assume!(title.is_empty() || author.is_empty() || pages.is_empty());

        let mut app = App::start(MemoryStorage::new(), LibraryConfig::default());
        app.dispatch(UiEvent::Input { field: Field::Title, value: title.clone() }).unwrap();
        app.dispatch(UiEvent::Input { field: Field::Author, value: author.clone() }).unwrap();
        app.dispatch(UiEvent::Input { field: Field::Pages, value: pages.clone() }).unwrap();
        if tick_yes {
            app.dispatch(UiEvent::CheckboxClicked(Checkbox::Yes)).unwrap();
        }

        let outcome = app.dispatch(UiEvent::Submit).unwrap();
        prop_assert!(app.library().is_empty());

        let input = FormInput { title, author, pages };
        let blank = input.blank_fields();
        prop_assert_eq!(outcome, Outcome::Rejected(ValidationError::MissingFields(blank.clone())));

        let doc = app.page().document();
        let warnings = doc.query_class("warning");
        prop_assert_eq!(warnings.len(), 1);
        let text = &doc.element(warnings[0]).unwrap().text;
        for field in blank {
            prop_assert!(text.contains(field.id()));
        }
    }
}
