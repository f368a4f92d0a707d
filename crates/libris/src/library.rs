//! The in-memory collection of books

use crate::book::Book;
use crate::error::{LibraryError, Result};

/// The authoritative ordered collection of books.
///
/// Books are addressed by index. Order is insertion order and only
/// [`push`](Library::push) and [`remove`](Library::remove) change it.
///
/// # Example
///
/// ```
/// use libris::{Book, Library};
///
/// let mut library = Library::new();
/// library.push(Book::new("Dune", "Herbert", "412", false));
/// library.push(Book::new("Emma", "Austen", "474", true));
///
/// library.toggle_read(0).unwrap();
/// assert!(library.get(0).unwrap().have_read);
///
/// let removed = library.remove(1).unwrap();
/// assert_eq!(removed.title, "Emma");
/// assert_eq!(library.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Mutation
    // ═══════════════════════════════════════════════════════════════════

    /// Append a book at the end.
    pub fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Remove and return the book at `index`, shifting later books down.
    pub fn remove(&mut self, index: usize) -> Result<Book> {
        self.check_index(index)?;
        Ok(self.books.remove(index))
    }

    /// Flip the read flag of the book at `index`.
    pub fn toggle_read(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.books[index].toggle_read();
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Book at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Iterate books in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    /// All books as a slice.
    pub fn as_slice(&self) -> &[Book] {
        &self.books
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the library holds no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.books.len() {
            return Err(LibraryError::IndexOutOfRange {
                index,
                len: self.books.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<Book>> for Library {
    fn from(books: Vec<Book>) -> Self {
        Self { books }
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Library {
        Library::from(vec![
            Book::new("A", "a", "1", false),
            Book::new("B", "b", "2", true),
            Book::new("C", "c", "3", false),
        ])
    }

    #[test]
    fn test_remove_middle_preserves_order() {
        let mut library = sample();
        let removed = library.remove(1).unwrap();
        assert_eq!(removed.title, "B");
        let titles: Vec<_> = library.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut library = sample();
        let err = library.remove(3).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::IndexOutOfRange { index: 3, len: 3 }
        ));
        assert_eq!(library.len(), 3);
    }

    #[test]
    fn test_toggle_read_by_index() {
        let mut library = sample();
        library.toggle_read(2).unwrap();
        assert!(library.get(2).unwrap().have_read);
        assert!(library.toggle_read(9).is_err());
    }

    #[test]
    fn test_empty() {
        let mut library = sample();
        assert!(!library.is_empty());
        while !library.is_empty() {
            library.remove(0).unwrap();
        }
        assert!(library.is_empty());
        assert_eq!(library.get(0), None);
        assert!(Library::new().is_empty());
    }
}
