use caseless::default_case_fold_str;
use crate::books::dto::BookDto;

// SearchType selects which fields a search term is matched against.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SearchType {
    Title,
    Author,
    Isbn,
    All,
}

impl From<&str> for SearchType {
    // unknown selectors search everything
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "title" => SearchType::Title,
            "author" => SearchType::Author,
            "isbn" => SearchType::Isbn,
            _ => SearchType::All,
        }
    }
}

// hyphens and spaces are ignored when comparing ISBNs
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

pub(crate) fn is_blank_term(term: &str) -> bool {
    term.trim().is_empty()
}

// filter_books keeps the books matching the term and orders them by title then author. Title and
// author are compared after full Unicode case folding, so "STRASSE" matches "Straße".
pub fn filter_books(books: Vec<BookDto>, term: &str, search_type: SearchType) -> Vec<BookDto> {
    if is_blank_term(term) {
        return vec![];
    }
    let term = term.trim();
    let term_fold = default_case_fold_str(term);
    let isbn_term = normalize_isbn(term);
    let mut matched: Vec<BookDto> = books.into_iter().filter(|book| {
        let title = default_case_fold_str(book.title.as_str());
        let author = default_case_fold_str(book.author.as_str());
        let isbn = normalize_isbn(book.isbn.as_str());
        match search_type {
            SearchType::Title => title.contains(term_fold.as_str()),
            SearchType::Author => author.contains(term_fold.as_str()),
            SearchType::Isbn => isbn == isbn_term,
            SearchType::All => {
                title.contains(term_fold.as_str())
                    || author.contains(term_fold.as_str())
                    || (!isbn_term.is_empty() && isbn.contains(isbn_term.as_str()))
            }
        }
    }).collect();
    matched.sort_by_cached_key(|b| (default_case_fold_str(b.title.as_str()), default_case_fold_str(b.author.as_str())));
    matched
}
