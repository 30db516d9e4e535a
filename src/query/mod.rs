//! Read-only queries over the catalog

pub mod filter;
pub mod join;
pub mod reports;

pub use filter::Filter;
pub use reports::{
    author_book_counts, authors_ranked_by_books, books_with_author, books_with_author_full,
    count_books, AuthorBookCount, BookWithAuthor, RankedAuthor,
};
