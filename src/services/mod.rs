pub mod catalog;
pub mod quiz;

pub use catalog::{
    paginate, parse_page, CatalogService, CategoryListing, PageWindow, QuestionListing,
    SearchResults, QUESTIONS_PER_PAGE,
};
pub use quiz::{QuizSelector, SelectionStrategy};
