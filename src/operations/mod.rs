pub mod add;
pub mod dashboard;
pub mod edit;
pub mod import;
pub mod remove;
pub mod search_by_category;
