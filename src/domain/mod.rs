pub mod error;
pub mod form;
pub mod listing;
pub mod monthly;
pub mod summary;
pub mod transaction;
