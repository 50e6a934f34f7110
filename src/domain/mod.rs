pub mod changes;
pub mod listing;
pub mod mappers;
pub mod requests;
pub mod search;
pub mod table;
