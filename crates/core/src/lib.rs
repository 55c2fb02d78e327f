pub mod conflict;
pub mod errors;
pub mod models;
pub mod overlap;
pub mod paging;
pub mod validate;
