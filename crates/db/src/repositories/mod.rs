pub mod availability;
pub mod booking;
pub mod examiner;
pub mod release;
