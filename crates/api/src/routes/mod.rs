pub mod availability;
pub mod conflict;
pub mod health;
pub mod release;
