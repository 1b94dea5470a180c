pub mod orders;
pub mod reservations;
