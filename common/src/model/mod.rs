pub mod menu;
pub mod order;
pub mod reservation;
pub mod user;
