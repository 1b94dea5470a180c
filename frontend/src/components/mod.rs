pub mod admin;
pub mod auth;
pub mod cart;
pub mod header;
pub mod helpers;
pub mod menu;
pub mod orders;
pub mod progress_tracker;
pub mod reservation;
pub mod rider;
