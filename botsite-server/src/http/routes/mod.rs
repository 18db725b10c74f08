//! Route handlers organized by subdomain and resource

pub mod api;
pub mod asana;
pub mod errors;
pub mod health;
pub mod main_site;
pub mod staff;
pub mod tags;
pub mod users;
