//! State and logic for the pin-drop map, independent of the browser.

pub mod collaborators;
pub mod error;
pub mod geo;
pub mod locate;
pub mod models;
pub mod relative_time;
pub mod search;
pub mod shell;
