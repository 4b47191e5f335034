//! Clio - a terminal companion for exploring history
//!
//! Clio presents history topics grouped by era, each with a summary that can
//! be read aloud with the spoken word highlighted, a curiosity, a timeline,
//! flashcards and a short quiz.

pub mod app;
pub mod config;
pub mod speech;
pub mod study;
pub mod theme;
pub mod topics;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
