//! Clock App - analog and digital desktop clock
//!
//! The analog engine lives in [`clock`]; everything else is the shell around
//! it: settings, translations, the debug console and the femtovg window.

pub mod app;
pub mod clock;
pub mod config;
pub mod console;
pub mod i18n;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod theme;
pub mod ui;
pub mod view;
pub mod worker;
