// Presentation layer: the interactive menu and one-shot commands. All user-facing text lives here.

pub mod commands;
pub mod menu;
pub mod render;

pub use menu::Menu;
