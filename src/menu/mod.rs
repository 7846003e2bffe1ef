mod handlers;
mod main_menu;
mod settings_menu;

pub use main_menu::show_main_menu;
