pub mod theme_toggle;
