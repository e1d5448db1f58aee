pub mod app;
pub mod header;
pub mod info_panel;
pub mod track;
