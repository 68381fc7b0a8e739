pub mod pdf_drop_zone;
pub mod top_bar;
pub mod ui;
