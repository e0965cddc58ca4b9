pub mod analyzing;
pub mod camera;
pub mod dashboard;
pub mod error_banner;
pub mod header;
pub mod settings_panel;
pub mod stats;
pub mod upload_area;
