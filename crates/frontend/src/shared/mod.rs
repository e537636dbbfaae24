pub mod components;
pub mod config;
pub mod icons;
pub mod modal;
pub mod preview;
pub mod upload_dialog;
