pub mod app;
pub mod bootstrap;
pub mod card;
pub mod command_handler;
pub mod config;
pub mod reply;
pub mod request;
pub mod services;

pub use bootstrap::init_foundation;
pub use command_handler::{
    handle_barcode_request, handle_command, handle_intent, handle_qr_request,
};
