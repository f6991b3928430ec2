pub mod paste_service;

pub use paste_service::PasteService;
