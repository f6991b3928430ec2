pub mod clipboard_record;
pub mod setting;
pub mod window;
