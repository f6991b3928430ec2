pub mod system;
pub mod watcher;

pub use system::{ClipboardPort, SystemClipboard};
pub use watcher::ClipboardWatcherHandle;
