use anyhow::Result;
use clipboard_rs::common::RustImage;
use clipboard_rs::{
    Clipboard, ClipboardContext, ClipboardHandler, ClipboardWatcher as RsClipboardWatcher,
    ClipboardWatcherContext, WatcherShutdown,
};
use log::{error, info, warn};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::infrastructure::storage::ClipboardRecordManager;

/// 剪贴板变更监听器
///
/// 文本优先；空白文本忽略；图片统一转成 PNG 入库
pub struct ClipboardWatcher {
    ctx: ClipboardContext,
    store: Arc<ClipboardRecordManager>,
}

impl ClipboardWatcher {
    pub fn new(store: Arc<ClipboardRecordManager>) -> Result<Self> {
        let ctx = ClipboardContext::new()
            .map_err(|e| anyhow::anyhow!("Failed to open clipboard: {}", e))?;
        Ok(ClipboardWatcher { ctx, store })
    }
}

impl ClipboardHandler for ClipboardWatcher {
    fn on_clipboard_change(&mut self) {
        let text = self.ctx.get_text().unwrap_or_default();
        if !text.trim().is_empty() {
            if let Err(err) = self.store.add_text_record(&text) {
                error!("Error saving text: {}", err);
            }
            return;
        }

        if let Ok(img) = self.ctx.get_image() {
            match img.to_png() {
                Ok(png) => {
                    if let Err(err) = self.store.add_image_record(png.get_bytes()) {
                        error!("Error saving image: {}", err);
                    }
                }
                Err(e) => {
                    warn!("Error encoding clipboard image to png: {}", e);
                }
            }
        }
    }
}

/// 监听线程的停止句柄
///
/// 应用退出时调用 stop，保证监听线程随应用一起收尾
pub struct ClipboardWatcherHandle {
    shutdown: Mutex<Option<WatcherShutdown>>,
}

impl ClipboardWatcherHandle {
    pub fn stop(&self) {
        if let Some(handle) = self.shutdown.lock().unwrap().take() {
            handle.stop();
            info!("Clipboard watcher stopped");
        }
    }
}

/// 启动剪贴板监听线程，返回停止句柄
pub fn init(store: Arc<ClipboardRecordManager>) -> Result<ClipboardWatcherHandle> {
    let handler = ClipboardWatcher::new(store)?;
    let mut watcher_ctx: ClipboardWatcherContext<ClipboardWatcher> =
        ClipboardWatcherContext::new()
            .map_err(|e| anyhow::anyhow!("Failed to create watcher context: {}", e))?;

    let shutdown = watcher_ctx.add_handler(handler).get_shutdown_channel();

    thread::Builder::new()
        .name("clipboard-watcher".to_string())
        .spawn(move || {
            info!("start clipboard watch");
            watcher_ctx.start_watch();
            info!("clipboard watch exited");
        })?;

    Ok(ClipboardWatcherHandle {
        shutdown: Mutex::new(Some(shutdown)),
    })
}
