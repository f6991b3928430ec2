use anyhow::Result;
use log::warn;
use std::sync::{Arc, Mutex};
use tauri::{AppHandle, Emitter, Manager};
use tauri_plugin_positioner::{Position, WindowExt};

use crate::infrastructure::clipboard::ClipboardPort;
use crate::infrastructure::platform::{self, WindowInfo};
use crate::infrastructure::storage::db::models::clipboard_record::RecordContent;
use crate::infrastructure::storage::ClipboardRecordManager;
use crate::infrastructure::window;

/// 唤醒与粘贴服务
///
/// 负责主窗口的唤醒、把历史记录写回系统剪贴板、
/// 以及回到唤醒前的窗口并触发粘贴
pub struct PasteService {
    store: Arc<ClipboardRecordManager>,
    clipboard: Arc<dyn ClipboardPort>,
    active_window: Mutex<Option<WindowInfo>>,
}

impl PasteService {
    pub fn new(store: Arc<ClipboardRecordManager>, clipboard: Arc<dyn ClipboardPort>) -> Self {
        Self {
            store,
            clipboard,
            active_window: Mutex::new(None),
        }
    }

    /// 唤醒主窗口
    ///
    /// 记录当前前台窗口，居中显示主窗口并把最新记录推给前端。
    /// 主窗口已可见时不做任何事
    pub fn awake(&self, app_handle: &AppHandle) -> Result<()> {
        let main_window = match app_handle.get_webview_window("main") {
            Some(window) => window,
            None => window::create_main_window(app_handle)?,
        };

        if main_window.is_visible()? {
            return Ok(());
        }

        // 先记住前台窗口，show 之后焦点就换成自己了
        *self.active_window.lock().unwrap() = platform::get_active_window_info();

        main_window.move_window(Position::Center)?;
        main_window.show()?;
        main_window.set_focus()?;

        let records = self.store.get_records(None, None)?;
        app_handle.emit("fill-records", &records)?;
        Ok(())
    }

    /// 唤醒主窗口并让前端聚焦搜索框
    pub fn search_focus(&self, app_handle: &AppHandle) -> Result<()> {
        self.awake(app_handle)?;
        app_handle.emit("search-focus", ())?;
        Ok(())
    }

    /// 把指定记录写回剪贴板，隐藏主窗口后回到原窗口粘贴
    pub fn copy_record(&self, app_handle: &AppHandle, id: i32) -> Result<()> {
        self.write_record_to_clipboard(id)?;

        if let Some(main_window) = app_handle.get_webview_window("main") {
            if let Err(e) = main_window.hide() {
                warn!("Failed to hide main window: {}", e);
            }
        }

        self.restore_and_paste();
        Ok(())
    }

    /// 将记录内容写回系统剪贴板
    pub fn write_record_to_clipboard(&self, id: i32) -> Result<()> {
        let record = self
            .store
            .get_record_by_id(id)?
            .ok_or_else(|| anyhow::anyhow!("Record {} not found", id))?;

        match record.content() {
            Some(RecordContent::Text(text)) => self.clipboard.write_text(&text),
            Some(RecordContent::Image(file_name)) => self
                .clipboard
                .write_image(&self.store.image_store().path_of(&file_name)),
            None => anyhow::bail!("Record {} has unknown type: {}", id, record.record_type),
        }
    }

    /// 回到唤醒前的窗口并发送粘贴按键
    fn restore_and_paste(&self) {
        let active_window = self.active_window.lock().unwrap();
        if let Some(window_info) = active_window.as_ref() {
            platform::activate_window(window_info);
            if let Err(e) = platform::paste() {
                warn!("Failed to send paste keystroke: {}", e);
            }
        } else {
            warn!("No previous active window recorded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::db::pool::DB_POOL;
    use crate::infrastructure::storage::db::schema::clipboard_records;
    use crate::infrastructure::storage::ImageStore;
    use diesel::prelude::*;
    use serial_test::serial;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex as StdMutex;

    /// 内存剪贴板，记录最后一次写入
    #[derive(Default)]
    struct FakeClipboard {
        texts: StdMutex<Vec<String>>,
        images: StdMutex<Vec<PathBuf>>,
    }

    impl ClipboardPort for FakeClipboard {
        fn write_text(&self, text: &str) -> Result<()> {
            self.texts.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn write_image(&self, image_path: &Path) -> Result<()> {
            self.images.lock().unwrap().push(image_path.to_path_buf());
            Ok(())
        }
    }

    fn setup() -> (Arc<ClipboardRecordManager>, Arc<FakeClipboard>, PasteService) {
        let db_path = std::env::temp_dir().join(format!(
            "multipaste-record-test-{}.db",
            std::process::id()
        ));
        DB_POOL
            .init_with_url(db_path.to_str().unwrap())
            .expect("init test db");
        let mut conn = DB_POOL.get_connection().unwrap();
        diesel::delete(clipboard_records::table)
            .execute(&mut conn)
            .unwrap();

        let image_dir = std::env::temp_dir().join(format!(
            "multipaste-record-test-images-{}",
            std::process::id()
        ));
        let store = Arc::new(ClipboardRecordManager::new(
            100,
            ImageStore::new(image_dir).unwrap(),
        ));
        let clipboard = Arc::new(FakeClipboard::default());
        let service = PasteService::new(store.clone(), clipboard.clone());
        (store, clipboard, service)
    }

    #[test]
    #[serial]
    fn test_write_text_record_to_clipboard() {
        let (store, clipboard, service) = setup();

        let id = store.add_text_record("hello").unwrap();
        service.write_record_to_clipboard(id).unwrap();

        assert_eq!(clipboard.texts.lock().unwrap().as_slice(), ["hello"]);
    }

    #[test]
    #[serial]
    fn test_write_image_record_to_clipboard() {
        let (store, clipboard, service) = setup();

        let id = store.add_image_record(b"fake-png-bytes").unwrap();
        let record = store.get_record_by_id(id).unwrap().unwrap();
        service.write_record_to_clipboard(id).unwrap();

        let images = clipboard.images.lock().unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].ends_with(&record.record_value));
    }

    #[test]
    #[serial]
    fn test_write_missing_record_is_error() {
        let (_store, _clipboard, service) = setup();
        assert!(service.write_record_to_clipboard(9999).is_err());
    }
}
