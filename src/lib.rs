// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

pub mod api;
pub mod application;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod utils;

use application::PasteService;
use config::Setting;
use infrastructure::clipboard::SystemClipboard;
use infrastructure::storage::db::pool::DB_POOL;
use infrastructure::storage::{ClipboardRecordManager, ImageStore};
use infrastructure::{clipboard, shortcut, tray, window};
use log::{error, warn};
use std::sync::Arc;
use tauri::Manager;
use utils::logging;

fn setup(
    app: &mut tauri::App,
    store: Arc<ClipboardRecordManager>,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    // 隐藏 Dock 图标，应用只存在于托盘和快捷键里
    #[cfg(target_os = "macos")]
    app.set_activation_policy(tauri::ActivationPolicy::Accessory);

    tray::init(app)?;

    // 快捷键被其他应用占用不应阻止启动
    if let Err(e) = shortcut::init(app) {
        warn!("Failed to register global shortcuts: {}", e);
    }

    let watcher_handle = clipboard::watcher::init(store).map_err(|e| e.to_string())?;
    app.manage(watcher_handle);

    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // 加载用户设置
    let user_setting = match Setting::load(None) {
        Ok(setting) => setting,
        Err(e) => {
            error!("加载配置失败: {}", e);
            // 如果加载失败，使用默认配置
            let default_setting = Setting::default();
            if let Err(e) = default_setting.save(None) {
                error!("保存默认配置失败: {}", e);
            }
            default_setting
        }
    };

    // 初始化数据库
    if let Err(e) = DB_POOL.init() {
        error!("Failed to initialize database: {}", e);
        panic!("Failed to initialize database: {}", e);
    }

    let image_store = match ImageStore::from_config() {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize image store: {}", e);
            panic!("Failed to initialize image store: {}", e);
        }
    };

    let store = Arc::new(ClipboardRecordManager::new(
        user_setting.max_items,
        image_store,
    ));
    let paste_service = Arc::new(PasteService::new(
        store.clone(),
        Arc::new(SystemClipboard::new()),
    ));

    let mut builder = tauri::Builder::default()
        .plugin(logging::get_builder().build())
        .plugin(tauri_plugin_positioner::init());

    #[cfg(desktop)]
    {
        use tauri_plugin_autostart::MacosLauncher;

        builder = builder
            .plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {}))
            .plugin(tauri_plugin_autostart::init(
                MacosLauncher::LaunchAgent,
                Some(vec![]),
            ));
    }

    let app = builder
        .manage(store.clone())
        .manage(paste_service)
        .on_window_event(window::on_window_event)
        .setup(move |app| setup(app, store))
        .invoke_handler(tauri::generate_handler![
            api::clipboard_record::filter_records,
            api::clipboard_record::pin_record,
            api::clipboard_record::unpin_record,
            api::clipboard_record::delete_record,
            api::clipboard_record::clear_records,
            api::clipboard_record::copy_record,
            api::window::awake,
            api::window::search_focus,
            api::setting::get_setting,
            api::setting::update_auto_start,
            api::setting::update_max_items,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| match event {
        tauri::RunEvent::Exit => {
            // 全局快捷键和监听线程的生命周期不能超出应用
            shortcut::shutdown(app_handle);
            if let Some(watcher) = app_handle.try_state::<clipboard::ClipboardWatcherHandle>() {
                watcher.stop();
            }
        }
        _ => {}
    });
}
