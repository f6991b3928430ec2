use std::sync::Arc;
use tauri::{AppHandle, State};

use crate::application::PasteService;
use crate::error::AppError;

// 唤醒主窗口（全局快捷键 Ctrl+V 的命令形式）
#[tauri::command]
pub async fn awake(
    app_handle: AppHandle,
    service: State<'_, Arc<PasteService>>,
) -> Result<(), String> {
    service.awake(&app_handle).map_err(AppError::from)?;
    Ok(())
}

// 唤醒主窗口并聚焦搜索框（全局快捷键 Ctrl+F 的命令形式）
#[tauri::command]
pub async fn search_focus(
    app_handle: AppHandle,
    service: State<'_, Arc<PasteService>>,
) -> Result<(), String> {
    service.search_focus(&app_handle).map_err(AppError::from)?;
    Ok(())
}
