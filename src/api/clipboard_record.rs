use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tauri::{AppHandle, State};

use crate::application::PasteService;
use crate::error::AppError;
use crate::infrastructure::storage::db::models::clipboard_record::{DbClipboardRecord, Filter};
use crate::infrastructure::storage::ClipboardRecordManager;

/// 返回给前端的记录结构
#[derive(Serialize, Deserialize)]
pub struct ClipboardRecordResponse {
    pub id: i32,
    pub record_type: String,
    pub record_value: String,
    pub pinned: bool,
    pub created_at: i32,
    pub updated_at: i32,
}

impl From<DbClipboardRecord> for ClipboardRecordResponse {
    fn from(record: DbClipboardRecord) -> Self {
        Self {
            id: record.id,
            record_type: record.record_type,
            record_value: record.record_value,
            pinned: record.pinned,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

// 按关键字与类型筛选剪贴板历史记录
#[tauri::command]
pub async fn filter_records(
    store: State<'_, Arc<ClipboardRecordManager>>,
    query: Option<String>,
    filter: Option<Filter>,
) -> Result<Vec<ClipboardRecordResponse>, String> {
    let records = store
        .get_records(query.as_deref(), filter)
        .map_err(AppError::from)?;
    Ok(records
        .into_iter()
        .map(ClipboardRecordResponse::from)
        .collect())
}

// 固定指定ID的记录
#[tauri::command]
pub async fn pin_record(
    store: State<'_, Arc<ClipboardRecordManager>>,
    id: i32,
) -> Result<(), String> {
    store.set_pinned(id, true).map_err(AppError::from)?;
    Ok(())
}

// 取消固定指定ID的记录
#[tauri::command]
pub async fn unpin_record(
    store: State<'_, Arc<ClipboardRecordManager>>,
    id: i32,
) -> Result<(), String> {
    store.set_pinned(id, false).map_err(AppError::from)?;
    Ok(())
}

// 删除指定ID的记录
#[tauri::command]
pub async fn delete_record(
    store: State<'_, Arc<ClipboardRecordManager>>,
    id: i32,
) -> Result<bool, String> {
    let deleted = store.delete_record(id).map_err(AppError::from)?;
    Ok(deleted)
}

// 清空所有未固定的记录
#[tauri::command]
pub async fn clear_records(
    store: State<'_, Arc<ClipboardRecordManager>>,
) -> Result<usize, String> {
    let count = store.clear_records().map_err(AppError::from)?;
    Ok(count)
}

// 把指定记录写回剪贴板并粘贴到之前的窗口
#[tauri::command]
pub async fn copy_record(
    app_handle: AppHandle,
    service: State<'_, Arc<PasteService>>,
    id: i32,
) -> Result<(), String> {
    service.copy_record(&app_handle, id).map_err(AppError::from)?;
    Ok(())
}
