use anyhow::Result;
use chrono::Utc;
use log::{error, info, warn};
use sha2::{Digest, Sha256};
use std::sync::RwLock;

use super::db::dao::clipboard_record as dao;
use super::db::models::clipboard_record::{
    DbClipboardRecord, Filter, NewClipboardRecord, RecordContent, RecordKind,
};
use super::db::pool::DB_POOL;
use super::image_store::ImageStore;

/// 剪贴板历史记录管理器
///
/// 负责记录的写入、去重、检索与按容量淘汰。
/// 固定的记录不参与淘汰，也不计入容量
pub struct ClipboardRecordManager {
    max_records: RwLock<u64>,
    image_store: ImageStore,
}

/// 计算内容hash，作为去重键
fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

impl ClipboardRecordManager {
    /// 创建一个新的剪贴板历史记录管理器
    pub fn new(max_records: u64, image_store: ImageStore) -> Self {
        Self {
            max_records: RwLock::new(max_records),
            image_store,
        }
    }

    pub fn image_store(&self) -> &ImageStore {
        &self.image_store
    }

    pub fn max_records(&self) -> u64 {
        *self.max_records.read().unwrap()
    }

    /// 添加一条文本记录
    ///
    /// 内容已存在时刷新旧记录的更新时间，返回旧记录ID
    pub fn add_text_record(&self, text: &str) -> Result<i32> {
        let record_hash = content_hash(text.as_bytes());
        let now = Utc::now().timestamp() as i32;
        let mut conn = DB_POOL.get_connection()?;

        if let Some(existing) = dao::get_clipboard_record_by_hash(&mut conn, &record_hash)? {
            dao::touch_clipboard_record(&mut conn, existing.id, now)?;
            return Ok(existing.id);
        }

        let record = NewClipboardRecord {
            record_type: RecordKind::Text.as_str().to_string(),
            record_value: text.to_string(),
            record_hash,
            pinned: false,
            created_at: now,
            updated_at: now,
        };
        let id = dao::insert_clipboard_record(&mut conn, &record)?;
        drop(conn);

        self.cleanup_after_insert();
        Ok(id)
    }

    /// 添加一条图片记录
    ///
    /// PNG 内容写入图片目录，数据库保存文件名
    pub fn add_image_record(&self, png_bytes: &[u8]) -> Result<i32> {
        let record_hash = content_hash(png_bytes);
        let now = Utc::now().timestamp() as i32;
        let mut conn = DB_POOL.get_connection()?;

        if let Some(existing) = dao::get_clipboard_record_by_hash(&mut conn, &record_hash)? {
            dao::touch_clipboard_record(&mut conn, existing.id, now)?;
            return Ok(existing.id);
        }

        let file_name = self
            .image_store
            .store(&format!("{}.png", record_hash), png_bytes)?;

        let record = NewClipboardRecord {
            record_type: RecordKind::Image.as_str().to_string(),
            record_value: file_name,
            record_hash,
            pinned: false,
            created_at: now,
            updated_at: now,
        };
        let id = dao::insert_clipboard_record(&mut conn, &record)?;
        drop(conn);

        self.cleanup_after_insert();
        Ok(id)
    }

    /// 获取历史记录列表
    ///
    /// 固定的记录排在前面，关键字只匹配文本内容
    pub fn get_records(
        &self,
        query: Option<&str>,
        filter: Option<Filter>,
    ) -> Result<Vec<DbClipboardRecord>> {
        let mut conn = DB_POOL.get_connection()?;
        let records = dao::query_clipboard_records(&mut conn, query, filter)?;
        Ok(records)
    }

    /// 获取指定ID的历史记录
    pub fn get_record_by_id(&self, id: i32) -> Result<Option<DbClipboardRecord>> {
        let mut conn = DB_POOL.get_connection()?;
        let record = dao::get_clipboard_record_by_id(&mut conn, id)?;
        Ok(record)
    }

    /// 更新记录的固定状态
    pub fn set_pinned(&self, id: i32, pinned: bool) -> Result<()> {
        let mut conn = DB_POOL.get_connection()?;
        dao::set_record_pinned(&mut conn, id, pinned)?;
        Ok(())
    }

    /// 删除指定ID的历史记录
    ///
    /// 图片记录同时删除对应的图片文件
    pub fn delete_record(&self, id: i32) -> Result<bool> {
        let mut conn = DB_POOL.get_connection()?;
        let record = dao::get_clipboard_record_by_id(&mut conn, id)?;
        let Some(record) = record else {
            return Ok(true);
        };

        self.delete_image_file(&record);
        dao::delete_clipboard_record(&mut conn, id)?;
        Ok(true)
    }

    /// 清空所有未固定的历史记录
    pub fn clear_records(&self) -> Result<usize> {
        let mut conn = DB_POOL.get_connection()?;
        let victims = dao::oldest_unpinned_records(&mut conn, i64::MAX)?;
        for record in &victims {
            self.delete_image_file(record);
        }
        let count = dao::clear_unpinned_records(&mut conn)?;
        Ok(count)
    }

    /// 更新最大记录数并立即淘汰超出的记录
    pub fn set_max_records(&self, max_records: u64) -> Result<()> {
        if max_records == 0 {
            anyhow::bail!("max_items must be at least 1");
        }
        *self.max_records.write().unwrap() = max_records;
        self.cleanup_old_records()?;
        Ok(())
    }

    /// 清理旧记录，保持未固定记录数量不超过最大限制
    pub fn cleanup_old_records(&self) -> Result<usize> {
        let max_records = self.max_records();
        let mut conn = DB_POOL.get_connection()?;

        let count = dao::get_unpinned_count(&mut conn)?;
        if count <= max_records as i64 {
            return Ok(0);
        }

        // 需要删除的记录数
        let to_delete = count - max_records as i64;

        let victims = dao::oldest_unpinned_records(&mut conn, to_delete)?;
        for record in &victims {
            self.delete_image_file(record);
        }

        let ids: Vec<i32> = victims.iter().map(|r| r.id).collect();
        let deleted = dao::delete_records_by_ids(&mut conn, &ids)?;

        info!("Cleaned up {} old clipboard records", deleted);

        Ok(deleted)
    }

    fn cleanup_after_insert(&self) {
        if let Err(e) = self.cleanup_old_records() {
            error!("Failed to cleanup old records: {:?}", e);
        }
    }

    /// 删除记录对应的图片文件，失败只告警不中断
    fn delete_image_file(&self, record: &DbClipboardRecord) {
        match record.content() {
            Some(RecordContent::Image(file_name)) => {
                if let Err(e) = self.image_store.delete(&file_name) {
                    warn!("Failed to delete image file {:?}: {}", file_name, e);
                }
            }
            Some(RecordContent::Text(_)) => {}
            None => {
                warn!("Record {} has unknown type: {}", record.id, record.record_type);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::db::schema::clipboard_records;
    use diesel::prelude::*;
    use serial_test::serial;
    use std::path::PathBuf;

    fn setup(max_records: u64) -> ClipboardRecordManager {
        let db_path = std::env::temp_dir().join(format!(
            "multipaste-record-test-{}.db",
            std::process::id()
        ));
        DB_POOL
            .init_with_url(db_path.to_str().unwrap())
            .expect("init test db");

        // 清空上一个用例留下的数据
        let mut conn = DB_POOL.get_connection().unwrap();
        diesel::delete(clipboard_records::table)
            .execute(&mut conn)
            .unwrap();

        let image_dir = std::env::temp_dir().join(format!(
            "multipaste-record-test-images-{}",
            std::process::id()
        ));
        ClipboardRecordManager::new(max_records, ImageStore::new(image_dir).unwrap())
    }

    fn force_updated_at(id: i32, updated_at: i32) {
        let mut conn = DB_POOL.get_connection().unwrap();
        diesel::update(clipboard_records::table.find(id))
            .set(clipboard_records::updated_at.eq(updated_at))
            .execute(&mut conn)
            .unwrap();
    }

    #[test]
    #[serial]
    fn test_add_text_dedup() {
        let manager = setup(100);

        let first = manager.add_text_record("hello world").unwrap();
        let second = manager.add_text_record("hello world").unwrap();
        assert_eq!(first, second);

        let records = manager.get_records(None, None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_value, "hello world");
    }

    #[test]
    #[serial]
    fn test_cleanup_evicts_oldest_unpinned() {
        let manager = setup(2);

        let a = manager.add_text_record("aaa").unwrap();
        let b = manager.add_text_record("bbb").unwrap();
        force_updated_at(a, 100);
        force_updated_at(b, 200);

        let c = manager.add_text_record("ccc").unwrap();
        force_updated_at(c, 300);
        manager.cleanup_old_records().unwrap();

        let records = manager.get_records(None, None).unwrap();
        let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
        assert_eq!(records.len(), 2);
        assert!(!ids.contains(&a));
        assert!(ids.contains(&b));
        assert!(ids.contains(&c));
    }

    #[test]
    #[serial]
    fn test_pinned_records_survive_eviction() {
        let manager = setup(1);

        let pinned = manager.add_text_record("keep me").unwrap();
        manager.set_pinned(pinned, true).unwrap();
        force_updated_at(pinned, 1);

        let b = manager.add_text_record("bbb").unwrap();
        force_updated_at(b, 100);
        let c = manager.add_text_record("ccc").unwrap();
        force_updated_at(c, 200);
        manager.cleanup_old_records().unwrap();

        let records = manager.get_records(None, None).unwrap();
        let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
        // 固定记录不计入容量也不被淘汰
        assert!(ids.contains(&pinned));
        assert!(ids.contains(&c));
        assert!(!ids.contains(&b));
    }

    #[test]
    #[serial]
    fn test_get_records_pinned_first() {
        let manager = setup(100);

        let a = manager.add_text_record("aaa").unwrap();
        let b = manager.add_text_record("bbb").unwrap();
        force_updated_at(a, 100);
        force_updated_at(b, 200);
        manager.set_pinned(a, true).unwrap();

        let records = manager.get_records(None, None).unwrap();
        assert_eq!(records[0].id, a);
        assert_eq!(records[1].id, b);
    }

    #[test]
    #[serial]
    fn test_query_matches_text_only() {
        let manager = setup(100);

        manager.add_text_record("rust is nice").unwrap();
        manager.add_text_record("hello world").unwrap();
        manager.add_image_record(b"fake-png-bytes").unwrap();

        let records = manager.get_records(Some("rust"), None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_value, "rust is nice");

        let images = manager
            .get_records(None, Some(Filter::Image))
            .unwrap();
        assert_eq!(images.len(), 1);
    }

    #[test]
    #[serial]
    fn test_delete_image_record_removes_file() {
        let manager = setup(100);

        let id = manager.add_image_record(b"fake-png-bytes").unwrap();
        let record = manager.get_record_by_id(id).unwrap().unwrap();
        let file_name = PathBuf::from(&record.record_value);
        let path = manager.image_store().path_of(&file_name);
        assert!(path.exists());

        assert!(manager.delete_record(id).unwrap());
        assert!(!path.exists());
        assert!(manager.get_record_by_id(id).unwrap().is_none());
    }

    #[test]
    #[serial]
    fn test_clear_keeps_pinned() {
        let manager = setup(100);

        let pinned = manager.add_text_record("keep me").unwrap();
        manager.set_pinned(pinned, true).unwrap();
        manager.add_text_record("bbb").unwrap();
        manager.add_text_record("ccc").unwrap();

        let cleared = manager.clear_records().unwrap();
        assert_eq!(cleared, 2);

        let records = manager.get_records(None, None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, pinned);
    }

    #[test]
    #[serial]
    fn test_set_max_records_rejects_zero() {
        let manager = setup(100);
        assert!(manager.set_max_records(0).is_err());
        assert_eq!(manager.max_records(), 100);
    }
}
