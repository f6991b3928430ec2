use crate::infrastructure::storage::db::models::clipboard_record::{
    DbClipboardRecord, Filter, NewClipboardRecord,
};
use crate::infrastructure::storage::db::schema::clipboard_records;
use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// 插入一条剪贴板记录，返回自增ID
pub fn insert_clipboard_record(
    conn: &mut SqliteConnection,
    record: &NewClipboardRecord,
) -> Result<i32> {
    let id = diesel::insert_into(clipboard_records::table)
        .values(record)
        .returning(clipboard_records::id)
        .get_result(conn)
        .context("Failed to insert clipboard record")?;
    Ok(id)
}

/// 查询指定ID的剪贴板记录
pub fn get_clipboard_record_by_id(
    conn: &mut SqliteConnection,
    id: i32,
) -> Result<Option<DbClipboardRecord>> {
    let record = clipboard_records::table
        .find(id)
        .select(DbClipboardRecord::as_select())
        .first(conn)
        .optional()
        .context("Failed to get clipboard record by id")?;
    Ok(record)
}

/// 查询指定内容hash的剪贴板记录
pub fn get_clipboard_record_by_hash(
    conn: &mut SqliteConnection,
    record_hash: &str,
) -> Result<Option<DbClipboardRecord>> {
    let record = clipboard_records::table
        .filter(clipboard_records::record_hash.eq(record_hash))
        .select(DbClipboardRecord::as_select())
        .first(conn)
        .optional()
        .context("Failed to get clipboard record by hash")?;
    Ok(record)
}

/// 刷新记录的更新时间
///
/// 重复复制同一内容时只把旧记录顶到最前，不产生新记录
pub fn touch_clipboard_record(conn: &mut SqliteConnection, id: i32, now: i32) -> Result<()> {
    diesel::update(clipboard_records::table.find(id))
        .set(clipboard_records::updated_at.eq(now))
        .execute(conn)
        .context("Failed to touch clipboard record")?;
    Ok(())
}

/// 更新记录的固定状态
pub fn set_record_pinned(conn: &mut SqliteConnection, id: i32, pinned: bool) -> Result<()> {
    diesel::update(clipboard_records::table.find(id))
        .set(clipboard_records::pinned.eq(pinned))
        .execute(conn)
        .context("Failed to update pinned state")?;
    Ok(())
}

/// 删除指定ID的剪贴板记录
pub fn delete_clipboard_record(conn: &mut SqliteConnection, id: i32) -> Result<()> {
    diesel::delete(clipboard_records::table.find(id))
        .execute(conn)
        .context("Failed to delete clipboard record")?;
    Ok(())
}

/// 清空所有未固定的剪贴板记录
pub fn clear_unpinned_records(conn: &mut SqliteConnection) -> Result<usize> {
    let count = diesel::delete(clipboard_records::table.filter(clipboard_records::pinned.eq(false)))
        .execute(conn)
        .context("Failed to clear unpinned clipboard records")?;
    Ok(count)
}

/// 获取未固定的记录总数
pub fn get_unpinned_count(conn: &mut SqliteConnection) -> Result<i64> {
    let count = clipboard_records::table
        .filter(clipboard_records::pinned.eq(false))
        .count()
        .get_result(conn)
        .context("Failed to get unpinned record count")?;
    Ok(count)
}

/// 查询剪贴板记录
///
/// 固定的记录排在前面，其余按更新时间倒序。
/// 搜索关键字只匹配文本记录的内容
pub fn query_clipboard_records(
    conn: &mut SqliteConnection,
    query: Option<&str>,
    filter: Option<Filter>,
) -> Result<Vec<DbClipboardRecord>> {
    let mut sql = clipboard_records::table.into_boxed();

    match filter.unwrap_or_default() {
        Filter::All => {}
        Filter::Pinned => {
            sql = sql.filter(clipboard_records::pinned.eq(true));
        }
        Filter::Text => {
            sql = sql.filter(clipboard_records::record_type.eq("text"));
        }
        Filter::Image => {
            sql = sql.filter(clipboard_records::record_type.eq("image"));
        }
    }

    if let Some(query) = query {
        let query = query.trim();
        if !query.is_empty() {
            sql = sql.filter(
                clipboard_records::record_type
                    .eq("text")
                    .and(clipboard_records::record_value.like(format!("%{}%", query))),
            );
        }
    }

    let records = sql
        .order((
            clipboard_records::pinned.desc(),
            clipboard_records::updated_at.desc(),
        ))
        .select(DbClipboardRecord::as_select())
        .load(conn)
        .context("Failed to query clipboard records")?;

    Ok(records)
}

/// 获取最早的未固定记录，用于淘汰
pub fn oldest_unpinned_records(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<DbClipboardRecord>> {
    let records = clipboard_records::table
        .filter(clipboard_records::pinned.eq(false))
        .order_by(clipboard_records::updated_at.asc())
        .limit(limit)
        .select(DbClipboardRecord::as_select())
        .load(conn)
        .context("Failed to load oldest unpinned records")?;
    Ok(records)
}

/// 按ID批量删除记录
pub fn delete_records_by_ids(conn: &mut SqliteConnection, ids: &[i32]) -> Result<usize> {
    let deleted =
        diesel::delete(clipboard_records::table.filter(clipboard_records::id.eq_any(ids)))
            .execute(conn)
            .context("Failed to delete clipboard records")?;
    Ok(deleted)
}
