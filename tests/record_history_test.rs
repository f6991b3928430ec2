//! 剪贴板历史的端到端测试
//!
//! 直接走 DB_POOL + ClipboardRecordManager，覆盖捕获入库到淘汰的完整链路

use multipaste_lib::infrastructure::storage::db::models::clipboard_record::Filter;
use multipaste_lib::infrastructure::storage::db::pool::DB_POOL;
use multipaste_lib::infrastructure::storage::db::schema::clipboard_records;
use multipaste_lib::infrastructure::storage::{ClipboardRecordManager, ImageStore};

use diesel::prelude::*;
use serial_test::serial;

fn setup(max_records: u64) -> ClipboardRecordManager {
    let db_path = std::env::temp_dir().join(format!(
        "multipaste-history-test-{}.db",
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
        "multipaste-history-test-images-{}",
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
fn capture_pin_and_evict_lifecycle() {
    let manager = setup(2);

    // 捕获三条文本，其中一条固定
    let keep = manager.add_text_record("pinned note").unwrap();
    manager.set_pinned(keep, true).unwrap();
    force_updated_at(keep, 10);

    let old = manager.add_text_record("old entry").unwrap();
    force_updated_at(old, 100);
    let mid = manager.add_text_record("mid entry").unwrap();
    force_updated_at(mid, 200);
    let new = manager.add_text_record("new entry").unwrap();
    force_updated_at(new, 300);
    manager.cleanup_old_records().unwrap();

    // 容量为 2：最旧的未固定记录被淘汰，固定记录不受影响
    let records = manager.get_records(None, None).unwrap();
    let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&keep));
    assert!(!ids.contains(&old));
    assert!(ids.contains(&mid));
    assert!(ids.contains(&new));

    // 固定的记录排在最前面
    assert_eq!(records[0].id, keep);
}

#[test]
#[serial]
fn duplicate_capture_moves_record_to_top() {
    let manager = setup(10);

    let first = manager.add_text_record("alpha").unwrap();
    force_updated_at(first, 100);
    let second = manager.add_text_record("beta").unwrap();
    force_updated_at(second, 200);

    // 再次复制 alpha：不插入新记录，只刷新时间
    let again = manager.add_text_record("alpha").unwrap();
    assert_eq!(again, first);

    let records = manager.get_records(None, None).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, first);
}

#[test]
#[serial]
fn search_and_kind_filters() {
    let manager = setup(10);

    manager.add_text_record("rust clipboard manager").unwrap();
    manager.add_text_record("grocery list").unwrap();
    let image_id = manager.add_image_record(b"png-bytes-1").unwrap();

    let hits = manager.get_records(Some("clipboard"), None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record_value, "rust clipboard manager");

    let images = manager.get_records(None, Some(Filter::Image)).unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].id, image_id);

    let texts = manager.get_records(None, Some(Filter::Text)).unwrap();
    assert_eq!(texts.len(), 2);
}

#[test]
#[serial]
fn shrinking_max_items_evicts_immediately() {
    let manager = setup(10);

    let a = manager.add_text_record("aaa").unwrap();
    force_updated_at(a, 100);
    let b = manager.add_text_record("bbb").unwrap();
    force_updated_at(b, 200);
    let c = manager.add_text_record("ccc").unwrap();
    force_updated_at(c, 300);

    manager.set_max_records(1).unwrap();

    let records = manager.get_records(None, None).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, c);
}
