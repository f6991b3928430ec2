use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 记录类型判别值
///
/// 数据库中以文本形式存储，消费端必须穷尽匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "image")]
    Image,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Text => "text",
            RecordKind::Image => "image",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(RecordKind::Text),
            "image" => Some(RecordKind::Image),
            _ => None,
        }
    }
}

/// 记录内容的类型化视图
///
/// `record_value` 对文本记录是原文，对图片记录是图片目录内的 PNG 文件名
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordContent {
    Text(String),
    Image(PathBuf),
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::clipboard_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbClipboardRecord {
    pub id: i32,
    pub record_type: String,
    pub record_value: String,
    pub record_hash: String,
    pub pinned: bool,
    pub created_at: i32,
    pub updated_at: i32,
}

impl DbClipboardRecord {
    /// 获取记录类型枚举
    pub fn kind(&self) -> Option<RecordKind> {
        RecordKind::from_str(&self.record_type)
    }

    /// 获取类型化的记录内容
    ///
    /// 数据库中存在未知类型时返回 None，由调用方决定如何处理
    pub fn content(&self) -> Option<RecordContent> {
        match self.kind()? {
            RecordKind::Text => Some(RecordContent::Text(self.record_value.clone())),
            RecordKind::Image => Some(RecordContent::Image(PathBuf::from(&self.record_value))),
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::clipboard_records)]
pub struct NewClipboardRecord {
    pub record_type: String,
    pub record_value: String,
    pub record_hash: String,
    pub pinned: bool,
    pub created_at: i32,
    pub updated_at: i32,
}

/// 记录列表过滤条件
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Filter {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "pinned")]
    Pinned,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "image")]
    Image,
}

impl Default for Filter {
    fn default() -> Self {
        Filter::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_round_trip() {
        assert_eq!(RecordKind::from_str("text"), Some(RecordKind::Text));
        assert_eq!(RecordKind::from_str("image"), Some(RecordKind::Image));
        assert_eq!(RecordKind::from_str("file"), None);
        assert_eq!(RecordKind::Text.as_str(), "text");
        assert_eq!(RecordKind::Image.as_str(), "image");
    }

    #[test]
    fn test_record_content_view() {
        let record = DbClipboardRecord {
            id: 1,
            record_type: "image".to_string(),
            record_value: "ab12.png".to_string(),
            record_hash: "ab12".to_string(),
            pinned: false,
            created_at: 0,
            updated_at: 0,
        };
        match record.content() {
            Some(RecordContent::Image(name)) => assert_eq!(name, PathBuf::from("ab12.png")),
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_record_content_unknown_kind() {
        let record = DbClipboardRecord {
            id: 1,
            record_type: "rtf".to_string(),
            record_value: "".to_string(),
            record_hash: "".to_string(),
            pinned: false,
            created_at: 0,
            updated_at: 0,
        };
        assert!(record.kind().is_none());
        assert!(record.content().is_none());
    }
}
