//! The lost-item document shape shared by generation and persistence.
//!
//! Field names serialize in lower camel case (`createUserPlace`,
//! `dateFound`, `valuableFlg`, ...). The front end reads documents in this
//! shape, so the renames are part of the storage contract.

use serde::{Deserialize, Serialize};

use crate::catalog::{ColorDef, ItemTemplate, StatusDef};
use crate::types::{RecordId, Timestamp};

/// JSON path of the container's partition key.
pub const PARTITION_KEY_PATH: &str = "/createUserPlace";

/// One lost item as generated and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostItemRecord {
    pub id: RecordId,
    /// Municipality name; doubles as the partition key.
    pub create_user_place: String,
    #[serde(rename = "createUserID", default, skip_serializing_if = "Option::is_none")]
    pub create_user_id: Option<String>,
    pub date_found: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<Timestamp>,
    pub memo: String,
    pub contact: String,
    pub color: Color,
    pub currency: Option<Currency>,
    pub find_place: Option<String>,
    #[serde(default)]
    pub image_url: Vec<String>,
    pub is_valuables: bool,
    pub item: Item,
    #[serde(default)]
    pub keyword: Vec<String>,
    pub mngmt_no: String,
    pub personal: Option<String>,
    pub status: Status,
}

impl LostItemRecord {
    /// Partition key value of this record.
    pub fn partition_key(&self) -> &str {
        &self.create_user_place
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl From<&ColorDef> for Color {
    fn from(def: &ColorDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            url: def.url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub foreign_currency: Option<String>,
    pub japanese_currency: Option<Vec<JapaneseCurrency>>,
}

/// A count of one domestic denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JapaneseCurrency {
    pub count: u32,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub category_code: String,
    pub category_name: String,
    pub item_name: String,
    pub valuable_flg: i32,
}

impl Item {
    /// Whether the valuable flag marks this item as a valuable.
    pub fn is_valuable(&self) -> bool {
        self.valuable_flg == 1
    }
}

impl From<&ItemTemplate> for Item {
    fn from(template: &ItemTemplate) -> Self {
        Self {
            category_code: template.category_code.to_string(),
            category_name: template.category_name.to_string(),
            item_name: template.item_name.to_string(),
            valuable_flg: template.valuable_flg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub name: String,
}

impl From<&StatusDef> for Status {
    fn from(def: &StatusDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
