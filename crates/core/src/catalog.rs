//! Static reference data used as the sampling universe for synthetic records.
//!
//! Every list is a `&'static` slice of plain value types, so nothing here can
//! be mutated between samples. The synthesizer copies entries into owned
//! record types (see [`crate::record`]) and only modifies the copies.
//!
//! Call [`validate_catalog`] once at process start; sampling is only defined
//! over non-empty lists.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Entry types
// ---------------------------------------------------------------------------

/// A color palette entry. `id`, `name` and `url` always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDef {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
}

/// A generic item template with its category code and valuable flag.
///
/// The template's `category_name` is replaced by an independently sampled
/// subcategory label when a record is synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTemplate {
    pub category_code: &'static str,
    pub category_name: &'static str,
    pub item_name: &'static str,
    /// `1` for valuables, `0` otherwise.
    pub valuable_flg: i32,
}

/// A storage status entry (`hold`, `release`, `police`, `discard`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDef {
    pub id: &'static str,
    pub name: &'static str,
}

// ---------------------------------------------------------------------------
// Fixed strings
// ---------------------------------------------------------------------------

/// Contact line written on every generated record.
pub const CONTACT: &str = "問い合わせ先: 011-814-0110";

/// Location used when a record carries a find place.
pub const FIND_PLACE: &str = "待合室";

/// Disclosure flag used when a record carries personal information.
pub const PERSONAL_NOTICE: &str = "個人情報が含まれます。";

/// Placeholder image set attached to records that carry images.
pub const PLACEHOLDER_IMAGES: [&str; 2] = ["image1.jpg", "image2.jpg"];

/// Foreign currency code used in the currency block.
pub const FOREIGN_CURRENCY: &str = "USD";

/// Domestic denomination id used in the currency block.
pub const DOMESTIC_CURRENCY_ID: &str = "JPY";

/// Upper bound (inclusive) on the number of keywords attached to a record.
pub const MAX_KEYWORDS: usize = 4;

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Municipality names. Also the partition key values of the container.
pub const MUNICIPALITIES: &[&str] = &[
    "旭川市",
    "函館市",
    "小樽市",
    "千歳市",
    "苫小牧市",
    "室蘭市",
    "北見市",
];

/// Subcategory labels (中分類).
pub const SUBCATEGORIES: &[&str] = &[
    "手提げかばん",
    "財布",
    "傘",
    "時計",
    "メガネ",
    "携帯電話",
    "カメラ",
    "鍵",
    "本",
    "アクセサリー",
];

pub const STATUSES: &[StatusDef] = &[
    StatusDef { id: "hold", name: "保管中" },
    StatusDef { id: "release", name: "返却済み" },
    StatusDef { id: "police", name: "警察届出済" },
    StatusDef { id: "discard", name: "廃棄済み" },
];

pub const COLORS: &[ColorDef] = &[
    ColorDef { id: "black", name: "黒（ブラック）系", url: "/colors/black.png" },
    ColorDef { id: "red", name: "赤（レッド）系", url: "/colors/red.png" },
    ColorDef { id: "blue", name: "青（ブルー）系", url: "/colors/blue.png" },
    ColorDef { id: "green", name: "緑（グリーン）系", url: "/colors/green.png" },
    ColorDef { id: "yellow", name: "黄色（イエロー）系", url: "/colors/yellow.png" },
    ColorDef { id: "white", name: "白（ホワイト）系", url: "/colors/white.png" },
    ColorDef { id: "gray", name: "灰色（グレー）系", url: "/colors/gray.png" },
    ColorDef { id: "brown", name: "茶色（ブラウン）系", url: "/colors/brown.png" },
    ColorDef { id: "purple", name: "紫（パープル）系", url: "/colors/purple.png" },
    ColorDef { id: "pink", name: "ピンク系", url: "/colors/pink.png" },
    ColorDef { id: "orange", name: "オレンジ系", url: "/colors/orange.png" },
];

pub const ITEM_TEMPLATES: &[ItemTemplate] = &[
    ItemTemplate {
        category_code: "2601",
        category_name: "手提げかばん",
        item_name: "トートバッグ",
        valuable_flg: 1,
    },
    ItemTemplate {
        category_code: "2602",
        category_name: "財布",
        item_name: "二つ折り財布",
        valuable_flg: 1,
    },
    ItemTemplate {
        category_code: "2603",
        category_name: "傘",
        item_name: "折りたたみ傘",
        valuable_flg: 0,
    },
    ItemTemplate {
        category_code: "2604",
        category_name: "時計",
        item_name: "腕時計",
        valuable_flg: 1,
    },
    ItemTemplate {
        category_code: "2605",
        category_name: "メガネ",
        item_name: "サングラス",
        valuable_flg: 1,
    },
    ItemTemplate {
        category_code: "2606",
        category_name: "携帯電話",
        item_name: "スマートフォン",
        valuable_flg: 1,
    },
    ItemTemplate {
        category_code: "2607",
        category_name: "カメラ",
        item_name: "デジタルカメラ",
        valuable_flg: 1,
    },
    ItemTemplate {
        category_code: "2608",
        category_name: "鍵",
        item_name: "カギ",
        valuable_flg: 0,
    },
    ItemTemplate {
        category_code: "2609",
        category_name: "本",
        item_name: "文庫本",
        valuable_flg: 0,
    },
    ItemTemplate {
        category_code: "2610",
        category_name: "アクセサリー",
        item_name: "ネックレス",
        valuable_flg: 1,
    },
];

/// Keyword vocabulary. Must hold more than [`MAX_KEYWORDS`] entries so the
/// distinct-keyword draw always terminates.
pub const KEYWORDS: &[&str] = &[
    "ブランドロゴあり",
    "レンズ",
    "ファインダー",
    "シャッターボタン",
    "ダイヤル",
    "フラッシュ",
    "液晶ディスプレイ",
    "金属製",
    "黒色と銀色のデザイン",
    "レンズキャップ",
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Whether `name` is one of the catalog municipalities.
pub fn is_municipality(name: &str) -> bool {
    MUNICIPALITIES.contains(&name)
}

/// Find the palette entry with the given id.
pub fn find_color(id: &str) -> Option<&'static ColorDef> {
    COLORS.iter().find(|c| c.id == id)
}

/// Find the item template with the given category code.
pub fn find_item_template(category_code: &str) -> Option<&'static ItemTemplate> {
    ITEM_TEMPLATES
        .iter()
        .find(|t| t.category_code == category_code)
}

/// Find the status entry with the given id.
pub fn find_status(id: &str) -> Option<&'static StatusDef> {
    STATUSES.iter().find(|s| s.id == id)
}

// ---------------------------------------------------------------------------
// Startup validation
// ---------------------------------------------------------------------------

/// Check that every list is usable for sampling.
///
/// Fails when a list is empty, when an entry has an empty key field, or when
/// the keyword vocabulary cannot satisfy [`MAX_KEYWORDS`] distinct draws.
pub fn validate_catalog() -> Result<(), CoreError> {
    require_non_empty("municipalities", MUNICIPALITIES.len())?;
    require_non_empty("subcategories", SUBCATEGORIES.len())?;
    require_non_empty("statuses", STATUSES.len())?;
    require_non_empty("colors", COLORS.len())?;
    require_non_empty("item_templates", ITEM_TEMPLATES.len())?;
    require_non_empty("keywords", KEYWORDS.len())?;

    if MUNICIPALITIES.iter().any(|m| m.trim().is_empty()) {
        return Err(CoreError::Validation(
            "Municipality names must be non-empty".into(),
        ));
    }
    if COLORS.iter().any(|c| c.id.is_empty()) {
        return Err(CoreError::Validation("Color ids must be non-empty".into()));
    }
    if STATUSES.iter().any(|s| s.id.is_empty()) {
        return Err(CoreError::Validation("Status ids must be non-empty".into()));
    }
    if ITEM_TEMPLATES.iter().any(|t| t.category_code.is_empty()) {
        return Err(CoreError::Validation(
            "Item category codes must be non-empty".into(),
        ));
    }
    if KEYWORDS.len() < MAX_KEYWORDS {
        return Err(CoreError::Validation(format!(
            "Keyword vocabulary has {} entries, need at least {MAX_KEYWORDS}",
            KEYWORDS.len()
        )));
    }

    Ok(())
}

fn require_non_empty(list: &'static str, len: usize) -> Result<(), CoreError> {
    if len == 0 {
        Err(CoreError::EmptyCatalog(list))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        assert!(validate_catalog().is_ok());
    }

    #[test]
    fn require_non_empty_rejects_zero() {
        let err = require_non_empty("colors", 0).unwrap_err();
        assert_eq!(err.to_string(), "Catalog list 'colors' is empty");
    }

    #[test]
    fn status_enumeration_is_closed() {
        let ids: Vec<_> = STATUSES.iter().map(|s| s.id).collect();
        assert_eq!(ids, ["hold", "release", "police", "discard"]);
    }

    #[test]
    fn color_ids_are_unique() {
        let ids: HashSet<_> = COLORS.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), COLORS.len());
    }

    #[test]
    fn category_codes_are_unique() {
        let codes: HashSet<_> = ITEM_TEMPLATES.iter().map(|t| t.category_code).collect();
        assert_eq!(codes.len(), ITEM_TEMPLATES.len());
    }

    #[test]
    fn valuable_flags_are_binary() {
        assert!(ITEM_TEMPLATES
            .iter()
            .all(|t| t.valuable_flg == 0 || t.valuable_flg == 1));
    }

    #[test]
    fn keyword_vocabulary_exceeds_max_count() {
        let distinct: HashSet<_> = KEYWORDS.iter().collect();
        assert!(distinct.len() > MAX_KEYWORDS);
    }

    #[test]
    fn lookups_find_known_entries() {
        assert!(is_municipality("函館市"));
        assert!(!is_municipality("札幌市"));
        assert_eq!(find_color("red").map(|c| c.url), Some("/colors/red.png"));
        assert_eq!(
            find_item_template("2603").map(|t| t.item_name),
            Some("折りたたみ傘")
        );
        assert_eq!(find_status("police").map(|s| s.name), Some("警察届出済"));
        assert!(find_status("lost").is_none());
    }
}
