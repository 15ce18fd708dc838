//! Keyword-to-reply lookup table.
//!
//! Reply payloads are pre-authored Flex Message documents embedded at
//! compile time and treated as opaque JSON; the bot never inspects their
//! contents.

use anyhow::{Context, Result};
use serde_json::{json, Value};

const TELEMEDICINE_START: &str = include_str!("../content/telemedicine_start.json");
const TELEMEDICINE_MORE_INFO: &str = include_str!("../content/telemedicine_more_info.json");
const PUBLIC_RELATIONS: &str = include_str!("../content/public_relations.json");
const CONTACT_US: &str = include_str!("../content/contact_us.json");
const ABOUT_US: &str = include_str!("../content/about_us.json");
const GENERAL_SERVICE: &str = include_str!("../content/general_service.json");
const THAI_CHINESE_SERVICE: &str = include_str!("../content/thai_chinese_service.json");
const THAI_SERVICE: &str = include_str!("../content/thai_service.json");
const FAQ: &str = include_str!("../content/faq.json");
const HEALTH_TIPS: &str = include_str!("../content/health_tips.json");

/// Trigger phrases and the embedded document they select, in match order.
/// Trigger sets are disjoint today; if an overlap is ever introduced, the
/// earlier entry wins.
const TABLE: &[(&[&str], &str)] = &[
    (
        &[
            "เริ่มใช้บริการtelemedicine",
            "เริ่มต้น",
            "ใช้งาน telemedicine",
        ],
        TELEMEDICINE_START,
    ),
    (
        &[
            "ข้อมูลเพิ่มเติมเกี่ยวกับtelemedicine",
            "บริการของเรา/qrcode",
            "บริการ",
            "telemedicine>ดูเพิ่มเติม",
        ],
        TELEMEDICINE_MORE_INFO,
    ),
    (&["ประชาสัมพันธ์", "ข่าวประชาสัมพันธ์"], PUBLIC_RELATIONS),
    (&["ติดต่อเรา"], CONTACT_US),
    (&["เกี่ยวกับเรา"], ABOUT_US),
    (&["ตรวจโรคทั่วไป"], GENERAL_SERVICE),
    (&["แพทย์แผนจีนและแผนไทย"], THAI_CHINESE_SERVICE),
    (&["แพทย์แผนไทย"], THAI_SERVICE),
    (&["คำถามที่พบบ่อย", "faq"], FAQ),
    (&["สาระสุขภาพ", "health tips"], HEALTH_TIPS),
];

/// Normalization applied to both triggers and incoming text before matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

struct KeywordEntry {
    triggers: Vec<String>,
    payload: Value,
}

/// Ordered, read-only lookup table built once at startup.
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
}

impl KeywordTable {
    pub fn load() -> Result<Self> {
        let mut entries = Vec::with_capacity(TABLE.len() + 1);

        for (triggers, raw) in TABLE {
            let payload: Value = serde_json::from_str(raw)
                .with_context(|| format!("Invalid embedded flex message for '{}'", triggers[0]))?;
            entries.push(KeywordEntry {
                triggers: triggers.iter().map(|t| normalize(t)).collect(),
                payload,
            });
        }

        entries.push(KeywordEntry {
            triggers: vec![normalize("บริการของเรา")],
            payload: services_quick_reply(),
        });

        Ok(Self { entries })
    }

    /// First entry whose trigger set contains the normalized text. Exact
    /// match only, no prefix or fuzzy matching.
    pub fn find(&self, text: &str) -> Option<&Value> {
        let normalized = normalize(text);
        self.entries
            .iter()
            .find(|entry| entry.triggers.iter().any(|t| *t == normalized))
            .map(|entry| &entry.payload)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Service menu with quick-reply buttons, built inline rather than embedded.
fn services_quick_reply() -> Value {
    json!({
        "type": "text",
        "text": "กรุณาเลือกบริการที่ท่านสนใจ:",
        "quickReply": {
            "items": [
                { "type": "action", "action": { "type": "message", "label": "ตรวจโรคทั่วไป", "text": "ตรวจโรคทั่วไป" } },
                { "type": "action", "action": { "type": "message", "label": "แพทย์แผนจีนและแผนไทย", "text": "แพทย์แผนจีนและแผนไทย" } },
                { "type": "action", "action": { "type": "message", "label": "แพทย์แผนไทย", "text": "แพทย์แผนไทย" } },
                { "type": "action", "action": { "type": "message", "label": "Telemedicine", "text": "เริ่มใช้บริการtelemedicine" } },
                { "type": "action", "action": { "type": "uri", "label": "คลินิกฝากครรภ์", "uri": "https://lin.ee/jSH3VEc" } }
            ]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  FAQ "), "faq");
        assert_eq!(normalize("Health Tips"), "health tips");
        assert_eq!(normalize("ติดต่อเรา"), "ติดต่อเรา");
    }

    #[test]
    fn test_load_parses_every_payload() {
        let table = KeywordTable::load().unwrap();
        assert_eq!(table.len(), TABLE.len() + 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_find_exact_match() {
        let table = KeywordTable::load().unwrap();
        let payload = table.find("ติดต่อเรา").unwrap();
        assert_eq!(payload["altText"], "ติดต่อเรา");
    }

    #[test]
    fn test_find_normalizes_before_matching() {
        let table = KeywordTable::load().unwrap();
        let payload = table.find("  FAQ ").unwrap();
        assert_eq!(payload["altText"], "คำถามที่พบบ่อย");
    }

    #[test]
    fn test_find_is_exact_not_partial() {
        let table = KeywordTable::load().unwrap();
        assert!(table.find("faqs").is_none());
        assert!(table.find("คำถาม").is_none());
    }

    #[test]
    fn test_find_no_match_returns_none() {
        let table = KeywordTable::load().unwrap();
        assert!(table.find("สวัสดีครับ").is_none());
        assert!(table.find("").is_none());
    }

    #[test]
    fn test_services_menu_is_quick_reply_text() {
        let table = KeywordTable::load().unwrap();
        let payload = table.find("บริการของเรา").unwrap();
        assert_eq!(payload["type"], "text");
        assert_eq!(payload["quickReply"]["items"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_distinct_triggers_select_distinct_entries() {
        let table = KeywordTable::load().unwrap();
        // "บริการ" and "บริการของเรา" are different exact strings.
        let more_info = table.find("บริการ").unwrap();
        let menu = table.find("บริการของเรา").unwrap();
        assert_eq!(more_info["type"], "flex");
        assert_eq!(menu["type"], "text");
    }
}
