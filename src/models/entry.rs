use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::status::{classify, DevotionStatus};

/// Vibe recorded when the form leaves it blank.
pub const DEFAULT_VIBE: &str = "mystery aura";
/// Reason recorded when the form leaves it blank.
pub const DEFAULT_REASON: &str = "No explanation, just vibes.";
/// Ritual recorded when the form leaves it blank.
pub const DEFAULT_RITUAL: &str = "Still workshopping the grand gesture.";
/// Devotion assigned when the score field is missing or not a number.
pub const DEFAULT_DEVOTION: i64 = 50;

/// One tracked person on the roster.
///
/// `id` and `created_at` are fixed at creation. `devotion` is nominally in
/// `0..=100`, but only boosting clamps it; a freshly created entry keeps
/// whatever score was typed in.
///
/// Field names serialize in camelCase so persisted rosters keep the
/// `{id, name, vibe, reason, devotion, ritual, createdAt}` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque identifier. Starter entries use readable slugs, new ones a UUID.
    pub id: String,
    pub name: String,
    pub vibe: String,
    pub reason: String,
    /// Decimal scores in persisted rosters are rounded on read.
    #[serde(deserialize_with = "deserialize_devotion")]
    pub devotion: i64,
    pub ritual: String,
    pub created_at: DateTime<Utc>,
}

fn deserialize_devotion<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Score {
        Whole(i64),
        Decimal(f64),
    }

    match Score::deserialize(deserializer)? {
        Score::Whole(n) => Ok(n),
        Score::Decimal(f) if f.is_finite() => Ok(f.round() as i64),
        Score::Decimal(f) => Err(de::Error::custom(format!("devotion {} is not finite", f))),
    }
}

impl Entry {
    /// Status bucket for the current score.
    pub fn status(&self) -> DevotionStatus {
        classify(self.devotion as f64)
    }
}

/// Raw form input for a new entry.
///
/// Everything is text as typed; blank optional fields pick up defaults and
/// a blank `name` rejects the whole submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEntryInput {
    pub name: String,
    pub vibe: Option<String>,
    pub reason: Option<String>,
    /// Score as typed. Decimal text is rounded; anything else becomes 50.
    pub devotion: Option<String>,
    pub ritual: Option<String>,
}

impl CreateEntryInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build the entry this input describes, or `None` when the name is blank.
    pub fn into_entry(self, now: DateTime<Utc>) -> Option<Entry> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Entry {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            vibe: or_default(self.vibe, DEFAULT_VIBE),
            reason: or_default(self.reason, DEFAULT_REASON),
            devotion: parse_devotion(self.devotion.as_deref()),
            ritual: or_default(self.ritual, DEFAULT_RITUAL),
            created_at: now,
        })
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Parse a typed devotion score. No clamping happens here.
pub fn parse_devotion(raw: Option<&str>) -> i64 {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return DEFAULT_DEVOTION;
    };

    if let Ok(n) = text.parse::<i64>() {
        return n;
    }

    match text.parse::<f64>() {
        Ok(f) if f.is_finite() && f.abs() < i64::MAX as f64 => f.round() as i64,
        _ => DEFAULT_DEVOTION,
    }
}

/// The built-in roster used until a persisted one is loaded.
pub fn starter_entries() -> Vec<Entry> {
    let now = Utc::now();
    let entry = |id: &str, name: &str, vibe: &str, reason: &str, devotion: i64, ritual: &str| Entry {
        id: id.to_string(),
        name: name.to_string(),
        vibe: vibe.to_string(),
        reason: reason.to_string(),
        devotion,
        ritual: ritual.to_string(),
        created_at: now,
    };

    vec![
        entry(
            "entry-aurora",
            "Aurora",
            "angel-core gamer",
            "She laughed at my terrible meme and now I owe her my life.",
            87,
            "Daily good morning paragraph + snack drop-off",
        ),
        entry(
            "entry-sage",
            "Sage",
            "studio art prodigy",
            "She color-graded my entire existence in 5 minutes.",
            74,
            "Weekly hype playlist and spontaneous coffee runs",
        ),
        entry(
            "entry-nova",
            "Nova",
            "cosmic streamer",
            "She noticed my username during a two minute raid.",
            92,
            "Bits in every stream + cosmic compliments",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_optional_fields_take_defaults() {
        let entry = CreateEntryInput {
            name: "Rin".to_string(),
            vibe: Some("   ".to_string()),
            reason: None,
            devotion: None,
            ritual: Some(String::new()),
        }
        .into_entry(Utc::now())
        .unwrap();

        assert_eq!(entry.vibe, DEFAULT_VIBE);
        assert_eq!(entry.reason, DEFAULT_REASON);
        assert_eq!(entry.ritual, DEFAULT_RITUAL);
        assert_eq!(entry.devotion, 50);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let entry = CreateEntryInput {
            name: "  Rin ".to_string(),
            vibe: Some(" chaotic good ".to_string()),
            ..CreateEntryInput::default()
        }
        .into_entry(Utc::now())
        .unwrap();

        assert_eq!(entry.name, "Rin");
        assert_eq!(entry.vibe, "chaotic good");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(CreateEntryInput::named("").into_entry(Utc::now()).is_none());
        assert!(CreateEntryInput::named(" \t ").into_entry(Utc::now()).is_none());
    }

    #[test]
    fn test_parse_devotion() {
        assert_eq!(parse_devotion(Some("77")), 77);
        assert_eq!(parse_devotion(Some(" 12 ")), 12);
        assert_eq!(parse_devotion(Some("72.6")), 73);
        assert_eq!(parse_devotion(Some("0")), 0);
        assert_eq!(parse_devotion(Some("lots")), 50);
        assert_eq!(parse_devotion(Some("NaN")), 50);
        assert_eq!(parse_devotion(Some("")), 50);
        assert_eq!(parse_devotion(None), 50);
    }

    #[test]
    fn test_out_of_range_scores_are_kept() {
        assert_eq!(parse_devotion(Some("250")), 250);
        assert_eq!(parse_devotion(Some("-40")), -40);
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = CreateEntryInput::named("A").into_entry(Utc::now()).unwrap();
        let b = CreateEntryInput::named("A").into_entry(Utc::now()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_starter_roster() {
        let entries = starter_entries();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Aurora", "Sage", "Nova"]);
        assert_eq!(entries[2].devotion, 92);
    }

    #[test]
    fn test_decimal_devotion_is_rounded_on_read() {
        let json = r#"{"id":"x","name":"Rin","vibe":"v","reason":"r","devotion":72.6,"ritual":"t","createdAt":"2024-03-01T12:30:00.000Z"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.devotion, 73);

        let json = json.replace("72.6", "-4.4");
        let entry: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry.devotion, -4);
    }

    #[test]
    fn test_non_numeric_devotion_is_rejected() {
        let json = r#"{"id":"x","name":"Rin","vibe":"v","reason":"r","devotion":"lots","ritual":"t","createdAt":"2024-03-01T12:30:00.000Z"}"#;
        assert!(serde_json::from_str::<Entry>(json).is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let entry = &starter_entries()[0];
        let json = serde_json::to_value(entry).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["devotion"], 87);
    }
}
