//! Saved palettes: create, filter, edit, delete, and hand off to the generator.

use crate::palette::Handoff;
use crate::storage::{parse_record, Storage, HANDOFF_KEY, LIBRARY_KEY};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub const DEFAULT_TAG: &str = "generated";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub colors: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    /// Unix time in milliseconds.
    pub created_at: i64,
}

impl LibraryEntry {
    fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LibraryFilter {
    pub query: Option<String>,
    pub tag: Option<String>,
    pub favorites_only: bool,
}

impl LibraryFilter {
    pub fn matches(&self, entry: &LibraryEntry) -> bool {
        if self.favorites_only && !entry.favorite {
            return false;
        }
        if let Some(tag) = non_blank(&self.tag)
            && !entry.has_tag(&tag.to_lowercase())
        {
            return false;
        }
        if let Some(query) = non_blank(&self.query) {
            let query = query.to_lowercase();
            let in_name = entry.name.to_lowercase().contains(&query);
            let in_tags = entry.tags.iter().any(|t| t.to_lowercase().contains(&query));
            if !in_name && !in_tags {
                return false;
            }
        }
        true
    }

    pub fn is_active(&self) -> bool {
        self.favorites_only || non_blank(&self.query).is_some() || non_blank(&self.tag).is_some()
    }
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Split a comma separated tag string: trimmed, no empties, first occurrence wins.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

fn default_name(now: OffsetDateTime) -> String {
    format!(
        "Palette {:04}-{:02}-{:02} {:02}:{:02}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute()
    )
}

/// The saved palette collection, most recent first. Every mutation writes the
/// whole collection back to storage.
#[derive(Debug, Clone, Default)]
pub struct Library {
    entries: Vec<LibraryEntry>,
}

impl Library {
    pub fn load(storage: &Storage) -> anyhow::Result<Self> {
        let entries = match storage.get(LIBRARY_KEY)? {
            Some(raw) => parse_record::<Vec<LibraryEntry>>(LIBRARY_KEY, &raw).unwrap_or_else(|e| {
                tracing::warn!("ignoring stored library: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Ok(Self { entries })
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn list(&self, filter: &LibraryFilter) -> Vec<&LibraryEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }

    pub fn find(&self, id: &str) -> Option<&LibraryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Resolve a full id or a unique id prefix.
    pub fn resolve_id(&self, prefix: &str) -> Option<&str> {
        if let Some(e) = self.find(prefix) {
            return Some(&e.id);
        }
        let mut hits = self.entries.iter().filter(|e| e.id.starts_with(prefix));
        match (hits.next(), hits.next()) {
            (Some(e), None) if !prefix.is_empty() => Some(&e.id),
            _ => None,
        }
    }

    /// Save `colors` as a new entry at the front. Empty input is ignored.
    pub fn create(&mut self, storage: &Storage, colors: Vec<String>) -> anyhow::Result<Option<&LibraryEntry>> {
        self.create_at(storage, colors, OffsetDateTime::now_utc())
    }

    fn create_at(
        &mut self,
        storage: &Storage,
        colors: Vec<String>,
        now: OffsetDateTime,
    ) -> anyhow::Result<Option<&LibraryEntry>> {
        if colors.is_empty() {
            return Ok(None);
        }
        let entry = LibraryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            name: default_name(now),
            tags: vec![DEFAULT_TAG.to_string()],
            colors,
            favorite: false,
            created_at: (now.unix_timestamp_nanos() / 1_000_000) as i64,
        };
        tracing::info!(id = %entry.id, colors = entry.colors.len(), "saved palette");
        self.entries.insert(0, entry);
        self.commit(storage)?;
        Ok(self.entries.first())
    }

    /// Rename and/or retag. A blank name is ignored; tags are replaced wholesale.
    pub fn update(
        &mut self,
        storage: &Storage,
        id: &str,
        name: Option<&str>,
        tags: Option<&str>,
    ) -> anyhow::Result<bool> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            entry.name = name.to_string();
        }
        if let Some(tags) = tags {
            entry.tags = parse_tags(tags);
        }
        self.commit(storage)?;
        Ok(true)
    }

    pub fn toggle_favorite(&mut self, storage: &Storage, id: &str) -> anyhow::Result<bool> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        entry.favorite = !entry.favorite;
        self.commit(storage)?;
        Ok(true)
    }

    pub fn delete(&mut self, storage: &Storage, id: &str) -> anyhow::Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.commit(storage)?;
        Ok(true)
    }

    /// Queue the entry's colors for the generator's next load.
    pub fn apply_to_generator(&self, storage: &Storage, id: &str) -> anyhow::Result<bool> {
        let Some(entry) = self.find(id) else {
            return Ok(false);
        };
        storage.put_json(
            HANDOFF_KEY,
            &Handoff {
                colors: entry.colors.clone(),
            },
        )?;
        tracing::info!(id, "queued palette for the generator");
        Ok(true)
    }

    fn commit(&self, storage: &Storage) -> anyhow::Result<()> {
        storage.put_json(LIBRARY_KEY, &self.entries)
    }
}
