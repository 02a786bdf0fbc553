//! Palette session state and the pin-preserving engine around it.

pub mod analyze;

use crate::color::generator::{generate_with, random_rgb};
use crate::color::{self, ColorFormat};
use crate::storage::{parse_record, RecordError, Storage, HANDOFF_KEY, SESSION_KEY};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Sizes offered by the size toggle.
pub const SIZE_CHOICES: [usize; 3] = [3, 5, 7];

/// Hard cap on slots in any palette, including one grown by a handoff.
pub const MAX_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteSlot {
    pub value: String,
    #[serde(default)]
    pub is_pinned: bool,
}

impl PaletteSlot {
    pub fn unpinned(value: String) -> Self {
        Self {
            value,
            is_pinned: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteSessionState {
    pub slots: Vec<PaletteSlot>,
    pub format: ColorFormat,
    pub size: usize,
    #[serde(default)]
    pub dark_preview_enabled: bool,
}

/// Colors handed from the library to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handoff {
    pub colors: Vec<String>,
}

/// clap parser for a user-chosen palette size.
pub fn parse_size(raw: &str) -> Result<usize, String> {
    let size: usize = raw.trim().parse().map_err(|e| format!("{e}"))?;
    if SIZE_CHOICES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("size must be one of {SIZE_CHOICES:?}"))
    }
}

/// clap parser for a number of colors to generate, `1..=MAX_SIZE`.
pub fn parse_count(raw: &str) -> Result<usize, String> {
    let count: usize = raw.trim().parse().map_err(|e| format!("{e}"))?;
    if (1..=MAX_SIZE).contains(&count) {
        Ok(count)
    } else {
        Err(format!("count must be between 1 and {MAX_SIZE}"))
    }
}

/// Next size in [`SIZE_CHOICES`]; sizes outside the list restart at the first.
pub fn next_size(size: usize) -> usize {
    SIZE_CHOICES
        .iter()
        .copied()
        .find(|&s| s > size)
        .unwrap_or(SIZE_CHOICES[0])
}

impl PaletteSessionState {
    pub fn empty(size: usize, format: ColorFormat) -> Self {
        Self {
            slots: Vec::new(),
            format,
            size: size.clamp(1, MAX_SIZE),
            dark_preview_enabled: false,
        }
    }

    pub fn fresh<R: Rng + ?Sized>(rng: &mut R, size: usize, format: ColorFormat) -> Self {
        let mut state = Self::empty(size, format);
        state.slots = generate_with(rng, state.size, format)
            .into_iter()
            .map(PaletteSlot::unpinned)
            .collect();
        state
    }

    /// Decode persisted state. Structural problems are errors so the caller
    /// can decide on a fallback.
    pub fn parse(raw: &str) -> Result<Self, RecordError> {
        let state: Self = parse_record(SESSION_KEY, raw)?;
        if state.size == 0 {
            return Err(RecordError::Shape {
                key: SESSION_KEY,
                reason: "palette size is zero".into(),
            });
        }
        if state.size > MAX_SIZE || state.slots.len() > MAX_SIZE {
            return Err(RecordError::Shape {
                key: SESSION_KEY,
                reason: format!(
                    "palette of {} slots (size {}) exceeds {MAX_SIZE}",
                    state.slots.len(),
                    state.size
                ),
            });
        }
        Ok(state)
    }

    /// Seed a session from handed-off colors. The size grows to fit them (up
    /// to [`MAX_SIZE`], extra colors are dropped) and short lists are padded
    /// with generated colors.
    pub fn from_handoff<R: Rng + ?Sized>(
        rng: &mut R,
        mut colors: Vec<String>,
        size: usize,
        format: ColorFormat,
        dark_preview_enabled: bool,
    ) -> Self {
        colors.truncate(MAX_SIZE);
        let mut state = Self::empty(size.max(colors.len()), format);
        state.dark_preview_enabled = dark_preview_enabled;
        state.slots = colors.into_iter().map(PaletteSlot::unpinned).collect();
        let missing = state.size - state.slots.len();
        state.slots.extend(
            generate_with(rng, missing, format)
                .into_iter()
                .map(PaletteSlot::unpinned),
        );
        state
    }

    pub fn pinned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_pinned).count()
    }

    /// Grow with generated slots or truncate from the end. Truncation drops
    /// trailing slots even when they are pinned. Sizes outside
    /// `1..=MAX_SIZE` change nothing and return false.
    pub fn resize<R: Rng + ?Sized>(&mut self, rng: &mut R, new_size: usize) -> bool {
        if new_size == 0 || new_size > MAX_SIZE {
            return false;
        }
        self.size = new_size;
        if self.slots.len() < new_size {
            let missing = new_size - self.slots.len();
            self.slots.extend(
                generate_with(rng, missing, self.format)
                    .into_iter()
                    .map(PaletteSlot::unpinned),
            );
        } else {
            self.slots.truncate(new_size);
        }
        true
    }

    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.replace_unpinned(rng, self.format);
    }

    /// Switch the output encoding. Only regenerated slots use the new
    /// encoding; pinned values keep the one they were pinned in.
    pub fn change_format<R: Rng + ?Sized>(&mut self, rng: &mut R, format: ColorFormat) {
        self.format = format;
        self.replace_unpinned(rng, format);
    }

    fn replace_unpinned<R: Rng + ?Sized>(&mut self, rng: &mut R, format: ColorFormat) {
        let unpinned = self.slots.iter().filter(|s| !s.is_pinned).count();
        let mut batch = generate_with(rng, unpinned, format).into_iter();

        let mut next: Vec<PaletteSlot> = Vec::with_capacity(self.size);
        for slot in self.slots.drain(..) {
            if slot.is_pinned {
                next.push(slot);
            } else {
                let value = batch
                    .next()
                    .unwrap_or_else(|| format.encode(random_rgb(rng)));
                next.push(PaletteSlot::unpinned(value));
            }
        }
        while next.len() < self.size {
            next.push(PaletteSlot::unpinned(format.encode(random_rgb(rng))));
        }
        next.truncate(self.size);
        self.slots = next;
    }

    /// Flip the pin at `index`. Returns false (and changes nothing) when the
    /// index is out of range.
    pub fn toggle_pin(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.is_pinned = !slot.is_pinned;
                true
            }
            None => false,
        }
    }

    /// Pinned colors in order, normalized to HEX. Unreadable values are skipped.
    pub fn pinned_hex(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|s| s.is_pinned)
            .filter_map(|s| color::to_hex(&s.value))
            .collect()
    }
}

/// Owns the session state and writes it to storage after every mutation.
pub struct PaletteEngine {
    state: PaletteSessionState,
}

impl PaletteEngine {
    /// Load the session: a pending handoff wins, then persisted state, then a
    /// freshly generated palette. The result is committed immediately.
    pub fn initialize(
        storage: &Storage,
        default_size: usize,
        default_format: ColorFormat,
    ) -> anyhow::Result<Self> {
        let mut rng = rand::rng();

        let persisted = match storage.get(SESSION_KEY)? {
            Some(raw) => match PaletteSessionState::parse(&raw) {
                Ok(state) => Some(state),
                Err(e) => {
                    tracing::warn!("ignoring stored palette: {e}");
                    None
                }
            },
            None => None,
        };

        let handoff = match storage.take(HANDOFF_KEY)? {
            Some(raw) => match parse_record::<Handoff>(HANDOFF_KEY, &raw) {
                Ok(h) => Some(h),
                Err(e) => {
                    tracing::warn!("ignoring handoff: {e}");
                    None
                }
            },
            None => None,
        };

        let (size, format, dark) = persisted
            .as_ref()
            .map(|s| (s.size, s.format, s.dark_preview_enabled))
            .unwrap_or((default_size.clamp(1, MAX_SIZE), default_format, false));

        let state = match (handoff, persisted) {
            (Some(h), _) => {
                tracing::info!(colors = h.colors.len(), "loading palette from library");
                PaletteSessionState::from_handoff(&mut rng, h.colors, size, format, dark)
            }
            (None, Some(state)) if !state.slots.is_empty() => {
                let mut state = state;
                // An older or hand-edited record may disagree with its own size.
                if state.slots.len() != state.size {
                    let size = state.size;
                    state.resize(&mut rng, size);
                }
                state
            }
            _ => {
                tracing::info!(size, "generating a new palette");
                let mut state = PaletteSessionState::fresh(&mut rng, size, format);
                state.dark_preview_enabled = dark;
                state
            }
        };

        let engine = Self { state };
        engine.commit(storage)?;
        Ok(engine)
    }

    pub fn state(&self) -> &PaletteSessionState {
        &self.state
    }

    pub fn resize(&mut self, storage: &Storage, new_size: usize) -> anyhow::Result<()> {
        if self.state.resize(&mut rand::rng(), new_size) {
            self.commit(storage)?;
        } else {
            tracing::warn!(new_size, "ignoring palette size outside 1..={MAX_SIZE}");
        }
        Ok(())
    }

    pub fn cycle_size(&mut self, storage: &Storage) -> anyhow::Result<()> {
        self.resize(storage, next_size(self.state.size))
    }

    pub fn regenerate(&mut self, storage: &Storage) -> anyhow::Result<()> {
        self.state.regenerate(&mut rand::rng());
        self.commit(storage)
    }

    pub fn change_format(&mut self, storage: &Storage, format: ColorFormat) -> anyhow::Result<()> {
        self.state.change_format(&mut rand::rng(), format);
        self.commit(storage)
    }

    pub fn toggle_pin(&mut self, storage: &Storage, index: usize) -> anyhow::Result<()> {
        if self.state.toggle_pin(index) {
            self.commit(storage)?;
        }
        Ok(())
    }

    pub fn toggle_dark_preview(&mut self, storage: &Storage) -> anyhow::Result<()> {
        self.state.dark_preview_enabled = !self.state.dark_preview_enabled;
        self.commit(storage)
    }

    fn commit(&self, storage: &Storage) -> anyhow::Result<()> {
        storage.put_json(SESSION_KEY, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn slot(value: &str, pinned: bool) -> PaletteSlot {
        PaletteSlot {
            value: value.to_string(),
            is_pinned: pinned,
        }
    }

    fn state_of(slots: Vec<PaletteSlot>) -> PaletteSessionState {
        PaletteSessionState {
            size: slots.len(),
            slots,
            format: ColorFormat::Hex,
            dark_preview_enabled: false,
        }
    }

    #[test]
    fn test_regenerate_keeps_pinned_slot_in_place() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = state_of(vec![
            slot("ff0000", false),
            slot("00ff00", true),
            slot("0000ff", false),
        ]);
        state.regenerate(&mut rng);

        assert_eq!(state.slots.len(), 3);
        assert_eq!(state.slots[1], slot("00ff00", true));
        // Generated colors are capped at 0x78 per channel, so these must differ.
        assert_ne!(state.slots[0].value, "ff0000");
        assert_ne!(state.slots[2].value, "0000ff");
        assert!(!state.slots[0].is_pinned);
        assert!(!state.slots[2].is_pinned);
    }

    #[test]
    fn test_regenerate_preserves_pinned_order() {
        let mut rng = StdRng::seed_from_u64(3);
        for mask in 0u8..32 {
            let slots: Vec<PaletteSlot> = (0..5)
                .map(|i| slot(&format!("{:02x}0000", i * 10 + 1), mask & (1 << i) != 0))
                .collect();
            let pinned_before: Vec<(usize, PaletteSlot)> = slots
                .iter()
                .cloned()
                .enumerate()
                .filter(|(_, s)| s.is_pinned)
                .collect();

            let mut state = state_of(slots);
            state.regenerate(&mut rng);

            assert_eq!(state.slots.len(), 5);
            for (i, s) in pinned_before {
                assert_eq!(state.slots[i], s);
            }
            assert_eq!(state.pinned_count(), mask.count_ones() as usize);
        }
    }

    #[test]
    fn test_regenerate_pads_short_palette() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = state_of(vec![slot("111111", true)]);
        state.size = 4;
        state.regenerate(&mut rng);
        assert_eq!(state.slots.len(), 4);
        assert_eq!(state.slots[0], slot("111111", true));
    }

    #[test]
    fn test_resize_always_hits_target_length() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = PaletteSessionState::fresh(&mut rng, 5, ColorFormat::Hex);
        for n in [7, 3, 1, 9, 5, 5] {
            assert!(state.resize(&mut rng, n));
            assert_eq!(state.slots.len(), n);
            assert_eq!(state.size, n);
        }
        assert!(!state.resize(&mut rng, 0));
        assert_eq!(state.slots.len(), 5);
    }

    #[test]
    fn test_resize_rejects_out_of_range_sizes() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut state = PaletteSessionState::fresh(&mut rng, 5, ColorFormat::Hex);
        let before = state.clone();
        for n in [0, MAX_SIZE + 1, usize::MAX] {
            assert!(!state.resize(&mut rng, n));
            assert_eq!(state, before);
        }
        assert!(state.resize(&mut rng, MAX_SIZE));
        assert_eq!(state.slots.len(), MAX_SIZE);

        let storage = Storage::open_in_memory().unwrap();
        let mut engine = PaletteEngine::initialize(&storage, 5, ColorFormat::Hex).unwrap();
        let saved = storage.get(SESSION_KEY).unwrap();
        engine.resize(&storage, usize::MAX).unwrap();
        engine.resize(&storage, MAX_SIZE + 1).unwrap();
        assert_eq!(engine.state().slots.len(), 5);
        assert_eq!(storage.get(SESSION_KEY).unwrap(), saved);
    }

    #[test]
    fn test_resize_down_drops_pinned_tail() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = PaletteSessionState::fresh(&mut rng, 7, ColorFormat::Hex);
        state.toggle_pin(5);
        state.toggle_pin(6);
        let head: Vec<PaletteSlot> = state.slots[..3].to_vec();

        state.resize(&mut rng, 3);
        assert_eq!(state.slots, head);
        assert_eq!(state.pinned_count(), 0);
    }

    #[test]
    fn test_resize_up_appends_unpinned() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut state = PaletteSessionState::fresh(&mut rng, 3, ColorFormat::Rgb);
        state.toggle_pin(0);
        state.resize(&mut rng, 5);
        assert!(state.slots[0].is_pinned);
        assert!(state.slots[3..].iter().all(|s| !s.is_pinned && s.value.starts_with("rgb(")));
    }

    #[test]
    fn test_change_format_keeps_pinned_encoding() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut state = state_of(vec![slot("0a0b0c", true), slot("101010", false)]);
        state.change_format(&mut rng, ColorFormat::Rgb);
        assert_eq!(state.format, ColorFormat::Rgb);
        assert_eq!(state.slots[0].value, "0a0b0c");
        assert!(state.slots[1].value.starts_with("rgb("));
    }

    #[test]
    fn test_toggle_pin_out_of_bounds_is_noop() {
        let mut state = state_of(vec![slot("000000", false)]);
        assert!(!state.toggle_pin(1));
        assert!(state.toggle_pin(0));
        assert!(state.slots[0].is_pinned);
        assert!(state.toggle_pin(0));
        assert!(!state.slots[0].is_pinned);
    }

    #[test]
    fn test_from_handoff_grows_and_pads() {
        let mut rng = StdRng::seed_from_u64(14);
        let many: Vec<String> = (0..8).map(|i| format!("0{i}0{i}0{i}")).collect();
        let state = PaletteSessionState::from_handoff(&mut rng, many.clone(), 5, ColorFormat::Hex, false);
        assert_eq!(state.size, 8);
        assert_eq!(
            state.slots.iter().map(|s| s.value.clone()).collect::<Vec<_>>(),
            many
        );

        let state = PaletteSessionState::from_handoff(
            &mut rng,
            vec!["123456".into()],
            5,
            ColorFormat::Hex,
            true,
        );
        assert_eq!(state.size, 5);
        assert_eq!(state.slots.len(), 5);
        assert_eq!(state.slots[0].value, "123456");
        assert!(state.slots.iter().all(|s| !s.is_pinned));
        assert!(state.dark_preview_enabled);
    }

    #[test]
    fn test_from_handoff_caps_at_max_size() {
        let mut rng = StdRng::seed_from_u64(15);
        let many: Vec<String> = (0..MAX_SIZE + 8).map(|i| format!("{:06x}", i)).collect();
        let state = PaletteSessionState::from_handoff(&mut rng, many.clone(), 5, ColorFormat::Hex, false);
        assert_eq!(state.size, MAX_SIZE);
        assert_eq!(state.slots.len(), MAX_SIZE);
        assert_eq!(state.slots[MAX_SIZE - 1].value, many[MAX_SIZE - 1]);

        let state = PaletteSessionState::fresh(&mut rng, usize::MAX, ColorFormat::Hex);
        assert_eq!(state.slots.len(), MAX_SIZE);
    }

    #[test]
    fn test_parse_size_accepts_only_choices() {
        for n in SIZE_CHOICES {
            assert_eq!(parse_size(&n.to_string()), Ok(n));
        }
        for raw in ["0", "1", "2", "4", "8", "33", "18446744073709551615", "-3", "five", ""] {
            assert!(parse_size(raw).is_err(), "{raw:?} accepted");
        }
    }

    #[test]
    fn test_parse_count_bounds() {
        assert_eq!(parse_count("1"), Ok(1));
        assert_eq!(parse_count(&MAX_SIZE.to_string()), Ok(MAX_SIZE));
        assert!(parse_count("0").is_err());
        assert!(parse_count(&(MAX_SIZE + 1).to_string()).is_err());
        assert!(parse_count("18446744073709551615").is_err());
        assert!(parse_count("lots").is_err());
    }

    #[test]
    fn test_next_size_cycles() {
        assert_eq!(next_size(3), 5);
        assert_eq!(next_size(5), 7);
        assert_eq!(next_size(7), 3);
        assert_eq!(next_size(9), 3);
        assert_eq!(next_size(1), 3);
    }

    #[test]
    fn test_parse_rejects_bad_records() {
        assert!(PaletteSessionState::parse("[]").is_err());
        assert!(PaletteSessionState::parse(r#"{"slots":[],"format":"hex","size":0}"#).is_err());
        let ok = PaletteSessionState::parse(
            r#"{"slots":[{"value":"112233","isPinned":true}],"format":"rgb","size":1}"#,
        )
        .unwrap();
        assert_eq!(ok.format, ColorFormat::Rgb);
        assert!(ok.slots[0].is_pinned);
        assert!(!ok.dark_preview_enabled);
    }

    #[test]
    fn test_parse_rejects_oversized_session() {
        let huge = format!(
            r#"{{"slots":[{{"value":"112233","isPinned":false}}],"format":"hex","size":{}}}"#,
            u64::MAX
        );
        assert!(matches!(
            PaletteSessionState::parse(&huge),
            Err(RecordError::Shape { .. })
        ));

        let too_many = serde_json::json!({
            "slots": (0..MAX_SIZE + 1)
                .map(|_| serde_json::json!({"value": "112233", "isPinned": false}))
                .collect::<Vec<_>>(),
            "format": "hex",
            "size": 3,
        });
        assert!(PaletteSessionState::parse(&too_many.to_string()).is_err());

        let at_cap = format!(
            r#"{{"slots":[{{"value":"112233","isPinned":false}}],"format":"hex","size":{MAX_SIZE}}}"#
        );
        assert!(PaletteSessionState::parse(&at_cap).is_ok());
    }

    #[test]
    fn test_engine_generates_when_storage_empty() {
        let storage = Storage::open_in_memory().unwrap();
        let engine = PaletteEngine::initialize(&storage, 5, ColorFormat::Hex).unwrap();
        assert_eq!(engine.state().slots.len(), 5);
        let saved = PaletteSessionState::parse(&storage.get(SESSION_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(&saved, engine.state());
    }

    #[test]
    fn test_engine_commits_every_mutation() {
        let storage = Storage::open_in_memory().unwrap();
        let mut engine = PaletteEngine::initialize(&storage, 5, ColorFormat::Hex).unwrap();
        let saved = || PaletteSessionState::parse(&storage.get(SESSION_KEY).unwrap().unwrap()).unwrap();

        engine.toggle_pin(&storage, 2).unwrap();
        assert!(saved().slots[2].is_pinned);

        engine.regenerate(&storage).unwrap();
        assert_eq!(&saved(), engine.state());

        engine.cycle_size(&storage).unwrap();
        assert_eq!(saved().slots.len(), 7);

        engine.change_format(&storage, ColorFormat::Rgb).unwrap();
        assert_eq!(saved().format, ColorFormat::Rgb);

        engine.toggle_dark_preview(&storage).unwrap();
        assert!(saved().dark_preview_enabled);
    }

    #[test]
    fn test_engine_reloads_persisted_state() {
        let storage = Storage::open_in_memory().unwrap();
        let mut engine = PaletteEngine::initialize(&storage, 3, ColorFormat::Hex).unwrap();
        engine.toggle_pin(&storage, 0).unwrap();
        let before = engine.state().clone();

        let again = PaletteEngine::initialize(&storage, 7, ColorFormat::Rgb).unwrap();
        assert_eq!(again.state(), &before);
    }

    #[test]
    fn test_engine_falls_back_on_corrupt_state() {
        let storage = Storage::open_in_memory().unwrap();
        storage.put(SESSION_KEY, "{broken").unwrap();
        let engine = PaletteEngine::initialize(&storage, 3, ColorFormat::Hex).unwrap();
        assert_eq!(engine.state().slots.len(), 3);
        assert!(PaletteSessionState::parse(&storage.get(SESSION_KEY).unwrap().unwrap()).is_ok());
    }

    #[test]
    fn test_engine_falls_back_on_oversized_state() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .put(
                SESSION_KEY,
                r#"{"slots":[{"value":"112233","isPinned":false}],"format":"hex","size":18446744073709551615}"#,
            )
            .unwrap();
        let engine = PaletteEngine::initialize(&storage, 5, ColorFormat::Hex).unwrap();
        assert_eq!(engine.state().size, 5);
        assert_eq!(engine.state().slots.len(), 5);
        let saved = PaletteSessionState::parse(&storage.get(SESSION_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(&saved, engine.state());
    }

    #[test]
    fn test_engine_repairs_size_mismatch() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .put(
                SESSION_KEY,
                r#"{"slots":[{"value":"111111","isPinned":true},{"value":"222222","isPinned":false}],"format":"hex","size":7}"#,
            )
            .unwrap();
        let engine = PaletteEngine::initialize(&storage, 3, ColorFormat::Hex).unwrap();
        assert_eq!(engine.state().size, 7);
        assert_eq!(engine.state().slots.len(), 7);
        assert_eq!(engine.state().slots[0], slot("111111", true));
        assert_eq!(engine.state().slots[1], slot("222222", false));
        assert!(engine.state().slots[2..].iter().all(|s| !s.is_pinned));

        let long: Vec<PaletteSlot> = (0..10).map(|i| slot(&format!("0{i}0{i}0{i}"), i % 2 == 0)).collect();
        let record = PaletteSessionState {
            size: 3,
            slots: long.clone(),
            format: ColorFormat::Hex,
            dark_preview_enabled: true,
        };
        storage.put_json(SESSION_KEY, &record).unwrap();
        let engine = PaletteEngine::initialize(&storage, 5, ColorFormat::Hex).unwrap();
        assert_eq!(engine.state().size, 3);
        assert_eq!(engine.state().slots, long[..3].to_vec());
        assert!(engine.state().dark_preview_enabled);
        let saved = PaletteSessionState::parse(&storage.get(SESSION_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved.slots.len(), 3);
    }

    #[test]
    fn test_handoff_grown_size_cycles_back_to_smallest() {
        let storage = Storage::open_in_memory().unwrap();
        let colors: Vec<String> = (1..=8).map(|i| format!("0{i}0{i}0{i}")).collect();
        storage
            .put_json(HANDOFF_KEY, &Handoff { colors: colors.clone() })
            .unwrap();

        let mut engine = PaletteEngine::initialize(&storage, 5, ColorFormat::Hex).unwrap();
        assert_eq!(engine.state().size, 8);
        assert!(!SIZE_CHOICES.contains(&engine.state().size));

        engine.cycle_size(&storage).unwrap();
        assert_eq!(engine.state().size, SIZE_CHOICES[0]);
        assert_eq!(
            engine.state().slots.iter().map(|s| s.value.clone()).collect::<Vec<_>>(),
            colors[..3].to_vec()
        );

        engine.cycle_size(&storage).unwrap();
        assert_eq!(engine.state().slots.len(), 5);
        let head: Vec<String> = engine.state().slots[..3].iter().map(|s| s.value.clone()).collect();
        assert_eq!(head, colors[..3].to_vec());
    }

    #[test]
    fn test_engine_consumes_handoff_once() {
        let storage = Storage::open_in_memory().unwrap();
        PaletteEngine::initialize(&storage, 3, ColorFormat::Hex).unwrap();
        storage
            .put_json(
                HANDOFF_KEY,
                &Handoff {
                    colors: vec!["010101".into(), "020202".into(), "030303".into(), "040404".into()],
                },
            )
            .unwrap();

        let engine = PaletteEngine::initialize(&storage, 3, ColorFormat::Hex).unwrap();
        assert_eq!(engine.state().size, 4);
        assert_eq!(engine.state().slots[3].value, "040404");
        assert_eq!(storage.get(HANDOFF_KEY).unwrap(), None);

        // A second load sees the committed session, not the stale handoff.
        let mut again = PaletteEngine::initialize(&storage, 3, ColorFormat::Hex).unwrap();
        assert_eq!(again.state(), engine.state());
        again.regenerate(&storage).unwrap();
        let third = PaletteEngine::initialize(&storage, 3, ColorFormat::Hex).unwrap();
        assert_eq!(third.state(), again.state());
    }

    #[test]
    fn test_pinned_hex_normalizes() {
        let state = state_of(vec![
            slot("rgb(255, 0, 0)", true),
            slot("00FF00", true),
            slot("0000ff", false),
            slot("bogus", true),
        ]);
        assert_eq!(state.pinned_hex(), vec!["ff0000".to_string(), "00ff00".to_string()]);
    }
}
