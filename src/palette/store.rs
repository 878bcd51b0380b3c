use crate::color::Color;
use crate::storage::{KeyValueStore, STORAGE_KEY};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Persisted shape. The selection index is deliberately absent: it is
/// re-derived from `current_color` on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub system_colors: Vec<Color>,
    pub custom_colors: Vec<Color>,
    pub current_color: Color,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            system_colors: Color::defaults(),
            custom_colors: Vec::new(),
            current_color: Color::white(),
        }
    }
}

impl Snapshot {
    /// Parses a stored record. Each field that is missing, null or
    /// malformed falls back to its own default; the others survive.
    pub fn from_json(raw: &str) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "stored palette is not valid JSON, using defaults");
                return Self::default();
            }
        };
        let defaults = Self::default();
        let Some(obj) = value.as_object() else {
            warn!("stored palette is not an object, using defaults");
            return defaults;
        };

        fn field<T: serde::de::DeserializeOwned>(
            obj: &serde_json::Map<String, Value>,
            name: &str,
        ) -> Option<T> {
            let v = obj.get(name)?;
            if v.is_null() {
                return None;
            }
            match serde_json::from_value(v.clone()) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!(field = name, error = %e, "malformed field, using default");
                    None
                }
            }
        }

        Self {
            system_colors: field(obj, "systemColors").unwrap_or(defaults.system_colors),
            custom_colors: field(obj, "customColors").unwrap_or(defaults.custom_colors),
            current_color: field(obj, "currentColor").unwrap_or(defaults.current_color),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("serialize palette")
    }
}

/// The two ordered palette sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSet {
    pub system: Vec<Color>,
    pub custom: Vec<Color>,
}

impl ColorSet {
    /// Builds a set that honours the no-duplicates invariant: repeats are
    /// dropped, and a custom color already in the system list is dropped.
    fn sanitized(system: Vec<Color>, custom: Vec<Color>) -> Self {
        let mut set = Self {
            system: Vec::with_capacity(system.len()),
            custom: Vec::with_capacity(custom.len()),
        };
        for c in system {
            if !set.system.contains(&c) {
                set.system.push(c);
            }
        }
        for c in custom {
            if !set.contains(&c) {
                set.custom.push(c);
            }
        }
        set
    }

    pub fn contains(&self, color: &Color) -> bool {
        self.system.contains(color) || self.custom.contains(color)
    }

    pub fn len(&self) -> usize {
        self.system.len() + self.custom.len()
    }
}

/// Absolute index into `system ++ custom`, plus the color it denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub color: Color,
}

/// Single source of truth for the palette. Every mutation writes the
/// snapshot back through the storage collaborator.
pub struct ColorStore {
    colors: ColorSet,
    selection: Selection,
    storage: Box<dyn KeyValueStore>,
    persist_error: Option<String>,
}

impl std::fmt::Debug for ColorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorStore")
            .field("colors", &self.colors)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl ColorStore {
    /// Reads the snapshot from storage. A read failure is not fatal: the
    /// session starts from defaults.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let snapshot = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => Snapshot::from_json(&raw),
            Ok(None) => Snapshot::default(),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "read stored palette failed, using defaults");
                Snapshot::default()
            }
        };
        Self::from_snapshot(snapshot, storage)
    }

    pub fn from_snapshot(snapshot: Snapshot, storage: Box<dyn KeyValueStore>) -> Self {
        let colors = ColorSet::sanitized(snapshot.system_colors, snapshot.custom_colors);
        let selection = resolve_selection(&colors, snapshot.current_color);
        debug!(
            system = colors.system.len(),
            custom = colors.custom.len(),
            selected = selection.index,
            "palette loaded"
        );
        Self {
            colors,
            selection,
            storage,
            persist_error: None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            system_colors: self.colors.system.clone(),
            custom_colors: self.colors.custom.clone(),
            current_color: self.selection.color.clone(),
        }
    }

    pub fn save(&mut self) -> anyhow::Result<()> {
        let raw = self.snapshot().to_json()?;
        self.storage.set(STORAGE_KEY, &raw)
    }

    /// Non-fatal save: failures are logged and kept for the UI to report.
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            let msg = format!("{e:#}");
            warn!(error = %msg, "persist palette failed");
            self.persist_error = Some(msg);
        }
    }

    pub fn take_persist_error(&mut self) -> Option<String> {
        self.persist_error.take()
    }

    #[cfg(test)]
    pub fn colors(&self) -> &ColorSet {
        &self.colors
    }

    pub fn system(&self) -> &[Color] {
        &self.colors.system
    }

    pub fn custom(&self) -> &[Color] {
        &self.colors.custom
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// `system ++ custom`, built fresh on every call.
    pub fn all_colors(&self) -> Vec<Color> {
        self.colors
            .system
            .iter()
            .chain(self.colors.custom.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn color_at(&self, index: usize) -> Option<&Color> {
        let system = self.colors.system.len();
        if index < system {
            self.colors.system.get(index)
        } else {
            self.colors.custom.get(index - system)
        }
    }

    /// Appends a custom color unless it is already anywhere in the palette.
    pub fn add_custom(&mut self, color: Color) -> bool {
        if self.colors.contains(&color) {
            debug!(%color, "duplicate color rejected");
            return false;
        }
        info!(%color, "custom color added");
        self.colors.custom.push(color);
        self.persist();
        true
    }

    /// Removes `custom[local]`. A selection at or past the removed slot
    /// slides back by one and re-resolves its color.
    pub fn delete_custom(&mut self, local: usize) -> bool {
        if local >= self.colors.custom.len() {
            return false;
        }
        let removed_at = self.colors.system.len() + local;
        let removed = self.colors.custom.remove(local);
        info!(color = %removed, index = removed_at, "custom color deleted");

        if self.selection.index >= removed_at {
            let len = self.len();
            if len == 0 {
                self.selection.index = 0;
            } else {
                let index = self.selection.index.saturating_sub(1).min(len - 1);
                if let Some(color) = self.color_at(index).cloned() {
                    self.selection = Selection { index, color };
                }
            }
        }
        self.persist();
        true
    }

    /// Moves one system color to `to` (remove, then insert). The selection
    /// keeps pointing at the same color.
    pub fn reorder_system(&mut self, from: usize, to: usize) -> bool {
        let len = self.colors.system.len();
        if from >= len || to >= len || from == to {
            return false;
        }

        let color = self.colors.system.remove(from);
        self.colors.system.insert(to, color);

        let current = self.selection.index;
        if current == from {
            self.selection.index = to;
        } else if from < current && to >= current {
            self.selection.index = current - 1;
        } else if from > current && to <= current {
            self.selection.index = current + 1;
        }
        debug!(from, to, selected = self.selection.index, "system colors reordered");
        self.persist();
        true
    }

    pub fn select(&mut self, index: usize) -> bool {
        let Some(color) = self.color_at(index).cloned() else {
            return false;
        };
        debug!(index, %color, "color selected");
        self.selection = Selection { index, color };
        self.persist();
        true
    }

    /// Moves the selection by `delta`, clamped to the palette bounds.
    /// Returns false when the selection did not move.
    pub fn step(&mut self, delta: isize) -> bool {
        let len = self.len();
        if len == 0 {
            return false;
        }
        let target = self
            .selection
            .index
            .saturating_add_signed(delta)
            .min(len - 1);
        if target == self.selection.index {
            return false;
        }
        self.select(target)
    }

    /// Restores the factory palette.
    pub fn reset(&mut self) {
        info!("palette reset to defaults");
        self.restore_defaults();
        self.persist();
    }

    /// Drops the stored record entirely; the next load is a first run.
    pub fn forget(&mut self) -> anyhow::Result<()> {
        self.storage.remove(STORAGE_KEY)?;
        info!("stored palette removed");
        self.restore_defaults();
        Ok(())
    }

    fn restore_defaults(&mut self) {
        let defaults = Snapshot::default();
        self.colors = ColorSet::sanitized(defaults.system_colors, defaults.custom_colors);
        self.selection = resolve_selection(&self.colors, defaults.current_color);
    }
}

/// Finds `color` in the palette. When it is gone (e.g. the default set
/// changed), the selection falls back to index 0 and takes that color.
fn resolve_selection(colors: &ColorSet, color: Color) -> Selection {
    let found = colors
        .system
        .iter()
        .chain(colors.custom.iter())
        .position(|c| *c == color);
    match found {
        Some(index) => Selection { index, color },
        None => {
            let first = colors
                .system
                .first()
                .or_else(|| colors.custom.first())
                .cloned();
            if let Some(first) = &first {
                debug!(missing = %color, fallback = %first, "stored selection not in palette");
            }
            Selection {
                index: 0,
                color: first.unwrap_or(color),
            }
        }
    }
}
