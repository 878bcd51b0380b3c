use super::store::ColorStore;
use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    System,
    Custom,
}

/// Where an absolute palette index lands, with the index local to its
/// section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    System(usize),
    Custom(usize),
}

impl Slot {
    pub fn section(self) -> Section {
        match self {
            Slot::System(_) => Section::System,
            Slot::Custom(_) => Section::Custom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteItem {
    pub index: usize,
    pub color: Color,
    pub section: Section,
    pub selected: bool,
}

impl PaletteItem {
    /// Only custom swatches can be deleted.
    pub fn deletable(&self) -> bool {
        self.section == Section::Custom
    }

    /// Only system swatches can be reordered.
    pub fn draggable(&self) -> bool {
        self.section == Section::System
    }
}

/// Read-mostly view over a [`ColorStore`]. Holds no state of its own, so
/// it is rebuilt whenever it is needed.
pub struct PaletteModel<'a> {
    store: &'a ColorStore,
}

impl<'a> PaletteModel<'a> {
    pub fn new(store: &'a ColorStore) -> Self {
        Self { store }
    }

    pub fn locate(&self, index: usize) -> Option<Slot> {
        let system = self.store.system().len();
        if index < system {
            Some(Slot::System(index))
        } else if index < self.store.len() {
            Some(Slot::Custom(index - system))
        } else {
            None
        }
    }

    pub fn items(&self) -> Vec<PaletteItem> {
        let selected = self.store.selection().index;
        self.store
            .all_colors()
            .into_iter()
            .enumerate()
            .filter_map(|(index, color)| {
                let section = self.locate(index)?.section();
                Some(PaletteItem {
                    index,
                    color,
                    section,
                    selected: index == selected,
                })
            })
            .collect()
    }
}

/// Applies a drag from `from` to `to` (absolute indices). Only a drag
/// with both ends inside the system section reorders; anything else,
/// including system <-> custom, is rejected.
pub fn move_item(store: &mut ColorStore, from: usize, to: usize) -> bool {
    let model = PaletteModel::new(store);
    match (model.locate(from), model.locate(to)) {
        (Some(Slot::System(a)), Some(Slot::System(b))) => store.reorder_system(a, b),
        _ => false,
    }
}

/// Deletes the swatch at absolute `index` if it is a custom color.
pub fn delete_item(store: &mut ColorStore, index: usize) -> bool {
    let slot = PaletteModel::new(store).locate(index);
    match slot {
        Some(Slot::Custom(local)) => store.delete_custom(local),
        _ => false,
    }
}
