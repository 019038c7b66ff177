//! Hotbar: the ordered list of placeable block types.

use tracing::debug;
use voxbox_world::BlockType;

/// Ordered block types with one selected slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotbar {
    slots: Vec<BlockType>,
    selected: usize,
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::new(BlockType::ALL.to_vec())
    }
}

impl Hotbar {
    /// Creates a hotbar with the first slot selected.
    ///
    /// An empty slot list falls back to the default block types.
    #[must_use]
    pub fn new(slots: Vec<BlockType>) -> Self {
        if slots.is_empty() {
            return Self::default();
        }
        Self { slots, selected: 0 }
    }

    /// Builds a hotbar from block type names.
    #[must_use]
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(names.iter().map(|n| BlockType::from_name(n.as_ref())).collect())
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; a hotbar has at least one slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot contents in order.
    #[must_use]
    pub fn slots(&self) -> &[BlockType] {
        &self.slots
    }

    /// Zero-based index of the selected slot.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Block type in the selected slot.
    #[must_use]
    pub fn selected_type(&self) -> BlockType {
        self.slots[self.selected]
    }

    /// Selects slot `digit - 1` for a number key press.
    ///
    /// Digits outside `1..=len` leave the selection unchanged and return
    /// `false`.
    pub fn select_digit(&mut self, digit: u8) -> bool {
        let index = usize::from(digit);
        if index == 0 || index > self.slots.len() {
            return false;
        }
        self.selected = index - 1;
        debug!("Hotbar slot {} selected ({})", digit, self.selected_type());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slots() {
        let hotbar = Hotbar::default();
        assert_eq!(hotbar.len(), 5);
        assert_eq!(hotbar.selected_index(), 0);
        assert_eq!(hotbar.selected_type(), BlockType::Grass);
    }

    #[test]
    fn test_digit_selection() {
        let mut hotbar = Hotbar::default();
        assert!(hotbar.select_digit(3));
        assert_eq!(hotbar.selected_index(), 2);
        assert_eq!(hotbar.selected_type(), BlockType::Stone);

        assert!(!hotbar.select_digit(9));
        assert_eq!(hotbar.selected_index(), 2);
        assert!(!hotbar.select_digit(0));
        assert_eq!(hotbar.selected_index(), 2);

        assert!(hotbar.select_digit(5));
        assert_eq!(hotbar.selected_type(), BlockType::Leaves);
    }

    #[test]
    fn test_from_names() {
        let mut hotbar = Hotbar::from_names(&["stone", "glass"]);
        assert_eq!(hotbar.slots(), &[BlockType::Stone, BlockType::Unknown]);
        assert!(!hotbar.select_digit(3));

        let empty: [&str; 0] = [];
        assert_eq!(Hotbar::from_names(&empty), Hotbar::default());
    }
}
