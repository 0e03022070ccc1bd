//! The set of selected artwork ids.

use std::collections::HashSet;

use crate::model::ArtworkId;

/// The authoritative set of selected artwork ids.
///
/// Membership is keyed purely by id and does not depend on which page is in
/// view: a record selected on page 2 stays selected while page 5 is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<ArtworkId>,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `id` is selected.
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `id`. Returns `true` if it was not already selected.
    pub fn insert(&mut self, id: ArtworkId) -> bool {
        self.ids.insert(id)
    }

    /// Flips membership of `id`. Returns the new membership.
    pub fn toggle(&mut self, id: ArtworkId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Applies a one-page diff.
    ///
    /// Every id in `visible` is added if it is in `selected_in_view` and
    /// removed otherwise. Ids outside `visible` are left alone, as are ids
    /// in `selected_in_view` that are not visible.
    pub fn set_from_visible(&mut self, visible: &HashSet<ArtworkId>, selected_in_view: &HashSet<ArtworkId>) {
        for &id in visible {
            if selected_in_view.contains(&id) {
                self.ids.insert(id);
            } else {
                self.ids.remove(&id);
            }
        }
    }

    /// Returns the selected ids among `visible`, for checkbox rendering.
    pub fn intersection<I>(&self, visible: I) -> HashSet<ArtworkId>
    where
        I: IntoIterator<Item = ArtworkId>,
    {
        visible.into_iter().filter(|id| self.ids.contains(id)).collect()
    }

    /// Removes every id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Returns the number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the selected ids in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<ArtworkId> {
        let mut ids: Vec<_> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<ArtworkId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = ArtworkId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: impl IntoIterator<Item = ArtworkId>) -> HashSet<ArtworkId> {
        range.into_iter().collect()
    }

    #[test]
    fn test_toggle_twice_is_noop() {
        let mut set: SelectionSet = [3, 4].into_iter().collect();
        let before = set.clone();

        assert!(set.toggle(7));
        assert!(!set.toggle(7));
        assert_eq!(set, before);

        assert!(!set.toggle(3));
        assert!(set.toggle(3));
        assert_eq!(set, before);
    }

    #[test]
    fn test_set_from_visible_scoped() {
        let mut set: SelectionSet = [2, 20, 21].into_iter().collect();

        set.set_from_visible(&ids(1..=8), &ids([1, 3, 30]));

        assert_eq!(set.to_sorted_vec(), vec![1, 3, 20, 21]);
    }

    #[test]
    fn test_toggle_then_visible_diff() {
        let mut set = SelectionSet::new();
        set.toggle(5);
        set.set_from_visible(&ids(1..=8), &ids([1, 2, 3]));
        assert_eq!(set.to_sorted_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_intersection() {
        let set: SelectionSet = [1, 9, 12].into_iter().collect();
        assert_eq!(set.intersection(9..=16), ids([9, 12]));
        assert!(set.intersection(17..=24).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut set: SelectionSet = (1..=4).collect();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
