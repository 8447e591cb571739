//! Product views and the fixed-size per-view container.

use serde::{Deserialize, Serialize};

/// One facet of the garment with independent design state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Front,
    Back,
    LeftSleeve,
    RightSleeve,
    NeckLabel,
}

impl View {
    /// All views in publish order.
    pub const ALL: [View; 5] = [
        View::Front,
        View::Back,
        View::LeftSleeve,
        View::RightSleeve,
        View::NeckLabel,
    ];

    /// Stable index into per-view arrays.
    pub fn index(self) -> usize {
        match self {
            View::Front => 0,
            View::Back => 1,
            View::LeftSleeve => 2,
            View::RightSleeve => 3,
            View::NeckLabel => 4,
        }
    }

    /// Human-readable label for panels and file names.
    pub fn label(self) -> &'static str {
        match self {
            View::Front => "front",
            View::Back => "back",
            View::LeftSleeve => "leftSleeve",
            View::RightSleeve => "rightSleeve",
            View::NeckLabel => "neckLabel",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-size map from [`View`] to `T`.
///
/// Replaces the stringly-keyed per-view objects of the original editor with
/// an exhaustive array indexed by the view tag, so every view always has an
/// entry and view coverage is checked at compile time.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewMap<T> {
    items: [T; 5],
}

impl<T> ViewMap<T> {
    /// Builds a map by evaluating `f` for each view.
    pub fn from_fn(mut f: impl FnMut(View) -> T) -> Self {
        Self {
            items: View::ALL.map(&mut f),
        }
    }

    /// Iterates entries in view order.
    pub fn iter(&self) -> impl Iterator<Item = (View, &T)> {
        View::ALL.iter().map(move |&v| (v, &self.items[v.index()]))
    }

    /// Iterates entries mutably in view order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (View, &mut T)> {
        View::ALL.iter().copied().zip(self.items.iter_mut())
    }
}

impl<T: Default> Default for ViewMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> std::ops::Index<View> for ViewMap<T> {
    type Output = T;

    fn index(&self, view: View) -> &T {
        &self.items[view.index()]
    }
}

impl<T> std::ops::IndexMut<View> for ViewMap<T> {
    fn index_mut(&mut self, view: View) -> &mut T {
        &mut self.items[view.index()]
    }
}
