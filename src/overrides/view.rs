// ABOUTME: Applies checked and hidden sets to an aggregated list for display
// ABOUTME: Hidden lines move to a separate list instead of being dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::{BTreeMap, BTreeSet};

use larder_core::models::Aisle;
use larder_grocery::{AisleGroupedList, CombinedIngredient};
use serde::{Deserialize, Serialize};

use super::OverrideState;

/// An aggregated line annotated with its override status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListLine {
    /// The aggregated line
    pub item: CombinedIngredient,
    /// Override key (same as `item.key`)
    pub key: String,
    /// Whether the user ticked it off
    pub checked: bool,
}

/// Checked and visible counters for a list header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideSummary {
    /// Visible lines that are checked
    pub checked: usize,
    /// Lines still shown
    pub visible: usize,
    /// Lines the user already has
    pub hidden: usize,
    /// All aggregated lines
    pub total: usize,
}

/// Aggregated list partitioned by the hidden set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideView {
    /// Lines to buy, grouped by aisle; aisles with no visible line are omitted
    pub visible: BTreeMap<Aisle, Vec<ListLine>>,
    /// Lines hidden as "already have", in aisle order
    pub hidden: Vec<ListLine>,
}

impl OverrideView {
    /// Header counters
    ///
    /// Keys left over from lines that no longer aggregate are not counted.
    #[must_use]
    pub fn summary(&self) -> OverrideSummary {
        let visible = self.visible.values().map(Vec::len).sum();
        let checked = self
            .visible
            .values()
            .flatten()
            .filter(|line| line.checked)
            .count();
        OverrideSummary {
            checked,
            visible,
            hidden: self.hidden.len(),
            total: visible + self.hidden.len(),
        }
    }

    /// Whether there is nothing to show at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.hidden.is_empty()
    }

    /// Find a visible or hidden line by key
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&ListLine> {
        self.visible
            .values()
            .flatten()
            .chain(&self.hidden)
            .find(|line| line.key == key)
    }
}

/// Partition `aggregated` into visible and hidden lines
///
/// The aggregated list is never modified; a hidden line is moved, not deleted,
/// so restoring it brings back the same total.
#[must_use]
pub fn apply(
    aggregated: &AisleGroupedList,
    checked: &BTreeSet<String>,
    hidden: &BTreeSet<String>,
) -> OverrideView {
    let mut view = OverrideView::default();
    for (aisle, lines) in aggregated.iter() {
        for item in lines {
            let line = ListLine {
                key: item.key.clone(),
                checked: checked.contains(&item.key),
                item: item.clone(),
            };
            if hidden.contains(&line.key) {
                view.hidden.push(line);
            } else {
                view.visible.entry(aisle).or_default().push(line);
            }
        }
    }
    view
}

impl OverrideState {
    /// Apply this state to an aggregated list
    #[must_use]
    pub fn apply(&self, aggregated: &AisleGroupedList) -> OverrideView {
        apply(aggregated, &self.checked, &self.hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::models::{Ingredient, IngredientUnit, Recipe};
    use larder_grocery::aggregate;

    fn sample() -> AisleGroupedList {
        let recipe = Recipe::new("alice", "Salad").with_ingredients(vec![
            Ingredient::new("Lettuce", 1.0, IngredientUnit::Unit).with_aisle(Aisle::Produce),
            Ingredient::new("Feta", 200.0, IngredientUnit::G).with_aisle(Aisle::Dairy),
        ]);
        aggregate(&[(&recipe, 1.0)], &[]).unwrap()
    }

    #[test]
    fn test_hidden_line_moves_and_empty_aisle_is_dropped() {
        let list = sample();
        let mut state = OverrideState::default();
        state.hide("feta::g");
        state.toggle_checked("lettuce::unit");

        let view = state.apply(&list);
        assert!(!view.visible.contains_key(&Aisle::Dairy));
        assert_eq!(view.hidden.len(), 1);
        assert!(view.find("lettuce::unit").unwrap().checked);

        let summary = view.summary();
        assert_eq!(
            summary,
            OverrideSummary {
                checked: 1,
                visible: 1,
                hidden: 1,
                total: 2
            }
        );
    }

    #[test]
    fn test_stale_keys_are_ignored() {
        let list = sample();
        let mut state = OverrideState::default();
        state.toggle_checked("gone::cup");
        state.hide("gone::cup");

        let view = state.apply(&list);
        assert!(view.hidden.is_empty());
        assert_eq!(view.summary().checked, 0);
        assert_eq!(view.summary().visible, 2);
    }
}
