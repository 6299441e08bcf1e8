// ABOUTME: Display formatting for aggregated lines: quantities, aisle headings, and line text
// ABOUTME: Stateless helpers shared by the CLI renderer and any other presentation layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use larder_core::models::Aisle;
use serde::{Deserialize, Serialize};

use crate::aggregation::{AisleGroupedList, CombinedIngredient};

/// Whole numbers print without decimals, anything else with exactly two
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
    if quantity % 1.0 == 0.0 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity:.2}")
    }
}

/// `dry_goods` becomes `dry goods`
#[must_use]
pub fn aisle_heading(aisle: Aisle) -> String {
    aisle.as_str().replace('_', " ")
}

/// `"{quantity} {unit} {name}"`, followed by `(notes, ...)` when there are any
#[must_use]
pub fn format_line(line: &CombinedIngredient) -> String {
    let mut text = format!(
        "{} {} {}",
        format_quantity(line.total_quantity),
        line.unit,
        line.name
    );
    if !line.notes.is_empty() {
        text.push_str(" (");
        text.push_str(&line.notes.join(", "));
        text.push(')');
    }
    text
}

/// One rendered aisle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AisleSection {
    /// Heading text
    pub heading: String,
    /// Rendered lines in display order
    pub lines: Vec<String>,
}

/// Render every aisle of an aggregated list, in display order
#[must_use]
pub fn project(list: &AisleGroupedList) -> Vec<AisleSection> {
    list.iter()
        .map(|(aisle, lines)| AisleSection {
            heading: aisle_heading(aisle),
            lines: lines.iter().map(format_line).collect(),
        })
        .collect()
}
