// ABOUTME: Output formatting helpers for larder-cli
// ABOUTME: Renders a grocery list view as aisle sections with checkboxes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use larder::overrides::ListLine;
use larder::services::GroceryListView;
use larder_grocery::{aisle_heading, format_line};

/// Print a short status line; suppressed in JSON mode so stdout stays parseable
pub fn notice(json: bool, message: &str) {
    if !json {
        println!("{message}");
    }
}

fn push_line(out: &mut String, line: &ListLine, keys: bool) {
    let mark = if line.checked { "x" } else { " " };
    out.push_str(&format!("  [{mark}] {}", format_line(&line.item)));
    if keys {
        out.push_str(&format!("  <{}>", line.key));
    }
    out.push('\n');
}

/// Render the list header, aisles, hidden lines, and stocked suggestions
pub fn render(view: &GroceryListView, keys: bool) -> String {
    let summary = view.summary;
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}/{} checked, {} hidden)\n",
        view.list.title, summary.checked, summary.visible, summary.hidden
    ));

    if view.view.is_empty() {
        out.push_str("\nNothing to buy.\n");
        return out;
    }

    for (aisle, lines) in &view.view.visible {
        out.push_str(&format!("\n{}\n", aisle_heading(*aisle).to_uppercase()));
        for line in lines {
            push_line(&mut out, line, keys);
        }
    }

    if !view.view.hidden.is_empty() {
        out.push_str("\nALREADY HAVE\n");
        for line in &view.view.hidden {
            push_line(&mut out, line, keys);
        }
    }

    if !view.stocked_suggestions.is_empty() {
        out.push_str(&format!(
            "\nUsually stocked: {}\n",
            view.stocked_suggestions.join(", ")
        ));
    }
    out
}
