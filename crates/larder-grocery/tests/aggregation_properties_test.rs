// ABOUTME: Property-level tests for grocery list aggregation across several recipes
// ABOUTME: Covers idempotence, scaling linearity, grouping order, isolation, and display output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use larder_core::models::{Aisle, CustomItem, Ingredient, IngredientUnit, Recipe};
use larder_grocery::projection::project;
use larder_grocery::{aggregate, AisleGroupedList};
use uuid::Uuid;

// ============================================================================
// Fixtures
// ============================================================================

fn pancakes() -> Recipe {
    Recipe::new("alice", "Pancakes").with_ingredients(vec![
        Ingredient::new("Flour", 1.5, IngredientUnit::Cup).with_aisle(Aisle::Baking),
        Ingredient::new("Milk", 1.0, IngredientUnit::Cup)
            .with_aisle(Aisle::Dairy)
            .with_notes("whole"),
        Ingredient::new("Egg", 2.0, IngredientUnit::Unit).with_aisle(Aisle::Dairy),
        Ingredient::new("Salt", 1.0, IngredientUnit::Pinch).with_aisle(Aisle::Spices),
    ])
}

fn omelette() -> Recipe {
    Recipe::new("alice", "Omelette").with_ingredients(vec![
        Ingredient::new("eggs", 3.0, IngredientUnit::Unit).with_aisle(Aisle::Dairy),
        Ingredient::new(" EGG ", 1.0, IngredientUnit::Unit).with_aisle(Aisle::Dairy),
        Ingredient::new("Chives", 1.0, IngredientUnit::Tbsp)
            .with_aisle(Aisle::Produce)
            .with_notes("snipped"),
        Ingredient::new("Milk", 60.0, IngredientUnit::Ml).with_aisle(Aisle::Dairy),
    ])
}

fn chips() -> CustomItem {
    CustomItem {
        id: Uuid::new_v4(),
        name: "Tortilla chips".to_owned(),
        quantity: 2.0,
        unit: IngredientUnit::Unit,
        aisle: Aisle::DryGoods,
        notes: None,
    }
}

fn total(list: &AisleGroupedList, key: &str) -> f64 {
    list.find(key)
        .unwrap_or_else(|| panic!("missing line {key}"))
        .total_quantity
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_aggregation_is_idempotent() -> Result<()> {
    let (a, b) = (pancakes(), omelette());
    let custom = vec![chips()];

    let first = aggregate(&[(&a, 2.0), (&b, 1.0)], &custom)?;
    let second = aggregate(&[(&a, 2.0), (&b, 1.0)], &custom)?;

    assert_eq!(first, second);
    assert_eq!(serde_json::to_string(&first)?, serde_json::to_string(&second)?);
    Ok(())
}

#[test]
fn test_doubling_a_multiplier_doubles_its_contribution() -> Result<()> {
    let (a, b) = (pancakes(), omelette());

    let base = aggregate(&[(&a, 1.0), (&b, 1.0)], &[])?;
    let doubled = aggregate(&[(&a, 2.0), (&b, 1.0)], &[])?;

    for ingredient in &a.ingredients {
        let key = format!(
            "{}::{}",
            ingredient.name_raw.trim().to_lowercase(),
            ingredient.unit
        );
        let delta = total(&doubled, &key) - total(&base, &key);
        assert!(
            (delta - ingredient.quantity).abs() < 1e-9,
            "{key} grew by {delta}"
        );
    }
    // untouched by the pancake multiplier
    assert!((total(&doubled, "chives::tbsp") - total(&base, "chives::tbsp")).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_whitespace_and_case_collapse_into_one_line() -> Result<()> {
    let b = omelette();
    let list = aggregate(&[(&b, 1.0)], &[])?;

    // "eggs" is a different name from "egg"
    assert!((total(&list, "egg::unit") - 1.0).abs() < 1e-9);
    assert!((total(&list, "eggs::unit") - 3.0).abs() < 1e-9);
    assert_eq!(list.find("egg::unit").unwrap().name, "EGG");
    Ok(())
}

#[test]
fn test_groups_and_lines_are_sorted() -> Result<()> {
    let (a, b) = (pancakes(), omelette());
    let list = aggregate(&[(&a, 1.0), (&b, 1.0)], &[chips()])?;

    let aisles: Vec<Aisle> = list.iter().map(|(aisle, _)| aisle).collect();
    assert_eq!(
        aisles,
        vec![
            Aisle::Baking,
            Aisle::Dairy,
            Aisle::DryGoods,
            Aisle::Produce,
            Aisle::Spices
        ]
    );

    let dairy: Vec<String> = list
        .get(Aisle::Dairy)
        .unwrap()
        .iter()
        .map(|line| line.key.clone())
        .collect();
    assert_eq!(dairy, vec!["egg::unit", "eggs::unit", "milk::cup", "milk::ml"]);
    Ok(())
}

#[test]
fn test_custom_items_keep_their_identity() -> Result<()> {
    let a = pancakes();
    let mut flour = chips();
    flour.name = "flour".to_owned();
    flour.unit = IngredientUnit::Cup;
    flour.aisle = Aisle::Baking;
    let other = CustomItem {
        id: Uuid::new_v4(),
        ..flour.clone()
    };

    let list = aggregate(&[(&a, 1.0)], &[flour.clone(), other.clone()])?;
    let baking = list.get(Aisle::Baking).unwrap();

    assert_eq!(baking.len(), 3);
    assert!((total(&list, "flour::cup") - 1.5).abs() < 1e-9);
    assert!(list.find(&flour.id.to_string()).unwrap().is_custom);
    assert!(list.find(&other.id.to_string()).unwrap().is_custom);
    Ok(())
}

#[test]
fn test_empty_input_yields_no_groups() -> Result<()> {
    let list = aggregate(&[], &[])?;
    assert!(list.is_empty());
    assert_eq!(list.group_count(), 0);
    assert!(project(&list).is_empty());
    assert_eq!(serde_json::to_string(&list)?, "{}");
    Ok(())
}

#[test]
fn test_projection_renders_headings_and_quantities() -> Result<()> {
    let b = Recipe::new("alice", "Thirds").with_ingredient(
        Ingredient::new("Rice", 1.0, IngredientUnit::Cup).with_aisle(Aisle::DryGoods),
    );
    let list = aggregate(&[(&b, 7.0 / 3.0)], &[])?;
    let sections = project(&list);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].heading, "dry goods");
    assert_eq!(sections[0].lines, vec!["2.33 cup Rice"]);
    Ok(())
}
