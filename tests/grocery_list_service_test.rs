// ABOUTME: Integration tests for the grocery list service over in-memory stores
// ABOUTME: Covers recipe upserts, custom items, overrides, list lifecycle, and ownership
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use common::{harness, omelette, pancakes, public, seed, OWNER};
use larder::database::ShoppingListRepository;
use larder::models::{Aisle, CustomItemDraft, CustomItemPatch, IngredientUnit};
use larder::{ErrorCode, MergeStrategy};
use uuid::Uuid;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn test_two_recipes_merge_by_name_and_unit() -> Result<()> {
    let h = harness();
    let pancakes = seed(&h, pancakes(OWNER)).await;
    let omelette = seed(&h, omelette(OWNER)).await;

    let first = h.service.add_recipe(OWNER, pancakes.id, 1.0).await?;
    let second = h.service.add_recipe(OWNER, omelette.id, 1.0).await?;
    assert_eq!(first.list.id, second.list.id);
    assert_eq!(first.list.title, "My Shopping List");

    let view = h.service.view(OWNER, first.list.id, None).await?;
    assert_eq!(view.summary.total, 5);

    let eggs = view.view.find("eggs::unit").unwrap();
    assert_eq!(eggs.item.name, "Eggs");
    assert!(close(eggs.item.total_quantity, 5.0));
    assert_eq!(eggs.item.sources, vec![pancakes.id, omelette.id]);

    // Different units stay separate lines in exact mode
    assert!(view.view.find("milk::cup").is_some());
    assert!(view.view.find("milk::tbsp").is_some());

    let salt = view.view.find("salt::tsp").unwrap();
    assert!(close(salt.item.total_quantity, 1.5));
    Ok(())
}

#[tokio::test]
async fn test_family_strategy_merges_across_units() -> Result<()> {
    let h = harness();
    let pancakes = seed(&h, pancakes(OWNER)).await;
    let omelette = seed(&h, omelette(OWNER)).await;
    let list = h.service.add_recipe(OWNER, pancakes.id, 1.0).await?.list;
    h.service.add_recipe(OWNER, omelette.id, 1.0).await?;

    let view = h
        .service
        .view(OWNER, list.id, Some(MergeStrategy::UnitFamily))
        .await?;
    assert_eq!(view.strategy, MergeStrategy::UnitFamily);
    assert_eq!(view.summary.total, 4);
    let milk = view.view.find("milk::volume").unwrap();
    assert_eq!(milk.item.unit, IngredientUnit::Ml);
    Ok(())
}

#[tokio::test]
async fn test_adding_same_recipe_replaces_multiplier() -> Result<()> {
    let h = harness();
    let pancakes = seed(&h, pancakes(OWNER)).await;

    let list = h.service.add_recipe(OWNER, pancakes.id, 1.0).await?.list;
    let again = h.service.add_recipe(OWNER, pancakes.id, 3.0).await?;
    assert!(!again.inserted);

    let view = h.service.view(OWNER, list.id, None).await?;
    let flour = view.view.find("flour::cup").unwrap();
    assert!(close(flour.item.total_quantity, 6.0));

    h.service.update_multiplier(OWNER, pancakes.id, 0.5).await?;
    let view = h.service.view(OWNER, list.id, None).await?;
    let flour = view.view.find("flour::cup").unwrap();
    assert!(close(flour.item.total_quantity, 1.0));

    let err = h
        .service
        .update_multiplier(OWNER, pancakes.id, 0.0)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    Ok(())
}

#[tokio::test]
async fn test_invalid_multiplier_rejected_before_list_creation() -> Result<()> {
    let h = harness();
    let pancakes = seed(&h, pancakes(OWNER)).await;

    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = h
            .service
            .add_recipe(OWNER, pancakes.id, bad)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }
    assert!(h.service.active_list(OWNER).await?.is_none());

    let err = h
        .service
        .add_recipe(OWNER, Uuid::new_v4(), 1.0)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_custom_items_never_merge() -> Result<()> {
    let h = harness();
    let pancakes = seed(&h, pancakes(OWNER)).await;
    let list = h.service.add_recipe(OWNER, pancakes.id, 1.0).await?.list;

    let extra_flour = h
        .service
        .add_custom_item(
            OWNER,
            CustomItemDraft::new(" Flour ", 1.0, IngredientUnit::Cup).with_aisle(Aisle::Baking),
        )
        .await?;
    assert_eq!(extra_flour.name, "Flour");

    let view = h.service.view(OWNER, list.id, None).await?;
    let recipe_flour = view.view.find("flour::cup").unwrap();
    assert!(close(recipe_flour.item.total_quantity, 2.0));
    let custom = view.view.find(&extra_flour.id.to_string()).unwrap();
    assert!(custom.item.is_custom);
    assert_eq!(custom.item.custom_item_id, Some(extra_flour.id));
    assert!(close(custom.item.total_quantity, 1.0));
    Ok(())
}

#[tokio::test]
async fn test_custom_item_update_and_removal_forgets_overrides() -> Result<()> {
    let h = harness();
    let chips = h
        .service
        .add_custom_item(OWNER, CustomItemDraft::new("Chips", 1.0, IngredientUnit::Unit))
        .await?;
    let list = h.service.active_list(OWNER).await?.unwrap();
    let key = chips.id.to_string();

    let patch = CustomItemPatch {
        quantity: Some(2.0),
        aisle: Some(Aisle::Other),
        ..CustomItemPatch::default()
    };
    let updated = h.service.update_custom_item(OWNER, chips.id, &patch).await?;
    assert!(close(updated.quantity, 2.0));

    assert!(h.service.toggle_checked(OWNER, list.id, &key).await?);
    let view = h.service.view(OWNER, list.id, None).await?;
    assert_eq!(view.summary.checked, 1);

    h.service.remove_custom_item(OWNER, chips.id).await?;
    assert!(h.repo.custom_items(OWNER, list.id).await?.is_empty());
    assert!(h.store.is_empty().await);

    let err = h
        .service
        .remove_custom_item(OWNER, chips.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_hide_and_restore_move_lines_without_changing_totals() -> Result<()> {
    let h = harness();
    let pancakes = seed(&h, pancakes(OWNER)).await;
    let list = h.service.add_recipe(OWNER, pancakes.id, 2.0).await?.list;

    let before = h.service.view(OWNER, list.id, None).await?;
    assert!(h.service.hide(OWNER, list.id, "salt::tsp").await?);
    assert!(h.service.hide(OWNER, list.id, "flour::cup").await?);

    let hidden = h.service.view(OWNER, list.id, None).await?;
    assert_eq!(hidden.summary.hidden, 2);
    assert_eq!(hidden.summary.visible, before.summary.visible - 2);
    assert!(!hidden.view.visible.contains_key(&Aisle::Spices));
    let salt = hidden.view.hidden.iter().find(|l| l.key == "salt::tsp").unwrap();
    assert!(close(salt.item.total_quantity, 1.0));

    assert!(h.service.restore(OWNER, list.id, "salt::tsp").await?);
    assert_eq!(h.service.restore_all(OWNER, list.id).await?, 1);

    let after = h.service.view(OWNER, list.id, None).await?;
    assert_eq!(after.view, before.view);
    Ok(())
}

#[tokio::test]
async fn test_overrides_require_list_ownership() -> Result<()> {
    let h = harness();
    let pancakes = seed(&h, public(pancakes(OWNER))).await;
    let list = h.service.add_recipe(OWNER, pancakes.id, 1.0).await?.list;

    let err = h
        .service
        .toggle_checked("mallory", list.id, "flour::cup")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let err = h.service.view("mallory", list.id, None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let err = h.service.hide(OWNER, list.id, "   ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    // The public recipe itself is fine to use on another owner's list
    let theirs = h.service.add_recipe("mallory", pancakes.id, 1.0).await?;
    assert_ne!(theirs.list.id, list.id);
    Ok(())
}

#[tokio::test]
async fn test_start_new_list_archives_and_discards_overrides() -> Result<()> {
    let h = harness();
    let pancakes = seed(&h, pancakes(OWNER)).await;
    let old = h.service.add_recipe(OWNER, pancakes.id, 1.0).await?.list;
    h.service.toggle_checked(OWNER, old.id, "flour::cup").await?;
    h.service.hide(OWNER, old.id, "salt::tsp").await?;

    let now = Utc.with_ymd_and_hms(2030, 1, 15, 12, 0, 0).unwrap();
    let fresh = h.service.start_new_list(OWNER, now).await?;
    assert_ne!(fresh.id, old.id);
    assert!(h.store.is_empty().await);

    let archived = h.service.archived_lists(OWNER).await?;
    assert_eq!(archived.len(), 1);
    assert!(archived[0].title.ends_with("Jan 15, 2030"));

    // History keeps its recipes but loses override state
    let history = h.service.view(OWNER, old.id, None).await?;
    assert_eq!(history.summary.checked, 0);
    assert_eq!(history.summary.hidden, 0);
    assert_eq!(history.summary.total, 4);

    let current = h.service.view(OWNER, fresh.id, None).await?;
    assert!(current.view.is_empty());

    let err = h
        .service
        .delete_archived_list(OWNER, fresh.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidState);
    h.service.delete_archived_list(OWNER, old.id).await?;
    assert!(h.service.archived_lists(OWNER).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_removing_recipe_and_clearing() -> Result<()> {
    let h = harness();
    let pancakes = seed(&h, pancakes(OWNER)).await;
    let omelette = seed(&h, omelette(OWNER)).await;
    let list = h.service.add_recipe(OWNER, pancakes.id, 1.0).await?.list;
    h.service.add_recipe(OWNER, omelette.id, 1.0).await?;

    assert!(h.service.remove_recipe(OWNER, omelette.id).await?);
    assert!(!h.service.remove_recipe(OWNER, omelette.id).await?);
    let view = h.service.view(OWNER, list.id, None).await?;
    let eggs = view.view.find("eggs::unit").unwrap();
    assert!(close(eggs.item.total_quantity, 2.0));

    h.service
        .add_custom_item(OWNER, CustomItemDraft::new("Chips", 1.0, IngredientUnit::Unit))
        .await?;
    assert_eq!(h.service.clear(OWNER).await?, 2);
    assert!(h.service.view(OWNER, list.id, None).await?.view.is_empty());
    Ok(())
}
