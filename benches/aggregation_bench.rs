// ABOUTME: Criterion benchmarks for grocery list aggregation and override application
// ABOUTME: Measures merge cost across list sizes and strategies, plus override toggles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Criterion benchmarks for the aggregation engine.
//!
//! Lists are built from synthetic recipes that share a pool of ingredient
//! names, so most lines merge and the grouping map stays busy.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use larder::overrides::{InMemoryOverrideStore, OverrideLayer, OverrideState};
use larder_core::models::{Aisle, CustomItemDraft, Ingredient, IngredientUnit, Recipe};
use larder_grocery::{Aggregator, MergeStrategy};
use tokio::runtime::Runtime;
use uuid::Uuid;

const NAMES: [&str; 16] = [
    "Flour", "Sugar", "Butter", "Eggs", "Milk", "Salt", "Onion", "Garlic", "Olive Oil", "Rice",
    "Tomato", "Basil", "Chicken", "Pepper", "Lemon", "Yogurt",
];

const UNITS: [IngredientUnit; 6] = [
    IngredientUnit::Cup,
    IngredientUnit::Tbsp,
    IngredientUnit::Tsp,
    IngredientUnit::G,
    IngredientUnit::Unit,
    IngredientUnit::Ml,
];

fn synthetic_recipes(count: usize) -> Vec<Recipe> {
    (0..count)
        .map(|r| {
            let ingredients = (0..12)
                .map(|i| {
                    let seed = r * 7 + i;
                    Ingredient::new(NAMES[seed % NAMES.len()], 1.5, UNITS[seed % UNITS.len()])
                        .with_aisle(Aisle::ALL[seed % Aisle::ALL.len()])
                })
                .collect();
            Recipe::new("bench", format!("Recipe {r}")).with_ingredients(ingredients)
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let custom: Vec<_> = (0..5)
        .map(|i| {
            CustomItemDraft::new(format!("Extra {i}"), 1.0, IngredientUnit::Unit)
                .into_item()
                .unwrap()
        })
        .collect();

    for count in [10_usize, 100, 500] {
        let recipes = synthetic_recipes(count);
        let entries: Vec<(&Recipe, f64)> = recipes.iter().map(|r| (r, 2.0)).collect();
        group.throughput(Throughput::Elements((count * 12) as u64));

        for strategy in [MergeStrategy::ExactUnit, MergeStrategy::UnitFamily] {
            let aggregator = Aggregator::new().with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), count),
                &entries,
                |b, entries| {
                    b.iter(|| aggregator.aggregate(black_box(entries), black_box(&custom)));
                },
            );
        }
    }

    group.finish();
}

fn bench_apply_overrides(c: &mut Criterion) {
    let recipes = synthetic_recipes(100);
    let entries: Vec<(&Recipe, f64)> = recipes.iter().map(|r| (r, 1.0)).collect();
    let list = Aggregator::new().aggregate(&entries, &[]).unwrap();

    let mut state = OverrideState::default();
    for (i, line) in list.lines().enumerate() {
        match i % 3 {
            0 => {
                state.toggle_checked(&line.key);
            }
            1 => {
                state.hide(&line.key);
            }
            _ => {}
        }
    }

    c.bench_function("apply_overrides_100_recipes", |b| {
        b.iter(|| black_box(&state).apply(black_box(&list)));
    });
}

fn bench_override_toggle(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let layer = OverrideLayer::new(Arc::new(InMemoryOverrideStore::default()));
    let list_id = Uuid::new_v4();

    c.bench_function("override_toggle_memory", |b| {
        b.iter(|| {
            rt.block_on(async {
                layer
                    .toggle_checked(black_box(list_id), "flour::cup")
                    .await
                    .unwrap()
            })
        });
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_apply_overrides,
    bench_override_toggle
);
criterion_main!(benches);
