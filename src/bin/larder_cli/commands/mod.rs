// ABOUTME: Command modules for larder-cli
// ABOUTME: Snapshot reading and loading into the in-memory repository
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod snapshot;
