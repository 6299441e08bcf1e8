// ABOUTME: Helper modules for larder-cli
// ABOUTME: Text rendering of grocery list views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod display;
