// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - JSON mesh documents

mod json;

pub use json::{parse_json, read_json, to_json, write_json, RawMesh};
