// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod analytics;

pub use analytics::{find_personal_record, one_rep_max, summarize, PersonalRecord};
