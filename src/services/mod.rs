// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - computations layered over backend rows.

pub mod activity_logs;
pub mod catalog;
pub mod investors;
pub mod media;
pub mod polls;
pub mod profitability;
pub mod roles;
pub mod settings;

pub use profitability::{ProfitabilityParams, ProfitabilityRequest};
pub use roles::RoleResolver;
