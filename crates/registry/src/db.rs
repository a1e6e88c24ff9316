//! Process-wide registries used by the host.
//!
//! Both are populated and frozen once at startup, before the first query.

use std::sync::LazyLock;

use crate::registry::Registry;

/// Which classes and members of the scripting surface each profile exposes.
pub static SCRIPT_SURFACE: LazyLock<Registry> = LazyLock::new(|| Registry::new("script_surface"));

/// Default computed value and enumerability of each style attribute per profile.
pub static STYLE_DEFAULTS: LazyLock<Registry> = LazyLock::new(|| Registry::new("style_defaults"));
