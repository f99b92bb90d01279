//! The merged context seen by one render call.

use std::collections::BTreeSet;

use crate::types::{Context, Value};

/// A template's base context overlaid with one render call's overrides.
///
/// Lookups check the overrides first, so an override wins on collision. The
/// merge is a view over both contexts: nothing is copied, and the view is
/// dropped when the render call returns.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    base: &'a Context,
    overrides: &'a Context,
}

impl<'a> RenderContext<'a> {
    pub fn new(base: &'a Context, overrides: &'a Context) -> Self {
        Self { base, overrides }
    }

    /// Look up a name in the merged context.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.overrides.get(name).or_else(|| self.base.get(name))
    }

    /// Distinct names in the merged context, sorted.
    pub fn names(&self) -> BTreeSet<&'a str> {
        self.base.names().chain(self.overrides.names()).collect()
    }
}
