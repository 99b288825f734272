// SPDX-License-Identifier: MIT
//
// Layer registry: sole owner of every named layer.
//
// Everything outside the registry refers to layers by alias. Each layer
// remembers its parent alias, and the registry keeps a parent → children
// side table that cascading deletes and `is_parent` upkeep read from.
//
// Ordering: `sorted_aliases()` is ascending by z-order. Layers that share a
// z-order come out in insertion order today, but callers must not depend on
// that.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::layer::Layer;

/// Alias used for the screen-sized root frame during compositing.
pub const ROOT_ALIAS: &str = "";

#[derive(Debug, Default)]
pub struct Registry {
    layers: HashMap<String, Entry>,
    children: HashMap<String, BTreeSet<String>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Entry {
    layer: Layer,
    seq: u64,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Creation ────────────────────────────────────────────────────────

    /// Create a transparent layer and register it.
    ///
    /// Re-adding an existing alias replaces that layer; links to its
    /// children survive.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive, if `alias` is empty,
    /// if `parent` names a layer that does not exist, or if `parent` is
    /// `alias` itself or nested under it.
    #[allow(clippy::too_many_arguments)]
    pub fn add_layer(
        &mut self,
        alias: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        z_order: i32,
        parent: Option<&str>,
    ) -> &mut Layer {
        assert!(!alias.is_empty(), "layer alias must not be empty");
        let (Ok(w @ 1..), Ok(h @ 1..)) = (u16::try_from(width), u16::try_from(height)) else {
            panic!("layer '{alias}' has invalid size {width}x{height}");
        };
        if let Some(p) = parent {
            assert!(
                self.layers.contains_key(p),
                "cannot add layer '{alias}': parent layer '{p}' does not exist"
            );
            assert!(
                !self.ancestry(p).any(|a| a == alias),
                "cannot add layer '{alias}' under '{p}': it would become its own ancestor"
            );
        }

        // Replacing a layer that used to hang off a different parent.
        if let Some(old_parent) = self.get(alias).and_then(Layer::parent_alias).map(str::to_owned) {
            self.unlink_child(&old_parent, alias);
        }

        let mut layer = Layer::new(alias, w, h).at(x, y).with_z_order(z_order);
        layer.set_parent_alias(parent.map(str::to_owned));
        layer.set_is_parent(self.children.get(alias).is_some_and(|c| !c.is_empty()));

        if let Some(p) = parent {
            self.children.entry(p.to_owned()).or_default().insert(alias.to_owned());
            if let Some(entry) = self.layers.get_mut(p) {
                entry.layer.set_is_parent(true);
            }
        }

        debug!(alias, x, y, width, height, z_order, parent, "layer added");
        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = self.layers.entry(alias.to_owned()).insert_entry(Entry { layer, seq });
        &mut entry.into_mut().layer
    }

    // ─── Lookup ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&Layer> {
        self.layers.get(alias).map(|e| &e.layer)
    }

    pub fn get_mut(&mut self, alias: &str) -> Option<&mut Layer> {
        self.layers.get_mut(alias).map(|e| &mut e.layer)
    }

    /// The layer named `alias`.
    ///
    /// # Panics
    ///
    /// Panics if no such layer exists.
    #[must_use]
    pub fn layer(&self, alias: &str) -> &Layer {
        self.get(alias)
            .unwrap_or_else(|| panic!("layer '{alias}' does not exist"))
    }

    /// Mutable access to the layer named `alias`.
    ///
    /// # Panics
    ///
    /// Panics if no such layer exists.
    pub fn layer_mut(&mut self, alias: &str) -> &mut Layer {
        self.get_mut(alias)
            .unwrap_or_else(|| panic!("layer '{alias}' does not exist"))
    }

    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.layers.contains_key(alias)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Direct children of `alias`, in alias order.
    pub fn children(&self, alias: &str) -> impl Iterator<Item = &str> {
        self.children
            .get(alias)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Aliases ascending by z-order.
    #[must_use]
    pub fn sorted_aliases(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &Entry)> = self.layers.iter().collect();
        entries.sort_by_key(|(_, e)| (e.layer.z_order, e.seq));
        entries.into_iter().map(|(alias, _)| alias.clone()).collect()
    }

    /// Absolute screen position of a layer's (0, 0), found by adding up the
    /// offsets of its parent chain.
    ///
    /// # Panics
    ///
    /// Panics if no such layer exists.
    #[must_use]
    pub fn screen_origin(&self, alias: &str) -> (i32, i32) {
        let mut layer = self.layer(alias);
        let (mut x, mut y) = (layer.x, layer.y);
        while let Some(parent) = layer.parent_alias().and_then(|p| self.get(p)) {
            x += parent.x;
            y += parent.y;
            layer = parent;
        }
        (x, y)
    }

    /// `alias` followed by each of its ancestors, nearest first.
    fn ancestry<'a>(&'a self, alias: &'a str) -> impl Iterator<Item = &'a str> {
        std::iter::successors(Some(alias), |a| self.get(a).and_then(Layer::parent_alias))
    }

    // ─── Deletion ────────────────────────────────────────────────────────

    /// Remove a layer and, transitively, every layer nested under it.
    ///
    /// Unknown aliases are ignored. Returns how many layers were removed.
    pub fn delete_layer(&mut self, alias: &str) -> usize {
        let Some(entry) = self.layers.get(alias) else {
            return 0;
        };
        if let Some(parent) = entry.layer.parent_alias().map(str::to_owned) {
            self.unlink_child(&parent, alias);
        }

        let mut removed = 0;
        let mut pending = vec![alias.to_owned()];
        while let Some(next) = pending.pop() {
            if self.layers.remove(&next).is_some() {
                removed += 1;
            }
            if let Some(kids) = self.children.remove(&next) {
                pending.extend(kids);
            }
        }
        debug!(alias, removed, "layer deleted");
        removed
    }

    fn unlink_child(&mut self, parent: &str, child: &str) {
        let now_empty = self.children.get_mut(parent).is_some_and(|set| {
            set.remove(child);
            set.is_empty()
        });
        if now_empty {
            self.children.remove(parent);
            if let Some(entry) = self.layers.get_mut(parent) {
                entry.layer.set_is_parent(false);
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry_with_tree() -> Registry {
        // root ─┬─ a ── a1 ── a2
        //       └─ b
        let mut reg = Registry::new();
        reg.add_layer("root", 0, 0, 10, 10, 0, None);
        reg.add_layer("a", 1, 1, 5, 5, 1, Some("root"));
        reg.add_layer("a1", 1, 1, 3, 3, 1, Some("a"));
        reg.add_layer("a2", 0, 0, 1, 1, 1, Some("a1"));
        reg.add_layer("b", 2, 2, 2, 2, 2, Some("root"));
        reg
    }

    // ── add ─────────────────────────────────────────────────────────

    #[test]
    fn add_marks_parent() {
        let reg = registry_with_tree();
        assert!(reg.layer("root").is_parent());
        assert!(reg.layer("a").is_parent());
        assert!(!reg.layer("b").is_parent());
        assert_eq!(reg.layer("a1").parent_alias(), Some("a"));
        assert_eq!(reg.children("root").collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn add_returns_configured_layer() {
        let mut reg = Registry::new();
        let layer = reg.add_layer("w", -3, 4, 6, 2, 9, None);
        assert_eq!((layer.x, layer.y, layer.z_order), (-3, 4, 9));
        assert_eq!((layer.width(), layer.height()), (6, 2));
    }

    #[test]
    #[should_panic(expected = "parent layer 'nope' does not exist")]
    fn add_with_unknown_parent_panics() {
        Registry::new().add_layer("x", 0, 0, 1, 1, 0, Some("nope"));
    }

    #[test]
    #[should_panic(expected = "invalid size")]
    fn add_with_zero_height_panics() {
        Registry::new().add_layer("x", 0, 0, 1, 0, 0, None);
    }

    #[test]
    #[should_panic(expected = "invalid size")]
    fn add_with_negative_width_panics() {
        Registry::new().add_layer("x", 0, 0, -4, 2, 0, None);
    }

    #[test]
    fn re_adding_keeps_children() {
        let mut reg = registry_with_tree();
        reg.add_layer("a", 0, 0, 8, 8, 1, Some("root"));
        assert!(reg.layer("a").is_parent());
        assert_eq!(reg.layer("a").width(), 8);
    }

    #[test]
    fn re_adding_under_new_parent_unlinks_old() {
        let mut reg = registry_with_tree();
        reg.add_layer("b", 0, 0, 1, 1, 0, Some("a2"));
        assert!(reg.layer("a2").is_parent());
        assert_eq!(reg.children("root").collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    #[should_panic(expected = "cannot add layer 'a' under 'a'")]
    fn re_adding_as_own_parent_panics() {
        let mut reg = registry_with_tree();
        reg.add_layer("a", 0, 0, 1, 1, 0, Some("a"));
    }

    #[test]
    #[should_panic(expected = "cannot add layer 'a' under 'a2'")]
    fn re_adding_under_own_descendant_panics() {
        let mut reg = registry_with_tree();
        reg.add_layer("a", 0, 0, 1, 1, 0, Some("a2"));
    }

    #[test]
    fn re_adding_under_sibling_subtree_is_fine() {
        let mut reg = registry_with_tree();
        reg.add_layer("a", 0, 0, 1, 1, 0, Some("b"));
        assert_eq!(reg.screen_origin("a2"), (3, 3));
    }

    #[test]
    #[should_panic(expected = "layer 'ghost' does not exist")]
    fn layer_lookup_panics_when_missing() {
        let _ = Registry::new().layer("ghost");
    }

    // ── delete ──────────────────────────────────────────────────────

    #[test]
    fn delete_cascades_to_all_descendants() {
        let mut reg = registry_with_tree();
        assert_eq!(reg.delete_layer("a"), 3);
        assert_eq!(reg.len(), 2);
        assert!(!reg.contains("a1"));
        assert!(!reg.contains("a2"));
        assert!(reg.layer("root").is_parent()); // still has "b"
    }

    #[test]
    fn delete_last_child_clears_is_parent() {
        let mut reg = registry_with_tree();
        reg.delete_layer("a2");
        assert!(!reg.layer("a1").is_parent());
        assert_eq!(reg.children("a1").count(), 0);
    }

    #[test]
    fn delete_root_removes_everything() {
        let mut reg = registry_with_tree();
        assert_eq!(reg.delete_layer("root"), 5);
        assert!(reg.is_empty());
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut reg = registry_with_tree();
        assert_eq!(reg.delete_layer("nope"), 0);
        assert_eq!(reg.len(), 5);
    }

    #[test]
    fn re_added_alias_after_delete_has_no_stale_children() {
        let mut reg = registry_with_tree();
        reg.delete_layer("a");
        reg.add_layer("a", 0, 0, 1, 1, 0, None);
        assert!(!reg.layer("a").is_parent());
    }

    // ── ordering & geometry ─────────────────────────────────────────

    #[test]
    fn sorted_by_z_then_insertion() {
        let mut reg = Registry::new();
        reg.add_layer("top", 0, 0, 1, 1, 5, None);
        reg.add_layer("bottom", 0, 0, 1, 1, -1, None);
        reg.add_layer("mid1", 0, 0, 1, 1, 2, None);
        reg.add_layer("mid2", 0, 0, 1, 1, 2, None);
        assert_eq!(reg.sorted_aliases(), ["bottom", "mid1", "mid2", "top"]);
    }

    #[test]
    fn screen_origin_sums_parent_chain() {
        let reg = registry_with_tree();
        assert_eq!(reg.screen_origin("root"), (0, 0));
        assert_eq!(reg.screen_origin("a1"), (2, 2));
        assert_eq!(reg.screen_origin("a2"), (2, 2));
        assert_eq!(reg.screen_origin("b"), (2, 2));
    }
}
