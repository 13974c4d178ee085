//! Parent/child hierarchy shared by stock locations and part categories.
//!
//! Both tables store nothing but a nullable `parent_id` per row. Everything
//! derived from it (ancestor chains, path strings, descendant sets, cycle
//! checks) is computed here on an in-memory index built from the
//! `(id, parent_id, name)` rows of one table.

use std::collections::{BTreeSet, HashMap, HashSet};

use thiserror::Error;

use crate::entities::{part_category, stock_location};

/// Separator between names in a path string.
pub const PATH_SEPARATOR: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Tree node {0} does not exist")]
    UnknownNode(i32),
    #[error("Node {0} cannot be its own parent")]
    SelfParent(i32),
    #[error("Cannot move node {node} below {parent}: {parent} is one of its descendants")]
    Cycle { node: i32, parent: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
}

impl From<&stock_location::Model> for TreeNode {
    fn from(location: &stock_location::Model) -> Self {
        Self {
            id: location.id,
            parent_id: location.parent_id,
            name: location.name.clone(),
        }
    }
}

impl From<&part_category::Model> for TreeNode {
    fn from(category: &part_category::Model) -> Self {
        Self {
            id: category.id,
            parent_id: category.parent_id,
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    nodes: HashMap<i32, TreeNode>,
    children: HashMap<i32, Vec<i32>>,
}

impl TreeIndex {
    pub fn new<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = TreeNode>,
    {
        let mut index = Self::default();
        for node in nodes {
            index.nodes.insert(node.id, node);
        }
        index.rebuild_children();
        index
    }

    pub fn from_models<'a, M>(models: &'a [M]) -> Self
    where
        &'a M: Into<TreeNode>,
    {
        Self::new(models.iter().map(Into::into))
    }

    fn rebuild_children(&mut self) {
        self.children.clear();
        for node in self.nodes.values() {
            if let Some(parent) = node.parent_id {
                self.children.entry(parent).or_default().push(node.id);
            }
        }
        for kids in self.children.values_mut() {
            kids.sort_unstable();
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: i32) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    fn node(&self, id: i32) -> Result<&TreeNode, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::UnknownNode(id))
    }

    /// Top level nodes, sorted by id.
    pub fn roots(&self) -> Vec<i32> {
        let mut roots: Vec<i32> = self
            .nodes
            .values()
            .filter(|n| n.parent_id.map_or(true, |p| !self.nodes.contains_key(&p)))
            .map(|n| n.id)
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Ancestor ids of `id`, root first, not including `id` itself.
    pub fn parents(&self, id: i32) -> Result<Vec<i32>, TreeError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = self.node(id)?.parent_id;

        while let Some(parent) = current {
            // Stored data should never loop, but a corrupt row must not hang us.
            if !seen.insert(parent) {
                break;
            }
            match self.nodes.get(&parent) {
                Some(node) => {
                    chain.push(parent);
                    current = node.parent_id;
                }
                None => break,
            }
        }

        chain.reverse();
        Ok(chain)
    }

    /// Names from the root down to `id` joined with `/`, e.g. `Office/Drawer_3`.
    pub fn pathstring(&self, id: i32) -> Result<String, TreeError> {
        let mut names: Vec<&str> = self
            .parents(id)?
            .into_iter()
            .filter_map(|p| self.nodes.get(&p).map(|n| n.name.as_str()))
            .collect();
        names.push(self.node(id)?.name.as_str());
        Ok(names.join(PATH_SEPARATOR))
    }

    /// Direct children of `id`, sorted by id.
    pub fn children(&self, id: i32) -> &[i32] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_children(&self, id: i32) -> bool {
        !self.children(id).is_empty()
    }

    /// `id` together with every node below it.
    pub fn unique_children(&self, id: i32) -> Result<BTreeSet<i32>, TreeError> {
        self.node(id)?;

        let mut unique = BTreeSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if unique.insert(current) {
                stack.extend_from_slice(self.children(current));
            }
        }
        Ok(unique)
    }

    /// Depth of `id` below its root; roots are at depth 0.
    pub fn depth(&self, id: i32) -> Result<usize, TreeError> {
        Ok(self.parents(id)?.len())
    }

    /// Checks that `id` may hang below `parent` without creating a loop.
    pub fn check_parent(&self, id: i32, parent: Option<i32>) -> Result<(), TreeError> {
        self.node(id)?;
        let Some(parent) = parent else {
            return Ok(());
        };
        if parent == id {
            return Err(TreeError::SelfParent(id));
        }
        self.node(parent)?;
        if self.unique_children(id)?.contains(&parent) {
            return Err(TreeError::Cycle { node: id, parent });
        }
        Ok(())
    }

    /// Moves `id` below `parent` after checking for loops.
    pub fn set_parent(&mut self, id: i32, parent: Option<i32>) -> Result<(), TreeError> {
        self.check_parent(id, parent)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent_id = parent;
        }
        self.rebuild_children();
        Ok(())
    }

    /// Removes `id`, handing its children to its parent. Returns that parent.
    pub fn remove(&mut self, id: i32) -> Result<Option<i32>, TreeError> {
        let removed = self.nodes.remove(&id).ok_or(TreeError::UnknownNode(id))?;
        for node in self.nodes.values_mut() {
            if node.parent_id == Some(id) {
                node.parent_id = removed.parent_id;
            }
        }
        self.rebuild_children();
        Ok(removed.parent_id)
    }

    /// Depth-first listing of the whole tree as `(depth, id)` pairs.
    pub fn walk(&self) -> Vec<(usize, i32)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, i32)> = self.roots().into_iter().rev().map(|r| (0, r)).collect();
        let mut seen = HashSet::new();
        while let Some((depth, id)) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            out.push((depth, id));
            for child in self.children(id).iter().rev() {
                stack.push((depth + 1, *child));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn node(id: i32, parent_id: Option<i32>, name: &str) -> TreeNode {
        TreeNode {
            id,
            parent_id,
            name: name.to_string(),
        }
    }

    fn house() -> TreeIndex {
        TreeIndex::new([
            node(1, None, "Home"),
            node(2, Some(1), "Bathroom"),
            node(3, Some(1), "Dining Room"),
            node(4, None, "Office"),
            node(5, Some(4), "Drawer_1"),
            node(6, Some(4), "Drawer_2"),
            node(7, Some(4), "Drawer_3"),
        ])
    }

    #[test]
    fn pathstring_follows_ancestors() {
        let tree = house();
        assert_eq!(tree.pathstring(7).unwrap(), "Office/Drawer_3");
        assert_eq!(tree.pathstring(4).unwrap(), "Office");
    }

    #[test]
    fn reparenting_updates_pathstring() {
        let mut tree = house();
        tree.set_parent(7, Some(1)).unwrap();
        assert_eq!(tree.pathstring(7).unwrap(), "Home/Drawer_3");
        assert!(!tree.children(4).contains(&7));
        assert!(tree.children(1).contains(&7));
    }

    #[test]
    fn unique_children_includes_self() {
        let tree = house();
        let kids = tree.unique_children(4).unwrap();
        assert_eq!(kids.into_iter().collect::<Vec<_>>(), vec![4, 5, 6, 7]);
        assert!(tree.has_children(4));
        assert!(!tree.has_children(6));
    }

    #[test]
    fn rejects_loops() {
        let mut tree = house();
        tree.set_parent(5, Some(2)).unwrap();
        assert_matches!(tree.check_parent(1, Some(5)), Err(TreeError::Cycle { node: 1, parent: 5 }));
        assert_matches!(tree.check_parent(1, Some(1)), Err(TreeError::SelfParent(1)));
        assert_matches!(tree.check_parent(1, Some(99)), Err(TreeError::UnknownNode(99)));
    }

    #[test]
    fn remove_hands_children_to_parent() {
        let mut tree = house();
        tree.set_parent(5, Some(7)).unwrap();
        assert_eq!(tree.remove(7).unwrap(), Some(4));
        assert_eq!(tree.pathstring(5).unwrap(), "Office/Drawer_1");
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn walk_is_depth_first() {
        let tree = house();
        let order: Vec<i32> = tree.walk().into_iter().map(|(_, id)| id).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    fn arbitrary_tree() -> impl Strategy<Value = TreeIndex> {
        // Node i may only point at a lower id, which keeps the input acyclic.
        prop::collection::vec(any::<prop::sample::Index>(), 1..40).prop_map(|picks| {
            let nodes = picks.iter().enumerate().map(|(i, pick)| {
                let id = i as i32 + 1;
                let parent = if i == 0 || pick.index(3) == 0 {
                    None
                } else {
                    Some(pick.index(i) as i32 + 1)
                };
                node(id, parent, &format!("n{}", id))
            });
            TreeIndex::new(nodes.collect::<Vec<_>>())
        })
    }

    proptest! {
        #[test]
        fn pathstring_has_one_segment_per_level(tree in arbitrary_tree()) {
            for (depth, id) in tree.walk() {
                let path = tree.pathstring(id).unwrap();
                prop_assert_eq!(path.split(PATH_SEPARATOR).count(), depth + 1);
                prop_assert_eq!(tree.depth(id).unwrap(), depth);
            }
        }

        #[test]
        fn no_node_can_adopt_an_ancestor(tree in arbitrary_tree()) {
            for (_, id) in tree.walk() {
                for ancestor in tree.parents(id).unwrap() {
                    prop_assert!(tree.check_parent(ancestor, Some(id)).is_err());
                }
            }
        }

        #[test]
        fn walk_visits_every_node_once(tree in arbitrary_tree()) {
            let visited = tree.walk();
            prop_assert_eq!(visited.len(), tree.len());
        }
    }
}
