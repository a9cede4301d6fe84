//! Arena-based vampire tree: node storage, links and every lineage query.

use std::collections::{HashSet, VecDeque};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::VampireData;
use crate::domain::error::{DomainError, DomainResult};

/// Year after which a vampire counts as a millennial.
pub const MILLENNIAL_YEAR: i32 = 1980;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct VampireNode {
    /// Name and conversion year of this vampire
    pub data: VampireData,
    /// Index of the creator in the arena, None for an original vampire
    creator: Option<Index>,
    /// Indices of offspring in the arena, in the order they were added
    offspring: Vec<Index>,
}

impl VampireNode {
    fn new(data: VampireData) -> Self {
        Self {
            data,
            creator: None,
            offspring: Vec::new(),
        }
    }

    pub fn creator(&self) -> Option<Index> {
        self.creator
    }

    pub fn offspring(&self) -> &[Index] {
        &self.offspring
    }

    pub fn is_original(&self) -> bool {
        self.creator.is_none()
    }
}

/// Arena holding one or more vampire trees.
///
/// Nodes are owned by the arena and addressed by generational indices, so the
/// creator back-link never takes part in ownership. Links are only written by
/// [`VampireArena::add_offspring`]; there is no removal.
#[derive(Debug)]
pub struct VampireArena {
    arena: Arena<VampireNode>,
}

impl Default for VampireArena {
    fn default() -> Self {
        Self::new()
    }
}

impl VampireArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Inserts an isolated vampire: no creator, no offspring.
    #[instrument(level = "trace", skip(self, name))]
    pub fn insert(&mut self, name: impl Into<String>, converted_year: i32) -> Index {
        self.arena
            .insert(VampireNode::new(VampireData::new(name, converted_year)))
    }

    /// Links `child` under `parent`, setting both directions in one step.
    ///
    /// Both handles are resolved before anything is written, so an unknown
    /// handle leaves the arena untouched. No cycle or duplicate-creator check
    /// is done here; see [`VampireArena::validate`].
    #[instrument(level = "debug", skip(self))]
    pub fn add_offspring(&mut self, parent: Index, child: Index) -> DomainResult<()> {
        if !self.arena.contains(parent) {
            return Err(DomainError::UnknownNode(parent));
        }
        let child_node = self
            .arena
            .get_mut(child)
            .ok_or(DomainError::UnknownNode(child))?;
        child_node.creator = Some(parent);

        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.offspring.push(child);
        }
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, idx: Index) -> Option<&VampireNode> {
        self.arena.get(idx)
    }

    /// Mutable access to a node's payload. Links stay read-only.
    #[instrument(level = "trace", skip(self))]
    pub fn data_mut(&mut self, idx: Index) -> Option<&mut VampireData> {
        self.arena.get_mut(idx).map(|node| &mut node.data)
    }

    fn node(&self, idx: Index) -> DomainResult<&VampireNode> {
        self.arena.get(idx).ok_or(DomainError::UnknownNode(idx))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Index, &VampireNode)> {
        self.arena.iter()
    }

    /// Original vampires (nodes without a creator), in insertion order.
    #[instrument(level = "trace", skip(self))]
    pub fn roots(&self) -> Vec<Index> {
        self.arena
            .iter()
            .filter(|(_, node)| node.is_original())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn creator(&self, idx: Index) -> DomainResult<Option<Index>> {
        Ok(self.node(idx)?.creator)
    }

    pub fn offspring(&self, idx: Index) -> DomainResult<&[Index]> {
        Ok(self.node(idx)?.offspring())
    }

    /// Number of vampires directly created by this vampire.
    #[instrument(level = "debug", skip(self))]
    pub fn number_of_offspring(&self, idx: Index) -> DomainResult<usize> {
        Ok(self.node(idx)?.offspring.len())
    }

    /// Number of creator links between this vampire and its original vampire.
    #[instrument(level = "debug", skip(self))]
    pub fn depth_from_root(&self, idx: Index) -> DomainResult<usize> {
        let mut depth = 0;
        let mut current = self.node(idx)?;
        while let Some(creator_idx) = current.creator {
            current = self.node(creator_idx)?;
            depth += 1;
        }
        Ok(depth)
    }

    /// True if `a` is strictly closer to its original vampire than `b`.
    ///
    /// Compares depths only; the two vampires need not share an ancestor.
    #[instrument(level = "debug", skip(self))]
    pub fn is_more_senior_than(&self, a: Index, b: Index) -> DomainResult<bool> {
        Ok(self.depth_from_root(a)? < self.depth_from_root(b)?)
    }

    /// Path from the original vampire down to `idx`, both inclusive.
    #[instrument(level = "debug", skip(self))]
    pub fn lineage(&self, idx: Index) -> DomainResult<Vec<Index>> {
        let mut lineage = Vec::new();
        let mut current = Some(idx);
        while let Some(current_idx) = current {
            let node = self.node(current_idx)?;
            lineage.push(current_idx);
            current = node.creator;
        }
        lineage.reverse();
        Ok(lineage)
    }

    /// Deepest vampire present in the lineage of both `a` and `b`.
    ///
    /// Lineages from a shared root agree on a contiguous prefix, so the walk
    /// stops at the first divergence. Vampires from different trees have no
    /// shared prefix and yield [`DomainError::NoCommonAncestor`].
    #[instrument(level = "debug", skip(self))]
    pub fn closest_common_ancestor(&self, a: Index, b: Index) -> DomainResult<Index> {
        let a_lineage = self.lineage(a)?;
        let b_lineage = self.lineage(b)?;

        a_lineage
            .iter()
            .zip(b_lineage.iter())
            .take_while(|(x, y)| x == y)
            .map(|(x, _)| *x)
            .last()
            .ok_or(DomainError::NoCommonAncestor)
    }

    /// First vampire named `name` in pre-order below (and including) `root`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_name(&self, root: Index, name: &str) -> DomainResult<Option<Index>> {
        Ok(self
            .iter_preorder(root)?
            .find(|(_, node)| node.data.name == name)
            .map(|(idx, _)| idx))
    }

    /// Name lookup across every tree, roots searched in insertion order.
    #[instrument(level = "debug", skip(self))]
    pub fn find_in_forest(&self, name: &str) -> Option<Index> {
        self.roots()
            .into_iter()
            .find_map(|root| self.find_by_name(root, name).ok().flatten())
    }

    /// Size of the subtree below `idx`, not counting `idx` itself.
    #[instrument(level = "debug", skip(self))]
    pub fn total_descendant_count(&self, idx: Index) -> DomainResult<usize> {
        Ok(self.iter_preorder(idx)?.count() - 1)
    }

    /// Every vampire of the subtree (root included) converted strictly after
    /// `threshold`, in breadth-first order.
    #[instrument(level = "debug", skip(self))]
    pub fn filter_by_year_after(&self, root: Index, threshold: i32) -> DomainResult<Vec<Index>> {
        Ok(self
            .iter_level_order(root)?
            .filter(|(_, node)| node.data.converted_year > threshold)
            .map(|(idx, _)| idx)
            .collect())
    }

    /// Vampires of the subtree converted after [`MILLENNIAL_YEAR`].
    pub fn millennials(&self, root: Index) -> DomainResult<Vec<Index>> {
        self.filter_by_year_after(root, MILLENNIAL_YEAR)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_preorder(&self, root: Index) -> DomainResult<PreOrderIterator<'_>> {
        self.node(root)?;
        Ok(PreOrderIterator::new(self, root))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_level_order(&self, root: Index) -> DomainResult<LevelOrderIterator<'_>> {
        self.node(root)?;
        Ok(LevelOrderIterator::new(self, root))
    }

    /// Checks the structural invariants the queries rely on.
    ///
    /// Every vampire may appear in at most one offspring list, and that list
    /// must belong to its creator. No creator chain may revisit a vampire.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> DomainResult<()> {
        let mut listed = HashSet::new();
        for (idx, node) in self.arena.iter() {
            for &child_idx in &node.offspring {
                let child = self.node(child_idx)?;
                if !listed.insert(child_idx) || child.creator != Some(idx) {
                    return Err(DomainError::MultipleCreators(child.data.name.clone()));
                }
            }
        }

        let mut acyclic: HashSet<Index> = HashSet::new();
        for (start, _) in self.arena.iter() {
            let mut chain = HashSet::new();
            let mut current = Some(start);
            while let Some(current_idx) = current {
                if acyclic.contains(&current_idx) {
                    break;
                }
                let node = self.node(current_idx)?;
                if !chain.insert(current_idx) {
                    return Err(DomainError::CycleDetected(node.data.name.clone()));
                }
                current = node.creator;
            }
            acyclic.extend(chain);
        }
        Ok(())
    }
}

/// Depth-first, pre-order walk driven by an explicit stack.
pub struct PreOrderIterator<'a> {
    arena: &'a VampireArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a VampireArena, root: Index) -> Self {
        Self {
            arena,
            stack: vec![root],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a VampireNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.arena.get(current_idx) {
                // Push offspring in reverse order for left-to-right traversal
                self.stack.extend(node.offspring.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Breadth-first (level order) walk driven by an explicit queue.
pub struct LevelOrderIterator<'a> {
    arena: &'a VampireArena,
    queue: VecDeque<Index>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(arena: &'a VampireArena, root: Index) -> Self {
        Self {
            arena,
            queue: VecDeque::from([root]),
        }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = (Index, &'a VampireNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.arena.arena.get(current_idx) {
                self.queue.extend(node.offspring.iter());
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_offspring_with_unknown_parent_leaves_child_untouched() {
        let mut other = VampireArena::new();
        other.insert("Stranger", 1700);
        other.insert("Filler", 1701);
        let foreign = other.insert("Foreign", 1702);

        let mut arena = VampireArena::new();
        let child = arena.insert("Child", 1900);

        let result = arena.add_offspring(foreign, child);

        assert_eq!(result, Err(DomainError::UnknownNode(foreign)));
        assert_eq!(arena.creator(child).unwrap(), None);
    }

    #[test]
    fn test_validate_detects_child_listed_twice() {
        let mut arena = VampireArena::new();
        let a = arena.insert("A", 1600);
        let b = arena.insert("B", 1700);
        let c = arena.insert("C", 1800);
        arena.add_offspring(a, c).unwrap();
        arena.add_offspring(b, c).unwrap();

        assert_eq!(
            arena.validate(),
            Err(DomainError::MultipleCreators("C".to_string()))
        );
    }

    #[test]
    fn test_validate_detects_cycle() {
        let mut arena = VampireArena::new();
        let a = arena.insert("A", 1600);
        let b = arena.insert("B", 1700);
        arena.add_offspring(a, b).unwrap();
        arena.add_offspring(b, a).unwrap();

        assert!(matches!(
            arena.validate(),
            Err(DomainError::CycleDetected(_))
        ));
    }

    #[test]
    fn test_validate_accepts_forest() {
        let mut arena = VampireArena::new();
        let a = arena.insert("A", 1600);
        let b = arena.insert("B", 1700);
        let c = arena.insert("C", 1800);
        let _lonely = arena.insert("Lonely", 1900);
        arena.add_offspring(a, b).unwrap();
        arena.add_offspring(b, c).unwrap();

        assert_eq!(arena.validate(), Ok(()));
        assert_eq!(arena.roots().len(), 2);
    }
}
