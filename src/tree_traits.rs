//! termtree rendering of vampire trees.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{DomainError, DomainResult, VampireArena};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for VampireArena {
    /// One tree renders as itself; a forest hangs every tree under a `coven` label.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let mut trees: Vec<Tree<String>> = self
            .roots()
            .into_iter()
            .filter_map(|root| build_tree_representation(self, root).ok())
            .collect();

        match trees.len() {
            0 => Tree::new("Empty coven".to_string()),
            1 => trees.remove(0),
            _ => Tree::new("coven".to_string()).with_leaves(trees),
        }
    }
}

/// Render the subtree below `root`, labels as `name (year)`.
///
/// Post-order walk with an explicit stack: a node is assembled once all of
/// its offspring have been rendered onto `built`.
pub fn build_tree_representation(arena: &VampireArena, root: Index) -> DomainResult<Tree<String>> {
    let mut stack = vec![(root, false)];
    let mut built: Vec<Tree<String>> = Vec::new();

    while let Some((current_idx, expanded)) = stack.pop() {
        let node = arena
            .get(current_idx)
            .ok_or(DomainError::UnknownNode(current_idx))?;
        if expanded {
            let leaves = built.split_off(built.len() - node.offspring().len());
            built.push(Tree::new(node.data.to_string()).with_leaves(leaves));
        } else {
            stack.push((current_idx, true));
            for &child in node.offspring().iter().rev() {
                stack.push((child, false));
            }
        }
    }

    built.pop().ok_or(DomainError::UnknownNode(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_tree() {
        let mut arena = VampireArena::new();
        let ansel = arena.insert("Ansel", 1600);
        let rose = arena.insert("Rose", 1920);
        let andrew = arena.insert("Andrew", 1985);
        let sarah = arena.insert("Sarah", 1995);
        arena.add_offspring(ansel, rose).unwrap();
        arena.add_offspring(ansel, andrew).unwrap();
        arena.add_offspring(rose, sarah).unwrap();

        let expected = "Ansel (1600)
├── Rose (1920)
│   └── Sarah (1995)
└── Andrew (1985)\n";

        assert_eq!(arena.to_tree_string().to_string(), expected);
    }

    #[test]
    fn test_render_forest_and_empty() {
        let mut arena = VampireArena::new();
        assert_eq!(arena.to_tree_string().to_string(), "Empty coven\n");

        arena.insert("Ansel", 1600);
        arena.insert("Dracula", 1476);

        let expected = "coven
├── Ansel (1600)
└── Dracula (1476)\n";
        assert_eq!(arena.to_tree_string().to_string(), expected);
    }
}
