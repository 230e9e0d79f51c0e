//! Category hierarchy helpers.
//!
//! Categories form a tree via a nullable `parent_id` self-reference. Before
//! a re-parenting update is written, the new parent's ancestor chain must be
//! walked to prove the move does not introduce a cycle. The walk operates on
//! a plain id → parent map so it can be unit-tested without a database.

use std::collections::HashMap;

use crate::types::DbId;

/// Upper bound on ancestor-chain length during cycle checks.
///
/// Real catalogs are two or three levels deep; hitting this bound means the
/// stored hierarchy is already corrupt, and the move is rejected.
pub const MAX_TREE_DEPTH: usize = 32;

/// Check whether setting `new_parent_id` as the parent of `category_id`
/// would create a cycle.
///
/// Walks from `new_parent_id` up the parent chain. The move is a cycle when
/// the chain reaches `category_id` itself (self-parenting is the trivial
/// one-step case), and is treated as one when the chain exceeds
/// [`MAX_TREE_DEPTH`].
pub fn would_create_cycle(
    parents: &HashMap<DbId, Option<DbId>>,
    category_id: DbId,
    new_parent_id: DbId,
) -> bool {
    if new_parent_id == category_id {
        return true;
    }

    let mut current = new_parent_id;
    for _ in 0..MAX_TREE_DEPTH {
        match parents.get(&current) {
            Some(Some(parent)) => {
                if *parent == category_id {
                    return true;
                }
                current = *parent;
            }
            // Reached a root, or the parent id is unknown: no cycle.
            Some(None) | None => return false,
        }
    }

    // Chain longer than any sane hierarchy: refuse the move.
    true
}
