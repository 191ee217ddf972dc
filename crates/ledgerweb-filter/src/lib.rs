//! Structured filtering over ledger transactions
//!
//! A filter is a tree of groups and conditions ([`FilterGroup`] /
//! [`FilterCondition`]) evaluated against transactions produced by
//! `ledgerweb-parser`. Evaluation is pure and never fails; tree edits are
//! pure rebuilds.

pub mod engine;
pub mod tree;
pub mod types;

pub use engine::{evaluate_node, filter_transactions};
pub use tree::{
    add_condition, add_group, change_condition_field, create_condition, create_group,
    create_root, remove_node, update_node, NodePatch,
};
pub use types::{
    valid_operators, Conjunction, FilterCondition, FilterField, FilterGroup, FilterNode,
    FilterOperator, FilterValue, ROOT_GROUP_ID,
};
