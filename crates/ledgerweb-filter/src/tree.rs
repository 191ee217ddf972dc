//! Filter tree construction and editing
//!
//! All mutations are pure: they take the current tree by reference and
//! return a rebuilt tree, so callers can keep old snapshots. Every walk
//! visits each node exactly once, and the root group is never removed.

use ledgerweb_utils::generate_id;

use crate::types::{
    Conjunction, FilterCondition, FilterField, FilterGroup, FilterNode, FilterOperator,
    FilterValue, ROOT_GROUP_ID,
};

// ==================== Factories ====================

fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Create a new condition for a field, with the field's default operator and
/// a sensible default value
pub fn create_condition(field: FilterField) -> FilterCondition {
    let id = generate_id();
    match field {
        FilterField::Date => FilterCondition {
            id,
            field,
            operator: FilterOperator::IsOn,
            value: FilterValue::Text(today_iso()),
            value2: None,
        },
        FilterField::Amount => FilterCondition {
            id,
            field,
            operator: FilterOperator::Is,
            value: FilterValue::Number(0.0),
            value2: None,
        },
        FilterField::Narration | FilterField::Account | FilterField::Tag => FilterCondition {
            id,
            field,
            operator: FilterOperator::Contains,
            value: FilterValue::Text(String::new()),
            value2: None,
        },
    }
}

/// Create a new empty `and` group with a fresh id
pub fn create_group() -> FilterGroup {
    FilterGroup {
        id: generate_id(),
        conjunction: Conjunction::And,
        children: Vec::new(),
    }
}

/// Create the top-level group. Its id is fixed so tree edits can recognize
/// and protect it.
pub fn create_root() -> FilterGroup {
    FilterGroup {
        id: ROOT_GROUP_ID.to_string(),
        conjunction: Conjunction::And,
        children: Vec::new(),
    }
}

// ==================== Tree walking ====================

/// Rebuild the tree bottom-up, applying `f` to every node exactly once.
///
/// Group nodes are passed to `f` after their children have been rebuilt.
/// The returned tree shares nothing with the input along mutated paths.
pub fn transform_tree<F>(root: &FilterGroup, f: &F) -> FilterGroup
where
    F: Fn(FilterNode) -> FilterNode,
{
    match transform_node(&FilterNode::Group(root.clone()), f) {
        FilterNode::Group(group) => group,
        // a transform may not turn the root into a condition
        FilterNode::Condition(_) => root.clone(),
    }
}

fn transform_node<F>(node: &FilterNode, f: &F) -> FilterNode
where
    F: Fn(FilterNode) -> FilterNode,
{
    let rebuilt = match node {
        FilterNode::Condition(cond) => FilterNode::Condition(cond.clone()),
        FilterNode::Group(group) => FilterNode::Group(FilterGroup {
            id: group.id.clone(),
            conjunction: group.conjunction,
            children: group
                .children
                .iter()
                .map(|child| transform_node(child, f))
                .collect(),
        }),
    };
    f(rebuilt)
}

// ==================== Mutations ====================

/// Append a new condition to the group with the given id
pub fn add_condition(
    root: &FilterGroup,
    group_id: &str,
    field: Option<FilterField>,
) -> FilterGroup {
    transform_tree(root, &|node| match node {
        FilterNode::Group(mut group) if group.id == group_id => {
            group
                .children
                .push(FilterNode::Condition(create_condition(
                    field.unwrap_or(FilterField::Date),
                )));
            FilterNode::Group(group)
        }
        other => other,
    })
}

/// Append a new empty subgroup to the group with the given id
pub fn add_group(root: &FilterGroup, group_id: &str) -> FilterGroup {
    transform_tree(root, &|node| match node {
        FilterNode::Group(mut group) if group.id == group_id => {
            group.children.push(FilterNode::Group(create_group()));
            FilterNode::Group(group)
        }
        other => other,
    })
}

/// Remove the node with the given id. Removing the root (or an unknown id)
/// is a no-op.
pub fn remove_node(root: &FilterGroup, node_id: &str) -> FilterGroup {
    if node_id == root.id {
        return root.clone();
    }
    transform_tree(root, &|node| match node {
        FilterNode::Group(mut group) => {
            group.children.retain(|child| child.id() != node_id);
            FilterNode::Group(group)
        }
        other => other,
    })
}

/// Partial update applied by [`update_node`]. Groups take the conjunction;
/// conditions take operator/value/value2. Fields outside the node's kind are
/// ignored, so a patch can never corrupt the discriminant.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    pub conjunction: Option<Conjunction>,
    pub operator: Option<FilterOperator>,
    pub value: Option<FilterValue>,
    pub value2: Option<FilterValue>,
}

impl NodePatch {
    pub fn conjunction(conjunction: Conjunction) -> Self {
        NodePatch {
            conjunction: Some(conjunction),
            ..Default::default()
        }
    }

    pub fn operator(operator: FilterOperator) -> Self {
        NodePatch {
            operator: Some(operator),
            ..Default::default()
        }
    }

    pub fn value(value: FilterValue) -> Self {
        NodePatch {
            value: Some(value),
            ..Default::default()
        }
    }
}

/// Merge a patch into the node with the given id. Unknown ids are a no-op.
pub fn update_node(root: &FilterGroup, node_id: &str, patch: &NodePatch) -> FilterGroup {
    transform_tree(root, &|node| match node {
        FilterNode::Group(mut group) if group.id == node_id => {
            if let Some(conjunction) = patch.conjunction {
                group.conjunction = conjunction;
            }
            FilterNode::Group(group)
        }
        FilterNode::Condition(mut cond) if cond.id == node_id => {
            if let Some(operator) = patch.operator {
                cond.operator = operator;
            }
            if let Some(value) = &patch.value {
                cond.value = value.clone();
            }
            if let Some(value2) = &patch.value2 {
                cond.value2 = Some(value2.clone());
            }
            FilterNode::Condition(cond)
        }
        other => other,
    })
}

/// Switch a condition to a different field.
///
/// Operator sets are field-specific, so the whole condition is replaced with
/// the new field's defaults; only the id survives.
pub fn change_condition_field(
    root: &FilterGroup,
    node_id: &str,
    field: FilterField,
) -> FilterGroup {
    transform_tree(root, &|node| match node {
        FilterNode::Condition(cond) if cond.id == node_id => {
            let mut replacement = create_condition(field);
            replacement.id = cond.id;
            FilterNode::Condition(replacement)
        }
        other => other,
    })
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::valid_operators;

    #[test]
    fn test_create_condition_defaults() {
        let cond = create_condition(FilterField::Date);
        assert_eq!(cond.operator, FilterOperator::IsOn);
        assert!(matches!(&cond.value, FilterValue::Text(s) if s.len() == 10));

        let cond = create_condition(FilterField::Amount);
        assert_eq!(cond.operator, FilterOperator::Is);
        assert_eq!(cond.value, FilterValue::Number(0.0));

        for field in [FilterField::Narration, FilterField::Account, FilterField::Tag] {
            let cond = create_condition(field);
            assert_eq!(cond.operator, FilterOperator::Contains);
            assert_eq!(cond.value, FilterValue::Text(String::new()));
        }
    }

    #[test]
    fn test_default_operator_is_legal_for_its_field() {
        for field in [
            FilterField::Date,
            FilterField::Amount,
            FilterField::Narration,
            FilterField::Account,
            FilterField::Tag,
        ] {
            let cond = create_condition(field);
            assert!(valid_operators(field).contains(&cond.operator));
        }
    }

    #[test]
    fn test_add_condition_and_group() {
        let root = create_root();
        let root = add_condition(&root, ROOT_GROUP_ID, Some(FilterField::Amount));
        assert_eq!(root.children.len(), 1);

        let root = add_group(&root, ROOT_GROUP_ID);
        assert_eq!(root.children.len(), 2);

        // add a condition to the nested group
        let nested_id = root.children[1].id().to_string();
        let root = add_condition(&root, &nested_id, None);
        match &root.children[1] {
            FilterNode::Group(g) => {
                assert_eq!(g.children.len(), 1);
                match &g.children[0] {
                    FilterNode::Condition(c) => assert_eq!(c.field, FilterField::Date),
                    FilterNode::Group(_) => panic!("expected condition"),
                }
            }
            FilterNode::Condition(_) => panic!("expected group"),
        }
    }

    #[test]
    fn test_mutations_do_not_touch_the_input_tree() {
        let root = create_root();
        let root = add_condition(&root, ROOT_GROUP_ID, Some(FilterField::Narration));
        let before = root.clone();

        let _ = add_group(&root, ROOT_GROUP_ID);
        let _ = remove_node(&root, root.children[0].id());
        assert_eq!(root, before);
    }

    #[test]
    fn test_remove_node() {
        let root = create_root();
        let root = add_condition(&root, ROOT_GROUP_ID, Some(FilterField::Amount));
        let root = add_condition(&root, ROOT_GROUP_ID, Some(FilterField::Tag));
        let first_id = root.children[0].id().to_string();

        let root = remove_node(&root, &first_id);
        assert_eq!(root.children.len(), 1);
        match &root.children[0] {
            FilterNode::Condition(c) => assert_eq!(c.field, FilterField::Tag),
            FilterNode::Group(_) => panic!("expected condition"),
        }
    }

    #[test]
    fn test_remove_root_is_refused() {
        let root = create_root();
        let root = add_condition(&root, ROOT_GROUP_ID, None);
        let same = remove_node(&root, ROOT_GROUP_ID);
        assert_eq!(same, root);
    }

    #[test]
    fn test_remove_unknown_id_is_a_noop() {
        let root = create_root();
        let root = add_condition(&root, ROOT_GROUP_ID, None);
        let same = remove_node(&root, "no-such-node");
        assert_eq!(same, root);
    }

    #[test]
    fn test_update_condition() {
        let root = create_root();
        let root = add_condition(&root, ROOT_GROUP_ID, Some(FilterField::Amount));
        let cond_id = root.children[0].id().to_string();

        let root = update_node(
            &root,
            &cond_id,
            &NodePatch {
                operator: Some(FilterOperator::GreaterThan),
                value: Some(FilterValue::Number(100.0)),
                ..Default::default()
            },
        );
        match &root.children[0] {
            FilterNode::Condition(c) => {
                assert_eq!(c.id, cond_id);
                assert_eq!(c.field, FilterField::Amount);
                assert_eq!(c.operator, FilterOperator::GreaterThan);
                assert_eq!(c.value, FilterValue::Number(100.0));
            }
            FilterNode::Group(_) => panic!("expected condition"),
        }
    }

    #[test]
    fn test_update_group_conjunction() {
        let root = create_root();
        let root = add_group(&root, ROOT_GROUP_ID);
        let group_id = root.children[0].id().to_string();

        let root = update_node(&root, &group_id, &NodePatch::conjunction(Conjunction::Or));
        match &root.children[0] {
            FilterNode::Group(g) => assert_eq!(g.conjunction, Conjunction::Or),
            FilterNode::Condition(_) => panic!("expected group"),
        }

        // the root itself can be patched too
        let root = update_node(&root, ROOT_GROUP_ID, &NodePatch::conjunction(Conjunction::Or));
        assert_eq!(root.conjunction, Conjunction::Or);
    }

    #[test]
    fn test_patch_ignores_fields_of_the_wrong_kind() {
        let root = create_root();
        let root = add_condition(&root, ROOT_GROUP_ID, Some(FilterField::Tag));
        let cond_id = root.children[0].id().to_string();

        // a conjunction patch on a condition leaves it untouched
        let same = update_node(&root, &cond_id, &NodePatch::conjunction(Conjunction::Or));
        assert_eq!(same, root);
    }

    #[test]
    fn test_change_condition_field_preserves_id() {
        let root = create_root();
        let root = add_condition(&root, ROOT_GROUP_ID, Some(FilterField::Narration));
        let cond_id = root.children[0].id().to_string();

        let root = change_condition_field(&root, &cond_id, FilterField::Amount);
        match &root.children[0] {
            FilterNode::Condition(c) => {
                assert_eq!(c.id, cond_id);
                assert_eq!(c.field, FilterField::Amount);
                assert_eq!(c.operator, FilterOperator::Is);
                assert_eq!(c.value, FilterValue::Number(0.0));
            }
            FilterNode::Group(_) => panic!("expected condition"),
        }
    }

    #[test]
    fn test_deeply_nested_edit() {
        let root = create_root();
        let root = add_group(&root, ROOT_GROUP_ID);
        let outer = root.children[0].id().to_string();
        let root = add_group(&root, &outer);
        let inner = match &root.children[0] {
            FilterNode::Group(g) => g.children[0].id().to_string(),
            FilterNode::Condition(_) => panic!("expected group"),
        };

        let root = add_condition(&root, &inner, Some(FilterField::Account));
        let FilterNode::Group(outer_group) = &root.children[0] else {
            panic!("expected group");
        };
        let FilterNode::Group(inner_group) = &outer_group.children[0] else {
            panic!("expected group");
        };
        assert_eq!(inner_group.children.len(), 1);
    }
}
