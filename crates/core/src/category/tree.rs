//! Grouped parent / child view of the category list.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use super::types::Category;

/// A top-level category with its direct children.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    /// The parent category.
    #[serde(flatten)]
    pub category: Category,
    /// Direct children, in input order.
    pub children: Vec<Category>,
}

/// The grouped tree.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTree {
    /// Top-level categories.
    pub parents: Vec<CategoryNode>,
    /// Children whose parent no longer exists.
    pub orphans: Vec<Category>,
}

/// Groups a flat category list into parents and children.
///
/// Input order is preserved within each group.
#[must_use]
pub fn build_tree(categories: Vec<Category>) -> CategoryTree {
    let ids: HashSet<Uuid> = categories.iter().map(|c| c.id).collect();

    let mut children: HashMap<Uuid, Vec<Category>> = HashMap::new();
    let mut roots = Vec::new();
    let mut orphans = Vec::new();

    for category in categories {
        match category.parent_id {
            None => roots.push(category),
            Some(parent) if ids.contains(&parent) => {
                children.entry(parent).or_default().push(category);
            }
            Some(_) => orphans.push(category),
        }
    }

    let parents = roots
        .into_iter()
        .map(|category| CategoryNode {
            children: children.remove(&category.id).unwrap_or_default(),
            category,
        })
        .collect();

    // Children of non-root parents are deeper than two levels; list them as orphans.
    orphans.extend(children.into_values().flatten());

    CategoryTree { parents, orphans }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryType;
    use chrono::Utc;

    fn category(name: &str, parent_id: Option<Uuid>) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category_type: CategoryType::Expense,
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_groups_children_under_parent() {
        let food = category("Food", None);
        let snacks = category("Snacks", Some(food.id));
        let drinks = category("Drinks", Some(food.id));
        let rent = category("Rent", None);

        let tree = build_tree(vec![food.clone(), snacks, rent, drinks]);

        assert_eq!(tree.parents.len(), 2);
        assert_eq!(tree.parents[0].category.name, "Food");
        let names: Vec<_> = tree.parents[0]
            .children
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Snacks", "Drinks"]);
        assert!(tree.parents[1].children.is_empty());
        assert!(tree.orphans.is_empty());
    }

    #[test]
    fn test_missing_parent_becomes_orphan() {
        let lost = category("Lost", Some(Uuid::new_v4()));
        let tree = build_tree(vec![lost]);

        assert!(tree.parents.is_empty());
        assert_eq!(tree.orphans.len(), 1);
    }

    #[test]
    fn test_node_serializes_flat() {
        let food = category("Food", None);
        let tree = build_tree(vec![food]);
        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json["parents"][0]["name"], "Food");
        assert_eq!(json["parents"][0]["type"], "expense");
        assert!(json["parents"][0]["children"].as_array().unwrap().is_empty());
    }
}
