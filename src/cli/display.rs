use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use serde::Serialize;

use todoit::{Dependency, HistoryEntry, Item, ItemHierarchy, List, Tag};

fn base_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(headers.into_iter().map(|h| Cell::new(h).add_attribute(Attribute::Bold)));
    table
}

pub fn list_table(lists: &[List]) -> Table {
    let mut table = base_table(vec!["Key", "Title", "Status", "Updated"]);
    for list in lists {
        table.add_row(vec![
            list.list_key.as_str().to_string(),
            list.title.clone(),
            list.status.as_str().to_string(),
            list.updated_at.to_string(),
        ]);
    }
    table
}

pub fn list_detail_table(list: &List) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.add_row(vec!["Key", list.list_key.as_str()]);
    table.add_row(vec!["Title", &list.title]);
    table.add_row(vec!["Status", list.status.as_str()]);
    table.add_row(vec!["Created", &list.created_at.to_string()]);
    table.add_row(vec!["Updated", &list.updated_at.to_string()]);
    table
}

pub fn item_table(items: &[Item]) -> Table {
    let mut table = base_table(vec!["Key", "Content", "Status", "Position", "Root?"]);
    for item in items {
        table.add_row(vec![
            item.item_key.as_str().to_string(),
            item.content.clone(),
            item.status.as_str().to_string(),
            item.position.to_string(),
            if item.is_root() { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

pub fn item_detail_table(item: &Item) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.add_row(vec!["Key", item.item_key.as_str()]);
    table.add_row(vec!["Content", &item.content]);
    table.add_row(vec!["Status", item.status.as_str()]);
    table.add_row(vec!["Position", &item.position.to_string()]);
    table.add_row(vec![
        "Completion states",
        &item
            .completion_states
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    ]);
    table.add_row(vec!["Started", &item.started_at.map(|t| t.to_string()).unwrap_or_default()]);
    table.add_row(vec!["Completed", &item.completed_at.map(|t| t.to_string()).unwrap_or_default()]);
    table
}

pub fn hierarchy_lines(hierarchy: &ItemHierarchy) -> Vec<String> {
    let mut lines = Vec::new();
    render_hierarchy(hierarchy, 0, &mut lines);
    lines
}

fn render_hierarchy(node: &ItemHierarchy, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    lines.push(format!(
        "{indent}- [{}] {} ({})",
        node.item.item_key.as_str(),
        node.item.content,
        node.item.status.as_str()
    ));
    for child in &node.children {
        render_hierarchy(child, depth + 1, lines);
    }
}

pub fn tag_table(tags: &[Tag]) -> Table {
    let mut table = base_table(vec!["Name", "Color"]);
    for tag in tags {
        table.add_row(vec![tag.name.as_str().to_string(), tag.color.clone()]);
    }
    table
}

pub fn property_table(rows: &[(String, String)]) -> Table {
    let mut table = base_table(vec!["Key", "Value"]);
    for (key, value) in rows {
        table.add_row(vec![key.clone(), value.clone()]);
    }
    table
}

pub fn all_items_properties_table(rows: &[(String, String, String, String)]) -> Table {
    let mut table = base_table(vec!["Item", "Property", "Value", "Status"]);
    for (item_key, key, value, status) in rows {
        table.add_row(vec![item_key.clone(), key.clone(), value.clone(), status.clone()]);
    }
    table
}

pub fn history_table(entries: &[HistoryEntry]) -> Table {
    let mut table = base_table(vec!["Timestamp", "Action", "Old", "New", "Actor"]);
    for entry in entries {
        table.add_row(vec![
            entry.timestamp.to_string(),
            entry.action.as_str().to_string(),
            entry.old_value.clone().unwrap_or_default(),
            entry.new_value.clone().unwrap_or_default(),
            entry.actor.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn dependency_table(edges: &[Dependency]) -> Table {
    let mut table = base_table(vec!["Dependent item id", "Required item id"]);
    for edge in edges {
        table.add_row(vec![edge.dependent_item_id.to_string(), edge.required_item_id.to_string()]);
    }
    table
}

/// Serializable projections of domain types for `--json` output. Kept
/// separate from the domain types themselves, which derive no `serde`
/// impls: value objects validate on construction and have no use for
/// round-tripping through an untrusted format.
#[derive(Serialize)]
pub struct ListView {
    pub key: String,
    pub title: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&List> for ListView {
    fn from(list: &List) -> Self {
        Self {
            key: list.list_key.as_str().to_string(),
            title: list.title.clone(),
            status: list.status.as_str().to_string(),
            created_at: list.created_at.to_string(),
            updated_at: list.updated_at.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ItemView {
    pub key: String,
    pub content: String,
    pub status: String,
    pub position: i32,
    pub is_root: bool,
    pub completion_states: std::collections::HashMap<String, bool>,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            key: item.item_key.as_str().to_string(),
            content: item.content.clone(),
            status: item.status.as_str().to_string(),
            position: item.position,
            is_root: item.is_root(),
            completion_states: item.completion_states.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct ItemHierarchyView {
    pub item: ItemView,
    pub children: Vec<ItemHierarchyView>,
}

impl From<&ItemHierarchy> for ItemHierarchyView {
    fn from(node: &ItemHierarchy) -> Self {
        Self {
            item: ItemView::from(&node.item),
            children: node.children.iter().map(ItemHierarchyView::from).collect(),
        }
    }
}
