pub mod args;
pub mod display;

use std::io::Write;

use args::{
    Cli, Commands, DepCommands, HistoryCommands, ItemCommands, ItemPropertyCommands, ListCommands,
    ListPropertyCommands, StatsCommands, TagCommands,
};
use todoit::{ItemStatus, Manager, Result};

/// Reads a y/N confirmation from stdin. Destructive commands skip this
/// entirely when invoked with `--force`.
fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_table(table: comfy_table::Table) {
    println!("{table}");
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => eprintln!("failed to render JSON: {err}"),
    }
}

pub async fn dispatch(cli: Cli, manager: &Manager) -> Result<()> {
    match cli.command {
        Commands::List { command } => dispatch_list(command, manager, cli.json).await,
        Commands::Item { command } => dispatch_item(command, manager, cli.json).await,
        Commands::Dep { command } => dispatch_dep(command, manager, cli.json).await,
        Commands::Tag { command } => dispatch_tag(command, manager, cli.json).await,
        Commands::History { command } => dispatch_history(command, manager, cli.json).await,
        Commands::Stats { command } => dispatch_stats(command, manager, cli.json).await,
    }
}

async fn dispatch_list(command: ListCommands, manager: &Manager, json: bool) -> Result<()> {
    match command {
        ListCommands::Create { key, title, items, tags } => {
            let items = if items.is_empty() { None } else { Some(items) };
            let tags = if tags.is_empty() { None } else { Some(tags) };
            let list = manager.create_list(&key, &title, items, tags).await?;
            if json {
                print_json(&display::ListView::from(&list));
            } else {
                print_table(display::list_detail_table(&list));
            }
        }
        ListCommands::Show { key } => {
            let list = manager.get_list(&key).await?;
            if json {
                print_json(&display::ListView::from(&list));
            } else {
                print_table(display::list_detail_table(&list));
            }
        }
        ListCommands::All { tags, include_archived } => {
            let filter = if tags.is_empty() { None } else { Some(tags.as_slice()) };
            let lists = manager.list_all(filter, include_archived).await?;
            if json {
                let views: Vec<_> = lists.iter().map(display::ListView::from).collect();
                print_json(&views);
            } else {
                print_table(display::list_table(&lists));
            }
        }
        ListCommands::Rename { key, new_title } => {
            let list = manager.rename_list(&key, &new_title).await?;
            print_table(display::list_detail_table(&list));
        }
        ListCommands::Archive { key, force } => {
            let list = manager.archive_list(&key, force).await?;
            print_table(display::list_detail_table(&list));
        }
        ListCommands::Unarchive { key } => {
            let list = manager.unarchive_list(&key).await?;
            print_table(display::list_detail_table(&list));
        }
        ListCommands::Delete { key, force } => {
            if !force && !confirm(&format!("Delete list '{key}' and everything under it?")) {
                println!("aborted");
                return Ok(());
            }
            manager.delete_list(&key).await?;
            println!("deleted list '{key}'");
        }
        ListCommands::Property { command } => dispatch_list_property(command, manager, json).await?,
    }
    Ok(())
}

async fn dispatch_list_property(command: ListPropertyCommands, manager: &Manager, json: bool) -> Result<()> {
    match command {
        ListPropertyCommands::Get { list, key } => {
            let value = manager.get_list_property(&list, &key).await?;
            println!("{}", value.unwrap_or_default());
        }
        ListPropertyCommands::Set { list, key, value } => {
            manager.set_list_property(&list, &key, &value).await?;
            println!("set {key}={value} on list '{list}'");
        }
        ListPropertyCommands::Delete { list, key } => {
            manager.delete_list_property(&list, &key).await?;
            println!("deleted property '{key}' from list '{list}'");
        }
        ListPropertyCommands::All { list } => {
            let rows = manager.get_list_properties(&list).await?;
            if json {
                print_json(&rows);
            } else {
                print_table(display::property_table(&rows));
            }
        }
    }
    Ok(())
}

async fn dispatch_item(command: ItemCommands, manager: &Manager, json: bool) -> Result<()> {
    match command {
        ItemCommands::Add { list, key, content, position } => {
            let item = manager.add_item(&list, &key, &content, position).await?;
            print_item(&item, json);
        }
        ItemCommands::AddSub { list, parent_key, key, content, position } => {
            let item = manager.add_subitem(&list, &parent_key, &key, &content, position).await?;
            print_item(&item, json);
        }
        ItemCommands::Show { list, key, parent } => {
            let item = manager.get_item(&list, &key, parent.as_deref()).await?;
            print_item(&item, json);
        }
        ItemCommands::Subitems { list, parent_key } => {
            let items = manager.get_subitems(&list, &parent_key).await?;
            print_items(&items, json);
        }
        ItemCommands::Hierarchy { list, root_key } => {
            let hierarchy = manager.get_item_hierarchy(&list, &root_key).await?;
            if json {
                print_json(&display::ItemHierarchyView::from(&hierarchy));
            } else {
                for line in display::hierarchy_lines(&hierarchy) {
                    println!("{line}");
                }
            }
        }
        ItemCommands::List { list, status, limit } => {
            let status = status.map(ItemStatus::from);
            let items = manager.get_list_items(&list, status, limit).await?;
            print_items(&items, json);
        }
        ItemCommands::Status { list, key, status, parent, states } => {
            let states = if states.is_empty() { None } else { Some(states.into_iter().collect()) };
            let item = manager
                .update_item_status(&list, &key, status.into(), states, parent.as_deref())
                .await?;
            print_item(&item, json);
        }
        ItemCommands::Content { list, key, content, parent } => {
            let item = manager.update_item_content(&list, &key, &content, parent.as_deref()).await?;
            print_item(&item, json);
        }
        ItemCommands::Rename { list, key, new_key, parent } => {
            let item = manager.rename_item(&list, &key, &new_key, parent.as_deref()).await?;
            print_item(&item, json);
        }
        ItemCommands::ClearStates { list, key, parent } => {
            let item = manager.clear_item_completion_states(&list, &key, parent.as_deref()).await?;
            print_item(&item, json);
        }
        ItemCommands::Move { list, key, new_parent_key } => {
            let item = manager.move_to_subitem(&list, &key, &new_parent_key).await?;
            print_item(&item, json);
        }
        ItemCommands::Delete { list, key, parent, force } => {
            if !force && !confirm(&format!("Delete item '{key}' and its subtree?")) {
                println!("aborted");
                return Ok(());
            }
            manager.delete_item(&list, &key, parent.as_deref()).await?;
            println!("deleted item '{key}'");
        }
        ItemCommands::Next { list } => {
            let item = manager.get_next_pending(&list).await?;
            print_optional_item(item, json);
        }
        ItemCommands::NextSmart { list } => {
            let item = manager.get_next_pending_smart(&list).await?;
            print_optional_item(item, json);
        }
        ItemCommands::Property { command } => dispatch_item_property(command, manager, json).await?,
    }
    Ok(())
}

async fn dispatch_item_property(command: ItemPropertyCommands, manager: &Manager, json: bool) -> Result<()> {
    match command {
        ItemPropertyCommands::Get { list, key, prop_key, parent } => {
            let value = manager.get_item_property(&list, &key, &prop_key, parent.as_deref()).await?;
            println!("{}", value.unwrap_or_default());
        }
        ItemPropertyCommands::Set { list, key, prop_key, value, parent } => {
            manager.set_item_property(&list, &key, &prop_key, &value, parent.as_deref()).await?;
            println!("set {prop_key}={value} on item '{key}'");
        }
        ItemPropertyCommands::Delete { list, key, prop_key, parent } => {
            manager.delete_item_property(&list, &key, &prop_key, parent.as_deref()).await?;
            println!("deleted property '{prop_key}' from item '{key}'");
        }
        ItemPropertyCommands::All { list, key, parent } => {
            let rows = manager.get_item_properties(&list, &key, parent.as_deref()).await?;
            if json {
                print_json(&rows);
            } else {
                print_table(display::property_table(&rows));
            }
        }
        ItemPropertyCommands::AllItems { list, status, limit } => {
            let status = status.map(ItemStatus::from);
            let rows = manager.get_all_items_properties(&list, status, limit).await?;
            if json {
                print_json(&rows);
            } else {
                print_table(display::all_items_properties_table(&rows));
            }
        }
    }
    Ok(())
}

async fn dispatch_dep(command: DepCommands, manager: &Manager, json: bool) -> Result<()> {
    match command {
        DepCommands::Add { dep_list, dep_key, req_list, req_key } => {
            manager.add_item_dependency(&dep_list, &dep_key, &req_list, &req_key).await?;
            println!("'{dep_key}' now requires '{req_key}'");
        }
        DepCommands::Remove { dep_list, dep_key, req_list, req_key } => {
            manager.remove_item_dependency(&dep_list, &dep_key, &req_list, &req_key).await?;
            println!("'{dep_key}' no longer requires '{req_key}'");
        }
        DepCommands::Show { list, key } => {
            let blockers = manager.get_item_blockers(&list, &key).await?;
            let blocked = manager.get_items_blocked_by(&list, &key).await?;
            if json {
                print_json(&serde_json::json!({
                    "blockers": blockers.iter().map(display::ItemView::from).collect::<Vec<_>>(),
                    "blocks": blocked.iter().map(display::ItemView::from).collect::<Vec<_>>(),
                }));
            } else {
                println!("blocked by:");
                print_table(display::item_table(&blockers));
                println!("blocks:");
                print_table(display::item_table(&blocked));
            }
        }
        DepCommands::Graph { list } => {
            let items = manager.get_list_items(&list, None, None).await?;
            let mut edges = Vec::new();
            for item in &items {
                for blocker in manager.get_item_blockers(&list, item.item_key.as_str()).await? {
                    edges.push(todoit::Dependency {
                        dependent_item_id: item.id,
                        required_item_id: blocker.id,
                    });
                }
            }
            print_table(display::dependency_table(&edges));
        }
        DepCommands::CanStart { list, key } => {
            println!("{}", manager.can_start_item(&list, &key).await?);
        }
        DepCommands::CanComplete { list, key } => {
            println!("{}", manager.can_complete_item(&list, &key).await?);
        }
    }
    Ok(())
}

async fn dispatch_tag(command: TagCommands, manager: &Manager, json: bool) -> Result<()> {
    match command {
        TagCommands::Create { name, color } => {
            let tag = manager.create_tag(&name, color.as_deref()).await?;
            println!("created tag '{}'", tag.name.as_str());
        }
        TagCommands::Add { list, name } => {
            manager.add_tag_to_list(&list, &name).await?;
            println!("tagged list '{list}' with '{name}'");
        }
        TagCommands::Remove { list, name } => {
            manager.remove_tag_from_list(&list, &name).await?;
            println!("untagged list '{list}' from '{name}'");
        }
        TagCommands::ForList { list } => {
            let tags = manager.get_tags_for_list(&list).await?;
            print_tags(&tags, json);
        }
        TagCommands::All => {
            let tags = manager.list_tags().await?;
            print_tags(&tags, json);
        }
    }
    Ok(())
}

async fn dispatch_history(command: HistoryCommands, manager: &Manager, json: bool) -> Result<()> {
    match command {
        HistoryCommands::Item { list, key, parent } => {
            let entries = manager.get_item_history(&list, &key, parent.as_deref()).await?;
            print_history(&entries, json);
        }
        HistoryCommands::List { list } => {
            let entries = manager.get_list_history(&list).await?;
            print_history(&entries, json);
        }
    }
    Ok(())
}

async fn dispatch_stats(command: StatsCommands, manager: &Manager, json: bool) -> Result<()> {
    match command {
        StatsCommands::Progress { list } => {
            let items = manager.get_list_items(&list, None, None).await?;
            let mut pending = 0;
            let mut in_progress = 0;
            let mut completed = 0;
            let mut failed = 0;
            for item in &items {
                match item.status {
                    ItemStatus::Pending => pending += 1,
                    ItemStatus::InProgress => in_progress += 1,
                    ItemStatus::Completed => completed += 1,
                    ItemStatus::Failed => failed += 1,
                }
            }
            if json {
                print_json(&serde_json::json!({
                    "total": items.len(),
                    "pending": pending,
                    "in_progress": in_progress,
                    "completed": completed,
                    "failed": failed,
                }));
            } else {
                println!(
                    "{} items: {pending} pending, {in_progress} in progress, {completed} completed, {failed} failed",
                    items.len()
                );
            }
        }
        StatsCommands::Next { list } => {
            let item = manager.get_next_pending_smart(&list).await?;
            print_optional_item(item, json);
        }
    }
    Ok(())
}

fn print_item(item: &todoit::Item, json: bool) {
    if json {
        print_json(&display::ItemView::from(item));
    } else {
        print_table(display::item_detail_table(item));
    }
}

fn print_items(items: &[todoit::Item], json: bool) {
    if json {
        let views: Vec<_> = items.iter().map(display::ItemView::from).collect();
        print_json(&views);
    } else {
        print_table(display::item_table(items));
    }
}

fn print_optional_item(item: Option<todoit::Item>, json: bool) {
    match item {
        Some(item) => print_item(&item, json),
        None => println!("nothing pending"),
    }
}

fn print_tags(tags: &[todoit::Tag], json: bool) {
    if json {
        #[derive(serde::Serialize)]
        struct TagView {
            name: String,
            color: String,
        }
        let views: Vec<_> = tags
            .iter()
            .map(|tag| TagView { name: tag.name.as_str().to_string(), color: tag.color.clone() })
            .collect();
        print_json(&views);
    } else {
        print_table(display::tag_table(tags));
    }
}

fn print_history(entries: &[todoit::HistoryEntry], json: bool) {
    if json {
        #[derive(serde::Serialize)]
        struct HistoryView {
            timestamp: String,
            action: String,
            old_value: Option<String>,
            new_value: Option<String>,
            actor: Option<String>,
        }
        let views: Vec<_> = entries
            .iter()
            .map(|entry| HistoryView {
                timestamp: entry.timestamp.to_string(),
                action: entry.action.as_str().to_string(),
                old_value: entry.old_value.clone(),
                new_value: entry.new_value.clone(),
                actor: entry.actor.clone(),
            })
            .collect();
        print_json(&views);
    } else {
        print_table(display::history_table(entries));
    }
}
