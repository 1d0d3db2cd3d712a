//! One-shot subcommands that run against the store without the TUI.

use std::io::Write;

use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};

use crate::application::dto::{AddWidgetRequest, EditWidgetRequest};
use crate::application::services::DashboardStore;
use crate::application::use_cases::{AddWidgetUseCase, EditWidgetUseCase, RemoveWidgetUseCase};
use crate::domain::entities::{Category, CategoryId, WidgetEntry, WidgetId};
use crate::domain::errors::DashboardError;
use crate::domain::search::found_label;
use crate::infrastructure::config::Command;

use super::ui::widget_count_label;

/// Runs `command`, printing results to `out` and notices to `err`.
///
/// Unknown IDs are reported on `err` and are not a failure.
///
/// # Errors
/// Returns error on invalid input, storage failure, or when writing output fails.
pub async fn run(
    command: Command,
    store: &mut DashboardStore,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::List { category, json } => list(store, category.as_deref(), json, out, err),
        Command::Search { term, json } => search(store, &term, json, out),
        Command::Add {
            category,
            name,
            text,
        } => {
            let request = AddWidgetRequest::new(Some(CategoryId::from(category)), name, text);
            let result = AddWidgetUseCase::new(store).execute(request).await;
            report(result, "Added", out, err)
        }
        Command::Edit {
            category,
            widget,
            name,
            text,
        } => {
            let mut request = EditWidgetRequest::new(category.into(), widget.into());
            request.name = name;
            request.text = text;
            let result = EditWidgetUseCase::new(store).execute(request).await;
            report(result, "Updated", out, err)
        }
        Command::Remove { category, widget } => {
            let result = RemoveWidgetUseCase::new(store)
                .execute(CategoryId::from(category), WidgetId::from(widget))
                .await;
            report(result, "Removed", out, err)
        }
    }
}

fn list(
    store: &DashboardStore,
    category: Option<&str>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let categories: Vec<&Category> = store
        .categories()
        .iter()
        .filter(|c| category.is_none_or(|id| c.id().as_str() == id))
        .collect();

    if let Some(id) = category
        && categories.is_empty()
    {
        warn!(category = id, "Unknown category requested");
        writeln!(err, "category {id} not found")?;
        return Ok(());
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &categories)
            .wrap_err("failed to encode categories")?;
        writeln!(out)?;
        return Ok(());
    }

    for category in categories {
        writeln!(
            out,
            "{} [{}] · {}",
            category.name(),
            category.id(),
            widget_count_label(category.widget_count())
        )?;
        for widget in category.widgets() {
            writeln!(out, "  {:<16} {}: {}", widget.id(), widget.name(), widget.text())?;
        }
    }
    writeln!(out, "Total: {}", widget_count_label(store.total_widgets()))?;
    Ok(())
}

fn search(store: &DashboardStore, term: &str, json: bool, out: &mut dyn Write) -> Result<()> {
    let entries: Vec<WidgetEntry> = store.filtered_widgets(term);

    if json {
        serde_json::to_writer_pretty(&mut *out, &entries).wrap_err("failed to encode results")?;
        writeln!(out)?;
        return Ok(());
    }

    for entry in &entries {
        writeln!(
            out,
            "[{}] {} ({}): {}",
            entry.category_name,
            entry.widget.name(),
            entry.widget.id(),
            entry.widget.text()
        )?;
    }
    writeln!(out, "{}", found_label(entries.len()))?;
    Ok(())
}

fn report(
    result: Result<WidgetId, DashboardError>,
    verb: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    match result {
        Ok(id) => {
            info!(widget = %id, "{verb} widget from command line");
            writeln!(out, "{verb} {id}")?;
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            writeln!(err, "warning: {e}; nothing changed")?;
            Ok(())
        }
        Err(e) => Err(e).wrap_err("change was not applied"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStorage;
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    struct Output {
        out: Vec<u8>,
        err: Vec<u8>,
    }

    async fn run_command(store: &mut DashboardStore, command: Command) -> (Result<()>, Output) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(command, store, &mut out, &mut err).await;
        (result, Output { out, err })
    }

    async fn store() -> (DashboardStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (DashboardStore::open(Arc::new(storage.clone())).await, storage)
    }

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[tokio::test]
    async fn test_list_groups_by_category() {
        let (mut store, _) = store().await;

        let (result, output) = run_command(
            &mut store,
            Command::List {
                category: None,
                json: false,
            },
        )
        .await;

        assert_ok!(result);
        let out = text(&output.out);
        assert!(out.contains("CSPM Executive Dashboard [cspm] · 2 widgets"));
        assert!(out.contains("w5"));
        assert!(out.ends_with("Total: 6 widgets\n"));
    }

    #[tokio::test]
    async fn test_list_unknown_category_warns() {
        let (mut store, _) = store().await;

        let (result, output) = run_command(
            &mut store,
            Command::List {
                category: Some("nope".into()),
                json: false,
            },
        )
        .await;

        assert_ok!(result);
        assert!(output.out.is_empty());
        assert_eq!(text(&output.err), "category nope not found\n");
    }

    #[tokio::test]
    async fn test_search_json() {
        let (mut store, _) = store().await;

        let (result, output) = run_command(
            &mut store,
            Command::Search {
                term: "IMAGE".into(),
                json: true,
            },
        )
        .await;

        assert_ok!(result);
        let value: serde_json::Value = serde_json::from_slice(&output.out).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["categoryId"], "registry");
        assert_eq!(entries[0]["name"], "Image Risk Assessment");
    }

    #[tokio::test]
    async fn test_search_text_reports_count() {
        let (mut store, _) = store().await;

        let (_, output) = run_command(
            &mut store,
            Command::Search {
                term: "graph".into(),
                json: false,
            },
        )
        .await;

        assert!(text(&output.out).ends_with("Found 2 widgets\n"));
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        let (mut store, storage) = store().await;

        let (result, output) = run_command(
            &mut store,
            Command::Add {
                category: "cwpp".into(),
                name: "Runtime".into(),
                text: "3 alerts".into(),
            },
        )
        .await;
        assert_ok!(result);
        let added = text(&output.out);
        let id = added.trim().strip_prefix("Added ").unwrap().to_string();

        let (result, output) = run_command(
            &mut store,
            Command::Remove {
                category: "cwpp".into(),
                widget: id.clone(),
            },
        )
        .await;
        assert_ok!(result);

        assert_eq!(text(&output.out), format!("Removed {id}\n"));
        assert_eq!(store.total_widgets(), 6);
        assert_eq!(storage.write_count(), 2);
    }

    #[tokio::test]
    async fn test_add_validation_error_fails() {
        let (mut store, storage) = store().await;

        let (result, _) = run_command(
            &mut store,
            Command::Add {
                category: "cwpp".into(),
                name: "  ".into(),
                text: "x".into(),
            },
        )
        .await;

        assert_err!(result);
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_widget_is_a_warning() {
        let (mut store, storage) = store().await;

        let (result, output) = run_command(
            &mut store,
            Command::Remove {
                category: "cspm".into(),
                widget: "w99".into(),
            },
        )
        .await;

        assert_ok!(result);
        assert!(text(&output.err).starts_with("warning: widget w99 not found in category cspm"));
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_without_fields_fails() {
        let (mut store, _) = store().await;

        let (result, _) = run_command(
            &mut store,
            Command::Edit {
                category: "cspm".into(),
                widget: "w1".into(),
                name: None,
                text: None,
            },
        )
        .await;

        assert_err!(result);
    }
}
