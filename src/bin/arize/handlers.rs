//! command handlers
//!
//! each handler maps parsed arguments onto one façade call and hands the
//! result to [`crate::output`].

use crate::cli::{
    Cli, Command, ConfigAction, DashboardsAction, ListArgs, ModelsAction, MonitorArgs,
    MonitorsAction, TracesAction, WindowArgs,
};
use crate::output::{emit_one, emit_rows, emit_value};
use anyhow::{Context, Result};
use arize::profile::{Profile, ProfileStore};
use arize::types::Monitor;
use arize::{Client, SpanQuery};
use chrono::{Duration, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

const MODEL_COLUMNS: &[&str] = &["id", "name", "modelType", "createdAt"];
const DASHBOARD_COLUMNS: &[&str] = &["id", "name", "status", "createdAt"];
const MONITOR_COLUMNS: &[&str] = &["id", "name", "monitorCategory", "status", "threshold"];
const SPAN_COLUMNS: &[&str] = &[
    "spanId",
    "traceId",
    "name",
    "spanKind",
    "statusCode",
    "startTime",
    "latencyMs",
];

/// spans printed by `traces list` without `--count` or `--all`
const DEFAULT_SPAN_LIMIT: usize = 100;
const DEFAULT_WINDOW_DAYS: i64 = 7;

pub async fn run(cli: Cli) -> Result<()> {
    let Cli {
        profile,
        config,
        json,
        command,
        ..
    } = cli;
    let path = ProfileStore::resolve_path(config.as_deref())?;
    let profile = profile.as_deref();

    match command {
        Command::Config(action) => config_command(action, &path, profile, json),
        Command::Models(action) => models(&connect(&path, profile).await?, action, json).await,
        Command::Dashboards(action) => {
            dashboards(&connect(&path, profile).await?, action, json).await
        }
        Command::Monitors(action) => monitors(&connect(&path, profile).await?, action, json).await,
        Command::Traces(action) => traces(&connect(&path, profile).await?, action, json).await,
        Command::Query {
            document,
            variables,
        } => query(&connect(&path, profile).await?, &document, variables.as_deref()).await,
    }
}

async fn connect(path: &Path, profile: Option<&str>) -> Result<Client> {
    let store = ProfileStore::load(path)?;
    let selected = store.select(profile)?;
    tracing::debug!(
        profile = store.selected_name(profile),
        organization = %selected.organization,
        space = %selected.space,
        "connecting"
    );
    Ok(Client::connect(selected.to_config()).await?)
}

/// profile as shown by `config list` and `config show`
#[derive(Serialize)]
struct ProfileView<'a> {
    name: &'a str,
    default: bool,
    api_key: String,
    organization: &'a str,
    space: &'a str,
    base_url: Option<&'a str>,
}

impl<'a> ProfileView<'a> {
    fn new(name: &'a str, profile: &'a Profile, store: &ProfileStore) -> Self {
        Self {
            name,
            default: store.default_profile.as_deref() == Some(name),
            api_key: profile.redacted_api_key(),
            organization: &profile.organization,
            space: &profile.space,
            base_url: profile.base_url.as_deref(),
        }
    }
}

fn config_command(
    action: ConfigAction,
    path: &Path,
    selected: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut store = ProfileStore::load(path)?;
    match action {
        ConfigAction::Init {
            name,
            api_key,
            organization,
            space,
            base_url,
            default,
        } => {
            let mut profile = Profile::new(api_key, organization, space);
            profile.base_url = base_url;
            profile.to_config().validate()?;
            store.upsert(name.as_str(), profile);
            if default {
                store.set_default(&name)?;
            }
            store.save(path)?;
            eprintln!("saved profile '{name}' to {}", path.display());
            Ok(())
        }
        ConfigAction::List => {
            let views: Vec<ProfileView<'_>> = store
                .profiles
                .iter()
                .map(|(name, profile)| ProfileView::new(name, profile, &store))
                .collect();
            emit_rows(
                &views,
                &["name", "default", "organization", "space"],
                &ListArgs::default(),
                json,
            )
        }
        ConfigAction::Show { name } => {
            let name = name.as_deref().unwrap_or(store.selected_name(selected));
            let profile = store
                .get(name)
                .with_context(|| format!("profile '{name}' not found in {}", path.display()))?;
            emit_one(&ProfileView::new(name, profile, &store), json)
        }
        ConfigAction::Use { name } => {
            store.set_default(&name)?;
            store.save(path)?;
            eprintln!("default profile is now '{name}'");
            Ok(())
        }
    }
}

async fn models(client: &Client, action: ModelsAction, json: bool) -> Result<()> {
    match action {
        ModelsAction::List(list) => {
            let models = client.list_models(list.limit(None)).await?;
            emit_rows(&models, MODEL_COLUMNS, &list, json)
        }
        ModelsAction::Get(model) => emit_one(&client.get_model(&model.to_ref()?).await?, json),
        ModelsAction::Delete(model) => {
            let deleted = client.delete_model(&model.to_ref()?).await?;
            emit_value("deleted", Value::Bool(deleted), json)
        }
    }
}

async fn dashboards(client: &Client, action: DashboardsAction, json: bool) -> Result<()> {
    match action {
        DashboardsAction::List(list) => {
            let dashboards = client.list_dashboards(list.limit(None)).await?;
            emit_rows(&dashboards, DASHBOARD_COLUMNS, &list, json)
        }
        DashboardsAction::Get(dashboard) => {
            emit_one(&client.get_dashboard(&dashboard.to_ref()?).await?, json)
        }
        DashboardsAction::Create { name } => {
            let id = client.create_dashboard(&name).await?;
            let url = client.dashboard_url(&id);
            emit_one(&json!({ "id": id, "url": url }), json)
        }
        DashboardsAction::CreateVolume { name, models } => {
            let subset = (!models.is_empty()).then_some(models.as_slice());
            let url = client.create_model_volume_dashboard(&name, subset).await?;
            emit_value("url", Value::String(url), json)
        }
        DashboardsAction::Delete(dashboard) => {
            let deleted = client.delete_dashboard(&dashboard.to_ref()?).await?;
            emit_value("deleted", Value::Bool(deleted), json)
        }
    }
}

async fn monitors(client: &Client, action: MonitorsAction, json: bool) -> Result<()> {
    match action {
        MonitorsAction::List { model, list } => {
            let monitors = client
                .list_monitors(&model.to_ref()?, list.limit(None))
                .await?;
            emit_rows(&monitors, MONITOR_COLUMNS, &list, json)
        }
        MonitorsAction::Get(args) => emit_one(&find_monitor(client, &args).await?, json),
        MonitorsAction::Delete(args) => {
            let deleted = match (&args.id, &args.name) {
                (Some(id), _) => client.delete_monitor_by_id(id).await?,
                (None, Some(name)) => client.delete_monitor(&args.model.to_ref()?, name).await?,
                (None, None) => anyhow::bail!("pass --id or --name"),
            };
            emit_value("deleted", Value::Bool(deleted), json)
        }
    }
}

async fn find_monitor(client: &Client, args: &MonitorArgs) -> Result<Monitor> {
    match (&args.id, &args.name) {
        (Some(id), _) => Ok(client.get_monitor_by_id(id).await?),
        (None, Some(name)) => Ok(client.get_monitor(&args.model.to_ref()?, name).await?),
        (None, None) => anyhow::bail!("pass --id or --name"),
    }
}

async fn traces(client: &Client, action: TracesAction, json: bool) -> Result<()> {
    match action {
        TracesAction::List {
            model,
            window,
            list,
            sort,
            root_only,
        } => {
            let query = window_query(&window)
                .with_limit(list.limit(Some(DEFAULT_SPAN_LIMIT)))
                .with_sort(sort)
                .with_root_spans_only(root_only);
            let collected = client.list_spans(&model.to_ref()?, &query).await?;
            emit_rows(&collected.items, SPAN_COLUMNS, &list, json)?;
            match collected.error {
                None => Ok(()),
                Some(err) => Err(anyhow::Error::new(err).context(format!(
                    "span listing stopped after {} spans ({} pages)",
                    collected.items.len(),
                    collected.pages
                ))),
            }
        }
        TracesAction::Get {
            trace_id,
            model,
            window,
            list,
        } => {
            let spans = client
                .get_trace(&model.to_ref()?, &trace_id, &window_query(&window))
                .await?;
            let spans = limited(spans, &list, None);
            emit_rows(&spans, SPAN_COLUMNS, &list, json)
        }
    }
}

async fn query(client: &Client, document: &str, variables: Option<&str>) -> Result<()> {
    let document = match document.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read document from {path}"))?,
        None => document.to_string(),
    };
    let variables: Option<Value> = variables
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--variables must be valid JSON")?;
    let response = client.execute_raw(&document, variables).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&response.data.unwrap_or(Value::Null))?
    );
    Ok(())
}

/// the window from `--start-time`/`--end-time`, defaulting to the last week
fn window_query(window: &WindowArgs) -> SpanQuery {
    let end_time = window.end_time.unwrap_or_else(Utc::now);
    let start_time = window
        .start_time
        .unwrap_or(end_time - Duration::days(DEFAULT_WINDOW_DAYS));
    SpanQuery::new(start_time, end_time)
}

fn limited<T>(mut rows: Vec<T>, list: &ListArgs, default: Option<usize>) -> Vec<T> {
    if let Some(limit) = list.limit(default) {
        rows.truncate(limit);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_defaults_to_last_week() {
        let end = Utc.with_ymd_and_hms(2024, 5, 8, 0, 0, 0).unwrap();
        let window = WindowArgs {
            start_time: None,
            end_time: Some(end),
        };
        let query = window_query(&window);
        assert_eq!(query.end_time, end);
        assert_eq!(query.start_time, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_limited() {
        let list = ListArgs {
            count: Some(2),
            ..ListArgs::default()
        };
        assert_eq!(limited(vec![1, 2, 3], &list, None), vec![1, 2]);
        assert_eq!(limited(vec![1, 2, 3], &ListArgs::default(), None), vec![1, 2, 3]);
    }
}
