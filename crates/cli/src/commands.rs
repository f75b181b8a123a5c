//! Subcommand execution
//!
//! Every command yields a JSON value for stdout.

use anyhow::Context;
use ecotrack_core::{filter_facilities, filter_users, top_categories, Page};
use ecotrack_domain::{
    EmissionsQuery, FactorFilter, LoginRequest, RecomputeRequest, SignupRequest, UploadFile,
};
use ecotrack_infra::api::check_upload_size;
use ecotrack_infra::{ApiClient, ApiError};
use serde_json::{json, Value};

use crate::cli::{Command, Listing};

pub async fn run(client: &ApiClient, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Login { email, password } => {
            let tokens = client.auth().login(&LoginRequest { email, password }).await?;
            json!({ "authenticated": true, "user_id": tokens.user_id })
        }
        Command::Signup { org_name, email, password } => {
            let request = SignupRequest { org_name, email, password };
            let tokens = client.auth().signup(&request).await?;
            json!({ "authenticated": true, "user_id": tokens.user_id })
        }
        Command::Logout => {
            client.auth().logout()?;
            json!({ "authenticated": false })
        }
        Command::Me => to_value(client.auth().me().await?)?,
        Command::Kpis(window) => to_value(client.analytics().kpis(&window.from, &window.to).await?)?,
        Command::Trend { window, grain } => {
            to_value(client.analytics().trend(&window.from, &window.to, grain).await?)?
        }
        Command::Summary { top } => {
            let mut summary = client.analytics().summary().await?;
            summary.top_categories = top_categories(&summary.top_categories, top);
            to_value(summary)?
        }
        Command::Factors { category, geography, valid_on } => {
            let filter = FactorFilter { category, geography, valid_on };
            to_value(client.factors().list(&filter).await?)?
        }
        Command::Suggestion { org_id, user_id } => {
            to_value(client.analytics().suggestion(org_id, user_id).await?)?
        }
        Command::Report { window, out } => {
            let csv = client.reports().period(&window.from, &window.to).await?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &csv)
                        .with_context(|| format!("failed to write report to {}", path.display()))?;
                    json!({ "written": path.display().to_string(), "bytes": csv.len() })
                }
                None => Value::String(csv),
            }
        }
        Command::Upload { file } => {
            let size = std::fs::metadata(&file)
                .with_context(|| format!("failed to read {}", file.display()))?
                .len();
            check_upload_size(size).map_err(ApiError::Validation)?;
            let contents = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            to_value(client.ingest().upload_csv(UploadFile::new(file_name, contents)).await?)?
        }
        Command::Facilities(listing) => {
            let facilities = client.tenants().facilities().await?;
            let matched = match listing.search.as_deref() {
                Some(query) => filter_facilities(&facilities, query),
                None => facilities,
            };
            to_value(paginate(matched, &listing))?
        }
        Command::Users(listing) => {
            let users = client.tenants().users().await?;
            let matched = match listing.search.as_deref() {
                Some(query) => filter_users(&users, query),
                None => users,
            };
            to_value(paginate(matched, &listing))?
        }
        Command::Emissions { from, to } => {
            to_value(client.emissions().list(&EmissionsQuery { from, to }).await?)?
        }
        Command::Recompute { since, until } => {
            let request = RecomputeRequest { since, until };
            to_value(client.emissions().recompute(&request).await?)?
        }
    };
    Ok(output)
}

fn paginate<T>(items: Vec<T>, listing: &Listing) -> Page<T> {
    Page::from_items(items, listing.page, listing.page_size)
}

fn to_value<T: serde::Serialize>(value: T) -> anyhow::Result<Value> {
    serde_json::to_value(value).context("failed to encode output")
}

/// JSON shape of a failed command
pub fn error_report(err: &anyhow::Error) -> Value {
    match err.downcast_ref::<ApiError>() {
        Some(api) => json!({
            "error": api.kind(),
            "message": api.to_string(),
            "status": api.status(),
            "detail": api.detail(),
            "retryable": api.category() == ecotrack_infra::ApiErrorCategory::TryLater,
        }),
        None => json!({ "error": "Error", "message": format!("{err:#}") }),
    }
}
