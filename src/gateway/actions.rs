//! Gateway actions: parameter decoding and dispatch onto the broker

use super::context::ErrorContext;
use super::reference::{EXPORT_REFERENCE, EXPORT_REFERENCE_URI};
use super::render;
use crate::broker::Broker;
use crate::error::{BrokerError, BrokerResult};
use crate::exports::{ExportRequest, ReadRequest};
use crate::jobs::CrawlOptions;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Every action name the gateway accepts
pub const ACTIONS: &[&str] = &[
    "sf_check",
    "crawl_site",
    "crawl_status",
    "list_crawls",
    "export_crawl",
    "read_crawl_data",
    "delete_crawl",
    "storage_summary",
    "read_resource",
];

/// One request line
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Echoed back verbatim
    #[serde(default)]
    pub id: Value,
    pub action: String,
    #[serde(default)]
    pub params: Value,
}

/// One response line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: Value,
    pub ok: bool,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct CrawlSiteParams {
    url: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    config_file: Option<String>,
    #[serde(default)]
    max_urls: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CrawlStatusParams {
    crawl_id: String,
}

#[derive(Debug, Deserialize)]
struct ReadCrawlDataParams {
    export_id: String,
    file: String,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    filter_column: Option<String>,
    /// String or number
    #[serde(default)]
    filter_value: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DeleteCrawlParams {
    db_id: String,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

/// Human name of an action for error headers
fn operation_name(action: &str) -> &'static str {
    match action {
        "sf_check" => "Check SEO Spider installation",
        "crawl_site" => "Start crawl",
        "crawl_status" => "Get crawl status",
        "list_crawls" => "List saved crawls",
        "export_crawl" => "Export crawl",
        "read_crawl_data" => "Read crawl data",
        "delete_crawl" => "Delete crawl",
        "storage_summary" => "Summarize storage",
        "read_resource" => "Read resource",
        _ => "Dispatch request",
    }
}

fn decode<T: DeserializeOwned>(params: Value) -> BrokerResult<T> {
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    serde_json::from_value(params)
        .map_err(|e| BrokerError::Validation(format!("Invalid parameters: {e}")))
}

/// Accept strings and numbers; clients may send a numeric filter unquoted
fn coerce_filter_value(value: Option<Value>) -> BrokerResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(BrokerError::Validation(format!(
            "filter_value must be a string or number, got: {other}"
        ))),
    }
}

/// `3600s` reads better as `1 hour`
fn ttl_text(ttl: Duration) -> String {
    let secs = ttl.as_secs();
    match secs {
        3600 => "1 hour".to_string(),
        s if s % 3600 == 0 => format!("{} hours", s / 3600),
        s if s % 60 == 0 => format!("{} minutes", s / 60),
        s => format!("{s} seconds"),
    }
}

async fn run_action(broker: &Broker, action: &str, params: Value) -> BrokerResult<String> {
    match action {
        "sf_check" => Ok(render::tool_info(&broker.check_tool().await?)),
        "crawl_site" => {
            let p: CrawlSiteParams = decode(params)?;
            let options = CrawlOptions {
                label: p.label,
                config_file: p.config_file,
                max_urls: p.max_urls,
            };
            let job = broker.jobs().submit(&p.url, options).await?;
            Ok(render::submitted(&job))
        }
        "crawl_status" => {
            let p: CrawlStatusParams = decode(params)?;
            let snapshot = broker.jobs().poll(p.crawl_id.trim()).await?;
            Ok(render::snapshot(&snapshot))
        }
        "list_crawls" => Ok(render::listing(&broker.list_crawls().await?)),
        "export_crawl" => {
            let request: ExportRequest = decode(params)?;
            let summary = broker.exports().run_export(request).await?;
            Ok(render::export(
                &summary,
                &ttl_text(broker.config().export_ttl()),
            ))
        }
        "read_crawl_data" => {
            let p: ReadCrawlDataParams = decode(params)?;
            let request = ReadRequest {
                export_id: p.export_id,
                file: p.file,
                limit: p.limit,
                offset: p.offset.unwrap_or(0),
                filter_column: p.filter_column,
                filter_value: coerce_filter_value(p.filter_value)?,
            };
            let page = broker.exports().read_file(request).await?;
            Ok(render::page(&page))
        }
        "delete_crawl" => {
            let p: DeleteCrawlParams = decode(params)?;
            let outcome = broker.delete_crawl(&p.db_id).await?;
            Ok(render::delete(p.db_id.trim(), &outcome))
        }
        "storage_summary" => {
            let summary = broker.storage_summary().await?;
            Ok(render::storage(
                &summary,
                &ttl_text(broker.config().export_ttl()),
            ))
        }
        "read_resource" => {
            let p: ReadResourceParams = decode(params)?;
            if p.uri.trim() == EXPORT_REFERENCE_URI {
                Ok(EXPORT_REFERENCE.to_string())
            } else {
                Err(BrokerError::NotFound {
                    what: "resource",
                    name: p.uri,
                    available: vec![EXPORT_REFERENCE_URI.to_string()],
                })
            }
        }
        other => Err(BrokerError::NotFound {
            what: "action",
            name: other.to_string(),
            available: ACTIONS.iter().map(|a| (*a).to_string()).collect(),
        }),
    }
}

/// Run one action; `Err` carries the rendered failure text
pub async fn dispatch(broker: &Broker, action: &str, params: Value) -> Result<String, String> {
    match run_action(broker, action, params).await {
        Ok(text) => {
            tracing::debug!(action, "Action succeeded");
            Ok(text)
        }
        Err(e) => {
            tracing::warn!(action, kind = e.kind(), error = %e, "Action failed");
            Err(ErrorContext::new(operation_name(action)).from_error(&e).build())
        }
    }
}
