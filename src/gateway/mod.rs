//! JSON-lines gateway on stdin/stdout
//!
//! Each input line is `{"id": .., "action": "..", "params": {..}}`; each output
//! line is `{"id": .., "ok": bool, "text": ".."}`. Requests run concurrently on
//! their own tasks, so responses may arrive out of order; `id` correlates them.

pub mod actions;
pub mod context;
pub mod reference;
pub mod render;

pub use actions::{ACTIONS, Request, Response, dispatch};
pub use context::ErrorContext;
pub use reference::{EXPORT_REFERENCE, EXPORT_REFERENCE_URI};

use crate::broker::Broker;
use serde_json::Value;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Run one request on its own task so a panic only fails that request
pub async fn handle(broker: Arc<Broker>, request: Request) -> Response {
    let Request { id, action, params } = request;

    let task_action = action.clone();
    let result =
        tokio::spawn(async move { dispatch(&broker, &task_action, params).await }).await;

    match result {
        Ok(Ok(text)) => Response { id, ok: true, text },
        Ok(Err(text)) => Response {
            id,
            ok: false,
            text,
        },
        Err(e) => {
            tracing::error!(action = %action, error = %e, "Request task failed");
            Response {
                id,
                ok: false,
                text: ErrorContext::new(action)
                    .detail("Internal error while handling the request")
                    .suggest("Retry the request")
                    .build(),
            }
        }
    }
}

fn parse_error_response(error: &serde_json::Error) -> Response {
    Response {
        id: Value::Null,
        ok: false,
        text: ErrorContext::new("Parse request")
            .detail(error.to_string())
            .suggest(r#"Send one JSON object per line: {"id": 1, "action": "sf_check", "params": {}}"#)
            .build(),
    }
}

/// Serve requests from `input` until EOF, writing responses to `output`
///
/// In-flight requests are finished before returning.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails.
pub async fn serve<R, W>(broker: Arc<Broker>, input: R, output: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();

    let writer = tokio::spawn(async move {
        let mut output = output;
        while let Some(response) = rx.recv().await {
            let mut line = serde_json::to_string(&response).map_err(io::Error::other)?;
            line.push('\n');
            output.write_all(line.as_bytes()).await?;
            output.flush().await?;
        }
        Ok::<(), io::Error>(())
    });

    let mut tasks = JoinSet::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        while tasks.try_join_next().is_some() {}

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                tracing::debug!(action = %request.action, "Request received");
                let broker = Arc::clone(&broker);
                let tx = tx.clone();
                tasks.spawn(async move {
                    let response = handle(broker, request).await;
                    let _ = tx.send(response);
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed request line");
                let _ = tx.send(parse_error_response(&e));
            }
        }
    }

    while tasks.join_next().await.is_some() {}
    drop(tx);

    writer.await.map_err(io::Error::other)?
}
