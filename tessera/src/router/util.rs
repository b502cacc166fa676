use tessera_core::{Capability, TesseraError};

/// Await `fut`, bounded by an optional request-level deadline.
///
/// Without a deadline the future runs to completion. On timeout returns
/// `TesseraError::RequestTimeout` labeled with `capability`.
///
/// # Errors
/// Returns `RequestTimeout` when the deadline elapses first.
pub async fn with_request_deadline<F, T>(
    capability: Capability,
    deadline: Option<std::time::Duration>,
    fut: F,
) -> Result<T, TesseraError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| TesseraError::request_timeout(capability.to_string())),
        None => Ok(fut.await),
    }
}
