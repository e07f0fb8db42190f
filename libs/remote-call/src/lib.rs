/// Reliability wrapper for the site's remote functions
///
/// The backend-as-a-service exposes callable operations by name. This library
/// provides:
/// - **Deadline retry**: quadratic backoff with jitter, bounded by a total
///   wall-clock budget rather than an attempt count
/// - **Functions client**: HTTP transport for named remote functions using
///   the `data` envelope convention
///
/// # Example: calling a named function with retry
///
/// ```rust,no_run
/// use remote_call::{FunctionsClient, RetryPolicy};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() {
///     let client = FunctionsClient::new("https://functions.example.com");
///     let argument = json!({ "videoId": "v1" });
///
///     let result = client
///         .call_with_retry("getVideo", Some(&argument), RetryPolicy::default())
///         .await;
/// }
/// ```
pub mod functions;
pub mod retry;

// Re-export main types for convenience
pub use functions::{FunctionsClient, FunctionsError};
pub use retry::{with_deadline_retry, RetryExhausted, RetryPolicy};
