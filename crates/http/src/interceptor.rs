//! Global response interceptor.

use axum::{extract::Request, middleware::Next, response::Response};

/// Exception massage interceptor.
///
/// Wraps every handled request and hands the handler's response back untouched.
/// Hook point for normalizing error bodies; currently rewrites nothing.
pub async fn exception_massage(request: Request, next: Next) -> Response {
    next.run(request).await
}
