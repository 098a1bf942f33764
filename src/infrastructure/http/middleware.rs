//! HTTP Middleware
//!
//! 依赖外部模型服务的路由的耗时日志

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

/// 调用外部提供方的路由前缀
const PROVIDER_ROUTES: &[&str] = &["/api/card", "/api/voice-clone", "/api/quiz", "/api/tarot"];

/// 超过这个耗时记为慢请求
const SLOW_REQUEST: Duration = Duration::from_secs(20);

fn is_provider_route(route: &str) -> bool {
    PROVIDER_ROUTES
        .iter()
        .any(|prefix| route == *prefix || route.starts_with(&format!("{}/", prefix)))
}

/// 提供方路由的耗时日志中间件
///
/// 按匹配到的路由模板记录（不含查询参数），其余路由直接放行。
/// 业务错误走 HTTP 200 + errno，在 `ApiError::into_response()` 中记录
pub async fn provider_latency_middleware(request: Request, next: Next) -> Response {
    let route = match request.extensions().get::<MatchedPath>() {
        Some(path) if is_provider_route(path.as_str()) => path.as_str().to_string(),
        _ => return next.run(request).await,
    };
    let method = request.method().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let elapsed = started.elapsed();
    let elapsed_ms = elapsed.as_millis() as u64;

    if elapsed >= SLOW_REQUEST {
        tracing::warn!(
            method = %method,
            route = %route,
            status = response.status().as_u16(),
            elapsed_ms,
            "Slow provider request"
        );
    } else {
        tracing::info!(
            method = %method,
            route = %route,
            status = response.status().as_u16(),
            elapsed_ms,
            "Provider request finished"
        );
    }

    response
}
