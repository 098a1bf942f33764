//! Sleeper Port - 轮询间隔的挂起点
//!
//! 测试注入记录型实现，不依赖真实时钟

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
