//! System Adapters - 时钟与随机数

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

use crate::application::ports::Sleeper;
use crate::domain::random::RandomSource;

/// tokio 定时器
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 线程本地 RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}
