//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod anthropic;
pub mod runpod;
pub mod system;
pub mod transport;
pub mod wavespeed;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use runpod::{ChatterboxClient, ChatterboxConfig};
pub use system::{ThreadRandom, TokioSleeper};
pub use transport::{HttpJobTransport, HttpJobTransportConfig, ProviderAuth};
pub use wavespeed::{WavespeedConfig, WavespeedSpeechClient};
