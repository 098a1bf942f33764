//! RunPod Adapter - Chatterbox 德语朗读

mod chatterbox_client;

pub use chatterbox_client::*;
