//! Wavespeed Adapter - MiniMax speech-02-hd 合成与音色克隆

mod speech_client;

pub use speech_client::*;
