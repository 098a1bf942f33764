//! HTTP Handlers

mod card;
mod ping;
mod quiz;
mod reading;
mod voice_clone;

pub use card::*;
pub use ping::*;
pub use quiz::*;
pub use reading::*;
pub use voice_clone::*;
