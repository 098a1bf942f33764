//! Reading Context - 塔罗解读限界上下文

mod spread;

pub use spread::{compose_reading, ReadingScript, SpreadType};
