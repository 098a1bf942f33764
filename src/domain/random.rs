//! Random Source - 可注入的随机数来源
//!
//! 领域逻辑只依赖这个 trait，测试可以固定随机结果

/// 随机数来源
pub trait RandomSource: Send + Sync {
    /// 返回 [0, 1) 区间的浮点数
    fn next(&self) -> f64;
}

/// 按随机数选取下标
pub fn pick_index(random: &dyn RandomSource, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = (random.next() * len as f64) as usize;
    Some(index.min(len - 1))
}

/// 从切片中随机选取一个元素
pub fn pick<'a, T>(random: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    pick_index(random, items.len()).map(|i| &items[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedRandom;

    #[test]
    fn test_pick_bounds() {
        let items = ["a", "b", "c"];
        assert_eq!(pick(&FixedRandom::new([0.0]), &items), Some(&"a"));
        assert_eq!(pick(&FixedRandom::new([0.5]), &items), Some(&"b"));
        assert_eq!(pick(&FixedRandom::new([0.999_999]), &items), Some(&"c"));
        assert_eq!(pick::<&str>(&FixedRandom::new([0.5]), &[]), None);
    }
}
