//! Weighted selection over id pools.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One entry of a weighted pool. Negative weights count as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub id: String,
    pub weight: i32,
}

impl WeightedItem {
    pub fn new(id: impl Into<String>, weight: i32) -> Self {
        Self { id: id.into(), weight }
    }
}

/// Sum of the non-negative weights in `items`.
pub fn total_weight(items: &[WeightedItem]) -> i64 {
    items.iter().map(|it| it.weight.max(0) as i64).sum()
}

/// Pick one id with probability `weight / total`.
///
/// Returns `None` when the pool is empty or every weight is zero; the caller
/// supplies its own fallback in that case.
pub fn pick<'a, R: Rng + ?Sized>(items: &'a [WeightedItem], rng: &mut R) -> Option<&'a str> {
    let total = total_weight(items);
    if total <= 0 {
        return None;
    }
    let roll = rng.gen_range(1..=total);
    let mut run = 0i64;
    for it in items {
        run += it.weight.max(0) as i64;
        if roll <= run {
            return Some(it.id.as_str());
        }
    }
    items.last().map(|it| it.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_or_zero_pool_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&[], &mut rng), None);
        let zeros = vec![WeightedItem::new("a", 0), WeightedItem::new("b", -3)];
        assert_eq!(pick(&zeros, &mut rng), None);
    }

    #[test]
    fn zero_weight_items_are_never_picked() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = vec![WeightedItem::new("never", 0), WeightedItem::new("always", 5)];
        for _ in 0..500 {
            assert_eq!(pick(&pool, &mut rng), Some("always"));
        }
    }

    #[test]
    fn frequencies_converge_to_weights() {
        let mut rng = StdRng::seed_from_u64(2024);
        let pool = vec![
            WeightedItem::new("a", 10),
            WeightedItem::new("b", 30),
            WeightedItem::new("c", 60),
        ];
        let trials = 60_000;
        let mut counts = [0usize; 3];
        for _ in 0..trials {
            match pick(&pool, &mut rng) {
                Some("a") => counts[0] += 1,
                Some("b") => counts[1] += 1,
                Some("c") => counts[2] += 1,
                other => panic!("unexpected pick {:?}", other),
            }
        }
        let expected = [0.10, 0.30, 0.60];
        for (count, want) in counts.iter().zip(expected) {
            let freq = *count as f64 / trials as f64;
            assert!((freq - want).abs() < 0.01, "freq {} vs {}", freq, want);
        }
    }
}
