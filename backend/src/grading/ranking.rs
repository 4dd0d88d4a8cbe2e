// src/grading/ranking.rs

use serde::Serialize;

/// A ranked entry. `rank` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub rank: usize,
    #[serde(flatten)]
    pub item: T,
}

/// Orders items by percentage, highest first, and assigns competition ranks:
/// equal percentages share a rank and the following rank is skipped (1, 2, 2, 4).
///
/// The sort is stable, so ties keep their incoming order.
pub fn rank_by_percentage<T, F>(items: Vec<T>, percentage: F) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> f64,
{
    let mut items = items;
    items.sort_by(|a, b| percentage(b).total_cmp(&percentage(a)));

    let mut ranked = Vec::with_capacity(items.len());
    let mut previous: Option<f64> = None;
    let mut rank = 0;

    for (position, item) in items.into_iter().enumerate() {
        let current = percentage(&item);
        if previous != Some(current) {
            rank = position + 1;
            previous = Some(current);
        }
        ranked.push(Ranked { rank, item });
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_ranking() {
        let items = vec![("c", 50.0), ("a", 90.0), ("b", 72.5), ("d", 72.5), ("e", 10.0)];
        let ranked = rank_by_percentage(items, |(_, p)| *p);

        let view: Vec<(usize, &str)> = ranked.iter().map(|r| (r.rank, r.item.0)).collect();
        assert_eq!(view, vec![(1, "a"), (2, "b"), (2, "d"), (4, "c"), (5, "e")]);
    }

    #[test]
    fn test_empty_and_single() {
        let ranked = rank_by_percentage(Vec::<f64>::new(), |p| *p);
        assert!(ranked.is_empty());

        let ranked = rank_by_percentage(vec![0.0], |p| *p);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_all_tied() {
        let ranked = rank_by_percentage(vec![40.0, 40.0, 40.0], |p| *p);
        assert!(ranked.iter().all(|r| r.rank == 1));
    }
}
