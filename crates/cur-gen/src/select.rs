//! Weighted sampling of categories and AWS services.
//!
//! Category weight is `priority / (count + 1)`: higher priority and fewer
//! existing apps both raise the chance of selection, keeping the gallery
//! balanced over time.

use cur_core::{AwsService, Category};
use rand::Rng;
use rand::distributions::{Distribution as _, WeightedIndex};

/// Pick one category, weighted by priority and inverse app count.
///
/// Returns `None` for an empty catalog.
pub fn pick_category<'a, R, F>(
    rng: &mut R,
    categories: &'a [Category],
    count_for: F,
) -> Option<&'a Category>
where
    R: Rng,
    F: Fn(&str) -> u64,
{
    if categories.is_empty() {
        return None;
    }
    let weights: Vec<f64> = categories
        .iter()
        .map(|cat| {
            #[allow(clippy::cast_precision_loss)]
            let count = count_for(&cat.name) as f64;
            f64::from(cat.priority) / (count + 1.0)
        })
        .collect();
    let dist = WeightedIndex::new(&weights).ok()?;
    Some(&categories[dist.sample(rng)])
}

/// Pick between `min` and `max` distinct services, weighted by priority.
///
/// Returns fewer than `min` only when the catalog itself is smaller.
pub fn pick_services<R: Rng>(
    rng: &mut R,
    services: &[AwsService],
    min: u32,
    max: u32,
) -> Vec<String> {
    if services.is_empty() {
        return Vec::new();
    }
    let max = max.max(min);
    let target = rng.gen_range(min..=max) as usize;
    let target = target.min(services.len());

    let mut remaining: Vec<&AwsService> = services.iter().collect();
    let mut picked = Vec::with_capacity(target);
    while picked.len() < target && !remaining.is_empty() {
        let weights: Vec<f64> = remaining.iter().map(|s| f64::from(s.priority)).collect();
        let Ok(dist) = WeightedIndex::new(&weights) else {
            break;
        };
        let index = dist.sample(rng);
        picked.push(remaining.swap_remove(index).key.clone());
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                name: "a".to_string(),
                description: "A".to_string(),
                priority: 1,
            },
            Category {
                name: "b".to_string(),
                description: "B".to_string(),
                priority: 10,
            },
        ]
    }

    fn services() -> Vec<AwsService> {
        ["bedrock", "lambda", "s3", "dynamodb"]
            .into_iter()
            .map(|key| AwsService {
                key: key.to_string(),
                name: key.to_string(),
                use_cases: vec![],
                priority: 1,
            })
            .collect()
    }

    #[test]
    fn empty_catalog_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_category(&mut rng, &[], |_| 0).is_none());
    }

    #[test]
    fn high_priority_category_dominates() {
        let mut rng = StdRng::seed_from_u64(42);
        let cats = categories();
        let picks = (0..200)
            .filter(|_| pick_category(&mut rng, &cats, |_| 0).unwrap().name == "b")
            .count();
        // ~10:1 weighting; even a loose bound catches inverted weights.
        assert!(picks > 120, "expected b to dominate, got {picks}/200");
    }

    #[test]
    fn saturated_category_loses_weight() {
        let mut rng = StdRng::seed_from_u64(7);
        let cats = categories();
        // b has 99 apps already, a has none: weights 1.0 vs 0.1.
        let picks_a = (0..200)
            .filter(|_| {
                pick_category(&mut rng, &cats, |name| if name == "b" { 99 } else { 0 })
                    .unwrap()
                    .name
                    == "a"
            })
            .count();
        assert!(picks_a > 120, "expected a to dominate, got {picks_a}/200");
    }

    #[test]
    fn services_are_distinct_and_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let picked = pick_services(&mut rng, &services(), 2, 4);
            assert!((2..=4).contains(&picked.len()));
            let mut unique = picked.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), picked.len(), "duplicate service picked");
        }
    }

    #[test]
    fn small_catalog_caps_selection() {
        let mut rng = StdRng::seed_from_u64(5);
        let one = vec![services().remove(0)];
        let picked = pick_services(&mut rng, &one, 2, 4);
        assert_eq!(picked, vec!["bedrock"]);
    }
}
