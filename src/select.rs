//! Reduce a set of distance-annotated features to one feature per category.

use clap::ValueEnum;
use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::models::Feature;

/// Order in which candidates of a category are ranked; the first one wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceOrder {
    /// Nearest candidate wins
    Ascending,
    /// Farthest candidate wins
    Descending,
}

impl DistanceOrder {
    fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            DistanceOrder::Ascending => a.total_cmp(&b),
            DistanceOrder::Descending => b.total_cmp(&a),
        }
    }
}

/// Selection policy exposed through configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Selection {
    /// Historical behaviour: distance descending, keeps the farthest
    #[default]
    Legacy,
    /// Distance ascending, keeps the nearest
    Nearest,
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Legacy => write!(f, "legacy"),
            Selection::Nearest => write!(f, "nearest"),
        }
    }
}

impl Selection {
    pub fn order(self) -> DistanceOrder {
        match self {
            Selection::Legacy => DistanceOrder::Descending,
            Selection::Nearest => DistanceOrder::Ascending,
        }
    }

    pub fn apply(self, candidates: Vec<Feature>) -> Result<Vec<Feature>> {
        select_per_category(candidates, self.order())
    }
}

/// One candidate per category, ranked by `(category asc, distance desc)`.
///
/// Despite the name this keeps the candidate with the *largest* distance in
/// each category, which is what the service has always returned. Use
/// [`select_per_category`] with [`DistanceOrder::Ascending`] for nearest-wins.
pub fn select_nearest_per_category(candidates: Vec<Feature>) -> Result<Vec<Feature>> {
    select_per_category(candidates, DistanceOrder::Descending)
}

/// Sort candidates by category then distance, and keep the first of each
/// category. Every candidate must carry a distance.
pub fn select_per_category(candidates: Vec<Feature>, order: DistanceOrder) -> Result<Vec<Feature>> {
    let mut ranked = candidates
        .into_iter()
        .map(|feature| match feature.distance {
            Some(d) => Ok((d, feature)),
            None => Err(Error::MissingDistance { id: feature.id }),
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|(da, a), (db, b)| {
        a.category
            .cmp(&b.category)
            .then_with(|| order.compare(*da, *db))
    });

    let mut selected: Vec<Feature> = Vec::with_capacity(ranked.len());
    for (_, feature) in ranked {
        if selected
            .last()
            .is_some_and(|kept| kept.category == feature.category)
        {
            continue;
        }
        selected.push(feature);
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Geometry;
    use geo::Point;

    fn candidate(id: &str, distance: f64) -> Feature {
        Feature::new(id, Geometry::Point(Point::new(0.0, 0.0)), "test")
            .unwrap()
            .with_distance(distance)
    }

    #[test]
    fn test_keeps_farthest_per_category() {
        let candidates = vec![
            candidate("commune.1", 5.0),
            candidate("commune.2", 10.0),
            candidate("commune.3", 2.0),
        ];
        let selected = select_nearest_per_category(candidates).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "commune.2");
        assert_eq!(selected[0].distance, Some(10.0));
    }

    #[test]
    fn test_nearest_wins_when_ascending() {
        let candidates = vec![
            candidate("commune.1", 5.0),
            candidate("commune.2", 10.0),
            candidate("commune.3", 2.0),
        ];
        let selected = select_per_category(candidates, DistanceOrder::Ascending).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "commune.3");
        assert_eq!(selected[0].distance, Some(2.0));
    }

    #[test]
    fn test_distinct_categories_are_all_kept() {
        let candidates = vec![
            candidate("region.11", 0.0),
            candidate("commune.75056", 0.0),
            candidate("departement.75", 1.5),
            candidate("epci.200054781", 3.0),
        ];
        let selected = select_nearest_per_category(candidates).unwrap();
        let mut ids: Vec<&str> = selected.iter().map(|f| f.id.as_str()).collect();
        ids.sort();
        assert_eq!(
            ids,
            vec!["commune.75056", "departement.75", "epci.200054781", "region.11"]
        );
    }

    #[test]
    fn test_one_per_category_in_mixed_set() {
        let candidates = vec![
            candidate("parcelle.1", 0.2),
            candidate("feuille.1", 0.0),
            candidate("parcelle.2", 0.0),
            candidate("feuille.2", 0.4),
        ];
        let selected = Selection::Nearest.apply(candidates).unwrap();
        let ids: Vec<&str> = selected.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["feuille.1", "parcelle.2"]);
    }

    #[test]
    fn test_missing_distance() {
        let mut incomplete = candidate("commune.2", 0.0);
        incomplete.distance = None;
        let result = select_nearest_per_category(vec![candidate("commune.1", 1.0), incomplete]);
        assert_eq!(
            result,
            Err(Error::MissingDistance {
                id: "commune.2".to_string()
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(select_nearest_per_category(vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_selection_orders() {
        assert_eq!(Selection::default(), Selection::Legacy);
        assert_eq!(Selection::Legacy.order(), DistanceOrder::Descending);
        assert_eq!(Selection::Nearest.order(), DistanceOrder::Ascending);
        assert_eq!(Selection::Nearest.to_string(), "nearest");
    }
}
