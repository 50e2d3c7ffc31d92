use crate::domain::{FacetCount, Facets, PriceRangeCount};
use crate::search::predicate::{Dimension, Predicate};
use crate::store::{GroupField, PartStore, StoreError};
use tracing::instrument;

/// Half-open price range `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, Copy)]
pub struct PriceBucket {
    pub label: &'static str,
    pub min: f64,
    pub max: Option<f64>,
}

pub const PRICE_BUCKETS: [PriceBucket; 5] = [
    PriceBucket {
        label: "0-1000",
        min: 0.0,
        max: Some(1000.0),
    },
    PriceBucket {
        label: "1000-5000",
        min: 1000.0,
        max: Some(5000.0),
    },
    PriceBucket {
        label: "5000-10000",
        min: 5000.0,
        max: Some(10000.0),
    },
    PriceBucket {
        label: "10000-25000",
        min: 10000.0,
        max: Some(25000.0),
    },
    PriceBucket {
        label: "25000+",
        min: 25000.0,
        max: None,
    },
];

fn ranked(groups: Vec<(String, u64)>) -> Vec<FacetCount> {
    let mut counts = groups
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(value, count)| FacetCount { value, count })
        .collect::<Vec<_>>();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    counts
}

/// Counts per make, model, condition and price bucket. Each dimension is counted against
/// `predicate` with its own filter removed; the four counts are issued concurrently.
#[instrument(skip_all)]
pub async fn aggregate(store: &dyn PartStore, predicate: &Predicate) -> Result<Facets, StoreError> {
    let without_make = predicate.without(Dimension::Make);
    let without_model = predicate.without(Dimension::Model);
    let without_condition = predicate.without(Dimension::Condition);
    let without_price = predicate.without(Dimension::Price);
    let edges = PRICE_BUCKETS
        .iter()
        .filter_map(|bucket| bucket.max)
        .collect::<Vec<_>>();

    let (makes, models, conditions, bucket_counts) = futures::try_join!(
        store.group_count(&without_make, GroupField::Make),
        store.group_count(&without_model, GroupField::Model),
        store.group_count(&without_condition, GroupField::Condition),
        store.price_histogram(&without_price, &edges),
    )?;

    let price_ranges = PRICE_BUCKETS
        .iter()
        .zip(bucket_counts)
        .filter(|(_, count)| *count > 0)
        .map(|(bucket, count)| PriceRangeCount {
            label: bucket.label.to_string(),
            min: bucket.min,
            max: bucket.max,
            count,
        })
        .collect();

    Ok(Facets {
        makes: ranked(makes),
        models: ranked(models),
        conditions: ranked(conditions),
        price_ranges,
    })
}
