pub mod facets;
pub mod filters;
pub mod pagination;
pub mod predicate;

use crate::domain::{PartListing, SearchResponse};
use crate::error::ApiError;
use crate::search::filters::SearchFilters;
use crate::search::pagination::{paginate, Page};
use crate::search::predicate::{translate, Predicate};
use crate::store::PartStore;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Validates the filters, then runs the page query, the total count and the facet counts
/// concurrently. Any failing query fails the whole search.
#[instrument(skip_all)]
pub async fn search(store: &dyn PartStore, filters: SearchFilters) -> Result<SearchResponse, ApiError> {
    let filters = filters.validate()?;
    let page = Page::new(filters.page, filters.page_size);
    let predicate = translate(&filters);
    debug!(?predicate, "translated marketplace filters");

    let (rows, total, facets) = futures::try_join!(
        store.find(&predicate, filters.sort, page),
        store.count(&predicate),
        facets::aggregate(store, &predicate),
    )?;

    let parts = rows
        .into_iter()
        .map(PartListing::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(crate::store::StoreError::from)?;
    debug!("search matched `{total}` parts, returning `{}`", parts.len());

    Ok(paginate(parts, total, facets, page))
}

/// A single listing, subject to the same visibility rules as search.
#[instrument(skip(store))]
pub async fn listing(store: &dyn PartStore, id: Uuid) -> Result<PartListing, ApiError> {
    let row = store
        .find_one(id, &Predicate::And(Predicate::baseline()))
        .await?
        .ok_or(ApiError::PartNotFound(id))?;
    Ok(PartListing::try_from(row).map_err(crate::store::StoreError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusinessType, PartCondition, SortOrder};
    use crate::store::memory::evaluate;
    use crate::store::MemoryPartStore;
    use crate::test_support::{catalogue, part_id};

    fn store() -> MemoryPartStore {
        MemoryPartStore::new(catalogue())
    }

    fn names(response: &SearchResponse) -> Vec<&str> {
        response
            .results
            .parts
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_baseline_hides_unverified_sold_and_unlisted() -> Result<(), ApiError> {
        let response = search(&store(), SearchFilters::default()).await?;

        assert_eq!(response.results.total_count, 6);
        let names = names(&response);
        assert!(!names.contains(&"Tailgate"));
        assert!(!names.contains(&"Radiator"));
        assert!(!names.contains(&"Door panel"));
        Ok(())
    }

    #[tokio::test]
    async fn test_baseline_cannot_be_widened_by_filters() -> Result<(), ApiError> {
        let response = search(
            &store(),
            SearchFilters {
                seller_types: vec![BusinessType::Dealer],
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(response.results.total_count, 0);
        assert!(response.results.parts.is_empty());
        assert_eq!(response.pagination.total_pages, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_every_result_satisfies_every_filter() -> Result<(), ApiError> {
        let cases = vec![
            SearchFilters {
                make: Some("toyota".to_string()),
                ..Default::default()
            },
            SearchFilters {
                min_price: Some(1000.0),
                max_price: Some(5000.0),
                ..Default::default()
            },
            SearchFilters {
                province: Some("western cape".to_string()),
                conditions: vec![PartCondition::Good, PartCondition::Fair],
                ..Default::default()
            },
            SearchFilters {
                query: Some("ALT".to_string()),
                year: Some(2015),
                ..Default::default()
            },
        ];
        let rows = catalogue();

        for filters in cases {
            let predicate = translate(&filters.clone().validate()?);
            let response = search(&store(), filters).await?;
            assert!(response.results.total_count > 0);
            for listing in &response.results.parts {
                let row = rows
                    .iter()
                    .find(|r| r.0.id == listing.id)
                    .expect("listing comes from the catalogue");
                assert!(evaluate(&predicate, row), "{} violates {predicate:?}", listing.name);
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_text_query_matches_part_number() -> Result<(), ApiError> {
        let response = search(
            &store(),
            SearchFilters {
                query: Some("gbx-".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(names(&response), vec!["Gearbox"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_pagination_window() -> Result<(), ApiError> {
        let page_two = search(
            &store(),
            SearchFilters {
                sort: SortOrder::PriceAsc,
                page: Some(2),
                page_size: Some(4),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(names(&page_two), vec!["Gearbox", "Engine block"]);
        assert_eq!(page_two.pagination.total_pages, 2);
        assert_eq!(page_two.results.total_count, 6);

        let past_end = search(
            &store(),
            SearchFilters {
                page: Some(5),
                page_size: Some(4),
                ..Default::default()
            },
        )
        .await?;
        assert!(past_end.results.parts.is_empty());
        assert_eq!(past_end.pagination.page, 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_sort_orders() -> Result<(), ApiError> {
        let newest = search(&store(), SearchFilters::default()).await?;
        assert_eq!(names(&newest).first(), Some(&"Engine block"));

        let cheapest = search(
            &store(),
            SearchFilters {
                sort: SortOrder::PriceAsc,
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(names(&cheapest).first(), Some(&"Side mirror"));

        let dearest = search(
            &store(),
            SearchFilters {
                sort: SortOrder::PriceDesc,
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(names(&dearest).first(), Some(&"Engine block"));

        let by_year = search(
            &store(),
            SearchFilters {
                sort: SortOrder::YearDesc,
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_year.results.parts[0].vehicle.model, "Hilux");
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_filters_never_reach_the_store() {
        let result = search(
            &store(),
            SearchFilters {
                min_price: Some(10.0),
                max_price: Some(1.0),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(result, Err(ApiError::InvalidFilters(_))));
    }

    #[tokio::test]
    async fn test_listing_respects_visibility() -> Result<(), ApiError> {
        let visible = listing(&store(), part_id(1)).await?;
        assert_eq!(visible.name, "Headlight assembly");
        assert_eq!(visible.seller.business_type, BusinessType::Dismantler);

        let sold = listing(&store(), part_id(8)).await;
        assert!(matches!(sold, Err(ApiError::PartNotFound(_))));
        Ok(())
    }

    fn ids(response: &SearchResponse) -> Vec<Uuid> {
        response.results.parts.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_price_bounds_are_inclusive() -> Result<(), ApiError> {
        let response = search(
            &store(),
            SearchFilters {
                min_price: Some(1500.0),
                max_price: Some(4200.0),
                sort: SortOrder::PriceAsc,
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(names(&response), vec!["Headlight assembly", "Front bumper"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_ties_break_by_part_id() -> Result<(), ApiError> {
        let by_year = search(
            &store(),
            SearchFilters {
                sort: SortOrder::YearDesc,
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(
            ids(&by_year),
            [3, 4, 1, 2, 5, 6].map(part_id).to_vec()
        );

        let mut rows = catalogue();
        rows[1].0.price = 1500.0;
        rows[5].0.price = 1500.0;
        let tied = MemoryPartStore::new(rows);
        for sort in [SortOrder::PriceAsc, SortOrder::PriceDesc] {
            let response = search(
                &tied,
                SearchFilters {
                    sort,
                    ..Default::default()
                },
            )
            .await?;
            let expected = match sort {
                SortOrder::PriceAsc => [5, 1, 2, 6, 3, 4],
                _ => [4, 3, 1, 2, 6, 5],
            };
            assert_eq!(ids(&response), expected.map(part_id).to_vec(), "{sort:?}");
        }
        Ok(())
    }
}
