use crate::domain::SortOrder;
use crate::search::pagination::Page;
use crate::search::predicate::{Predicate, TextField};
use crate::store::{GroupField, PartStore, StoreError};
use async_trait::async_trait;
use common::persistence::models::marketplace::PartRow;
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

/// In-process store evaluating predicates directly against loaded rows.
#[derive(Default)]
pub struct MemoryPartStore {
    rows: Vec<PartRow>,
}

impl MemoryPartStore {
    pub fn new(rows: Vec<PartRow>) -> Self {
        Self { rows }
    }

    fn matching<'a>(&'a self, predicate: &'a Predicate) -> impl Iterator<Item = &'a PartRow> {
        self.rows.iter().filter(move |row| evaluate(predicate, row))
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn eq_ci(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

/// Reference semantics of [`Predicate`] over one joined row.
pub fn evaluate(predicate: &Predicate, row: &PartRow) -> bool {
    let (part, vehicle, seller) = row;
    match predicate {
        Predicate::And(children) => children.iter().all(|c| evaluate(c, row)),
        Predicate::Or(children) => children.iter().any(|c| evaluate(c, row)),
        Predicate::Contains(TextField::Name, needle) => contains_ci(&part.name, needle),
        Predicate::Contains(TextField::Description, needle) => {
            contains_ci(&part.description, needle)
        }
        Predicate::Contains(TextField::PartNumber, needle) => {
            contains_ci(&part.part_number, needle)
        }
        Predicate::YearEq(year) => vehicle.year == *year,
        Predicate::MakeEq(make) => eq_ci(&vehicle.make, make),
        Predicate::ModelEq(model) => eq_ci(&vehicle.model, model),
        Predicate::PriceAtLeast(min) => part.price >= *min,
        Predicate::PriceAtMost(max) => part.price <= *max,
        Predicate::ConditionIn(conditions) => {
            conditions.iter().any(|c| c.as_str() == part.condition)
        }
        Predicate::ProvinceEq(province) => eq_ci(&seller.province, province),
        Predicate::CityEq(city) => eq_ci(&seller.city, city),
        Predicate::SellerTypeIn(types) => types.iter().any(|t| t.as_str() == seller.business_type),
        Predicate::SellerVerified => seller.is_verified,
        Predicate::StatusIs(status) => part.status == status.as_str(),
        Predicate::ListedOnMarketplace => part.is_listed_on_marketplace,
    }
}

fn compare(sort: SortOrder, a: &PartRow, b: &PartRow) -> Ordering {
    let primary = match sort {
        SortOrder::Newest => b.0.created_at.cmp(&a.0.created_at),
        SortOrder::PriceAsc => a.0.price.total_cmp(&b.0.price),
        SortOrder::PriceDesc => b.0.price.total_cmp(&a.0.price),
        SortOrder::YearDesc => b.1.year.cmp(&a.1.year),
    };
    primary.then_with(|| a.0.id.cmp(&b.0.id))
}

#[async_trait]
impl PartStore for MemoryPartStore {
    async fn find(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        page: Page,
    ) -> Result<Vec<PartRow>, StoreError> {
        let mut rows = self.matching(predicate).collect::<Vec<_>>();
        rows.sort_by(|a, b| compare(sort, a, b));
        Ok(rows
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.take() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64, StoreError> {
        Ok(self.matching(predicate).count() as u64)
    }

    async fn group_count(
        &self,
        predicate: &Predicate,
        field: GroupField,
    ) -> Result<Vec<(String, u64)>, StoreError> {
        let mut counts = HashMap::<String, (&str, u64)>::new();
        for (part, vehicle, _) in self.matching(predicate) {
            let value = match field {
                GroupField::Make => vehicle.make.as_str(),
                GroupField::Model => vehicle.model.as_str(),
                GroupField::Condition => part.condition.as_str(),
            };
            let group = counts.entry(value.to_lowercase()).or_insert((value, 0));
            group.0 = group.0.min(value);
            group.1 += 1;
        }
        Ok(counts
            .into_values()
            .map(|(value, count)| (value.to_string(), count))
            .collect())
    }

    async fn price_histogram(
        &self,
        predicate: &Predicate,
        edges: &[f64],
    ) -> Result<Vec<u64>, StoreError> {
        let mut counts = vec![0; edges.len() + 1];
        for (part, _, _) in self.matching(predicate) {
            let band = edges.iter().take_while(|edge| part.price >= **edge).count();
            counts[band] += 1;
        }
        Ok(counts)
    }

    async fn find_one(
        &self,
        id: Uuid,
        predicate: &Predicate,
    ) -> Result<Option<PartRow>, StoreError> {
        Ok(self.matching(predicate).find(|row| row.0.id == id).cloned())
    }
}
