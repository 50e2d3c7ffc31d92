use crate::domain::{BusinessType, PartCondition, PartStatus};
use crate::search::filters::SearchFilters;

/// Facet dimension a filter leaf belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Make,
    Model,
    Condition,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Description,
    PartNumber,
}

/// Condition tree over the joined part, vehicle and seller relation.
///
/// Text matches and string equalities are case-insensitive. Price bounds are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Contains(TextField, String),
    YearEq(i32),
    MakeEq(String),
    ModelEq(String),
    PriceAtLeast(f64),
    PriceAtMost(f64),
    ConditionIn(Vec<PartCondition>),
    ProvinceEq(String),
    CityEq(String),
    SellerTypeIn(Vec<BusinessType>),
    SellerVerified,
    StatusIs(PartStatus),
    ListedOnMarketplace,
}

impl Predicate {
    /// Leaves every marketplace query carries regardless of user input.
    pub fn baseline() -> Vec<Predicate> {
        vec![
            Predicate::SellerVerified,
            Predicate::StatusIs(PartStatus::Available),
            Predicate::ListedOnMarketplace,
        ]
    }

    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Predicate::MakeEq(_) => Some(Dimension::Make),
            Predicate::ModelEq(_) => Some(Dimension::Model),
            Predicate::ConditionIn(_) => Some(Dimension::Condition),
            Predicate::PriceAtLeast(_) | Predicate::PriceAtMost(_) => Some(Dimension::Price),
            _ => None,
        }
    }

    /// Copy of the tree with every leaf of `dimension` removed. Groups left empty are dropped
    /// rather than turned into constant true/false.
    pub fn without(&self, dimension: Dimension) -> Predicate {
        self.strip(dimension)
            .unwrap_or_else(|| Predicate::And(Vec::new()))
    }

    fn strip(&self, dimension: Dimension) -> Option<Predicate> {
        match self {
            Predicate::And(children) => {
                let kept = children
                    .iter()
                    .filter_map(|c| c.strip(dimension))
                    .collect::<Vec<_>>();
                (!kept.is_empty()).then_some(Predicate::And(kept))
            }
            Predicate::Or(children) => {
                let kept = children
                    .iter()
                    .filter_map(|c| c.strip(dimension))
                    .collect::<Vec<_>>();
                (!kept.is_empty()).then_some(Predicate::Or(kept))
            }
            leaf if leaf.dimension() == Some(dimension) => None,
            leaf => Some(leaf.clone()),
        }
    }
}

/// Builds the predicate for validated filters. Absent filters contribute nothing; the
/// baseline is always present.
pub fn translate(filters: &SearchFilters) -> Predicate {
    let mut clauses = Predicate::baseline();

    if let Some(query) = &filters.query {
        clauses.push(Predicate::Or(vec![
            Predicate::Contains(TextField::Name, query.clone()),
            Predicate::Contains(TextField::Description, query.clone()),
            Predicate::Contains(TextField::PartNumber, query.clone()),
        ]));
    }
    if let Some(year) = filters.year {
        clauses.push(Predicate::YearEq(year));
    }
    if let Some(make) = &filters.make {
        clauses.push(Predicate::MakeEq(make.clone()));
    }
    if let Some(model) = &filters.model {
        clauses.push(Predicate::ModelEq(model.clone()));
    }
    if let Some(min) = filters.min_price {
        clauses.push(Predicate::PriceAtLeast(min));
    }
    if let Some(max) = filters.max_price {
        clauses.push(Predicate::PriceAtMost(max));
    }
    if !filters.conditions.is_empty() {
        clauses.push(Predicate::ConditionIn(filters.conditions.clone()));
    }
    if let Some(province) = &filters.province {
        clauses.push(Predicate::ProvinceEq(province.clone()));
    }
    if let Some(city) = &filters.city {
        clauses.push(Predicate::CityEq(city.clone()));
    }
    if !filters.seller_types.is_empty() {
        clauses.push(Predicate::SellerTypeIn(filters.seller_types.clone()));
    }

    Predicate::And(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(predicate: &Predicate) -> Vec<Predicate> {
        match predicate {
            Predicate::And(children) | Predicate::Or(children) => {
                children.iter().flat_map(leaves).collect()
            }
            leaf => vec![leaf.clone()],
        }
    }

    #[test]
    fn test_empty_filters_yield_baseline_only() {
        let predicate = translate(&SearchFilters::default());
        assert_eq!(predicate, Predicate::And(Predicate::baseline()));
    }

    #[test]
    fn test_text_query_matches_three_fields() {
        let predicate = translate(&SearchFilters {
            query: Some("alternator".to_string()),
            ..Default::default()
        });

        let Predicate::And(clauses) = predicate else {
            panic!("expected top level and");
        };
        assert_eq!(
            clauses.last(),
            Some(&Predicate::Or(vec![
                Predicate::Contains(TextField::Name, "alternator".to_string()),
                Predicate::Contains(TextField::Description, "alternator".to_string()),
                Predicate::Contains(TextField::PartNumber, "alternator".to_string()),
            ]))
        );
    }

    #[test]
    fn test_without_removes_only_own_dimension() {
        let predicate = translate(&SearchFilters {
            make: Some("Toyota".to_string()),
            model: Some("Hilux".to_string()),
            min_price: Some(100.0),
            max_price: Some(900.0),
            conditions: vec![PartCondition::Good],
            ..Default::default()
        });

        let no_make = leaves(&predicate.without(Dimension::Make));
        assert!(!no_make.contains(&Predicate::MakeEq("Toyota".to_string())));
        assert!(no_make.contains(&Predicate::ModelEq("Hilux".to_string())));

        let no_price = leaves(&predicate.without(Dimension::Price));
        assert!(no_price.iter().all(|l| l.dimension() != Some(Dimension::Price)));
        assert!(no_price.contains(&Predicate::ConditionIn(vec![PartCondition::Good])));
    }

    #[test]
    fn test_baseline_survives_every_exclusion() {
        let predicate = translate(&SearchFilters {
            make: Some("Ford".to_string()),
            min_price: Some(10.0),
            ..Default::default()
        });

        for dimension in [
            Dimension::Make,
            Dimension::Model,
            Dimension::Condition,
            Dimension::Price,
        ] {
            let remaining = leaves(&predicate.without(dimension));
            for required in Predicate::baseline() {
                assert!(remaining.contains(&required), "{dimension:?} dropped {required:?}");
            }
        }
    }
}
