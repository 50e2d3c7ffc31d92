use crate::domain::SortOrder;
use crate::search::pagination::Page;
use crate::search::predicate::{Predicate, TextField};
use crate::store::{GroupField, PartStore, StoreError};
use async_trait::async_trait;
use common::persistence::models::marketplace::{Part, PartRow, Seller, Vehicle};
use common::persistence::schema::{part, seller, vehicle};
use common::persistence::PgPool;
use diesel::dsl::{count_star, min, sql};
use diesel::expression::{BoxableExpression, SqlLiteral};
use diesel::helper_types::InnerJoinQuerySource;
use diesel::pg::Pg;
use diesel::sql_types::{Bool, Integer, Text};
use diesel::{
    define_sql_function, BoolExpressionMethods, ExpressionMethods, IntoSql,
    NullableExpressionMethods, OptionalExtension, PgTextExpressionMethods, QueryDsl, SelectableHelper,
};
use diesel_async::RunQueryDsl;
use tracing::{debug, instrument};
use uuid::Uuid;

type PartSource =
    InnerJoinQuerySource<InnerJoinQuerySource<part::table, vehicle::table>, seller::table>;

/// `BoxableExpression` already requires `Send`, so the boxed tree can cross awaits.
pub type BoxedPredicate = Box<dyn BoxableExpression<PartSource, Pg, SqlType = Bool>>;

define_sql_function! {
    fn lower(x: Text) -> Text;
}

/// Escapes `LIKE` metacharacters so user text only ever matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

/// Band index of `part.price` against ascending `edges`: 0 below the first edge, `i` for
/// `edges[i - 1] <= price < edges[i]`. Edges are server constants, never user input.
fn price_band(edges: &[f64]) -> SqlLiteral<Integer> {
    let thresholds = edges
        .iter()
        .map(|edge| edge.to_string())
        .collect::<Vec<_>>()
        .join(",");
    sql::<Integer>(&format!(
        "width_bucket(\"part\".\"price\", ARRAY[{thresholds}]::float8[])"
    ))
}

/// Compiles a predicate into a boxed diesel expression over the joined source.
pub fn compile(predicate: &Predicate) -> BoxedPredicate {
    match predicate {
        Predicate::And(children) => children
            .iter()
            .map(compile)
            .reduce(|acc, next| Box::new(acc.and(next)))
            .unwrap_or_else(|| Box::new(true.into_sql::<Bool>())),
        Predicate::Or(children) => children
            .iter()
            .map(compile)
            .reduce(|acc, next| Box::new(acc.or(next)))
            .unwrap_or_else(|| Box::new(false.into_sql::<Bool>())),
        Predicate::Contains(TextField::Name, needle) => {
            Box::new(part::name.ilike(contains_pattern(needle)))
        }
        Predicate::Contains(TextField::Description, needle) => {
            Box::new(part::description.ilike(contains_pattern(needle)))
        }
        Predicate::Contains(TextField::PartNumber, needle) => {
            Box::new(part::part_number.ilike(contains_pattern(needle)))
        }
        Predicate::YearEq(year) => Box::new(vehicle::year.eq(*year)),
        Predicate::MakeEq(make) => Box::new(vehicle::make.ilike(escape_like(make))),
        Predicate::ModelEq(model) => Box::new(vehicle::model.ilike(escape_like(model))),
        Predicate::PriceAtLeast(min) => Box::new(part::price.ge(*min)),
        Predicate::PriceAtMost(max) => Box::new(part::price.le(*max)),
        Predicate::ConditionIn(conditions) => Box::new(
            part::condition.eq_any(
                conditions
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect::<Vec<_>>(),
            ),
        ),
        Predicate::ProvinceEq(province) => Box::new(seller::province.ilike(escape_like(province))),
        Predicate::CityEq(city) => Box::new(seller::city.ilike(escape_like(city))),
        Predicate::SellerTypeIn(types) => Box::new(
            seller::business_type.eq_any(
                types
                    .iter()
                    .map(|t| t.as_str().to_string())
                    .collect::<Vec<_>>(),
            ),
        ),
        Predicate::SellerVerified => Box::new(seller::is_verified.eq(true)),
        Predicate::StatusIs(status) => Box::new(part::status.eq(status.as_str().to_string())),
        Predicate::ListedOnMarketplace => Box::new(part::is_listed_on_marketplace.eq(true)),
    }
}

pub struct PgPartStore {
    pool: PgPool,
}

impl PgPartStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartStore for PgPartStore {
    #[instrument(skip_all)]
    async fn find(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        page: Page,
    ) -> Result<Vec<PartRow>, StoreError> {
        let mut conn = self.pool.get().await?;
        let query = part::table
            .inner_join(vehicle::table)
            .inner_join(seller::table)
            .filter(compile(predicate))
            .select((Part::as_select(), Vehicle::as_select(), Seller::as_select()))
            .offset(page.skip())
            .limit(page.take())
            .into_boxed();
        let query = match sort {
            SortOrder::Newest => query.order((part::created_at.desc(), part::id.asc())),
            SortOrder::PriceAsc => query.order((part::price.asc(), part::id.asc())),
            SortOrder::PriceDesc => query.order((part::price.desc(), part::id.asc())),
            SortOrder::YearDesc => query.order((vehicle::year.desc(), part::id.asc())),
        };
        let rows = query.load::<PartRow>(&mut conn).await?;
        debug!("loaded `{}` parts for page `{}`", rows.len(), page.page());
        Ok(rows)
    }

    #[instrument(skip_all)]
    async fn count(&self, predicate: &Predicate) -> Result<u64, StoreError> {
        let mut conn = self.pool.get().await?;
        let total = part::table
            .inner_join(vehicle::table)
            .inner_join(seller::table)
            .filter(compile(predicate))
            .count()
            .get_result::<i64>(&mut conn)
            .await?;
        Ok(total.max(0) as u64)
    }

    #[instrument(skip(self, predicate))]
    async fn group_count(
        &self,
        predicate: &Predicate,
        field: GroupField,
    ) -> Result<Vec<(String, u64)>, StoreError> {
        let mut conn = self.pool.get().await?;
        let source = part::table
            .inner_join(vehicle::table)
            .inner_join(seller::table)
            .filter(compile(predicate));
        let groups = match field {
            GroupField::Make => {
                source
                    .group_by(lower(vehicle::make))
                    .select((min(vehicle::make), count_star()))
                    .load::<(Option<String>, i64)>(&mut conn)
                    .await?
            }
            GroupField::Model => {
                source
                    .group_by(lower(vehicle::model))
                    .select((min(vehicle::model), count_star()))
                    .load::<(Option<String>, i64)>(&mut conn)
                    .await?
            }
            GroupField::Condition => {
                source
                    .group_by(part::condition)
                    .select((part::condition.nullable(), count_star()))
                    .load::<(Option<String>, i64)>(&mut conn)
                    .await?
            }
        };
        Ok(groups
            .into_iter()
            .filter_map(|(value, count)| value.map(|v| (v, count.max(0) as u64)))
            .collect())
    }

    #[instrument(skip(self, predicate))]
    async fn price_histogram(
        &self,
        predicate: &Predicate,
        edges: &[f64],
    ) -> Result<Vec<u64>, StoreError> {
        let mut conn = self.pool.get().await?;
        let bands = part::table
            .inner_join(vehicle::table)
            .inner_join(seller::table)
            .filter(compile(predicate))
            .group_by(price_band(edges))
            .select((price_band(edges), count_star()))
            .load::<(i32, i64)>(&mut conn)
            .await?;

        let mut counts = vec![0; edges.len() + 1];
        for (band, count) in bands {
            if let Some(slot) = usize::try_from(band).ok().and_then(|b| counts.get_mut(b)) {
                *slot = count.max(0) as u64;
            }
        }
        Ok(counts)
    }

    #[instrument(skip(self, predicate))]
    async fn find_one(
        &self,
        id: Uuid,
        predicate: &Predicate,
    ) -> Result<Option<PartRow>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row = part::table
            .inner_join(vehicle::table)
            .inner_join(seller::table)
            .filter(part::id.eq(id))
            .filter(compile(predicate))
            .select((Part::as_select(), Vehicle::as_select(), Seller::as_select()))
            .first::<PartRow>(&mut conn)
            .await
            .optional()?;
        Ok(row)
    }
}
