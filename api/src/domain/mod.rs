use common::persistence::models::marketplace::{Part, PartRow, Seller, Vehicle};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Error, Debug)]
#[error("unknown {kind} value stored: `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $repr:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $repr),+
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = UnknownVariant;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value {
                    $($repr => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum!(
    /// Physical condition a seller grades a part with.
    PartCondition, "part condition" {
        New => "NEW",
        Excellent => "EXCELLENT",
        Good => "GOOD",
        Fair => "FAIR",
        Poor => "POOR",
    }
);

string_enum!(
    PartStatus, "part status" {
        Available => "AVAILABLE",
        Reserved => "RESERVED",
        Sold => "SOLD",
        Archived => "ARCHIVED",
    }
);

string_enum!(
    /// Kind of business behind a seller account.
    BusinessType, "business type" {
        Scrapyard => "SCRAPYARD",
        Dismantler => "DISMANTLER",
        Dealer => "DEALER",
        Private => "PRIVATE",
    }
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    YearDesc,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartListing {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub part_number: String,
    pub price: f64,
    pub condition: PartCondition,
    #[schema(value_type = String, example = "2025-10-13T15:30:00")]
    pub created_at: chrono::NaiveDateTime,
    pub vehicle: VehicleSummary,
    pub seller: SellerSummary,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: Uuid,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub variant: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerSummary {
    pub id: Uuid,
    pub business_name: String,
    pub business_type: BusinessType,
    pub province: String,
    pub city: String,
}

impl From<Vehicle> for VehicleSummary {
    fn from(value: Vehicle) -> Self {
        Self {
            id: value.id,
            year: value.year,
            make: value.make,
            model: value.model,
            variant: value.variant,
        }
    }
}

impl TryFrom<Seller> for SellerSummary {
    type Error = UnknownVariant;

    fn try_from(value: Seller) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            business_type: BusinessType::try_from(value.business_type.as_str())?,
            business_name: value.business_name,
            province: value.province,
            city: value.city,
        })
    }
}

impl TryFrom<PartRow> for PartListing {
    type Error = UnknownVariant;

    fn try_from((part, vehicle, seller): PartRow) -> Result<Self, Self::Error> {
        let Part {
            id,
            name,
            description,
            part_number,
            price,
            condition,
            created_at,
            ..
        } = part;
        Ok(Self {
            id,
            name,
            description,
            part_number,
            price,
            condition: PartCondition::try_from(condition.as_str())?,
            created_at,
            vehicle: vehicle.into(),
            seller: seller.try_into()?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: SearchResults,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub parts: Vec<PartListing>,
    pub total_count: u64,
    pub facets: Facets,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub makes: Vec<FacetCount>,
    pub models: Vec<FacetCount>,
    pub conditions: Vec<FacetCount>,
    pub price_ranges: Vec<PriceRangeCount>,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct PriceRangeCount {
    pub label: String,
    pub min: f64,
    pub max: Option<f64>,
    pub count: u64,
}
