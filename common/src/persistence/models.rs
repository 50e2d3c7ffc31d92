pub mod marketplace {
    use diesel::prelude::*;
    use uuid::Uuid;

    #[derive(Queryable, Selectable, Identifiable, Insertable, Clone, Debug)]
    #[diesel(table_name = crate::persistence::schema::seller)]
    #[diesel(check_for_backend(diesel::pg::Pg))]
    pub struct Seller {
        pub id: Uuid,
        pub business_name: String,
        pub business_type: String,
        pub province: String,
        pub city: String,
        pub is_verified: bool,
        pub created_at: chrono::NaiveDateTime,
    }

    #[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Clone, Debug)]
    #[diesel(table_name = crate::persistence::schema::vehicle)]
    #[diesel(belongs_to(Seller))]
    #[diesel(check_for_backend(diesel::pg::Pg))]
    pub struct Vehicle {
        pub id: Uuid,
        pub seller_id: Uuid,
        pub year: i32,
        pub make: String,
        pub model: String,
        pub variant: Option<String>,
        pub created_at: chrono::NaiveDateTime,
    }

    #[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Clone, Debug)]
    #[diesel(table_name = crate::persistence::schema::part)]
    #[diesel(belongs_to(Seller))]
    #[diesel(belongs_to(Vehicle))]
    #[diesel(check_for_backend(diesel::pg::Pg))]
    pub struct Part {
        pub id: Uuid,
        pub seller_id: Uuid,
        pub vehicle_id: Uuid,
        pub name: String,
        pub description: String,
        pub part_number: String,
        pub price: f64,
        pub condition: String,
        pub status: String,
        pub is_listed_on_marketplace: bool,
        pub created_at: chrono::NaiveDateTime,
        pub updated_at: chrono::NaiveDateTime,
    }

    /// One row of `part INNER JOIN vehicle INNER JOIN seller`.
    pub type PartRow = (Part, Vehicle, Seller);
}
