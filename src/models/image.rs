use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Diesel model representing the `images` table. Rows are owned exclusively
/// by one product and replaced wholesale when its images change.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::images)]
pub struct Image {
    pub id: i32,
    pub product_id: i32,
    pub url: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Image`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::images)]
pub struct NewImage {
    pub product_id: i32,
    pub url: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
