//! Movie entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub director: String,

    /// Release year
    pub year: i32,

    pub genre: String,

    /// 0.0 - 10.0, one decimal place. Stored as REAL.
    pub rating: Option<f64>,

    #[sea_orm(column_type = "Text", nullable)]
    pub synopsis: Option<String>,

    pub poster_url: Option<String>,

    /// Default sort key, newest first
    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
