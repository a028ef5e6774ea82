//! Income entity - Money received that is not itself a donation row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "income")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Amount received
    pub amount: f64,
    /// Date received
    pub income_date: Date,
    /// Id into `income_categories`; may not resolve
    pub category_id: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Donation this income was derived from
    pub donation_id: Option<i64>,
}

/// Income has no foreign-key relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
