//! Income category entity - Authoritative list of income categories.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "income_categories")]
pub struct Model {
    /// UUID text identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// `IncomeCategory` has no foreign-key relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
