//! Expense entity - Money paid out by the church.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Amount paid
    pub amount: f64,
    /// Date paid
    pub expense_date: Date,
    /// Id into `expense_categories`; may not resolve
    pub category_id: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Member who incurred or was reimbursed for the expense
    pub member_id: Option<i64>,
}

/// Expense has no foreign-key relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
