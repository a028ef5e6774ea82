//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the backend tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attendance;
pub mod donation;
pub mod event;
pub mod expense;
pub mod expense_category;
pub mod income;
pub mod income_category;
pub mod member;
pub mod prayer_request;
pub mod sermon;
pub mod small_group;
pub mod small_group_member;

// Re-export specific types to avoid conflicts
pub use attendance::{Column as AttendanceColumn, Entity as Attendance, Model as AttendanceModel};
pub use donation::{Column as DonationColumn, Entity as Donation, Model as DonationModel};
pub use event::{Column as EventColumn, Entity as Event, Model as EventModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use expense_category::{
    Column as ExpenseCategoryColumn, Entity as ExpenseCategory, Model as ExpenseCategoryModel,
};
pub use income::{Column as IncomeColumn, Entity as Income, Model as IncomeModel};
pub use income_category::{
    Column as IncomeCategoryColumn, Entity as IncomeCategory, Model as IncomeCategoryModel,
};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
pub use prayer_request::{
    Column as PrayerRequestColumn, Entity as PrayerRequest, Model as PrayerRequestModel,
};
pub use sermon::{Column as SermonColumn, Entity as Sermon, Model as SermonModel};
pub use small_group::{Column as SmallGroupColumn, Entity as SmallGroup, Model as SmallGroupModel};
pub use small_group_member::{
    Column as SmallGroupMemberColumn, Entity as SmallGroupMember,
    Model as SmallGroupMemberModel,
};
