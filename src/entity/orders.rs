use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `None` for anonymous checkouts and for customers that were since deleted.
    #[sea_orm(indexed)]
    pub customer_id: Option<i32>,
    pub order_date: DateTimeUtc,
    /// Minor units (cents).
    pub total_amount: i64,
    pub is_paid: bool,
    pub discount_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Users,
    #[sea_orm(has_many = "super::ticket_purchases::Entity")]
    TicketPurchases,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::ticket_purchases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketPurchases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    /// Stamps `order_date` at creation; `..Default::default()` goes through here.
    fn new() -> Self {
        Self {
            order_date: Set(chrono::Utc::now()),
            total_amount: Set(0),
            is_paid: Set(false),
            ..ActiveModelTrait::default()
        }
    }
}
