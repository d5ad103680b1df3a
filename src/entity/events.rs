use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(indexed)]
    pub organizer_id: i32,
    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,
    pub location: String,
    pub is_published: bool,
    /// Hard ceiling on tickets sold; `None` defers to the ticket types' stock.
    pub capacity: Option<i32>,
    /// Minor units (cents).
    pub base_ticket_price: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizers::Entity",
        from = "Column::OrganizerId",
        to = "super::organizers::Column::Id",
        on_delete = "Cascade"
    )]
    Organizers,
    #[sea_orm(has_many = "super::ticket_types::Entity")]
    TicketTypes,
}

impl Related<super::organizers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizers.def()
    }
}

impl Related<super::ticket_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            is_published: Set(false),
            ..ActiveModelTrait::default()
        }
    }
}
