use sea_orm::{EntityName, Schema};
use sea_orm_migration::prelude::*;

use crate::entity::{
    Events, Orders, Organizers, TicketPurchases, TicketTypes, Users, events, ticket_purchases,
    ticket_types,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Parents first so every foreign key has a target table. Counts carry
        // CHECKs: capacity and stock are non-negative, a purchase holds a ticket.
        manager
            .create_table(schema.create_table_from_entity(Users))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Organizers))
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(Events)
                    .check(Expr::col(events::Column::Capacity).gte(0))
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(TicketTypes)
                    .check(Expr::col(ticket_types::Column::QuantityAvailable).gte(0))
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(schema.create_table_from_entity(Orders))
            .await?;
        manager
            .create_table(
                schema
                    .create_table_from_entity(TicketPurchases)
                    .check(Expr::col(ticket_purchases::Column::Quantity).gte(1))
                    .to_owned(),
            )
            .await?;

        let indexes = [
            schema.create_index_from_entity(Events),
            schema.create_index_from_entity(TicketTypes),
            schema.create_index_from_entity(Orders),
            schema.create_index_from_entity(TicketPurchases),
        ];
        for index in indexes.into_iter().flatten() {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let tables = [
            TicketPurchases.table_ref(),
            Orders.table_ref(),
            TicketTypes.table_ref(),
            Events.table_ref(),
            Organizers.table_ref(),
            Users.table_ref(),
        ];
        for table in tables {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}
