//! Initial schema.
//!
//! Tables are generated from the entity definitions so the same migration
//! runs on PostgreSQL and on the SQLite test databases.

use sea_orm::{EntityTrait, Schema};
use sea_orm_migration::prelude::*;

use crate::entities::{budgets, categories, roles, transactions, users};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_table<E>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        create_table(manager, &schema, roles::Entity).await?;
        create_table(manager, &schema, users::Entity).await?;
        create_table(manager, &schema, categories::Entity).await?;
        create_table(manager, &schema, transactions::Entity).await?;
        create_table(manager, &schema, budgets::Entity).await?;

        // Budget usage recomputation and listing filters
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_category_month")
                    .table(transactions::Entity)
                    .col(transactions::Column::CategoryId)
                    .col(transactions::Column::Month)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_created_at")
                    .table(transactions::Entity)
                    .col(transactions::Column::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_budgets_category_month")
                    .table(budgets::Entity)
                    .col(budgets::Column::CategoryId)
                    .col(budgets::Column::Month)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_budgets_parent")
                    .table(budgets::Entity)
                    .col(budgets::Column::ParentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_categories_parent")
                    .table(categories::Entity)
                    .col(categories::Column::ParentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(budgets::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(transactions::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(categories::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(users::Entity).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(roles::Entity).if_exists().to_owned())
            .await
    }
}
