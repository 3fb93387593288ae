use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(products_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

fn products_table() -> TableCreateStatement {
    Table::create()
        .table(Products::Table)
        .if_not_exists()
        // Server-generated, starting at 1
        .col(
            ColumnDef::new(Products::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(text_null(Products::Name))
        .col(double_null(Products::Price))
        .col(json_binary(Products::Attributes).default("{}"))
        .to_owned()
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    Attributes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_table_sql() {
        let sql = products_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"CREATE TABLE IF NOT EXISTS "products""#));
        assert!(sql.contains(r#""id" bigint GENERATED BY DEFAULT AS IDENTITY"#));
        assert!(sql.contains("PRIMARY KEY"));
        assert!(sql.contains(r#""attributes" jsonb"#));
        assert!(sql.contains("DEFAULT '{}'"));
    }
}
