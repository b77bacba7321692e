use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artist::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artist::Name).string_len(120).not_null().unique_key())
                    .col(ColumnDef::new(Artist::City).string_len(80).not_null())
                    .col(ColumnDef::new(Artist::State).string_len(2).not_null())
                    .col(ColumnDef::new(Artist::Phone).string_len(15).null().unique_key())
                    .col(ColumnDef::new(Artist::ImageLink).string_len(500).null().unique_key())
                    .col(ColumnDef::new(Artist::FacebookLink).string_len(120).null().unique_key())
                    .col(ColumnDef::new(Artist::Website).string_len(120).null().unique_key())
                    .col(
                        ColumnDef::new(Artist::SeekingVenue)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Artist::SeekingDescription).string_len(500).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artist::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Artist {
    Table,
    Id,
    Name,
    City,
    State,
    Phone,
    ImageLink,
    FacebookLink,
    Website,
    SeekingVenue,
    SeekingDescription,
}
