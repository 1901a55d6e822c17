use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Detail pages look shows up by venue or artist
        manager
            .create_index(
                Index::create()
                    .name("idx_show_venue_id")
                    .table("show")
                    .col("venue_id")
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_show_artist_id")
                    .table("show")
                    .col("artist_id")
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Directory view groups venues by city
        manager
            .create_index(
                Index::create()
                    .name("idx_venue_city")
                    .table("venue")
                    .col("city")
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_venue_city").table("venue").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_show_artist_id").table("show").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_show_venue_id").table("show").to_owned())
            .await?;

        Ok(())
    }
}
