use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create event_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(EventStatus::Enum)
                    .values([
                        EventStatus::Draft,
                        EventStatus::Published,
                        EventStatus::BeganEnrollment,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create events table
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk_uuid(Events::Id))
                    .col(string(Events::Name))
                    .col(text(Events::Description).default(""))
                    .col(timestamp_with_time_zone(Events::BeginEnrollmentAt))
                    .col(timestamp_with_time_zone(Events::CloseEnrollmentAt))
                    .col(timestamp_with_time_zone(Events::BeginEventAt))
                    .col(timestamp_with_time_zone(Events::EndEventAt))
                    .col(text_null(Events::Location))
                    .col(integer(Events::BasePrice).default(0))
                    .col(integer(Events::MaxPrice).default(0))
                    .col(integer(Events::LimitOfEnrollment).default(0))
                    .col(boolean(Events::Free).default(false))
                    .col(boolean(Events::Offline).default(false))
                    .col(
                        ColumnDef::new(Events::Status)
                            .enumeration(
                                EventStatus::Enum,
                                [
                                    EventStatus::Draft,
                                    EventStatus::Published,
                                    EventStatus::BeganEnrollment,
                                ],
                            )
                            .not_null()
                            .default("draft"),
                    )
                    .col(uuid(Events::ManagerId))
                    .col(
                        timestamp_with_time_zone(Events::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Events::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_manager_id")
                            .from(Events::Table, Events::ManagerId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_events_manager_id")
                    .table(Events::Table)
                    .col(Events::ManagerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_status")
                    .table(Events::Table)
                    .col(Events::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_created_at")
                    .table(Events::Table)
                    .col(Events::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Add updated_at trigger
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER events_touch_updated_at
                    BEFORE UPDATE ON events
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS events_touch_updated_at ON events")
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(EventStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
    BeginEnrollmentAt,
    CloseEnrollmentAt,
    BeginEventAt,
    EndEventAt,
    Location,
    BasePrice,
    MaxPrice,
    LimitOfEnrollment,
    Free,
    Offline,
    Status,
    ManagerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum EventStatus {
    #[sea_orm(iden = "event_status")]
    Enum,
    #[sea_orm(iden = "draft")]
    Draft,
    #[sea_orm(iden = "published")]
    Published,
    #[sea_orm(iden = "began_enrollment")]
    BeganEnrollment,
}
