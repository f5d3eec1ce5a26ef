use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202610010003_create_sessions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("sessions"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("quarter_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("session_number")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("session_date")).date().not_null())
                    .col(ColumnDef::new(Alias::new("start_time")).time().not_null())
                    .col(ColumnDef::new(Alias::new("end_time")).time().not_null())
                    .col(ColumnDef::new(Alias::new("is_completed")).boolean().not_null().default(false))
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("deleted_at")).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_quarter")
                            .from(Alias::new("sessions"), Alias::new("quarter_id"))
                            .to(Alias::new("quarters"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_quarter_number")
                    .table(Alias::new("sessions"))
                    .col(Alias::new("quarter_id"))
                    .col(Alias::new("session_number"))
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("sessions")).to_owned())
            .await
    }
}
