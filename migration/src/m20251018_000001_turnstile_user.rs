use sea_orm_migration::{prelude::*, schema::*};

static IDX_TURNSTILE_USER_REMEMBER_TOKEN: &str = "idx-turnstile_user-remember_token";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TurnstileUser::Table)
                    .if_not_exists()
                    .col(pk_auto(TurnstileUser::Id))
                    .col(string_uniq(TurnstileUser::Email))
                    .col(string(TurnstileUser::EncryptedPassword))
                    .col(boolean(TurnstileUser::EmailConfirmed).default(false))
                    .col(string_null(TurnstileUser::ConfirmationToken))
                    .col(string_null(TurnstileUser::RememberToken))
                    .col(timestamp(TurnstileUser::CreatedAt))
                    .col(timestamp(TurnstileUser::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TURNSTILE_USER_REMEMBER_TOKEN)
                    .table(TurnstileUser::Table)
                    .col(TurnstileUser::RememberToken)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TURNSTILE_USER_REMEMBER_TOKEN)
                    .table(TurnstileUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TurnstileUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TurnstileUser {
    Table,
    Id,
    Email,
    EncryptedPassword,
    EmailConfirmed,
    ConfirmationToken,
    RememberToken,
    CreatedAt,
    UpdatedAt,
}
