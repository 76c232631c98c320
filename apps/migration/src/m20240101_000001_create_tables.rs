use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Name).string())
                    .col(ColumnDef::new(Users::Image).string())
                    .col(
                        ColumnDef::new(Users::Timezone)
                            .string()
                            .not_null()
                            .default("UTC"),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LinkedIdentities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LinkedIdentities::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LinkedIdentities::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(LinkedIdentities::Provider)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LinkedIdentities::ProviderAccountId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LinkedIdentities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LinkedIdentities::Table, LinkedIdentities::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_linked_identities_provider_account")
                    .table(LinkedIdentities::Table)
                    .col(LinkedIdentities::Provider)
                    .col(LinkedIdentities::ProviderAccountId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SocialAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SocialAccounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SocialAccounts::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(SocialAccounts::Platform)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SocialAccounts::AccountId).string().not_null())
                    .col(ColumnDef::new(SocialAccounts::Username).string())
                    .col(ColumnDef::new(SocialAccounts::AccessToken).text().not_null())
                    .col(ColumnDef::new(SocialAccounts::RefreshToken).text())
                    .col(
                        ColumnDef::new(SocialAccounts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SocialAccounts::ConnectedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(SocialAccounts::LastSyncAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(SocialAccounts::Table, SocialAccounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One account per platform per user.
        manager
            .create_index(
                Index::create()
                    .name("idx_social_accounts_user_platform")
                    .table(SocialAccounts::Table)
                    .col(SocialAccounts::UserId)
                    .col(SocialAccounts::Platform)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::SocialAccountId).uuid().not_null())
                    .col(ColumnDef::new(Posts::PostId).string().not_null())
                    .col(ColumnDef::new(Posts::Content).text())
                    .col(
                        ColumnDef::new(Posts::PostType)
                            .string_len(16)
                            .not_null()
                            .default("text"),
                    )
                    .col(
                        ColumnDef::new(Posts::PostDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::LikesCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Posts::CommentsCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Posts::SharesCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Posts::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Posts::Table, Posts::SocialAccountId)
                            .to(SocialAccounts::Table, SocialAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_account_post")
                    .table(Posts::Table)
                    .col(Posts::SocialAccountId)
                    .col(Posts::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_account_date")
                    .table(Posts::Table)
                    .col(Posts::SocialAccountId)
                    .col(Posts::PostDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AnalyticsResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnalyticsResults::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AnalyticsResults::PostId).uuid().not_null())
                    .col(ColumnDef::new(AnalyticsResults::Metric).string().not_null())
                    .col(ColumnDef::new(AnalyticsResults::Value).double().not_null())
                    .col(
                        ColumnDef::new(AnalyticsResults::ComputedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnalyticsResults::Table, AnalyticsResults::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AiInsights::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AiInsights::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(AiInsights::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(AiInsights::InsightType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiInsights::Title).string().not_null())
                    .col(ColumnDef::new(AiInsights::Description).text().not_null())
                    .col(ColumnDef::new(AiInsights::Confidence).double().not_null())
                    .col(
                        ColumnDef::new(AiInsights::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AiInsights::Table, AiInsights::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiInsights::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnalyticsResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SocialAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LinkedIdentities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    Image,
    Timezone,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LinkedIdentities {
    Table,
    Id,
    UserId,
    Provider,
    ProviderAccountId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SocialAccounts {
    Table,
    Id,
    UserId,
    Platform,
    AccountId,
    Username,
    AccessToken,
    RefreshToken,
    IsActive,
    ConnectedAt,
    LastSyncAt,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    SocialAccountId,
    PostId,
    Content,
    PostType,
    PostDate,
    LikesCount,
    CommentsCount,
    SharesCount,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AnalyticsResults {
    Table,
    Id,
    PostId,
    Metric,
    Value,
    ComputedAt,
}

#[derive(DeriveIden)]
enum AiInsights {
    Table,
    Id,
    UserId,
    InsightType,
    Title,
    Description,
    Confidence,
    CreatedAt,
}
