use sea_orm::entity::prelude::*;

use super::enums::InsightType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ai_insights")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub insight_type: InsightType,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub confidence: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for insighto_core::domain::AiInsight {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            insight_type: model.insight_type.into(),
            title: model.title,
            description: model.description,
            confidence: model.confidence,
            created_at: model.created_at.into(),
        }
    }
}
