use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub discord_id: String,
    pub applied_role: String,
    pub display_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub discord: String,
    pub region: String,
    pub availability: String,
    pub legal_name: String,
    pub birth_location: String,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
    pub game: String,
    pub peak_rank: String,
    pub proof: String,
    #[sea_orm(column_type = "Text")]
    pub experience: String,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub hr_review: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
