use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    entities::{movie, user_preference},
    error::AppResult,
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> AppResult<Vec<movie::Model>> {
        let movies =
            movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(movies)
    }

    /// Drops the whole cache and inserts the new set as one transaction.
    /// Rows are never updated individually.
    pub async fn replace_all(&self, movies: Vec<movie::Model>) -> AppResult<()> {
        let txn = self.db.begin().await?;

        movie::Entity::delete_many().exec(&txn).await?;

        for m in movies {
            let model = movie::ActiveModel {
                id: Set(m.id),
                title: Set(m.title),
                description: Set(m.description),
                image_url: Set(m.image_url),
                rating: Set(m.rating),
                year: Set(m.year),
                genres: Set(m.genres),
                created_at: Set(m.created_at),
            };
            movie::Entity::insert(model).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PreferenceStore {
    db: DatabaseConnection,
}

impl PreferenceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Atomic insert-or-update keyed on (user_id, movie_id), backed by the
    /// unique index. Last write wins; created_at keeps the original value.
    pub async fn upsert(&self, user_id: &str, movie_id: i32, rating: i32) -> AppResult<()> {
        let model = user_preference::ActiveModel {
            id: Default::default(),
            user_id: Set(user_id.to_string()),
            movie_id: Set(movie_id),
            rating: Set(rating),
            created_at: Set(now_sec()),
        };

        user_preference::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    user_preference::Column::UserId,
                    user_preference::Column::MovieId,
                ])
                .update_columns([user_preference::Column::Rating])
                .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }

    pub async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<user_preference::Model>> {
        let rows = user_preference::Entity::find()
            .filter(user_preference::Column::UserId.eq(user_id))
            .order_by_asc(user_preference::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}

pub fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
