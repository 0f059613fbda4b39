use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::PgConnection;
use tokio::task;
use uuid::Uuid;

use crate::log_debug;
use crate::modules::review::domain::entities::Review;
use crate::modules::review::domain::repositories::{ReviewQuery, ReviewRepository};
use crate::modules::review::infrastructure::models::{
    image_rows, NewReview, ReviewChangeset, ReviewImageRow, ReviewModel,
};
use crate::schema::{review_images, reviews};
use crate::shared::application::PageRequest;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::run_in_transaction;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::shared::Database;

pub struct ReviewRepositoryImpl {
    db: Arc<Database>,
}

impl ReviewRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// One query for every review's images, regrouped in the order of `models`.
    fn load_with_images(conn: &mut PgConnection, models: Vec<ReviewModel>) -> AppResult<Vec<Review>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let images = ReviewImageRow::belonging_to(&models)
            .select(ReviewImageRow::as_select())
            .order(review_images::position.asc())
            .load::<ReviewImageRow>(conn)?
            .grouped_by(&models);

        models
            .into_iter()
            .zip(images)
            .map(|(model, images)| model.into_entity(images))
            .collect()
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn save(&self, review: &Review) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let review = review.clone();

        task::spawn_blocking(move || -> AppResult<()> {
            let timer = TimedOperation::new("save_review");
            let mut conn = db.get_connection()?;
            let images = image_rows(&review);

            run_in_transaction(&mut conn, "save_review", |conn| {
                diesel::insert_into(reviews::table)
                    .values(NewReview::from(&review))
                    .on_conflict(reviews::id)
                    .do_update()
                    .set(ReviewChangeset::from(&review))
                    .execute(conn)?;

                diesel::delete(review_images::table.filter(review_images::review_id.eq(review.id())))
                    .execute(conn)?;

                if !images.is_empty() {
                    diesel::insert_into(review_images::table)
                        .values(&images)
                        .execute(conn)?;
                }
                Ok(())
            })?;

            log_debug!("Saved review {} with {} images", review.id(), images.len());
            timer.finish_with_info(&review.id().to_string());
            Ok(())
        })
        .await?
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Review> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Review> {
            let mut conn = db.get_connection()?;

            let model = reviews::table
                .find(id)
                .select(ReviewModel::as_select())
                .first(&mut conn)
                .optional()?
                .ok_or_else(|| AppError::NotFound(format!("Review {} not found", id)))?;

            Self::load_with_images(&mut conn, vec![model])?
                .into_iter()
                .next()
                .ok_or_else(|| AppError::NotFound(format!("Review {} not found", id)))
        })
        .await?
    }

    async fn find_all(&self) -> AppResult<Vec<Review>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Review>> {
            let mut conn = db.get_connection()?;

            let models = reviews::table
                .order((reviews::created_at.desc(), reviews::id.desc()))
                .select(ReviewModel::as_select())
                .load(&mut conn)?;

            Self::load_with_images(&mut conn, models)
        })
        .await?
    }

    async fn find_all_with_limit(&self, page: PageRequest) -> AppResult<Vec<Review>> {
        self.find_recent_reviews(ReviewQuery {
            page,
            ..Default::default()
        })
        .await
    }

    async fn find_recent_reviews(&self, query: ReviewQuery) -> AppResult<Vec<Review>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Review>> {
            let start = std::time::Instant::now();
            let mut conn = db.get_connection()?;

            let mut select = reviews::table.into_boxed();
            if let Some(after) = query.after {
                select = select.filter(reviews::created_at.ge(after));
            }
            if let Some(before) = query.before {
                select = select.filter(reviews::created_at.le(before));
            }
            if let Some(shop_id) = query.shop_id {
                select = select.filter(reviews::shop_id.eq(shop_id));
            }
            if let Some(author) = query.author {
                select = select.filter(reviews::author.eq(String::from(author)));
            }

            let models = select
                .order((reviews::created_at.desc(), reviews::id.desc()))
                .limit(query.page.limit)
                .offset(query.page.offset)
                .select(ReviewModel::as_select())
                .load(&mut conn)?;
            let result = Self::load_with_images(&mut conn, models)?;

            LogContext::db_operation(
                "find_recent_reviews",
                "reviews",
                Some(start.elapsed().as_millis() as u64),
            );
            Ok(result)
        })
        .await?
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;

            run_in_transaction(&mut conn, "delete_review", |conn| {
                diesel::delete(review_images::table.filter(review_images::review_id.eq(id)))
                    .execute(conn)?;

                let deleted = diesel::delete(reviews::table.find(id)).execute(conn)?;
                if deleted == 0 {
                    return Err(AppError::NotFound(format!("Review {} not found", id)));
                }
                Ok(())
            })?;

            log_debug!("Deleted review {}", id);
            Ok(())
        })
        .await?
    }
}
