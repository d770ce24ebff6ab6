use chrono::Utc;
use sea_orm::*;

use crate::error::AppError;
use crate::models::dto::{PostPatch, PostRequest};
use crate::models::{blog_post, users};
use crate::services::{ensure_exists, find_or_404};

pub struct PostService;

impl PostService {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<blog_post::Model>, AppError> {
        Ok(blog_post::Entity::find()
            .order_by_asc(blog_post::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<blog_post::Model, AppError> {
        find_or_404::<blog_post::Entity, _>(db, id, "Post").await
    }

    pub async fn create(db: &DatabaseConnection, request: PostRequest) -> Result<blog_post::Model, AppError> {
        ensure_exists::<users::Entity, _>(db, request.author, "author").await?;

        let post = blog_post::ActiveModel {
            author_id: Set(request.author),
            title: Set(request.title),
            content: Set(request.content),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(id = post.id, author = post.author_id, "blog post published");
        Ok(post)
    }

    pub async fn patch(
        db: &DatabaseConnection,
        id: i32,
        patch: PostPatch,
    ) -> Result<blog_post::Model, AppError> {
        let post = Self::get(db, id).await?;
        if let Some(author) = patch.author {
            ensure_exists::<users::Entity, _>(db, author, "author").await?;
        }

        let mut active: blog_post::ActiveModel = post.into();
        if let Some(v) = patch.author {
            active.author_id = Set(v);
        }
        if let Some(v) = patch.title {
            active.title = Set(v);
        }
        if let Some(v) = patch.content {
            active.content = Set(v);
        }

        Ok(active.update(db).await?)
    }
}
