use sea_orm::*;

use crate::error::AppError;
use crate::models::dto::{FaqPatch, FaqRequest};
use crate::models::faq;
use crate::services::find_or_404;

pub struct FaqService;

impl FaqService {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<faq::Model>, AppError> {
        Ok(faq::Entity::find().order_by_asc(faq::Column::Id).all(db).await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<faq::Model, AppError> {
        find_or_404::<faq::Entity, _>(db, id, "FAQ").await
    }

    pub async fn create(db: &DatabaseConnection, request: FaqRequest) -> Result<faq::Model, AppError> {
        let created = faq::ActiveModel {
            question: Set(request.question),
            answer: Set(request.answer),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(created)
    }

    pub async fn patch(db: &DatabaseConnection, id: i32, patch: FaqPatch) -> Result<faq::Model, AppError> {
        let mut active: faq::ActiveModel = Self::get(db, id).await?.into();
        if let Some(v) = patch.question {
            active.question = Set(v);
        }
        if let Some(v) = patch.answer {
            active.answer = Set(v);
        }

        Ok(active.update(db).await?)
    }
}
