//! Answers to questions, one per user, image and question.

use chrono::Utc;

use super::{bump, get, in_scope, take, Catalog};
use super::{Answer, Id};
use crate::error::{CatalogError, CatalogResult};

impl Catalog {
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Record a user's answer, replacing any earlier answer the same user gave
    /// to the same question on the same image.
    ///
    /// The option must belong to the question and the question must apply to
    /// the image's type.
    pub fn answer(
        &mut self,
        user_id: Id,
        image_id: Id,
        question_id: Id,
        option_id: Id,
    ) -> CatalogResult<Answer> {
        get(&self.users, user_id)?;
        let image = get(&self.images, image_id)?;
        let question = get(&self.questions, question_id)?;
        let option = get(&self.options, option_id)?;

        if option.question_id != question_id {
            return Err(CatalogError::InvalidInput(format!(
                "option {} does not belong to question {}",
                option_id, question_id
            )));
        }
        if !in_scope(&question.image_type_ids, image.image_type_id) {
            return Err(CatalogError::InvalidInput(format!(
                "question {} does not apply to image {}",
                question_id, image_id
            )));
        }

        let now = Utc::now();
        if let Some(existing) = self.answers.iter_mut().find(|a| {
            a.image_id == image_id && a.question_id == question_id && a.user_id == user_id
        }) {
            existing.option_id = option_id;
            existing.answered_at = now;
            return Ok(existing.clone());
        }

        let answer = Answer {
            id: bump(&mut self.sequences.answer),
            image_id,
            question_id,
            option_id,
            user_id,
            answered_at: now,
        };
        self.answers.push(answer.clone());
        Ok(answer)
    }

    pub fn answer_by_id(&self, id: Id) -> CatalogResult<&Answer> {
        get(&self.answers, id)
    }

    pub fn delete_answer(&mut self, id: Id) -> CatalogResult<Answer> {
        take(&mut self.answers, id)
    }

    /// Answers on an image, optionally limited to one user.
    pub fn answers_for(&self, image_id: Id, user_id: Option<Id>) -> CatalogResult<Vec<&Answer>> {
        get(&self.images, image_id)?;
        Ok(self
            .answers
            .iter()
            .filter(|a| a.image_id == image_id && user_id.map_or(true, |u| a.user_id == u))
            .collect())
    }
}
