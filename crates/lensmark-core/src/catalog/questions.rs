//! Questions and their answer options.

use super::{bump, dedup_ids, ensure_all, get, get_mut, in_scope, take, Catalog};
use super::{Id, ImageType, Question, QuestionOption};
use crate::error::{CatalogError, CatalogResult};

impl Catalog {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: Id) -> CatalogResult<&Question> {
        get(&self.questions, id)
    }

    pub fn add_question(&mut self, text: &str, image_type_ids: &[Id]) -> CatalogResult<Question> {
        let text = clean_text(text)?;
        ensure_all(&self.image_types, image_type_ids)?;

        let question = Question {
            id: bump(&mut self.sequences.question),
            text,
            image_type_ids: dedup_ids(image_type_ids),
        };
        self.questions.push(question.clone());
        Ok(question)
    }

    pub fn update_question(&mut self, id: Id, text: &str) -> CatalogResult<Question> {
        let text = clean_text(text)?;
        let question = get_mut(&mut self.questions, id)?;
        question.text = text;
        Ok(question.clone())
    }

    /// Delete a question with its options and answers.
    pub fn delete_question(&mut self, id: Id) -> CatalogResult<Question> {
        let removed = take(&mut self.questions, id)?;
        self.options.retain(|o| o.question_id != id);
        self.answers.retain(|a| a.question_id != id);
        Ok(removed)
    }

    /// Scope a question to an image type. Idempotent.
    pub fn link_question_image_type(
        &mut self,
        question_id: Id,
        image_type_id: Id,
    ) -> CatalogResult<Question> {
        get(&self.image_types, image_type_id)?;
        let question = get_mut(&mut self.questions, question_id)?;
        if !question.image_type_ids.contains(&image_type_id) {
            question.image_type_ids.push(image_type_id);
            question.image_type_ids.sort_unstable();
        }
        Ok(question.clone())
    }

    /// Remove an image type from a question's scope. Idempotent.
    pub fn unlink_question_image_type(
        &mut self,
        question_id: Id,
        image_type_id: Id,
    ) -> CatalogResult<Question> {
        get(&self.image_types, image_type_id)?;
        let question = get_mut(&mut self.questions, question_id)?;
        question.image_type_ids.retain(|&t| t != image_type_id);
        Ok(question.clone())
    }

    pub fn question_image_types(&self, question_id: Id) -> CatalogResult<Vec<&ImageType>> {
        let question = get(&self.questions, question_id)?;
        Ok(self
            .image_types
            .iter()
            .filter(|t| question.image_type_ids.contains(&t.id))
            .collect())
    }

    /// Questions that apply to images of the given type, including unscoped
    /// questions.
    pub fn questions_for_image_type(&self, image_type_id: Id) -> CatalogResult<Vec<&Question>> {
        get(&self.image_types, image_type_id)?;
        Ok(self
            .questions
            .iter()
            .filter(|q| in_scope(&q.image_type_ids, Some(image_type_id)))
            .collect())
    }

    pub fn option(&self, id: Id) -> CatalogResult<&QuestionOption> {
        get(&self.options, id)
    }

    pub fn options_for(&self, question_id: Id) -> CatalogResult<Vec<&QuestionOption>> {
        get(&self.questions, question_id)?;
        Ok(self
            .options
            .iter()
            .filter(|o| o.question_id == question_id)
            .collect())
    }

    pub fn add_option(&mut self, question_id: Id, text: &str) -> CatalogResult<QuestionOption> {
        let text = clean_text(text)?;
        get(&self.questions, question_id)?;

        let option = QuestionOption {
            id: bump(&mut self.sequences.option),
            question_id,
            text,
        };
        self.options.push(option.clone());
        Ok(option)
    }

    pub fn update_option(&mut self, id: Id, text: &str) -> CatalogResult<QuestionOption> {
        let text = clean_text(text)?;
        let option = get_mut(&mut self.options, id)?;
        option.text = text;
        Ok(option.clone())
    }

    /// Delete an option and every answer that picked it.
    pub fn delete_option(&mut self, id: Id) -> CatalogResult<QuestionOption> {
        let removed = take(&mut self.options, id)?;
        self.answers.retain(|a| a.option_id != id);
        Ok(removed)
    }
}

fn clean_text(text: &str) -> CatalogResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CatalogError::InvalidInput("text must not be empty".into()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Role;
    use crate::types::ExtractedMetadata;
    use std::path::PathBuf;

    #[test]
    fn test_link_and_unlink_are_idempotent() {
        let mut catalog = Catalog::in_memory();
        let rgb = catalog.add_image_type("rgb").unwrap();
        let q = catalog.add_question("Is there water?", &[]).unwrap();

        catalog.link_question_image_type(q.id, rgb.id).unwrap();
        let q2 = catalog.link_question_image_type(q.id, rgb.id).unwrap();
        assert_eq!(q2.image_type_ids, vec![rgb.id]);

        let types = catalog.question_image_types(q.id).unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "rgb");

        catalog.unlink_question_image_type(q.id, rgb.id).unwrap();
        let q3 = catalog.unlink_question_image_type(q.id, rgb.id).unwrap();
        assert!(q3.image_type_ids.is_empty());

        assert!(catalog.link_question_image_type(q.id, 99).is_err());
        assert!(catalog.link_question_image_type(99, rgb.id).is_err());
    }

    #[test]
    fn test_questions_for_image_type() {
        let mut catalog = Catalog::in_memory();
        let rgb = catalog.add_image_type("rgb").unwrap();
        let thermal = catalog.add_image_type("thermal").unwrap();
        catalog.add_question("General?", &[]).unwrap();
        catalog.add_question("Hot spots?", &[thermal.id]).unwrap();
        catalog.add_question("Colour cast?", &[rgb.id]).unwrap();

        let texts: Vec<_> = catalog
            .questions_for_image_type(thermal.id)
            .unwrap()
            .iter()
            .map(|q| q.text.as_str())
            .collect();
        assert_eq!(texts, vec!["General?", "Hot spots?"]);
        assert!(catalog.questions_for_image_type(42).is_err());
    }

    #[test]
    fn test_options_belong_to_question() {
        let mut catalog = Catalog::in_memory();
        let q = catalog.add_question("Vegetation cover", &[]).unwrap();
        catalog.add_option(q.id, "low").unwrap();
        let high = catalog.add_option(q.id, "high").unwrap();

        assert_eq!(catalog.options_for(q.id).unwrap().len(), 2);
        assert!(catalog.add_option(99, "orphan").is_err());

        let updated = catalog.update_option(high.id, "dense").unwrap();
        assert_eq!(updated.text, "dense");
        assert!(catalog.update_option(high.id, "  ").is_err());
    }

    #[test]
    fn test_delete_question_cascades() {
        let mut catalog = Catalog::in_memory();
        let user = catalog.add_user("grace", Role::Expert).unwrap();
        let (image, _) = catalog
            .upsert_image("a.jpg", PathBuf::from("a.jpg"), ExtractedMetadata::default(), None)
            .unwrap();
        let q = catalog.add_question("Flooded?", &[]).unwrap();
        let yes = catalog.add_option(q.id, "yes").unwrap();
        catalog.answer(user.id, image.id, q.id, yes.id).unwrap();

        catalog.delete_question(q.id).unwrap();
        assert!(catalog.option(yes.id).is_err());
        assert!(catalog.answers().is_empty());
    }

    #[test]
    fn test_delete_option_cascades_answers() {
        let mut catalog = Catalog::in_memory();
        let user = catalog.add_user("grace", Role::Expert).unwrap();
        let (image, _) = catalog
            .upsert_image("a.jpg", PathBuf::from("a.jpg"), ExtractedMetadata::default(), None)
            .unwrap();
        let q = catalog.add_question("Flooded?", &[]).unwrap();
        let yes = catalog.add_option(q.id, "yes").unwrap();
        catalog.add_option(q.id, "no").unwrap();
        catalog.answer(user.id, image.id, q.id, yes.id).unwrap();

        catalog.delete_option(yes.id).unwrap();
        assert!(catalog.answers().is_empty());
        assert_eq!(catalog.options_for(q.id).unwrap().len(), 1);
    }
}
