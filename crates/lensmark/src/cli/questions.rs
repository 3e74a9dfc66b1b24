//! The `lensmark question` and `lensmark option` commands.

use clap::{Args, Subcommand};

use lensmark_core::catalog::Id;

use super::Session;

#[derive(Args, Debug)]
pub struct QuestionArgs {
    #[command(subcommand)]
    pub command: QuestionCommand,
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommand {
    /// List questions
    List {
        /// Only questions that apply to this image type
        #[arg(long = "image-type")]
        image_type: Option<Id>,
    },
    /// Create a question (admin)
    Add {
        text: String,
        /// Image types it applies to (repeatable; none means all)
        #[arg(long = "image-type")]
        image_types: Vec<Id>,
    },
    /// Change a question's text (admin)
    Update { id: Id, text: String },
    /// Delete a question with its options and answers (admin)
    Delete { id: Id },
    /// Make a question apply to an image type (admin)
    Link { id: Id, image_type: Id },
    /// Stop a question applying to an image type (admin)
    Unlink { id: Id, image_type: Id },
    /// List the image types a question applies to
    Types { id: Id },
}

#[derive(Args, Debug)]
pub struct OptionArgs {
    #[command(subcommand)]
    pub command: OptionCommand,
}

#[derive(Subcommand, Debug)]
pub enum OptionCommand {
    /// List the options of a question
    List { question: Id },
    /// Add an option to a question (admin)
    Add { question: Id, text: String },
    /// Change an option's text (admin)
    Update { id: Id, text: String },
    /// Delete an option and the answers that picked it (admin)
    Delete { id: Id },
}

pub fn questions(mut session: Session, args: QuestionArgs) -> anyhow::Result<()> {
    let changed = match args.command {
        QuestionCommand::List { image_type: None } => {
            return session.print_all(session.catalog.questions());
        }
        QuestionCommand::List {
            image_type: Some(t),
        } => {
            return session.print_all(&session.catalog.questions_for_image_type(t)?);
        }
        QuestionCommand::Types { id } => {
            return session.print_all(&session.catalog.question_image_types(id)?);
        }
        QuestionCommand::Add { text, image_types } => {
            session.admin_catalog()?.add_question(&text, &image_types)?
        }
        QuestionCommand::Update { id, text } => {
            session.admin_catalog()?.update_question(id, &text)?
        }
        QuestionCommand::Delete { id } => session.admin_catalog()?.delete_question(id)?,
        QuestionCommand::Link { id, image_type } => session
            .admin_catalog()?
            .link_question_image_type(id, image_type)?,
        QuestionCommand::Unlink { id, image_type } => session
            .admin_catalog()?
            .unlink_question_image_type(id, image_type)?,
    };
    session.save()?;
    session.print(&changed)
}

pub fn options(mut session: Session, args: OptionArgs) -> anyhow::Result<()> {
    let changed = match args.command {
        OptionCommand::List { question } => {
            return session.print_all(&session.catalog.options_for(question)?);
        }
        OptionCommand::Add { question, text } => {
            session.admin_catalog()?.add_option(question, &text)?
        }
        OptionCommand::Update { id, text } => session.admin_catalog()?.update_option(id, &text)?,
        OptionCommand::Delete { id } => session.admin_catalog()?.delete_option(id)?,
    };
    session.save()?;
    session.print(&changed)
}
