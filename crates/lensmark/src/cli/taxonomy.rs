//! The `lensmark image-type`, `expert-type` and `label` commands.
//!
//! Listing is open to everyone; changes need an admin.

use clap::{Args, Subcommand};

use lensmark_core::catalog::Id;

use super::Session;

#[derive(Args, Debug)]
pub struct ImageTypeArgs {
    #[command(subcommand)]
    pub command: ImageTypeCommand,
}

#[derive(Subcommand, Debug)]
pub enum ImageTypeCommand {
    /// List image types
    List,
    /// Create an image type
    Add { name: String },
    /// Rename an image type
    Rename { id: Id, name: String },
    /// Delete an image type and unlink it everywhere
    Delete { id: Id },
}

#[derive(Args, Debug)]
pub struct ExpertTypeArgs {
    #[command(subcommand)]
    pub command: ScopedCommand,
}

#[derive(Args, Debug)]
pub struct LabelArgs {
    #[command(subcommand)]
    pub command: ScopedCommand,
}

/// Commands for named entities scoped to image types.
#[derive(Subcommand, Debug)]
pub enum ScopedCommand {
    /// List all entries
    List,
    /// Create an entry
    Add {
        name: String,
        /// Image types it applies to (repeatable; none means all)
        #[arg(long = "image-type")]
        image_types: Vec<Id>,
    },
    /// Rename an entry
    Rename { id: Id, name: String },
    /// Replace the image types an entry applies to
    Scope {
        id: Id,
        /// Image types (none means all)
        image_types: Vec<Id>,
    },
    /// Delete an entry
    Delete { id: Id },
}

pub fn image_types(mut session: Session, args: ImageTypeArgs) -> anyhow::Result<()> {
    let changed = match args.command {
        ImageTypeCommand::List => return session.print_all(session.catalog.image_types()),
        ImageTypeCommand::Add { name } => session.admin_catalog()?.add_image_type(&name)?,
        ImageTypeCommand::Rename { id, name } => {
            session.admin_catalog()?.rename_image_type(id, &name)?
        }
        ImageTypeCommand::Delete { id } => session.admin_catalog()?.delete_image_type(id)?,
    };
    session.save()?;
    session.print(&changed)
}

pub fn expert_types(mut session: Session, args: ExpertTypeArgs) -> anyhow::Result<()> {
    let changed = match args.command {
        ScopedCommand::List => return session.print_all(session.catalog.expert_types()),
        ScopedCommand::Add { name, image_types } => {
            session.admin_catalog()?.add_expert_type(&name, &image_types)?
        }
        ScopedCommand::Rename { id, name } => {
            session.admin_catalog()?.rename_expert_type(id, &name)?
        }
        ScopedCommand::Scope { id, image_types } => {
            session.admin_catalog()?.set_expert_type_scope(id, &image_types)?
        }
        ScopedCommand::Delete { id } => session.admin_catalog()?.delete_expert_type(id)?,
    };
    session.save()?;
    session.print(&changed)
}

pub fn labels(mut session: Session, args: LabelArgs) -> anyhow::Result<()> {
    let changed = match args.command {
        ScopedCommand::List => return session.print_all(session.catalog.labels()),
        ScopedCommand::Add { name, image_types } => {
            session.admin_catalog()?.add_label(&name, &image_types)?
        }
        ScopedCommand::Rename { id, name } => session.admin_catalog()?.rename_label(id, &name)?,
        ScopedCommand::Scope { id, image_types } => {
            session.admin_catalog()?.set_label_scope(id, &image_types)?
        }
        ScopedCommand::Delete { id } => session.admin_catalog()?.delete_label(id)?,
    };
    session.save()?;
    session.print(&changed)
}
