//! The `lensmark image` command.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use lensmark_core::catalog::Id;
use lensmark_core::{Registrar, RegistrationOutcome};

use super::{confirm, Session};

#[derive(Args, Debug)]
pub struct ImageArgs {
    #[command(subcommand)]
    pub command: ImageCommand,
}

#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// List registered images
    List {
        /// Only images of this type
        #[arg(long = "type")]
        image_type: Option<Id>,
    },

    /// Show one image with its metadata, answers and annotations
    Show {
        /// Image id or filename
        image: String,
    },

    /// Copy a file into the image directory and register it (admin)
    Import {
        file: PathBuf,

        /// Image type to assign
        #[arg(long = "type")]
        image_type: Option<Id>,
    },

    /// Set or clear an image's type (admin)
    SetType {
        id: Id,

        /// New image type; omit to clear
        image_type: Option<Id>,
    },

    /// Delete an image file and its record (admin)
    Delete {
        id: Id,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn execute(mut session: Session, args: ImageArgs) -> anyhow::Result<()> {
    match args.command {
        ImageCommand::List { image_type } => {
            let images: Vec<_> = session
                .catalog
                .images()
                .iter()
                .filter(|i| image_type.is_none() || i.image_type_id == image_type)
                .collect();
            session.print_all(&images)?;
        }

        ImageCommand::Show { image } => {
            let image = match image.parse::<Id>() {
                Ok(id) => session.catalog.image(id)?,
                Err(_) => session
                    .catalog
                    .image_by_filename(&image)
                    .ok_or_else(|| anyhow::anyhow!("No image named {}", image))?,
            };
            let id = image.id;
            let view = serde_json::json!({
                "image": image,
                "answers": session.catalog.answers_for(id, None)?,
                "annotations": session.catalog.annotations_for(id, None)?,
            });
            session.print(&view)?;
        }

        ImageCommand::Import { file, image_type } => {
            session.require_admin()?;
            let registrar = Registrar::new(&session.config);
            let registered = registrar.import(&mut session.catalog, &file, image_type)?;
            session.save()?;

            if registered.outcome == RegistrationOutcome::Refreshed {
                tracing::warn!(
                    "{} was already in the catalog; its record was refreshed",
                    registered.image.filename
                );
            }
            session.print(&registered.image)?;
        }

        ImageCommand::SetType { id, image_type } => {
            session.require_admin()?;
            let image = session.catalog.set_image_type(id, image_type)?;
            session.save()?;
            session.print(&image)?;
        }

        ImageCommand::Delete { id, yes } => {
            session.require_admin()?;
            let filename = session.catalog.image(id)?.filename.clone();
            if !confirm(&format!("Delete {} and its file?", filename), yes)? {
                anyhow::bail!("Aborted");
            }
            let registrar = Registrar::new(&session.config);
            let image = registrar.remove(&mut session.catalog, id)?;
            session.save()?;
            eprintln!("Deleted image {} ({})", image.id, image.filename);
        }
    }
    Ok(())
}
