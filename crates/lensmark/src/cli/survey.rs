//! The `lensmark answer` and `lensmark annotate` commands, run as the `--as` user.

use clap::{Args, Subcommand};

use lensmark_core::catalog::{AnnotationUpdate, Id, Point, Shape};

use super::Session;

#[derive(Args, Debug)]
pub struct AnswerArgs {
    #[command(subcommand)]
    pub command: AnswerCommand,
}

#[derive(Subcommand, Debug)]
pub enum AnswerCommand {
    /// Answer a question about an image (replaces an earlier answer)
    Set { image: Id, question: Id, option: Id },
    /// Delete an answer (your own, or any as admin)
    Delete { id: Id },
    /// List answers on an image
    List {
        image: Id,
        /// Only the acting user's answers
        #[arg(long)]
        mine: bool,
    },
}

#[derive(Args, Debug)]
pub struct AnnotateArgs {
    #[command(subcommand)]
    pub command: AnnotateCommand,
}

#[derive(Subcommand, Debug)]
pub enum AnnotateCommand {
    /// Draw a bounding box
    Box {
        image: Id,
        label: Id,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Draw a polygon from x,y points
    Polygon {
        image: Id,
        label: Id,
        /// Vertices as "x,y" (at least three)
        #[arg(required = true, value_parser = parse_point)]
        points: Vec<Point>,
    },
    /// Change an annotation's image, label or shape
    Update {
        id: Id,
        #[arg(long)]
        image: Option<Id>,
        #[arg(long)]
        label: Option<Id>,
        /// New bounding box as x,y,width,height
        #[arg(long = "box", value_parser = parse_box, conflicts_with = "points")]
        bbox: Option<Shape>,
        /// New polygon vertices as "x,y"
        #[arg(long = "point", value_parser = parse_point)]
        points: Vec<Point>,
    },
    /// Delete an annotation
    Delete { id: Id },
    /// List annotations on an image
    List {
        image: Id,
        /// Only the acting user's annotations
        #[arg(long)]
        mine: bool,
    },
}

pub fn answers(mut session: Session, args: AnswerArgs) -> anyhow::Result<()> {
    match args.command {
        AnswerCommand::Set {
            image,
            question,
            option,
        } => {
            let user_id = session.user()?.id;
            let answer = session.catalog.answer(user_id, image, question, option)?;
            session.save()?;
            session.print(&answer)
        }
        AnswerCommand::Delete { id } => {
            let owner = session.catalog.answer_by_id(id)?.user_id;
            owned_by_actor(&session, owner)?;
            let removed = session.catalog.delete_answer(id)?;
            session.save()?;
            session.print(&removed)
        }
        AnswerCommand::List { image, mine } => {
            let user_id = if mine { Some(session.user()?.id) } else { None };
            session.print_all(&session.catalog.answers_for(image, user_id)?)
        }
    }
}

pub fn annotations(mut session: Session, args: AnnotateArgs) -> anyhow::Result<()> {
    let changed = match args.command {
        AnnotateCommand::Box {
            image,
            label,
            x,
            y,
            width,
            height,
        } => {
            let user_id = session.user()?.id;
            let shape = Shape::BoundingBox {
                x,
                y,
                width,
                height,
            };
            session.catalog.annotate(user_id, image, label, shape)?
        }

        AnnotateCommand::Polygon {
            image,
            label,
            points,
        } => {
            let user_id = session.user()?.id;
            session
                .catalog
                .annotate(user_id, image, label, Shape::Polygon { points })?
        }

        AnnotateCommand::Update {
            id,
            image,
            label,
            bbox,
            points,
        } => {
            owned_by_actor(&session, session.catalog.annotation(id)?.user_id)?;
            let polygon = (!points.is_empty()).then_some(Shape::Polygon { points });
            let update = AnnotationUpdate {
                image_id: image,
                label_id: label,
                shape: bbox.or(polygon),
            };
            session.catalog.update_annotation(id, update)?
        }

        AnnotateCommand::Delete { id } => {
            owned_by_actor(&session, session.catalog.annotation(id)?.user_id)?;
            session.catalog.delete_annotation(id)?
        }

        AnnotateCommand::List { image, mine } => {
            let user_id = if mine { Some(session.user()?.id) } else { None };
            return session.print_all(&session.catalog.annotations_for(image, user_id)?);
        }
    };
    session.save()?;
    session.print(&changed)
}

/// Experts may only change their own answers and annotations; admins may change any.
fn owned_by_actor(session: &Session, owner_id: Id) -> anyhow::Result<()> {
    let actor_id = session.user()?.id;
    session.catalog.require_owner_or_admin(actor_id, owner_id)?;
    Ok(())
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {:?}", s))?;
    Ok(Point {
        x: parse_coord(x)?,
        y: parse_coord(y)?,
    })
}

fn parse_box(s: &str) -> Result<Shape, String> {
    let parts = s
        .split(',')
        .map(parse_coord)
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [x, y, width, height] => Ok(Shape::BoundingBox {
            x,
            y,
            width,
            height,
        }),
        _ => Err(format!("expected \"x,y,width,height\", got {:?}", s)),
    }
}

fn parse_coord(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid coordinate {:?}: {}", s, e))
}
