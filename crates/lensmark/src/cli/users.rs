//! The `lensmark user` command.

use clap::{Args, Subcommand, ValueEnum};

use lensmark_core::catalog::Id;
use lensmark_core::Role;

use super::Session;

#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    Admin,
    Expert,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Expert => Role::Expert,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List users
    List,
    /// Create a user (admin; the first user needs no --as and becomes admin)
    Add {
        username: String,
        #[arg(long, value_enum, default_value = "expert")]
        role: RoleArg,
    },
    /// Change a user's role (admin)
    Role {
        username: String,
        #[arg(value_enum)]
        role: RoleArg,
    },
    /// Give a user an expert type (admin)
    Grant { username: String, expert_type: Id },
    /// Take an expert type away from a user (admin)
    Revoke { username: String, expert_type: Id },
}

pub fn execute(mut session: Session, args: UserArgs) -> anyhow::Result<()> {
    let changed = match args.command {
        UserCommand::List => return session.print_all(session.catalog.users()),

        UserCommand::Add { username, role } => {
            if session.catalog.users().is_empty() {
                tracing::info!("Creating first user {} as admin", username);
                session.catalog.add_user(&username, Role::Admin)?
            } else {
                session.admin_catalog()?.add_user(&username, role.into())?
            }
        }

        UserCommand::Role { username, role } => {
            let id = session.catalog.user_by_name(&username)?.id;
            session.admin_catalog()?.set_role(id, role.into())?
        }

        UserCommand::Grant {
            username,
            expert_type,
        } => {
            let id = session.catalog.user_by_name(&username)?.id;
            session
                .admin_catalog()?
                .assign_expert_type(id, expert_type)?
        }

        UserCommand::Revoke {
            username,
            expert_type,
        } => {
            let id = session.catalog.user_by_name(&username)?.id;
            session
                .admin_catalog()?
                .revoke_expert_type(id, expert_type)?
        }
    };
    session.save()?;
    session.print(&changed)
}
