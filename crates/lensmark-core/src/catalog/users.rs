//! Users, roles and expert types.

use super::{bump, clean_name, dedup_ids, ensure_all, get, get_mut, take, Catalog};
use super::{ExpertType, Id, Role, User};
use crate::error::{CatalogError, CatalogResult};

impl Catalog {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: Id) -> CatalogResult<&User> {
        get(&self.users, id)
    }

    pub fn user_by_name(&self, username: &str) -> CatalogResult<&User> {
        self.users
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| CatalogError::UnknownUser(username.to_string()))
    }

    /// Create a user. Usernames are unique.
    pub fn add_user(&mut self, username: &str, role: Role) -> CatalogResult<User> {
        let username = clean_name("User", username)?;
        if self.users.iter().any(|u| u.username == username) {
            return Err(CatalogError::Duplicate {
                entity: "User",
                name: username,
            });
        }

        let user = User {
            id: bump(&mut self.sequences.user),
            username,
            role,
            expert_type_ids: Vec::new(),
        };
        tracing::info!("Added {} user {}", user.role, user.username);
        self.users.push(user.clone());
        Ok(user)
    }

    pub fn set_role(&mut self, user_id: Id, role: Role) -> CatalogResult<User> {
        let user = get_mut(&mut self.users, user_id)?;
        user.role = role;
        Ok(user.clone())
    }

    /// Resolve `username` and fail with `Forbidden` unless it is an admin.
    pub fn require_admin(&self, username: &str) -> CatalogResult<&User> {
        let user = self.user_by_name(username)?;
        if user.role != Role::Admin {
            return Err(CatalogError::Forbidden(format!(
                "{} is not an admin",
                username
            )));
        }
        Ok(user)
    }

    /// Fail with `Forbidden` unless `actor_id` owns the record or is an admin.
    pub fn require_owner_or_admin(&self, actor_id: Id, owner_id: Id) -> CatalogResult<()> {
        let actor = get(&self.users, actor_id)?;
        if actor.id != owner_id && actor.role != Role::Admin {
            return Err(CatalogError::Forbidden(format!(
                "{} may only change their own records",
                actor.username
            )));
        }
        Ok(())
    }

    /// Give a user an expert type. Idempotent.
    pub fn assign_expert_type(
        &mut self,
        user_id: Id,
        expert_type_id: Id,
    ) -> CatalogResult<User> {
        get(&self.expert_types, expert_type_id)?;
        let user = get_mut(&mut self.users, user_id)?;
        if !user.expert_type_ids.contains(&expert_type_id) {
            user.expert_type_ids.push(expert_type_id);
            user.expert_type_ids.sort_unstable();
        }
        Ok(user.clone())
    }

    pub fn revoke_expert_type(&mut self, user_id: Id, expert_type_id: Id) -> CatalogResult<User> {
        let user = get_mut(&mut self.users, user_id)?;
        user.expert_type_ids.retain(|&id| id != expert_type_id);
        Ok(user.clone())
    }

    pub fn expert_types(&self) -> &[ExpertType] {
        &self.expert_types
    }

    pub fn expert_type(&self, id: Id) -> CatalogResult<&ExpertType> {
        get(&self.expert_types, id)
    }

    pub fn add_expert_type(
        &mut self,
        name: &str,
        image_type_ids: &[Id],
    ) -> CatalogResult<ExpertType> {
        let name = clean_name("Expert type", name)?;
        self.ensure_unique_expert_type(&name, None)?;
        ensure_all(&self.image_types, image_type_ids)?;

        let expert_type = ExpertType {
            id: bump(&mut self.sequences.expert_type),
            name,
            image_type_ids: dedup_ids(image_type_ids),
        };
        self.expert_types.push(expert_type.clone());
        Ok(expert_type)
    }

    pub fn rename_expert_type(&mut self, id: Id, name: &str) -> CatalogResult<ExpertType> {
        let name = clean_name("Expert type", name)?;
        self.ensure_unique_expert_type(&name, Some(id))?;
        let expert_type = get_mut(&mut self.expert_types, id)?;
        expert_type.name = name;
        Ok(expert_type.clone())
    }

    /// Replace the image types an expert type covers.
    pub fn set_expert_type_scope(
        &mut self,
        id: Id,
        image_type_ids: &[Id],
    ) -> CatalogResult<ExpertType> {
        ensure_all(&self.image_types, image_type_ids)?;
        let expert_type = get_mut(&mut self.expert_types, id)?;
        expert_type.image_type_ids = dedup_ids(image_type_ids);
        Ok(expert_type.clone())
    }

    /// Delete an expert type and revoke it from every user.
    pub fn delete_expert_type(&mut self, id: Id) -> CatalogResult<ExpertType> {
        let removed = take(&mut self.expert_types, id)?;
        for user in &mut self.users {
            user.expert_type_ids.retain(|&e| e != id);
        }
        Ok(removed)
    }

    fn ensure_unique_expert_type(&self, name: &str, except: Option<Id>) -> CatalogResult<()> {
        if self
            .expert_types
            .iter()
            .any(|e| e.name == name && Some(e.id) != except)
        {
            return Err(CatalogError::Duplicate {
                entity: "Expert type",
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
