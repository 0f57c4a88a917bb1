use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{Child, EngineError, ResultEngine, children, util::normalize_child_name};

use super::Engine;

impl Engine {
    /// All children, ordered by id.
    pub async fn list_children(&self) -> ResultEngine<Vec<Child>> {
        let models = children::Entity::find()
            .order_by_asc(children::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Child::from).collect())
    }

    /// Look a child up by (normalized) name.
    pub async fn child_by_name(&self, name: &str) -> ResultEngine<Option<Child>> {
        let name = normalize_child_name(name)?;
        let model = children::Entity::find()
            .filter(children::Column::Name.eq(name))
            .one(&self.database)
            .await?;
        Ok(model.map(Child::from))
    }

    /// Create a new child. Names are unique.
    pub async fn create_child(&self, name: &str) -> ResultEngine<Child> {
        let name = normalize_child_name(name)?;
        if self.child_by_name(&name).await?.is_some() {
            return Err(EngineError::ExistingKey(name));
        }

        let model = children::ActiveModel {
            name: ActiveValue::Set(name),
            ..Default::default()
        }
        .insert(&self.database)
        .await?;

        tracing::debug!(child_id = model.id, name = %model.name, "child created");
        Ok(model.into())
    }

    /// Make sure every name in `names` exists, creating the missing ones.
    ///
    /// Returns the children created by this call.
    pub async fn seed_children<I, S>(&self, names: I) -> ResultEngine<Vec<Child>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut created = Vec::new();
        for name in names {
            let name = name.as_ref();
            if self.child_by_name(name).await?.is_some() {
                continue;
            }
            tracing::info!("Seeding child: {name}");
            created.push(self.create_child(name).await?);
        }
        Ok(created)
    }

    pub(super) async fn require_child<C>(&self, db: &C, id: i32) -> ResultEngine<children::Model>
    where
        C: ConnectionTrait,
    {
        children::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("Child".to_string()))
    }
}
