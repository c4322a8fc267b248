//! Generic CRUD client and locally synced collection

use super::ApiClient;
use crate::domain::{EntityId, Envelope, ListPayload, Resource};
use crate::error::Result;
use crate::session::TokenStore;
use reqwest::Method;
use serde_json::Value;
use std::marker::PhantomData;
use validator::Validate;

/// CRUD operations for one entity type
pub struct ResourceClient<R: Resource, S: TokenStore> {
    api: ApiClient<S>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, S: TokenStore> Clone for ResourceClient<R, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource, S: TokenStore> ResourceClient<R, S> {
    pub fn new(api: ApiClient<S>) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    fn item_path(id: EntityId) -> String {
        format!("{}/{}", R::KIND.path(), id)
    }

    /// List records; `query` is forwarded as-is (e.g. `clubId=3`)
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<R>> {
        let payload: ListPayload<R> = self
            .api
            .request(Method::GET, R::KIND.path(), query, None)
            .await?;
        Ok(payload.into_vec())
    }

    pub async fn get(&self, id: EntityId) -> Result<R> {
        let envelope: Envelope<R> = self
            .api
            .request(Method::GET, &Self::item_path(id), None, None)
            .await?;
        Ok(envelope.into_inner())
    }

    pub async fn create(&self, input: &R::Create) -> Result<R> {
        input.validate()?;
        let body = serde_json::to_value(input)?;
        let envelope: Envelope<R> = self
            .api
            .request(Method::POST, R::KIND.path(), None, Some(&body))
            .await?;
        tracing::info!(resource = %R::KIND, "Record created");
        Ok(envelope.into_inner())
    }

    pub async fn update(&self, id: EntityId, input: &R::Update) -> Result<R> {
        input.validate()?;
        let body = serde_json::to_value(input)?;
        let envelope: Envelope<R> = self
            .api
            .request(Method::PATCH, &Self::item_path(id), None, Some(&body))
            .await?;
        tracing::info!(resource = %R::KIND, id, "Record updated");
        Ok(envelope.into_inner())
    }

    pub async fn delete(&self, id: EntityId) -> Result<()> {
        // Body (if any) is informational only
        let _: Value = self
            .api
            .request(Method::DELETE, &Self::item_path(id), None, None)
            .await?;
        tracing::info!(resource = %R::KIND, id, "Record deleted");
        Ok(())
    }
}

/// Local list of records kept in step with successful mutations
pub struct ResourceCollection<R: Resource, S: TokenStore> {
    client: ResourceClient<R, S>,
    items: Vec<R>,
}

impl<R: Resource, S: TokenStore> ResourceCollection<R, S> {
    pub fn new(client: ResourceClient<R, S>) -> Self {
        Self {
            client,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn find(&self, id: EntityId) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replace the local list with the backend's
    pub async fn load(&mut self, query: Option<&str>) -> Result<&[R]> {
        self.items = self.client.list(query).await?;
        Ok(&self.items)
    }

    pub async fn create(&mut self, input: &R::Create) -> Result<R> {
        let created = self.client.create(input).await?;
        self.items.push(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: EntityId, input: &R::Update) -> Result<R> {
        let updated = self.client.update(id, input).await?;
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(slot) => *slot = updated.clone(),
            None => self.items.push(updated.clone()),
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: EntityId) -> Result<()> {
        self.client.delete(id).await?;
        self.items.retain(|item| item.id() != id);
        Ok(())
    }
}
