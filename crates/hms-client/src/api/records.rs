use std::fmt::Display;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::query::Page;
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

/// The uniform list/detail/add/update/delete surface of one backend
/// collection, e.g. `/patient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    base: &'static str,
}

impl Collection {
    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    pub fn item_path(&self, id: impl Display) -> String {
        format!("{}/{}", self.base, id)
    }

    pub fn list<Q: Serialize + ?Sized>(&self, params: &Q) -> Result<ApiRequest, GatewayError> {
        ApiRequest::get(self.base).with_query(params)
    }

    pub fn detail(&self, id: impl Display) -> ApiRequest {
        ApiRequest::get(self.item_path(id))
    }

    pub fn add<B: Serialize + ?Sized>(&self, data: &B) -> Result<ApiRequest, GatewayError> {
        ApiRequest::post(self.base).with_body(data)
    }

    pub fn update<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        data: &B,
    ) -> Result<ApiRequest, GatewayError> {
        ApiRequest::put(self.item_path(id)).with_body(data)
    }

    pub fn delete(&self, id: impl Display) -> ApiRequest {
        ApiRequest::delete(self.item_path(id))
    }
}

/// Collection bound to a gateway.
#[derive(Debug, Clone, Copy)]
pub struct RecordsApi<'a> {
    gateway: &'a Gateway,
    collection: Collection,
}

impl<'a> RecordsApi<'a> {
    pub fn new(gateway: &'a Gateway, collection: Collection) -> Self {
        Self {
            gateway,
            collection,
        }
    }

    pub async fn list<Q: Serialize + ?Sized>(&self, params: &Q) -> Result<Value, GatewayError> {
        self.gateway.send(self.collection.list(params)?).await
    }

    /// [`list`](Self::list) decoded into a typed page.
    pub async fn list_page<T, Q>(&self, params: &Q) -> Result<Page<T>, GatewayError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.gateway.send_as(self.collection.list(params)?).await
    }

    pub async fn detail(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.gateway.send(self.collection.detail(id)).await
    }

    pub async fn add<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value, GatewayError> {
        self.gateway.send(self.collection.add(data)?).await
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        data: &B,
    ) -> Result<Value, GatewayError> {
        self.gateway.send(self.collection.update(id, data)?).await
    }

    pub async fn delete(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.gateway.send(self.collection.delete(id)).await
    }
}
