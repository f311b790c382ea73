//! `/visit` endpoints. Visits are never updated as a whole; only the
//! embedded prescription can be replaced.

use std::fmt::Display;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::query::Page;
use super::records::Collection;
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

pub use super::query::VisitQuery;

pub const COLLECTION: Collection = Collection::new("/visit");

pub fn list<Q: Serialize + ?Sized>(params: &Q) -> Result<ApiRequest, GatewayError> {
    COLLECTION.list(params)
}

pub fn detail(id: impl Display) -> ApiRequest {
    COLLECTION.detail(id)
}

pub fn add<B: Serialize + ?Sized>(data: &B) -> Result<ApiRequest, GatewayError> {
    COLLECTION.add(data)
}

/// `PUT /visit/{id}/prescription`, body e.g. `{"Prescription": "..."}`.
pub fn update_prescription<B: Serialize + ?Sized>(
    id: impl Display,
    data: &B,
) -> Result<ApiRequest, GatewayError> {
    ApiRequest::put(format!("{}/prescription", COLLECTION.item_path(id))).with_body(data)
}

pub fn delete(id: impl Display) -> ApiRequest {
    COLLECTION.delete(id)
}

#[derive(Debug, Clone, Copy)]
pub struct VisitsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> VisitsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list<Q: Serialize + ?Sized>(&self, params: &Q) -> Result<Value, GatewayError> {
        self.gateway.send(list(params)?).await
    }

    pub async fn list_page<T, Q>(&self, params: &Q) -> Result<Page<T>, GatewayError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.gateway.send_as(list(params)?).await
    }

    pub async fn detail(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.gateway.send(detail(id)).await
    }

    pub async fn add<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value, GatewayError> {
        self.gateway.send(add(data)?).await
    }

    pub async fn update_prescription<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        data: &B,
    ) -> Result<Value, GatewayError> {
        self.gateway.send(update_prescription(id, data)?).await
    }

    pub async fn delete(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.gateway.send(delete(id)).await
    }
}
