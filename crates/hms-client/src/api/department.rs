//! `/department` endpoints.

use std::fmt::Display;

use serde::Serialize;

use super::records::Collection;
use crate::error::GatewayError;
use crate::gateway::ApiRequest;

pub use super::query::DepartmentQuery;

pub const COLLECTION: Collection = Collection::new("/department");

pub fn list<Q: Serialize + ?Sized>(params: &Q) -> Result<ApiRequest, GatewayError> {
    COLLECTION.list(params)
}

pub fn detail(id: impl Display) -> ApiRequest {
    COLLECTION.detail(id)
}

pub fn add<B: Serialize + ?Sized>(data: &B) -> Result<ApiRequest, GatewayError> {
    COLLECTION.add(data)
}

pub fn update<B: Serialize + ?Sized>(id: impl Display, data: &B) -> Result<ApiRequest, GatewayError> {
    COLLECTION.update(id, data)
}

pub fn delete(id: impl Display) -> ApiRequest {
    COLLECTION.delete(id)
}
