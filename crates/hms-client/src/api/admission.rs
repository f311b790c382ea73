//! `/admission` endpoints: in-patient listing, admission and discharge.

use std::fmt::Display;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::query::Page;
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

pub use super::query::AdmissionQuery;

pub fn list_active<Q: Serialize + ?Sized>(params: &Q) -> Result<ApiRequest, GatewayError> {
    ApiRequest::get("/admission/active").with_query(params)
}

pub fn add<B: Serialize + ?Sized>(data: &B) -> Result<ApiRequest, GatewayError> {
    ApiRequest::post("/admission").with_body(data)
}

/// `PUT /admission/{id}/discharge`, body e.g. `{"DischargeDate": "2024-05-01"}`.
pub fn discharge<B: Serialize + ?Sized>(
    id: impl Display,
    data: &B,
) -> Result<ApiRequest, GatewayError> {
    ApiRequest::put(format!("/admission/{id}/discharge"))
        .with_header("Content-Type", "application/json")
        .with_body(data)
}

#[derive(Debug, Clone, Copy)]
pub struct AdmissionsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> AdmissionsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list_active<Q: Serialize + ?Sized>(
        &self,
        params: &Q,
    ) -> Result<Value, GatewayError> {
        self.gateway.send(list_active(params)?).await
    }

    pub async fn list_active_page<T, Q>(&self, params: &Q) -> Result<Page<T>, GatewayError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.gateway.send_as(list_active(params)?).await
    }

    pub async fn add<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value, GatewayError> {
        self.gateway.send(add(data)?).await
    }

    pub async fn discharge<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        data: &B,
    ) -> Result<Value, GatewayError> {
        self.gateway.send(discharge(id, data)?).await
    }
}
