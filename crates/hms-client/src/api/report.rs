//! Read-only statistics.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

pub use super::query::StatsQuery;

/// `GET /department/{id}/stats`
pub fn department_stats<Q: Serialize + ?Sized>(
    id: impl Display,
    params: &Q,
) -> Result<ApiRequest, GatewayError> {
    ApiRequest::get(format!("/department/{id}/stats")).with_query(params)
}

/// `GET /report/revenue`
pub fn revenue<Q: Serialize + ?Sized>(params: &Q) -> Result<ApiRequest, GatewayError> {
    ApiRequest::get("/report/revenue").with_query(params)
}

/// `GET /doctor/{id}/workload`
pub fn doctor_workload<Q: Serialize + ?Sized>(
    id: impl Display,
    params: &Q,
) -> Result<ApiRequest, GatewayError> {
    ApiRequest::get(format!("/doctor/{id}/workload")).with_query(params)
}

#[derive(Debug, Clone, Copy)]
pub struct ReportsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> ReportsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn department_stats<Q: Serialize + ?Sized>(
        &self,
        id: impl Display,
        params: &Q,
    ) -> Result<Value, GatewayError> {
        self.gateway.send(department_stats(id, params)?).await
    }

    pub async fn revenue<Q: Serialize + ?Sized>(&self, params: &Q) -> Result<Value, GatewayError> {
        self.gateway.send(revenue(params)?).await
    }

    pub async fn doctor_workload<Q: Serialize + ?Sized>(
        &self,
        id: impl Display,
        params: &Q,
    ) -> Result<Value, GatewayError> {
        self.gateway.send(doctor_workload(id, params)?).await
    }
}
