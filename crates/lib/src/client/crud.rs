//! Create, retrieve and update records through the CRUD endpoint.

use std::sync::Arc;

use serde_json::Value;

use super::{Request, Transport, parse_jsonp};
use crate::{
    DataObj, Result,
    config::{ClientConfig, endpoint_url},
};

/// Client for `{crud_endpoint}/{objtype}[/{id}]`.
#[derive(Clone)]
pub struct CrudClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl CrudClient {
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            endpoint: config.crud_endpoint.clone(),
        }
    }

    /// `POST {crud}/{objtype}` with the object's record as the body.
    pub async fn create(&self, objtype: &str, obj: &DataObj) -> Result<Value> {
        let url = endpoint_url(&self.endpoint, &[objtype])?;
        self.call(Request::post(url, obj.to_json_string())).await
    }

    /// `GET {crud}/{objtype}/{id}`.
    pub async fn retrieve(&self, objtype: &str, id: &str) -> Result<Value> {
        let url = endpoint_url(&self.endpoint, &[objtype, id])?;
        self.call(Request::get(url)).await
    }

    /// `PUT {crud}/{objtype}/{id}` with the object's record as the body.
    pub async fn update(&self, objtype: &str, id: &str, obj: &DataObj) -> Result<Value> {
        let url = endpoint_url(&self.endpoint, &[objtype, id])?;
        self.call(Request::put(url, obj.to_json_string())).await
    }

    async fn call(&self, request: Request) -> Result<Value> {
        let url = request.url.clone();
        let body = self.transport.send(request).await?;
        Ok(parse_jsonp(&url, &body)?)
    }
}
