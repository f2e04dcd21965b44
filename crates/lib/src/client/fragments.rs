//! HTML fragments fetched by id and memoized for the life of the handle.

use std::{collections::HashMap, sync::Arc, sync::Mutex};

use super::{Request, Transport};
use crate::{
    Result,
    config::{ClientConfig, endpoint_url},
};

/// Fragment cache over `GET {fragments_endpoint}/{id}`.
///
/// Each id is fetched once; later requests are answered from the cache. Entries are never
/// evicted or invalidated.
pub struct Fragments {
    transport: Arc<dyn Transport>,
    endpoint: String,
    cache: Mutex<HashMap<String, String>>,
}

impl Fragments {
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            endpoint: config.fragments_endpoint.clone(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the fragment with `id`, fetching it on first use.
    pub async fn get(&self, id: &str) -> Result<String> {
        if let Some(html) = self.cached(id) {
            tracing::debug!(id, "fragment served from cache");
            return Ok(html);
        }

        let html = self
            .transport
            .send(Request::get(endpoint_url(&self.endpoint, &[id])?))
            .await?;
        self.cache
            .lock()
            .unwrap()
            .insert(id.to_string(), html.clone());
        Ok(html)
    }

    /// Returns a cached fragment without fetching.
    pub fn cached(&self, id: &str) -> Option<String> {
        self.cache.lock().unwrap().get(id).cloned()
    }

    /// Number of cached fragments.
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
