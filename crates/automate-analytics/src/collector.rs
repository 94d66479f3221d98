use std::sync::Mutex;

use reqwest::{Client, Url};
use tokio::runtime::Handle;
use tracing::debug;

use crate::hit::{Envelope, Hit};

pub const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com/collect";

/// Sink for usage hits. Delivery is fire-and-forget: nothing comes back.
pub trait Collector: Send + Sync {
    fn post_async(&self, envelope: Envelope);
}

/// Measurement-protocol query parameters for one envelope.
pub fn measurement_params(tracking_id: &str, envelope: &Envelope) -> Vec<(String, String)> {
    let g = &envelope.globals;
    let mut params = vec![
        ("v".to_string(), "1".to_string()),
        ("tid".to_string(), tracking_id.to_string()),
        ("cid".to_string(), g.client_id.to_string()),
        ("an".to_string(), format!("{}/{}", g.application_name, g.application_version)),
        ("aid".to_string(), g.plugin_name.clone()),
        ("av".to_string(), g.plugin_version.clone()),
    ];
    match &envelope.hit {
        Hit::Event {
            category,
            action,
            custom_dimensions,
        } => {
            params.push(("t".into(), "event".into()));
            params.push(("ec".into(), category.clone()));
            params.push(("ea".into(), action.clone()));
            for (idx, value) in custom_dimensions {
                params.push((format!("cd{idx}"), value.clone()));
            }
        }
        Hit::Timing {
            category,
            variable,
            time_ms,
        } => {
            params.push(("t".into(), "timing".into()));
            params.push(("utc".into(), category.clone()));
            params.push(("utv".into(), variable.clone()));
            params.push(("utt".into(), time_ms.to_string()));
        }
    }
    params
}

/// Sends hits to a measurement-protocol endpoint on a caller-supplied runtime.
#[derive(Clone, Debug)]
pub struct HttpCollector {
    tracking_id: String,
    endpoint: String,
    client: Client,
    runtime: Handle,
}

impl HttpCollector {
    pub fn new(tracking_id: impl Into<String>, endpoint: impl Into<String>, runtime: Handle) -> Self {
        Self::with_client(tracking_id, endpoint, Client::new(), runtime)
    }

    pub fn with_client(
        tracking_id: impl Into<String>,
        endpoint: impl Into<String>,
        client: Client,
        runtime: Handle,
    ) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            endpoint: endpoint.into(),
            client,
            runtime,
        }
    }

    pub fn tracking_id(&self) -> &str {
        &self.tracking_id
    }
}

impl Collector for HttpCollector {
    fn post_async(&self, envelope: Envelope) {
        let params = measurement_params(&self.tracking_id, &envelope);
        let url = match Url::parse_with_params(&self.endpoint, &params) {
            Ok(u) => u,
            Err(e) => {
                debug!("analytics endpoint {} rejected: {e}", self.endpoint);
                return;
            }
        };
        let client = self.client.clone();
        // detached
        self.runtime.spawn(async move {
            match client.get(url).send().await {
                Ok(r) if !r.status().is_success() => debug!("analytics hit non-2xx: {}", r.status()),
                Ok(_) => {}
                Err(e) => debug!("analytics hit dropped: {e}"),
            }
        });
    }
}

/// Records envelopes instead of sending them. Used for dry runs and tests.
#[derive(Default)]
pub struct InMemoryCollector {
    inner: Mutex<Vec<Envelope>>,
}

impl InMemoryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn envelopes(&self) -> Vec<Envelope> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Collector for InMemoryCollector {
    fn post_async(&self, envelope: Envelope) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).push(envelope);
    }
}
