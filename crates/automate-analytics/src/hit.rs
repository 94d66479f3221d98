use std::collections::BTreeMap;

use automate_core::ClientId;

/// A single usage hit, before the global dimensions are attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
    Event {
        category: String,
        action: String,
        custom_dimensions: BTreeMap<u8, String>,
    },
    Timing {
        category: String,
        variable: String,
        time_ms: u64,
    },
}

impl Hit {
    pub fn event(category: impl Into<String>, action: impl Into<String>) -> Self {
        Hit::Event {
            category: category.into(),
            action: action.into(),
            custom_dimensions: BTreeMap::new(),
        }
    }

    pub fn timing(category: impl Into<String>, variable: impl Into<String>, time_ms: u64) -> Self {
        Hit::Timing {
            category: category.into(),
            variable: variable.into(),
            time_ms,
        }
    }

    /// Sets custom dimension `index`. Timing hits carry no dimensions.
    pub fn with_dimension(mut self, index: u8, value: impl Into<String>) -> Self {
        if let Hit::Event { custom_dimensions, .. } = &mut self {
            custom_dimensions.insert(index, value.into());
        }
        self
    }

    pub fn category(&self) -> &str {
        match self {
            Hit::Event { category, .. } | Hit::Timing { category, .. } => category,
        }
    }
}

/// Dimensions attached to every hit regardless of its kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalProperties {
    pub client_id: ClientId,
    pub application_name: String,
    pub application_version: String,
    pub plugin_name: String,
    pub plugin_version: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub hit: Hit,
    pub globals: GlobalProperties,
}
