//! Tool-discovery manifest
//!
//! Describes the `/analyze` endpoint to agent platforms that discover
//! tools over HTTP. Served at `/discovery` and printed by `preflight manifest`.

use serde::{Deserialize, Serialize};

/// Function name advertised to discovery clients
pub const FUNCTION_NAME: &str = "test_readiness_analyzer";

/// JSON type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// Free text or ISO date
    String,
    /// Floating point
    Number,
    /// Whole number
    Integer,
    /// List of strings
    Array,
}

/// One accepted parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Field name in the request body
    pub name: String,
    /// JSON type
    #[serde(rename = "type")]
    pub kind: ParameterType,
    /// Human description
    pub description: String,
    /// Whether the field must be present
    pub required: bool,
}

impl ParameterSpec {
    fn new(name: &str, kind: ParameterType, description: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required,
        }
    }
}

/// One callable function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Function name
    pub name: String,
    /// When to call it
    pub description: String,
    /// Accepted parameters
    pub parameters: Vec<ParameterSpec>,
    /// Path to POST to
    pub endpoint: String,
    /// HTTP method
    pub http_method: String,
    /// Auth schemes required, empty for none
    pub auth_requirements: Vec<String>,
}

/// Discovery document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryManifest {
    /// Advertised functions
    pub functions: Vec<FunctionSpec>,
}

impl DiscoveryManifest {
    /// Look up a function by name
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Build the manifest for this service
#[must_use]
pub fn discovery_manifest() -> DiscoveryManifest {
    use ParameterType::{Array, Integer, Number};

    let parameters = vec![
        ParameterSpec::new(
            "hypothesis",
            ParameterType::String,
            "What the test changes, the expected outcome, and why",
            true,
        ),
        ParameterSpec::new(
            "baseline_conversion_rate",
            Number,
            "Current conversion rate of the control, between 0 and 1",
            true,
        ),
        ParameterSpec::new(
            "minimum_detectable_effect",
            Number,
            "Smallest absolute change in conversion rate worth detecting, between 0 and 1",
            true,
        ),
        ParameterSpec::new("daily_traffic", Integer, "Visitors entering the test per day", true),
        ParameterSpec::new(
            "number_of_variations",
            Integer,
            "Number of variations including the control (default 2)",
            false,
        ),
        ParameterSpec::new("primary_metric", ParameterType::String, "Metric that decides the test", true),
        ParameterSpec::new(
            "secondary_metrics",
            Array,
            "Metrics monitored alongside the primary metric",
            false,
        ),
        ParameterSpec::new(
            "test_start_date",
            ParameterType::String,
            "Planned launch date (RFC 3339)",
            false,
        ),
    ];

    DiscoveryManifest {
        functions: vec![FunctionSpec {
            name: FUNCTION_NAME.to_string(),
            description: "Checks an A/B test proposal for statistical validity, hypothesis \
                          quality and design best practices. Use it when someone wants to know \
                          whether an experiment is ready to launch."
                .to_string(),
            parameters,
            endpoint: "/analyze".to_string(),
            http_method: "POST".to_string(),
            auth_requirements: Vec::new(),
        }],
    }
}
