//! Configuration types for the topology registry.

/// Configuration for a [`Cluster`](crate::cluster::Cluster).
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Name of the cluster, attached to log records.
    pub name: String,

    /// Reject a node group whose id is already registered.
    ///
    /// Disabled by default: group id uniqueness is the caller's
    /// responsibility unless this is turned on.
    pub reject_duplicate_groups: bool,

    /// Install a [`LoggingEventListener`](crate::cluster::LoggingEventListener)
    /// when the cluster is created.
    pub event_logging: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            reject_duplicate_groups: false,
            event_logging: false,
        }
    }
}

impl ClusterConfig {
    /// Create a new configuration with the given cluster name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Enable or disable rejection of duplicate group ids.
    pub fn with_reject_duplicate_groups(mut self, enabled: bool) -> Self {
        self.reject_duplicate_groups = enabled;
        self
    }

    /// Enable or disable logging of topology events.
    pub fn with_event_logging(mut self, enabled: bool) -> Self {
        self.event_logging = enabled;
        self
    }
}
