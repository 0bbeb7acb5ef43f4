//! URL templates for the data plane, the index controller and the collections controller.
//!
//! Everything here is plain string substitution. Empty inputs are not rejected;
//! they simply produce an unusable URL that fails later when the request is built.

/// Collections are managed on a single controller regardless of the index environment.
pub const COLLECTIONS_BASE_URL: &str = "https://controller.us-west4-gcp.pinecone.io/collections";

/// Data-plane operations exposed by an index host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataPlaneOp {
    DescribeIndexStats,
    Query,
    Upsert,
    Delete,
    Fetch,
}

impl DataPlaneOp {
    /// Path segment appended to the index host.
    pub fn path(self) -> &'static str {
        match self {
            DataPlaneOp::DescribeIndexStats => "describe_index_stats",
            DataPlaneOp::Query => "query",
            DataPlaneOp::Upsert => "vectors/upsert",
            DataPlaneOp::Delete => "vectors/delete",
            DataPlaneOp::Fetch => "vectors/fetch",
        }
    }
}

/// `https://{index}-{project}.svc.{environment}.pinecone.io/{op}`
pub fn resolve(environment: &str, project_id: &str, index_name: &str, op: DataPlaneOp) -> String {
    format!(
        "https://{}-{}.svc.{}.pinecone.io/{}",
        index_name,
        project_id,
        environment,
        op.path()
    )
}

/// `https://controller.{environment}.pinecone.io/databases`
pub fn controller_url(environment: &str) -> String {
    format!("https://controller.{}.pinecone.io/databases", environment)
}

/// Resolves every URL the clients need for one project.
///
/// When `base_url` is set (a proxy or a local mock), all three planes are
/// served from it: `{base}/{op}`, `{base}/databases[/{index}]` and
/// `{base}/collections[/{name}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResolver {
    environment: String,
    project_id: String,
    base_url: Option<String>,
}

impl EndpointResolver {
    pub fn new(environment: impl Into<String>, project_id: impl Into<String>) -> Self {
        EndpointResolver {
            environment: environment.into(),
            project_id: project_id.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        self.base_url = Some(base.trim_end_matches('/').to_string());
        self
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn data_plane(&self, index_name: &str, op: DataPlaneOp) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}", base, op.path()),
            None => resolve(&self.environment, &self.project_id, index_name, op),
        }
    }

    /// Index list / create when `index_name` is `None`, a single index otherwise.
    pub fn indexes(&self, index_name: Option<&str>) -> String {
        let base = match &self.base_url {
            Some(base) => format!("{}/databases", base),
            None => controller_url(&self.environment),
        };
        append_segment(base, index_name)
    }

    /// Collection list / create when `name` is `None`, a single collection otherwise.
    pub fn collections(&self, name: Option<&str>) -> String {
        let base = match &self.base_url {
            Some(base) => format!("{}/collections", base),
            None => COLLECTIONS_BASE_URL.to_string(),
        };
        append_segment(base, name)
    }
}

fn append_segment(base: String, segment: Option<&str>) -> String {
    match segment {
        Some(segment) => format!("{}/{}", base, segment),
        None => base,
    }
}
