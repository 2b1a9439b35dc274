use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOCATION: &str = "us-central1";
pub const DEFAULT_MODEL: &str = "virtual-try-on-preview-08-04";
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Where credentials come from. Read again on every token request.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// `GOOGLE_APPLICATION_CREDENTIALS_JSON`
    pub credentials_json: Option<String>,
    /// `GOOGLE_APPLICATION_CREDENTIALS`
    pub credentials_path: Option<PathBuf>,
    /// `GCE_METADATA_HOST`
    pub metadata_host: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            credentials_json: None,
            credentials_path: None,
            metadata_host: DEFAULT_METADATA_HOST.to_string(),
        }
    }
}

impl AuthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        AuthConfig {
            credentials_json: non_empty_var("GOOGLE_APPLICATION_CREDENTIALS_JSON"),
            credentials_path: non_empty_var("GOOGLE_APPLICATION_CREDENTIALS").map(PathBuf::from),
            metadata_host: non_empty_var("GCE_METADATA_HOST")
                .unwrap_or_else(|| DEFAULT_METADATA_HOST.to_string()),
        }
    }

    pub fn with_credentials_json(mut self, json: impl Into<String>) -> Self {
        self.credentials_json = Some(json.into());
        self
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    pub fn with_metadata_host(mut self, host: impl Into<String>) -> Self {
        self.metadata_host = host.into();
        self
    }
}

/// Settings for the Vertex AI prediction call.
#[derive(Debug, Clone)]
pub struct VertexConfig {
    /// `GOOGLE_CLOUD_PROJECT`; checked on every call, not at startup.
    pub project_id: Option<String>,
    /// `GOOGLE_CLOUD_LOCATION`
    pub location: Option<String>,
    /// `VERTEX_API_ENDPOINT`, replaces `https://{location}-aiplatform.googleapis.com`.
    pub api_endpoint: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for VertexConfig {
    fn default() -> Self {
        VertexConfig {
            project_id: None,
            location: None,
            api_endpoint: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl VertexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let timeout = env::var("TRY_ON_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        VertexConfig {
            project_id: non_empty_var("GOOGLE_CLOUD_PROJECT"),
            location: non_empty_var("GOOGLE_CLOUD_LOCATION"),
            api_endpoint: non_empty_var("VERTEX_API_ENDPOINT"),
            model: DEFAULT_MODEL.to_string(),
            timeout,
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }

    /// Full `:predict` URL for the given project.
    pub fn predict_url(&self, project_id: &str) -> String {
        let location = self.location();
        let base = match &self.api_endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}-aiplatform.googleapis.com", location),
        };
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:predict",
            base, project_id, location, self.model
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub public_dir: PathBuf,
    pub max_body_bytes: usize,
    pub vertex: VertexConfig,
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from("public"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            vertex: VertexConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Config::default();
        let host = env::var("HOST")
            .ok()
            .and_then(|host| host.parse().ok())
            .unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(defaults.port);
        let public_dir = non_empty_var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.public_dir);
        let max_body_bytes = env::var("MAX_BODY_BYTES")
            .ok()
            .and_then(|bytes| bytes.parse().ok())
            .unwrap_or(defaults.max_body_bytes);

        Config {
            host,
            port,
            public_dir,
            max_body_bytes,
            vertex: VertexConfig::from_env(),
            auth: AuthConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    pub fn with_vertex(mut self, vertex: VertexConfig) -> Self {
        self.vertex = vertex;
        self
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
