use std::path::PathBuf;

/// Default font shipped with the crate.
pub const DEFAULT_FONT_PATH: &str = "assets/fonts/DejaVuSans.ttf";

/// Process-level settings for the HTTP service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Font read on every request, relative to the working directory.
    pub font_path: PathBuf,
    /// Render worker threads; `None` lets rayon pick one per core.
    pub threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9090,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            threads: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
