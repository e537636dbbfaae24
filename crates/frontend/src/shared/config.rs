use contracts::shared::pagination::MIN_VISIBLE_PAGES;
use contracts::shared::upload::UploadLimits;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DashboardConfig {
    pub pagination: PaginationConfig,
    pub upload: UploadLimits,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaginationConfig {
    /// Default rows per page
    pub page_size: usize,
    /// Choices offered by the page size selector
    pub page_size_options: Vec<usize>,
    /// Width of the page-button window, anchors included
    pub max_visible_pages: usize,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[pagination]
page_size = 10
page_size_options = [10, 25, 50, 100]
max_visible_pages = 7

[upload]
max_files = 10
allowed_types = ["image/jpeg", "image/png", "image/webp"]
max_size_bytes = 10485760
"#;

/// Load dashboard configuration
///
/// Search order:
/// 1. `DASHBOARD_CONFIG` set at build time (TOML text)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<DashboardConfig> {
    if let Some(contents) = option_env!("DASHBOARD_CONFIG") {
        match parse_config(contents) {
            Ok(config) => {
                log::info!("Using DASHBOARD_CONFIG from build environment");
                return Ok(config);
            }
            Err(e) => log::warn!("DASHBOARD_CONFIG ignored: {:#}", e),
        }
    }

    log::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Parse and validate a TOML configuration document
pub fn parse_config(contents: &str) -> anyhow::Result<DashboardConfig> {
    let mut config: DashboardConfig = toml::from_str(contents)?;
    config.pagination.validate()?;
    config.upload = config.upload.validated()?;
    Ok(config)
}

impl PaginationConfig {
    fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("pagination.page_size must be positive");
        }
        if self.page_size_options.contains(&0) {
            anyhow::bail!("pagination.page_size_options must not contain 0");
        }
        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&self.page_size) {
            anyhow::bail!(
                "pagination.page_size {} is not one of page_size_options",
                self.page_size
            );
        }
        if self.max_visible_pages < MIN_VISIBLE_PAGES {
            anyhow::bail!(
                "pagination.max_visible_pages must be at least {}",
                MIN_VISIBLE_PAGES
            );
        }
        Ok(())
    }
}
