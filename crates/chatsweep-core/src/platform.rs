//! Platform registry: which DOM descriptors apply to the current page.

use chatsweep_config::{Config, PlatformDescriptor};
use chatsweep_protocols::ItemQuery;
use tracing::debug;

/// Pure lookup from host name to platform descriptor.
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    platforms: Vec<PlatformDescriptor>,
}

impl PlatformRegistry {
    pub fn new(platforms: Vec<PlatformDescriptor>) -> Self {
        Self { platforms }
    }

    /// Built-in table merged with the configuration's overrides.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.effective_platforms())
    }

    /// The descriptor serving `host`, if any. Later entries cannot shadow
    /// earlier ones; the first match wins.
    pub fn detect(&self, host: &str) -> Option<&PlatformDescriptor> {
        let found = self.platforms.iter().find(|p| p.matches_host(host));
        debug!(host, platform = found.map(|p| p.name.as_str()), "Platform detection");
        found
    }

    pub fn get(&self, name: &str) -> Option<&PlatformDescriptor> {
        self.platforms.iter().find(|p| p.name == name)
    }

    pub fn platforms(&self) -> &[PlatformDescriptor] {
        &self.platforms
    }
}

/// Query used to enumerate a platform's selectable rows.
pub fn item_query(platform: &PlatformDescriptor) -> ItemQuery {
    ItemQuery {
        item_selector: platform.item_selector.clone(),
        title_selector: platform.title_selector.clone(),
        id_attribute: platform.id_attribute.clone(),
    }
}
