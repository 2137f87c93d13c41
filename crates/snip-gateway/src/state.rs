use std::sync::Arc;

use snip_core::Shortener;
use snip_redirector::{Redirector, StatsReader};

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    redirector: Arc<dyn Redirector>,
    stats: Arc<dyn StatsReader>,
}

impl AppState {
    pub fn new(
        shortener: Arc<dyn Shortener>,
        redirector: Arc<dyn Redirector>,
        stats: Arc<dyn StatsReader>,
    ) -> Self {
        Self {
            shortener,
            redirector,
            stats,
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn redirector(&self) -> &dyn Redirector {
        self.redirector.as_ref()
    }

    pub fn stats(&self) -> &dyn StatsReader {
        self.stats.as_ref()
    }
}
