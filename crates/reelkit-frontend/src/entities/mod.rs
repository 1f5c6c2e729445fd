use gpui::Entity;

pub mod downloads_entity;
pub mod overlay_entity;
pub mod recorder_entity;
pub mod scrape_entity;
pub mod settings_entity;

/// Handles to all per-component state entities, cloned into every page.
#[derive(Debug, Clone)]
pub struct DataEntities {
    pub settings: Entity<settings_entity::SettingsEntity>,
    pub scrape: Entity<scrape_entity::ScrapeEntity>,
    pub recorder: Entity<recorder_entity::RecorderEntity>,
    pub overlay: Entity<overlay_entity::OverlayEntity>,
    pub downloads: Entity<downloads_entity::DownloadsEntity>,
}
