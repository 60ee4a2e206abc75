use crate::domain::model::{AppManifest, AppRecord};
use crate::utils::error::{Result, ServiceError};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_TOP_PICKS: usize = 4;

/// Read-only App Mart catalog, loaded once at startup and passed around by reference.
///
/// Every query returns a fresh `Vec`; the underlying records are never reordered or mutated.
#[derive(Debug, Clone)]
pub struct AppCatalog {
    apps: Vec<AppRecord>,
    categories: Vec<String>,
}

impl AppCatalog {
    pub fn new(apps: Vec<AppRecord>, categories: Vec<String>) -> Result<Self> {
        validate_records(&apps)?;
        Ok(Self { apps, categories })
    }

    /// 從 manifest JSON 檔案載入
    pub fn from_manifest_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(&path)?;
        tracing::debug!("Loaded manifest from {}", path.as_ref().display());
        Self::from_json_slice(&data)
    }

    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let manifest: AppManifest = serde_json::from_slice(data)?;
        Self::new(manifest.apps, manifest.categories)
    }

    pub fn all_apps(&self) -> &[AppRecord] {
        &self.apps
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn app_by_id(&self, id: u64) -> Option<&AppRecord> {
        self.apps.iter().find(|app| app.id == id)
    }

    pub fn apps_by_category(&self, category: &str) -> Vec<AppRecord> {
        let wanted = category.to_lowercase();
        self.apps
            .iter()
            .filter(|app| app.category.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    pub fn top_picks(&self, limit: usize) -> Vec<AppRecord> {
        ranked(self.apps.iter().filter(|app| app.is_top_pick), limit)
    }

    /// Same ordering as [`top_picks`](Self::top_picks), over the whole catalog.
    pub fn apps_by_rating(&self, limit: usize) -> Vec<AppRecord> {
        ranked(self.apps.iter(), limit)
    }

    /// Substring search over name, description, developer, tags and features.
    ///
    /// An empty or whitespace-only query means "nothing typed yet" and yields no results.
    pub fn search_apps(&self, query: &str) -> Vec<AppRecord> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let contains = |field: &str| field.to_lowercase().contains(&term);

        self.apps
            .iter()
            .filter(|app| {
                contains(app.name.as_str())
                    || contains(app.description.as_str())
                    || contains(app.developer.as_str())
                    || app.tags.iter().any(|tag| contains(tag.as_str()))
                    || app.features.iter().any(|feature| contains(feature.as_str()))
            })
            .cloned()
            .collect()
    }
}

fn by_rating_then_reviews(a: &AppRecord, b: &AppRecord) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| b.reviews.cmp(&a.reviews))
}

fn ranked<'a>(apps: impl Iterator<Item = &'a AppRecord>, limit: usize) -> Vec<AppRecord> {
    let mut ranked: Vec<AppRecord> = apps.cloned().collect();
    ranked.sort_by(by_rating_then_reviews);
    ranked.truncate(limit);
    ranked
}

fn validate_records(apps: &[AppRecord]) -> Result<()> {
    let mut seen_ids = HashSet::new();

    for app in apps {
        if !(0.0..=5.0).contains(&app.rating) {
            return Err(ServiceError::ValidationError {
                message: format!("app {} has rating {} outside [0, 5]", app.id, app.rating),
            });
        }
        if !app.price.is_finite() || app.price < 0.0 {
            return Err(ServiceError::ValidationError {
                message: format!("app {} has invalid price {}", app.id, app.price),
            });
        }
        if !seen_ids.insert(app.id) {
            return Err(ServiceError::ValidationError {
                message: format!("duplicate app id {}", app.id),
            });
        }
    }

    Ok(())
}
