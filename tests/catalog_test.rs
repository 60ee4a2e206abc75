use portfolio_services::{format_price, format_review_count, AppCatalog};
use std::io::Write;
use tempfile::NamedTempFile;

fn manifest() -> serde_json::Value {
    serde_json::json!({
        "apps": [
            {
                "id": 1, "name": "Netflix", "developer": "Netflix, Inc.", "category": "Entertainment",
                "rating": 4.5, "reviews": 2500000, "price": 0,
                "description": "Stream award-winning TV shows, movies, anime, documentaries, and more on your phone.",
                "features": ["Download titles to watch offline", "Multi-language support"],
                "tags": ["streaming", "video", "entertainment"],
                "installationStatus": {"isInstalled": false},
                "isTopPick": true
            },
            {
                "id": 2, "name": "Spotify", "developer": "Spotify AB", "category": "Entertainment",
                "rating": 4.7, "reviews": 3200000, "price": 0,
                "description": "Listen to your favorite music, podcasts, and more.",
                "features": ["Offline playback", "Playlist creation"],
                "tags": ["music", "audio", "streaming"],
                "installationStatus": {"isInstalled": true},
                "isTopPick": true
            },
            {
                "id": 3, "name": "Minecraft", "developer": "Mojang", "category": "Games",
                "rating": 4.5, "reviews": 1000000, "price": 7.99,
                "description": "Build, create, and explore infinite worlds.",
                "features": ["Multiplayer", "Creative mode"],
                "tags": ["games", "creative", "building"],
                "isTopPick": true
            },
            {
                "id": 4, "name": "Instagram", "developer": "Meta", "category": "Social",
                "rating": 4.3, "reviews": 4500000, "price": 0,
                "description": "Share photos and videos with friends.",
                "features": ["Photo filters", "Stories"],
                "tags": ["social", "photos", "sharing"],
                "isTopPick": true
            },
            {
                "id": 5, "name": "Zoom", "developer": "Zoom Video Communications", "category": "Business",
                "rating": 4.9, "reviews": 1900000, "price": 0,
                "description": "Video conferencing and messaging.",
                "features": ["HD video", "Screen sharing"],
                "tags": ["business", "video", "conferencing"],
                "isTopPick": false
            }
        ],
        "categories": ["Entertainment", "Social", "Games", "Business", "Finance", "Travel"]
    })
}

fn catalog() -> AppCatalog {
    AppCatalog::from_json_slice(manifest().to_string().as_bytes()).unwrap()
}

fn names(apps: &[portfolio_services::domain::model::AppRecord]) -> Vec<&str> {
    apps.iter().map(|a| a.name.as_str()).collect()
}

#[test]
fn test_load_manifest_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(manifest().to_string().as_bytes())
        .unwrap();

    let catalog = AppCatalog::from_manifest_file(temp_file.path()).unwrap();

    assert_eq!(catalog.all_apps().len(), 5);
    assert_eq!(catalog.categories().len(), 6);
    assert!(catalog.app_by_id(2).unwrap().is_installed());
    assert!(!catalog.app_by_id(3).unwrap().is_installed());
    assert!(catalog.app_by_id(99).is_none());
}

#[test]
fn test_missing_manifest_is_an_error() {
    assert!(AppCatalog::from_manifest_file("does/not/exist.json").is_err());
}

#[test]
fn test_top_picks_ranking() {
    let catalog = catalog();

    // Zoom has the best rating but is not a top pick
    assert_eq!(names(&catalog.top_picks(2)), vec!["Spotify", "Netflix"]);
    assert_eq!(
        names(&catalog.top_picks(10)),
        vec!["Spotify", "Netflix", "Minecraft", "Instagram"]
    );
    assert!(catalog.top_picks(0).is_empty());
}

#[test]
fn test_apps_by_rating_covers_whole_catalog() {
    let catalog = catalog();
    assert_eq!(names(&catalog.apps_by_rating(2)), vec!["Zoom", "Spotify"]);
    assert_eq!(catalog.all_apps()[0].name, "Netflix");
}

#[test]
fn test_category_filter_is_case_insensitive() {
    let catalog = catalog();

    let upper = catalog.apps_by_category("ENTERTAINMENT");
    let lower = catalog.apps_by_category("entertainment");

    assert_eq!(upper, lower);
    assert_eq!(names(&upper), vec!["Netflix", "Spotify"]);
    assert!(catalog.apps_by_category("NonExistentCategory").is_empty());
    assert!(catalog.apps_by_category("Finance").is_empty());
}

#[test]
fn test_search_matches_every_field() {
    let catalog = catalog();

    assert_eq!(names(&catalog.search_apps("netflix")), vec!["Netflix"]);
    // description
    assert_eq!(names(&catalog.search_apps("podcasts")), vec!["Spotify"]);
    // developer
    assert_eq!(names(&catalog.search_apps("Meta")), vec!["Instagram"]);
    // tags
    assert_eq!(names(&catalog.search_apps("streaming")), vec!["Netflix", "Spotify"]);
    // features
    assert_eq!(names(&catalog.search_apps("offline")), vec!["Netflix", "Spotify"]);
}

#[test]
fn test_search_is_case_insensitive_and_trims() {
    let catalog = catalog();
    assert_eq!(catalog.search_apps("NETFLIX"), catalog.search_apps("netflix"));
    assert_eq!(catalog.search_apps("  Netflix  "), catalog.search_apps("netflix"));
}

#[test]
fn test_search_empty_or_unknown_query() {
    let catalog = catalog();
    assert!(catalog.search_apps("").is_empty());
    assert!(catalog.search_apps(" \t ").is_empty());
    assert!(catalog.search_apps("XYZNonExistentApp123").is_empty());
}

#[test]
fn test_out_of_range_rating_rejected_at_load() {
    let mut raw = manifest();
    raw["apps"][0]["rating"] = serde_json::json!(7.5);
    assert!(AppCatalog::from_json_slice(raw.to_string().as_bytes()).is_err());
}

#[test]
fn test_display_formatting_for_listing() {
    let catalog = catalog();
    let minecraft = catalog.app_by_id(3).unwrap();
    let netflix = catalog.app_by_id(1).unwrap();

    assert_eq!(format_price(minecraft.price), "$7.99");
    assert_eq!(format_price(netflix.price), "Free");
    assert_eq!(format_review_count(netflix.reviews), "2.5M");
    assert_eq!(format_review_count(minecraft.reviews), "1M");
    assert_eq!(format_review_count(999), "999");
}
