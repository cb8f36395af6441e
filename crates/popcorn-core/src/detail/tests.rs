use super::*;
use crate::test_support::{detail, transport_error, ScriptedCatalog};
use crate::watched::WatchedStore;

fn controller(catalog: &Arc<ScriptedCatalog>) -> (DetailController, SharedWatched) {
    let source: Arc<dyn CatalogSource> = catalog.clone();
    let watched = WatchedStore::shared();
    let controller = DetailController::new(
        source,
        Arc::clone(&watched),
        10,
        StateNotifier::new(),
        Handle::current(),
    );
    (controller, watched)
}

#[tokio::test]
async fn test_select_fetches_detail() {
    let catalog = ScriptedCatalog::new();
    let (details, _) = controller(&catalog);
    let reply = catalog.pending_detail("tt1");

    let handle = details.select("tt1").unwrap();
    assert_eq!(details.selected_id().as_deref(), Some("tt1"));
    assert!(details.is_loading());
    assert!(details.detail().is_none());

    reply.send(Ok(detail("tt1", "Batman", "126 min", 7.5))).unwrap();
    handle.await.unwrap();

    assert!(!details.is_loading());
    assert_eq!(details.detail().unwrap().title, "Batman");
}

#[tokio::test]
async fn test_selecting_selected_title_closes_without_fetch() {
    let catalog = ScriptedCatalog::new();
    let (details, _) = controller(&catalog);
    catalog.respond_detail("tt1", Ok(detail("tt1", "Batman", "126 min", 7.5)));

    details.select("tt1").unwrap().await.unwrap();
    assert!(details.select("tt1").is_none());

    assert!(details.selected_id().is_none());
    assert!(details.detail().is_none());
    assert_eq!(catalog.detail_calls(), 1);
}

#[tokio::test]
async fn test_switching_selection_discards_stale_detail() {
    let catalog = ScriptedCatalog::ignoring_cancellation();
    let (details, _) = controller(&catalog);
    let reply_1 = catalog.pending_detail("tt1");
    let reply_2 = catalog.pending_detail("tt2");

    let handle_1 = details.select("tt1").unwrap();
    details.set_user_rating(6).unwrap();
    let handle_2 = details.select("tt2").unwrap();
    assert_eq!(details.user_rating(), None);

    reply_2.send(Ok(detail("tt2", "Batgirl", "90 min", 5.0))).unwrap();
    handle_2.await.unwrap();
    reply_1.send(Ok(detail("tt1", "Batman", "126 min", 7.5))).unwrap();
    handle_1.await.unwrap();

    let snapshot = details.snapshot();
    assert_eq!(snapshot.selected_id.as_deref(), Some("tt2"));
    assert_eq!(snapshot.detail.unwrap().title, "Batgirl");
    assert!(!snapshot.is_loading);
}

#[tokio::test]
async fn test_stale_detail_never_fills_new_selection() {
    let catalog = ScriptedCatalog::ignoring_cancellation();
    let (details, _) = controller(&catalog);
    let reply_1 = catalog.pending_detail("tt1");
    let _reply_2 = catalog.pending_detail("tt2");

    let handle_1 = details.select("tt1").unwrap();
    let _handle_2 = details.select("tt2").unwrap();

    reply_1.send(Ok(detail("tt1", "Batman", "126 min", 7.5))).unwrap();
    handle_1.await.unwrap();

    // Still waiting on tt2, with nothing from tt1 merged in
    let snapshot = details.snapshot();
    assert_eq!(snapshot.selected_id.as_deref(), Some("tt2"));
    assert!(snapshot.is_loading);
    assert!(snapshot.detail.is_none());
}

#[tokio::test]
async fn test_fetch_failure_is_reported() {
    let catalog = ScriptedCatalog::new();
    let (details, _) = controller(&catalog);
    catalog.respond_detail("tt1", Err(transport_error("timed out")));

    details.select("tt1").unwrap().await.unwrap();

    let snapshot = details.snapshot();
    assert!(snapshot.is_open());
    assert!(!snapshot.is_loading);
    assert!(snapshot.detail.is_none());
    assert_eq!(snapshot.error.as_deref(), Some("Something went wrong with movie fetching"));
}

#[tokio::test]
async fn test_close_is_unconditional() {
    let catalog = ScriptedCatalog::new();
    let (details, _) = controller(&catalog);
    let _reply = catalog.pending_detail("tt1");

    let handle = details.select("tt1").unwrap();
    details.close();
    handle.await.unwrap();
    details.close();

    assert!(details.selected_id().is_none());
    assert!(details.detail().is_none());
    assert!(!details.is_loading());
}

#[tokio::test]
async fn test_confirm_add_requires_rating() {
    let catalog = ScriptedCatalog::new();
    let (details, watched) = controller(&catalog);
    catalog.respond_detail("tt1", Ok(detail("tt1", "Batman", "126 min", 7.5)));
    details.select("tt1").unwrap().await.unwrap();

    assert_eq!(details.confirm_add(), Err(SessionError::NoRating));
    assert_eq!(details.set_user_rating(0), Err(SessionError::RatingOutOfRange { value: 0, max: 10 }));
    assert_eq!(details.set_user_rating(11), Err(SessionError::RatingOutOfRange { value: 11, max: 10 }));
    assert_eq!(details.confirm_add(), Err(SessionError::NoRating));

    assert!(lock(&watched).is_empty());
    assert_eq!(details.selected_id().as_deref(), Some("tt1"));
}

#[tokio::test]
async fn test_confirm_add_requires_loaded_detail() {
    let catalog = ScriptedCatalog::new();
    let (details, watched) = controller(&catalog);
    let _reply = catalog.pending_detail("tt1");

    let _handle = details.select("tt1").unwrap();
    details.set_user_rating(7).unwrap();

    assert_eq!(details.confirm_add(), Err(SessionError::DetailNotLoaded));
    assert!(lock(&watched).is_empty());
}

#[tokio::test]
async fn test_confirm_add_builds_entry_and_closes() {
    let catalog = ScriptedCatalog::new();
    let (details, watched) = controller(&catalog);
    catalog.respond_detail("tt1", Ok(detail("tt1", "Batman", "126 min", 7.5)));
    details.select("tt1").unwrap().await.unwrap();

    details.set_user_rating(8).unwrap();
    let entry = details.confirm_add().unwrap();

    assert_eq!(entry.id, "tt1");
    assert_eq!(entry.user_rating, 8);
    assert_eq!(entry.runtime_minutes, 126);
    assert_eq!(entry.catalog_rating, 7.5);
    assert!(details.selected_id().is_none());

    let store = lock(&watched);
    assert_eq!(store.len(), 1);
    assert_eq!(store.summary().avg_user_rating, 8.0);
}

#[tokio::test]
async fn test_confirm_add_keys_entry_by_selected_id() {
    let catalog = ScriptedCatalog::new();
    let (details, watched) = controller(&catalog);
    // The catalog answers with a different id than the one requested
    catalog.respond_detail("tt1", Ok(detail("tt1-canonical", "Batman", "126 min", 7.5)));
    details.select("tt1").unwrap().await.unwrap();

    details.set_user_rating(8).unwrap();
    let entry = details.confirm_add().unwrap();
    assert_eq!(entry.id, "tt1");
    assert!(lock(&watched).contains("tt1"));

    catalog.respond_detail("tt1", Ok(detail("tt1-canonical", "Batman", "126 min", 7.5)));
    details.select("tt1").unwrap().await.unwrap();
    assert!(details.is_watched());
    assert_eq!(details.watched_user_rating(), Some(8));
    assert_eq!(details.set_user_rating(3), Err(SessionError::AlreadyWatched("tt1".to_string())));
    assert_eq!(lock(&watched).len(), 1);
}

#[tokio::test]
async fn test_watched_title_exposes_stored_rating() {
    let catalog = ScriptedCatalog::new();
    let (details, watched) = controller(&catalog);
    {
        let mut store = lock(&watched);
        store.add(WatchedEntry::from_detail(&detail("tt1", "Batman", "126 min", 7.5), 9));
    }
    catalog.respond_detail("tt1", Ok(detail("tt1", "Batman", "126 min", 7.5)));
    details.select("tt1").unwrap().await.unwrap();

    assert!(details.is_watched());
    assert_eq!(details.watched_user_rating(), Some(9));
    assert_eq!(details.set_user_rating(4), Err(SessionError::AlreadyWatched("tt1".to_string())));
    assert_eq!(details.confirm_add(), Err(SessionError::NoRating));
    assert_eq!(lock(&watched).len(), 1);
}

#[tokio::test]
async fn test_rating_without_selection() {
    let catalog = ScriptedCatalog::new();
    let (details, _) = controller(&catalog);
    assert_eq!(details.set_user_rating(5), Err(SessionError::NoSelection));
    assert_eq!(details.confirm_add(), Err(SessionError::NoSelection));
    assert!(!details.is_watched());
}
