use super::{create_test_storage, seed_quote, seed_source};
use crate::traits::QuoteStore;

#[test]
fn test_select_from_empty_store_returns_none() {
    let (storage, _dir) = create_test_storage();
    assert!(storage.select_and_view(0.5).unwrap().is_none());
}

#[test]
fn test_select_increments_views_of_chosen_quote_only() {
    let (storage, _dir) = create_test_storage();
    let source = seed_source(&storage, "S");
    let first = seed_quote(&storage, "first", source.id, 1);
    let second = seed_quote(&storage, "second", source.id, 1);

    // Total weight 2: draws below 0.5 land on the first quote.
    let picked = storage.select_and_view(0.1).unwrap().unwrap();
    assert_eq!(picked.id, first.id);
    assert_eq!(picked.views, 1);

    let picked = storage.select_and_view(0.9).unwrap().unwrap();
    assert_eq!(picked.id, second.id);

    let views: Vec<i64> = storage.list_quotes().unwrap().iter().map(|q| q.views).collect();
    assert_eq!(views, vec![1, 1]);
}

#[test]
fn test_zero_weight_quote_never_selected() {
    let (storage, _dir) = create_test_storage();
    let source = seed_source(&storage, "S");
    let retired = seed_quote(&storage, "retired", source.id, 0);
    let active = seed_quote(&storage, "active", source.id, 2);

    for draw in [0.0, 0.25, 0.5, 0.75, 0.999] {
        let picked = storage.select_and_view(draw).unwrap().unwrap();
        assert_eq!(picked.id, active.id);
    }
    assert_eq!(storage.get_quote(retired.id).unwrap().unwrap().views, 0);
}

#[test]
fn test_all_zero_weights_returns_none() {
    let (storage, _dir) = create_test_storage();
    let source = seed_source(&storage, "S");
    let quote = seed_quote(&storage, "hidden", source.id, 0);

    assert!(storage.select_and_view(0.3).unwrap().is_none());
    assert_eq!(storage.get_quote(quote.id).unwrap().unwrap().views, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_async_trait_selection_matches_sync() {
    let (storage, _dir) = create_test_storage();
    let source = seed_source(&storage, "S");
    let quote = seed_quote(&storage, "only one", source.id, 3);

    let picked = QuoteStore::select_and_view(&storage, 0.42).await.unwrap().unwrap();
    assert_eq!(picked.id, quote.id);
    assert_eq!(picked.views, 1);
}
