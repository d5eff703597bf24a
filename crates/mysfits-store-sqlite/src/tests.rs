//! Integration tests for `SqliteStore` against an in-memory database.

use mysfits_core::{
  mysfit::{FilterField, GoodEvil, LawChaos, Mysfit},
  store::MysfitStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn mysfit(id: &str, good_evil: GoodEvil, law_chaos: LawChaos) -> Mysfit {
  Mysfit {
    mysfit_id:         id.into(),
    name:              format!("Mysfit {id}"),
    species:           "Yeti".into(),
    description:       "Lives in the freezer.".into(),
    age:               12,
    good_evil,
    law_chaos,
    thumb_image_uri:   format!("https://example.com/{id}_thumb.png"),
    profile_image_uri: format!("https://example.com/{id}.png"),
    likes:             0,
    adopted:           false,
  }
}

async fn seeded() -> SqliteStore {
  let s = store().await;
  for m in [
    mysfit("a1", GoodEvil::Evil, LawChaos::Lawful),
    mysfit("b2", GoodEvil::Good, LawChaos::Chaotic),
    mysfit("c3", GoodEvil::Evil, LawChaos::Neutral),
    mysfit("d4", GoodEvil::Neutral, LawChaos::Chaotic),
  ] {
    s.upsert(m).await.unwrap();
  }
  s
}

fn sorted_ids(rows: &[Mysfit]) -> Vec<&str> {
  let mut ids: Vec<&str> = rows.iter().map(|m| m.mysfit_id.as_str()).collect();
  ids.sort_unstable();
  ids
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_nothing() {
  let s = store().await;
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn upsert_and_get_round_trips_every_column() {
  let s = store().await;
  let mut m = mysfit("x9", GoodEvil::Neutral, LawChaos::Lawful);
  m.likes = 41;
  m.adopted = true;

  s.upsert(m.clone()).await.unwrap();
  let fetched = s.get_by_id("x9").await.unwrap();
  assert_eq!(fetched, Some(m));
}

#[tokio::test]
async fn upsert_assigns_id_when_empty() {
  let s = store().await;
  let stored = s
    .upsert(mysfit("", GoodEvil::Good, LawChaos::Lawful))
    .await
    .unwrap();
  assert!(!stored.mysfit_id.is_empty());
  assert!(s.get_by_id(&stored.mysfit_id).await.unwrap().is_some());
}

#[tokio::test]
async fn upsert_replaces_existing_row() {
  let s = seeded().await;
  let mut m = mysfit("a1", GoodEvil::Good, LawChaos::Lawful);
  m.name = "Renamed".into();
  s.upsert(m).await.unwrap();

  assert_eq!(s.list_all().await.unwrap().len(), 4);
  let fetched = s.get_by_id("a1").await.unwrap().unwrap();
  assert_eq!(fetched.name, "Renamed");
  assert_eq!(fetched.good_evil, GoodEvil::Good);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = seeded().await;
  assert!(s.get_by_id("doesNotExist").await.unwrap().is_none());
}

#[tokio::test]
async fn filter_on_good_evil() {
  let s = seeded().await;
  let evil = s.filter(FilterField::GoodEvil, "Evil").await.unwrap();
  assert_eq!(sorted_ids(&evil), vec!["a1", "c3"]);
  assert!(evil.iter().all(|m| m.good_evil == GoodEvil::Evil));
}

#[tokio::test]
async fn filter_on_law_chaos() {
  let s = seeded().await;
  let chaotic = s.filter(FilterField::LawChaos, "Chaotic").await.unwrap();
  assert_eq!(sorted_ids(&chaotic), vec!["b2", "d4"]);
}

#[tokio::test]
async fn filter_is_exact_match() {
  let s = seeded().await;
  assert!(s.filter(FilterField::GoodEvil, "EVIL").await.unwrap().is_empty());
  assert!(s.filter(FilterField::GoodEvil, "Evi").await.unwrap().is_empty());
}

// ─── Mutations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn increment_likes_adds_one() {
  let s = seeded().await;
  let before = s.get_by_id("b2").await.unwrap().unwrap().likes;
  assert!(s.increment_likes("b2").await.unwrap());
  let after = s.get_by_id("b2").await.unwrap().unwrap().likes;
  assert_eq!(after, before + 1);
}

#[tokio::test]
async fn concurrent_likes_are_not_lost() {
  let s = seeded().await;
  let before = s.get_by_id("c3").await.unwrap().unwrap().likes;

  let handles: Vec<_> = (0..32)
    .map(|_| {
      let s = s.clone();
      tokio::spawn(async move { s.increment_likes("c3").await })
    })
    .collect();
  for h in handles {
    assert!(h.await.unwrap().unwrap());
  }

  let after = s.get_by_id("c3").await.unwrap().unwrap().likes;
  assert_eq!(after, before + 32);
}

#[tokio::test]
async fn set_adopted_is_idempotent() {
  let s = seeded().await;
  assert!(s.set_adopted("d4").await.unwrap());
  assert!(s.get_by_id("d4").await.unwrap().unwrap().adopted);

  assert!(s.set_adopted("d4").await.unwrap());
  assert!(s.get_by_id("d4").await.unwrap().unwrap().adopted);
}

#[tokio::test]
async fn mutations_on_missing_id_report_no_match() {
  let s = seeded().await;
  assert!(!s.increment_likes("nope").await.unwrap());
  assert!(!s.set_adopted("nope").await.unwrap());
  assert_eq!(s.list_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn upsert_rejects_likes_beyond_integer_range() {
  let s = store().await;
  let mut m = mysfit("big", GoodEvil::Good, LawChaos::Lawful);
  m.likes = u64::MAX;
  let err = s.upsert(m).await.unwrap_err();
  assert!(matches!(err, crate::Error::CounterTooLarge { column: "likes", .. }));
}
