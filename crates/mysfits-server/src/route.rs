//! Request classification.
//!
//! A request is reduced to `(method, path segments, query)` and matched
//! against one explicit table. Segment count decides the branch, so a path
//! with missing or extra segments falls through to a bad request instead of
//! reaching the wrong handler. Segments are percent-decoded after the split,
//! so an encoded `/` stays inside its segment. Nothing here touches the store.

use std::{borrow::Cow, str::Utf8Error};

use axum::http::Method;
use percent_encoding::percent_decode_str;
use serde::Deserialize;

/// The `filter` / `value` query parameters accepted on the collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionQuery {
  pub filter: Option<String>,
  pub value:  Option<String>,
}

/// What a request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  Health,
  ListAll,
  Filter { field: String, value: String },
  GetById(String),
  Like(String),
  Adopt(String),
  BadRequest(&'static str),
  UnknownResource,
  MethodNotAllowed,
}

pub const FILTER_NEEDS_VALUE: &str =
  "`filter` and `value` must both be given and non-empty";
pub const EMPTY_ID: &str = "mysfit id must not be empty";
pub const TOO_DEEP: &str = "expected /{collection} or /{collection}/{id}";
pub const BAD_MUTATION: &str =
  "expected POST /{collection}/{id}/like or /{collection}/{id}/adopt";
pub const BAD_ENCODING: &str = "path segments must be percent-encoded UTF-8";

/// Split a path on `/`, dropping only the empty leading segment, and
/// percent-decode each segment.
///
/// `/` yields `[""]`; `/misfits/` yields `["misfits", ""]`;
/// `/misfits/a%2Fb` yields `["misfits", "a/b"]`.
pub fn segments(path: &str) -> Result<Vec<Cow<'_, str>>, Utf8Error> {
  path
    .strip_prefix('/')
    .unwrap_or(path)
    .split('/')
    .map(|segment| percent_decode_str(segment).decode_utf8())
    .collect()
}

pub fn classify(
  method: &Method,
  path: &str,
  query: &CollectionQuery,
  collection: &str,
) -> Route {
  let decoded = match segments(path) {
    Ok(decoded) => decoded,
    Err(_) if *method == Method::GET || *method == Method::POST => {
      return Route::BadRequest(BAD_ENCODING);
    }
    Err(_) => return Route::MethodNotAllowed,
  };
  let segments: Vec<&str> = decoded.iter().map(|s| &**s).collect();

  match (method, segments.as_slice()) {
    (&Method::GET, [""]) => Route::Health,
    (&Method::GET, [root, rest @ ..]) if *root == collection => {
      classify_read(rest, query)
    }
    (&Method::GET, _) => Route::UnknownResource,

    (&Method::POST, [root, id, "like"]) if *root == collection => {
      with_id(id, Route::Like)
    }
    (&Method::POST, [root, id, "adopt"]) if *root == collection => {
      with_id(id, Route::Adopt)
    }
    (&Method::POST, _) => Route::BadRequest(BAD_MUTATION),

    _ => Route::MethodNotAllowed,
  }
}

/// `GET /{collection}/...`. A `filter` parameter wins over whatever the path
/// says; `filter` without `value` (or the reverse) is rejected outright.
fn classify_read(rest: &[&str], query: &CollectionQuery) -> Route {
  let filter = query.filter.as_deref();
  let value = query.value.as_deref();

  match (filter, value) {
    (None, None) => {}
    (Some(f), Some(v)) if !f.is_empty() && !v.is_empty() => {
      return Route::Filter {
        field: f.to_owned(),
        value: v.to_owned(),
      };
    }
    _ => return Route::BadRequest(FILTER_NEEDS_VALUE),
  }

  match rest {
    [] => Route::ListAll,
    [id] => with_id(id, Route::GetById),
    _ => Route::BadRequest(TOO_DEEP),
  }
}

fn with_id(id: &str, route: fn(String) -> Route) -> Route {
  if id.is_empty() {
    Route::BadRequest(EMPTY_ID)
  } else {
    route(id.to_owned())
  }
}
