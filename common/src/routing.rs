//! Page routes.
//!
//! Mirrors the two pages the lens exposes plus a catch-all:
//!
//! ```text
//! /              -> Route::Home
//! /result/{id}   -> Route::Result(id)
//! anything else  -> Route::NotFound(path)
//! ```
//!
//! The result parameter is kept as a raw string. The result page decides how
//! to present identifiers it does not recognise.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crafts::CraftId;

const RESULT_PREFIX: &str = "/result/";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "page", content = "param", rename_all = "snake_case")]
pub enum Route {
    /// Upload / scan page
    Home,

    /// Details and AR view for one craft
    Result(String),

    /// Any path that matches no page
    NotFound(String),
}

impl Route {
    /// Route to the result page of a resolved craft.
    pub fn result(id: CraftId) -> Self {
        Self::Result(id.as_str().to_string())
    }

    /// Render the route as a URL path.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Result(id) => format!("{RESULT_PREFIX}{id}"),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Match a URL path against the page table.
    ///
    /// A trailing slash is ignored. Query strings and fragments are not
    /// part of the route and are dropped.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        if trimmed == "/" || trimmed.is_empty() {
            return Self::Home;
        }

        match trimmed.strip_prefix(RESULT_PREFIX) {
            Some(id) if !id.is_empty() && !id.contains('/') => Self::Result(id.to_string()),
            _ => Self::NotFound(trimmed.to_string()),
        }
    }

    /// Craft named by a result route, if it is one we know.
    pub fn craft(&self) -> Option<CraftId> {
        match self {
            Self::Result(id) => CraftId::from_token(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
