//! Collaborators the controller talks to: the router and the alert surface.

use common::Route;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Moves the user to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Shows a user-visible message (an alert in the web build).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Model unavailable, background class, or nothing confident
    CouldNotIdentify,

    /// The prediction call itself failed
    AnalysisFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::CouldNotIdentify => "Could not identify the craft. Try a clearer photo.",
            Self::AnalysisFailed => "Something went wrong while analysing the image.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
