//! What the result page shows for a route identifier.
//!
//! The page itself (AR maker, layout) lives outside this crate. This is only
//! the lookup it starts from: a header per known craft, a placeholder otherwise.

use common::CraftId;
use serde::Serialize;

pub const UNKNOWN_CRAFT_TITLE: &str = "Unknown Craft";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CraftProfile {
    pub id: CraftId,
    pub title: &'static str,
    /// Home state of the craft
    pub location: &'static str,
}

impl CraftProfile {
    pub fn for_craft(id: CraftId) -> Self {
        let (title, location) = match id {
            CraftId::Channapatna => ("Channapatna Toys", "Karnataka"),
            CraftId::BluePottery => ("Jaipur Blue Pottery", "Rajasthan"),
            CraftId::Warli => ("Warli Art", "Maharashtra"),
            CraftId::Kolam => ("Kolam / Rangoli", "Tamil Nadu"),
            CraftId::Madhubani => ("Madhubani Art", "Bihar"),
        };
        Self { id, title, location }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ResultView {
    Craft(CraftProfile),
    Unknown,
}

impl ResultView {
    /// Resolve the `{id}` path parameter of `/result/{id}`.
    pub fn for_param(id: &str) -> Self {
        match CraftId::from_token(id) {
            Some(craft) => Self::Craft(CraftProfile::for_craft(craft)),
            None => Self::Unknown,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Craft(profile) => profile.title,
            Self::Unknown => UNKNOWN_CRAFT_TITLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_crafts_have_profiles() {
        let view = ResultView::for_param("kolam");
        assert_eq!(view.title(), "Kolam / Rangoli");
        match view {
            ResultView::Craft(profile) => assert_eq!(profile.location, "Tamil Nadu"),
            ResultView::Unknown => panic!("kolam should be known"),
        }

        for id in CraftId::ALL {
            assert_eq!(CraftProfile::for_craft(id).id, id);
        }
    }

    #[test]
    fn test_unknown_param_renders_placeholder() {
        assert_eq!(ResultView::for_param("terracotta"), ResultView::Unknown);
        assert_eq!(ResultView::for_param("").title(), UNKNOWN_CRAFT_TITLE);
    }
}
