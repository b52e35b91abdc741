//! View routing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ShellError, ShellResult};

/// A top-level screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Title screen.
    #[default]
    Splash,
    /// Main menu.
    Menu,
    /// World map.
    Map,
    /// A location's scene.
    Game,
    /// Carried items.
    Inventory,
    /// Research notes.
    Research,
    /// Ship flag editor.
    FlagCustomization,
}

impl View {
    /// Every view, in menu order.
    pub const ALL: [View; 7] = [
        Self::Splash,
        Self::Menu,
        Self::Map,
        Self::Game,
        Self::Inventory,
        Self::Research,
        Self::FlagCustomization,
    ];

    /// Route name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Splash => "splash",
            Self::Menu => "menu",
            Self::Map => "map",
            Self::Game => "game",
            Self::Inventory => "inventory",
            Self::Research => "research",
            Self::FlagCustomization => "flag-customization",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.name() == s)
            .ok_or_else(|| ShellError::UnknownView(s.to_string()))
    }
}

/// Tracks the current view.
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: View,
}

impl Router {
    /// Start at the splash screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given view.
    pub fn at(view: View) -> Self {
        Self { current: view }
    }

    /// The current view.
    pub fn current(&self) -> View {
        self.current
    }

    /// Switch views by route name. Unknown names leave the view unchanged.
    pub fn navigate(&mut self, name: &str) -> ShellResult<View> {
        match name.parse::<View>() {
            Ok(view) => {
                debug!(from = %self.current, to = %view, "navigate");
                self.current = view;
                Ok(view)
            }
            Err(e) => {
                warn!(view = name, "navigation to unknown view");
                Err(e)
            }
        }
    }
}
