//! Theme preference use-case service.
//!
//! # Invariants
//! - The in-memory theme is authoritative; save failures are logged only.
//! - Missing or unknown stored values resolve to `Theme::Light`.

use crate::model::theme::Theme;
use crate::repo::state_repo::ThemeRepository;
use log::{error, info};

/// Holds the current theme and writes every change through.
pub struct ThemeService<R: ThemeRepository> {
    repo: R,
    theme: Theme,
}

impl<R: ThemeRepository> ThemeService<R> {
    /// Loads the stored preference once.
    pub fn open(repo: R) -> Self {
        let theme = match repo.load_theme() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(err) => {
                error!(
                    "event=theme_load module=service status=error error_code=load_failed error={}",
                    err
                );
                Theme::default()
            }
        };
        Self { repo, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips between light and dark and persists the result.
    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        match self.repo.save_theme(theme) {
            Ok(()) => info!(
                "event=theme_set module=service status=ok theme={}",
                theme.as_str()
            ),
            Err(err) => error!(
                "event=theme_set module=service status=error error_code=persist_failed error={}",
                err
            ),
        }
    }
}
