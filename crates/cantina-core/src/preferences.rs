// ── UI preferences ──
//
// Theme and locale, restored from storage at construction and written back
// on every change. Unknown or unreadable persisted values fall back to the
// defaults.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tokio::sync::watch;
use tracing::warn;

use crate::error::CoreError;
use crate::storage::{Storage, keys};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    #[strum(serialize = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    #[strum(serialize = "en-US")]
    EnUs,
}

impl Locale {
    pub fn toggled(self) -> Self {
        match self {
            Self::PtBr => Self::EnUs,
            Self::EnUs => Self::PtBr,
        }
    }
}

pub struct Preferences {
    storage: Arc<dyn Storage>,
    theme: watch::Sender<Theme>,
    locale: watch::Sender<Locale>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let theme = read_or_default(storage.as_ref(), keys::THEME);
        let locale = read_or_default(storage.as_ref(), keys::LOCALE);
        Self {
            storage,
            theme: watch::channel(theme).0,
            locale: watch::channel(locale).0,
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme.borrow()
    }

    pub fn is_dark(&self) -> bool {
        self.theme() == Theme::Dark
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), CoreError> {
        self.storage.set(keys::THEME, theme.as_ref())?;
        self.theme.send_if_modified(|current| {
            let changed = *current != theme;
            *current = theme;
            changed
        });
        Ok(())
    }

    pub fn toggle_theme(&self) -> Result<Theme, CoreError> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn locale(&self) -> Locale {
        *self.locale.borrow()
    }

    pub fn set_locale(&self, locale: Locale) -> Result<(), CoreError> {
        self.storage.set(keys::LOCALE, locale.as_ref())?;
        self.locale.send_if_modified(|current| {
            let changed = *current != locale;
            *current = locale;
            changed
        });
        Ok(())
    }

    pub fn toggle_locale(&self) -> Result<Locale, CoreError> {
        let next = self.locale().toggled();
        self.set_locale(next)?;
        Ok(next)
    }

    pub fn subscribe_theme(&self) -> watch::Receiver<Theme> {
        self.theme.subscribe()
    }

    pub fn subscribe_locale(&self) -> watch::Receiver<Locale> {
        self.locale.subscribe()
    }
}

fn read_or_default<T: FromStr + Default>(storage: &dyn Storage, key: &str) -> T {
    match storage.get(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring unknown persisted preference");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "failed to read preference");
            T::default()
        }
    }
}
