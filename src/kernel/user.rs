use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
    Enterprise,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default)]
    pub editor_theme: String,
    #[serde(default)]
    pub enable_voice_input: bool,
    #[serde(default)]
    pub enable_collaboration: bool,
}

/// The signed-in user. `id` comes from the identity service and is never
/// rewritten by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub credits: u64,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub credits: Option<u64>,
    pub subscription_tier: Option<SubscriptionTier>,
    pub avatar: Option<Option<String>>,
}

impl UserPatch {
    fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(credits) = self.credits {
            user.credits = credits;
        }
        if let Some(tier) = self.subscription_tier {
            user.subscription_tier = tier;
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = avatar.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesPatch {
    pub theme: Option<ThemePreference>,
    pub editor_theme: Option<String>,
    pub enable_voice_input: Option<bool>,
    pub enable_collaboration: Option<bool>,
}

impl PreferencesPatch {
    fn apply(&self, preferences: &mut Preferences) {
        if let Some(theme) = self.theme {
            preferences.theme = theme;
        }
        if let Some(editor_theme) = &self.editor_theme {
            preferences.editor_theme = editor_theme.clone();
        }
        if let Some(enabled) = self.enable_voice_input {
            preferences.enable_voice_input = enabled;
        }
        if let Some(enabled) = self.enable_collaboration {
            preferences.enable_collaboration = enabled;
        }
    }
}

/// Every mutation except [`UserSession::set_user`] and
/// [`UserSession::set_error`] is a no-op while nobody is signed in.
#[derive(Debug, Clone, Default)]
pub struct UserSession {
    user: Option<User>,
    error: Option<String>,
}

impl UserSession {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn credits(&self) -> u64 {
        self.user.as_ref().map_or(0, |u| u.credits)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_user(&mut self, user: User) -> bool {
        self.user = Some(user);
        self.error = None;
        true
    }

    pub fn update_user(&mut self, patch: &UserPatch) -> bool {
        let Some(user) = self.user.as_mut() else {
            return false;
        };
        let before = user.clone();
        patch.apply(user);
        *user != before
    }

    pub fn update_preferences(&mut self, patch: &PreferencesPatch) -> bool {
        let Some(user) = self.user.as_mut() else {
            return false;
        };
        let before = user.preferences.clone();
        patch.apply(&mut user.preferences);
        user.preferences != before
    }

    /// Spends up to `amount` credits; the balance bottoms out at zero.
    pub fn deduct_credits(&mut self, amount: u64) -> bool {
        let Some(user) = self.user.as_mut() else {
            return false;
        };
        let next = user.credits.saturating_sub(amount);
        if next == user.credits {
            return false;
        }
        user.credits = next;
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = self.user.is_some() || self.error.is_some();
        self.user = None;
        self.error = None;
        changed
    }

    pub fn set_error(&mut self, error: Option<String>) -> bool {
        if self.error == error {
            return false;
        }
        self.error = error;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/user.rs"]
mod tests;
