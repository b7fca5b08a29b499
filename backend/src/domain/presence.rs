//! Presence profiles shown next to collaborators' cursors.

use serde::{Deserialize, Serialize};

use super::user::User;

/// Avatar used for every collaborator until users can upload their own.
pub const DEFAULT_AVATAR_URL: &str = "https://liveblocks.io/avatars/avatar-1.png";

/// Cursor colour derived from an email address.
///
/// Folds one value per code point, the code point's leading UTF-16 unit, with
/// `h = h * 31 + c` (wrapping at 32 bits) and renders the low 24 bits as a
/// hex colour.
///
/// # Examples
/// ```
/// use coedit::domain::color_from_email;
///
/// assert_eq!(color_from_email(""), "#000000");
/// assert_eq!(color_from_email("a"), "#000061");
/// ```
pub fn color_from_email(email: &str) -> String {
    let hash = email.chars().fold(0_u32, |h, c| {
        let mut units = [0_u16; 2];
        let lead = c.encode_utf16(&mut units).first().copied().unwrap_or_default();
        h.wrapping_mul(31).wrapping_add(u32::from(lead))
    });
    format!("#{:06x}", hash & 0x00FF_FFFF)
}

/// Display attributes attached to a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceInfo {
    pub name: String,
    pub color: String,
    pub avatar: String,
}

/// Collaborator identity keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceProfile {
    pub id: String,
    pub info: PresenceInfo,
}

impl From<&User> for PresenceProfile {
    fn from(user: &User) -> Self {
        let email = user.email().as_ref();
        Self {
            id: email.to_owned(),
            info: PresenceInfo {
                name: user.name().as_ref().to_owned(),
                color: color_from_email(email),
                avatar: DEFAULT_AVATAR_URL.to_owned(),
            },
        }
    }
}
