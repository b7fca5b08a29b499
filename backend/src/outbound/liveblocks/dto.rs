//! Wire payloads for the Liveblocks authorize-user endpoint.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::ports::CollaborationGrant;

/// Liveblocks permission granting read and write access to one room.
pub(super) const FULL_ACCESS: &str = "room:write";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AuthorizeUserBody<'a> {
    pub user_id: &'a str,
    pub user_info: UserInfoDto<'a>,
    pub permissions: BTreeMap<&'a str, [&'static str; 1]>,
}

#[derive(Debug, Serialize)]
pub(super) struct UserInfoDto<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub avatar: &'a str,
}

impl<'a> From<&'a CollaborationGrant> for AuthorizeUserBody<'a> {
    fn from(grant: &'a CollaborationGrant) -> Self {
        let info = &grant.principal.info;
        Self {
            user_id: grant.principal.id.as_str(),
            user_info: UserInfoDto {
                name: info.name.as_str(),
                color: info.color.as_str(),
                avatar: info.avatar.as_str(),
            },
            permissions: BTreeMap::from([(grant.room.as_ref(), [FULL_ACCESS])]),
        }
    }
}
