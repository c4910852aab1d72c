//! Controls which mentions of a message actually ping.

use serde::{Deserialize, Serialize};

use crate::types::id::{
    marker::{RoleMarker, UserMarker},
    Id,
};

/// Mention category that may be parsed from the message content.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionType {
    Everyone,
    Roles,
    Users,
}

/// Allowed mentions of a message.
///
/// Every part is optional: an unset part is left to Discord's default, while
/// a set but empty part explicitly disables it.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AllowedMentions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse: Option<Vec<MentionType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied_user: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Id<RoleMarker>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<Id<UserMarker>>>,
}

impl AllowedMentions {
    /// Allowed mentions that suppress every ping.
    pub fn none() -> Self {
        Self {
            parse: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Merge `other` into `self`, keeping every part of `self` that `other`
    /// leaves unset.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            parse: other.parse.or(self.parse),
            replied_user: other.replied_user.or(self.replied_user),
            roles: other.roles.or(self.roles),
            users: other.users.or(self.users),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::Token;

    #[test]
    fn merge_keeps_unset_parts() {
        let old = AllowedMentions {
            replied_user: Some(false),
            users: Some(vec![Id::new(1)]),
            ..AllowedMentions::default()
        };
        let new = AllowedMentions {
            users: Some(vec![Id::new(2)]),
            ..AllowedMentions::default()
        };

        let merged = old.merge(new);
        assert_eq!(merged.replied_user, Some(false));
        assert_eq!(merged.users, Some(vec![Id::new(2)]));
        assert!(merged.parse.is_none());
    }

    #[test]
    fn merge_with_self_is_identity() {
        let mentions = AllowedMentions::none();
        assert_eq!(mentions.clone().merge(mentions.clone()), mentions);
    }

    #[test]
    fn none_serializes_empty_parse() {
        serde_test::assert_ser_tokens(
            &AllowedMentions::none(),
            &[
                Token::Struct {
                    name: "AllowedMentions",
                    len: 1,
                },
                Token::Str("parse"),
                Token::Some,
                Token::Seq { len: Some(0) },
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );
    }
}
