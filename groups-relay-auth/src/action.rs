// SPDX-License-Identifier: MIT OR Apache-2.0

use groups_relay_core::{Event, EventId, Kind, PublicKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A member together with the role names a "put user" action assigns to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRoles {
    pub member: PublicKey,
    pub roles: Vec<String>,
}

/// Changes to a group's metadata. Fields which are `None` are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataChanges {
    pub name: Option<String>,
    pub about: Option<String>,
    pub picture: Option<String>,
    /// `Some(true)` closes the group, `Some(false)` opens it.
    pub closed: Option<bool>,
    /// `Some(true)` hides the group's content from non-members.
    pub private: Option<bool>,
}

/// Group-management operations which can be requested by members of a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Let identities into the group on their own request, without assigning a role.
    ///
    /// Never requested by moderation events, see [`Action::from_join_request`].
    AddMember { members: Vec<PublicKey> },

    /// Add identities to the group or change the roles they hold. Members without role names are
    /// added as plain members.
    PutUser { members: Vec<MemberRoles> },

    /// Remove identities from the group.
    RemoveMember { members: Vec<PublicKey> },

    /// Delete events which were published to the group.
    DeleteEvent { targets: Vec<EventId> },

    /// Change the group's name, picture, description or status.
    EditMetadata(MetadataChanges),

    /// Legacy permission assignments.
    EditPermissions { members: Vec<PublicKey> },

    /// Create a new group, the issuer becomes its admin.
    CreateGroup,

    /// Delete the whole group.
    DeleteGroup,

    /// Create an invite code which lets its holder join a closed group.
    CreateInvite { code: String },
}

impl Action {
    /// Parse the group-management action requested by a moderation event.
    pub fn from_event(event: &Event) -> Result<Self, ActionError> {
        if !event.kind.is_moderation() {
            return Err(ActionError::NotAnAction(event.kind));
        }

        let action = match event.kind {
            Kind::PUT_USER => Action::PutUser {
                members: member_roles(event)?,
            },
            Kind::REMOVE_USER => Action::RemoveMember {
                members: members(event)?,
            },
            Kind::EDIT_METADATA | Kind::EDIT_GROUP_STATUS => {
                Action::EditMetadata(metadata_changes(event))
            }
            Kind::ADD_PERMISSION | Kind::REMOVE_PERMISSION => Action::EditPermissions {
                members: members(event)?,
            },
            Kind::DELETE_EVENT => {
                let targets = event
                    .tags_by_key("e")
                    .map(|tag| -> Result<EventId, ActionError> {
                        tag.value()
                            .ok_or(ActionError::MissingTag("e"))?
                            .parse::<EventId>()
                            .map_err(|_| ActionError::InvalidTag("e"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if targets.is_empty() {
                    return Err(ActionError::MissingTag("e"));
                }
                Action::DeleteEvent { targets }
            }
            Kind::CREATE_GROUP => Action::CreateGroup,
            Kind::DELETE_GROUP => Action::DeleteGroup,
            Kind::CREATE_INVITE => {
                let code = event
                    .tag_value("code")
                    .filter(|code| !code.is_empty())
                    .ok_or(ActionError::MissingTag("code"))?;
                Action::CreateInvite {
                    code: code.to_owned(),
                }
            }
            kind => return Err(ActionError::UnknownAction(kind)),
        };

        Ok(action)
    }

    /// Action of letting the author of a join request into the group.
    pub fn from_join_request(event: &Event) -> Result<Self, ActionError> {
        if event.kind != Kind::JOIN_REQUEST {
            return Err(ActionError::NotAnAction(event.kind));
        }

        Ok(Action::AddMember {
            members: vec![event.pubkey],
        })
    }

    /// Short name of the action, useful for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddMember { .. } => "add-member",
            Action::PutUser { .. } => "put-user",
            Action::RemoveMember { .. } => "remove-member",
            Action::DeleteEvent { .. } => "delete-event",
            Action::EditMetadata(_) => "edit-metadata",
            Action::EditPermissions { .. } => "edit-permissions",
            Action::CreateGroup => "create-group",
            Action::DeleteGroup => "delete-group",
            Action::CreateInvite { .. } => "create-invite",
        }
    }
}

fn member_roles(event: &Event) -> Result<Vec<MemberRoles>, ActionError> {
    let members = event
        .tags_by_key("p")
        .map(|tag| -> Result<MemberRoles, ActionError> {
            let member = tag
                .value()
                .ok_or(ActionError::MissingTag("p"))?
                .parse::<PublicKey>()
                .map_err(|_| ActionError::InvalidTag("p"))?;
            Ok(MemberRoles {
                member,
                roles: tag.rest().to_vec(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if members.is_empty() {
        return Err(ActionError::MissingTag("p"));
    }

    Ok(members)
}

fn members(event: &Event) -> Result<Vec<PublicKey>, ActionError> {
    Ok(member_roles(event)?
        .into_iter()
        .map(|member| member.member)
        .collect())
}

fn metadata_changes(event: &Event) -> MetadataChanges {
    let mut changes = MetadataChanges {
        name: event.tag_value("name").map(str::to_owned),
        about: event.tag_value("about").map(str::to_owned),
        picture: event.tag_value("picture").map(str::to_owned),
        ..Default::default()
    };

    // Status flags are single-element tags, the last one wins.
    for tag in &event.tags {
        match tag.key() {
            Some("open") => changes.closed = Some(false),
            Some("closed") => changes.closed = Some(true),
            Some("public") => changes.private = Some(false),
            Some("private") => changes.private = Some(true),
            _ => (),
        }
    }

    changes
}

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum ActionError {
    #[error("kind {0} does not request a group-management action")]
    NotAnAction(Kind),

    #[error("unknown moderation kind {0}")]
    UnknownAction(Kind),

    #[error("missing \"{0}\" tag")]
    MissingTag(&'static str),

    #[error("invalid value in \"{0}\" tag")]
    InvalidTag(&'static str),
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use groups_relay_core::{EventId, Kind};

    use super::{Action, ActionError, MemberRoles};
    use crate::test_utils::{EventBuilder, identity};

    #[test]
    fn put_user_with_and_without_roles() {
        let alice = identity(1);
        let bob = identity(2);

        let event = EventBuilder::new(Kind::PUT_USER)
            .tag(["p", alice.to_hex().as_str()])
            .build();
        assert_eq!(
            Action::from_event(&event),
            Ok(Action::PutUser {
                members: vec![MemberRoles {
                    member: alice,
                    roles: vec![],
                }]
            })
        );

        let event = EventBuilder::new(Kind::PUT_USER)
            .tag(["p", alice.to_hex().as_str()])
            .tag(["p", bob.to_hex().as_str(), "moderator"])
            .build();
        assert_eq!(
            Action::from_event(&event),
            Ok(Action::PutUser {
                members: vec![
                    MemberRoles {
                        member: alice,
                        roles: vec![],
                    },
                    MemberRoles {
                        member: bob,
                        roles: vec!["moderator".into()],
                    },
                ]
            })
        );
    }

    #[test]
    fn remove_requires_valid_member() {
        let event = EventBuilder::new(Kind::REMOVE_USER).build();
        assert_eq!(
            Action::from_event(&event),
            Err(ActionError::MissingTag("p"))
        );

        let event = EventBuilder::new(Kind::REMOVE_USER)
            .tag(["p", "zzz"])
            .build();
        assert_eq!(
            Action::from_event(&event),
            Err(ActionError::InvalidTag("p"))
        );
    }

    #[test]
    fn delete_event_targets() {
        let target = EventId::from_bytes([9; 32]);
        let event = EventBuilder::new(Kind::DELETE_EVENT)
            .tag(["e", target.to_hex().as_str()])
            .build();
        assert_eq!(
            Action::from_event(&event),
            Ok(Action::DeleteEvent {
                targets: vec![target]
            })
        );

        let event = EventBuilder::new(Kind::DELETE_EVENT).build();
        assert_eq!(
            Action::from_event(&event),
            Err(ActionError::MissingTag("e"))
        );
    }

    #[test]
    fn edit_metadata() {
        let event = EventBuilder::new(Kind::EDIT_METADATA)
            .tag(["name", "Pizza Lovers"])
            .tag(["closed"])
            .tag(["public"])
            .build();
        assert_matches!(
            Action::from_event(&event),
            Ok(Action::EditMetadata(changes)) if changes.name.as_deref() == Some("Pizza Lovers")
                && changes.closed == Some(true)
                && changes.private == Some(false)
                && changes.about.is_none()
        );
    }

    #[test]
    fn invite_needs_code() {
        let event = EventBuilder::new(Kind::CREATE_INVITE).build();
        assert_eq!(
            Action::from_event(&event),
            Err(ActionError::MissingTag("code"))
        );

        let event = EventBuilder::new(Kind::CREATE_INVITE)
            .tag(["code", "x7ab"])
            .build();
        assert_eq!(
            Action::from_event(&event),
            Ok(Action::CreateInvite {
                code: "x7ab".into()
            })
        );
    }

    #[test]
    fn non_moderation_kinds() {
        let event = EventBuilder::new(Kind::CHAT_MESSAGE).build();
        assert_eq!(
            Action::from_event(&event),
            Err(ActionError::NotAnAction(Kind::CHAT_MESSAGE))
        );

        let event = EventBuilder::new(Kind::new(9015)).build();
        assert_eq!(
            Action::from_event(&event),
            Err(ActionError::UnknownAction(Kind::new(9015)))
        );
    }

    #[test]
    fn join_requests_add_their_author() {
        let alice = identity(1);
        let event = EventBuilder::new(Kind::JOIN_REQUEST).author(alice).build();
        assert_eq!(
            Action::from_join_request(&event),
            Ok(Action::AddMember {
                members: vec![alice]
            })
        );

        let event = EventBuilder::new(Kind::PUT_USER)
            .author(alice)
            .tag(["p", alice.to_hex().as_str()])
            .build();
        assert_eq!(
            Action::from_join_request(&event),
            Err(ActionError::NotAnAction(Kind::PUT_USER))
        );
    }
}
