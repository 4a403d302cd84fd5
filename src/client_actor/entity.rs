use std::cmp::Ordering;

use chrono::Utc;

use super::ClientError;
use crate::actor_framework::Entity;
use crate::domain::{Client, ClientDraft, ClientId, ClientKind, MIN_NAME_LEN, MIN_PHONE_DIGITS};
use crate::format::digits_only;

impl Entity for Client {
    type Id = ClientId;
    type CreatePayload = ClientDraft;
    type Patch = ClientDraft;
    type Action = ();
    type ActionResult = ();
    type Error = ClientError;

    const KIND: &'static str = "client";

    fn id(&self) -> &ClientId {
        &self.id
    }

    /// Creates a new Client from a validated draft.
    fn from_create(id: ClientId, draft: ClientDraft) -> Result<Self, ClientError> {
        check_draft(&draft)?;
        let now = Utc::now();
        let mut client = Self {
            id,
            name: String::new(),
            kind: ClientKind::Individual,
            document: None,
            phone: None,
            email: None,
            fantasy_name: None,
            state_registration: None,
            address: Default::default(),
            observations: None,
            created_at: now,
            updated_at: now,
        };
        apply(&mut client, draft);
        Ok(client)
    }

    /// Replaces every editable field; `id` and `created_at` are kept.
    fn on_update(&mut self, draft: ClientDraft) -> Result<(), ClientError> {
        check_draft(&draft)?;
        apply(self, draft);
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), ClientError> {
        Ok(())
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then(self.id.cmp(&other.id))
    }
}

fn check_draft(draft: &ClientDraft) -> Result<(), ClientError> {
    if draft.name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ClientError::ValidationError(format!(
            "name must have at least {MIN_NAME_LEN} characters"
        )));
    }
    if digits_only(&draft.phone).len() < MIN_PHONE_DIGITS {
        return Err(ClientError::ValidationError(format!(
            "phone must have at least {MIN_PHONE_DIGITS} digits"
        )));
    }
    Ok(())
}

fn apply(client: &mut Client, draft: ClientDraft) {
    client.name = draft.name;
    client.kind = draft.kind;
    client.document = draft.document;
    client.phone = Some(draft.phone).filter(|p| !p.is_empty());
    client.email = draft.email;
    client.fantasy_name = draft.fantasy_name;
    client.state_registration = draft.state_registration;
    client.address = draft.address;
    client.observations = draft.observations;
}
