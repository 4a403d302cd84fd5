use crate::domain::{Address, Client, ClientDraft, ClientId, ClientKind, MIN_NAME_LEN, MIN_PHONE_DIGITS};
use crate::format::{digits_only, format_document, format_phone, format_zip};

use super::{optional, FormErrors, FormMode};

/// Brazilian federative units accepted in the address state field.
pub const STATES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR", "PE", "PI",
    "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

const ZIP_DIGITS: usize = 8;

/// Raw, possibly masked, client input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientForm {
    pub mode: FormMode<ClientId>,
    pub kind: ClientKind,
    pub name: String,
    pub document: String,
    pub phone: String,
    pub email: String,
    pub fantasy_name: String,
    pub state_registration: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub observations: String,
}

impl ClientForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled edit form with document, phone and zip shown masked.
    pub fn from_client(client: &Client) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let address = &client.address;
        Self {
            mode: FormMode::Edit(client.id),
            kind: client.kind,
            name: client.name.clone(),
            document: client.document.as_deref().map(format_document).unwrap_or_default(),
            phone: client.phone.as_deref().map(format_phone).unwrap_or_default(),
            email: text(&client.email),
            fantasy_name: text(&client.fantasy_name),
            state_registration: text(&client.state_registration),
            street: text(&address.street),
            number: text(&address.number),
            complement: text(&address.complement),
            neighborhood: text(&address.neighborhood),
            city: text(&address.city),
            state: text(&address.state),
            zip_code: address.zip_code.as_deref().map(format_zip).unwrap_or_default(),
            observations: text(&client.observations),
        }
    }

    /// Switching kind clears the document, whose mask no longer applies.
    pub fn set_kind(&mut self, kind: ClientKind) {
        if self.kind != kind {
            self.kind = kind;
            self.document.clear();
        }
    }

    pub fn document_mask(&self) -> &'static str {
        match self.kind {
            ClientKind::Individual => "999.999.999-99",
            ClientKind::Organization => "99.999.999/9999-99",
        }
    }

    pub fn validate(&self) -> Result<ClientDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim().to_string();
        if name.chars().count() < MIN_NAME_LEN {
            errors.push("name", "Name must have at least 2 characters");
        }

        let phone = digits_only(&self.phone);
        if phone.len() < MIN_PHONE_DIGITS {
            errors.push("phone", "Phone is required");
        }

        let document = Some(digits_only(&self.document)).filter(|d| !d.is_empty());
        if let Some(digits) = &document {
            if digits.len() != self.kind.document_len() {
                errors.push(
                    "document",
                    format!("{} must have {} digits", self.kind.document_label(), self.kind.document_len()),
                );
            }
        }

        let email = optional(&self.email);
        if email.as_deref().is_some_and(|e| !e.contains('@')) {
            errors.push("email", "Invalid email");
        }

        let state = optional(&self.state).map(|s| s.to_uppercase());
        if state.as_deref().is_some_and(|s| !STATES.contains(&s)) {
            errors.push("state", "Unknown state");
        }

        let zip_code = Some(digits_only(&self.zip_code)).filter(|z| !z.is_empty());
        if zip_code.as_deref().is_some_and(|z| z.len() != ZIP_DIGITS) {
            errors.push("zip_code", "Zip code must have 8 digits");
        }

        let organization = self.kind == ClientKind::Organization;
        errors.into_result(|| ClientDraft {
            name,
            kind: self.kind,
            document,
            phone,
            email,
            fantasy_name: optional(&self.fantasy_name).filter(|_| organization),
            state_registration: optional(&self.state_registration).filter(|_| organization),
            address: Address {
                street: optional(&self.street),
                number: optional(&self.number),
                complement: optional(&self.complement),
                neighborhood: optional(&self.neighborhood),
                city: optional(&self.city),
                state,
                zip_code,
            },
            observations: optional(&self.observations),
        })
    }
}
