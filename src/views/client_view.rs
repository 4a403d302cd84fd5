use crate::domain::{Address, Client, ClientKind};
use crate::format::{format_document, format_phone, format_zip};

pub const NO_ADDRESS: &str = "Address not provided";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientView {
    pub name: String,
    pub kind: &'static str,
    pub document_label: &'static str,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Organizations only.
    pub fantasy_name: Option<String>,
    /// Organizations only.
    pub state_registration: Option<String>,
    pub address: String,
    pub observations: Option<String>,
}

impl From<&Client> for ClientView {
    fn from(client: &Client) -> Self {
        let organization = client.kind == ClientKind::Organization;
        Self {
            name: client.name.clone(),
            kind: client.kind.label(),
            document_label: client.kind.document_label(),
            document: client.document.as_deref().map(format_document),
            phone: client.phone.as_deref().map(format_phone),
            email: client.email.clone(),
            fantasy_name: client.fantasy_name.clone().filter(|_| organization),
            state_registration: client.state_registration.clone().filter(|_| organization),
            address: address_line(&client.address),
            observations: client.observations.clone(),
        }
    }
}

/// `street, number[, complement] - neighborhood, city/state - CEP: 99999-999`
pub fn address_line(address: &Address) -> String {
    if address.is_empty() {
        return NO_ADDRESS.to_string();
    }
    let part = |value: &Option<String>| value.as_deref().unwrap_or("").to_string();

    let mut line = format!("{}, {}", part(&address.street), part(&address.number));
    if let Some(complement) = &address.complement {
        line.push_str(", ");
        line.push_str(complement);
    }
    line.push_str(&format!(
        " - {}, {}/{}",
        part(&address.neighborhood),
        part(&address.city),
        part(&address.state)
    ));
    if let Some(zip) = &address.zip_code {
        line.push_str(" - CEP: ");
        line.push_str(&format_zip(zip));
    }
    line
}
