use tracing::{debug, instrument};

use crate::domain::{Client, ClientId};
use crate::forms::{ClientForm, FormMode};
use crate::notify::Notifier;
use crate::stores::ClientStore;
use crate::views::ClientView;

use super::SubmitOutcome;

pub struct ClientsPage {
    store: ClientStore,
    notifier: Notifier,
    clients: Vec<Client>,
    loading: bool,
    search: String,
    form: Option<ClientForm>,
    selected: Option<ClientId>,
}

impl ClientsPage {
    pub fn new(store: ClientStore, notifier: Notifier) -> Self {
        Self {
            store,
            notifier,
            clients: Vec::new(),
            loading: false,
            search: String::new(),
            form: None,
            selected: None,
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.store.list_clients().await {
            Ok(clients) => {
                debug!(count = clients.len(), "Clients fetched");
                self.clients = clients;
            }
            Err(e) => self.notifier.failure("Failed to load clients", &e),
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn filtered(&self) -> Vec<&Client> {
        self.clients.iter().filter(|c| c.matches(&self.search)).collect()
    }

    pub fn open_create(&mut self) {
        self.form = Some(ClientForm::new());
    }

    /// Returns `false`, and leaves the page unchanged, for an id not in the list.
    pub fn open_edit(&mut self, id: ClientId) -> bool {
        match self.clients.iter().find(|c| c.id == id) {
            Some(client) => {
                self.form = Some(ClientForm::from_client(client));
                true
            }
            None => false,
        }
    }

    pub fn form(&self) -> Option<&ClientForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ClientForm> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(form) = &self.form else {
            return SubmitOutcome::Idle;
        };
        let mode = form.mode;
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        let name = draft.name.clone();

        let (saved, title, description, action) = match mode {
            FormMode::Create => (
                self.store.create_client(draft).await,
                "Client created",
                format!("{name} was added"),
                "Failed to create client",
            ),
            FormMode::Edit(id) => (
                self.store.update_client(id, draft).await,
                "Client updated",
                format!("{name} was updated"),
                "Failed to update client",
            ),
        };
        match saved {
            Ok(_) => {
                self.notifier.success(title, description);
                self.form = None;
                self.refresh().await;
                SubmitOutcome::Saved
            }
            Err(e) => {
                self.notifier.failure(action, &e);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn select(&mut self, id: ClientId) -> bool {
        let known = self.clients.iter().any(|c| c.id == id);
        if known {
            self.selected = Some(id);
        }
        known
    }

    pub fn selected(&self) -> Option<ClientView> {
        self.selected.and_then(|id| self.view(id))
    }

    pub fn view(&self, id: ClientId) -> Option<ClientView> {
        self.clients.iter().find(|c| c.id == id).map(ClientView::from)
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: ClientId) -> bool {
        match self.store.delete_client(id).await {
            Ok(()) => {
                self.notifier.success("Client removed", "The client was removed");
                if self.selected == Some(id) {
                    self.selected = None;
                }
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notifier.failure("Failed to remove client", &e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_system::DeskSystem;
    use crate::config::AppConfig;
    use crate::domain::ClientKind;
    use crate::notify::NoticeVariant;

    fn form(name: &str, document: &str) -> ClientForm {
        ClientForm {
            name: name.to_string(),
            document: document.to_string(),
            phone: "(11) 99999-1234".to_string(),
            email: format!("{}@email.com", name.to_lowercase()),
            ..ClientForm::new()
        }
    }

    #[tokio::test]
    async fn create_refetches_and_notifies() {
        let system = DeskSystem::start(&AppConfig::default(), None).await.unwrap();
        let (notifier, mut feed) = crate::notify::Notifier::channel();
        let mut page = ClientsPage::new(system.client_store.clone(), notifier);

        page.open_create();
        *page.form_mut().unwrap() = form("Maria", "123.456.789-01");
        assert_eq!(page.submit().await, SubmitOutcome::Saved);
        assert!(page.form().is_none());
        assert!(!page.is_loading());
        assert_eq!(page.clients().len(), 1);
        assert_eq!(page.clients()[0].document.as_deref(), Some("12345678901"));
        assert_eq!(page.clients()[0].kind, ClientKind::Individual);

        let notices = feed.drain();
        assert_eq!(notices[0].title, "Client created");
        assert_eq!(notices[0].description, "Maria was added");
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn invalid_form_stays_open_and_sends_nothing() {
        let system = DeskSystem::start(&AppConfig::default(), None).await.unwrap();
        let (notifier, mut feed) = crate::notify::Notifier::channel();
        let mut page = ClientsPage::new(system.client_store.clone(), notifier);

        page.open_create();
        let outcome = page.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(page.form().is_some());
        assert!(feed.drain().is_empty());
        assert_eq!(system.client_store.count_clients().await.unwrap(), 0);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn search_edit_view_and_delete() {
        let system = DeskSystem::start(&AppConfig::default(), None).await.unwrap();
        let (notifier, mut feed) = crate::notify::Notifier::channel();
        let mut page = ClientsPage::new(system.client_store.clone(), notifier);
        for (name, document) in [("Maria", "123.456.789-01"), ("Bruno", "")] {
            page.open_create();
            *page.form_mut().unwrap() = form(name, document);
            assert_eq!(page.submit().await, SubmitOutcome::Saved);
        }
        assert_eq!(page.clients()[0].name, "Bruno");

        page.set_search("4567");
        assert_eq!(page.filtered().len(), 1);
        page.set_search("BRUNO@");
        assert_eq!(page.filtered()[0].name, "Bruno");
        page.set_search("");
        assert_eq!(page.filtered().len(), 2);

        let maria = page.clients()[1].id;
        assert!(!page.open_edit(ClientId(999)));
        assert!(page.form().is_none());
        assert!(page.open_edit(maria));
        page.form_mut().unwrap().name = "Maria Souza".to_string();
        assert_eq!(page.submit().await, SubmitOutcome::Saved);
        assert_eq!(page.view(maria).unwrap().name, "Maria Souza");
        assert_eq!(page.view(ClientId(999)), None);

        assert!(page.select(maria));
        assert!(page.delete(maria).await);
        assert_eq!(page.selected(), None);
        assert_eq!(page.clients().len(), 1);

        assert!(!page.delete(maria).await);
        let last = feed.drain().pop().unwrap();
        assert_eq!(last.title, "Failed to remove client");
        assert_eq!(last.variant, NoticeVariant::Destructive);
        system.shutdown().await.unwrap();
    }
}
