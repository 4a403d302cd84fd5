use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::client_actor::ClientError;
use crate::domain::{Client, ClientDraft, ClientId};

/// Handle to the client table.
#[derive(Clone)]
pub struct ClientStore {
    inner: ResourceClient<Client>,
}

impl_basic_store!(ClientStore, Client, ClientError, client, clients);

impl ClientStore {
    #[instrument(skip(self, draft), fields(client_name = %draft.name))]
    pub async fn create_client(&self, draft: ClientDraft) -> Result<Client, ClientError> {
        debug!("Sending request");
        let client = self.inner.create(draft).await?;
        info!(client_id = %client.id, "Client created");
        Ok(client)
    }

    #[instrument(skip(self, draft))]
    pub async fn update_client(&self, id: ClientId, draft: ClientDraft) -> Result<Client, ClientError> {
        debug!("Sending request");
        let client = self.inner.update(id, draft).await?;
        info!("Client updated");
        Ok(client)
    }
}
