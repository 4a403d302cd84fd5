/// Generates the read/delete half of a store: `get_x`, `list_xs`, `count_xs`,
/// `delete_x` and `import_xs`. Every method is traced and maps transport
/// failures into the store's own error type.
macro_rules! impl_store_methods {
    ($store:ident, $entity:ty, $error:ty, $singular:ident, $plural:ident) => {
        paste::paste! {
            impl $store {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $singular>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.get(id).await?)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural>](&self) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.list().await?)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<count_ $plural>](&self) -> Result<usize, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.count().await?)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $singular>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await?;
                    tracing::info!("Deleted");
                    Ok(())
                }

                #[tracing::instrument(skip(self, items), fields(count = items.len()))]
                pub async fn [<import_ $plural>](&self, items: Vec<$entity>) -> Result<usize, $error> {
                    tracing::debug!("Sending request");
                    Ok(self.inner.import(items).await?)
                }
            }
        }
    };
}

macro_rules! impl_store_new {
    ($store:ident, $entity:ty) => {
        impl $store {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_basic_store {
    ($store:ident, $entity:ty, $error:ty, $singular:ident, $plural:ident) => {
        impl_store_new!($store, $entity);
        impl_store_methods!($store, $entity, $error, $singular, $plural);
    };
}
