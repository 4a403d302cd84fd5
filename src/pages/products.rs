use tracing::{debug, instrument};

use crate::domain::{Product, ProductId};
use crate::forms::{FormMode, ProductForm};
use crate::notify::Notifier;
use crate::stores::ProductStore;
use crate::views::ProductView;

use super::SubmitOutcome;

pub struct ProductsPage {
    store: ProductStore,
    notifier: Notifier,
    products: Vec<Product>,
    loading: bool,
    search: String,
    form: Option<ProductForm>,
    selected: Option<ProductId>,
}

impl ProductsPage {
    pub fn new(store: ProductStore, notifier: Notifier) -> Self {
        Self {
            store,
            notifier,
            products: Vec::new(),
            loading: false,
            search: String::new(),
            form: None,
            selected: None,
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.store.list_products().await {
            Ok(products) => {
                debug!(count = products.len(), "Products fetched");
                self.products = products;
            }
            Err(e) => self.notifier.failure("Failed to load products", &e),
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every product, inactive ones included.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn filtered(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.matches(&self.search)).collect()
    }

    pub fn open_create(&mut self) {
        self.form = Some(ProductForm::new());
    }

    pub fn open_edit(&mut self, id: ProductId) -> bool {
        match self.products.iter().find(|p| p.id == id) {
            Some(product) => {
                self.form = Some(ProductForm::from_product(product));
                true
            }
            None => false,
        }
    }

    pub fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ProductForm> {
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
        let description = draft.description.clone();

        let (saved, title, action) = match mode {
            FormMode::Create => (
                self.store.create_product(draft).await,
                "Product created",
                "Failed to create product",
            ),
            FormMode::Edit(id) => (
                self.store.update_product(id, draft).await,
                "Product updated",
                "Failed to update product",
            ),
        };
        match saved {
            Ok(_) => {
                self.notifier.success(title, format!("{description} was saved"));
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

    pub fn select(&mut self, id: ProductId) -> bool {
        let known = self.products.iter().any(|p| p.id == id);
        if known {
            self.selected = Some(id);
        }
        known
    }

    pub fn selected(&self) -> Option<ProductView> {
        self.selected.and_then(|id| self.view(id))
    }

    pub fn view(&self, id: ProductId) -> Option<ProductView> {
        self.products.iter().find(|p| p.id == id).map(ProductView::from)
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: ProductId) -> bool {
        match self.store.delete_product(id).await {
            Ok(()) => {
                self.notifier.success("Product removed", "The product was removed");
                if self.selected == Some(id) {
                    self.selected = None;
                }
                self.refresh().await;
                true
            }
            Err(e) => {
                self.notifier.failure("Failed to remove product", &e);
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
    use crate::domain::{ProductStatus, Unit};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn inactive_products_stay_listed() {
        let system = DeskSystem::start(&AppConfig::default(), None).await.unwrap();
        let (notifier, mut feed) = Notifier::channel();
        let mut page = ProductsPage::new(system.product_store.clone(), notifier);

        for (description, status) in [("Cimento", ProductStatus::Inactive), ("Areia", ProductStatus::Active)] {
            page.open_create();
            let form = page.form_mut().unwrap();
            form.description = description.to_string();
            form.unit = Unit::Kilogram;
            form.unit_price = dec!(30);
            form.status = status;
            assert_eq!(page.submit().await, SubmitOutcome::Saved);
        }

        assert_eq!(page.products().len(), 2);
        assert_eq!(page.products()[0].description, "Areia");
        let cimento = page.products()[1].id;
        let view = page.view(cimento).unwrap();
        assert_eq!(view.status, "Inactive");
        assert!(!view.available_for_orders);
        assert_eq!(view.unit_price, "R$\u{a0}30,00");

        page.set_search("cim");
        assert_eq!(page.filtered().len(), 1);

        assert_eq!(system.product_store.list_orderable_products().await.unwrap().len(), 1);
        assert_eq!(feed.drain()[0].title, "Product created");
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn rejected_edit_keeps_the_form_open() {
        let system = DeskSystem::start(&AppConfig::default(), None).await.unwrap();
        let (notifier, mut feed) = Notifier::channel();
        let mut page = ProductsPage::new(system.product_store.clone(), notifier);

        page.form = Some(ProductForm {
            mode: FormMode::Edit(ProductId(42)),
            description: "Ghost".to_string(),
            unit_price: dec!(1),
            ..ProductForm::new()
        });
        assert_eq!(page.submit().await, SubmitOutcome::Failed);
        assert!(page.form().is_some());
        let notice = feed.drain().pop().unwrap();
        assert_eq!(notice.title, "Failed to update product");
        assert!(notice.description.contains("42"));
        system.shutdown().await.unwrap();
    }
}
