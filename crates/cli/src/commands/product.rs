//! Product commands.

use stampdesk_console::Console;
use stampdesk_console::api::ops;
use stampdesk_console::screens::entities;
use stampdesk_core::forms::ProductDraft;
use stampdesk_core::types::ProductId;

use super::{CliError, create, list, set, show, update};
use crate::{ProductAction, ProductFields};

pub async fn run(console: &mut Console, action: ProductAction) -> Result<(), CliError> {
    match action {
        ProductAction::List(args) => list::<ops::ListProducts, _>(console, args).await,
        ProductAction::Show { id } => show::<ops::GetProduct>(console, ProductId::new(id)).await,
        ProductAction::Create(fields) => {
            let mut draft = ProductDraft::default();
            apply(&mut draft, fields);
            create(console, entities::product_create(draft)).await
        }
        ProductAction::Update { id, fields } => {
            let screen = entities::product_update(ProductId::new(id));
            update(console, screen, |draft| {
                apply(draft, fields);
                Ok(())
            })
            .await
        }
    }
}

fn apply(draft: &mut ProductDraft, fields: ProductFields) {
    set(&mut draft.name, fields.name);
    set(&mut draft.gtin, fields.gtin);
    set(&mut draft.price, fields.price);
}
