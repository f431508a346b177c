//! Stamp template and lifecycle commands.

use stampdesk_console::Console;
use stampdesk_console::api::ops;
use stampdesk_console::screens::entities;
use stampdesk_core::forms::{
    ActivationDraft, DestructionDraft, GenerationDraft, RetailOrderDraft, StampTemplateDraft,
};
use stampdesk_core::types::{
    ActivationId, DestructionId, GenerationId, RetailOrderId, StampTemplateId,
};

use super::{CliError, create, list, show};
use crate::{ActivationAction, DestructionAction, GenerationAction, RetailAction, TemplateAction};

pub async fn templates(console: &mut Console, action: TemplateAction) -> Result<(), CliError> {
    match action {
        TemplateAction::List(args) => list::<ops::ListStampTemplates, _>(console, args).await,
        TemplateAction::Show { id } => {
            show::<ops::GetStampTemplate>(console, StampTemplateId::new(id)).await
        }
        TemplateAction::Create {
            name,
            size,
            description,
        } => {
            let draft = StampTemplateDraft {
                name,
                size,
                description: description.unwrap_or_default(),
            };
            create(console, entities::stamp_template_create(draft)).await
        }
    }
}

pub async fn generations(console: &mut Console, action: GenerationAction) -> Result<(), CliError> {
    match action {
        GenerationAction::List(args) => list::<ops::ListGenerations, _>(console, args).await,
        GenerationAction::Show { id } => {
            show::<ops::GetGeneration>(console, GenerationId::new(id)).await
        }
        GenerationAction::Create {
            template,
            product,
            quantity,
            note,
        } => {
            let draft = GenerationDraft {
                template_id: template,
                product_id: product.unwrap_or_default(),
                quantity,
                note: note.unwrap_or_default(),
            };
            create(console, entities::generation_create(draft)).await
        }
    }
}

pub async fn activations(console: &mut Console, action: ActivationAction) -> Result<(), CliError> {
    match action {
        ActivationAction::List(args) => list::<ops::ListActivations, _>(console, args).await,
        ActivationAction::Show { id } => {
            show::<ops::GetActivation>(console, ActivationId::new(id)).await
        }
        ActivationAction::Create {
            stamps,
            product,
            note,
        } => {
            let draft = ActivationDraft {
                stamp_ids: stamps,
                product_id: product.unwrap_or_default(),
                note: note.unwrap_or_default(),
            };
            create(console, entities::activation_create(draft)).await
        }
    }
}

pub async fn retail(console: &mut Console, action: RetailAction) -> Result<(), CliError> {
    match action {
        RetailAction::List(args) => list::<ops::ListRetailOrders, _>(console, args).await,
        RetailAction::Show { id } => {
            show::<ops::GetRetailOrder>(console, RetailOrderId::new(id)).await
        }
        RetailAction::Create {
            stamps,
            customer_name,
            customer_phone,
        } => {
            let draft = RetailOrderDraft {
                stamp_ids: stamps,
                customer_name: customer_name.unwrap_or_default(),
                customer_phone: customer_phone.unwrap_or_default(),
            };
            create(console, entities::retail_create(draft)).await
        }
    }
}

pub async fn destructions(console: &mut Console, action: DestructionAction) -> Result<(), CliError> {
    match action {
        DestructionAction::List(args) => list::<ops::ListDestructions, _>(console, args).await,
        DestructionAction::Show { id } => {
            show::<ops::GetDestruction>(console, DestructionId::new(id)).await
        }
        DestructionAction::Create { stamps, reason } => {
            let draft = DestructionDraft {
                stamp_ids: stamps,
                reason,
            };
            create(console, entities::destruction_create(draft)).await
        }
    }
}
