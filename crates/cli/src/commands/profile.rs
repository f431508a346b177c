//! Profile commands.

use stampdesk_console::Console;
use stampdesk_console::api::ops;
use stampdesk_console::screens::entities;
use stampdesk_core::forms::ProfileDraft;

use super::{CliError, create, read_file, set, show, update};
use crate::{ProfileAction, ProfileFields};

pub async fn run(console: &mut Console, action: ProfileAction) -> Result<(), CliError> {
    match action {
        ProfileAction::Show => show::<ops::GetCurrentUser>(console, ()).await,
        ProfileAction::Create(fields) => {
            let mut draft = ProfileDraft::default();
            apply(&mut draft, fields)?;
            create(console, entities::profile_create(draft)).await
        }
        ProfileAction::Update(fields) => {
            update(console, entities::profile_update(), |draft| apply(draft, fields)).await
        }
    }
}

fn apply(draft: &mut ProfileDraft, fields: ProfileFields) -> Result<(), CliError> {
    set(&mut draft.full_name, fields.full_name);
    set(&mut draft.email, fields.email);
    set(&mut draft.phone, fields.phone);
    if let Some(path) = fields.avatar {
        draft.avatar = Some(read_file(&path)?);
    }
    Ok(())
}
