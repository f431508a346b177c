//! Business commands.

use stampdesk_console::Console;
use stampdesk_console::api::ops;
use stampdesk_console::screens::entities;
use stampdesk_core::forms::{BusinessDraft, NewBusinessDraft};
use stampdesk_core::types::BusinessId;

use super::{CliError, create, list, read_file, read_files, set, show, update};
use crate::{BusinessAction, BusinessFields};

pub async fn run(console: &mut Console, action: BusinessAction) -> Result<(), CliError> {
    match action {
        BusinessAction::List(args) => list::<ops::ListBusinesses, _>(console, args).await,
        BusinessAction::Show { id } => show::<ops::GetBusiness>(console, BusinessId::new(id)).await,
        BusinessAction::Current => show::<ops::GetCurrentBusiness>(console, ()).await,
        BusinessAction::Create {
            name,
            tax_code,
            phone,
            logo,
        } => {
            let draft = NewBusinessDraft {
                name,
                tax_code: tax_code.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
                logo: logo.map(|path| read_file(&path)).transpose()?,
            };
            create(console, entities::business_create(draft)).await
        }
        BusinessAction::Update(fields) => {
            update(console, entities::business_update(), |draft| apply(draft, fields)).await
        }
    }
}

fn apply(draft: &mut BusinessDraft, fields: BusinessFields) -> Result<(), CliError> {
    set(&mut draft.name, fields.name);
    set(&mut draft.short_name, fields.short_name);
    set(&mut draft.full_name, fields.full_name);
    set(&mut draft.code, fields.code);
    set(&mut draft.phone, fields.phone);
    set(&mut draft.email, fields.email);
    set(&mut draft.tax_code, fields.tax_code);
    set(&mut draft.address_full, fields.address);
    set(&mut draft.province_code, fields.province_code);
    set(&mut draft.district_code, fields.district_code);
    set(&mut draft.ward_code, fields.ward_code);
    set(&mut draft.website, fields.website);
    set(&mut draft.youtube, fields.youtube);

    if let Some(path) = fields.logo {
        draft.logo = Some(read_file(&path)?);
    }
    draft.slide_images = read_files(&fields.slide_images)?;
    draft.intro_images = read_files(&fields.intro_images)?;
    draft.business_registration_scans = read_files(&fields.registration_scans)?;
    Ok(())
}
