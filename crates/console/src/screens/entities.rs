//! Concrete screens for each entity.
//!
//! Aliases pin the generic screens to registry operations; the constructors
//! fix where a successful form goes and which caches it invalidates.

use stampdesk_core::forms::{
    ActivationDraft, BusinessDraft, DestructionDraft, GenerationDraft, NewBusinessDraft,
    ProductDraft, ProfileDraft, RetailOrderDraft, StampTemplateDraft,
};
use stampdesk_core::types::ProductId;

use super::{CreateScreen, DetailScreen, ListScreen, UpdateScreen};
use crate::api::{WithId, ops};
use crate::navigation::Route;

// Profile
pub type ProfileScreen = DetailScreen<ops::GetCurrentUser>;
pub type ProfileCreateScreen = CreateScreen<ProfileDraft, ops::CreateProfile>;
pub type ProfileUpdateScreen = UpdateScreen<ProfileDraft, ops::GetCurrentUser, ops::UpdateProfile>;

// Business
pub type BusinessListScreen = ListScreen<ops::ListBusinesses>;
pub type BusinessDetailScreen = DetailScreen<ops::GetBusiness>;
pub type CurrentBusinessScreen = DetailScreen<ops::GetCurrentBusiness>;
pub type BusinessCreateScreen = CreateScreen<NewBusinessDraft, ops::CreateBusiness>;
pub type BusinessUpdateScreen =
    UpdateScreen<BusinessDraft, ops::GetCurrentBusiness, ops::UpdateBusiness>;

// Product
pub type ProductListScreen = ListScreen<ops::ListProducts>;
pub type ProductDetailScreen = DetailScreen<ops::GetProduct>;
pub type ProductCreateScreen = CreateScreen<ProductDraft, ops::CreateProduct>;
pub type ProductUpdateScreen = UpdateScreen<ProductDraft, ops::GetProduct, ops::UpdateProduct>;

// Stamp lifecycle
pub type StampTemplateListScreen = ListScreen<ops::ListStampTemplates>;
pub type StampTemplateDetailScreen = DetailScreen<ops::GetStampTemplate>;
pub type StampTemplateCreateScreen = CreateScreen<StampTemplateDraft, ops::CreateStampTemplate>;
pub type GenerationListScreen = ListScreen<ops::ListGenerations>;
pub type GenerationDetailScreen = DetailScreen<ops::GetGeneration>;
pub type GenerationCreateScreen = CreateScreen<GenerationDraft, ops::CreateGeneration>;
pub type ActivationListScreen = ListScreen<ops::ListActivations>;
pub type ActivationDetailScreen = DetailScreen<ops::GetActivation>;
pub type ActivationCreateScreen = CreateScreen<ActivationDraft, ops::CreateActivation>;
pub type RetailListScreen = ListScreen<ops::ListRetailOrders>;
pub type RetailDetailScreen = DetailScreen<ops::GetRetailOrder>;
pub type RetailCreateScreen = CreateScreen<RetailOrderDraft, ops::CreateRetailOrder>;
pub type DestructionListScreen = ListScreen<ops::ListDestructions>;
pub type DestructionDetailScreen = DetailScreen<ops::GetDestruction>;
pub type DestructionCreateScreen = CreateScreen<DestructionDraft, ops::CreateDestruction>;

#[must_use]
pub fn profile_create(draft: ProfileDraft) -> ProfileCreateScreen {
    CreateScreen::new(draft, Route::Profile).invalidating::<ops::GetCurrentUser>()
}

#[must_use]
pub fn profile_update() -> ProfileUpdateScreen {
    UpdateScreen::new((), Route::Profile, |form| form)
}

#[must_use]
pub fn business_create(draft: NewBusinessDraft) -> BusinessCreateScreen {
    CreateScreen::new(draft, Route::BusinessList)
        .invalidating::<ops::ListBusinesses>()
        .invalidating::<ops::GetCurrentBusiness>()
}

/// Edits the signed-in account's business.
#[must_use]
pub fn business_update() -> BusinessUpdateScreen {
    UpdateScreen::new((), Route::BusinessList, |form| form)
        .invalidating::<ops::ListBusinesses>()
        .invalidating::<ops::GetBusiness>()
}

#[must_use]
pub fn product_create(draft: ProductDraft) -> ProductCreateScreen {
    CreateScreen::new(draft, Route::ProductList).invalidating::<ops::ListProducts>()
}

#[must_use]
pub fn product_update(id: ProductId) -> ProductUpdateScreen {
    let target = id.clone();
    UpdateScreen::new(id, Route::ProductList, move |body| {
        WithId::new(target.clone(), body)
    })
    .invalidating::<ops::ListProducts>()
}

#[must_use]
pub fn stamp_template_create(draft: StampTemplateDraft) -> StampTemplateCreateScreen {
    CreateScreen::new(draft, Route::StampTemplateList).invalidating::<ops::ListStampTemplates>()
}

#[must_use]
pub fn generation_create(draft: GenerationDraft) -> GenerationCreateScreen {
    CreateScreen::new(draft, Route::GenerationList).invalidating::<ops::ListGenerations>()
}

#[must_use]
pub fn activation_create(draft: ActivationDraft) -> ActivationCreateScreen {
    CreateScreen::new(draft, Route::ActivationList).invalidating::<ops::ListActivations>()
}

#[must_use]
pub fn retail_create(draft: RetailOrderDraft) -> RetailCreateScreen {
    CreateScreen::new(draft, Route::RetailList).invalidating::<ops::ListRetailOrders>()
}

#[must_use]
pub fn destruction_create(draft: DestructionDraft) -> DestructionCreateScreen {
    CreateScreen::new(draft, Route::DestructionList).invalidating::<ops::ListDestructions>()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::navigation::Navigator;
    use crate::screens::FormPhase;
    use crate::session::Session;

    #[tokio::test]
    async fn test_invalid_business_is_blocked_locally() {
        let client = ApiClient::new("http://127.0.0.1:9", Session::in_memory()).unwrap();
        let mut nav = Navigator::new(Route::BusinessCreate);
        let mut screen = business_create(NewBusinessDraft::default());

        assert!(screen.submit(&client, &mut nav).await.is_none());
        assert_eq!(screen.phase(), &FormPhase::Failed("Name is required".to_string()));
        assert_eq!(screen.field_errors()[0].field, "name");
        assert_eq!(nav.current(), &Route::BusinessCreate);
    }

    #[test]
    fn test_update_screen_starts_loading() {
        let screen = product_update(ProductId::new("p1"));
        assert_eq!(screen.phase(), &FormPhase::Loading);
        assert!(!screen.is_prefilled());
    }

    #[tokio::test]
    async fn test_submit_waits_for_prefill() {
        let client = ApiClient::new("http://127.0.0.1:9", Session::in_memory()).unwrap();
        let mut nav = Navigator::new(Route::ProductEdit(ProductId::new("p1")));
        let mut screen = product_update(ProductId::new("p1"));

        assert!(screen.submit(&client, &mut nav).await.is_none());
        assert_eq!(screen.phase(), &FormPhase::Loading);
        assert!(screen.field_errors().is_empty());
        assert_eq!(nav.current(), &Route::ProductEdit(ProductId::new("p1")));
    }
}
