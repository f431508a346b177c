//! The endpoint registry.
//!
//! Every API operation is declared exactly once below. Each declaration
//! generates a zero-sized marker type implementing [`Operation`]; callers pick
//! the operation by type (`client.query::<ops::GetProduct>(id)`).
//!
//! Conventions: list operations take a [`PageRequest`] sent as `page` and
//! `perpage`; detail operations take the id as the final path segment.

use stampdesk_core::dto;
use stampdesk_core::types::{
    ActivationId, BusinessId, DestructionId, GenerationId, ProductId, RetailOrderId,
    StampTemplateId,
};
use stampdesk_core::{FormPayload, Page, PageRequest};

use super::endpoint::{Endpoint, HttpMethod, InputKind, Operation, RequestParts, WithId};
use crate::error::ApiError;

macro_rules! operations {
    (@input none) => { () };
    (@input page) => { PageRequest };
    (@input form) => { FormPayload };
    (@input json $t:ty) => { $t };
    (@input id $t:ty) => { $t };
    (@input id_json $i:ty, $b:ty) => { WithId<$i, $b> };

    (@kind none) => { InputKind::None };
    (@kind page) => { InputKind::Page };
    (@kind form) => { InputKind::Form };
    (@kind json) => { InputKind::Json };
    (@kind id) => { InputKind::Id };
    (@kind id_json) => { InputKind::IdJson };

    (@build none, $input:ident, $path:literal) => {{
        let () = $input;
        Ok(RequestParts::bare($path))
    }};
    (@build page, $input:ident, $path:literal) => {
        Ok(RequestParts::paged($path, $input))
    };
    (@build form, $input:ident, $path:literal) => {
        Ok(RequestParts::bare($path).form($input))
    };
    (@build json, $input:ident, $path:literal) => {
        RequestParts::bare($path).json(&$input)
    };
    (@build id, $input:ident, $path:literal) => {
        Ok(RequestParts::with_id($path, $input.as_str()))
    };
    (@build id_json, $input:ident, $path:literal) => {
        RequestParts::with_id($path, $input.id.as_str()).json(&$input.body)
    };

    ($(
        $(#[$doc:meta])*
        $name:ident: $method:ident $path:literal, $kind:ident $(($($input:ty),+))? => $output:ty;
    )*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl Operation for $name {
                type Input = operations!(@input $kind $($($input),+)?);
                type Output = $output;

                const ENDPOINT: Endpoint = Endpoint {
                    name: stringify!($name),
                    method: HttpMethod::$method,
                    path: $path,
                    input: operations!(@kind $kind),
                };

                fn request(input: Self::Input) -> Result<RequestParts, ApiError> {
                    operations!(@build $kind, input, $path)
                }
            }
        )*

        /// Every registered endpoint, in declaration order.
        pub const ENDPOINTS: &[Endpoint] = &[$(<$name as Operation>::ENDPOINT),*];
    };
}

operations! {
    // Auth and profile
    /// Exchange credentials for an access token.
    Login: Post "/auth/login-with-password", json(dto::LoginRequest) => dto::AuthResponse;
    /// The account behind the current token.
    GetCurrentUser: Get "/me", none => dto::CurrentUser;
    CreateProfile: Post "/user/create-profile", form => dto::CurrentUser;
    UpdateProfile: Post "/user/update-profile", form => dto::CurrentUser;

    // Business
    ListBusinesses: Get "/business", page => Page<dto::BusinessItem>;
    /// The business attached to the signed-in account.
    GetCurrentBusiness: Get "/business/current", none => dto::Business;
    GetBusiness: Get "/business/detail/{id}", id(BusinessId) => dto::Business;
    CreateBusiness: Post "/business/create", form => dto::Business;
    /// Edits the current business; no id is sent.
    UpdateBusiness: Post "/business/update", form => dto::Business;

    // Product
    ListProducts: Get "/product/list", page => Page<dto::Product>;
    GetProduct: Get "/product/detail/{id}", id(ProductId) => dto::Product;
    CreateProduct: Post "/product/add", json(dto::CreateProduct) => dto::Product;
    UpdateProduct: Post "/product/edit/{id}", id_json(ProductId, dto::UpdateProduct) => dto::Product;

    // Stamp templates
    ListStampTemplates: Get "/stamp-template/list", page => Page<dto::StampTemplate>;
    GetStampTemplate: Get "/stamp-template/detail/{id}", id(StampTemplateId) => dto::StampTemplate;
    CreateStampTemplate: Post "/stamp-template/add", json(dto::CreateStampTemplate) => dto::StampTemplate;

    // Stamp generation
    ListGenerations: Get "/stamp/generation/list", page => Page<dto::StampGeneration>;
    GetGeneration: Get "/stamp/generation/detail/{id}", id(GenerationId) => dto::StampGeneration;
    CreateGeneration: Post "/stamp/generation/add", json(dto::CreateGeneration) => dto::StampGeneration;

    // Activation
    ListActivations: Get "/stamp/activation/list", page => Page<dto::Activation>;
    GetActivation: Get "/stamp/activation/detail/{id}", id(ActivationId) => dto::Activation;
    CreateActivation: Post "/stamp/activation/add", json(dto::CreateActivation) => dto::Activation;

    // Retail
    ListRetailOrders: Get "/stamp/retail/list", page => Page<dto::RetailOrder>;
    GetRetailOrder: Get "/stamp/retail/detail/{id}", id(RetailOrderId) => dto::RetailOrder;
    CreateRetailOrder: Post "/stamp/retail/add", json(dto::CreateRetailOrder) => dto::RetailOrder;

    // Destruction
    ListDestructions: Get "/destruction/list", page => Page<dto::Destruction>;
    GetDestruction: Get "/destruction/detail/{id}", id(DestructionId) => dto::Destruction;
    CreateDestruction: Post "/destruction/add", json(dto::CreateDestruction) => dto::Destruction;
}
