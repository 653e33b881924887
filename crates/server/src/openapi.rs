use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct MessageDoc {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDoc {
    /// 24 hex characters, assigned by the store.
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    /// `active` or `inactive`.
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProviderDoc {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    /// Defaults to `active`.
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProviderDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service_type: Option<String>,
    pub status: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::hello,
        crate::routes::providers::create_provider,
        crate::routes::providers::list_providers,
        crate::routes::providers::get_provider,
        crate::routes::providers::update_provider,
        crate::routes::providers::delete_provider,
    ),
    components(
        schemas(
            MessageDoc,
            ProviderDoc,
            CreateProviderDoc,
            UpdateProviderDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "providers")
    )
)]
pub struct ApiDoc;
