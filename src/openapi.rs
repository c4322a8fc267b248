//! OpenAPI 3.0 documentation assembly
//!
//! Auth and system endpoints are annotated on their handlers. The nine
//! entity routes share generic handlers, so their operations are generated
//! here from [`ResourceKind`].

use crate::domain::ResourceKind;
use crate::i18n::Locale;
use utoipa::openapi::path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityRequirement, SecurityScheme};
use utoipa::openapi::{Required, Response};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Club Portal API",
        version = "0.1.0",
        description = "Club management gateway: authentication and CRUD proxy to the club backend",
        license(name = "Proprietary"),
        contact(name = "Club Portal Team")
    ),
    tags(
        (name = "System", description = "Health checks and system status"),
        (name = "Auth", description = "Sign-in, token refresh and profile"),
        (name = "Clubs", description = "Club management entities"),
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            crate::api::health::HealthResponse,
            crate::domain::ResourceKind,
            crate::domain::LoginInput,
            crate::domain::RefreshInput,
            crate::domain::TokenPair,
            crate::domain::Profile,
            crate::domain::Club,
            crate::domain::CreateClubInput,
            crate::domain::UpdateClubInput,
            crate::domain::User,
            crate::domain::CreateUserInput,
            crate::domain::UpdateUserInput,
            crate::domain::Member,
            crate::domain::MembershipStatus,
            crate::domain::CreateMemberInput,
            crate::domain::UpdateMemberInput,
            crate::domain::Sponsor,
            crate::domain::CreateSponsorInput,
            crate::domain::UpdateSponsorInput,
            crate::domain::Payment,
            crate::domain::PaymentMethod,
            crate::domain::PaymentStatus,
            crate::domain::CreatePaymentInput,
            crate::domain::UpdatePaymentInput,
            crate::domain::Role,
            crate::domain::CreateRoleInput,
            crate::domain::UpdateRoleInput,
            crate::domain::Permission,
            crate::domain::CreatePermissionInput,
            crate::domain::UpdatePermissionInput,
            crate::domain::Property,
            crate::domain::CreatePropertyInput,
            crate::domain::UpdatePropertyInput,
            crate::domain::Activity,
            crate::domain::CreateActivityInput,
            crate::domain::UpdateActivityInput,
        ),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::ready,
        crate::api::auth::login,
        crate::api::auth::refresh,
        crate::api::auth::profile,
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(c) = doc.components.as_mut() {
            c.security_schemes.insert(
                "bearer_jwt".to_string(),
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
        for kind in ResourceKind::ALL {
            add_resource_paths(&mut doc, kind);
        }
        doc
    }
}

fn add_resource_paths(doc: &mut utoipa::openapi::OpenApi, kind: ResourceKind) {
    let label = kind.label(Locale::En);
    let collection = format!("/api/{}", kind.path());
    let item = format!("{}/{{id}}", collection);

    let operation = |summary: String, ok: &str, with_id: bool| {
        let mut builder = OperationBuilder::new()
            .tag("Clubs")
            .summary(Some(summary))
            .security(SecurityRequirement::new("bearer_jwt", Vec::<String>::new()))
            .response(ok, Response::new("Backend response relayed"))
            .response("401", Response::new("Missing or invalid token"));
        if with_id {
            builder = builder
                .parameter(
                    ParameterBuilder::new()
                        .name("id")
                        .parameter_in(ParameterIn::Path)
                        .required(Required::True)
                        .build(),
                )
                .response("404", Response::new("Record not found"));
        }
        builder.build()
    };

    doc.paths.add_path_operation(
        &collection,
        vec![HttpMethod::Get],
        operation(format!("List {} records", label), "200", false),
    );
    doc.paths.add_path_operation(
        &collection,
        vec![HttpMethod::Post],
        operation(format!("Create a {} record", label), "201", false),
    );
    doc.paths.add_path_operation(
        &item,
        vec![HttpMethod::Get],
        operation(format!("Get a {} record", label), "200", true),
    );
    doc.paths.add_path_operation(
        &item,
        vec![HttpMethod::Put, HttpMethod::Patch],
        operation(format!("Update a {} record", label), "200", true),
    );
    doc.paths.add_path_operation(
        &item,
        vec![HttpMethod::Delete],
        operation(format!("Delete a {} record", label), "200", true),
    );
}
