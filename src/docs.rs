use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use old_school_core::ErrorResponse;

use crate::modules::auth::model::{SessionRequest, TokenResponse};
use crate::modules::classes::model::{Class, CreateClassDto};
use crate::modules::users::model::{
    AdminStatus, InstructorStatus, RegisterUserDto, User, UserRole,
};
use crate::utils::results::{DeleteResult, MessageResponse, UpdateResult};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::greeting,
        crate::modules::auth::controller::issue_token,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::check_admin,
        crate::modules::users::controller::check_instructor,
        crate::modules::users::controller::make_admin,
        crate::modules::users::controller::make_instructor,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::delete_class,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterUserDto,
            AdminStatus,
            InstructorStatus,
            Class,
            CreateClassDto,
            SessionRequest,
            TokenResponse,
            DeleteResult,
            UpdateResult,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Root", description = "Service greeting"),
        (name = "Authentication", description = "Session token issuance"),
        (name = "Users", description = "Registration, role checks and promotion"),
        (name = "Classes", description = "Class management")
    ),
    info(
        title = "Old-school API",
        version = "0.1.0",
        description = "REST backend for the old-school course management app.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/",
            "/jwt",
            "/users",
            "/users/{id}",
            "/users/admin/{email}",
            "/users/admin/{id}",
            "/users/instructor/{email}",
            "/users/instructor/{id}",
            "/classes",
            "/classes/{id}",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
