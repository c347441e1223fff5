use std::sync::Arc;

use adapter::identity::JwtIdentityProvider;
use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, event::EventRepositoryImpl, health::HealthCheckRepositoryImpl,
    registration::RegistrationRepositoryImpl, user::UserRepositoryImpl,
};
use adapter::database::ConnectionPool;
use kernel::pagination::{EventPageSource, UserPageSource};
use kernel::repository::{
    event::EventRepository, health::HealthCheckRepository, user::UserRepository,
};
use kernel::service::{
    identity::IdentityService, registration::RegistrationWorkflow, role::RoleResolver,
};
use shared::config::{AppConfig, PaginationConfig};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    event_repository: Arc<dyn EventRepository>,
    user_repository: Arc<dyn UserRepository>,
    identity_service: IdentityService,
    role_resolver: RoleResolver,
    registration_workflow: RegistrationWorkflow,
    pagination: PaginationConfig,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let event_repository: Arc<dyn EventRepository> =
            Arc::new(EventRepositoryImpl::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(UserRepositoryImpl::new(pool.clone()));
        let registration_repository = Arc::new(RegistrationRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let identity_provider = Arc::new(JwtIdentityProvider::new(&app_config.identity));

        let identity_service = IdentityService::new(
            identity_provider,
            user_repository.clone(),
            auth_repository,
            app_config.bootstrap,
        );
        let role_resolver = RoleResolver::new(user_repository.clone());
        let registration_workflow =
            RegistrationWorkflow::new(event_repository.clone(), registration_repository);

        Self {
            health_check_repository,
            event_repository,
            user_repository,
            identity_service,
            role_resolver,
            registration_workflow,
            pagination: app_config.pagination,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn identity_service(&self) -> &IdentityService {
        &self.identity_service
    }

    pub fn role_resolver(&self) -> &RoleResolver {
        &self.role_resolver
    }

    pub fn registration_workflow(&self) -> &RegistrationWorkflow {
        &self.registration_workflow
    }

    pub fn event_page_source(&self) -> EventPageSource {
        EventPageSource::new(self.event_repository.clone())
    }

    pub fn user_page_source(&self) -> UserPageSource {
        UserPageSource::new(self.user_repository.clone())
    }

    pub fn pagination(&self) -> PaginationConfig {
        self.pagination
    }
}
