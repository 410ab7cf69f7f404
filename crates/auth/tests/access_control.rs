use std::sync::Arc;

use keyward_auth::resources::{ADMIN_PANEL, PUBLIC_CONTENT, USER_MANAGEMENT};
use keyward_auth::{
    AccessControlService, AccessError, Authenticator, ErrorKind, InMemoryUserRepository,
    MutationMode, Role, ServiceConfig, User, UserId, UserRepository,
};

struct Harness {
    repo: Arc<InMemoryUserRepository>,
    auth: Authenticator<Arc<InMemoryUserRepository>>,
    service: AccessControlService<Arc<InMemoryUserRepository>>,
}

impl Harness {
    fn new(config: ServiceConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();

        let repo = Arc::new(InMemoryUserRepository::new());
        repo.save(User::new("1", "Ana Admin", "admin@empresa.com", "Admin123", Role::Administrator));
        repo.save(User::new("2", "Juan Usuario", "juan@empresa.com", "User1234", Role::RegularUser));
        repo.save(User::new("3", "Pedro Invitado", "guest@empresa.com", "Guest123", Role::Guest));

        let auth = Authenticator::password(Arc::clone(&repo));
        let service = AccessControlService::from_config(
            Arc::clone(&repo),
            config,
            tracing::info_span!("access_control"),
        );

        Self { repo, auth, service }
    }

    fn can_access(&self, resource: &str) -> bool {
        self.service.can_access(self.auth.current_session().as_ref(), resource)
    }
}

#[test]
fn admin_then_guest_end_to_end() {
    let h = Harness::new(ServiceConfig::default());

    assert!(h.auth.authenticate("admin@empresa.com", "Admin123"));
    assert!(h.can_access(ADMIN_PANEL));
    assert!(h.can_access(USER_MANAGEMENT));

    assert!(h.auth.authenticate("guest@empresa.com", "Guest123"));
    assert!(!h.can_access(ADMIN_PANEL));
    assert!(h.can_access(PUBLIC_CONTENT));
}

#[test]
fn no_session_denies_everything() {
    let h = Harness::new(ServiceConfig::default());
    assert!(!h.can_access(PUBLIC_CONTENT));
    assert!(h.service.view_profile(None).is_none());
}

#[test]
fn failed_login_keeps_the_previous_session_in_force() {
    let h = Harness::new(ServiceConfig::default());

    assert!(h.auth.authenticate("admin@empresa.com", "Admin123"));
    assert!(!h.auth.authenticate("guest@empresa.com", "wrong"));

    assert!(h.can_access(ADMIN_PANEL));
    let session = h.auth.current_session();
    assert_eq!(h.service.view_profile(session.as_ref()).unwrap().name, "Ana Admin");
}

#[test]
fn admin_manages_users_and_regular_user_cannot() {
    let h = Harness::new(ServiceConfig::default());

    assert!(h.auth.authenticate("admin@empresa.com", "Admin123"));
    let admin = h.auth.current_session();
    let moderator = User::new("4", "Luis Moderador", "mod@empresa.com", "Moderador123", Role::Moderator);
    h.service.create_user(admin.as_ref(), moderator).unwrap();

    let dup = User::new("5", "Dup", "mod@empresa.com", "Moderador123", Role::Guest);
    let err = h.service.create_user(admin.as_ref(), dup).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert!(h.auth.authenticate("juan@empresa.com", "User1234"));
    let juan = h.auth.current_session();
    let err = h
        .service
        .change_role(juan.as_ref(), &UserId::from("4"), Role::Administrator)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(err.to_string(), "only administrators may change roles");

    assert!(h.auth.authenticate("mod@empresa.com", "Moderador123"));
    assert!(h.can_access(ADMIN_PANEL));
    assert!(!h.can_access(USER_MANAGEMENT));
}

#[test]
fn role_change_takes_effect_on_next_login() {
    let h = Harness::new(ServiceConfig::default());

    assert!(h.auth.authenticate("admin@empresa.com", "Admin123"));
    let admin = h.auth.current_session();

    let guest_auth = Authenticator::password(Arc::clone(&h.repo));
    assert!(guest_auth.authenticate("guest@empresa.com", "Guest123"));
    let stale = guest_auth.current_session();

    h.service
        .change_role(admin.as_ref(), &UserId::from("3"), Role::RegularUser)
        .unwrap();
    assert!(!h.service.can_access(stale.as_ref(), "reports"));

    assert!(guest_auth.authenticate("guest@empresa.com", "Guest123"));
    assert!(h.service.can_access(guest_auth.current_session().as_ref(), "reports"));
}

#[test]
fn oauth_session_drives_self_service() {
    let h = Harness::new(ServiceConfig::default());
    let oauth = Authenticator::oauth(Arc::clone(&h.repo));

    assert!(!oauth.authenticate("juan@empresa.com", "abc"));
    assert!(oauth.authenticate("juan@empresa.com", "oauth_abc123"));
    let session = oauth.current_session();

    let err = h.service.change_password(session.as_ref(), "weak").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    h.service.change_password(session.as_ref(), "NuevoPass123").unwrap();
    assert!(h.auth.authenticate("juan@empresa.com", "NuevoPass123"));
}

#[test]
fn audit_only_mode_preserves_records() {
    let h = Harness::new(ServiceConfig {
        mutation_mode: MutationMode::AuditOnly,
        ..ServiceConfig::default()
    });

    assert!(h.auth.authenticate("admin@empresa.com", "Admin123"));
    let admin = h.auth.current_session();
    h.service.delete_user(admin.as_ref(), &UserId::from("2")).unwrap();
    assert!(h.repo.exists_by_email("juan@empresa.com"));

    let err = h.service.delete_user(None, &UserId::from("2")).unwrap_err();
    assert!(matches!(err, AccessError::Unauthorized { .. }));
}
