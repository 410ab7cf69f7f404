//! Demonstration driver: seeds three users and walks through the admin,
//! regular-user, guest and OAuth scenarios.

use std::sync::Arc;

use anyhow::Context;

use keyward_auth::resources::{ADMIN_PANEL, PUBLIC_CONTENT, USER_MANAGEMENT};
use keyward_auth::{
    AccessControlService, Authenticator, InMemoryUserRepository, Role, ServiceConfig, User,
    UserId, UserRepository, role_catalog,
};

type Repo = Arc<InMemoryUserRepository>;

fn main() -> anyhow::Result<()> {
    keyward_observability::init();

    let config = ServiceConfig::from_env();
    tracing::info!(mutation_mode = ?config.mutation_mode, min_password_length = config.min_password_length, "configuration loaded");

    let repo: Repo = Arc::new(InMemoryUserRepository::new());
    // Seeded directly: no session exists yet to pass the create_user gate.
    repo.save(User::new("1", "Ana Admin", "admin@empresa.com", "Admin123", Role::Administrator));
    repo.save(User::new("2", "Juan Usuario", "juan@empresa.com", "User1234", Role::RegularUser));
    repo.save(User::new("3", "Pedro Invitado", "guest@empresa.com", "Guest123", Role::Guest));

    let auth = Authenticator::password(Arc::clone(&repo));
    let service = AccessControlService::from_config(
        Arc::clone(&repo),
        config,
        tracing::info_span!("access_control"),
    );

    let catalog = serde_json::to_string(&role_catalog()).context("serialize role catalog")?;
    tracing::info!(%catalog, "roles");

    admin_scenario(&auth, &service)?;
    regular_user_scenario(&auth, &service)?;
    guest_scenario(&auth, &service)?;
    oauth_scenario(&repo, &service)?;

    tracing::info!(users = repo.list().len(), "demo finished");
    Ok(())
}

fn admin_scenario(
    auth: &Authenticator<Repo>,
    service: &AccessControlService<Repo>,
) -> anyhow::Result<()> {
    let _scenario = tracing::info_span!("scenario", name = "administrator").entered();

    if !auth.authenticate("admin@empresa.com", "Admin123") {
        anyhow::bail!("seeded administrator failed to authenticate");
    }
    let session = auth.current_session();

    let moderator = User::new("4", "Luis Moderador", "mod@empresa.com", "Moderador123", Role::Moderator);
    match service.create_user(session.as_ref(), moderator) {
        Ok(()) => tracing::info!("moderator created"),
        Err(err) => tracing::warn!(%err, kind = ?err.kind(), "moderator not created"),
    }

    tracing::info!(
        admin_panel = service.can_access(session.as_ref(), ADMIN_PANEL),
        user_management = service.can_access(session.as_ref(), USER_MANAGEMENT),
        "administrator access"
    );
    Ok(())
}

fn regular_user_scenario(
    auth: &Authenticator<Repo>,
    service: &AccessControlService<Repo>,
) -> anyhow::Result<()> {
    let _scenario = tracing::info_span!("scenario", name = "regular_user").entered();

    if !auth.authenticate("juan@empresa.com", "User1234") {
        anyhow::bail!("seeded regular user failed to authenticate");
    }
    let session = auth.current_session();

    tracing::info!(
        admin_panel = service.can_access(session.as_ref(), ADMIN_PANEL),
        public_content = service.can_access(session.as_ref(), PUBLIC_CONTENT),
        "regular user access"
    );

    if let Err(err) = service.change_password(session.as_ref(), "NuevoPass123") {
        tracing::warn!(%err, "password not changed");
    }
    if let Err(err) = service.delete_user(session.as_ref(), &UserId::from("3")) {
        tracing::info!(%err, "regular user blocked from deleting users");
    }
    Ok(())
}

fn guest_scenario(
    auth: &Authenticator<Repo>,
    service: &AccessControlService<Repo>,
) -> anyhow::Result<()> {
    let _scenario = tracing::info_span!("scenario", name = "guest").entered();

    if !auth.authenticate("guest@empresa.com", "Guest123") {
        anyhow::bail!("seeded guest failed to authenticate");
    }
    let session = auth.current_session();

    let explanation = service.explain_access(session.as_ref(), ADMIN_PANEL);
    let explanation = serde_json::to_string(&explanation).context("serialize access explanation")?;
    tracing::info!(
        public_content = service.can_access(session.as_ref(), PUBLIC_CONTENT),
        %explanation,
        "guest access"
    );
    Ok(())
}

fn oauth_scenario(repo: &Repo, service: &AccessControlService<Repo>) -> anyhow::Result<()> {
    let _scenario = tracing::info_span!("scenario", name = "oauth").entered();

    let oauth = Authenticator::oauth(Arc::clone(repo));
    let rejected = !oauth.authenticate("juan@empresa.com", "abc");
    let accepted = oauth.authenticate("juan@empresa.com", "oauth_token_123");
    tracing::info!(rejected, accepted, "oauth token checks");

    let profile = service
        .view_profile(oauth.current_session().as_ref())
        .context("oauth session should carry a profile")?;
    tracing::info!(user = %profile.name, role = %profile.role, "oauth profile");
    Ok(())
}
