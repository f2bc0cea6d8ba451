use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::config::SchedulingConfig;
use crate::application::queries::AssignmentQueryService;
use crate::application::services::IdentityResolver;
use cadence_domain::assignment::AssignmentRepository;
use cadence_domain::client::ClientRepository;
use cadence_domain::events::EventBus;
use cadence_domain::messaging::MessageSender;
use cadence_domain::window::WindowEvaluator;
use cadence_infrastructure::events::InMemoryEventBus;
use cadence_infrastructure::messaging::SqliteCoachInbox;
use cadence_infrastructure::persistence::{
    repositories::{SqliteAssignmentRepository, SqliteClientRepository},
    Database,
};

/// Every command handler, fully wired
pub struct CommandHandlers {
    pub resolve_week: Arc<ResolveWeekCommandHandler>,
    pub submit_response: Arc<SubmitResponseCommandHandler>,
    pub mark_missed: Arc<MarkMissedCommandHandler>,
    pub open_for_check_in: Arc<OpenForCheckInCommandHandler>,
    pub request_reopen: Arc<RequestReopenCommandHandler>,
    pub pause_series: Arc<PauseSeriesCommandHandler>,
    pub unpause_series: Arc<UnpauseSeriesCommandHandler>,
    pub delete_series: Arc<DeleteSeriesCommandHandler>,
}

/// Composition root: repositories, services, handlers and queries built
/// over one database connection.
pub struct CadenceContext {
    pub assignment_repo: Arc<dyn AssignmentRepository>,
    pub client_repo: Arc<dyn ClientRepository>,
    pub queries: Arc<AssignmentQueryService>,
    pub handlers: CommandHandlers,
}

pub async fn build_context(
    db_path: &str,
    config: SchedulingConfig,
) -> anyhow::Result<CadenceContext> {
    let startup_started_at = Instant::now();

    info!("🔌 Connecting to database...");
    let started_at = Instant::now();
    let database = Database::new(db_path).await?;
    info!(
        "✓ Database connection established ({}ms)",
        started_at.elapsed().as_millis()
    );

    info!("🔄 Running migrations...");
    let started_at = Instant::now();
    database.run_migrations().await?;
    info!(
        "✓ Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());

    let assignment_repo =
        Arc::new(SqliteAssignmentRepository::new(pool.clone())) as Arc<dyn AssignmentRepository>;
    let client_repo =
        Arc::new(SqliteClientRepository::new(pool.clone())) as Arc<dyn ClientRepository>;
    let message_sender = Arc::new(SqliteCoachInbox::new(pool.clone())) as Arc<dyn MessageSender>;
    let event_bus = Arc::new(InMemoryEventBus::new()) as Arc<dyn EventBus>;

    let resolver = Arc::new(IdentityResolver::new(client_repo.clone()));
    let evaluator = WindowEvaluator::new(config.window_anchor.clone());

    let queries = Arc::new(AssignmentQueryService::new(
        assignment_repo.clone(),
        resolver.clone(),
        evaluator,
    ));

    info!("🔧 Initializing command handlers...");
    let handlers = CommandHandlers {
        resolve_week: Arc::new(ResolveWeekCommandHandler::new(
            assignment_repo.clone(),
            resolver.clone(),
            event_bus.clone(),
            config.due_hour,
        )),
        submit_response: Arc::new(SubmitResponseCommandHandler::new(
            assignment_repo.clone(),
            resolver.clone(),
            event_bus.clone(),
        )),
        mark_missed: Arc::new(MarkMissedCommandHandler::new(
            assignment_repo.clone(),
            resolver.clone(),
            event_bus.clone(),
        )),
        open_for_check_in: Arc::new(OpenForCheckInCommandHandler::new(
            assignment_repo.clone(),
            event_bus.clone(),
        )),
        request_reopen: Arc::new(RequestReopenCommandHandler::new(
            assignment_repo.clone(),
            resolver.clone(),
            message_sender,
            event_bus.clone(),
        )),
        pause_series: Arc::new(PauseSeriesCommandHandler::new(
            assignment_repo.clone(),
            resolver.clone(),
            event_bus.clone(),
        )),
        unpause_series: Arc::new(UnpauseSeriesCommandHandler::new(
            assignment_repo.clone(),
            resolver.clone(),
            event_bus.clone(),
        )),
        delete_series: Arc::new(DeleteSeriesCommandHandler::new(
            assignment_repo.clone(),
            resolver,
            event_bus,
        )),
    };
    info!("✓ Command handlers initialized");

    info!(
        "✅ Context ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(CadenceContext {
        assignment_repo,
        client_repo,
        queries,
        handlers,
    })
}
