//! `dashboard --watch`: recompute the dashboard on a fixed interval until Ctrl-C.
//!
//! Each tick runs in its own task, so a slow database round trip can overlap the
//! next tick. Results go through a [`ReportSession`], which drops any dashboard
//! finishing after a newer one was requested.

use super::{WindowArgs, emit, report};
use crate::{
    analytics::{
        dashboard::{Dashboard, dashboard},
        period::ReportWindow,
        session::ReportSession,
    },
    config::settings::Settings,
    errors::Result,
    repository::{DonationRepository, EventRepository, MemberRepository, SeaOrmRepository},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// Computes one dashboard through `session`. Returns it only if no newer refresh
/// was started while it was being computed.
pub async fn refresh_dashboard<R>(
    session: &ReportSession<Dashboard>,
    repo: &R,
    window: ReportWindow,
) -> Option<Dashboard>
where
    R: DonationRepository + EventRepository + MemberRepository,
{
    if session.refresh(dashboard(repo, &window)).await {
        session.latest().await
    } else {
        None
    }
}

/// Prints a fresh dashboard every `every` until interrupted.
pub async fn watch_dashboard(
    repo: SeaOrmRepository,
    args: WindowArgs,
    settings: Settings,
    json: bool,
    every: Duration,
) -> Result<()> {
    let session = Arc::new(ReportSession::new());
    let settings = Arc::new(settings);
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(seconds = every.as_secs(), "watching dashboard");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Resolved per tick so a default end date follows the clock.
                let window = args.window(&settings)?;
                let session = Arc::clone(&session);
                let settings = Arc::clone(&settings);
                let repo = repo.clone();
                tokio::spawn(async move {
                    let Some(board) = refresh_dashboard(&session, &repo, window).await else {
                        debug!("dashboard superseded by a newer refresh");
                        return;
                    };
                    let symbol = settings.church.currency_symbol.as_str();
                    if let Err(e) = emit(json, &board, || report::render_dashboard(&board, symbol)) {
                        warn!(error = %e, "failed to print dashboard");
                    }
                });
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("dashboard watch stopped");
                return Ok(());
            }
        }
    }
}
