//! CaseDesk - headless client
//!
//! Bootstraps the session and prints the current month's agenda.

use anyhow::Context;
use casedesk_app::utils::logging::{init_tracing, LogFormat};
use casedesk_app::utils::report::{render_events, render_month};
use casedesk_app::AppContext;
use casedesk_core::calendar::{events_on, upcoming};
use casedesk_core::cases::activity::stale_cases;
use casedesk_domain::{Credentials, SessionState, YearMonth, STALE_AFTER_DAYS};
use casedesk_infra::config;
use chrono::TimeZone;

const UPCOMING_LIMIT: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    init_tracing(LogFormat::from_env())?;
    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env loaded"),
    }

    let config = config::load().context("loading configuration")?;
    let (ctx, mut navigation) = AppContext::new(config).context("building application context")?;

    tokio::spawn(async move {
        while let Some(request) = navigation.recv().await {
            tracing::info!(?request, "login surface requested");
        }
    });

    let mut state = ctx.initialize().await;
    if state != SessionState::Ready {
        state = sign_in_from_env(&ctx).await?;
    }
    if state != SessionState::Ready {
        tracing::warn!(%state, "not signed in; set CASEDESK_EMAIL and CASEDESK_PASSWORD to log in");
        return Ok(());
    }

    match std::env::var("CASEDESK_TZ").ok().filter(|tz| !tz.trim().is_empty()) {
        Some(name) => {
            let tz: chrono_tz::Tz =
                name.trim().parse().map_err(|e| anyhow::anyhow!("invalid CASEDESK_TZ: {e}"))?;
            report(&ctx, &tz).await
        }
        None => report(&ctx, &chrono::Local).await,
    }
}

async fn sign_in_from_env(ctx: &AppContext) -> anyhow::Result<SessionState> {
    let (Ok(email), Ok(password)) =
        (std::env::var("CASEDESK_EMAIL"), std::env::var("CASEDESK_PASSWORD"))
    else {
        return Ok(ctx.guard.state());
    };

    match ctx.sign_in(&Credentials::new(email, password)).await {
        Ok(user) => tracing::info!(user = user.display_name(), "signed in"),
        Err(err) => tracing::error!(error = %err, "sign-in failed"),
    }
    Ok(ctx.guard.state())
}

async fn report<Tz>(ctx: &AppContext, tz: &Tz) -> anyhow::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let dashboard = ctx.case_service.dashboard().await.context("loading dashboard")?;
    let today = ctx.clock.utc_now().with_timezone(tz).date_naive();
    let grid = ctx
        .case_service
        .month_agenda(YearMonth::of(today), tz)
        .await
        .context("loading agenda")?;

    if let Some(user) = ctx.guard.identity() {
        println!("{}", user.display_name());
    }
    println!(
        "{} cases, {} in judgment, {} hearings this month",
        dashboard.stats.total, dashboard.stats.in_judgment, dashboard.stats.hearings_this_month
    );

    let now = ctx.clock.utc_now();
    let stale = stale_cases(&dashboard.cases, now).len();
    if stale > 0 {
        println!("{stale} cases without review for more than {STALE_AFTER_DAYS} days");
    }

    println!();
    print!("{}", render_month(&grid));

    let due_today: Vec<_> = events_on(&dashboard.upcoming, today, tz).into_iter().cloned().collect();
    if !due_today.is_empty() {
        println!();
        println!("Today");
        print!("{}", render_events(&due_today, tz));
    }

    println!();
    print!("{}", render_events(&upcoming(&dashboard.upcoming, now, UPCOMING_LIMIT), tz));
    Ok(())
}
