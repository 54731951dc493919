//! Dashboard route handlers.
//!
//! Every route sits behind [`require_basic_auth`]: the six table tabs, the
//! root redirect and the JSON statistics endpoints.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    response::{Html, Redirect},
    routing::get,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::admin::middleware::{AppState, require_basic_auth};
use crate::admin::templates::TablePageTemplate;
use crate::error::{Error, Result};
use crate::pagination::PageRequest;
use crate::stats::{
    DEFAULT_GROUP_DAYS, DEFAULT_SENDER_DAYS, GroupStatistics, SenderStatistics, lookback_days,
    window_start,
};
use crate::store::load_page;
use crate::tab::Tab;

/// Raw query parameters in request order.
///
/// Collected as pairs rather than a struct so that repeated or malformed
/// values fall back to defaults instead of being rejected by the extractor.
type Params = Vec<(String, String)>;

/// First value of a query parameter.
fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn page_request(params: &[(String, String)]) -> PageRequest {
    PageRequest::from_query(param(params, "page"), param(params, "page_size"))
}

/// Build the dashboard router.
pub fn dashboard_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(|| async { Redirect::to(Tab::Groups.path()) }))
        .route(
            "/api/groups/{group_jid}/statistics",
            get(group_statistics),
        )
        .route(
            "/api/senders/{sender_jid}/statistics",
            get(sender_statistics),
        );

    for tab in Tab::ALL {
        router = router.route(
            tab.path(),
            get(
                move |State(state): State<Arc<AppState>>, Query(params): Query<Params>| async move {
                    table_page(&state, tab, page_request(&params)).await
                },
            ),
        );
    }

    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render one page of a tab.
async fn table_page(state: &AppState, tab: Tab, request: PageRequest) -> Result<Html<String>> {
    let page = load_page(state.store.as_ref(), tab, request).await?;

    debug!(
        %tab,
        page = request.page,
        page_size = request.page_size,
        total = page.total,
        rows = page.rows.len(),
        "Rendering table page"
    );

    let template = TablePageTemplate::new(&page, &state.whatsapp_host);
    Ok(Html(template.render()?))
}

async fn group_statistics(
    State(state): State<Arc<AppState>>,
    Path(group_jid): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<GroupStatistics>> {
    let days = lookback_days(param(&params, "days"), DEFAULT_GROUP_DAYS);
    let since = window_start(Utc::now(), days);

    state
        .store
        .group_statistics(&group_jid, since)
        .await?
        .map(Json)
        .ok_or(Error::NotFound("Group"))
}

async fn sender_statistics(
    State(state): State<Arc<AppState>>,
    Path(sender_jid): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<SenderStatistics>> {
    let days = lookback_days(param(&params, "days"), DEFAULT_SENDER_DAYS);
    let since = window_start(Utc::now(), days);

    state
        .store
        .sender_statistics(&sender_jid, since)
        .await?
        .map(Json)
        .ok_or(Error::NotFound("Sender"))
}
