/**
 * Admin Dashboard Handlers (admin only)
 *
 * - `GET /api/admin/stats` - totals, new-today and active-today counts
 * - `GET /api/admin/daily/{users|discussions|posts|active}?from=&to=` - rows
 *   created per day (users by last login for `active`), dates as
 *   `YYYY-MM-DD`, the last 7 days by default
 * - `GET /api/admin/search/{users|discussions|posts|reports}?q=&author_id=&status=`
 *   - `{ data, total }`
 */

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_admin;
use crate::backend::error::BackendError;
use crate::backend::middleware::SessionUser;
use crate::backend::server::state::AppState;
use crate::backend::store::AdminStore;
use crate::shared::forum::{DailyCount, SearchParams, SiteStats};
use crate::shared::{PageQuery, SearchPage};

/// Default width of the daily report, today included
pub const DEFAULT_DAILY_DAYS: u64 = 7;

#[derive(Debug, Default, Deserialize)]
pub struct DailyQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

fn start_of_day(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn parse_day(value: &str) -> Result<NaiveDate, BackendError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| BackendError::bad_request(format!("invalid date '{}', expected YYYY-MM-DD", value)))
}

impl DailyQuery {
    /// `[from, to)` in Unix seconds covering whole UTC days
    pub fn range(&self, today: NaiveDate) -> Result<(i64, i64), BackendError> {
        let to = match &self.to {
            Some(to) => parse_day(to)?,
            None => today,
        };
        let from = match &self.from {
            Some(from) => parse_day(from)?,
            None => to
                .checked_sub_days(Days::new(DEFAULT_DAILY_DAYS - 1))
                .ok_or_else(|| BackendError::bad_request("date out of range"))?,
        };
        if from > to {
            return Err(BackendError::bad_request("'from' must not be after 'to'"));
        }
        let end = to
            .succ_opt()
            .ok_or_else(|| BackendError::bad_request("date out of range"))?;
        Ok((start_of_day(from), start_of_day(end)))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyReport {
    pub from: i64,
    pub to: i64,
    pub days: Vec<DailyCount>,
}

pub async fn get_stats(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<SiteStats>, BackendError> {
    require_admin(&user)?;
    let today = start_of_day(Utc::now().date_naive());

    Ok(Json(SiteStats {
        total_users: state.store.get_total_users().await?,
        new_users_today: state.store.get_new_users(today).await?,
        total_discussions: state.store.get_total_discussions().await?,
        new_discussions_today: state.store.get_new_discussions(today).await?,
        active_users_today: state.store.get_user_active(today).await?,
    }))
}

pub async fn get_daily(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(entity): Path<String>,
    Query(query): Query<DailyQuery>,
) -> Result<Json<DailyReport>, BackendError> {
    require_admin(&user)?;
    let (from, to) = query.range(Utc::now().date_naive())?;

    let days = match entity.as_str() {
        "users" => state.store.get_new_user_daily(from, to).await?,
        "discussions" => state.store.get_new_discussion_daily(from, to).await?,
        "posts" => state.store.get_new_post_daily(from, to).await?,
        "active" => state.store.get_user_active_daily(from, to).await?,
        other => return Err(BackendError::not_found(format!("unknown report '{}'", other))),
    };
    Ok(Json(DailyReport { from, to, days }))
}

pub async fn search(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(entity): Path<String>,
    Query(query): Query<PageQuery>,
    Query(params): Query<SearchParams>,
) -> Result<Response, BackendError> {
    require_admin(&user)?;
    let (page, size) = query.page_size();
    let store = &state.store;

    let response = match entity.as_str() {
        "users" => Json(SearchPage {
            data: store.search_users(&params, page, size).await?,
            total: store.search_users_count(&params).await?,
        })
        .into_response(),
        "discussions" => Json(SearchPage {
            data: store.search_discussions(&params, page, size).await?,
            total: store.search_discussions_count(&params).await?,
        })
        .into_response(),
        "posts" => Json(SearchPage {
            data: store.search_posts(&params, page, size).await?,
            total: store.search_posts_count(&params).await?,
        })
        .into_response(),
        "reports" => Json(SearchPage {
            data: store.search_reports(&params, page, size).await?,
            total: store.search_reports_count(&params).await?,
        })
        .into_response(),
        other => return Err(BackendError::not_found(format!("unknown search target '{}'", other))),
    };
    Ok(response)
}
