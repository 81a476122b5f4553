use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::{
    domain::{
        AvailableTypes, ClockType, DateRange, Employee, EmployeeList, Me, TimeClock,
        TimeClockList, TimeClockRequest, TimeClockResponse,
    },
    FreeeURL,
};

pub const API_BASE: &str = "https://api.freee.co.jp/hr/api/v1";

/// The employees listing is read as a single page.
const EMPLOYEES_PAGE_LIMIT: u32 = 100;

pub struct FreeeClient {
    http: Client,
    api_base: FreeeURL,
    access_token: String,
}

impl FreeeClient {
    pub fn new(api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: FreeeURL::new(api_base),
            access_token: access_token.into(),
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<String, FreeeFetchError> {
        tracing::debug!("calling {}", call_name);

        let resp = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| FreeeFetchError::ResponseError(format!("{}: {}", call_name, e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FreeeFetchError::ResponseError(format!("{}: {}", call_name, e)))?;
        tracing::debug!(status = status.as_u16(), "{} responded", call_name);

        if !matches!(status, StatusCode::OK | StatusCode::CREATED) {
            return Err(FreeeFetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, FreeeFetchError> {
        let body = self.send(request, call_name).await?;
        serde_json::from_str(&body).map_err(|e| {
            FreeeFetchError::ParsingError(format!(
                "Failed to parse {} response as JSON: {}",
                call_name, e
            ))
        })
    }

    fn time_clocks_url(&self, employee_id: i64) -> FreeeURL {
        self.api_base
            .append_path(&format!("/employees/{}/time_clocks", employee_id))
    }

    pub async fn me(&self) -> Result<Me, FreeeFetchError> {
        let url = self.api_base.append_path("/users/me");
        self.fetch(self.http.get(url.as_ref()), "GET /users/me").await
    }

    pub async fn employees(&self, company_id: i64) -> Result<Vec<Employee>, FreeeFetchError> {
        let url = self.api_base.append_path("/employees");
        let list: EmployeeList = self
            .fetch(
                self.http.get(url.as_ref()).query(&[
                    ("company_id", company_id.to_string()),
                    ("limit", EMPLOYEES_PAGE_LIMIT.to_string()),
                ]),
                "GET /employees",
            )
            .await?;

        Ok(list.employees)
    }

    pub async fn submit_time_clock(
        &self,
        employee_id: i64,
        request: &TimeClockRequest,
    ) -> Result<TimeClockResponse, FreeeFetchError> {
        let url = self.time_clocks_url(employee_id);
        self.fetch(
            self.http.post(url.as_ref()).json(request),
            "POST /employees/:id/time_clocks",
        )
        .await
    }

    pub async fn time_clocks(
        &self,
        employee_id: i64,
        company_id: i64,
        range: DateRange,
    ) -> Result<Vec<TimeClock>, FreeeFetchError> {
        let url = self.time_clocks_url(employee_id);
        let [from, to] = range.as_query();
        let list: TimeClockList = self
            .fetch(
                self.http.get(url.as_ref()).query(&[
                    ("company_id", company_id.to_string()),
                    (from.0, from.1),
                    (to.0, to.1),
                ]),
                "GET /employees/:id/time_clocks",
            )
            .await?;

        Ok(list.into_items())
    }

    pub async fn available_types(
        &self,
        employee_id: i64,
        company_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<ClockType>, FreeeFetchError> {
        let url = self.time_clocks_url(employee_id).append_path("available_types");
        let types: AvailableTypes = self
            .fetch(
                self.http.get(url.as_ref()).query(&[
                    ("company_id", company_id.to_string()),
                    ("date", date.format("%Y-%m-%d").to_string()),
                ]),
                "GET /employees/:id/time_clocks/available_types",
            )
            .await?;

        Ok(types.into_types())
    }
}

#[derive(Error, Debug)]
pub enum FreeeFetchError {
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("{body}")]
    Api { status: u16, body: String },
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

impl FreeeFetchError {
    /// Human readable reason for a failed call. API errors are reduced to the
    /// provider's message when the body carries one.
    pub fn message(&self) -> String {
        match self {
            FreeeFetchError::Api { body, .. } => error_message(body),
            other => other.to_string(),
        }
    }
}

/// Pick the most useful part of an error body: `message`, then `errors`, then
/// the raw text.
pub fn error_message(body: &str) -> String {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    ["message", "errors"]
        .iter()
        .find_map(|key| match fields.get(*key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        })
        .unwrap_or_else(|| body.to_string())
}
