// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ApiError;
use crate::store::Session;
use crate::utils::http_client;

/// Which of the three backend services a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Auth,
    Core,
    Analytics,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Authenticated HTTP front door to the auth, core, and analytics services.
///
/// The gateway owns no session state; the caller passes an explicit
/// [`Session`] so the bearer token travels with every request. A 401 from
/// any origin surfaces as [`ApiError::Unauthorized`] and must be treated as
/// a global logout, not a per-store failure.
pub struct ApiGateway {
    http: Client,
    config: Config,
}

impl ApiGateway {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client()?,
            config,
        })
    }

    fn url(&self, origin: Origin, path: &str) -> String {
        let base = match origin {
            Origin::Auth => &self.config.auth_url,
            Origin::Core => &self.config.core_url,
            Origin::Analytics => &self.config.analytics_url,
        };
        format!("{}{}", base, path)
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        origin: Origin,
        path: &str,
        query: &[(&str, String)],
        session: &Session,
    ) -> Result<T, ApiError> {
        let req = self.http.get(self.url(origin, path)).query(query);
        self.send_json(req, session)
    }

    pub fn get_bytes(
        &self,
        origin: Origin,
        path: &str,
        query: &[(&str, String)],
        session: &Session,
    ) -> Result<Vec<u8>, ApiError> {
        let req = self.http.get(self.url(origin, path)).query(query);
        let resp = self.dispatch(req, session)?;
        Ok(resp.bytes()?.to_vec())
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        origin: Origin,
        path: &str,
        body: &B,
        session: &Session,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.url(origin, path)).json(body);
        self.send_json(req, session)
    }

    /// POST without a payload (e.g. set-default, logout).
    pub fn post_empty<T: DeserializeOwned>(
        &self,
        origin: Origin,
        path: &str,
        session: &Session,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.url(origin, path));
        self.send_json(req, session)
    }

    pub fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        origin: Origin,
        path: &str,
        body: &B,
        session: &Session,
    ) -> Result<T, ApiError> {
        let req = self.http.put(self.url(origin, path)).json(body);
        self.send_json(req, session)
    }

    /// DELETE, discarding whatever body the server returns.
    pub fn delete(&self, origin: Origin, path: &str, session: &Session) -> Result<(), ApiError> {
        let req = self.http.delete(self.url(origin, path));
        self.dispatch(req, session)?;
        Ok(())
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        session: &Session,
    ) -> Result<T, ApiError> {
        let resp = self.dispatch(req, session)?;
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn dispatch(&self, req: RequestBuilder, session: &Session) -> Result<Response, ApiError> {
        let req = match session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send()?;
        let status = resp.status();
        debug!("{} {}", status.as_u16(), resp.url());
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let code = status.as_u16();
            let message = resp
                .json::<ErrorBody>()
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("Request failed with status {}", code));
            return Err(ApiError::Server {
                status: code,
                message,
            });
        }
        Ok(resp)
    }
}
