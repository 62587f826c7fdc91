// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::api::{ApiGateway, Origin};
use crate::error::ApiError;
use crate::models::User;
use crate::store::non_fatal;
use crate::utils::{validate_code, validate_email, validate_password, validate_required};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Kopilka", "kopilka"));

/// Default location of the persisted bearer token.
pub fn token_path() -> Result<PathBuf, ApiError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .ok_or_else(|| std::io::Error::other("Could not determine platform-specific data dir"))?;
    Ok(proj.data_dir().join("token"))
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Debug, Serialize)]
struct EmailOnly<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordChange<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    #[allow(dead_code)]
    message: String,
}

#[derive(Debug)]
pub enum SessionEvent {
    LoggedIn { token: String, user: User },
    Registered,
    Verified,
    CodeResent,
    UserLoaded(User),
    PasswordChanged,
    LoggedOut,
    Failed(String),
}

/// The single bearer token plus whatever the auth service told us about the
/// user. The token is read from disk at startup and every mutation that
/// changes it is written straight back, so a new process picks up where the
/// last one left off.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    verification_sent: bool,
    error: Option<String>,
    path: PathBuf,
}

impl Session {
    /// Open the session backed by the platform token file.
    pub fn open() -> Result<Self, ApiError> {
        Self::at(token_path()?)
    }

    /// Open a session backed by an explicit token file.
    pub fn at(path: PathBuf) -> Result<Self, ApiError> {
        let token = match fs::read_to_string(&path) {
            Ok(t) if !t.trim().is_empty() => Some(t.trim().to_string()),
            _ => None,
        };
        Ok(Self {
            token,
            path,
            ..Default::default()
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn verification_sent(&self) -> bool {
        self.verification_sent
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Pure state reduction; persistence happens in the operations.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::LoggedIn { token, user } => {
                self.error = None;
                self.token = Some(token);
                self.user = Some(user);
            }
            SessionEvent::Registered | SessionEvent::CodeResent => {
                self.error = None;
                self.verification_sent = true;
            }
            SessionEvent::Verified => {
                self.error = None;
                self.verification_sent = false;
            }
            SessionEvent::UserLoaded(user) => {
                self.error = None;
                self.user = Some(user);
            }
            SessionEvent::PasswordChanged => {
                self.error = None;
            }
            SessionEvent::LoggedOut => {
                self.error = None;
                self.token = None;
                self.user = None;
            }
            SessionEvent::Failed(message) => {
                self.error = Some(message);
            }
        }
    }

    /// Drop the token both in memory and on disk. Called on logout and on
    /// any 401.
    pub fn clear(&mut self) -> Result<(), ApiError> {
        self.apply(SessionEvent::LoggedOut);
        self.persist()
    }

    fn persist(&self) -> Result<(), ApiError> {
        match &self.token {
            Some(token) => {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&self.path, token)?;
            }
            None => {
                if self.path.exists() {
                    fs::remove_file(&self.path)?;
                }
            }
        }
        Ok(())
    }

    pub fn register(
        &mut self,
        gw: &ApiGateway,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        if !validate_email(email) {
            return Err(ApiError::Validation("Invalid email address".into()));
        }
        if !validate_password(password) {
            return Err(ApiError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }
        let body = Credentials { email, password };
        match gw.post::<_, Message>(Origin::Auth, "/api/v1/auth/register", &body, self) {
            Ok(_) => self.apply(SessionEvent::Registered),
            Err(e) => self.apply(SessionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn verify_email(&mut self, gw: &ApiGateway, email: &str, code: &str) -> Result<(), ApiError> {
        if !validate_email(email) {
            return Err(ApiError::Validation("Invalid email address".into()));
        }
        if !validate_code(code) {
            return Err(ApiError::Validation(
                "Verification code must be 6 digits".into(),
            ));
        }
        let body = VerifyRequest { email, code };
        match gw.post::<_, Message>(Origin::Auth, "/api/v1/auth/verify-email", &body, self) {
            Ok(_) => self.apply(SessionEvent::Verified),
            Err(e) => self.apply(SessionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn resend_code(&mut self, gw: &ApiGateway, email: &str) -> Result<(), ApiError> {
        if !validate_email(email) {
            return Err(ApiError::Validation("Invalid email address".into()));
        }
        let body = EmailOnly { email };
        match gw.post::<_, Message>(Origin::Auth, "/api/v1/auth/resend-code", &body, self) {
            Ok(_) => self.apply(SessionEvent::CodeResent),
            Err(e) => self.apply(SessionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn login(&mut self, gw: &ApiGateway, email: &str, password: &str) -> Result<(), ApiError> {
        if !validate_email(email) {
            return Err(ApiError::Validation("Invalid email address".into()));
        }
        if !validate_required(password) {
            return Err(ApiError::Validation("Password is required".into()));
        }
        let body = Credentials { email, password };
        match gw.post::<_, AuthResponse>(Origin::Auth, "/api/v1/auth/login", &body, self) {
            Ok(AuthResponse { token, user }) => {
                self.apply(SessionEvent::LoggedIn { token, user });
                self.persist()?;
            }
            Err(ApiError::Unauthorized) => {
                // Bad credentials come back as 401 too; there is no session
                // to salvage either way.
                self.clear()?;
                return Err(ApiError::Unauthorized);
            }
            Err(e) => self.apply(SessionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    /// Validate the stored token against the auth service.
    pub fn me(&mut self, gw: &ApiGateway) -> Result<(), ApiError> {
        match gw.get::<UserEnvelope>(Origin::Auth, "/api/v1/auth/me", &[], self) {
            Ok(env) => self.apply(SessionEvent::UserLoaded(env.user)),
            Err(ApiError::Unauthorized) => {
                self.clear()?;
                return Err(ApiError::Unauthorized);
            }
            Err(e) => self.apply(SessionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    /// Tell the server, then drop the token no matter what it said.
    pub fn logout(&mut self, gw: &ApiGateway) -> Result<(), ApiError> {
        if let Err(e) = gw.post_empty::<Message>(Origin::Auth, "/api/v1/auth/logout", self) {
            debug!("logout request failed, clearing session anyway: {}", e);
        }
        self.clear()
    }

    pub fn change_password(
        &mut self,
        gw: &ApiGateway,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        if !validate_password(new_password) {
            return Err(ApiError::Validation(
                "Password must be at least 6 characters".into(),
            ));
        }
        let body = PasswordChange {
            old_password,
            new_password,
        };
        match gw.post::<_, Message>(Origin::Auth, "/api/v1/auth/change-password", &body, self) {
            Ok(_) => self.apply(SessionEvent::PasswordChanged),
            Err(e) => self.apply(SessionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }
}
