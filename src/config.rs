// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::env;

pub const DEFAULT_AUTH_URL: &str = "http://localhost:8081";
pub const DEFAULT_CORE_URL: &str = "http://localhost:8082";
pub const DEFAULT_ANALYTICS_URL: &str = "http://localhost:8083";

/// Base URLs of the three backend origins.
#[derive(Debug, Clone)]
pub struct Config {
    pub auth_url: String,
    pub core_url: String,
    pub analytics_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            auth_url: env::var("KOPILKA_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.into()),
            core_url: env::var("KOPILKA_API_URL").unwrap_or_else(|_| DEFAULT_CORE_URL.into()),
            analytics_url: env::var("KOPILKA_ANALYTICS_URL")
                .unwrap_or_else(|_| DEFAULT_ANALYTICS_URL.into()),
        }
    }
}
