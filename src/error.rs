// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for the request-issuing layer.
///
/// `Validation` is raised before any request is made. `Unauthorized` is the
/// one global failure: callers must clear the session and send the user back
/// to login. Everything else is non-fatal from a store's point of view and
/// ends up in the store's error slot.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("authentication required")]
    Unauthorized,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;
