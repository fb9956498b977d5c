// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeocodeErrorCode {
    Config,
    Network,
    Malformed,
    Io,
}

impl GeocodeErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config_error",
            Self::Network => "network_error",
            Self::Malformed => "malformed_response",
            Self::Io => "io_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeError {
    pub code: GeocodeErrorCode,
    pub message: String,
}

impl GeocodeError {
    #[must_use]
    pub fn new(code: GeocodeErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for GeocodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for GeocodeError {}
