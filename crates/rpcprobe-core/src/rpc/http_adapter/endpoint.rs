use std::path::Path;

use reqwest::Url;

use crate::error::CoreError;

/// Where requests go and how they authenticate.
#[derive(Debug)]
pub(super) struct Endpoint {
    pub(super) url: String,
    pub(super) auth: Option<Credentials>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Credentials {
    pub(super) user: String,
    pub(super) pass: String,
}

impl Endpoint {
    pub(super) fn resolve(
        connection: &str,
        user: Option<&str>,
        pass: Option<&str>,
        cookie_file: Option<&Path>,
    ) -> Result<Self, CoreError> {
        let parsed = Url::parse(connection).map_err(|e| {
            CoreError::InvalidRequest(format!("`{connection}` is not a valid endpoint URL: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CoreError::InvalidRequest(format!(
                "`{}` endpoints are not supported, use http or https",
                parsed.scheme()
            )));
        }

        Ok(Self {
            // The node is addressed by base URL; keep whatever the caller
            // wrote instead of the normalized form.
            url: connection.to_owned(),
            auth: Credentials::resolve(user, pass, cookie_file)?,
        })
    }
}

impl Credentials {
    /// Explicit user+pass wins; otherwise fall back to a Bitcoin-Core-style
    /// cookie file; otherwise the endpoint is unauthenticated.
    fn resolve(
        user: Option<&str>,
        pass: Option<&str>,
        cookie_file: Option<&Path>,
    ) -> Result<Option<Self>, CoreError> {
        match (user, pass) {
            (Some(user), Some(pass)) => Ok(Some(Self {
                user: user.to_owned(),
                pass: pass.to_owned(),
            })),
            (None, None) => cookie_file.map(Self::from_cookie_file).transpose(),
            _ => Err(CoreError::InvalidRequest(
                "incomplete credentials: supply both a user and a password, or neither"
                    .to_owned(),
            )),
        }
    }

    /// First line of the file holds `user:password`, the format Bitcoin Core
    /// writes to `.cookie`.
    fn from_cookie_file(path: &Path) -> Result<Self, CoreError> {
        let path_shown = path.display();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::InvalidRequest(format!("cannot read cookie file {path_shown}: {e}"))
        })?;

        let line = match raw.lines().next().map(str::trim) {
            Some(line) if !line.is_empty() => line,
            _ => {
                return Err(CoreError::InvalidRequest(format!(
                    "cookie file {path_shown} has no content"
                )))
            }
        };

        match line.split_once(':') {
            Some((user, pass)) if !user.is_empty() && !pass.is_empty() => Ok(Self {
                user: user.to_owned(),
                pass: pass.to_owned(),
            }),
            _ => Err(CoreError::InvalidRequest(format!(
                "cookie file {path_shown}: expected a `user:password` line"
            ))),
        }
    }
}
