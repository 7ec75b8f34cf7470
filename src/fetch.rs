use crate::error::FetchError;

/// Retrieves the text of an externally referenced script.
pub trait ScriptFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP(S) fetcher. One request per call; callers issue them in order.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .user_agent(concat!("symscan/", env!("CARGO_PKG_VERSION")))
                .build(),
        }
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScriptFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let fail = |message: String| FetchError {
            url: url.to_string(),
            message,
        };

        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => fail(format!("HTTP status {code}")),
            ureq::Error::Transport(t) => fail(t.to_string()),
        })?;

        response
            .into_string()
            .map_err(|e| fail(format!("unreadable body: {e}")))
    }
}
