use reqwest::{redirect, Client, Url};
use std::sync::Arc;
use std::time::Duration;

const MAX_REDIRECTS: usize = 10;

/// How the peer asks to be authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationMethod {
    ServerTrust,
    ClientCertificate,
    HttpBasic,
    Other,
}

#[derive(Debug, Clone)]
pub struct ServerTrustChallenge {
    pub host: String,
    pub method: AuthenticationMethod,
}

impl ServerTrustChallenge {
    pub fn server_trust(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            method: AuthenticationMethod::ServerTrust,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustDisposition {
    /// Accept the certificate presented by the server as is
    UseCredential,
    /// Let the platform verifier decide
    PerformDefaultHandling,
}

/// Decides how a TLS authentication challenge is answered
pub trait TrustPolicy: Send + Sync {
    fn evaluate(&self, challenge: &ServerTrustChallenge) -> TrustDisposition;
}

/// Trusts whatever certificate the configured backend host presents.
/// Challenges from every other host fall through to platform verification.
#[derive(Debug, Clone)]
pub struct PinnedHostTrustPolicy {
    host: String,
}

impl PinnedHostTrustPolicy {
    /// `host` may carry a port (`manager.local:8443`), only the host part is pinned
    pub fn new(host: &str) -> Self {
        let host = Url::parse(&format!("https://{}", host))
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| host.to_string());

        Self {
            host: host.to_ascii_lowercase(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn is_pinned(&self, host: &str) -> bool {
        host.eq_ignore_ascii_case(&self.host)
    }
}

impl TrustPolicy for PinnedHostTrustPolicy {
    fn evaluate(&self, challenge: &ServerTrustChallenge) -> TrustDisposition {
        if challenge.method == AuthenticationMethod::ServerTrust && self.is_pinned(&challenge.host)
        {
            TrustDisposition::UseCredential
        } else {
            TrustDisposition::PerformDefaultHandling
        }
    }
}

/// Pair of HTTP clients selected per request by a [`TrustPolicy`].
///
/// The lenient client skips certificate verification and stops at redirects
/// leading to a host the policy does not trust.
pub struct TrustedHttpClients {
    policy: Arc<dyn TrustPolicy>,
    lenient: Client,
    default: Client,
}

impl TrustedHttpClients {
    pub fn new(
        policy: Arc<dyn TrustPolicy>,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let redirect_trust = Arc::clone(&policy);
        let redirect_policy = redirect::Policy::custom(move |attempt| {
            let still_trusted = attempt
                .url()
                .host_str()
                .map(|host| {
                    redirect_trust.evaluate(&ServerTrustChallenge::server_trust(host))
                        == TrustDisposition::UseCredential
                })
                .unwrap_or(false);

            if !still_trusted {
                attempt.stop()
            } else if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else {
                attempt.follow()
            }
        });

        let lenient = Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(redirect_policy)
            .timeout(request_timeout)
            .build()?;

        let default = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            policy,
            lenient,
            default,
        })
    }

    /// Client to use for a request to `url`
    pub fn for_url(&self, url: &Url) -> &Client {
        let Some(host) = url.host_str() else {
            return &self.default;
        };
        if url.scheme() != "https" {
            return &self.default;
        }

        match self.policy.evaluate(&ServerTrustChallenge::server_trust(host)) {
            TrustDisposition::UseCredential => &self.lenient,
            TrustDisposition::PerformDefaultHandling => &self.default,
        }
    }

    pub fn is_lenient_for(&self, url: &Url) -> bool {
        std::ptr::eq(self.for_url(url), &self.lenient)
    }
}
