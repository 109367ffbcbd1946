use chrono::Utc;

/// Authenticated session state: CSRF token, bearer token, computed expiration.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub csrf_token: String,
    pub bearer_token: String,
    pub expires_at: Option<i64>, // UNIX timestamp
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(csrf_token: String, bearer_token: String, expires_at: i64) -> Self {
        Self {
            csrf_token,
            bearer_token,
            expires_at: Some(expires_at),
        }
    }

    /// `now >= expires_at` counts as stale so a token is never sent when it
    /// could expire mid-flight.
    pub fn is_fresh_at(&self, now: i64) -> bool {
        !self.bearer_token.is_empty()
            && self.expires_at.map(|exp| now < exp).unwrap_or(false)
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now().timestamp())
    }

    /// Drop the expiry so the next freshness check forces a renewal.
    pub fn invalidate(&mut self) {
        self.expires_at = None;
    }
}
