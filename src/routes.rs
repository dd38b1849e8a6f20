use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Everything after `/vote/` is the token; base64 may itself contain `/`.
    static ref VOTE_ROUTE: Regex = Regex::new(r"^/vote/(?P<token>.+)$").unwrap();
}

/// The three views a link can land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Setup,
    Vote(String),
    Results,
}

impl Route {
    /// Resolves a full link, a `#/...` fragment or a bare path. Anything
    /// unrecognized lands on setup.
    pub fn parse(link: &str) -> Self {
        let link = link.trim();
        let path = match link.find('#') {
            Some(hash) => &link[hash + 1..],
            None => link,
        };

        if let Some(captures) = VOTE_ROUTE.captures(path) {
            return Route::Vote(captures["token"].to_string());
        }
        match path.trim_end_matches('/') {
            "/results" => Route::Results,
            _ => Route::Setup,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Setup => "setup",
            Route::Vote(_) => "vote",
            Route::Results => "results",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Setup => "/".to_string(),
            Route::Vote(token) => format!("/vote/{}", token),
            Route::Results => "/results".to_string(),
        }
    }
}

/// `<base>#/vote/<token>`, replacing any fragment already on `base`.
pub fn share_link(base: &str, token: &str) -> String {
    let base = base.split('#').next().unwrap_or(base);
    format!("{}#{}", base, Route::Vote(token.to_string()).path())
}
