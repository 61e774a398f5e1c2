//! Login handshake and session cookie state
//!
//! One pass, no retries: GET the login page for the anti-forgery cookie, POST
//! the credentials form, keep the session cookie. Both tokens are then
//! replayed on every request for the rest of the process; there is no
//! re-login, refresh, or logout.

use crate::config::{Credentials, HOST, LOGIN_PATH};
use crate::http::HttpClient;
use crate::transport::Transport;
use crate::{CrawlError, Result};
use url::form_urlencoded;
use url::Url;

/// Cookie carrying the anti-forgery token
const ANTI_FORGERY_COOKIE: &str = "csrftoken";

/// Cookie carrying the session token
const SESSION_COOKIE: &str = "sessionid";

/// Form field the anti-forgery token is echoed back in
const ANTI_FORGERY_FIELD: &str = "csrfmiddlewaretoken";

/// Authentication state for the crawl
///
/// Created empty; `login` fills the anti-forgery token after the first
/// unauthenticated page fetch and the session token after the credentials
/// POST succeeds.
#[derive(Debug, Default)]
pub struct Session {
    anti_forgery_token: Option<String>,
    session_token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once both tokens are present.
    pub fn is_authenticated(&self) -> bool {
        self.anti_forgery_token.is_some() && self.session_token.is_some()
    }

    /// Cookies to attach to outgoing requests, in a stable order.
    pub fn cookie_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(token) = &self.anti_forgery_token {
            pairs.push((ANTI_FORGERY_COOKIE.to_string(), token.clone()));
        }
        if let Some(token) = &self.session_token {
            pairs.push((SESSION_COOKIE.to_string(), token.clone()));
        }
        pairs
    }

    /// Performs the login handshake and stores both tokens.
    pub fn login<T: Transport>(
        &mut self,
        client: &HttpClient<T>,
        credentials: &Credentials,
    ) -> Result<()> {
        let login_url = login_url()?;

        let page = client.get(&login_url, &self.cookie_pairs())?;
        let token = find_cookie(&page.cookies, ANTI_FORGERY_COOKIE)
            .ok_or(CrawlError::MissingAntiForgeryToken)?;
        tracing::debug!("anti-forgery token obtained");

        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("username", &credentials.username)
            .append_pair("password", &credentials.password)
            .append_pair(ANTI_FORGERY_FIELD, &token)
            .append_pair("next", "")
            .finish();
        self.anti_forgery_token = Some(token);

        let response = client.post(&login_url, &self.cookie_pairs(), &form)?;
        let token =
            find_cookie(&response.cookies, SESSION_COOKIE).ok_or(CrawlError::MissingSessionToken)?;
        self.session_token = Some(token);
        tracing::info!("logged in as {}", credentials.username);

        Ok(())
    }
}

/// The fixed login form URL.
fn login_url() -> Result<Url> {
    Ok(Url::parse(&format!("https://{HOST}{LOGIN_PATH}"))?)
}

/// Finds `name` among raw Set-Cookie values and returns its value: the text
/// between `=` and the first `;`, or the whole remainder when no `;` follows.
fn find_cookie(cookies: &[String], name: &str) -> Option<String> {
    for raw in cookies {
        if !raw.contains(name) {
            continue;
        }
        let first_pair = raw.split(';').next().unwrap_or(raw);
        if let Some((_, value)) = first_pair.split_once('=') {
            return Some(value.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct FakeTransport {
        responses: RefCell<VecDeque<Vec<u8>>>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        fn new(responses: Vec<&str>) -> Self {
            Self {
                responses: RefCell::new(
                    responses.into_iter().map(|r| r.as_bytes().to_vec()).collect(),
                ),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for FakeTransport {
        fn exchange(&self, request: &[u8]) -> Result<Vec<u8>> {
            self.requests
                .borrow_mut()
                .push(String::from_utf8_lossy(request).into_owned());
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or(CrawlError::TransportTimeout {
                    host: HOST.to_string(),
                    port: 443,
                })
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "alice".to_string(),
            password: "s3cret".to_string(),
        }
    }

    #[test]
    fn test_find_cookie_strips_attributes() {
        let cookies = vec!["csrftoken=abc123; Path=/; HttpOnly".to_string()];
        assert_eq!(
            find_cookie(&cookies, "csrftoken"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_find_cookie_without_attributes() {
        let cookies = vec!["sessionid=xyz789".to_string()];
        assert_eq!(
            find_cookie(&cookies, "sessionid"),
            Some("xyz789".to_string())
        );
    }

    #[test]
    fn test_find_cookie_absent() {
        let cookies = vec!["other=1; Path=/".to_string()];
        assert_eq!(find_cookie(&cookies, "csrftoken"), None);
    }

    #[test]
    fn test_cookie_pairs_order() {
        let session = Session {
            anti_forgery_token: Some("a".to_string()),
            session_token: Some("b".to_string()),
        };
        assert_eq!(
            session.cookie_pairs(),
            vec![
                ("csrftoken".to_string(), "a".to_string()),
                ("sessionid".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_session_has_no_cookies() {
        let session = Session::new();
        assert!(session.cookie_pairs().is_empty());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_stores_both_tokens() {
        let transport = FakeTransport::new(vec![
            "HTTP/1.1 200 OK\r\nSet-Cookie: csrftoken=tok; Path=/\r\n\r\n<html>login</html>",
            "HTTP/1.1 302 Found\r\nSet-Cookie: sessionid=sess; HttpOnly\r\nLocation: /fakebook/\r\n\r\n",
        ]);
        let client = HttpClient::new(transport);
        let mut session = Session::new();

        session.login(&client, &credentials()).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(
            session.cookie_pairs(),
            vec![
                ("csrftoken".to_string(), "tok".to_string()),
                ("sessionid".to_string(), "sess".to_string()),
            ]
        );
    }

    #[test]
    fn test_login_posts_credentials_form_with_anti_forgery_cookie() {
        let transport = FakeTransport::new(vec![
            "HTTP/1.1 200 OK\r\nSet-Cookie: csrftoken=tok; Path=/\r\n\r\n<html>login</html>",
            "HTTP/1.1 200 OK\r\nSet-Cookie: sessionid=sess\r\n\r\n<html>welcome</html>",
        ]);
        let client = HttpClient::new(&transport);
        let mut session = Session::new();
        session.login(&client, &credentials()).unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("GET /accounts/login/ HTTP/1.1\r\n"));
        assert!(requests[1].starts_with("POST /accounts/login/ HTTP/1.1\r\n"));
        assert!(requests[1].contains("Cookie: csrftoken=tok\r\n"));
        assert!(requests[1]
            .ends_with("\r\n\r\nusername=alice&password=s3cret&csrfmiddlewaretoken=tok&next="));
    }

    #[test]
    fn test_login_fails_without_anti_forgery_cookie() {
        let transport =
            FakeTransport::new(vec!["HTTP/1.1 200 OK\r\nServer: nginx\r\n\r\n<html></html>"]);
        let client = HttpClient::new(transport);
        let mut session = Session::new();

        let result = session.login(&client, &credentials());
        assert!(matches!(result, Err(CrawlError::MissingAntiForgeryToken)));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_fails_without_session_cookie() {
        let transport = FakeTransport::new(vec![
            "HTTP/1.1 200 OK\r\nSet-Cookie: csrftoken=tok; Path=/\r\n\r\n<html>login</html>",
            "HTTP/1.1 200 OK\r\nServer: nginx\r\n\r\n<html>bad password</html>",
        ]);
        let client = HttpClient::new(transport);
        let mut session = Session::new();

        let result = session.login(&client, &credentials());
        assert!(matches!(result, Err(CrawlError::MissingSessionToken)));
        assert!(!session.is_authenticated());
    }
}
