//! Request dispatch: credentials, transport selection and the mirror-retry loop.

use super::{ClientConfig, HttpRequest, HttpResponse, SmscClient};
use crate::domain::{Charset, RawReply};
use crate::transport::split_reply;

/// Primary host plus five mirrors.
pub(super) const MAX_ATTEMPTS: usize = 6;
/// Queries longer than this (in characters) are always sent as POST.
pub(super) const POST_THRESHOLD: usize = 2000;

/// Every attempt failed to produce a reply body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Unreachable {
    pub attempts: usize,
    pub last_url: String,
}

/// `<credentials>&fmt=1&charset=<charset>&<query>`
pub(super) fn build_args(config: &ClientConfig, query: &str) -> String {
    let mut args = String::new();
    config.credentials.push_query(&mut args, config.charset);
    args.push_str("&fmt=1&");
    args.push_str(Charset::FIELD);
    args.push('=');
    args.push_str(config.charset.as_str());
    args.push('&');
    args.push_str(query);
    args
}

pub(super) fn uses_post(config: &ClientConfig, args: &str) -> bool {
    config.post || args.chars().count() > POST_THRESHOLD
}

fn build_request(config: &ClientConfig, url: &str, args: &str, post: bool) -> HttpRequest {
    if post {
        HttpRequest::Post {
            url: url.to_owned(),
            body: config.charset.encode(args).into_owned(),
        }
    } else {
        HttpRequest::Get {
            url: format!("{url}?{args}"),
        }
    }
}

/// Turn an HTTP response into a reply body, or say why the attempt does not count.
fn read_body(response: HttpResponse, charset: Charset) -> Result<String, &'static str> {
    if !(200..=299).contains(&response.status) {
        return Err("unexpected HTTP status");
    }
    let body = charset
        .decode(&response.body)
        .ok_or("reply is not valid in the configured charset")?;
    if body.is_empty() {
        return Err("empty reply");
    }
    Ok(body)
}

impl SmscClient {
    /// Run `command` against the primary host, then mirrors `www1` ... `www5`, until one of them
    /// answers with a non-empty body.
    pub(super) async fn dispatch(&self, command: &str, query: &str) -> Result<RawReply, Unreachable> {
        let config = &self.config;
        let args = build_args(config, query);
        let post = uses_post(config, &args);
        let primary = config.host.endpoint(config.https, command);

        let mut url = primary.clone();
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                url = config.host.mirror_url(&primary, attempt);
            }

            let request = build_request(config, &url, &args, post);
            let failure = match self.http.execute(request).await {
                Ok(response) => match read_body(response, config.charset) {
                    Ok(body) => {
                        tracing::trace!(command, attempt, %url, "gateway replied");
                        return Ok(split_reply(&body));
                    }
                    Err(reason) => reason.to_owned(),
                },
                Err(err) => err.to_string(),
            };
            tracing::debug!(command, attempt, %url, post, reason = %failure, "gateway attempt failed");
        }

        if config.debug {
            tracing::warn!(command, %url, "failed to read address {url}");
        }
        Err(Unreachable {
            attempts: MAX_ATTEMPTS,
            last_url: url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Credentials;

    fn config() -> ClientConfig {
        ClientConfig::new(Credentials::api_key("key").unwrap())
    }

    #[test]
    fn args_start_with_credentials_and_format() {
        let mut config = config();
        assert_eq!(
            build_args(&config, "phone=1&id=2&all=0"),
            "apikey=key&fmt=1&charset=utf-8&phone=1&id=2&all=0"
        );

        config.credentials = Credentials::login_password("user name", "p&ss").unwrap();
        config.charset = Charset::Koi8R;
        assert_eq!(
            build_args(&config, "x=1"),
            "login=user%20name&psw=p%26ss&fmt=1&charset=koi8-r&x=1"
        );
    }

    #[test]
    fn post_is_chosen_by_flag_or_length() {
        let mut config = config();
        assert!(uses_post(&config, "short"));

        config.post = false;
        assert!(!uses_post(&config, "short"));
        assert!(!uses_post(&config, &"a".repeat(POST_THRESHOLD)));
        assert!(uses_post(&config, &"a".repeat(POST_THRESHOLD + 1)));
    }

    #[test]
    fn get_appends_args_and_post_encodes_body() {
        let mut config = config();
        config.charset = Charset::Windows1251;

        let get = build_request(&config, "https://smsc.ru/sys/send.php", "a=1", false);
        assert_eq!(
            get,
            HttpRequest::Get {
                url: "https://smsc.ru/sys/send.php?a=1".to_owned()
            }
        );

        let post = build_request(&config, "https://smsc.ru/sys/send.php", "a=Я", true);
        assert_eq!(
            post,
            HttpRequest::Post {
                url: "https://smsc.ru/sys/send.php".to_owned(),
                body: vec![b'a', b'=', 0xDF],
            }
        );
    }

    #[test]
    fn read_body_rejects_failed_or_empty_responses() {
        let ok = HttpResponse {
            status: 200,
            body: b"1,2".to_vec(),
        };
        assert_eq!(read_body(ok, Charset::Utf8).as_deref(), Ok("1,2"));

        let server_error = HttpResponse {
            status: 502,
            body: b"1,2".to_vec(),
        };
        assert!(read_body(server_error, Charset::Utf8).is_err());

        let empty = HttpResponse {
            status: 200,
            body: Vec::new(),
        };
        assert!(read_body(empty, Charset::Utf8).is_err());

        let malformed = HttpResponse {
            status: 200,
            body: vec![0xFF, 0xFE],
        };
        assert!(read_body(malformed, Charset::Utf8).is_err());
    }
}
