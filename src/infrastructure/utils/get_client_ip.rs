use actix_web::HttpRequest;

pub const UNKNOWN_CLIENT: &str = "unknown";

/// Best-effort caller identity used as the rate limit key.
///
/// Takes the first `x-forwarded-for` entry, then `x-real-ip`, then gives up
/// with `"unknown"`. The value is not checked to be an address.
pub fn get_client_ip(req: &HttpRequest) -> String {
    header_value(req, "x-forwarded-for")
        .and_then(|s| s.split(',').next().map(str::trim))
        .filter(|s| !s.is_empty())
        .or_else(|| header_value(req, "x-real-ip").map(str::trim).filter(|s| !s.is_empty()))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn prefers_first_forwarded_for_entry() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.1"))
            .insert_header(("x-real-ip", "198.51.100.2"))
            .to_http_request();
        assert_eq!(get_client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_real_ip() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", ""))
            .insert_header(("x-real-ip", "198.51.100.2"))
            .to_http_request();
        assert_eq!(get_client_ip(&req), "198.51.100.2");
    }

    #[test]
    fn unknown_without_headers() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(get_client_ip(&req), UNKNOWN_CLIENT);
    }
}
