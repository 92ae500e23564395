use actix_web::HttpRequest;

/// Client address used as the rate-limit key. The first `X-Forwarded-For`
/// hop is only honoured when the deployment sits behind a trusted proxy.
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> String {
    if trust_x_forwarded_for {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn request() -> HttpRequest {
        TestRequest::default()
            .peer_addr("10.0.0.9:5000".parse().unwrap())
            .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.1"))
            .to_http_request()
    }

    #[test]
    fn ignores_forwarded_header_unless_trusted() {
        assert_eq!(get_client_ip(&request(), false), "10.0.0.9");
    }

    #[test]
    fn uses_first_forwarded_hop_when_trusted() {
        assert_eq!(get_client_ip(&request(), true), "203.0.113.7");
    }
}
