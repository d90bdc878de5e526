//! Mobile User-Agent classification.
//!
//! # Responsibilities
//! - Decide mobile vs. other from the `User-Agent` header
//! - Annotate mobile requests with `X-DV-*` headers for downstream handlers
//! - Derive the suspicious-UA signal from the claimed touch-point count
//!
//! # Design Decisions
//! - Case-sensitive substring match, no token boundaries (`NonMobile` matches)
//! - Only the first value of a multi-valued header is read
//! - Annotating twice yields the same headers

use std::num::IntErrorKind;

use axum::http::{header::USER_AGENT, HeaderMap, HeaderValue};

use super::{
    MISSING_TOUCH_POINTS, MOBILE_MARKER, X_DV_DEVICE_TYPE, X_DV_SUSPICIOUS_UA, X_DV_TOUCH_POINTS,
    X_DV_UA,
};

/// Result of classifying a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// The User-Agent claims a mobile device.
    Mobile {
        /// Parsed touch-point count (`-1` when the client sent none).
        touch_points: i64,
        /// Whether the touch-point evidence contradicts the mobile claim.
        suspicious: bool,
    },
    /// Anything else. The request was not modified.
    Other,
}

impl DeviceClass {
    pub fn is_mobile(&self) -> bool {
        matches!(self, DeviceClass::Mobile { .. })
    }

    /// Label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            DeviceClass::Mobile { .. } => "mobile",
            DeviceClass::Other => "other",
        }
    }
}

/// Classify a request by its headers, annotating them in place when mobile.
///
/// Non-mobile requests are returned untouched. For mobile requests all four
/// `X-DV-*` headers are (re)written, and `X-DV-Touch-Points` is always left
/// present and non-empty.
pub fn classify(headers: &mut HeaderMap) -> DeviceClass {
    let user_agent = match headers.get(USER_AGENT) {
        Some(ua) if is_mobile_user_agent(ua.as_bytes()) => ua.clone(),
        _ => return DeviceClass::Other,
    };

    headers.insert(X_DV_UA, user_agent);
    headers.insert(X_DV_DEVICE_TYPE, HeaderValue::from_static("mobile"));

    let claimed = match headers.get(X_DV_TOUCH_POINTS) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => HeaderValue::from_static(MISSING_TOUCH_POINTS),
    };
    let touch_points = claimed.to_str().map(parse_touch_points).unwrap_or(0);
    headers.insert(X_DV_TOUCH_POINTS, claimed);

    let suspicious = is_suspicious(touch_points);
    headers.insert(
        X_DV_SUSPICIOUS_UA,
        HeaderValue::from_static(if suspicious { "true" } else { "false" }),
    );

    DeviceClass::Mobile {
        touch_points,
        suspicious,
    }
}

/// Returns true if the raw User-Agent bytes contain `Mobile`.
pub fn is_mobile_user_agent(user_agent: &[u8]) -> bool {
    let marker = MOBILE_MARKER.as_bytes();
    user_agent.windows(marker.len()).any(|window| window == marker)
}

/// Parse a client-supplied touch-point count.
///
/// Malformed input parses as 0. Out-of-range values saturate.
pub fn parse_touch_points(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(count) => count,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

/// Real touchscreens report more than one simultaneous touch point.
pub fn is_suspicious(touch_points: i64) -> bool {
    touch_points <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    fn headers_with(user_agent: Option<&str>, touch_points: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(ua) = user_agent {
            headers.insert(USER_AGENT, HeaderValue::from_str(ua).unwrap());
        }
        if let Some(tp) = touch_points {
            headers.insert(X_DV_TOUCH_POINTS, HeaderValue::from_str(tp).unwrap());
        }
        headers
    }

    fn header<'a>(headers: &'a HeaderMap, name: &axum::http::HeaderName) -> Option<&'a str> {
        headers.get(name).map(|v| v.to_str().unwrap())
    }

    #[test]
    fn test_mobile_marker_is_plain_substring() {
        assert!(is_mobile_user_agent(IPHONE.as_bytes()));
        assert!(is_mobile_user_agent(b"MobileX"));
        assert!(is_mobile_user_agent(b"NonMobile"));
        assert!(!is_mobile_user_agent(b"mobile"));
        assert!(!is_mobile_user_agent(b"Mobil"));
        assert!(!is_mobile_user_agent(b""));
        assert!(!is_mobile_user_agent(DESKTOP.as_bytes()));
    }

    #[test]
    fn test_mobile_request_gets_all_annotations() {
        let mut headers = headers_with(Some(IPHONE), Some("5"));
        let class = classify(&mut headers);

        assert_eq!(
            class,
            DeviceClass::Mobile {
                touch_points: 5,
                suspicious: false
            }
        );
        assert_eq!(header(&headers, &X_DV_UA), Some(IPHONE));
        assert_eq!(header(&headers, &X_DV_DEVICE_TYPE), Some("mobile"));
        assert_eq!(header(&headers, &X_DV_TOUCH_POINTS), Some("5"));
        assert_eq!(header(&headers, &X_DV_SUSPICIOUS_UA), Some("false"));
    }

    #[test]
    fn test_other_request_is_untouched() {
        let mut headers = headers_with(Some(DESKTOP), Some("0"));
        let before = headers.clone();

        assert_eq!(classify(&mut headers), DeviceClass::Other);
        assert_eq!(headers, before);
        assert!(headers.get(X_DV_UA).is_none());
        assert!(headers.get(X_DV_DEVICE_TYPE).is_none());
        assert!(headers.get(X_DV_SUSPICIOUS_UA).is_none());

        let mut empty = HeaderMap::new();
        assert_eq!(classify(&mut empty), DeviceClass::Other);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_missing_touch_points_defaults_to_sentinel() {
        let mut headers = headers_with(Some(IPHONE), None);
        let class = classify(&mut headers);

        assert_eq!(
            class,
            DeviceClass::Mobile {
                touch_points: -1,
                suspicious: true
            }
        );
        assert_eq!(header(&headers, &X_DV_TOUCH_POINTS), Some("-1"));
        assert_eq!(header(&headers, &X_DV_SUSPICIOUS_UA), Some("true"));
    }

    #[test]
    fn test_empty_touch_points_defaults_to_sentinel() {
        let mut headers = headers_with(Some(IPHONE), Some(""));
        classify(&mut headers);
        assert_eq!(header(&headers, &X_DV_TOUCH_POINTS), Some("-1"));
        assert_eq!(header(&headers, &X_DV_SUSPICIOUS_UA), Some("true"));
    }

    #[test]
    fn test_suspicion_threshold() {
        for (raw, expected) in [
            ("-5", "true"),
            ("0", "true"),
            ("1", "true"),
            ("2", "false"),
            ("10", "false"),
            ("+3", "false"),
        ] {
            let mut headers = headers_with(Some(IPHONE), Some(raw));
            classify(&mut headers);
            assert_eq!(header(&headers, &X_DV_SUSPICIOUS_UA), Some(expected), "touch points {raw}");
            assert_eq!(header(&headers, &X_DV_TOUCH_POINTS), Some(raw));
        }
    }

    #[test]
    fn test_malformed_touch_points_pass_through_but_count_as_zero() {
        let mut headers = headers_with(Some(IPHONE), Some("five"));
        let class = classify(&mut headers);

        assert_eq!(
            class,
            DeviceClass::Mobile {
                touch_points: 0,
                suspicious: true
            }
        );
        assert_eq!(header(&headers, &X_DV_TOUCH_POINTS), Some("five"));
        assert_eq!(header(&headers, &X_DV_SUSPICIOUS_UA), Some("true"));
    }

    #[test]
    fn test_parse_touch_points() {
        assert_eq!(parse_touch_points("3"), 3);
        assert_eq!(parse_touch_points("-1"), -1);
        assert_eq!(parse_touch_points("+2"), 2);
        assert_eq!(parse_touch_points(" 2"), 0);
        assert_eq!(parse_touch_points("2.5"), 0);
        assert_eq!(parse_touch_points("-"), 0);
        assert_eq!(parse_touch_points(""), 0);
        assert_eq!(parse_touch_points("99999999999999999999"), i64::MAX);
        assert_eq!(parse_touch_points("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_only_first_touch_points_value_is_read() {
        let mut headers = headers_with(Some(IPHONE), None);
        headers.append(X_DV_TOUCH_POINTS, HeaderValue::from_static("1"));
        headers.append(X_DV_TOUCH_POINTS, HeaderValue::from_static("8"));

        classify(&mut headers);
        assert_eq!(header(&headers, &X_DV_SUSPICIOUS_UA), Some("true"));
        assert_eq!(headers.get_all(X_DV_TOUCH_POINTS).iter().count(), 1);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let mut headers = headers_with(Some(IPHONE), Some("4"));
        let first = classify(&mut headers);
        let annotated = headers.clone();

        let second = classify(&mut headers);
        assert_eq!(first, second);
        assert_eq!(headers, annotated);

        let mut no_claim = headers_with(Some(IPHONE), None);
        classify(&mut no_claim);
        let annotated = no_claim.clone();
        classify(&mut no_claim);
        assert_eq!(no_claim, annotated);
    }
}
