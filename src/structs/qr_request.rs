use serde::Deserialize;
use validator::Validate;

use crate::models::qr_code::EncodeOptions;

pub const DEFAULT_SIZE: u32 = 500;
pub const DEFAULT_MARGIN: u32 = 5;
pub const DEFAULT_SECURITY: &str = "WPA2";

/// Rendering options shared by every QR request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QrOptions {
    #[serde(default)]
    pub display_content: bool,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 4096, message = "Height must be between 1 and 4096"))]
    pub height: u32,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 4096, message = "Width must be between 1 and 4096"))]
    pub width: u32,
    #[serde(default = "default_margin")]
    #[validate(range(max = 100, message = "Margin must be at most 100"))]
    pub margin: u32,
}

impl QrOptions {
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            height: self.height,
            width: self.width,
            margin: self.margin,
            pure_barcode: !self.display_content,
            no_padding: true,
        }
    }
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

fn default_margin() -> u32 {
    DEFAULT_MARGIN
}

fn default_security() -> String {
    DEFAULT_SECURITY.to_string()
}

/// A request whose payload can be turned into QR content
pub trait QrContent {
    /// Text handed to the encoder
    fn content(&self) -> String;

    fn options(&self) -> &QrOptions;
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UrlQrRequest {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,
    #[serde(flatten)]
    #[validate(nested)]
    pub options: QrOptions,
}

impl QrContent for UrlQrRequest {
    fn content(&self) -> String {
        self.url.clone()
    }

    fn options(&self) -> &QrOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WifiQrRequest {
    #[validate(length(min = 1, message = "SSID must not be empty"))]
    pub ssid: String,
    // Open networks are sent with an empty password
    pub password: String,
    #[serde(default = "default_security")]
    pub security: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(flatten)]
    #[validate(nested)]
    pub options: QrOptions,
}

impl QrContent for WifiQrRequest {
    fn content(&self) -> String {
        let hidden = if self.hidden { "True" } else { "False" };
        format!(
            "WIFI:S:{};T:{};P:{};H:{}",
            self.ssid, self.security, self.password, hidden
        )
    }

    fn options(&self) -> &QrOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_request_uses_defaults() {
        let req: UrlQrRequest = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(req.content(), "https://example.com");
        assert!(!req.options.display_content);
        assert_eq!(req.options.height, 500);
        assert_eq!(req.options.width, 500);
        assert_eq!(req.options.margin, 5);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn url_request_reads_camel_case_options() {
        let req: UrlQrRequest = serde_json::from_str(
            r#"{"url": "x", "displayContent": true, "height": 200, "width": 300, "margin": 0}"#,
        )
        .unwrap();
        let opts = req.options().encode_options();
        assert_eq!(opts.height, 200);
        assert_eq!(opts.width, 300);
        assert_eq!(opts.margin, 0);
        assert!(!opts.pure_barcode);
        assert!(opts.no_padding);
    }

    #[test]
    fn url_request_missing_url_fails_to_parse() {
        let res = serde_json::from_str::<UrlQrRequest>(r#"{"width": 100}"#);
        assert!(res.is_err());
    }

    #[test]
    fn empty_url_fails_validation() {
        let req: UrlQrRequest = serde_json::from_str(r#"{"url": ""}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn out_of_range_size_fails_validation() {
        let req: UrlQrRequest =
            serde_json::from_str(r#"{"url": "x", "width": 0, "height": 5000}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn negative_margin_fails_to_parse() {
        let res = serde_json::from_str::<UrlQrRequest>(r#"{"url": "x", "margin": -1}"#);
        assert!(res.is_err());
    }

    #[test]
    fn wifi_content_with_defaults() {
        let req: WifiQrRequest =
            serde_json::from_str(r#"{"ssid": "net", "password": "pw"}"#).unwrap();
        assert_eq!(req.content(), "WIFI:S:net;T:WPA2;P:pw;H:False");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn wifi_content_hidden_network() {
        let req: WifiQrRequest = serde_json::from_str(
            r#"{"ssid": "office", "password": "s3cret", "security": "WEP", "hidden": true}"#,
        )
        .unwrap();
        assert_eq!(req.content(), "WIFI:S:office;T:WEP;P:s3cret;H:True");
    }

    #[test]
    fn wifi_allows_empty_password() {
        let req: WifiQrRequest =
            serde_json::from_str(r#"{"ssid": "cafe", "password": ""}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.content(), "WIFI:S:cafe;T:WPA2;P:;H:False");
    }

    #[test]
    fn wifi_missing_password_fails_to_parse() {
        assert!(serde_json::from_str::<WifiQrRequest>(r#"{"ssid": "net"}"#).is_err());
        assert!(serde_json::from_str::<WifiQrRequest>(r#"{"password": "pw"}"#).is_err());
    }

    #[test]
    fn wifi_empty_ssid_fails_validation() {
        let req: WifiQrRequest = serde_json::from_str(r#"{"ssid": "", "password": "pw"}"#).unwrap();
        assert!(req.validate().unwrap_err().field_errors().contains_key("ssid"));
    }
}
