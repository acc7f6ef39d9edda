use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsFamily {
    Ios,
    Android { major: u32 },
    Other,
}

/// Immutable platform capabilities, built once by the page and handed to
/// every gesture component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: OsFamily,
    pub touch: bool,
    /// Running inside an in-app web view (e.g. a messenger browser), which
    /// ships its own modern engine regardless of the OS version.
    pub in_app_webview: bool,
}

impl Platform {
    pub const fn ios() -> Self {
        Self { os: OsFamily::Ios, touch: true, in_app_webview: false }
    }

    pub const fn android(major: u32) -> Self {
        Self { os: OsFamily::Android { major }, touch: true, in_app_webview: false }
    }

    pub const fn other() -> Self {
        Self { os: OsFamily::Other, touch: false, in_app_webview: false }
    }

    /// Live zoom may overshoot the rest range and spring back on release.
    pub fn elastic_zoom(&self) -> bool {
        matches!(self.os, OsFamily::Ios)
    }

    /// Legacy Android engines render CSS transitions poorly; those devices
    /// jump straight to the target position.
    pub fn animates_transitions(&self) -> bool {
        match self.os {
            OsFamily::Android { major } => self.in_app_webview || major >= 5,
            _ => true,
        }
    }

    /// Classifies a `navigator.userAgent` string. Windows Phone spoofs both
    /// Android and iPhone tokens and is treated as neither.
    pub fn from_user_agent(ua: &str) -> Self {
        let windows_phone = ua.contains("Windows Phone");
        let os = if windows_phone {
            OsFamily::Other
        } else if ["iPhone", "iPad", "iPod"].iter().any(|t| ua.contains(t)) {
            OsFamily::Ios
        } else if let Some(at) = ua.find("Android") {
            let major = ua[at + "Android".len()..]
                .trim_start_matches([' ', '/'])
                .split(|c: char| !c.is_ascii_digit())
                .next()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            OsFamily::Android { major }
        } else {
            OsFamily::Other
        };
        let touch = !matches!(os, OsFamily::Other) || ua.contains("Mobile");
        let in_app_webview = ["MicroMessenger", "QQ/", "_JFiOS", "_jfAndroid"]
            .iter()
            .any(|t| ua.contains(t));
        Self { os, touch, in_app_webview }
    }

    /// Reads the running browser's user agent.
    pub fn detect() -> Self {
        web_sys::window()
            .and_then(|win| win.navigator().user_agent().ok())
            .map(|ua| Self::from_user_agent(&ua))
            .unwrap_or_default()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::other()
    }
}
