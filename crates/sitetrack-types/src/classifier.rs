//! Device classification from user-agent, platform and touch signals.
//!
//! Rules are evaluated in a fixed order and the first match wins. The order
//! matters: an iPhone user agent also mentions "mac os x", and an Android
//! user agent also mentions "linux".

use crate::types::{DeviceCategory, DeviceType, EnvSignals};

/// Classify a set of environment signals.
///
/// Pure and total: every input maps to exactly one category, falling back to
/// `Other/Other` when nothing matches.
///
/// # Examples
///
/// ```
/// use sitetrack_types::{classify, Category, DeviceType, EnvSignals};
///
/// let env = EnvSignals::new("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", "iPhone", true);
/// let device = classify(&env);
/// assert_eq!(device.device_type(), DeviceType::IPhone);
/// assert_eq!(device.category(), Category::Apple);
/// ```
#[must_use]
pub fn classify(env: &EnvSignals) -> DeviceCategory {
    classify_parts(&env.user_agent, &env.platform, env.has_touch_support)
}

/// Classify from the raw signal parts.
#[must_use]
pub fn classify_parts(user_agent: &str, platform: &str, has_touch_support: bool) -> DeviceCategory {
    let ua = user_agent.to_lowercase();
    let platform = platform.to_lowercase();

    let device_type = if contains_any(&ua, &["iphone", "ipod"]) {
        DeviceType::IPhone
    } else if ua.contains("ipad") || (platform.contains("mac") && has_touch_support) {
        // iPadOS 13+ reports a Mac platform; touch support tells them apart.
        DeviceType::IPad
    } else if platform.contains("mac") || contains_any(&ua, &["macintosh", "mac os x"]) {
        DeviceType::Mac
    } else if ua.contains("android") {
        DeviceType::Android
    } else if platform.contains("win") || ua.contains("windows") {
        DeviceType::Windows
    } else if platform.contains("linux") || ua.contains("linux") {
        DeviceType::Linux
    } else {
        DeviceType::Other
    };

    DeviceCategory::new(device_type)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use proptest::prelude::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const IPAD_UA: &str = "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.6 Mobile/15E148 Safari/604.1";
    const MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";
    const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Mobile Safari/537.36";
    const WINDOWS_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
    const LINUX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    fn kind(ua: &str, platform: &str, touch: bool) -> DeviceType {
        classify_parts(ua, platform, touch).device_type()
    }

    #[test]
    fn test_iphone_example() {
        let env = EnvSignals::new("mozilla/5.0 (iphone; cpu iphone os 17_0)", "iphone", false);
        let device = classify(&env);
        assert_eq!(device.label(), "iPhone");
        assert_eq!(device.category(), Category::Apple);
    }

    #[test]
    fn test_ipod_is_iphone() {
        assert_eq!(kind("Mozilla/5.0 (iPod touch; CPU iPhone OS 12_5)", "iPod", true), DeviceType::IPhone);
    }

    #[test]
    fn test_each_real_user_agent() {
        assert_eq!(kind(IPHONE_UA, "iPhone", true), DeviceType::IPhone);
        assert_eq!(kind(IPAD_UA, "iPad", true), DeviceType::IPad);
        assert_eq!(kind(MAC_UA, "MacIntel", false), DeviceType::Mac);
        assert_eq!(kind(ANDROID_UA, "Linux armv8l", true), DeviceType::Android);
        assert_eq!(kind(WINDOWS_UA, "Win32", false), DeviceType::Windows);
        assert_eq!(kind(LINUX_UA, "Linux x86_64", false), DeviceType::Linux);
    }

    #[test]
    fn test_ipados_desktop_mode_with_touch_is_ipad() {
        // iPadOS sends a desktop Safari UA and a Mac platform.
        assert_eq!(kind(MAC_UA, "MacIntel", true), DeviceType::IPad);
        assert_eq!(kind("", "macintosh", true), DeviceType::IPad);
    }

    #[test]
    fn test_mac_platform_without_touch_is_mac() {
        assert_eq!(kind("", "macintosh", false), DeviceType::Mac);
    }

    #[test]
    fn test_mac_user_agent_with_unknown_platform() {
        assert_eq!(kind(MAC_UA, "", false), DeviceType::Mac);
        // Touch only matters when the platform says Mac.
        assert_eq!(kind(MAC_UA, "", true), DeviceType::Mac);
    }

    #[test]
    fn test_iphone_wins_over_lower_rules() {
        assert_eq!(kind("iphone linux windows android", "linux", false), DeviceType::IPhone);
        assert_eq!(kind("iPhone", "MacIntel", true), DeviceType::IPhone);
    }

    #[test]
    fn test_android_wins_over_linux() {
        assert_eq!(kind(ANDROID_UA, "Linux aarch64", false), DeviceType::Android);
    }

    #[test]
    fn test_windows_platform_only() {
        assert_eq!(kind("", "Win32", false), DeviceType::Windows);
        assert_eq!(kind("", "Win64", true), DeviceType::Windows);
    }

    #[test]
    fn test_darwin_platform_matches_windows_substring() {
        // Plain substring matching: "darwin" contains "win".
        assert_eq!(kind("", "darwin", false), DeviceType::Windows);
    }

    #[test]
    fn test_linux_category_is_other() {
        let device = classify_parts(LINUX_UA, "Linux x86_64", false);
        assert_eq!(device.device_type(), DeviceType::Linux);
        assert_eq!(device.category(), Category::Other);
    }

    #[test]
    fn test_fallback_is_other() {
        assert_eq!(classify_parts("", "", false), DeviceCategory::OTHER);
        assert_eq!(classify_parts("curl/8.4.0", "FreeBSD amd64", true), DeviceCategory::OTHER);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(kind("MOZILLA/5.0 (IPHONE)", "", false), DeviceType::IPhone);
        assert_eq!(kind("", "LINUX X86_64", false), DeviceType::Linux);
    }

    proptest! {
        #[test]
        fn prop_classify_is_deterministic(ua in ".{0,64}", platform in ".{0,24}", touch: bool) {
            let a = classify_parts(&ua, &platform, touch);
            let b = classify_parts(&ua, &platform, touch);
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.category(), a.device_type().category());
        }

        #[test]
        fn prop_iphone_marker_always_wins(prefix in "[a-z ]{0,16}", suffix in "[a-z ]{0,16}", platform in "[a-z0-9 ]{0,16}", touch: bool) {
            let ua = format!("{prefix}iphone{suffix}");
            prop_assert_eq!(kind(&ua, &platform, touch), DeviceType::IPhone);
        }

        #[test]
        fn prop_case_does_not_matter(ua in "[a-zA-Z ();/.0-9]{0,48}", platform in "[a-zA-Z0-9 ]{0,16}", touch: bool) {
            prop_assert_eq!(
                classify_parts(&ua, &platform, touch),
                classify_parts(&ua.to_uppercase(), &platform.to_uppercase(), touch)
            );
        }
    }
}
