//! Core types for device classification.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Coarse device type, used as the aggregation key for device counters.
///
/// The label returned by [`DeviceType::label`] (and by `Display`) is the
/// exact string persisted as a `deviceVisits` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceType {
    /// iPhone or iPod touch.
    #[cfg_attr(feature = "serde", serde(rename = "iPhone"))]
    IPhone,
    /// iPad, including iPadOS reporting a desktop Mac platform.
    #[cfg_attr(feature = "serde", serde(rename = "iPad"))]
    IPad,
    /// Desktop macOS.
    Mac,
    /// Android phone or tablet.
    Android,
    /// Windows desktop or laptop.
    Windows,
    /// Linux that is not Android.
    Linux,
    /// Anything the classifier cannot place.
    Other,
}

impl DeviceType {
    /// Every device type, in classifier precedence order.
    pub const ALL: [DeviceType; 7] = [
        DeviceType::IPhone,
        DeviceType::IPad,
        DeviceType::Mac,
        DeviceType::Android,
        DeviceType::Windows,
        DeviceType::Linux,
        DeviceType::Other,
    ];

    /// Short type label, e.g. `"iPhone"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            DeviceType::IPhone => "iPhone",
            DeviceType::IPad => "iPad",
            DeviceType::Mac => "Mac",
            DeviceType::Android => "Android",
            DeviceType::Windows => "Windows",
            DeviceType::Linux => "Linux",
            DeviceType::Other => "Other",
        }
    }

    /// Display icon captured alongside the first visit of this type.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            DeviceType::IPhone => "🍎",
            DeviceType::IPad | DeviceType::Mac => "🍏",
            DeviceType::Android => "🐶",
            DeviceType::Windows => "🪟",
            DeviceType::Linux | DeviceType::Other => "👽",
        }
    }

    /// Broader grouping this type belongs to.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            DeviceType::IPhone | DeviceType::IPad | DeviceType::Mac => Category::Apple,
            DeviceType::Android => Category::Android,
            DeviceType::Windows => Category::Windows,
            DeviceType::Linux | DeviceType::Other => Category::Other,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeviceType {
    type Err = ParseError;

    /// Parse an exact type label (case-sensitive, as persisted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| ParseError::UnknownLabel(s.to_string()))
    }
}

/// Broad device grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Category {
    Apple,
    Android,
    Windows,
    Other,
}

impl Category {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Apple => "Apple",
            Category::Android => "Android",
            Category::Windows => "Windows",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Apple" => Ok(Category::Apple),
            "Android" => Ok(Category::Android),
            "Windows" => Ok(Category::Windows),
            "Other" => Ok(Category::Other),
            _ => Err(ParseError::UnknownLabel(s.to_string())),
        }
    }
}

/// Result of classifying a set of environment signals.
///
/// Carries a type label and its broader grouping. Always built from a
/// [`DeviceType`], so the two can never disagree.
///
/// Serializes as `{"type": "...", "icon": "...", "category": "..."}`. When
/// deserializing, the category is re-derived from the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "DeviceCategoryRepr", from = "DeviceCategoryRepr")
)]
pub struct DeviceCategory {
    device_type: DeviceType,
    category: Category,
}

impl DeviceCategory {
    /// The "Other/Other" fallback.
    pub const OTHER: DeviceCategory = DeviceCategory::new(DeviceType::Other);

    #[must_use]
    pub const fn new(device_type: DeviceType) -> Self {
        Self {
            device_type,
            category: device_type.category(),
        }
    }

    #[must_use]
    pub const fn device_type(&self) -> DeviceType {
        self.device_type
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Type label, the key used in `deviceVisits`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.device_type.label()
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        self.device_type.icon()
    }
}

impl From<DeviceType> for DeviceCategory {
    fn from(device_type: DeviceType) -> Self {
        Self::new(device_type)
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.device_type, self.category)
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct DeviceCategoryRepr {
    #[serde(rename = "type")]
    device_type: DeviceType,
    #[serde(default)]
    icon: String,
    category: Category,
}

#[cfg(feature = "serde")]
impl From<DeviceCategory> for DeviceCategoryRepr {
    fn from(value: DeviceCategory) -> Self {
        Self {
            device_type: value.device_type,
            icon: value.icon().to_string(),
            category: value.category,
        }
    }
}

#[cfg(feature = "serde")]
impl From<DeviceCategoryRepr> for DeviceCategory {
    fn from(value: DeviceCategoryRepr) -> Self {
        DeviceCategory::new(value.device_type)
    }
}

/// Environment signals the classifier reads.
///
/// In a browser these come from `navigator.userAgent`, `navigator.platform`
/// and touch-event support; other front ends supply them however they can.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnvSignals {
    pub user_agent: String,
    pub platform: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_touch_support: bool,
}

impl EnvSignals {
    pub fn new(
        user_agent: impl Into<String>,
        platform: impl Into<String>,
        has_touch_support: bool,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            platform: platform.into(),
            has_touch_support,
        }
    }
}
