//! Service directory for the add-subscription picker and payment redirects.
//!
//! Grouped service names feed the "Select a service..." dropdown; the payment
//! URL map backs the "Make Payment" action on due or paused rows.

/// A named group of services shown together in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceGroup {
    pub name: &'static str,
    pub services: &'static [&'static str],
}

/// Picker groups in display order.
pub const SERVICE_GROUPS: &[ServiceGroup] = &[
    ServiceGroup {
        name: "Streaming & Entertainment",
        services: &[
            "DStv",
            "Showmax",
            "Netflix",
            "Amazon Prime Video",
            "Disney+",
            "Apple TV+",
            "YouTube Premium",
        ],
    },
    ServiceGroup {
        name: "Music & Audio",
        services: &[
            "Spotify",
            "Apple Music",
            "Deezer",
            "SoundCloud Go",
            "Audible",
        ],
    },
    ServiceGroup {
        name: "Gaming",
        services: &[
            "PlayStation Plus",
            "Xbox Game Pass",
            "Nintendo Switch Online",
        ],
    },
];

/// Account/payment page keyed by the first word of the lowercased service name.
const PAYMENT_URLS: &[(&str, &str)] = &[
    // Streaming & entertainment
    ("dstv", "https://www.dstv.com/account/payment"),
    ("showmax", "https://www.showmax.com/account/payment"),
    ("netflix", "https://www.netflix.com/youraccount"),
    ("amazon", "https://www.amazon.com/gp/css/account/homepage"),
    ("disney+", "https://www.disneyplus.com/account"),
    ("apple", "https://tv.apple.com/account"),
    ("youtube", "https://www.youtube.com/paid_memberships"),
    // Music & audio
    ("spotify", "https://www.spotify.com/account/subscription"),
    ("deezer", "https://www.deezer.com/account/subscription"),
    ("soundcloud", "https://soundcloud.com/settings/subscription"),
    ("audible", "https://www.audible.com/member"),
    // Gaming
    ("playstation", "https://store.playstation.com/en-us/subscriptions"),
    ("xbox", "https://account.microsoft.com/services"),
    ("nintendo", "https://accounts.nintendo.com/subscriptions"),
];

/// Resolve the payment page for a service, matching on the first word of the
/// lowercased name.
#[must_use]
pub fn payment_url(service_name: &str) -> Option<&'static str> {
    let lowered = service_name.trim().to_lowercase();
    let key = lowered.split_whitespace().next()?;
    PAYMENT_URLS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, url)| url)
}
