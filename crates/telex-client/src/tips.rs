//! Proactive QR usage tips.

use rand::seq::SliceRandom;

pub const TIPS: &[&str] = &[
    "💡 QR Tip: Use QR codes for WiFi passwords - guests can connect instantly!",
    "💡 QR Tip: Create QR codes for your contact info - no more typing phone numbers!",
    "💡 QR Tip: Generate QR codes for event invitations with all details included!",
    "💡 QR Tip: Use QR codes for product information - link to manuals or specs!",
    "💡 QR Tip: Create QR codes for feedback forms - make surveys accessible!",
    "💡 QR Tip: Generate QR codes for social media profiles - instant follows!",
    "💡 QR Tip: Use QR codes for restaurant menus - contactless and updatable!",
];

/// Pick one tip at random.
pub fn random_tip() -> &'static str {
    TIPS.choose(&mut rand::thread_rng()).copied().unwrap_or(TIPS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_tip_comes_from_list() {
        for _ in 0..20 {
            assert!(TIPS.contains(&random_tip()));
        }
    }
}
