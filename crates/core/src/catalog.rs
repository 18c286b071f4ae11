//! Built-in JAMB 2026 registration content.

use crate::model::{CatalogError, StepCatalog, StepDraft};

const VIDEO_URL: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

/// The four registration steps, in order.
///
/// # Errors
///
/// Returns `CatalogError` only if the literal content below is made invalid.
pub fn registration_catalog() -> Result<StepCatalog, CatalogError> {
    StepCatalog::from_drafts(vec![
        StepDraft {
            id: 1,
            title: "Obtain your NIN".into(),
            short_label: "NIN".into(),
            description: "The National Identification Number is mandatory for JAMB registration."
                .into(),
            detailed_content: lines(&[
                "Every candidate must have a National Identification Number (NIN).",
                "If you don't have one, visit the nearest NIMC enrollment center.",
                "Ensure the phone number used for NIN is the same one you'll use for JAMB.",
            ]),
            checklist: lines(&[
                "Confirm NIN is active",
                "Ensure name on NIN matches your certificates",
                "Have a functional phone number",
            ]),
            tips: lines(&[
                "Start this early as NIN issues can take weeks to resolve.",
                "Check your NIN details by dialing *346#.",
            ]),
            icon: "🆔".into(),
            color: "bg-emerald-700".into(),
            video_url: Some(format!("{VIDEO_URL}?si=nin")),
            video_prompt: Some(
                "A Nigerian National Identity Card rotating slowly with glowing security features."
                    .into(),
            ),
        },
        StepDraft {
            id: 2,
            title: "Profile Creation".into(),
            short_label: "Profile Code".into(),
            description: "Generate your unique 10-digit profile code via SMS.".into(),
            detailed_content: lines(&[
                "Send 'NIN [Your 11-digit NIN]' to 55019 or 66019 via SMS.",
                "Example: 'NIN 12345678901' to 55019.",
                "A 10-digit Profile Code will be sent to your phone number.",
            ]),
            checklist: lines(&[
                "At least N50 airtime on your SIM",
                "Send message from your primary number",
                "Save the 10-digit code received",
            ]),
            tips: lines(&[
                "Do not use a post-paid or 'shared' phone number.",
                "One NIN, One Phone Number, One Profile Code.",
            ]),
            icon: "📱".into(),
            color: "bg-emerald-600".into(),
            video_url: Some(format!("{VIDEO_URL}?si=profile-code")),
            video_prompt: Some(
                "A smartphone sending an SMS to 55019 and receiving a profile code.".into(),
            ),
        },
        StepDraft {
            id: 3,
            title: "Purchase JAMB e-PIN".into(),
            short_label: "e-PIN".into(),
            description: "Payment for the examination and registration services.".into(),
            detailed_content: lines(&[
                "Present your Profile Code at any participating bank or vendor.",
                "You can also pay online via Remita, Quickteller, or the JAMB portal.",
                "Payment covers: Examination fee, Reading text, and CBT Center service charge.",
            ]),
            checklist: lines(&[
                "Select correct exam type (UTME or Direct Entry)",
                "Confirm the amount with the vendor before paying",
                "Collect your e-PIN",
            ]),
            tips: lines(&[
                "Keep your payment receipt safe until registration is fully complete.",
                "Double-check that the e-PIN is linked to your Profile Code.",
            ]),
            icon: "💳".into(),
            color: "bg-emerald-500".into(),
            video_url: Some(format!("{VIDEO_URL}?si=e-pin")),
            video_prompt: Some(
                "A digital wallet processing a payment and revealing an e-PIN card.".into(),
            ),
        },
        StepDraft {
            id: 4,
            title: "Print Registration Slip".into(),
            short_label: "Slip".into(),
            description: "The final confirmation of your registration details.".into(),
            detailed_content: lines(&[
                "Once registration is successful, the CBT center will print your slip.",
                "This slip contains your registration number, exam date (when released), and venue.",
                "Keep multiple copies of this slip.",
            ]),
            checklist: lines(&[
                "Check your exam subjects are correct",
                "Confirm your passport photo is visible",
                "Sign and thumbprint the hard copy",
            ]),
            tips: lines(&[
                "Check your email; a copy of the slip is usually sent to you as a PDF.",
                "Start studying immediately using the syllabus provided.",
            ]),
            icon: "📄".into(),
            color: "bg-green-700".into(),
            video_url: Some(format!("{VIDEO_URL}?si=slip")),
            video_prompt: Some("An office printer printing a JAMB Registration Slip.".into()),
        },
    ])
}

/// A labelled date on the schedule panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyDate {
    pub label: &'static str,
    pub when: &'static str,
    pub urgent: bool,
}

/// Static side-panel content shown next to the steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuideContent {
    pub requirements: &'static [&'static str],
    pub key_dates: &'static [KeyDate],
    pub install_steps: &'static [&'static str],
}

pub const GUIDE_CONTENT: GuideContent = GuideContent {
    requirements: &[
        "Valid National Identity Number (NIN)",
        "A personal mobile phone number",
        "Active email address",
    ],
    key_dates: &[
        KeyDate {
            label: "Registration Starts",
            when: "Jan 2026",
            urgent: false,
        },
        KeyDate {
            label: "Registration Ends",
            when: "Feb 2026",
            urgent: true,
        },
        KeyDate {
            label: "Main Exam",
            when: "April 2026",
            urgent: false,
        },
    ],
    install_steps: &[
        "Open this guide in Chrome (Android) or Safari (iOS).",
        "Tap the Menu or Share button.",
        "Select \"Add to Home Screen\".",
    ],
};
