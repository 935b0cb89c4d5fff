//! Built-in demo content served when no genuine session token is present.

use serde_json::{Value, json};

use cms_admin_core::{ContentArea, UserRole};

use crate::models::SessionUser;

/// Profile used by demo sessions.
#[must_use]
pub fn demo_user() -> SessionUser {
    SessionUser {
        id: "demo".to_string(),
        name: "Demo Editor".to_string(),
        email: "demo@example.com".to_string(),
        role: UserRole::Editor,
    }
}

/// Demo payload for an area, shaped like the backend's response body.
#[must_use]
pub fn demo_content(area: ContentArea) -> Value {
    match area {
        ContentArea::HomeHero => json!({
            "title": "Building brighter futures together",
            "subtitle": "Education, health and livelihood programmes across 40 communities.",
            "backgroundImage": "https://images.unsplash.com/photo-1488521787991-ed7bbaae773c",
            "ctaText": "Get involved",
            "ctaLink": "/volunteer"
        }),
        ContentArea::AboutUs => json!({
            "title": "About us",
            "description": "Founded in 2009, we partner with local leaders to run programmes that last.",
            "mission": "Open doors to opportunity for every child.",
            "vision": "Communities where everyone can thrive.",
            "image": "https://images.unsplash.com/photo-1509099836639-18ba1795216d",
            "keyPoints": ["Community led", "Transparent funding", "Measured impact"]
        }),
        ContentArea::Statistics => json!({
            "title": "Our impact",
            "statistics": [
                { "value": "12,000+", "label": "Students supported" },
                { "value": "40", "label": "Partner communities" },
                { "value": "98%", "label": "Funds to programmes" }
            ]
        }),
        ContentArea::Testimonials => json!({
            "title": "What people say",
            "subtitle": "Voices from our volunteers and partners",
            "testimonials": [
                {
                    "name": "Priya Sharma",
                    "designation": "Volunteer teacher",
                    "message": "Every weekend here reminds me why I started teaching.",
                    "image": "",
                    "rating": "5"
                },
                {
                    "name": "Daniel Okafor",
                    "designation": "Partner school principal",
                    "message": "Attendance has doubled since the reading programme began.",
                    "image": "",
                    "rating": "4"
                }
            ]
        }),
        ContentArea::Services => json!({
            "title": "What we do",
            "description": "Programmes designed with the communities they serve.",
            "services": [
                { "title": "Education", "description": "After-school tutoring and scholarships.", "icon": "" },
                { "title": "Health", "description": "Mobile clinics and nutrition support.", "icon": "" }
            ]
        }),
        ContentArea::Navigation => json!({
            "links": [
                { "label": "Home", "path": "/", "placement": "header" },
                { "label": "About", "path": "/about", "placement": "both" },
                { "label": "Contact", "path": "/contact", "placement": "footer" }
            ]
        }),
        ContentArea::Blogs => json!({
            "title": "Latest news",
            "blogs": [{
                "title": "Opening our third learning centre",
                "author": "Communications team",
                "date": "2024-03-12",
                "excerpt": "A new space for 300 students.",
                "content": "This spring we opened the doors of our third learning centre.",
                "image": ""
            }]
        }),
        ContentArea::Stories => json!({
            "title": "Stories of change",
            "stories": [{
                "title": "Amara's first library card",
                "story": "Amara read her first chapter book aloud at the end-of-term celebration.",
                "image": ""
            }]
        }),
        ContentArea::Events => json!({
            "title": "Upcoming events",
            "events": [{
                "title": "Annual charity run",
                "date": "2024-09-21",
                "location": "Riverside Park",
                "description": "5k and 10k routes, family friendly.",
                "image": ""
            }]
        }),
        ContentArea::Documents => json!({
            "documents": [
                { "title": "Annual report 2023", "url": "/files/annual-report-2023.pdf", "category": "report" },
                { "title": "Safeguarding policy", "url": "/files/safeguarding.pdf", "category": "policy" }
            ]
        }),
        ContentArea::ContactDetails => json!({
            "email": "hello@example.org",
            "phone": "+1 555 0100",
            "address": "12 Harbour Street, Springfield",
            "mapUrl": "https://maps.example.com/?q=12+Harbour+Street",
            "workingHours": "Mon-Fri, 9am-5pm"
        }),
        ContentArea::JobApplications => json!([
            { "name": "Lena Fischer", "email": "lena@example.com", "position": "Programme coordinator", "phone": "+1 555 0111", "createdAt": "2024-04-02" },
            { "name": "Omar Haddad", "email": "omar@example.com", "position": "Field officer", "phone": "+1 555 0112", "createdAt": "2024-04-05" }
        ]),
        ContentArea::Subscribers => json!([
            { "email": "reader@example.com", "createdAt": "2024-03-30" },
            { "email": "supporter@example.com", "createdAt": "2024-04-01" }
        ]),
        ContentArea::ContactQueries => json!([
            { "name": "Sofia Rossi", "email": "sofia@example.com", "subject": "Corporate volunteering", "message": "Could our team of 20 join a weekend session?", "createdAt": "2024-04-03" }
        ]),
    }
}
