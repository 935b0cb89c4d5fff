//! Content areas of the public website.

use serde::{Deserialize, Serialize};

/// How an area is presented in the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// Editable form backed by a GET/PUT endpoint pair.
    Section,
    /// Read-only table of inbound records.
    Listing,
}

/// One editable section of the website, or one inbox of inbound records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentArea {
    HomeHero,
    AboutUs,
    Statistics,
    Testimonials,
    Services,
    Navigation,
    Blogs,
    Stories,
    Events,
    Documents,
    ContactDetails,
    JobApplications,
    Subscribers,
    ContactQueries,
}

impl ContentArea {
    /// Every area, in dashboard order.
    pub const ALL: [Self; 14] = [
        Self::HomeHero,
        Self::AboutUs,
        Self::Statistics,
        Self::Testimonials,
        Self::Services,
        Self::Navigation,
        Self::Blogs,
        Self::Stories,
        Self::Events,
        Self::Documents,
        Self::ContactDetails,
        Self::JobApplications,
        Self::Subscribers,
        Self::ContactQueries,
    ];

    /// URL slug used under `/dash/`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::HomeHero => "home-hero",
            Self::AboutUs => "about-us",
            Self::Statistics => "statistics",
            Self::Testimonials => "testimonials",
            Self::Services => "services",
            Self::Navigation => "navigation",
            Self::Blogs => "blogs",
            Self::Stories => "stories",
            Self::Events => "events",
            Self::Documents => "documents",
            Self::ContactDetails => "contact-details",
            Self::JobApplications => "job-applications",
            Self::Subscribers => "subscribers",
            Self::ContactQueries => "contact-queries",
        }
    }

    /// Page title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::HomeHero => "Home Hero",
            Self::AboutUs => "About Us",
            Self::Statistics => "Statistics",
            Self::Testimonials => "Testimonials",
            Self::Services => "Services",
            Self::Navigation => "Navigation",
            Self::Blogs => "Blogs",
            Self::Stories => "Stories",
            Self::Events => "Events",
            Self::Documents => "Documents",
            Self::ContactDetails => "Contact Details",
            Self::JobApplications => "Job Applications",
            Self::Subscribers => "Subscribers",
            Self::ContactQueries => "Contact Queries",
        }
    }

    /// Path of the backend endpoint, relative to the API base URL.
    #[must_use]
    pub const fn api_path(self) -> &'static str {
        match self {
            Self::HomeHero => "/home/hero",
            Self::AboutUs => "/about",
            Self::Statistics => "/home/statistics",
            Self::Testimonials => "/testimonials",
            Self::Services => "/services",
            Self::Navigation => "/navigation",
            Self::Blogs => "/blogs",
            Self::Stories => "/stories",
            Self::Events => "/events",
            Self::Documents => "/documents",
            Self::ContactDetails => "/contact/details",
            Self::JobApplications => "/job-applications",
            Self::Subscribers => "/subscribers",
            Self::ContactQueries => "/contact/queries",
        }
    }

    /// Whether the area is an editable section or a read-only listing.
    #[must_use]
    pub const fn kind(self) -> AreaKind {
        match self {
            Self::JobApplications | Self::Subscribers | Self::ContactQueries => AreaKind::Listing,
            _ => AreaKind::Section,
        }
    }

    /// Look an area up by its URL slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.slug() == slug)
    }

    /// Areas of the given kind, in dashboard order.
    pub fn of_kind(kind: AreaKind) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |area| area.kind() == kind)
    }
}

impl std::fmt::Display for ContentArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_slugs_round_trip() {
        for area in ContentArea::ALL {
            assert_eq!(ContentArea::from_slug(area.slug()), Some(area));
        }
        assert_eq!(ContentArea::from_slug("home"), None);
    }

    #[test]
    fn test_slugs_and_paths_are_unique() {
        let slugs: HashSet<_> = ContentArea::ALL.iter().map(|a| a.slug()).collect();
        let paths: HashSet<_> = ContentArea::ALL.iter().map(|a| a.api_path()).collect();
        assert_eq!(slugs.len(), ContentArea::ALL.len());
        assert_eq!(paths.len(), ContentArea::ALL.len());
    }

    #[test]
    fn test_listing_areas() {
        let listings: Vec<_> = ContentArea::of_kind(AreaKind::Listing).collect();
        assert_eq!(
            listings,
            vec![
                ContentArea::JobApplications,
                ContentArea::Subscribers,
                ContentArea::ContactQueries
            ]
        );
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&ContentArea::HomeHero).unwrap_or_default();
        assert_eq!(json, "\"home-hero\"");
    }
}
