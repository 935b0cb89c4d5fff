//! Schema catalogue: the form definition of every editable area.

use super::area::ContentArea;
use super::schema::{FieldSpec, ListSpec, SectionSchema, SelectOption};

const TITLE_MAX: usize = 120;
const SUBTITLE_MAX: usize = 250;
const BODY_MAX: usize = 5_000;
const URL_MAX: usize = 500;

impl ContentArea {
    /// Form schema for an editable area; `None` for listings.
    #[must_use]
    pub fn section_schema(self) -> Option<SectionSchema> {
        let schema = SectionSchema::new(self);
        Some(match self {
            Self::HomeHero => schema
                .field(FieldSpec::text("title", "Headline").required().max_length(TITLE_MAX))
                .field(FieldSpec::textarea("subtitle", "Sub-headline").max_length(SUBTITLE_MAX))
                .field(FieldSpec::image("backgroundImage", "Background image").required())
                .field(FieldSpec::text("ctaText", "Button text").max_length(40))
                .field(FieldSpec::text("ctaLink", "Button link").max_length(URL_MAX)),
            Self::AboutUs => schema
                .field(FieldSpec::text("title", "Title").required().max_length(TITLE_MAX))
                .field(FieldSpec::textarea("description", "Description").required().max_length(BODY_MAX))
                .field(FieldSpec::textarea("mission", "Mission").max_length(1_000))
                .field(FieldSpec::textarea("vision", "Vision").max_length(1_000))
                .field(FieldSpec::image("image", "Image"))
                .list(
                    ListSpec::scalar(
                        "keyPoints",
                        "Key points",
                        FieldSpec::text("point", "Key point").required().max_length(200),
                    )
                    .max_items(8),
                ),
            Self::Statistics => schema
                .field(FieldSpec::text("title", "Section title").max_length(TITLE_MAX))
                .list(
                    ListSpec::new(
                        "statistics",
                        "Statistics",
                        "Statistic",
                        vec![
                            FieldSpec::text("value", "Value").required().max_length(20)
                                .help("Shown as-is, e.g. 250+ or 98%"),
                            FieldSpec::text("label", "Label").required().max_length(60),
                        ],
                    )
                    .min_items(1)
                    .max_items(6),
                ),
            Self::Testimonials => schema
                .field(FieldSpec::text("title", "Section title").required().max_length(TITLE_MAX))
                .field(FieldSpec::text("subtitle", "Section subtitle").max_length(SUBTITLE_MAX))
                .list(ListSpec::new(
                    "testimonials",
                    "Testimonials",
                    "Testimonial",
                    vec![
                        FieldSpec::text("name", "Name").required().max_length(80),
                        FieldSpec::text("designation", "Designation").max_length(80),
                        FieldSpec::textarea("message", "Message").required().max_length(600),
                        FieldSpec::image("image", "Photo"),
                        FieldSpec::select(
                            "rating",
                            "Rating",
                            (1..=5)
                                .map(|n| SelectOption::new(&n.to_string(), &format!("{n} stars")))
                                .collect(),
                        ),
                    ],
                )),
            Self::Services => schema
                .field(FieldSpec::text("title", "Section title").required().max_length(TITLE_MAX))
                .field(FieldSpec::textarea("description", "Intro").max_length(SUBTITLE_MAX))
                .list(ListSpec::new(
                    "services",
                    "Services",
                    "Service",
                    vec![
                        FieldSpec::text("title", "Title").required().max_length(80),
                        FieldSpec::textarea("description", "Description").required().max_length(1_000),
                        FieldSpec::image("icon", "Icon"),
                    ],
                )),
            Self::Navigation => schema.list(
                ListSpec::new(
                    "links",
                    "Menu links",
                    "Link",
                    vec![
                        FieldSpec::text("label", "Label").required().max_length(30),
                        FieldSpec::text("path", "Path").required().max_length(URL_MAX)
                            .help("Site-relative path such as /about"),
                        FieldSpec::select(
                            "placement",
                            "Placement",
                            vec![
                                SelectOption::new("header", "Header"),
                                SelectOption::new("footer", "Footer"),
                                SelectOption::new("both", "Header and footer"),
                            ],
                        ),
                    ],
                )
                .min_items(1)
                .max_items(12),
            ),
            Self::Blogs => schema
                .field(FieldSpec::text("title", "Section title").max_length(TITLE_MAX))
                .list(ListSpec::new(
                    "blogs",
                    "Posts",
                    "Post",
                    vec![
                        FieldSpec::text("title", "Title").required().max_length(TITLE_MAX),
                        FieldSpec::text("author", "Author").max_length(80),
                        FieldSpec::text("date", "Published on").max_length(30),
                        FieldSpec::textarea("excerpt", "Excerpt").max_length(SUBTITLE_MAX),
                        FieldSpec::textarea("content", "Body").required().max_length(20_000),
                        FieldSpec::image("image", "Cover image"),
                    ],
                )),
            Self::Stories => schema
                .field(FieldSpec::text("title", "Section title").max_length(TITLE_MAX))
                .list(ListSpec::new(
                    "stories",
                    "Stories",
                    "Story",
                    vec![
                        FieldSpec::text("title", "Title").required().max_length(TITLE_MAX),
                        FieldSpec::textarea("story", "Story").required().max_length(BODY_MAX),
                        FieldSpec::image("image", "Image"),
                    ],
                )),
            Self::Events => schema
                .field(FieldSpec::text("title", "Section title").max_length(TITLE_MAX))
                .list(ListSpec::new(
                    "events",
                    "Events",
                    "Event",
                    vec![
                        FieldSpec::text("title", "Title").required().max_length(TITLE_MAX),
                        FieldSpec::text("date", "Date").required().max_length(30),
                        FieldSpec::text("location", "Location").max_length(120),
                        FieldSpec::textarea("description", "Description").max_length(2_000),
                        FieldSpec::image("image", "Image"),
                    ],
                )),
            Self::Documents => schema.list(ListSpec::new(
                "documents",
                "Documents",
                "Document",
                vec![
                    FieldSpec::text("title", "Title").required().max_length(TITLE_MAX),
                    FieldSpec::text("url", "File URL").required().max_length(URL_MAX),
                    FieldSpec::select(
                        "category",
                        "Category",
                        vec![
                            SelectOption::new("policy", "Policy"),
                            SelectOption::new("report", "Report"),
                            SelectOption::new("brochure", "Brochure"),
                            SelectOption::new("other", "Other"),
                        ],
                    ),
                ],
            )),
            Self::ContactDetails => schema
                .field(FieldSpec::text("email", "Email").required().max_length(254))
                .field(FieldSpec::text("phone", "Phone").required().max_length(30))
                .field(FieldSpec::textarea("address", "Address").max_length(300))
                .field(FieldSpec::text("mapUrl", "Map link").max_length(URL_MAX))
                .field(FieldSpec::text("workingHours", "Working hours").max_length(120)),
            Self::JobApplications | Self::Subscribers | Self::ContactQueries => return None,
        })
    }
}
