//! Portfolio content
//!
//! Everything the page shows, loadable from a `site.toml`. Missing tables
//! fall back to the built-in content.

use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub navbar: Navbar,
    pub hero: Hero,
    pub about: About,
    pub projects: Section<Project>,
    pub experience: Section<Experience>,
    pub testimonials: Section<Testimonial>,
    pub contact: Section<ContactEntry>,
    pub footer: Footer,
}

impl SiteContent {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let content = Self::from_toml_str(&text)?;
        tracing::debug!("loaded site content from {}", path.display());
        Ok(content)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Navbar {
    pub brand: String,
    pub links: Vec<Link>,
}

impl Default for Navbar {
    fn default() -> Self {
        Self {
            brand: "Folio".into(),
            links: section_links(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

fn section_links() -> Vec<Link> {
    vec![
        Link::new("About", "#about"),
        Link::new("Projects", "#projects"),
        Link::new("Experience", "#experience"),
        Link::new("Contact", "#contact"),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub badge: String,
    pub headline: String,
    pub summary: String,
    pub skills: Vec<String>,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            badge: "Software Engineer · React Specialist".into(),
            headline: "Crafting digital experiences with precision.".into(),
            summary: "Full-stack developer building fast, accessible web applications.".into(),
            skills: [
                "React",
                "Next.js",
                "JavaScript",
                "Node.js",
                "MongoDB",
                "TailwindCSS",
                "Figma",
                "Git",
                "GitHub",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub highlights: Vec<Highlight>,
}

impl Default for About {
    fn default() -> Self {
        Self {
            heading: "Building the future, one component at a time.".into(),
            paragraphs: vec![
                "I build web applications end to end, from interface to API.".into(),
                "I care about clean code, performance, and the people using it.".into(),
            ],
            highlights: vec![
                Highlight::new("Clean Code", "Maintainable, scalable code that lasts."),
                Highlight::new("Performance", "Fast pages and responsive interfaces."),
                Highlight::new("Collaboration", "Working closely with teams to ship ideas."),
                Highlight::new("Innovation", "Keeping up with tools and practices."),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

impl Highlight {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A titled section with a list of cards
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Section<T> {
    fn new(label: &str, heading: &str, description: &str, items: Vec<T>) -> Self {
        Self {
            label: label.into(),
            heading: heading.into(),
            description: description.into(),
            items,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Project {
    fn new(title: &str, description: &str, tags: &[&str]) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            link: None,
        }
    }
}

impl Default for Section<Project> {
    fn default() -> Self {
        Self::new(
            "Featured Work",
            "Projects that make an impact.",
            "A selection of recent work, from AI products to automation tools.",
            vec![
                Project::new(
                    "AI SaaS Platform",
                    "Full-stack platform for text, image, and code generation.",
                    &["Next.js", "Express", "MongoDB", "OpenAI API"],
                ),
                Project::new(
                    "Real-Time Chat Application",
                    "Instant messaging with presence over WebSockets.",
                    &["React", "Node.js", "Socket.io", "MongoDB"],
                ),
                Project::new(
                    "Library Management System",
                    "Library tooling with text-to-speech and spreadsheet storage.",
                    &["Python", "Automation", "Text-to-Speech"],
                ),
                Project::new(
                    "Instagram Automation Tool",
                    "Post scheduling and interaction management.",
                    &["Python", "Automation"],
                ),
            ],
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub period: String,
    pub role: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub current: bool,
}

impl Experience {
    fn new(period: &str, role: &str, company: &str, description: &str, technologies: &[&str]) -> Self {
        Self {
            period: period.into(),
            role: role.into(),
            company: company.into(),
            description: description.into(),
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            current: false,
        }
    }
}

impl Default for Section<Experience> {
    fn default() -> Self {
        let mut current = Experience::new(
            "2024 – 2025",
            "Software Developer Trainee",
            "Pixela Media",
            "Web application features, UI development, and API integration.",
            &["React", "JavaScript", "Tailwind CSS", "REST APIs"],
        );
        current.current = true;

        Self::new(
            "Career Journey",
            "Experience that speaks volumes.",
            "Roles where I shipped real features alongside real teams.",
            vec![
                current,
                Experience::new(
                    "2024",
                    "Full-Stack Development Intern",
                    "Rooman Technologies",
                    "Frontend and backend features for production applications.",
                    &["React", "Node.js", "Express", "MongoDB"],
                ),
                Experience::new(
                    "2023",
                    "Python Developer Intern",
                    "Drop Solutions",
                    "Python applications and automation scripts.",
                    &["Python", "Automation", "Data Handling"],
                ),
            ],
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    #[serde(default)]
    pub role: String,
}

impl Default for Section<Testimonial> {
    fn default() -> Self {
        Self::new(
            "Testimonials",
            "Kind words from collaborators.",
            "What people say about working together.",
            Vec::new(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl ContactEntry {
    fn new(label: &str, value: &str, href: Option<&str>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            href: href.map(String::from),
        }
    }
}

impl Default for Section<ContactEntry> {
    fn default() -> Self {
        Self::new(
            "Get in Touch",
            "Let's build something great.",
            "Have a project in mind? Send a message and I'll get back to you.",
            vec![
                ContactEntry::new("Email", "hello@example.com", Some("mailto:hello@example.com")),
                ContactEntry::new("Phone", "+00 00000 00000", None),
                ContactEntry::new("Location", "Remote", None),
            ],
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub text: String,
    pub links: Vec<Link>,
    pub socials: Vec<Link>,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            text: "Designed and built with care.".into(),
            links: section_links(),
            socials: vec![
                Link::new("GitHub", "https://github.com/"),
                Link::new("LinkedIn", "https://linkedin.com/"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_content() {
        let content = SiteContent::default();
        assert_eq!(content.projects.items.len(), 4);
        assert_eq!(content.experience.items.len(), 3);
        assert!(content.experience.items[0].current);
        assert_eq!(content.contact.items.len(), 3);
        assert!(content.testimonials.items.is_empty());
        assert_eq!(content.navbar.links.len(), 4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let content = SiteContent::from_toml_str(
            r#"
            [hero]
            headline = "Hello"

            [testimonials]
            label = "Testimonials"
            heading = "Nice things"
            description = ""

            [[testimonials.items]]
            quote = "Great to work with."
            author = "A. Client"
            "#,
        )
        .unwrap();

        assert_eq!(content.hero.headline, "Hello");
        assert_eq!(content.hero.skills.len(), 9);
        assert_eq!(content.testimonials.items.len(), 1);
        assert_eq!(content.testimonials.items[0].role, "");
        assert_eq!(content.projects, Section::<Project>::default());
    }

    #[test]
    fn test_malformed_content_is_an_error() {
        let result = SiteContent::from_toml_str("[projects]\nitems = 3");
        assert!(matches!(result, Err(crate::SiteError::Content(_))));
    }
}
